#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // The first byte picks the threshold; the rest is the payload.
    let Some((&t, payload)) = data.split_first() else {
        return;
    };
    let threshold = t as f64 / 64.0;

    let stream = cmpbench::frame::encode(payload, threshold);
    let recovered = match cmpbench::frame::decode(&stream) {
        Ok(v) => v,
        Err(e) => panic!(
            "frame round-trip: own output rejected ({e}; input {} bytes, stream {} bytes)",
            payload.len(),
            stream.len()
        ),
    };

    assert_eq!(
        recovered, payload,
        "frame round-trip mismatch: {} bytes in, {} bytes back",
        payload.len(),
        recovered.len()
    );
});
