#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes through the frame walker and window decoder.
    // Errors are expected; panics are not.
    let _ = cmpbench::frame::decode(data);

    for body in cmpbench::frame::frames(data) {
        match body {
            Ok(window) => {
                let _ = cmpbench::codec::decompress(window);
            }
            Err(_) => break,
        }
    }
});
