//! Windowed frame format.
//!
//! A payload of any length is cut into windows of at most
//! [`WINDOW_SIZE`](crate::config::WINDOW_SIZE) bytes, each compressed
//! independently and written as
//!
//! ```text
//! [compressed len: 3 bytes LE][compressed window…]
//! ```
//!
//! There is no stream header, footer or checksum. An empty payload encodes
//! to an empty stream. A window body is never empty, so every frame spans at
//! least `HEADER_SIZE + 1` bytes; a shorter tail ends the stream and is
//! ignored.

pub mod header;

use core::fmt;

use crate::codec::{self, CodecError};
use crate::config::WINDOW_SIZE;

pub use header::{HEADER_SIZE, MAX_FRAME_LEN};

/// Failure while walking or decoding a frame stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// A length prefix promises more bytes than the stream holds.
    Truncated { declared: usize, remaining: usize },
    /// A window body failed to decode.
    Codec(CodecError),
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::Truncated { declared, remaining } => write!(
                f,
                "truncated frame: header declares {declared} bytes, {remaining} remain"
            ),
            FrameError::Codec(_) => f.write_str("corrupt window"),
        }
    }
}

impl std::error::Error for FrameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FrameError::Codec(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CodecError> for FrameError {
    fn from(e: CodecError) -> Self {
        FrameError::Codec(e)
    }
}

/// Compress `payload` window by window at the given entropy threshold.
///
/// # Panics
///
/// Panics if a compressed window exceeds [`MAX_FRAME_LEN`]. The codec bounds
/// a window to one byte over its input, so this cannot happen for windows of
/// [`WINDOW_SIZE`].
pub fn encode(payload: &[u8], threshold: f64) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() / 2 + HEADER_SIZE);
    for window in payload.chunks(WINDOW_SIZE) {
        let at = out.len();
        out.extend_from_slice(&[0; HEADER_SIZE]);
        let body = codec::compress_window(window, threshold);
        header::write_len(&mut out[at..], body.len());
        out.extend_from_slice(&body);
    }
    out
}

/// Decode a full frame stream into a fresh buffer.
pub fn decode(bytes: &[u8]) -> Result<Vec<u8>, FrameError> {
    let mut out = Vec::new();
    decode_into(bytes, &mut out)?;
    Ok(out)
}

/// Decode a frame stream into `out`, replacing its contents.
///
/// Reuses `out`'s allocation, so a measurement loop can call this repeatedly
/// without reallocating.
pub fn decode_into(bytes: &[u8], out: &mut Vec<u8>) -> Result<(), FrameError> {
    out.clear();
    for body in frames(bytes) {
        codec::decompress_window(body?, out)?;
    }
    Ok(())
}

/// Iterate over the compressed window bodies of a frame stream.
///
/// Stops once fewer than `HEADER_SIZE + 1` bytes remain. Yields an error and
/// stops at the first truncated frame.
pub fn frames(bytes: &[u8]) -> Frames<'_> {
    Frames { rest: bytes, failed: false }
}

/// Iterator returned by [`frames`].
#[derive(Debug, Clone)]
pub struct Frames<'a> {
    rest: &'a [u8],
    failed: bool,
}

impl<'a> Iterator for Frames<'a> {
    type Item = Result<&'a [u8], FrameError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.rest.len() <= HEADER_SIZE {
            return None;
        }
        let declared = header::read_len(self.rest)?;
        let remaining = self.rest.len() - HEADER_SIZE;
        if declared > remaining {
            self.failed = true;
            return Some(Err(FrameError::Truncated { declared, remaining }));
        }
        let (body, rest) = self.rest[HEADER_SIZE..].split_at(declared);
        self.rest = rest;
        Some(Ok(body))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_payload_is_empty_stream() {
        assert!(encode(b"", 1.0).is_empty());
        assert_eq!(decode(&[]).unwrap(), b"");
    }

    #[test]
    fn one_frame_per_window() {
        let payload = vec![b'q'; 2 * WINDOW_SIZE + 1];
        let stream = encode(&payload, 1.0);
        assert_eq!(frames(&stream).count(), 3);
    }

    #[test]
    fn decode_into_replaces_contents() {
        let stream = encode(b"fresh contents", 0.0);
        let mut out = b"stale".to_vec();
        decode_into(&stream, &mut out).unwrap();
        assert_eq!(out, b"fresh contents");
    }

    #[test]
    fn truncated_body_is_reported() {
        let mut stream = encode(&b"abcdefgh".repeat(1000), 1.0);
        let full = stream.len() - HEADER_SIZE;
        stream.truncate(stream.len() - 1);
        assert_eq!(
            decode(&stream),
            Err(FrameError::Truncated { declared: full, remaining: full - 1 })
        );
    }

    #[test]
    fn short_tail_ends_stream() {
        let mut stream = encode(b"payload", 1.0);
        stream.extend_from_slice(&[0xAA, 0xBB]);
        assert_eq!(decode(&stream).unwrap(), b"payload");

        let mut stream = encode(b"payload", 1.0);
        stream.extend_from_slice(&[0, 0, 0]);
        assert_eq!(decode(&stream).unwrap(), b"payload");
    }

    #[test]
    fn lone_prefix_is_an_empty_stream() {
        assert_eq!(decode(&[1, 0, 0]).unwrap(), b"");
        assert_eq!(frames(&[1, 0, 0]).count(), 0);
    }

    #[test]
    fn corrupt_body_surfaces_codec_error() {
        let stream = [1, 0, 0, 9];
        assert_eq!(decode(&stream), Err(FrameError::Codec(CodecError::UnknownMode(9))));
    }

    #[test]
    fn iterator_stops_after_error() {
        let stream = [5, 0, 0, 1];
        let mut it = frames(&stream);
        assert!(matches!(it.next(), Some(Err(FrameError::Truncated { .. }))));
        assert!(it.next().is_none());
    }
}
