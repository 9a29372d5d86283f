//! In-process windowed codec.
//!
//! Each window is compressed independently and self-describes its layout
//! through a leading mode byte:
//!
//! ```text
//! 0  Stored  [raw bytes…]
//! 1  Lz      [raw len: u32 LE][LZ sequences…]
//! 2  LzAns   [raw len: u32 LE][LZ len: u32 LE][rANS payload…]
//! ```
//!
//! The entropy stage runs on top of the LZ output. Whether it is kept is
//! governed by a threshold: the rANS payload must be smaller than
//! `threshold × lz_len` to be eligible, so a threshold of zero (or below)
//! never keeps it. Among the eligible representations the smallest wins,
//! with ties going to the simpler mode.

pub mod lz;
pub mod rans;

use core::fmt;
use std::sync::OnceLock;

use crate::config::WINDOW_SIZE;

/// Largest raw window the decoder accepts.
pub const MAX_WINDOW_LEN: usize = WINDOW_SIZE;

pub const MODE_STORED: u8 = 0;
pub const MODE_LZ: u8 = 1;
pub const MODE_LZ_ANS: u8 = 2;

/// Failure while decoding a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// The window body is truncated or internally inconsistent.
    Malformed,
    /// The leading mode byte names no known layout.
    UnknownMode(u8),
    /// The declared raw length exceeds [`MAX_WINDOW_LEN`].
    WindowTooLarge(usize),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Malformed => f.write_str("malformed compressed window"),
            CodecError::UnknownMode(m) => write!(f, "unknown window mode {m}"),
            CodecError::WindowTooLarge(n) => {
                write!(f, "window declares {n} bytes (limit {MAX_WINDOW_LEN})")
            }
        }
    }
}

impl std::error::Error for CodecError {}

fn read_u32(src: &[u8], pos: usize) -> Result<u32, CodecError> {
    let b = src.get(pos..pos + 4).ok_or(CodecError::Malformed)?;
    Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

/// Compress one window.
///
/// The stored layout is always available as a fallback, so the result is at
/// most `src.len() + 1` bytes.
///
/// # Panics
///
/// Panics if `src` is longer than [`MAX_WINDOW_LEN`]; the decoder would
/// reject such a window.
pub fn compress_window(src: &[u8], threshold: f64) -> Vec<u8> {
    assert!(
        src.len() <= MAX_WINDOW_LEN,
        "window of {} bytes exceeds the {MAX_WINDOW_LEN}-byte limit",
        src.len()
    );
    let mut lz = Vec::with_capacity(src.len() / 2 + 16);
    lz::compress(src, &mut lz);

    let mut ans = Vec::new();
    if threshold > 0.0 {
        rans::encode(&lz, &mut ans);
    }
    let ans_allowed = threshold > 0.0 && (ans.len() as f64) < threshold * lz.len() as f64;

    let stored_size = src.len();
    let lz_size = 4 + lz.len();
    let ans_size = 8 + ans.len();

    let raw_len = (src.len() as u32).to_le_bytes();
    if ans_allowed && ans_size < lz_size && ans_size < stored_size {
        let mut out = Vec::with_capacity(1 + ans_size);
        out.push(MODE_LZ_ANS);
        out.extend_from_slice(&raw_len);
        out.extend_from_slice(&(lz.len() as u32).to_le_bytes());
        out.extend_from_slice(&ans);
        out
    } else if lz_size < stored_size {
        let mut out = Vec::with_capacity(1 + lz_size);
        out.push(MODE_LZ);
        out.extend_from_slice(&raw_len);
        out.extend_from_slice(&lz);
        out
    } else {
        let mut out = Vec::with_capacity(1 + stored_size);
        out.push(MODE_STORED);
        out.extend_from_slice(src);
        out
    }
}

/// Decompress one window, appending the raw bytes to `dst`.
pub fn decompress_window(src: &[u8], dst: &mut Vec<u8>) -> Result<(), CodecError> {
    let (&mode, body) = src.split_first().ok_or(CodecError::Malformed)?;
    match mode {
        MODE_STORED => {
            if body.len() > MAX_WINDOW_LEN {
                return Err(CodecError::WindowTooLarge(body.len()));
            }
            dst.extend_from_slice(body);
            Ok(())
        }
        MODE_LZ => {
            let raw_len = checked_raw_len(read_u32(body, 0)?)?;
            lz::decompress(&body[4..], dst, raw_len)
        }
        MODE_LZ_ANS => {
            let raw_len = checked_raw_len(read_u32(body, 0)?)?;
            let lz_len = read_u32(body, 4)? as usize;
            // LZ output never grows past a small multiple of the window.
            if lz_len > 2 * MAX_WINDOW_LEN + 16 {
                return Err(CodecError::Malformed);
            }
            let mut lz = Vec::with_capacity(lz_len);
            rans::decode(&body[8..], lz_len, &mut lz)?;
            lz::decompress(&lz, dst, raw_len)
        }
        other => Err(CodecError::UnknownMode(other)),
    }
}

fn checked_raw_len(raw_len: u32) -> Result<usize, CodecError> {
    let raw_len = raw_len as usize;
    if raw_len > MAX_WINDOW_LEN {
        return Err(CodecError::WindowTooLarge(raw_len));
    }
    Ok(raw_len)
}

/// Compress a payload no larger than one window.
///
/// # Panics
///
/// Panics if `src` is longer than [`MAX_WINDOW_LEN`].
pub fn compress(src: &[u8], threshold: f64) -> Vec<u8> {
    compress_window(src, threshold)
}

/// Decompress a single window into a fresh buffer.
pub fn decompress(src: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::new();
    decompress_window(src, &mut out)?;
    Ok(out)
}

/// Round-trip a fixed sample through every window layout once per process.
///
/// Used as the in-process backends' availability probe.
pub fn self_test() -> bool {
    static PASSED: OnceLock<bool> = OnceLock::new();
    *PASSED.get_or_init(|| {
        let sample = b"self-test: the codec must reproduce this line exactly. ".repeat(64);
        [0.0, 1.0, f64::INFINITY].iter().all(|&t| {
            let packed = compress(&sample, t);
            decompress(&packed).map(|out| out == sample).unwrap_or(false)
        })
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
