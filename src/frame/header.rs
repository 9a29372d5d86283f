//! Frame length prefix: 3 bytes, little-endian.

/// Width of the length prefix in bytes.
pub const HEADER_SIZE: usize = 3;

/// Largest compressed window a prefix can describe (16 MiB − 1).
pub const MAX_FRAME_LEN: usize = (1 << 24) - 1;

/// Read a length prefix from the start of `src`.
///
/// Returns `None` when fewer than [`HEADER_SIZE`] bytes are available.
#[inline]
pub fn read_len(src: &[u8]) -> Option<usize> {
    match src {
        [b0, b1, b2, ..] => Some(*b0 as usize | (*b1 as usize) << 8 | (*b2 as usize) << 16),
        _ => None,
    }
}

/// Write `len` as a length prefix into the first three bytes of `dst`.
///
/// # Panics
///
/// Panics if `len` exceeds [`MAX_FRAME_LEN`] or `dst` is shorter than the
/// prefix; both are caller contract violations.
#[inline]
pub fn write_len(dst: &mut [u8], len: usize) {
    assert!(len <= MAX_FRAME_LEN, "frame of {len} bytes exceeds the 3-byte length field");
    dst[..HEADER_SIZE].copy_from_slice(&(len as u32).to_le_bytes()[..HEADER_SIZE]);
}
