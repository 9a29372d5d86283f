//! LZ77 stage of the windowed codec.
//!
//! The sequence layout is the LZ4 block layout:
//!
//! ```text
//! [token][literal length ext…][literals…][offset: u16 LE][match length ext…]
//! ```
//!
//! The token's high nibble holds the literal run length, the low nibble the
//! match length minus [`MINMATCH`]. A nibble of 15 means "continued": further
//! bytes are added to it, each 255 meaning another byte follows. The final
//! sequence of a block carries literals only; the decoder recognises it by
//! reaching the end of input right after the literal run.
//!
//! Matches are found greedily through a single-entry hash table of 4-byte
//! sequences. The last [`LAST_LITERALS`] bytes of a block are always emitted
//! as literals.

use super::CodecError;

/// Shortest back-reference the format can express.
pub const MINMATCH: usize = 4;

/// Largest back-reference distance (fits the 16-bit offset field).
pub const MAX_DISTANCE: usize = 65_535;

/// Trailing bytes never covered by a match.
pub const LAST_LITERALS: usize = 5;

const HASH_LOG: u32 = 16;
const ML_BITS: u32 = 4;
const ML_MASK: usize = (1 << ML_BITS) - 1;
const RUN_MASK: usize = 15;

/// Controls how quickly the match finder accelerates through incompressible
/// regions: every `1 << SKIP_TRIGGER` misses the step grows by one byte.
const SKIP_TRIGGER: u32 = 6;

#[inline]
fn read32(src: &[u8], pos: usize) -> u32 {
    u32::from_le_bytes([src[pos], src[pos + 1], src[pos + 2], src[pos + 3]])
}

#[inline]
fn hash4(sequence: u32) -> usize {
    (sequence.wrapping_mul(2_654_435_761) >> (32 - HASH_LOG)) as usize
}

/// Append a length continuation (everything above the nibble).
#[inline]
fn write_length(dst: &mut Vec<u8>, mut len: usize) {
    while len >= 255 {
        dst.push(255);
        len -= 255;
    }
    dst.push(len as u8);
}

fn emit_sequence(dst: &mut Vec<u8>, literals: &[u8], offset: usize, match_len: usize) {
    debug_assert!(match_len >= MINMATCH);
    debug_assert!(offset >= 1 && offset <= MAX_DISTANCE);

    let lit_len = literals.len();
    let ml = match_len - MINMATCH;
    let token = (lit_len.min(RUN_MASK) << ML_BITS) | ml.min(ML_MASK);
    dst.push(token as u8);
    if lit_len >= RUN_MASK {
        write_length(dst, lit_len - RUN_MASK);
    }
    dst.extend_from_slice(literals);
    dst.extend_from_slice(&(offset as u16).to_le_bytes());
    if ml >= ML_MASK {
        write_length(dst, ml - ML_MASK);
    }
}

fn emit_last_literals(dst: &mut Vec<u8>, literals: &[u8]) {
    let lit_len = literals.len();
    dst.push((lit_len.min(RUN_MASK) << ML_BITS) as u8);
    if lit_len >= RUN_MASK {
        write_length(dst, lit_len - RUN_MASK);
    }
    dst.extend_from_slice(literals);
}

/// Compress `src`, appending the sequences to `dst`.
///
/// Always succeeds. The output for an empty input is a single zero token.
pub fn compress(src: &[u8], dst: &mut Vec<u8>) {
    let len = src.len();
    let mut anchor = 0usize;

    if len >= MINMATCH + LAST_LITERALS + 1 {
        let match_limit = len - LAST_LITERALS;
        // Last position at which a 4-byte match may start.
        let search_end = match_limit - MINMATCH;
        let mut table = vec![0u32; 1 << HASH_LOG];
        let mut ip = 0usize;
        let mut misses: u32 = 1 << SKIP_TRIGGER;

        while ip <= search_end {
            let sequence = read32(src, ip);
            let h = hash4(sequence);
            let mut candidate = table[h] as usize;
            table[h] = ip as u32;

            if candidate >= ip || ip - candidate > MAX_DISTANCE || read32(src, candidate) != sequence
            {
                ip += (misses >> SKIP_TRIGGER) as usize;
                misses += 1;
                continue;
            }

            // Catch up: extend the match backwards over pending literals.
            let mut start = ip;
            while start > anchor && candidate > 0 && src[start - 1] == src[candidate - 1] {
                start -= 1;
                candidate -= 1;
            }

            let mut match_len = MINMATCH + (ip - start);
            while start + match_len < match_limit && src[candidate + match_len] == src[start + match_len]
            {
                match_len += 1;
            }

            emit_sequence(dst, &src[anchor..start], start - candidate, match_len);
            ip = start + match_len;
            anchor = ip;
            misses = 1 << SKIP_TRIGGER;

            // Seed the table with a position inside the match so that runs
            // following it are found without a full step of misses.
            if ip - 2 <= search_end {
                table[hash4(read32(src, ip - 2))] = (ip - 2) as u32;
            }
        }
    }

    emit_last_literals(dst, &src[anchor..]);
}

fn read_length(src: &[u8], ip: &mut usize) -> Result<usize, CodecError> {
    let mut total = 0usize;
    loop {
        let byte = *src.get(*ip).ok_or(CodecError::Malformed)?;
        *ip += 1;
        total = total.checked_add(byte as usize).ok_or(CodecError::Malformed)?;
        if byte != 255 {
            return Ok(total);
        }
    }
}

/// Copy `len` bytes starting `offset` bytes back from the end of `dst`.
/// Overlapping copies replicate the period, as the format requires.
#[inline]
fn copy_match(dst: &mut Vec<u8>, offset: usize, len: usize) {
    let from = dst.len() - offset;
    let mut remaining = len;
    while remaining > 0 {
        let chunk = remaining.min(dst.len() - from);
        dst.extend_from_within(from..from + chunk);
        remaining -= chunk;
    }
}

/// Decompress `src`, appending exactly `raw_len` bytes to `dst`.
///
/// Any sequence that would read past `src`, reference data before the start
/// of this block, or produce more or fewer than `raw_len` bytes is
/// [`CodecError::Malformed`].
pub fn decompress(src: &[u8], dst: &mut Vec<u8>, raw_len: usize) -> Result<(), CodecError> {
    let start = dst.len();
    let end = start + raw_len;
    dst.reserve(raw_len);
    let mut ip = 0usize;

    loop {
        let token = *src.get(ip).ok_or(CodecError::Malformed)? as usize;
        ip += 1;

        let mut lit_len = token >> ML_BITS;
        if lit_len == RUN_MASK {
            lit_len += read_length(src, &mut ip)?;
        }
        let lit_end = ip.checked_add(lit_len).ok_or(CodecError::Malformed)?;
        let literals = src.get(ip..lit_end).ok_or(CodecError::Malformed)?;
        if dst.len() + lit_len > end {
            return Err(CodecError::Malformed);
        }
        dst.extend_from_slice(literals);
        ip = lit_end;

        if ip == src.len() {
            break;
        }

        let offset_bytes = src.get(ip..ip + 2).ok_or(CodecError::Malformed)?;
        let offset = u16::from_le_bytes([offset_bytes[0], offset_bytes[1]]) as usize;
        ip += 2;

        let mut match_len = token & ML_MASK;
        if match_len == ML_MASK {
            match_len += read_length(src, &mut ip)?;
        }
        match_len += MINMATCH;

        if offset == 0 || offset > dst.len() - start || dst.len() + match_len > end {
            return Err(CodecError::Malformed);
        }
        copy_match(dst, offset, match_len);
    }

    if dst.len() != end {
        return Err(CodecError::Malformed);
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
