//! Order-0 range-ANS entropy stage.
//!
//! Single 32-bit state, 12-bit normalized frequencies, 16-bit word
//! renormalization. Symbols are encoded last-to-first so the decoder emits
//! them in forward order while reading the word stream front to back.
//!
//! ```text
//! [freq: 256 × u16 LE] [final state: u32 LE] [words: u16 LE …]
//! ```
//!
//! The symbol count is not stored here; the window header carries it.

use super::CodecError;

/// Frequency precision: normalized frequencies sum to `1 << SCALE_BITS`.
pub const SCALE_BITS: u32 = 12;

const TABLE_SIZE: u32 = 1 << SCALE_BITS;
const SCALE_MASK: u32 = TABLE_SIZE - 1;
const NUM_SYMBOLS: usize = 256;

/// Lower bound of the normalized state interval `[RANS_L, RANS_L << 16)`.
const RANS_L: u32 = 1 << 16;
const IO_BITS: u32 = 16;

/// Bytes preceding the word stream.
pub const HEADER_SIZE: usize = NUM_SYMBOLS * 2 + 4;

struct Frequencies {
    freq: [u32; NUM_SYMBOLS],
    cum: [u32; NUM_SYMBOLS],
}

impl Frequencies {
    fn with_cumulative(freq: [u32; NUM_SYMBOLS]) -> Self {
        let mut cum = [0u32; NUM_SYMBOLS];
        let mut running = 0u32;
        for (slot, &f) in cum.iter_mut().zip(freq.iter()) {
            *slot = running;
            running += f;
        }
        Frequencies { freq, cum }
    }

    /// Scale raw byte counts so they sum to exactly [`TABLE_SIZE`]. Every
    /// present symbol keeps at least one slot; the rounding remainder goes to
    /// the most frequent symbols first.
    fn normalize(src: &[u8]) -> Self {
        let mut counts = [0u64; NUM_SYMBOLS];
        for &b in src {
            counts[b as usize] += 1;
        }

        let mut freq = [0u32; NUM_SYMBOLS];
        let total = src.len() as u64;
        if total == 0 {
            freq[0] = TABLE_SIZE;
            return Self::with_cumulative(freq);
        }

        let mut present: Vec<usize> = (0..NUM_SYMBOLS).filter(|&s| counts[s] > 0).collect();
        present.sort_by(|&a, &b| counts[b].cmp(&counts[a]));

        let mut distributed = 0i64;
        for &s in &present {
            let scaled = ((counts[s] * TABLE_SIZE as u64) / total).max(1) as u32;
            freq[s] = scaled;
            distributed += scaled as i64;
        }

        let mut diff = TABLE_SIZE as i64 - distributed;
        let mut idx = 0usize;
        while diff > 0 {
            freq[present[idx % present.len()]] += 1;
            diff -= 1;
            idx += 1;
        }
        while diff < 0 {
            let s = present[idx % present.len()];
            if freq[s] > 1 {
                freq[s] -= 1;
                diff += 1;
            }
            idx += 1;
        }

        Self::with_cumulative(freq)
    }
}

/// Entropy-code `src`, appending the header and word stream to `dst`.
pub fn encode(src: &[u8], dst: &mut Vec<u8>) {
    let table = Frequencies::normalize(src);
    let mut state = RANS_L;
    let mut words: Vec<u16> = Vec::with_capacity(src.len() / 2 + 1);

    for &byte in src.iter().rev() {
        let s = byte as usize;
        let freq = table.freq[s];
        let x_max = (((RANS_L >> SCALE_BITS) as u64) << IO_BITS) * freq as u64;
        while state as u64 >= x_max {
            words.push(state as u16);
            state >>= IO_BITS;
        }
        state = ((state / freq) << SCALE_BITS) + (state % freq) + table.cum[s];
    }
    words.reverse();

    dst.reserve(HEADER_SIZE + words.len() * 2);
    for &f in &table.freq {
        dst.extend_from_slice(&(f as u16).to_le_bytes());
    }
    dst.extend_from_slice(&state.to_le_bytes());
    for w in words {
        dst.extend_from_slice(&w.to_le_bytes());
    }
}

/// Decode `count` symbols from `src`, appending them to `dst`.
///
/// The frequency table must sum to `1 << SCALE_BITS` and the word stream
/// must be consumed exactly; anything else is [`CodecError::Malformed`].
pub fn decode(src: &[u8], count: usize, dst: &mut Vec<u8>) -> Result<(), CodecError> {
    if src.len() < HEADER_SIZE || (src.len() - HEADER_SIZE) % 2 != 0 {
        return Err(CodecError::Malformed);
    }

    let mut freq = [0u32; NUM_SYMBOLS];
    for (s, f) in freq.iter_mut().enumerate() {
        *f = u16::from_le_bytes([src[2 * s], src[2 * s + 1]]) as u32;
    }
    if freq.iter().sum::<u32>() != TABLE_SIZE {
        return Err(CodecError::Malformed);
    }
    let table = Frequencies::with_cumulative(freq);

    let mut lookup = vec![0u8; TABLE_SIZE as usize];
    for s in 0..NUM_SYMBOLS {
        let start = table.cum[s] as usize;
        let end = start + table.freq[s] as usize;
        lookup[start..end].fill(s as u8);
    }

    let state_pos = NUM_SYMBOLS * 2;
    let mut state = u32::from_le_bytes([
        src[state_pos],
        src[state_pos + 1],
        src[state_pos + 2],
        src[state_pos + 3],
    ]);
    let words = &src[HEADER_SIZE..];
    let mut wp = 0usize;

    dst.reserve(count);
    for _ in 0..count {
        let slot = state & SCALE_MASK;
        let s = lookup[slot as usize];
        let idx = s as usize;
        state = table.freq[idx] * (state >> SCALE_BITS) + slot - table.cum[idx];
        if state < RANS_L {
            let word = words.get(wp..wp + 2).ok_or(CodecError::Malformed)?;
            state = (state << IO_BITS) | u16::from_le_bytes([word[0], word[1]]) as u32;
            wp += 2;
        }
        dst.push(s);
    }

    if wp != words.len() || state != RANS_L {
        return Err(CodecError::Malformed);
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
