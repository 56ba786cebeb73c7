//! Arbitrary-bit reads at absolute bit offsets, used by the ADIF/ADTS decoders.
//!
//! ADIF and ADTS headers pack fields across byte boundaries (a 2-bit profile
//! field followed by a 4-bit sample-rate index, etc.), so the stream
//! analyzer can't use the byte-granular [`ReadUtil`](crate::util::ReadUtil)
//! reads C3/C4 use for box headers. This module is the single place that
//! bridges bit-level fields back onto the byte-oriented reader.

use std::io::{Read, Seek, SeekFrom};

use crate::util::ReadUtil;

/// Reads up to 25 bits starting at an absolute *bit* offset into the stream.
///
/// Seeks to `bit_position / 8`, reads 4 bytes into a big-endian accumulator,
/// shifts left by `bit_position % 8` to discard the leading bits already
/// consumed by an earlier field, then shifts right by `32 - count` to drop
/// the trailing bits beyond the field. Reading more than 25 bits would
/// require a byte beyond the 4-byte window and is not something any ADIF or
/// ADTS field needs (the widest field used is 23 bits).
pub fn read_bits(reader: &mut (impl Read + Seek), bit_position: u64, count: u32) -> crate::Result<u32> {
    debug_assert!(count <= 25, "read_bits is undefined beyond 25 bits: {count}");

    reader.seek(SeekFrom::Start(bit_position / 8))?;
    let window = reader.read_be_u32()?;

    let shifted_left = window.wrapping_shl((bit_position % 8) as u32);
    Ok(shifted_left >> (32 - count))
}
