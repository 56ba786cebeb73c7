use std::io::{Read, Seek};

use crate::bits::read_bits;
use crate::descriptor::{
    BitRateKind, HeaderKind, MpegVersion, Profile, TechnicalDescriptor, SAMPLE_RATE_TABLE,
};

/// Decodes a single ADIF header. The later 4-bit channel-count fields are
/// deliberately *summed*, not parsed as a proper channel-configuration
/// table, to stay compatible with how real files were produced by the
/// reference encoder this format comes from.
pub(super) fn decode(
    reader: &mut (impl Read + Seek),
    id3v2_size: u64,
    file_size: u64,
) -> crate::Result<TechnicalDescriptor> {
    let mut bit_pos = id3v2_size * 8 + 32;
    let mut d = TechnicalDescriptor { header_kind: HeaderKind::Adif, ..Default::default() };

    let copyright_id_present = read_bits(reader, bit_pos, 1)?;
    bit_pos += 1;
    bit_pos += if copyright_id_present != 0 { 75 } else { 3 };

    let is_vbr = read_bits(reader, bit_pos, 1)? != 0;
    bit_pos += 1;
    d.bit_rate_kind = if is_vbr { BitRateKind::Vbr } else { BitRateKind::Cbr };

    let bit_rate = read_bits(reader, bit_pos, 23)?;
    bit_pos += 23;
    d.bit_rate_bps = bit_rate as f64;

    bit_pos += if is_vbr { 31 } else { 51 };

    d.mpeg_version = MpegVersion::Mpeg4;

    let profile_code = read_bits(reader, bit_pos, 2)? as u8;
    bit_pos += 2;
    d.profile = Profile::from_code(profile_code);

    let sample_rate_index = read_bits(reader, bit_pos, 4)? as usize;
    bit_pos += 4;
    d.sample_rate_hz = SAMPLE_RATE_TABLE[sample_rate_index];

    let mut channels: u32 = 0;
    for _ in 0..4 {
        channels += read_bits(reader, bit_pos, 4)?;
        bit_pos += 4;
    }
    channels += read_bits(reader, bit_pos, 2)?;
    d.channels = channels as u8;

    d.duration_sec = super::raw_stream_duration(file_size, id3v2_size, d.bit_rate_bps);

    Ok(d)
}
