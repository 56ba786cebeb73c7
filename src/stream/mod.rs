//! Raw AAC bitstream analysis (C2): header-kind recognition plus the ADIF
//! and ADTS decoders.

use std::io::{Read, Seek, SeekFrom};

use crate::descriptor::{HeaderKind, TechnicalDescriptor};
use crate::util::{ReadUtil, SeekUtil};

mod adif;
mod adts;

/// Recognises whether the bytes right after the (caller-supplied) ID3v2
/// region start an ADIF header, an ADTS frame, or an `ftyp` box (MP4).
pub fn recognize(reader: &mut (impl Read + Seek), id3v2_size: u64) -> crate::Result<HeaderKind> {
    reader.seek(SeekFrom::Start(id3v2_size))?;
    let h0 = reader.read_u8_vec(4)?;

    if &h0 == b"ADIF" {
        return Ok(HeaderKind::Adif);
    }
    if h0[0] == 0xFF && h0[1] & 0xF0 == 0xF0 {
        return Ok(HeaderKind::Adts);
    }

    let h1 = reader.read_u8_vec(4)?;
    if &h1 == b"ftyp" {
        return Ok(HeaderKind::Mp4);
    }

    Ok(HeaderKind::Unknown)
}

/// Decodes an ADIF or ADTS stream into a technical descriptor. The caller is
/// expected to have already dispatched MP4 files to [`crate::mp4`]; a header
/// this crate doesn't recognize at all raises
/// [`crate::ErrorKind::DescriptorNotFound`].
pub fn analyze(
    reader: &mut (impl Read + Seek),
    id3v2_size: u64,
    file_size: u64,
) -> crate::Result<TechnicalDescriptor> {
    match recognize(reader, id3v2_size)? {
        HeaderKind::Adif => adif::decode(reader, id3v2_size, file_size),
        HeaderKind::Adts => adts::decode(reader, id3v2_size, file_size),
        HeaderKind::Mp4 => Ok(TechnicalDescriptor::default()),
        HeaderKind::Unknown => Err(crate::Error::new(
            crate::ErrorKind::DescriptorNotFound("no ADIF sync marker, ADTS syncword, or ftyp box found"),
            "could not recognize a supported audio stream header",
        )),
    }
}

/// `duration_sec = 8 * (file_size - id3v2_size) / bit_rate_bps` for raw AAC
/// streams; zero when the bit rate couldn't be established.
pub(crate) fn raw_stream_duration(file_size: u64, id3v2_size: u64, bit_rate_bps: f64) -> f64 {
    if bit_rate_bps > 0.0 {
        8.0 * (file_size.saturating_sub(id3v2_size)) as f64 / bit_rate_bps
    } else {
        0.0
    }
}
