//! Sample description: picks out the audio sample-entry fields (`mp4a`,
//! `enca`, `samr`, `sawb`) this engine cares about.

use std::io::{Read, Seek, SeekFrom};

use crate::ident::AUDIO_SAMPLE_ENTRY_FORMATS;
use crate::util::{ReadUtil, SeekUtil};

pub struct StsdAudio {
    pub channels: u16,
    pub sample_rate_hz: u32,
}

/// Parses `stsd` content starting right after the box header.
pub fn parse(reader: &mut (impl Read + Seek)) -> crate::Result<Option<StsdAudio>> {
    reader.seek(SeekFrom::Current(4))?; // version + flags
    let n_descriptions = reader.read_be_u32()?;

    let mut audio = None;
    for _ in 0..n_descriptions {
        let length = reader.read_be_u32()?;
        let format = reader.read_u8_vec(4)?;

        if AUDIO_SAMPLE_ENTRY_FORMATS.iter().any(|f| f.0 == format[..]) {
            reader.skip(4 + 10)?;
            let channels = reader.read_be_u16()?;
            reader.skip(2 + 4)?;
            let sample_rate_hz = reader.read_be_i32()? as u32;
            if audio.is_none() {
                audio = Some(StsdAudio { channels, sample_rate_hz });
            }
        } else {
            reader.skip(length as i64 - 4)?;
        }
    }

    Ok(audio)
}
