//! Movie header: overall duration, expressed in the box's own timescale.

use std::io::{Read, Seek, SeekFrom};

use crate::error::{Error, ErrorKind};
use crate::util::ReadUtil;

pub struct Mvhd {
    pub timescale: u32,
    pub duration_units: u64,
}

impl Mvhd {
    pub fn duration_sec(&self) -> f64 {
        if self.timescale > 0 {
            self.duration_units as f64 / self.timescale as f64
        } else {
            0.0
        }
    }
}

/// Parses `mvhd` content starting right after the box header.
pub fn parse(reader: &mut (impl Read + Seek)) -> crate::Result<Mvhd> {
    let version = reader.read_u8()?;
    reader.seek(SeekFrom::Current(3))?; // flags

    match version {
        0 => {
            reader.seek(SeekFrom::Current(8))?; // creation + modification time
            let timescale = reader.read_be_u32()?;
            let duration_units = reader.read_be_u32()? as u64;
            Ok(Mvhd { timescale, duration_units })
        }
        1 => {
            reader.seek(SeekFrom::Current(16))?;
            let timescale = reader.read_be_u32()?;
            let duration_units = reader.read_be_u64()?;
            Ok(Mvhd { timescale, duration_units })
        }
        v => Err(Error::new(ErrorKind::UnknownVersion(v), "unknown movie header (mvhd) version")),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn parses_version_0() {
        let mut data = vec![0, 0, 0, 0]; // version + flags
        data.extend_from_slice(&[0; 8]); // creation + modification time
        data.extend_from_slice(&1000u32.to_be_bytes());
        data.extend_from_slice(&180_000u32.to_be_bytes());
        let mut r = Cursor::new(data);

        let mvhd = parse(&mut r).unwrap();
        assert_eq!(mvhd.timescale, 1000);
        assert_eq!(mvhd.duration_units, 180_000);
        assert_eq!(mvhd.duration_sec(), 180.0);
    }

    #[test]
    fn parses_version_1_64_bit_duration() {
        let mut data = vec![1, 0, 0, 0];
        data.extend_from_slice(&[0; 16]);
        data.extend_from_slice(&1000u32.to_be_bytes());
        data.extend_from_slice(&180_000u64.to_be_bytes());
        let mut r = Cursor::new(data);

        let mvhd = parse(&mut r).unwrap();
        assert_eq!(mvhd.duration_units, 180_000);
    }

    #[test]
    fn rejects_unknown_version() {
        let data = vec![7, 0, 0, 0];
        let mut r = Cursor::new(data);
        assert!(parse(&mut r).is_err());
    }
}
