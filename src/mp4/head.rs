//! Box header parsing: `[4B size][4B fourcc]`, with the 64-bit `largesize`
//! extension (`size == 1`) and the to-end-of-enclosing-box extension
//! (`size == 0`).

use std::io::{Read, Seek, SeekFrom};

use crate::error::{Error, ErrorKind};
use crate::ident::Fourcc;
use crate::util::ReadUtil;

/// A parsed box header together with the absolute offsets it spans.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Head {
    pub fourcc: Fourcc,
    /// Offset of this box's first header byte.
    pub pos: u64,
    /// Total size of the box, header included.
    pub size: u64,
    ext: bool,
}

impl Head {
    pub fn header_len(&self) -> u64 {
        if self.ext {
            16
        } else {
            8
        }
    }

    pub fn content_pos(&self) -> u64 {
        self.pos + self.header_len()
    }

    pub fn content_len(&self) -> u64 {
        self.size - self.header_len()
    }

    pub fn end(&self) -> u64 {
        self.pos + self.size
    }
}

/// Parses a box header at the reader's current position.
///
/// `enclosing_end` resolves the `size == 0` ("runs to the end of its
/// enclosing box") form; it must be the absolute end offset of whatever
/// contains this box (the parent box's content end, or the file length at
/// the top level).
pub fn parse_head(reader: &mut (impl Read + Seek), enclosing_end: u64) -> crate::Result<Head> {
    let pos = reader.stream_position()?;
    let size32 = reader.read_be_u32()?;
    let mut fourcc = Fourcc::default();
    reader.read_exact(&mut fourcc.0)?;

    let (ext, size) = match size32 {
        0 => (false, enclosing_end - pos),
        1 => (true, reader.read_be_u64()?),
        n => (false, n as u64),
    };

    if size < 8 {
        return Err(Error::new(
            ErrorKind::InvalidAtomSize,
            format!("{fourcc} box size {size} is smaller than its own header"),
        ));
    }

    Ok(Head { fourcc, pos, size, ext })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn parses_standard_head() {
        let mut data = vec![0, 0, 0, 16];
        data.extend_from_slice(b"free");
        data.extend_from_slice(&[0; 8]);
        let mut r = Cursor::new(data);
        let head = parse_head(&mut r, 16).unwrap();

        assert_eq!(&*head.fourcc, b"free");
        assert_eq!(head.size, 16);
        assert_eq!(head.header_len(), 8);
        assert_eq!(head.content_len(), 8);
        assert_eq!(head.end(), 16);
    }

    #[test]
    fn parses_extended_largesize_head() {
        let mut data = vec![0, 0, 0, 1];
        data.extend_from_slice(b"mdat");
        data.extend_from_slice(&24u64.to_be_bytes());
        let mut r = Cursor::new(data);
        let head = parse_head(&mut r, 24).unwrap();

        assert!(head.ext);
        assert_eq!(head.size, 24);
        assert_eq!(head.header_len(), 16);
        assert_eq!(head.content_len(), 8);
    }

    #[test]
    fn size_zero_runs_to_enclosing_end() {
        let mut data = vec![0, 0, 0, 0];
        data.extend_from_slice(b"mdat");
        data.extend_from_slice(&[0; 20]);
        let mut r = Cursor::new(data);
        let head = parse_head(&mut r, 28).unwrap();

        assert_eq!(head.size, 28);
        assert_eq!(head.end(), 28);
    }

    #[test]
    fn rejects_size_smaller_than_header() {
        let mut data = vec![0, 0, 0, 4];
        data.extend_from_slice(b"free");
        let mut r = Cursor::new(data);
        assert!(parse_head(&mut r, 8).is_err());
    }
}
