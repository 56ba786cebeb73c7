use std::io::{self, Read, Seek, SeekFrom, Write};

/// Big-endian fixed-width reads built on top of any [`Read`]r.
///
/// Centralising byte-swapping here keeps the box walker and stream analyzer
/// free of scattered `from_be_bytes` calls (the wire format is big-endian
/// throughout, see GLOSSARY).
pub trait ReadUtil: Read {
    fn read_u8(&mut self) -> io::Result<u8> {
        let mut buf = [0; 1];
        self.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    fn read_be_u16(&mut self) -> io::Result<u16> {
        let mut buf = [0; 2];
        self.read_exact(&mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }

    fn read_be_u32(&mut self) -> io::Result<u32> {
        let mut buf = [0; 4];
        self.read_exact(&mut buf)?;
        Ok(u32::from_be_bytes(buf))
    }

    fn read_be_u64(&mut self) -> io::Result<u64> {
        let mut buf = [0; 8];
        self.read_exact(&mut buf)?;
        Ok(u64::from_be_bytes(buf))
    }

    fn read_be_i32(&mut self) -> io::Result<i32> {
        Ok(self.read_be_u32()? as i32)
    }

    fn read_be_i64(&mut self) -> io::Result<i64> {
        Ok(self.read_be_u64()? as i64)
    }

    fn read_u8_vec(&mut self, len: u64) -> io::Result<Vec<u8>> {
        let mut buf = vec![0; len as usize];
        self.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Reads `len` bytes and decodes them as ISO-8859-1 (Latin-1), the encoding used for box
    /// type tags and other short fixed-width identifiers.
    fn read_latin1(&mut self, len: u64) -> io::Result<String> {
        let data = self.read_u8_vec(len)?;
        Ok(data.into_iter().map(char::from).collect())
    }

    fn read_utf8(&mut self, len: u64) -> crate::Result<String> {
        let data = self.read_u8_vec(len)?;
        Ok(String::from_utf8(data)?)
    }
}

impl<T: Read> ReadUtil for T {}

pub trait SeekUtil: Seek {
    fn remaining_len(&mut self) -> io::Result<u64> {
        let pos = self.stream_position()?;
        let end = self.seek(SeekFrom::End(0))?;
        self.seek(SeekFrom::Start(pos))?;
        Ok(end.saturating_sub(pos))
    }

    fn skip(&mut self, offset: i64) -> io::Result<()> {
        self.seek(SeekFrom::Current(offset))?;
        Ok(())
    }
}

impl<T: Seek> SeekUtil for T {}

pub trait WriteUtil: Write {
    fn write_u8(&mut self, val: u8) -> io::Result<()> {
        self.write_all(&[val])
    }

    fn write_be_u16(&mut self, val: u16) -> io::Result<()> {
        self.write_all(&val.to_be_bytes())
    }

    fn write_be_u32(&mut self, val: u32) -> io::Result<()> {
        self.write_all(&val.to_be_bytes())
    }

    fn write_latin1(&mut self, s: &str) -> io::Result<()> {
        let bytes: Vec<u8> = s.chars().map(|c| c as u8).collect();
        self.write_all(&bytes)
    }
}

impl<T: Write> WriteUtil for T {}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn reads_big_endian_widths() {
        let mut r = Cursor::new(vec![0xAB, 0x12, 0x34, 0x00, 0x00, 0x01, 0x00, 0x00]);
        assert_eq!(r.read_u8().unwrap(), 0xAB);
        assert_eq!(r.read_be_u16().unwrap(), 0x1234);
        assert_eq!(r.read_be_u32().unwrap(), 0x0000_0100);
    }

    #[test]
    fn reads_big_endian_u64_and_signed_variants() {
        let mut r = Cursor::new((-1i64).to_be_bytes().to_vec());
        assert_eq!(r.read_be_i64().unwrap(), -1);

        let mut r = Cursor::new((-1i32).to_be_bytes().to_vec());
        assert_eq!(r.read_be_i32().unwrap(), -1);

        let mut r = Cursor::new(0x0102_0304_0506_0708u64.to_be_bytes().to_vec());
        assert_eq!(r.read_be_u64().unwrap(), 0x0102_0304_0506_0708);
    }

    #[test]
    fn reads_u8_vec_and_utf8() {
        let mut r = Cursor::new(b"hello".to_vec());
        assert_eq!(r.read_u8_vec(5).unwrap(), b"hello");

        let mut r = Cursor::new("caf\xc3\xa9".as_bytes().to_vec());
        assert_eq!(r.read_utf8(5).unwrap(), "caf\u{e9}");
    }

    #[test]
    fn read_utf8_rejects_invalid_bytes() {
        let mut r = Cursor::new(vec![0xFF, 0xFE]);
        assert!(r.read_utf8(2).is_err());
    }

    #[test]
    fn reads_latin1_byte_for_byte() {
        let mut r = Cursor::new(vec![0x41, 0xE9, 0x7A]);
        assert_eq!(r.read_latin1(3).unwrap(), "A\u{e9}z");
    }

    #[test]
    fn remaining_len_and_skip_preserve_position_semantics() {
        let mut r = Cursor::new(vec![0u8; 10]);
        r.seek(SeekFrom::Start(4)).unwrap();
        assert_eq!(r.remaining_len().unwrap(), 6);
        assert_eq!(r.stream_position().unwrap(), 4);

        r.skip(3).unwrap();
        assert_eq!(r.stream_position().unwrap(), 7);
    }

    #[test]
    fn writes_big_endian_widths() {
        let mut w = Cursor::new(Vec::new());
        w.write_u8(0xAB).unwrap();
        w.write_be_u16(0x1234).unwrap();
        w.write_be_u32(0x0000_0100).unwrap();

        let out = w.into_inner();
        assert_eq!(out, vec![0xAB, 0x12, 0x34, 0x00, 0x00, 0x01, 0x00]);
    }

    #[test]
    fn writes_latin1_truncating_to_one_byte_per_char() {
        let mut w = Cursor::new(Vec::new());
        w.write_latin1("A\u{e9}z").unwrap();
        assert_eq!(w.into_inner(), vec![0x41, 0xE9, 0x7A]);
    }
}
