//! Metadata handler validation: only the `mdir` (iTunes-style metadata)
//! handler type is supported; MPEG-7 handlers are rejected by name.

use std::io::{Read, Seek, SeekFrom};

use crate::error::{Error, ErrorKind};
use crate::util::ReadUtil;

const SUPPORTED: &[u8; 4] = b"mdir";
const MPEG7_XML: &[u8; 4] = b"mp7t";
const MPEG7_BINARY: &[u8; 4] = b"mp7b";

/// Validates the metadata handler type. `hdlr_start` and `hdlr_size` are
/// used to leave the reader positioned past the whole `hdlr` box regardless
/// of how much of its body was actually consumed.
pub fn validate(reader: &mut (impl Read + Seek), hdlr_start: u64, hdlr_size: u64) -> crate::Result<()> {
    reader.seek(SeekFrom::Current(4))?; // version + flags
    reader.seek(SeekFrom::Current(4))?; // quicktime type, unused here

    let handler_type = reader.read_u8_vec(4)?;
    let handler_type: &[u8; 4] = handler_type.as_slice().try_into().expect("read exactly 4 bytes");

    let result = match handler_type {
        t if t == SUPPORTED => Ok(()),
        t if t == MPEG7_XML => Err(Error::new(
            ErrorKind::UnsupportedMetadataFormat("MPEG-7 XML metadata"),
            "unsupported metadata handler",
        )),
        t if t == MPEG7_BINARY => Err(Error::new(
            ErrorKind::UnsupportedMetadataFormat("MPEG-7 binary XML metadata"),
            "unsupported metadata handler",
        )),
        _ => Err(Error::new(
            ErrorKind::UnsupportedMetadataFormat("unrecognized metadata format"),
            "unsupported metadata handler",
        )),
    };

    reader.seek(SeekFrom::Start(hdlr_start + hdlr_size))?;
    result
}
