use std::borrow::Cow;
use std::{error, fmt, io, string};

use crate::Fourcc;

/// Type alias for the result of stream and box analysis.
pub type Result<T> = std::result::Result<T, Error>;

/// Kinds of errors that may occur while analyzing or rewriting a file.
#[derive(Debug)]
pub enum ErrorKind {
    /// A box could not be found at the current container level within the
    /// 100-iteration search budget, or the search ran off the end of the
    /// file. Contains the box's identifier.
    AtomNotFound(Fourcc),
    /// The bytes at the stream's recognition point don't start an ADIF
    /// header, an ADTS syncword, or an `ftyp` box, so no technical
    /// descriptor can be produced at all. Contains a human-readable reason.
    DescriptorNotFound(&'static str),
    /// The size of a box is smaller than its own 8-byte header.
    InvalidAtomSize,
    /// The content of a box suggests a different length than its header.
    SizeMismatch,
    /// The version byte of a full box is not one this engine understands.
    UnknownVersion(u8),
    /// The `hdlr` metadata handler type is recognised but not supported.
    /// Contains a human-readable reason (MPEG-7 XML/binary, or "unrecognized").
    UnsupportedMetadataFormat(&'static str),
    /// An invalid UTF-8 string was found.
    Utf8StringDecoding(string::FromUtf8Error),
    /// An IO error has occurred.
    Io(io::Error),
}

/// Any error that may occur while performing metadata operations.
pub struct Error {
    pub kind: ErrorKind,
    pub description: Cow<'static, str>,
}

impl Error {
    pub fn new(kind: ErrorKind, description: impl Into<Cow<'static, str>>) -> Error {
        Error { kind, description: description.into() }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        let description = format!("IO error: {err}");
        Error::new(ErrorKind::Io(err), description)
    }
}

impl From<string::FromUtf8Error> for Error {
    fn from(err: string::FromUtf8Error) -> Error {
        Error::new(ErrorKind::Utf8StringDecoding(err), "Data is not valid utf-8.")
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.description.is_empty() {
            write!(f, "{:?}", self.kind)
        } else {
            write!(f, "{}:\n{:?}", self.description, self.kind)
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.description.is_empty() {
            write!(f, "{:?}", self.kind)
        } else {
            write!(f, "{}:\n{:?}", self.description, self.kind)
        }
    }
}
