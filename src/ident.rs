//! Four-character-code box and metadata-field identifiers.

use std::fmt;
use std::ops::Deref;

/// A 4-byte ISO-BMFF box type tag.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Fourcc(pub [u8; 4]);

impl Deref for Fourcc {
    type Target = [u8; 4];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Debug for Fourcc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fourcc({self})")
    }
}

impl fmt::Display for Fourcc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0 {
            write!(f, "{}", char::from(b))?;
        }
        Ok(())
    }
}

macro_rules! fourcc {
    ($(#[$meta:meta])* $name:ident = $bytes:literal) => {
        $(#[$meta])*
        pub const $name: Fourcc = Fourcc(*$bytes);
    };
}

// Container / structural boxes.
fourcc!(FILETYPE = b"ftyp");
fourcc!(MEDIA_DATA = b"mdat");
fourcc!(MOVIE = b"moov");
fourcc!(MOVIE_HEADER = b"mvhd");
fourcc!(TRACK = b"trak");
fourcc!(MEDIA = b"mdia");
fourcc!(MEDIA_INFO = b"minf");
fourcc!(SAMPLE_TABLE = b"stbl");
fourcc!(SAMPLE_DESCRIPTION = b"stsd");
fourcc!(SAMPLE_SIZE = b"stsz");
fourcc!(USER_DATA = b"udta");
fourcc!(METADATA = b"meta");
fourcc!(HANDLER = b"hdlr");
fourcc!(ITEM_LIST = b"ilst");
fourcc!(DATA = b"data");

// stsd sample-entry formats this engine recognises for channel/sample-rate fields.
fourcc!(MP4_AUDIO = b"mp4a");
fourcc!(ENCRYPTED_AUDIO = b"enca");
fourcc!(AMR_NARROWBAND = b"samr");
fourcc!(AMR_WIDEBAND = b"sawb");

pub const AUDIO_SAMPLE_ENTRY_FORMATS: [Fourcc; 4] =
    [MP4_AUDIO, ENCRYPTED_AUDIO, AMR_NARROWBAND, AMR_WIDEBAND];

// iTunes `ilst` item identifiers (native fourcc codes mapped onto semantic fields).
fourcc!(TITLE = b"\xa9nam");
fourcc!(TITLE_ALT = b"titl");
fourcc!(ALBUM = b"\xa9alb");
fourcc!(ARTIST = b"\xa9ART");
fourcc!(COMMENT = b"\xa9cmt");
fourcc!(YEAR = b"\xa9day");
fourcc!(CUSTOM_GENRE = b"\xa9gen");
fourcc!(STANDARD_GENRE = b"gnre");
fourcc!(TRACK_NUMBER = b"trkn");
fourcc!(DISC_NUMBER = b"disk");
fourcc!(ADVISORY_RATING = b"rtng");
fourcc!(COMPOSER = b"\xa9wrt");
fourcc!(DESCRIPTION = b"desc");
fourcc!(COPYRIGHT = b"cprt");
fourcc!(ALBUM_ARTIST = b"aART");
