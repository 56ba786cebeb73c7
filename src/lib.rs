//! Technical and tag analysis for raw AAC (ADIF/ADTS) streams and MP4/ISO-BMFF
//! containers carrying an iTunes-style `ilst` atom.
#![warn(missing_docs)]

#[macro_use]
extern crate lazy_static;

pub use crate::descriptor::{BitRateKind, HeaderKind, MpegVersion, Profile, TechnicalDescriptor};
pub use crate::engine::{
    analyze, is_meta_supported, rewrite_file_size_in_header, write_ilst, PictureSink, ReadParams,
    SizeInfo, HAS_NATIVE_META,
};
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::ident::Fourcc;
pub use crate::mp4::UpperAtomTable;
pub use crate::tag::{AdditionalField, FieldId, Picture, PictureFormat, PictureType, TagKind, TagRecord};

mod bits;
mod descriptor;
mod engine;
mod error;
mod genre;
mod ident;
mod mp4;
mod stream;
mod tag;
mod util;
