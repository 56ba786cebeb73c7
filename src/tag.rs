//! The semantic tag record produced by [`crate::mp4::ilst`] decode and
//! consumed by its encode path.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::ident::{self, Fourcc};

/// The small, fixed set of semantic fields this engine understands natively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Title,
    Album,
    Artist,
    Comment,
    RecordingYear,
    Genre,
    TrackNumber,
    DiscNumber,
    Rating,
    Composer,
    GeneralDescription,
    Copyright,
    AlbumArtist,
}

lazy_static! {
    /// Native atom tag → semantic field, used while decoding `ilst`. More
    /// than one native code can map onto the same field (`©nam` and the
    /// legacy `titl` both mean Title); the read path collapses them and a
    /// later occurrence overwrites an earlier one, matching how the box
    /// walker iterates frames in file order.
    static ref READ_FIELD_MAP: HashMap<Fourcc, FieldId> = {
        let mut m = HashMap::new();
        m.insert(ident::TITLE, FieldId::Title);
        m.insert(ident::TITLE_ALT, FieldId::Title);
        m.insert(ident::ALBUM, FieldId::Album);
        m.insert(ident::ARTIST, FieldId::Artist);
        m.insert(ident::COMMENT, FieldId::Comment);
        m.insert(ident::YEAR, FieldId::RecordingYear);
        m.insert(ident::CUSTOM_GENRE, FieldId::Genre);
        m.insert(ident::STANDARD_GENRE, FieldId::Genre);
        m.insert(ident::TRACK_NUMBER, FieldId::TrackNumber);
        m.insert(ident::DISC_NUMBER, FieldId::DiscNumber);
        m.insert(ident::ADVISORY_RATING, FieldId::Rating);
        m.insert(ident::COMPOSER, FieldId::Composer);
        m.insert(ident::DESCRIPTION, FieldId::GeneralDescription);
        m.insert(ident::COPYRIGHT, FieldId::Copyright);
        m.insert(ident::ALBUM_ARTIST, FieldId::AlbumArtist);
        m
    };
}

/// Looks up the semantic field a native `ilst` tag maps onto, if any.
pub fn field_for_native(tag: Fourcc) -> Option<FieldId> {
    READ_FIELD_MAP.get(&tag).copied()
}

/// The single canonical native code a semantic field is written back out as.
/// `Genre` always round-trips through the custom-text `©gen` frame on write
/// (not the index-coded `gnre` frame), since writing requires mapping a
/// genre name back onto a table index, which this engine does not do.
pub fn native_for_field(field: FieldId) -> Fourcc {
    match field {
        FieldId::Title => ident::TITLE,
        FieldId::Album => ident::ALBUM,
        FieldId::Artist => ident::ARTIST,
        FieldId::Comment => ident::COMMENT,
        FieldId::RecordingYear => ident::YEAR,
        FieldId::Genre => ident::CUSTOM_GENRE,
        FieldId::TrackNumber => ident::TRACK_NUMBER,
        FieldId::DiscNumber => ident::DISC_NUMBER,
        FieldId::Rating => ident::ADVISORY_RATING,
        FieldId::Composer => ident::COMPOSER,
        FieldId::GeneralDescription => ident::DESCRIPTION,
        FieldId::Copyright => ident::COPYRIGHT,
        FieldId::AlbumArtist => ident::ALBUM_ARTIST,
    }
}

/// A native tag entry this engine doesn't map onto a semantic field, kept
/// verbatim for round-tripping when `read_all_meta_frames` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdditionalField {
    pub native_code: Fourcc,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PictureFormat {
    Jpeg,
    Png,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PictureType {
    CoverFront,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picture {
    pub data: Vec<u8>,
    pub format: PictureFormat,
    pub picture_type: PictureType,
}

/// Tag kinds a caller may query support for via [`crate::is_meta_supported`].
/// Only `Mp4Native` is implemented by this engine; the others are the
/// responsibility of sibling engines and exist here only so the query has
/// somewhere to route to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Mp4Native,
    Id3v1,
    Id3v2,
    Ape,
}

/// The decoded/to-be-encoded metadata of an `ilst` box.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagRecord {
    fields: HashMap<FieldId, String>,
    pub additional_fields: Vec<AdditionalField>,
    pub pictures: Vec<Picture>,
}

impl TagRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: FieldId) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// Sets a field's value. An empty string is still stored (so a caller
    /// can distinguish "never set" from "cleared"), but the `ilst` encoder
    /// skips writing a frame for any field whose value is empty.
    pub fn set(&mut self, field: FieldId, value: impl Into<String>) {
        self.fields.insert(field, value.into());
    }

    pub fn remove(&mut self, field: FieldId) {
        self.fields.remove(&field);
    }

    pub fn fields(&self) -> impl Iterator<Item = (FieldId, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.additional_fields.is_empty() && self.pictures.is_empty()
    }
}
