//! Top-level entry points: dispatches a stream to the raw AAC analyzer or
//! the MP4 box walker, and exposes the `ilst` write/size-rewrite helpers.

use std::io::{Read, Seek, SeekFrom, Write};

use crate::descriptor::TechnicalDescriptor;
use crate::mp4::{self, UpperAtomTable};
use crate::stream;
use crate::tag::{Picture, TagKind, TagRecord};

/// File length and the size of a leading ID3v2 region the caller has
/// already located (zero if absent). The engine does not parse ID3v2
/// itself; it trusts this offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct SizeInfo {
    pub file_size: u64,
    pub id3v2_size: u64,
}

/// Receives ownership of a decoded picture's bytes during the read pass.
/// Called synchronously; must not retain the reader.
pub type PictureSink = Box<dyn FnMut(Picture, TagKind, usize)>;

/// Controls how much work [`analyze`] does beyond the bare technical
/// descriptor.
#[derive(Default)]
pub struct ReadParams {
    /// Decode the `ilst` tag at all.
    pub read_tag: bool,
    /// Keep native tag entries this engine doesn't map to a semantic field,
    /// as [`crate::tag::AdditionalField`]s instead of dropping them.
    pub read_all_meta_frames: bool,
    /// Populate the returned upper-atom table so the caller can later write
    /// a replacement `ilst` and cascade the size delta.
    pub prepare_for_writing: bool,
    pub picture_sink: Option<PictureSink>,
}

/// Analyzes a single stream: either a raw ADIF/ADTS bitstream or an MP4
/// container, as determined by the bytes right after `size_info.id3v2_size`.
pub fn analyze(
    reader: &mut (impl Read + Seek),
    size_info: SizeInfo,
    mut params: ReadParams,
) -> crate::Result<(TechnicalDescriptor, TagRecord, Option<UpperAtomTable>)> {
    reader.seek(SeekFrom::Start(size_info.id3v2_size))?;
    let header_kind = stream::recognize(reader, size_info.id3v2_size)?;

    match header_kind {
        crate::descriptor::HeaderKind::Mp4 => {
            let sink = params.picture_sink.as_deref_mut();
            mp4::analyze_container(
                reader,
                size_info.file_size,
                params.read_tag,
                params.read_all_meta_frames,
                params.prepare_for_writing,
                sink,
            )
        }
        _ => {
            let descriptor = stream::analyze(reader, size_info.id3v2_size, size_info.file_size)?;
            Ok((descriptor, TagRecord::new(), None))
        }
    }
}

/// Encodes `tag` as a complete `ilst` box. The caller splices the result
/// into the original file at the remembered `ilst` position and then calls
/// [`rewrite_file_size_in_header`] to cascade the size change.
pub fn write_ilst(tag: &TagRecord, writer: &mut impl Write) -> crate::Result<u64> {
    mp4::ilst::write(tag, writer)
}

/// Applies `delta` to every box size recorded in `table`, cascading a
/// written `ilst`'s size change up through `moov`/`udta`/`meta`.
pub fn rewrite_file_size_in_header(
    writer: &mut (impl Write + Seek),
    table: &UpperAtomTable,
    delta: i64,
) -> crate::Result<()> {
    for &(offset, size) in table {
        let new_size = (size as i64 + delta) as u32;
        writer.seek(SeekFrom::Start(offset))?;
        writer.write_all(&new_size.to_be_bytes())?;
    }
    Ok(())
}

/// All four tag kinds are considered part of this crate's supported
/// metadata surface; only [`TagKind::Mp4Native`] is implemented here, the
/// others are the responsibility of sibling engines this crate doesn't
/// provide.
pub fn is_meta_supported(_kind: TagKind) -> bool {
    true
}

pub const HAS_NATIVE_META: bool = true;
