//! The `ilst` metadata item list: tag decode (box walk + typed `data_class`
//! dispatch) and encode (frame-by-frame write with back-patched sizes).

use std::io::{Read, Seek, SeekFrom, Write};

use crate::ident::{Fourcc, DATA};
use crate::tag::{field_for_native, native_for_field, AdditionalField, FieldId, Picture, PictureFormat, PictureType, TagKind, TagRecord};
use crate::util::ReadUtil;

use super::walker::look_for;

/// Iterates the `ilst` payload from the reader's current position to
/// `content_end`, decoding every frame's `data` atom by its `data_class`.
pub fn parse(
    reader: &mut (impl Read + Seek),
    content_end: u64,
    read_all_meta_frames: bool,
    mut picture_sink: Option<&mut dyn FnMut(Picture, TagKind, usize)>,
) -> crate::Result<TagRecord> {
    let mut tag = TagRecord::new();
    let mut picture_index = 0usize;

    while reader.stream_position()? < content_end {
        let entry_start = reader.stream_position()?;
        let entry_size = reader.read_be_u32()? as u64;
        let entry_tag = reader.read_u8_vec(4)?;
        let entry_fourcc = Fourcc(entry_tag.try_into().expect("read_u8_vec(4) yields 4 bytes"));
        let entry_end = entry_start + entry_size;

        let data_size = look_for(reader, entry_end, DATA)?;
        let data_header_offset = reader.stream_position()? - 8;

        reader.seek(SeekFrom::Current(3))?; // flags
        let data_class = reader.read_u8()?;
        reader.seek(SeekFrom::Current(4))?; // locale, always zero in practice

        let payload_len = data_size - 16;

        match data_class {
            1 => {
                let text = reader.read_utf8(payload_len)?;
                store_text(&mut tag, entry_fourcc, text, read_all_meta_frames);
            }
            21 => {
                let byte = reader.read_u8()?;
                store_text(&mut tag, entry_fourcc, byte.to_string(), read_all_meta_frames);
            }
            13 | 14 => {
                let mut peek = [0u8; 3];
                reader.read_exact(&mut peek)?;
                reader.seek(SeekFrom::Current(-3))?;
                let format = if peek == [0xFF, 0xD8, 0xFF] { PictureFormat::Jpeg } else { PictureFormat::Png };
                let bytes = reader.read_u8_vec(payload_len)?;
                let picture = Picture { data: bytes, format, picture_type: PictureType::CoverFront };
                match picture_sink.as_deref_mut() {
                    Some(sink) => sink(picture, TagKind::Mp4Native, picture_index),
                    None => tag.pictures.push(picture),
                }
                picture_index += 1;
            }
            0 if entry_fourcc.0 == *b"trkn" || entry_fourcc.0 == *b"disk" => {
                reader.seek(SeekFrom::Current(2))?;
                let n = reader.read_be_u16()?;
                reader.seek(SeekFrom::Current(2))?; // track/disc total, ignored
                let field = if entry_fourcc.0 == *b"trkn" { FieldId::TrackNumber } else { FieldId::DiscNumber };
                tag.set(field, n.to_string());
            }
            0 if entry_fourcc.0 == *b"gnre" => {
                let n = reader.read_be_u16()?;
                let text = crate::genre::name_for_index(n).map(str::to_owned).unwrap_or_default();
                tag.set(FieldId::Genre, text);
            }
            _ => {
                log::trace!("skipping tag '{entry_fourcc}' with unhandled data_class {data_class}");
            }
        }

        reader.seek(SeekFrom::Start(data_header_offset + data_size))?;
        reader.seek(SeekFrom::Start(entry_end))?;
    }

    Ok(tag)
}

fn store_text(tag: &mut TagRecord, native_code: Fourcc, value: String, read_all_meta_frames: bool) {
    match field_for_native(native_code) {
        Some(field) => tag.set(field, value),
        None if read_all_meta_frames => {
            match tag.additional_fields.iter_mut().find(|f| f.native_code == native_code) {
                Some(existing) => existing.value = value,
                None => tag.additional_fields.push(AdditionalField { native_code, value }),
            }
        }
        None => {}
    }
}

/// `data_class` this engine writes for a given native tag code, per the
/// fixed table: packed-number and genre-index frames are class 0, a handful
/// of single-byte flags/enums are class 21, everything else is UTF-8 text.
fn declared_class(native_code: Fourcc) -> u32 {
    const CLASS_0: [&[u8; 4]; 5] = [b"gnre", b"trkn", b"disk", b"purl", b"egid"];
    const CLASS_21: [&[u8; 4]; 8] = [b"rtng", b"tmpo", b"cpil", b"stik", b"pcst", b"tvsn", b"tves", b"pgap"];

    if CLASS_0.iter().any(|c| **c == native_code.0) {
        0
    } else if CLASS_21.iter().any(|c| **c == native_code.0) {
        21
    } else {
        1
    }
}

fn encode_payload(native_code: Fourcc, value: &str) -> Vec<u8> {
    match declared_class(native_code) {
        0 if native_code.0 == *b"trkn" || native_code.0 == *b"disk" => {
            let n: u16 = value.parse().unwrap_or(0);
            let mut buf = Vec::with_capacity(8);
            buf.extend_from_slice(&0u16.to_be_bytes());
            buf.extend_from_slice(&n.to_be_bytes());
            buf.extend_from_slice(&0u16.to_be_bytes()); // track/disc total, always unset
            if native_code.0 == *b"trkn" {
                buf.extend_from_slice(&0u16.to_be_bytes()); // trkn is 2 bytes longer than disk
            }
            buf
        }
        0 if native_code.0 == *b"gnre" => {
            // The original encoder computed this value and never wrote it;
            // this port writes it (see DESIGN.md).
            let n: u16 = value.parse().unwrap_or(0);
            n.to_be_bytes().to_vec()
        }
        0 => Vec::new(),
        21 => {
            let n: u8 = value.parse().unwrap_or(0);
            vec![n]
        }
        _ => value.as_bytes().to_vec(),
    }
}

/// Writes one `[size][code]["data"][class][flags/locale][payload]` frame,
/// back-patching both size fields once the payload is known.
fn write_frame(writer: &mut (impl Write + Seek), native_code: Fourcc, payload: &[u8]) -> crate::Result<()> {
    let outer_pos = writer.stream_position()?;
    writer.write_all(&0u32.to_be_bytes())?;
    writer.write_all(&native_code.0)?;

    write_data_atom(writer, declared_class(native_code), payload)?;

    let end_pos = writer.stream_position()?;
    let outer_len = (end_pos - outer_pos) as u32;
    writer.seek(SeekFrom::Start(outer_pos))?;
    writer.write_all(&outer_len.to_be_bytes())?;
    writer.seek(SeekFrom::Start(end_pos))?;
    Ok(())
}

fn write_data_atom(writer: &mut (impl Write + Seek), class: u32, payload: &[u8]) -> crate::Result<()> {
    let inner_pos = writer.stream_position()?;
    writer.write_all(&0u32.to_be_bytes())?;
    writer.write_all(b"data")?;
    writer.write_all(&(class as i32).to_be_bytes())?;
    writer.write_all(&[0u8; 4])?; // locale
    writer.write_all(payload)?;

    let end_pos = writer.stream_position()?;
    let inner_len = (end_pos - inner_pos) as u32;
    writer.seek(SeekFrom::Start(inner_pos))?;
    writer.write_all(&inner_len.to_be_bytes())?;
    writer.seek(SeekFrom::Start(end_pos))?;
    Ok(())
}

fn write_pictures(writer: &mut (impl Write + Seek), pictures: &[Picture]) -> crate::Result<()> {
    if pictures.is_empty() {
        return Ok(());
    }

    let outer_pos = writer.stream_position()?;
    writer.write_all(&0u32.to_be_bytes())?;
    writer.write_all(b"covr")?;

    for picture in pictures {
        let class = match picture.format {
            PictureFormat::Png => 14,
            PictureFormat::Jpeg => 13,
        };
        write_data_atom(writer, class, &picture.data)?;
    }

    let end_pos = writer.stream_position()?;
    let outer_len = (end_pos - outer_pos) as u32;
    writer.seek(SeekFrom::Start(outer_pos))?;
    writer.write_all(&outer_len.to_be_bytes())?;
    writer.seek(SeekFrom::Start(end_pos))?;
    Ok(())
}

/// Encodes `tag` as a complete `ilst` box (own size header included) into an
/// in-memory buffer, then copies it to `writer` in one write. Building the
/// box in a `Cursor` first (rather than seeking on `writer` directly) is
/// what lets this function accept a plain [`Write`] rather than
/// `Write + Seek`, matching the public write contract.
pub fn write(tag: &TagRecord, writer: &mut impl Write) -> crate::Result<u64> {
    let mut buf = std::io::Cursor::new(Vec::new());

    let tag_size_pos = buf.stream_position()?;
    buf.write_all(&0u32.to_be_bytes())?;
    buf.write_all(b"ilst")?;
    let data_start = buf.stream_position()?;

    for field_id in [
        FieldId::Title,
        FieldId::Album,
        FieldId::Artist,
        FieldId::Comment,
        FieldId::RecordingYear,
        FieldId::Genre,
        FieldId::TrackNumber,
        FieldId::DiscNumber,
        FieldId::Rating,
        FieldId::Composer,
        FieldId::GeneralDescription,
        FieldId::Copyright,
        FieldId::AlbumArtist,
    ] {
        if let Some(value) = tag.get(field_id) {
            if !value.is_empty() {
                let native_code = native_for_field(field_id);
                let payload = encode_payload(native_code, value);
                write_frame(&mut buf, native_code, &payload)?;
            }
        }
    }

    for additional in &tag.additional_fields {
        let payload = encode_payload(additional.native_code, &additional.value);
        write_frame(&mut buf, additional.native_code, &payload)?;
    }

    write_pictures(&mut buf, &tag.pictures)?;

    let final_pos = buf.stream_position()?;
    let ilst_size = (final_pos - data_start + 8) as u32;
    buf.seek(SeekFrom::Start(tag_size_pos))?;
    buf.write_all(&ilst_size.to_be_bytes())?;
    buf.seek(SeekFrom::Start(final_pos))?;

    let bytes = buf.into_inner();
    let len = bytes.len() as u64;
    writer.write_all(&bytes)?;
    Ok(len)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn text_frame(code: &[u8; 4], text: &str) -> Vec<u8> {
        let data_size = 16 + text.len() as u32;
        let outer_size = 8 + data_size;
        let mut out = outer_size.to_be_bytes().to_vec();
        out.extend_from_slice(code);
        out.extend_from_slice(&data_size.to_be_bytes());
        out.extend_from_slice(b"data");
        out.extend_from_slice(&1i32.to_be_bytes()); // class 1 (utf8)
        out.extend_from_slice(&[0; 4]);
        out.extend_from_slice(text.as_bytes());
        out
    }

    #[test]
    fn decodes_title_frame() {
        let data = text_frame(b"\xa9nam", "Song Title");
        let end = data.len() as u64;
        let mut r = Cursor::new(data);

        let tag = parse(&mut r, end, false, None).unwrap();
        assert_eq!(tag.get(FieldId::Title), Some("Song Title"));
    }

    #[test]
    fn unmapped_frame_is_dropped_unless_requested() {
        let data = text_frame(b"xtra", "value");
        let end = data.len() as u64;

        let mut r = Cursor::new(data.clone());
        let tag = parse(&mut r, end, false, None).unwrap();
        assert!(tag.additional_fields.is_empty());

        let mut r = Cursor::new(data);
        let tag = parse(&mut r, end, true, None).unwrap();
        assert_eq!(tag.additional_fields.len(), 1);
        assert_eq!(tag.additional_fields[0].value, "value");
    }

    #[test]
    fn duplicate_unmapped_native_code_overwrites_not_appends() {
        let mut data = text_frame(b"xtra", "first");
        data.extend(text_frame(b"xtra", "second"));
        let end = data.len() as u64;
        let mut r = Cursor::new(data);

        let tag = parse(&mut r, end, true, None).unwrap();
        assert_eq!(tag.additional_fields.len(), 1);
        assert_eq!(tag.additional_fields[0].value, "second");
    }

    #[test]
    fn decodes_packed_track_number() {
        let mut data = vec![];
        let data_size = 16 + 8u32;
        let outer_size = 8 + data_size;
        data.extend_from_slice(&outer_size.to_be_bytes());
        data.extend_from_slice(b"trkn");
        data.extend_from_slice(&data_size.to_be_bytes());
        data.extend_from_slice(b"data");
        data.extend_from_slice(&0i32.to_be_bytes());
        data.extend_from_slice(&[0; 4]);
        data.extend_from_slice(&0u16.to_be_bytes());
        data.extend_from_slice(&3u16.to_be_bytes());
        data.extend_from_slice(&12u16.to_be_bytes());
        data.extend_from_slice(&0u16.to_be_bytes());
        let end = data.len() as u64;
        let mut r = Cursor::new(data);

        let tag = parse(&mut r, end, false, None).unwrap();
        assert_eq!(tag.get(FieldId::TrackNumber), Some("3"));
    }

    #[test]
    fn write_then_read_round_trips_title() {
        let mut tag = TagRecord::new();
        tag.set(FieldId::Title, "Round Trip");

        let mut out = Vec::new();
        write(&tag, &mut out).unwrap();

        // Skip the outer ilst box header to decode the frames within.
        let mut r = Cursor::new(out.clone());
        r.seek(SeekFrom::Start(8)).unwrap();
        let end = out.len() as u64;
        let decoded = parse(&mut r, end, false, None).unwrap();
        assert_eq!(decoded.get(FieldId::Title), Some("Round Trip"));
    }

    #[test]
    fn gnre_encoder_writes_the_parsed_index() {
        let mut tag = TagRecord::new();
        tag.additional_fields.push(AdditionalField { native_code: Fourcc(*b"gnre"), value: "2".to_owned() });

        let mut out = Vec::new();
        write(&tag, &mut out).unwrap();

        let mut r = Cursor::new(out.clone());
        r.seek(SeekFrom::Start(8)).unwrap();
        let end = out.len() as u64;
        let decoded = parse(&mut r, end, false, None).unwrap();
        assert_eq!(decoded.get(FieldId::Genre), crate::genre::name_for_index(2));
    }
}
