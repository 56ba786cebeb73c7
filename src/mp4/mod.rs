//! MP4/ISO-BMFF container analysis: drives the box walker through the
//! `moov` subtree to assemble a [`TechnicalDescriptor`] and [`TagRecord`].

pub mod head;
pub mod hdlr;
pub mod ilst;
pub mod mdat;
pub mod mvhd;
pub mod stsd;
pub mod stsz;
pub mod walker;

use std::io::{Read, Seek, SeekFrom};

use crate::descriptor::{HeaderKind, TechnicalDescriptor};
use crate::ident;
use crate::tag::{Picture, TagKind, TagRecord};
use crate::util::SeekUtil;

use self::head::parse_head;
use self::walker::{find_all, look_for};

/// `(offset of a box's size field, that box's current total size)`, built up
/// while reading in writing mode and consumed once by
/// [`crate::rewrite_file_size_in_header`].
pub type UpperAtomTable = Vec<(u64, u32)>;

/// End offset of a box whose look_for-returned `size` was measured starting
/// from `content_pos` (the position right after its 8-byte header).
fn box_end(content_pos: u64, size: u64) -> u64 {
    content_pos - 8 + size
}

/// Parses an MP4 file end to end: stream descriptor fields from
/// `mvhd`/`stsd`/`stsz`/`mdat`, and metadata from `udta/meta/hdlr/ilst` when
/// `read_tag` is set. `prepare_for_writing` additionally populates the
/// returned upper-atom table so a caller can later splice in a new `ilst`
/// and cascade the size change with [`crate::rewrite_file_size_in_header`].
pub fn analyze_container(
    reader: &mut (impl Read + Seek),
    file_size: u64,
    read_tag: bool,
    read_all_meta_frames: bool,
    prepare_for_writing: bool,
    picture_sink: Option<&mut dyn FnMut(Picture, TagKind, usize)>,
) -> crate::Result<(TechnicalDescriptor, TagRecord, Option<UpperAtomTable>)> {
    let mut descriptor = TechnicalDescriptor { header_kind: HeaderKind::Mp4, ..Default::default() };
    let mut upper_atoms = prepare_for_writing.then(UpperAtomTable::new);

    // 1. ftyp skip
    reader.seek(SeekFrom::Start(0))?;
    let ftyp = parse_head(reader, file_size)?;
    reader.seek(SeekFrom::Start(ftyp.end()))?;

    // 2. moov entry
    let moov_header_offset = reader.stream_position()?;
    let moov_size = look_for(reader, file_size, ident::MOVIE)?;
    let moov_content_pos = reader.stream_position()?;
    let moov_end = box_end(moov_content_pos, moov_size);
    if let Some(table) = upper_atoms.as_mut() {
        table.push((moov_header_offset, moov_size as u32));
    }

    // 3. mvhd
    let mvhd_size = look_for(reader, moov_end, ident::MOVIE_HEADER)?;
    let mvhd_content_pos = reader.stream_position()?;
    let mvhd = mvhd::parse(reader)?;
    descriptor.duration_sec = mvhd.duration_sec();
    let mvhd_end = box_end(mvhd_content_pos, mvhd_size);

    // 4. trak -> mdia -> minf -> stbl, for every trak; only the first with an
    // audio sample description contributes stsd/stsz fields.
    let trak_heads = find_all(reader, mvhd_end, moov_end, ident::TRACK)?;
    let mut audio_descriptor = None;
    let mut audio_trak_count = 0u32;

    for trak in &trak_heads {
        reader.seek(SeekFrom::Start(trak.content_pos()))?;
        let trak_end = trak.end();

        let mdia_size = look_for(reader, trak_end, ident::MEDIA)?;
        let mdia_end = box_end(reader.stream_position()?, mdia_size);

        let minf_size = look_for(reader, mdia_end, ident::MEDIA_INFO)?;
        let minf_end = box_end(reader.stream_position()?, minf_size);

        let stbl_size = look_for(reader, minf_end, ident::SAMPLE_TABLE)?;
        let stbl_content_pos = reader.stream_position()?;
        let stbl_end = box_end(stbl_content_pos, stbl_size);

        look_for(reader, stbl_end, ident::SAMPLE_DESCRIPTION)?;
        let audio = stsd::parse(reader)?;

        if let Some(audio) = audio {
            audio_trak_count += 1;
            if audio_descriptor.is_none() {
                reader.seek(SeekFrom::Start(stbl_content_pos))?;
                look_for(reader, stbl_end, ident::SAMPLE_SIZE)?;
                let bit_rate_kind = stsz::parse(reader)?;
                audio_descriptor = Some((audio, bit_rate_kind));
            }
        }
    }

    if audio_trak_count > 1 {
        log::warn!("found {audio_trak_count} audio traks; only the first contributes sample description fields");
    }

    if let Some((audio, bit_rate_kind)) = audio_descriptor {
        descriptor.channels = audio.channels as u8;
        descriptor.sample_rate_hz = audio.sample_rate_hz;
        descriptor.bit_rate_kind = bit_rate_kind;
    }

    // 7. udta -> meta
    reader.seek(SeekFrom::Start(mvhd_end))?;
    let udta_size = look_for(reader, moov_end, ident::USER_DATA)?;
    let udta_header_offset = reader.stream_position()? - 8;
    let udta_content_pos = reader.stream_position()?;
    let udta_end = box_end(udta_content_pos, udta_size);
    if let Some(table) = upper_atoms.as_mut() {
        table.push((udta_header_offset, udta_size as u32));
    }

    let meta_size = look_for(reader, udta_end, ident::METADATA)?;
    let meta_header_offset = reader.stream_position()? - 8;
    let meta_content_pos = reader.stream_position()?;
    let meta_end = box_end(meta_content_pos, meta_size);
    if let Some(table) = upper_atoms.as_mut() {
        table.push((meta_header_offset, meta_size as u32));
    }
    reader.seek(SeekFrom::Current(4))?; // meta is a full box: version + flags

    // 8. hdlr validation
    let hdlr_size = look_for(reader, meta_end, ident::HANDLER)?;
    let hdlr_start = reader.stream_position()? - 8;
    hdlr::validate(reader, hdlr_start, hdlr_size)?;

    // 9. ilst
    let ilst_size = look_for(reader, meta_end, ident::ITEM_LIST)?;
    let ilst_content_pos = reader.stream_position()?;
    let ilst_end = box_end(ilst_content_pos, ilst_size);

    // 10. tag iteration
    let tag = if read_tag && ilst_end > ilst_content_pos {
        ilst::parse(reader, ilst_end, read_all_meta_frames, picture_sink)?
    } else {
        TagRecord::new()
    };

    // 11. mdat
    reader.seek(SeekFrom::Start(0))?;
    let mdat_size = look_for(reader, file_size, ident::MEDIA_DATA)?;
    descriptor.bit_rate_bps = mdat::bit_rate_from_size(mdat_size, descriptor.duration_sec);

    Ok((descriptor, tag, upper_atoms))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::tag::FieldId;

    fn atom(fourcc: &[u8; 4], body: &[u8]) -> Vec<u8> {
        let mut out = ((body.len() + 8) as u32).to_be_bytes().to_vec();
        out.extend_from_slice(fourcc);
        out.extend_from_slice(body);
        out
    }

    fn mvhd_body() -> Vec<u8> {
        let mut body = vec![0, 0, 0, 0]; // version + flags
        body.extend_from_slice(&[0; 8]); // creation + modification time
        body.extend_from_slice(&1000u32.to_be_bytes());
        body.extend_from_slice(&44_100u32.to_be_bytes()); // duration_units, -> 44.1s
        body
    }

    fn stsd_body() -> Vec<u8> {
        let mut entry = vec![];
        let body_len: u32 = 4 + 10 + 2 + 2 + 4 + 4;
        entry.extend_from_slice(&(body_len + 4).to_be_bytes());
        entry.extend_from_slice(b"mp4a");
        entry.extend_from_slice(&[0; 4 + 10]);
        entry.extend_from_slice(&2u16.to_be_bytes());
        entry.extend_from_slice(&[0; 2 + 4]);
        entry.extend_from_slice(&44_100i32.to_be_bytes());

        let mut body = vec![0, 0, 0, 0];
        body.extend_from_slice(&1u32.to_be_bytes());
        body.extend(entry);
        body
    }

    fn stsz_body_cbr() -> Vec<u8> {
        let mut body = vec![0, 0, 0, 0];
        body.extend_from_slice(&417i32.to_be_bytes());
        body.extend_from_slice(&0u32.to_be_bytes());
        body
    }

    fn hdlr_body(handler: &[u8; 4]) -> Vec<u8> {
        let mut body = vec![0; 8];
        body.extend_from_slice(handler);
        body.extend_from_slice(&[0; 12]);
        body
    }

    fn title_frame(text: &str) -> Vec<u8> {
        let data_size = 16 + text.len() as u32;
        let mut out = (8 + data_size).to_be_bytes().to_vec();
        out.extend_from_slice(b"\xa9nam");
        out.extend_from_slice(&data_size.to_be_bytes());
        out.extend_from_slice(b"data");
        out.extend_from_slice(&1i32.to_be_bytes());
        out.extend_from_slice(&[0; 4]);
        out.extend_from_slice(text.as_bytes());
        out
    }

    fn build_mp4(title: Option<&str>) -> Vec<u8> {
        let stbl = atom(b"stbl", &{
            let mut body = atom(b"stsd", &stsd_body());
            body.extend(atom(b"stsz", &stsz_body_cbr()));
            body
        });
        let minf = atom(b"minf", &stbl);
        let mdia = atom(b"mdia", &minf);
        let trak = atom(b"trak", &mdia);

        let ilst_body = title.map(title_frame).unwrap_or_default();
        let ilst = atom(b"ilst", &ilst_body);
        let hdlr = atom(b"hdlr", &hdlr_body(b"mdir"));
        let meta = atom(b"meta", &{
            let mut body = vec![0; 4];
            body.extend(hdlr);
            body.extend(ilst);
            body
        });
        let udta = atom(b"udta", &meta);

        let mut moov_body = atom(b"mvhd", &mvhd_body());
        moov_body.extend(trak);
        moov_body.extend(udta);
        let moov = atom(b"moov", &moov_body);

        let ftyp = atom(b"ftyp", b"M4A \0\0\0\0isomiso2");
        let mdat = atom(b"mdat", &[0u8; 1000]);

        let mut out = ftyp;
        out.extend(moov);
        out.extend(mdat);
        out
    }

    #[test]
    fn analyzes_a_synthetic_container() {
        let data = build_mp4(Some("Song"));
        let file_size = data.len() as u64;
        let mut r = Cursor::new(data);

        let (descriptor, tag, upper_atoms) =
            analyze_container(&mut r, file_size, true, false, false, None).unwrap();

        assert_eq!(descriptor.channels, 2);
        assert_eq!(descriptor.sample_rate_hz, 44_100);
        assert_eq!(descriptor.duration_sec, 44.1);
        assert!(descriptor.bit_rate_bps > 0.0);
        assert_eq!(tag.get(FieldId::Title), Some("Song"));
        assert!(upper_atoms.is_none());
    }

    #[test]
    fn prepare_for_writing_populates_upper_atom_table() {
        let data = build_mp4(None);
        let file_size = data.len() as u64;
        let mut r = Cursor::new(data);

        let (_, _, upper_atoms) = analyze_container(&mut r, file_size, false, false, true, None).unwrap();
        let table = upper_atoms.unwrap();
        assert_eq!(table.len(), 3); // moov, udta, meta
    }

    #[test]
    fn read_tag_false_skips_ilst_decode() {
        let data = build_mp4(Some("Song"));
        let file_size = data.len() as u64;
        let mut r = Cursor::new(data);

        let (_, tag, _) = analyze_container(&mut r, file_size, false, false, false, None).unwrap();
        assert!(tag.is_empty());
    }
}
