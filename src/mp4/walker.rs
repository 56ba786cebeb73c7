//! Sibling-box search within a container level.

use std::io::{Read, Seek, SeekFrom};

use super::head::{parse_head, Head};
use crate::error::{Error, ErrorKind};
use crate::ident::Fourcc;

/// Guards against a corrupt or adversarial size field spinning the walker
/// forever; no real container nests anywhere near this many siblings at one
/// level.
const MAX_ITERATIONS: u32 = 100;

/// Advances through sibling boxes between the reader's current position and
/// `end`, skipping each non-matching box, until one with fourcc `key` is
/// found. Returns the matched box's total size (header included) and leaves
/// the reader positioned on its first content byte. Fails after
/// [`MAX_ITERATIONS`] siblings or if the search runs past `end` without a
/// match.
pub fn look_for(reader: &mut (impl Read + Seek), end: u64, key: Fourcc) -> crate::Result<u64> {
    for _ in 0..MAX_ITERATIONS {
        let pos = reader.stream_position()?;
        if pos + 8 > end {
            break;
        }

        let head = parse_head(reader, end)?;
        if head.fourcc == key {
            return Ok(head.size);
        }

        reader.seek(SeekFrom::Start(head.end()))?;
    }

    Err(Error::new(ErrorKind::AtomNotFound(key), format!("{key} atom could not be found")))
}

/// Like [`look_for`], but collects every sibling box matching `key` between
/// `start` and `end` instead of stopping at the first. Used where a
/// container can legally repeat a child (`moov`'s `trak` boxes).
pub fn find_all(reader: &mut (impl Read + Seek), start: u64, end: u64, key: Fourcc) -> crate::Result<Vec<Head>> {
    reader.seek(SeekFrom::Start(start))?;
    let mut matches = Vec::new();

    while reader.stream_position()? + 8 <= end {
        let head = parse_head(reader, end)?;
        if head.fourcc == key {
            matches.push(head);
        }
        reader.seek(SeekFrom::Start(head.end()))?;
    }

    Ok(matches)
}
