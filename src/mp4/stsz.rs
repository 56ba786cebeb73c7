//! Sample-size table: used only to classify the stream as CBR or VBR.

use std::io::{Read, Seek, SeekFrom};

use crate::descriptor::BitRateKind;
use crate::util::ReadUtil;

/// A non-zero `common_sample_size` means every sample is the same size
/// (CBR). Otherwise the table is scanned for the extremes; if the largest
/// sample is more than 1% bigger than the smallest, the stream is VBR.
pub fn parse(reader: &mut (impl Read + Seek)) -> crate::Result<BitRateKind> {
    reader.seek(SeekFrom::Current(4))?; // version + flags
    let common_sample_size = reader.read_be_i32()?;
    if common_sample_size != 0 {
        return Ok(BitRateKind::Cbr);
    }

    let n_sizes = reader.read_be_u32()?;
    let mut min = u32::MAX;
    let mut max = 0u32;
    for _ in 0..n_sizes {
        let size = reader.read_be_u32()?;
        min = min.min(size);
        max = max.max(size);
    }

    if n_sizes == 0 {
        return Ok(BitRateKind::Cbr);
    }

    if (min as f64) * 1.01 < max as f64 {
        Ok(BitRateKind::Vbr)
    } else {
        Ok(BitRateKind::Cbr)
    }
}
