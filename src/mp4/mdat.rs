//! Media data: only its size is used, to derive an overall bit rate when the
//! stream itself doesn't carry one (unlike ADIF/ADTS, MP4 boxes don't encode
//! a bit rate directly).

/// `bit_rate_bps = round(mdat_size_bytes * 8 / duration_sec)`. Returns `0`
/// when `duration_sec` is non-positive (nothing to divide by).
pub fn bit_rate_from_size(mdat_size: u64, duration_sec: f64) -> f64 {
    if duration_sec > 0.0 {
        (mdat_size as f64 * 8.0 / duration_sec).round()
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_bit_rate_from_payload_size_and_duration() {
        // 128,000 bits/sec for 60 seconds is 960,000 bytes.
        let bit_rate = bit_rate_from_size(960_000, 60.0);
        assert_eq!(bit_rate, 128_000.0);
    }

    #[test]
    fn zero_duration_yields_zero_bit_rate() {
        assert_eq!(bit_rate_from_size(1000, 0.0), 0.0);
    }
}
