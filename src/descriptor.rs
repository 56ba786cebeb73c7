//! The technical descriptor produced by the stream analyzer (C2) and, for MP4
//! files, finished off by the box walker/tag engine (C3/C4).

/// The bitstream framing a file was recognised as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeaderKind {
    #[default]
    Unknown,
    Adif,
    Adts,
    Mp4,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MpegVersion {
    #[default]
    Unknown,
    Mpeg2,
    Mpeg4,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Profile {
    #[default]
    Unknown,
    Main,
    Lc,
    Ssr,
    Ltp,
}

impl Profile {
    /// Maps the 2-bit `profile` code found in both ADIF and ADTS headers
    /// (`code + 1`) onto a named profile.
    pub fn from_code(code: u8) -> Self {
        match code + 1 {
            1 => Self::Main,
            2 => Self::Lc,
            3 => Self::Ssr,
            4 => Self::Ltp,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BitRateKind {
    #[default]
    Unknown,
    Cbr,
    Vbr,
}

/// Sample rate lookup table indexed by the 4-bit `sampling_frequency_index`
/// shared by ADIF, ADTS and the MP4 `esds`-less sample description.
pub const SAMPLE_RATE_TABLE: [u32; 16] =
    [96000, 88200, 64000, 48000, 44100, 32000, 24000, 22050, 16000, 12000, 11025, 8000, 0, 0, 0, 0];

/// Structured technical summary of an audio stream.
///
/// `Valid()` (see [`TechnicalDescriptor::is_valid`]) holds for every
/// successfully analyzed file: `header_kind != Unknown`, `channels > 0`,
/// `sample_rate_hz > 0` and `bit_rate_bps > 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TechnicalDescriptor {
    pub header_kind: HeaderKind,
    pub mpeg_version: MpegVersion,
    pub profile: Profile,
    pub channels: u8,
    pub sample_rate_hz: u32,
    pub bit_rate_kind: BitRateKind,
    pub bit_rate_bps: f64,
    pub duration_sec: f64,
    /// ADTS only; zero for ADIF and MP4.
    pub total_frames: u32,
}

impl TechnicalDescriptor {
    pub fn is_valid(&self) -> bool {
        self.header_kind != HeaderKind::Unknown
            && self.channels > 0
            && self.sample_rate_hz > 0
            && self.bit_rate_bps > 0.0
    }
}
