//! The fixed standard-genre lookup table used by `gnre` frames. The codes
//! are the ID3v1 genre codes plus one (index 0 is unused; a `gnre` value of
//! `1` means `STANDARD_GENRES[0]`).

pub const STANDARD_GENRES: [&str; 80] = [
    "Blues",
    "Classic Rock",
    "Country",
    "Dance",
    "Disco",
    "Funk",
    "Grunge",
    "Hip-Hop",
    "Jazz",
    "Metal",
    "New Age",
    "Oldies",
    "Other",
    "Pop",
    "R&B",
    "Rap",
    "Reggae",
    "Rock",
    "Techno",
    "Industrial",
    "Alternative",
    "Ska",
    "Death Metal",
    "Pranks",
    "Soundtrack",
    "Euro-Techno",
    "Ambient",
    "Trip-Hop",
    "Vocal",
    "Jazz+Funk",
    "Fusion",
    "Trance",
    "Classical",
    "Instrumental",
    "Acid",
    "House",
    "Game",
    "Sound Clip",
    "Gospel",
    "Noise",
    "AlternRock",
    "Bass",
    "Soul",
    "Punk",
    "Space",
    "Meditative",
    "Instrumental Pop",
    "Instrumental Rock",
    "Ethnic",
    "Gothic",
    "Darkwave",
    "Techno-Industrial",
    "Electronic",
    "Pop-Folk",
    "Eurodance",
    "Dream",
    "Southern Rock",
    "Comedy",
    "Cult",
    "Gangsta",
    "Top 40",
    "Christian Rap",
    "Pop/Funk",
    "Jungle",
    "Native American",
    "Cabaret",
    "New Wave",
    "Psychedelic",
    "Rave",
    "Showtunes",
    "Trailer",
    "Lo-Fi",
    "Tribal",
    "Acid Punk",
    "Acid Jazz",
    "Polka",
    "Retro",
    "Musical",
    "Rock & Roll",
    "Hard Rock",
];

/// Maps a `gnre` frame's 1-based genre index onto a name, following the
/// same off-by-one convention as the table above. Returns `None` for `0` or
/// any index past the table.
pub fn name_for_index(index: u16) -> Option<&'static str> {
    if index == 0 {
        return None;
    }
    STANDARD_GENRES.get(index as usize - 1).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_one_is_first_entry() {
        assert_eq!(name_for_index(1), Some("Blues"));
    }

    #[test]
    fn index_zero_is_none() {
        assert_eq!(name_for_index(0), None);
    }

    #[test]
    fn index_past_table_is_none() {
        assert_eq!(name_for_index(999), None);
    }
}
