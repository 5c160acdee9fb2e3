//! Syllable constituent roles.

use std::fmt;

/// The role an element plays within its syllable.
///
/// Pattern text refers to roles by their short codes (e.g. `\c:O` for a
/// consonant in onset position); [`SyllableConstituentType::from_code`]
/// performs the reverse lookup, case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyllableConstituentType {
    /// Left appendix: extrasyllabic material before the onset
    LeftAppendix,
    /// Syllable onset
    Onset,
    /// Syllable nucleus
    Nucleus,
    /// Syllable coda
    Coda,
    /// Right appendix: extrasyllabic material after the coda
    RightAppendix,
    /// Ambisyllabic: shared between a coda and the following onset
    Ambisyllabic,
    /// Onset of an empty-headed syllable
    Oehs,
    /// A stress marker element
    StressMarker,
    /// A syllable boundary marker element
    SyllableBoundaryMarker,
    /// A word boundary marker element
    WordBoundaryMarker,
    /// Role could not be determined
    Unknown,
}

impl SyllableConstituentType {
    /// The short code used in pattern text.
    pub fn code(&self) -> &'static str {
        match self {
            SyllableConstituentType::LeftAppendix => "LA",
            SyllableConstituentType::Onset => "O",
            SyllableConstituentType::Nucleus => "N",
            SyllableConstituentType::Coda => "C",
            SyllableConstituentType::RightAppendix => "RA",
            SyllableConstituentType::Ambisyllabic => "A",
            SyllableConstituentType::Oehs => "E",
            SyllableConstituentType::StressMarker => "SS",
            SyllableConstituentType::SyllableBoundaryMarker => "SB",
            SyllableConstituentType::WordBoundaryMarker => "WB",
            SyllableConstituentType::Unknown => "U",
        }
    }

    /// Look up a role by its short code (case-insensitive).
    pub fn from_code(code: &str) -> Option<Self> {
        let sc = match code.to_ascii_uppercase().as_str() {
            "LA" => SyllableConstituentType::LeftAppendix,
            "O" => SyllableConstituentType::Onset,
            "N" => SyllableConstituentType::Nucleus,
            "C" => SyllableConstituentType::Coda,
            "RA" => SyllableConstituentType::RightAppendix,
            "A" => SyllableConstituentType::Ambisyllabic,
            "E" => SyllableConstituentType::Oehs,
            "SS" => SyllableConstituentType::StressMarker,
            "SB" => SyllableConstituentType::SyllableBoundaryMarker,
            "WB" => SyllableConstituentType::WordBoundaryMarker,
            "U" => SyllableConstituentType::Unknown,
            _ => return None,
        };
        Some(sc)
    }

    /// Whether an element holding this role satisfies a query for `other`.
    ///
    /// Ambisyllabic elements belong to both the preceding coda and the
    /// following onset, so they satisfy onset and coda queries as well as
    /// an exact ambisyllabic query.
    pub fn matches(&self, other: SyllableConstituentType) -> bool {
        if *self == other {
            return true;
        }
        *self == SyllableConstituentType::Ambisyllabic
            && matches!(
                other,
                SyllableConstituentType::Onset | SyllableConstituentType::Coda
            )
    }
}

impl fmt::Display for SyllableConstituentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        for sc in [
            SyllableConstituentType::LeftAppendix,
            SyllableConstituentType::Onset,
            SyllableConstituentType::Nucleus,
            SyllableConstituentType::Coda,
            SyllableConstituentType::RightAppendix,
            SyllableConstituentType::Ambisyllabic,
            SyllableConstituentType::Oehs,
            SyllableConstituentType::Unknown,
        ] {
            assert_eq!(SyllableConstituentType::from_code(sc.code()), Some(sc));
        }
    }

    #[test]
    fn test_from_code_case_insensitive() {
        assert_eq!(
            SyllableConstituentType::from_code("la"),
            Some(SyllableConstituentType::LeftAppendix)
        );
        assert_eq!(
            SyllableConstituentType::from_code("n"),
            Some(SyllableConstituentType::Nucleus)
        );
        assert_eq!(SyllableConstituentType::from_code("XX"), None);
    }

    #[test]
    fn test_ambisyllabic_matches_onset_and_coda() {
        let a = SyllableConstituentType::Ambisyllabic;
        assert!(a.matches(SyllableConstituentType::Onset));
        assert!(a.matches(SyllableConstituentType::Coda));
        assert!(a.matches(SyllableConstituentType::Ambisyllabic));
        assert!(!a.matches(SyllableConstituentType::Nucleus));
        assert!(!SyllableConstituentType::Onset.matches(SyllableConstituentType::Coda));
    }
}
