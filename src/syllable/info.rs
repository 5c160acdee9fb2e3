//! Syllabification info extension payload.

use super::constituent::SyllableConstituentType;

/// Derived syllable facts for one element, attached as an extension.
///
/// Computed by an annotation provider from whole-sequence context; the
/// role of an element depends on its neighbours, stress, and boundaries,
/// never on the element alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyllabificationInfo {
    constituent: SyllableConstituentType,
    diphthong_member: bool,
}

impl SyllabificationInfo {
    /// Create info with the given role; the diphthong flag starts unset.
    pub fn new(constituent: SyllableConstituentType) -> Self {
        Self {
            constituent,
            diphthong_member: false,
        }
    }

    /// Create info for a nucleus element that is part of a diphthong.
    pub fn diphthong_nucleus() -> Self {
        Self {
            constituent: SyllableConstituentType::Nucleus,
            diphthong_member: true,
        }
    }

    /// The element's constituent role.
    pub fn constituent(&self) -> SyllableConstituentType {
        self.constituent
    }

    /// True if the element is one nucleus of a diphthong.
    pub fn is_diphthong_member(&self) -> bool {
        self.diphthong_member
    }
}
