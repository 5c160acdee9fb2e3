//! Phone predicates: the matchers transitions apply to elements.
//!
//! Every matcher implements [`TapeMatcher<IpaElement>`]; a transition holds
//! one behind an `Arc` so compiled fragments can be replicated cheaply.
//! Secondary matchers (syllable-constituent checks, plugin predicates)
//! combine with a base matcher through [`CompoundPhoneMatcher`], which
//! requires all of its parts to accept.

use std::sync::Arc;

use crate::fsa::TapeMatcher;
use crate::ipa::{is_consonant, is_glide, is_vowel, ElementKind, IpaElement};
use crate::syllable::{SyllabificationInfo, SyllableConstituentType};
use smallvec::SmallVec;

/// Object-safe phone predicate; alias for the fsa matcher trait applied to
/// transcription elements.
pub type PhoneMatcher = dyn TapeMatcher<IpaElement>;

/// Shared handle to a phone matcher.
pub type PhoneMatcherRef = Arc<PhoneMatcher>;

/// Predefined element classes addressable from pattern text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneClass {
    /// `\c`: consonants (glides included)
    Consonant,
    /// `\v`: vowels
    Vowel,
    /// `\g`: glides
    Glide,
    /// `\w`: any phone (consonant, vowel, or glide)
    Word,
    /// `\s`: stress markers
    Stress,
}

impl PhoneClass {
    /// The escape letter for this class.
    pub fn letter(&self) -> char {
        match self {
            PhoneClass::Consonant => 'c',
            PhoneClass::Vowel => 'v',
            PhoneClass::Glide => 'g',
            PhoneClass::Word => 'w',
            PhoneClass::Stress => 's',
        }
    }

    /// Look up a class by its escape letter.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'c' => Some(PhoneClass::Consonant),
            'v' => Some(PhoneClass::Vowel),
            'g' => Some(PhoneClass::Glide),
            'w' => Some(PhoneClass::Word),
            's' => Some(PhoneClass::Stress),
            _ => None,
        }
    }
}

/// Matches a phone by its base glyph.
#[derive(Debug, Clone, Copy)]
pub struct BasePhoneMatcher {
    base: char,
}

impl BasePhoneMatcher {
    /// Create a matcher for the given base glyph.
    pub fn new(base: char) -> Self {
        Self { base }
    }
}

impl TapeMatcher<IpaElement> for BasePhoneMatcher {
    fn matches(&self, element: &IpaElement) -> bool {
        element.as_phone().is_some_and(|p| p.base() == self.base)
    }

    fn label(&self) -> String {
        self.base.to_string()
    }
}

/// Matches elements belonging to a predefined class.
#[derive(Debug, Clone, Copy)]
pub struct PhoneClassMatcher {
    class: PhoneClass,
}

impl PhoneClassMatcher {
    /// Create a matcher for the given class.
    pub fn new(class: PhoneClass) -> Self {
        Self { class }
    }
}

impl TapeMatcher<IpaElement> for PhoneClassMatcher {
    fn matches(&self, element: &IpaElement) -> bool {
        match self.class {
            PhoneClass::Consonant => element
                .as_phone()
                .is_some_and(|p| is_consonant(p.base()) || is_glide(p.base())),
            PhoneClass::Vowel => element.as_phone().is_some_and(|p| is_vowel(p.base())),
            PhoneClass::Glide => element.as_phone().is_some_and(|p| is_glide(p.base())),
            PhoneClass::Word => element.is_phone(),
            PhoneClass::Stress => matches!(element.kind(), ElementKind::Stress(_)),
        }
    }

    fn label(&self) -> String {
        format!("\\{}", self.class.letter())
    }
}

/// Matches a phone whose base glyph is (or is not) in a set.
#[derive(Debug, Clone)]
pub struct GlyphSetMatcher {
    glyphs: Vec<char>,
    negated: bool,
}

impl GlyphSetMatcher {
    /// Create a set matcher; `negated` matches phones outside the set.
    ///
    /// Negation applies to phones only: markers and boundaries never match
    /// either polarity.
    pub fn new(glyphs: Vec<char>, negated: bool) -> Self {
        Self { glyphs, negated }
    }
}

impl TapeMatcher<IpaElement> for GlyphSetMatcher {
    fn matches(&self, element: &IpaElement) -> bool {
        element
            .as_phone()
            .is_some_and(|p| self.glyphs.contains(&p.base()) != self.negated)
    }

    fn label(&self) -> String {
        let glyphs: String = self.glyphs.iter().collect();
        if self.negated {
            format!("[^{}]", glyphs)
        } else {
            format!("[{}]", glyphs)
        }
    }
}

/// Matches any element unconditionally.
///
/// Used as the base when a secondary matcher narrows `.` (a bare `.`
/// compiles to a wildcard transition instead, so it keeps lowest
/// priority).
#[derive(Debug, Clone, Copy)]
pub struct AnyElementMatcher;

impl TapeMatcher<IpaElement> for AnyElementMatcher {
    fn matches(&self, _element: &IpaElement) -> bool {
        true
    }

    fn label(&self) -> String {
        ".".to_string()
    }
}

/// Matches elements by their annotated syllable constituent role.
///
/// Reads the [`SyllabificationInfo`] extension; elements that were never
/// annotated do not match.
#[derive(Debug, Clone, Copy)]
pub struct ScTypeMatcher {
    sc_type: SyllableConstituentType,
}

impl ScTypeMatcher {
    /// Create a matcher for the given constituent role.
    pub fn new(sc_type: SyllableConstituentType) -> Self {
        Self { sc_type }
    }
}

impl TapeMatcher<IpaElement> for ScTypeMatcher {
    fn matches(&self, element: &IpaElement) -> bool {
        element
            .get::<SyllabificationInfo>()
            .is_some_and(|info| info.constituent().matches(self.sc_type))
    }

    fn label(&self) -> String {
        format!(":{}", self.sc_type.code())
    }
}

/// Matches phones carrying a specific suffix diacritic.
///
/// Constructed by the built-in `suffix` plugin.
#[derive(Debug, Clone, Copy)]
pub struct SuffixDiacriticMatcher {
    diacritic: char,
}

impl SuffixDiacriticMatcher {
    /// Create a matcher for the given suffix diacritic glyph.
    pub fn new(diacritic: char) -> Self {
        Self { diacritic }
    }
}

impl TapeMatcher<IpaElement> for SuffixDiacriticMatcher {
    fn matches(&self, element: &IpaElement) -> bool {
        element
            .as_phone()
            .is_some_and(|p| p.suffix() == Some(self.diacritic))
    }

    fn label(&self) -> String {
        format!("suffix({})", self.diacritic)
    }
}

/// Matches elements by their diphthong-membership flag.
///
/// Constructed by the built-in `diphthong` plugin. Elements without
/// syllabification info never match, regardless of polarity.
#[derive(Debug, Clone, Copy)]
pub struct DiphthongMatcher {
    diphthong: bool,
}

impl DiphthongMatcher {
    /// Create a matcher for the given flag polarity.
    pub fn new(diphthong: bool) -> Self {
        Self { diphthong }
    }
}

impl TapeMatcher<IpaElement> for DiphthongMatcher {
    fn matches(&self, element: &IpaElement) -> bool {
        element
            .get::<SyllabificationInfo>()
            .is_some_and(|info| info.is_diphthong_member() == self.diphthong)
    }

    fn label(&self) -> String {
        format!("diphthong({})", self.diphthong)
    }
}

/// A base matcher narrowed by secondary matchers; all must accept.
pub struct CompoundPhoneMatcher {
    base: PhoneMatcherRef,
    secondary: SmallVec<[PhoneMatcherRef; 1]>,
}

impl CompoundPhoneMatcher {
    /// Combine a base matcher with secondary matchers.
    pub fn new(base: PhoneMatcherRef, secondary: Vec<PhoneMatcherRef>) -> Self {
        Self {
            base,
            secondary: SmallVec::from_vec(secondary),
        }
    }
}

impl TapeMatcher<IpaElement> for CompoundPhoneMatcher {
    fn matches(&self, element: &IpaElement) -> bool {
        self.base.matches(element) && self.secondary.iter().all(|m| m.matches(element))
    }

    fn label(&self) -> String {
        let mut out = self.base.label();
        for m in &self.secondary {
            out.push_str(&m.label());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ipa::{parse_transcript, Phone};
    use crate::syllable::{AnnotationProvider, SonoritySyllabifier};

    #[test]
    fn test_base_phone_matcher_ignores_diacritics() {
        let m = BasePhoneMatcher::new('t');
        let plain = IpaElement::phone(Phone::new('t'));
        let aspirated = IpaElement::phone(Phone::with_diacritics('t', &[], Some('ʰ')));
        let other = IpaElement::phone(Phone::new('d'));
        assert!(m.matches(&plain));
        assert!(m.matches(&aspirated));
        assert!(!m.matches(&other));
    }

    #[test]
    fn test_class_matcher() {
        let seq = parse_transcript("pajˈ").unwrap();
        let consonant = PhoneClassMatcher::new(PhoneClass::Consonant);
        let vowel = PhoneClassMatcher::new(PhoneClass::Vowel);
        let stress = PhoneClassMatcher::new(PhoneClass::Stress);
        assert!(consonant.matches(&seq[0]));
        assert!(!consonant.matches(&seq[1]));
        // glides count as consonants for \c
        assert!(consonant.matches(&seq[2]));
        assert!(vowel.matches(&seq[1]));
        assert!(stress.matches(&seq[3]));
    }

    #[test]
    fn test_glyph_set_negation_excludes_markers() {
        let m = GlyphSetMatcher::new(vec!['p', 't'], true);
        assert!(!m.matches(&IpaElement::phone(Phone::new('p'))));
        assert!(m.matches(&IpaElement::phone(Phone::new('k'))));
        assert!(!m.matches(&IpaElement::syllable_boundary()));
    }

    #[test]
    fn test_sc_type_matcher_reads_annotation() {
        let mut seq = parse_transcript("pat").unwrap();
        let onset = ScTypeMatcher::new(SyllableConstituentType::Onset);
        // unannotated: no match
        assert!(!onset.matches(&seq[0]));
        SonoritySyllabifier::new().annotate(&mut seq).unwrap();
        assert!(onset.matches(&seq[0]));
        assert!(!onset.matches(&seq[1]));
    }

    #[test]
    fn test_compound_requires_all_parts() {
        let mut seq = parse_transcript("tat").unwrap();
        SonoritySyllabifier::new().annotate(&mut seq).unwrap();
        let compound = CompoundPhoneMatcher::new(
            Arc::new(BasePhoneMatcher::new('t')),
            vec![Arc::new(ScTypeMatcher::new(SyllableConstituentType::Coda))],
        );
        // both 't's match the base, only the final one is a coda
        assert!(!compound.matches(&seq[0]));
        assert!(compound.matches(&seq[2]));
    }
}
