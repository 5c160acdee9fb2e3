//! Transcription elements: phones, stress markers, and boundaries.
//!
//! An [`IpaElement`] is one unit of a transcribed sequence. A phone carries
//! a base glyph plus any diacritics folded into it by the transcript parser;
//! stress markers and boundaries are their own element kinds so that
//! annotation providers and patterns can address them directly.

use super::extensions::{ExtensionError, ExtensionMap};
use smallvec::SmallVec;
use std::any::Any;
use std::fmt;

/// Stress marker variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StressType {
    /// Primary stress 'ˈ'
    Primary,
    /// Secondary stress 'ˌ'
    Secondary,
}

impl StressType {
    /// The transcription glyph for this marker.
    pub fn glyph(&self) -> char {
        match self {
            StressType::Primary => 'ˈ',
            StressType::Secondary => 'ˌ',
        }
    }
}

/// A phone: a base glyph with attached diacritics.
///
/// The parts mirror a transcribed phone's structure: the base glyph
/// carries the segment identity, combining diacritics modify it in place,
/// and an optional suffix diacritic (a superscript such as 'ʰ') follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phone {
    base: char,
    combining: SmallVec<[char; 2]>,
    suffix: Option<char>,
}

impl Phone {
    /// Create a phone from a bare base glyph.
    pub fn new(base: char) -> Self {
        Self {
            base,
            combining: SmallVec::new(),
            suffix: None,
        }
    }

    /// Create a phone with diacritics.
    pub fn with_diacritics(base: char, combining: &[char], suffix: Option<char>) -> Self {
        Self {
            base,
            combining: SmallVec::from_slice(combining),
            suffix,
        }
    }

    /// The base glyph.
    #[inline]
    pub fn base(&self) -> char {
        self.base
    }

    /// Combining diacritics, in transcription order.
    pub fn combining(&self) -> &[char] {
        &self.combining
    }

    /// The suffix diacritic, if present.
    #[inline]
    pub fn suffix(&self) -> Option<char> {
        self.suffix
    }

    pub(crate) fn push_combining(&mut self, c: char) {
        self.combining.push(c);
    }

    pub(crate) fn set_suffix(&mut self, c: char) {
        self.suffix = Some(c);
    }

    /// Transcription text of this phone.
    pub fn text(&self) -> String {
        let mut out = String::new();
        out.push(self.base);
        out.extend(self.combining.iter());
        if let Some(s) = self.suffix {
            out.push(s);
        }
        out
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// The kind of a transcription element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    /// A phone (consonant, vowel, or glide with diacritics)
    Phone(Phone),
    /// A stress marker
    Stress(StressType),
    /// A syllable boundary marker '.'
    SyllableBoundary,
    /// A word boundary marker (space)
    WordBoundary,
}

/// One unit of a transcribed sequence.
///
/// Elements are created when a transcription is parsed and own their
/// extension store. Extensions are attached by annotation providers before
/// matching and are read-only for the duration of a matching pass.
#[derive(Debug)]
pub struct IpaElement {
    kind: ElementKind,
    extensions: ExtensionMap,
}

impl IpaElement {
    /// Create an element of the given kind with no extensions.
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            extensions: ExtensionMap::new(),
        }
    }

    /// Create a phone element.
    pub fn phone(phone: Phone) -> Self {
        Self::new(ElementKind::Phone(phone))
    }

    /// Create a stress marker element.
    pub fn stress(stress: StressType) -> Self {
        Self::new(ElementKind::Stress(stress))
    }

    /// Create a syllable boundary element.
    pub fn syllable_boundary() -> Self {
        Self::new(ElementKind::SyllableBoundary)
    }

    /// Create a word boundary element.
    pub fn word_boundary() -> Self {
        Self::new(ElementKind::WordBoundary)
    }

    /// The element's kind.
    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// The phone, if this element is one.
    pub fn as_phone(&self) -> Option<&Phone> {
        match &self.kind {
            ElementKind::Phone(p) => Some(p),
            _ => None,
        }
    }

    /// True if this element is a phone.
    pub fn is_phone(&self) -> bool {
        matches!(self.kind, ElementKind::Phone(_))
    }

    /// Attach a typed extension to this element.
    ///
    /// # Errors
    ///
    /// Fails with [`ExtensionError::Duplicate`] if an extension of the same
    /// type is already attached.
    pub fn attach<T: Any + Send + Sync>(&mut self, value: T) -> Result<(), ExtensionError> {
        self.extensions.attach(value)
    }

    /// Get an attached extension by type.
    pub fn get<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.extensions.get::<T>()
    }

    /// Transcription text of this element.
    pub fn text(&self) -> String {
        match &self.kind {
            ElementKind::Phone(p) => p.text(),
            ElementKind::Stress(s) => s.glyph().to_string(),
            ElementKind::SyllableBoundary => ".".to_string(),
            ElementKind::WordBoundary => " ".to_string(),
        }
    }
}

impl fmt::Display for IpaElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}
