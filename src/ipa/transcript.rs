//! Transcript parsing: text → element sequence.
//!
//! Folds combining and suffix diacritics into the preceding phone, turns
//! stress marks and boundary characters into their own elements, and
//! reports unknown glyphs with their byte offset in the input.

use super::element::{IpaElement, Phone, StressType};
use super::properties::{glyph_type, GlyphType};
use thiserror::Error;

/// Errors raised while parsing a transcription string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TranscriptError {
    /// A character with no transcription role was encountered.
    #[error("unknown glyph '{glyph}' at offset {offset}")]
    UnknownGlyph {
        /// The offending character
        glyph: char,
        /// Byte offset in the input string
        offset: usize,
    },

    /// A diacritic appeared where it cannot attach to a phone.
    #[error("diacritic '{glyph}' at offset {offset} has no phone to attach to")]
    DanglingDiacritic {
        /// The offending diacritic
        glyph: char,
        /// Byte offset in the input string
        offset: usize,
    },
}

/// Parse a transcription string into an element sequence.
///
/// Base glyphs open a new phone; combining diacritics and at most one
/// suffix diacritic fold into the phone they follow. 'ˈ'/'ˌ', '.', and
/// spaces become stress, syllable boundary, and word boundary elements.
///
/// # Errors
///
/// [`TranscriptError::UnknownGlyph`] for characters outside the glyph
/// table; [`TranscriptError::DanglingDiacritic`] for a diacritic with no
/// preceding phone (or a second suffix diacritic on the same phone).
pub fn parse_transcript(text: &str) -> Result<Vec<IpaElement>, TranscriptError> {
    let mut elements: Vec<IpaElement> = Vec::new();
    // Phone under construction; flushed when a non-diacritic arrives.
    let mut current: Option<Phone> = None;

    for (offset, c) in text.char_indices() {
        let gt = glyph_type(c).ok_or(TranscriptError::UnknownGlyph { glyph: c, offset })?;
        match gt {
            GlyphType::Consonant | GlyphType::Vowel | GlyphType::Glide => {
                if let Some(p) = current.take() {
                    elements.push(IpaElement::phone(p));
                }
                current = Some(Phone::new(c));
            }
            GlyphType::CombiningDiacritic => match current.as_mut() {
                Some(p) => p.push_combining(c),
                None => return Err(TranscriptError::DanglingDiacritic { glyph: c, offset }),
            },
            GlyphType::SuffixDiacritic => match current.as_mut() {
                Some(p) if p.suffix().is_none() => p.set_suffix(c),
                _ => return Err(TranscriptError::DanglingDiacritic { glyph: c, offset }),
            },
            GlyphType::PrimaryStress | GlyphType::SecondaryStress => {
                if let Some(p) = current.take() {
                    elements.push(IpaElement::phone(p));
                }
                let stress = if gt == GlyphType::PrimaryStress {
                    StressType::Primary
                } else {
                    StressType::Secondary
                };
                elements.push(IpaElement::stress(stress));
            }
            GlyphType::SyllableBoundary => {
                if let Some(p) = current.take() {
                    elements.push(IpaElement::phone(p));
                }
                elements.push(IpaElement::syllable_boundary());
            }
            GlyphType::WordBoundary => {
                if let Some(p) = current.take() {
                    elements.push(IpaElement::phone(p));
                }
                elements.push(IpaElement::word_boundary());
            }
        }
    }
    if let Some(p) = current.take() {
        elements.push(IpaElement::phone(p));
    }
    Ok(elements)
}

/// Render an element sequence back to transcription text.
pub fn transcript_text(elements: &[IpaElement]) -> String {
    elements.iter().map(|e| e.text()).collect()
}
