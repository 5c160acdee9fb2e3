//! IPA element model: glyph classification, phones, extensions, and
//! transcript parsing.
//!
//! A transcription is a `Vec<IpaElement>`; each element owns a typed
//! extension store that annotation providers fill with derived facts
//! (see [`crate::syllable`]) before the sequence is matched.

pub mod element;
pub mod extensions;
pub mod properties;
pub mod transcript;

pub use element::{ElementKind, IpaElement, Phone, StressType};
pub use extensions::{ExtensionError, ExtensionMap};
pub use properties::{glyph_type, is_base_glyph, is_consonant, is_glide, is_vowel, GlyphType};
pub use transcript::{parse_transcript, transcript_text, TranscriptError};
