//! Glyph classification for IPA transcription characters.
//!
//! Every character that may appear in a transcription is assigned a
//! [`GlyphType`], which drives both the transcript parser (what may start a
//! phone, what folds into the preceding one) and the predefined pattern
//! classes (`\c`, `\v`, `\g`).

/// Classification of a single transcription character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlyphType {
    /// A consonant base glyph (e.g. 'p', 'ʃ', 'ŋ')
    Consonant,
    /// A vowel base glyph (e.g. 'a', 'ə', 'ɪ')
    Vowel,
    /// A glide base glyph (e.g. 'j', 'w')
    Glide,
    /// A combining diacritic that attaches to the preceding base glyph
    /// (e.g. U+0325 ring below, length marks)
    CombiningDiacritic,
    /// A superscript suffix diacritic following the base glyph
    /// (e.g. 'ʰ', 'ʷ', 'ʲ')
    SuffixDiacritic,
    /// Primary stress marker 'ˈ'
    PrimaryStress,
    /// Secondary stress marker 'ˌ'
    SecondaryStress,
    /// Syllable boundary marker '.'
    SyllableBoundary,
    /// Word boundary marker (space)
    WordBoundary,
}

/// Classify a transcription character.
///
/// Returns `None` for characters that have no place in a transcription.
/// The table covers ASCII letters plus the common IPA block; combining
/// diacritics are recognized by Unicode range.
pub fn glyph_type(c: char) -> Option<GlyphType> {
    let gt = match c {
        // Vowels: ASCII plus common IPA vowel glyphs
        'a' | 'e' | 'i' | 'o' | 'u' | 'y' => GlyphType::Vowel,
        'ɑ' | 'ɐ' | 'ɒ' | 'æ' | 'ə' | 'ɘ' | 'ɚ' | 'ɛ' | 'ɜ' | 'ɝ' | 'ɞ' | 'ɨ' | 'ɪ'
        | 'ɯ' | 'ɵ' | 'ø' | 'œ' | 'ɶ' | 'ɔ' | 'ʉ' | 'ʊ' | 'ʌ' | 'ʏ' => GlyphType::Vowel,

        // Glides
        'j' | 'w' | 'ɥ' | 'ɰ' => GlyphType::Glide,

        // Consonants: remaining ASCII letters plus common IPA consonants
        'b' | 'c' | 'd' | 'f' | 'g' | 'h' | 'k' | 'l' | 'm' | 'n' | 'p' | 'q' | 'r' | 's'
        | 't' | 'v' | 'x' | 'z' => GlyphType::Consonant,
        'ŋ' | 'ɲ' | 'ɳ' | 'ɴ' | 'ʃ' | 'ʒ' | 'θ' | 'ð' | 'ɸ' | 'β' | 'ʂ' | 'ʐ' | 'ç'
        | 'ʝ' | 'ɣ' | 'χ' | 'ʁ' | 'ħ' | 'ʕ' | 'ɦ' | 'ɹ' | 'ɻ' | 'ɾ' | 'ʀ' | 'ʙ' | 'ɬ'
        | 'ɮ' | 'ɫ' | 'ʋ' | 'ɟ' | 'ɡ' | 'ʔ' | 'ʈ' | 'ɖ' | 'ɭ' | 'ʎ' | 'ʟ' | 'ɢ' | 'ɗ'
        | 'ɓ' | 'ʄ' | 'ɠ' | 'ʛ' | 'ʑ' | 'ɕ' | 'ʍ' => GlyphType::Consonant,

        // Suffix (superscript) diacritics
        'ʰ' | 'ʱ' | 'ʷ' | 'ʲ' | 'ˠ' | 'ˤ' | 'ⁿ' | 'ˡ' | 'ˀ' => GlyphType::SuffixDiacritic,

        // Length marks fold into the preceding phone like combining marks
        'ː' | 'ˑ' => GlyphType::CombiningDiacritic,

        'ˈ' => GlyphType::PrimaryStress,
        'ˌ' => GlyphType::SecondaryStress,
        '.' => GlyphType::SyllableBoundary,
        ' ' => GlyphType::WordBoundary,

        // Unicode combining diacritical marks block
        '\u{0300}'..='\u{036F}' => GlyphType::CombiningDiacritic,

        _ => return None,
    };
    Some(gt)
}

/// Check if a character is a base glyph (consonant, vowel, or glide).
#[inline]
pub fn is_base_glyph(c: char) -> bool {
    matches!(
        glyph_type(c),
        Some(GlyphType::Consonant | GlyphType::Vowel | GlyphType::Glide)
    )
}

/// Check if a character is a vowel glyph.
#[inline]
pub fn is_vowel(c: char) -> bool {
    matches!(glyph_type(c), Some(GlyphType::Vowel))
}

/// Check if a character is a consonant glyph.
#[inline]
pub fn is_consonant(c: char) -> bool {
    matches!(glyph_type(c), Some(GlyphType::Consonant))
}

/// Check if a character is a glide glyph.
#[inline]
pub fn is_glide(c: char) -> bool {
    matches!(glyph_type(c), Some(GlyphType::Glide))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_classification() {
        assert_eq!(glyph_type('a'), Some(GlyphType::Vowel));
        assert_eq!(glyph_type('p'), Some(GlyphType::Consonant));
        assert_eq!(glyph_type('j'), Some(GlyphType::Glide));
        assert_eq!(glyph_type(' '), Some(GlyphType::WordBoundary));
        assert_eq!(glyph_type('.'), Some(GlyphType::SyllableBoundary));
    }

    #[test]
    fn test_ipa_classification() {
        assert_eq!(glyph_type('ə'), Some(GlyphType::Vowel));
        assert_eq!(glyph_type('ʃ'), Some(GlyphType::Consonant));
        assert_eq!(glyph_type('ʰ'), Some(GlyphType::SuffixDiacritic));
        assert_eq!(glyph_type('ˈ'), Some(GlyphType::PrimaryStress));
        assert_eq!(glyph_type('\u{0325}'), Some(GlyphType::CombiningDiacritic));
    }

    #[test]
    fn test_unknown_characters() {
        assert_eq!(glyph_type('!'), None);
        assert_eq!(glyph_type('P'), None);
        assert_eq!(glyph_type('0'), None);
    }

    #[test]
    fn test_every_lowercase_ascii_letter_is_a_base_glyph() {
        for c in 'a'..='z' {
            assert!(is_base_glyph(c), "'{}' should be a base glyph", c);
        }
    }
}
