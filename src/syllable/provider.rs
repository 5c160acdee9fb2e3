//! Annotation providers and the built-in sonority syllabifier.

use crate::ipa::{ElementKind, ExtensionError, IpaElement, Phone, StressType};
use crate::ipa::{is_glide, is_vowel};
use thiserror::Error;

use super::constituent::SyllableConstituentType;
use super::info::SyllabificationInfo;

/// Errors raised by annotation providers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnnotationError {
    /// The provider was given an empty sequence.
    #[error("cannot annotate an empty sequence")]
    EmptyInput,

    /// The sequence already carries this provider's extension kind.
    ///
    /// Providers run once per sequence per matching session; a second run
    /// is a caller error and fails fast.
    #[error("sequence already annotated: {0}")]
    AlreadyAnnotated(#[from] ExtensionError),
}

/// A component that computes one kind of extension for a whole sequence.
///
/// Providers see the entire ordered sequence, not one element at a time:
/// classification depends on neighbouring elements, stress, and boundaries.
/// Implementations must hold no cross-sequence state so that independent
/// sequences can be annotated concurrently.
pub trait AnnotationProvider: Send + Sync {
    /// Short identifier for diagnostics.
    fn name(&self) -> &'static str;

    /// Attach this provider's extension kind to every element it is
    /// responsible for.
    ///
    /// # Errors
    ///
    /// [`AnnotationError::EmptyInput`] for sequences this provider cannot
    /// classify; [`AnnotationError::AlreadyAnnotated`] if called twice on
    /// the same sequence.
    fn annotate(&self, elements: &mut [IpaElement]) -> Result<(), AnnotationError>;
}

/// Sonority-scale syllabifier.
///
/// Assigns a [`SyllabificationInfo`] to every element: marker elements get
/// their marker roles, vowels become nuclei (adjacent vowels form a
/// diphthong), and intervocalic consonant runs are split by rising-sonority
/// onset maximization; the longest consonant suffix whose sonority rises
/// toward the following nucleus becomes that syllable's onset, the rest the
/// previous syllable's coda. Runs with no vowel at all are left `Unknown`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SonoritySyllabifier;

impl SonoritySyllabifier {
    /// Create a syllabifier.
    pub fn new() -> Self {
        Self
    }
}

impl AnnotationProvider for SonoritySyllabifier {
    fn name(&self) -> &'static str {
        "sonority-syllabifier"
    }

    fn annotate(&self, elements: &mut [IpaElement]) -> Result<(), AnnotationError> {
        if elements.is_empty() {
            return Err(AnnotationError::EmptyInput);
        }

        let mut infos: Vec<SyllabificationInfo> = Vec::with_capacity(elements.len());
        let mut run: Vec<&Phone> = Vec::new();
        let mut run_infos: Vec<SyllabificationInfo> = Vec::new();

        for element in elements.iter() {
            match element.kind() {
                ElementKind::Phone(p) => run.push(p),
                marker => {
                    syllabify_run(&run, &mut run_infos);
                    infos.append(&mut run_infos);
                    run.clear();
                    let role = match marker {
                        ElementKind::Stress(StressType::Primary | StressType::Secondary) => {
                            SyllableConstituentType::StressMarker
                        }
                        ElementKind::SyllableBoundary => {
                            SyllableConstituentType::SyllableBoundaryMarker
                        }
                        ElementKind::WordBoundary => SyllableConstituentType::WordBoundaryMarker,
                        ElementKind::Phone(_) => unreachable!(),
                    };
                    infos.push(SyllabificationInfo::new(role));
                }
            }
        }
        syllabify_run(&run, &mut run_infos);
        infos.append(&mut run_infos);

        debug_assert_eq!(infos.len(), elements.len());
        for (element, info) in elements.iter_mut().zip(infos) {
            element.attach(info)?;
        }
        Ok(())
    }
}

/// Relative sonority of a phone, higher = more sonorous.
fn sonority(p: &Phone) -> u8 {
    let base = p.base();
    if is_vowel(base) {
        return 7;
    }
    if is_glide(base) {
        return 5;
    }
    match base {
        'l' | 'r' | 'ɹ' | 'ɾ' | 'ʎ' | 'ʀ' | 'ʁ' | 'ɫ' | 'ɭ' | 'ɻ' => 4,
        'm' | 'n' | 'ŋ' | 'ɲ' | 'ɳ' | 'ɴ' => 3,
        'f' | 'v' | 's' | 'z' | 'ʃ' | 'ʒ' | 'θ' | 'ð' | 'x' | 'ɣ' | 'χ' | 'h' | 'ɸ' | 'β'
        | 'ʂ' | 'ʐ' | 'ç' | 'ʝ' | 'ħ' | 'ʕ' | 'ɦ' | 'ɬ' | 'ɮ' | 'ʋ' | 'ɕ' | 'ʑ' | 'ʍ' => 2,
        _ => 1,
    }
}

/// Assign roles within one marker-free run of phones.
fn syllabify_run(run: &[&Phone], out: &mut Vec<SyllabificationInfo>) {
    use SyllableConstituentType::*;

    if run.is_empty() {
        return;
    }

    let nucleus: Vec<bool> = run.iter().map(|p| is_vowel(p.base())).collect();
    if !nucleus.iter().any(|&n| n) {
        out.extend(run.iter().map(|_| SyllabificationInfo::new(Unknown)));
        return;
    }

    let mut roles: Vec<SyllabificationInfo> = run
        .iter()
        .map(|_| SyllabificationInfo::new(Unknown))
        .collect();

    // Nucleus clusters; two or more adjacent vowels form a diphthong.
    let mut i = 0;
    let mut clusters: Vec<(usize, usize)> = Vec::new();
    while i < run.len() {
        if nucleus[i] {
            let start = i;
            while i < run.len() && nucleus[i] {
                i += 1;
            }
            clusters.push((start, i));
        } else {
            i += 1;
        }
    }
    for &(start, end) in &clusters {
        for info in roles.iter_mut().take(end).skip(start) {
            *info = if end - start >= 2 {
                SyllabificationInfo::diphthong_nucleus()
            } else {
                SyllabificationInfo::new(Nucleus)
            };
        }
    }

    // Leading consonants: onset of the first syllable.
    let (first_start, _) = clusters[0];
    for info in roles.iter_mut().take(first_start) {
        *info = SyllabificationInfo::new(Onset);
    }

    // Trailing consonants: coda of the last syllable.
    let (_, last_end) = clusters[clusters.len() - 1];
    for info in roles.iter_mut().skip(last_end) {
        *info = SyllabificationInfo::new(Coda);
    }

    // Intervocalic runs: maximize the onset under rising sonority.
    for pair in clusters.windows(2) {
        let (gap_start, gap_end) = (pair[0].1, pair[1].0);
        if gap_start == gap_end {
            continue;
        }
        // The consonant adjacent to the following nucleus is always onset;
        // extend leftwards while sonority keeps strictly rising.
        let mut onset_start = gap_end - 1;
        while onset_start > gap_start && sonority(run[onset_start - 1]) < sonority(run[onset_start])
        {
            onset_start -= 1;
        }
        for info in roles.iter_mut().take(onset_start).skip(gap_start) {
            *info = SyllabificationInfo::new(Coda);
        }
        for info in roles.iter_mut().take(gap_end).skip(onset_start) {
            *info = SyllabificationInfo::new(Onset);
        }
    }

    out.extend(roles);
}
