//! Stateful pattern matcher over one input sequence.

use super::pattern::PhonexPattern;
use crate::fsa::FsaMatch;
use crate::ipa::IpaElement;

/// Scans an input sequence for occurrences of a compiled pattern.
///
/// The matcher is a cursor: [`find`](Self::find) locates the next
/// non-empty occurrence after the previous one, and the accessor methods
/// expose the last occurrence found. Matching never fails; absence of a
/// match is a normal result.
pub struct PhonexMatcher<'p, 'i> {
    pattern: &'p PhonexPattern,
    input: &'i [IpaElement],
    next_index: usize,
    last: Option<FsaMatch>,
}

impl<'p, 'i> PhonexMatcher<'p, 'i> {
    pub(crate) fn new(pattern: &'p PhonexPattern, input: &'i [IpaElement]) -> Self {
        Self {
            pattern,
            input,
            next_index: 0,
            last: None,
        }
    }

    /// The pattern this matcher scans for.
    pub fn pattern(&self) -> &'p PhonexPattern {
        self.pattern
    }

    /// Rewind the matcher to the start of the input.
    pub fn reset(&mut self) {
        self.next_index = 0;
        self.last = None;
    }

    /// Anchored test: does the pattern consume the entire input?
    pub fn matches(&mut self) -> bool {
        self.last = None;
        if let Some(m) = self.pattern.automaton().run(self.input, 0) {
            if m.end == self.input.len() {
                self.last = Some(m);
                return true;
            }
        }
        false
    }

    /// Find the next non-empty occurrence of the pattern, scanning
    /// successive start offsets from the current cursor position.
    ///
    /// On success the cursor advances past the occurrence, so repeated
    /// calls enumerate non-overlapping matches left to right.
    pub fn find(&mut self) -> bool {
        self.last = None;
        let mut index = self.next_index;
        while index <= self.input.len() {
            if let Some(m) = self.pattern.automaton().run(self.input, index) {
                // Zero-width results are skipped: a successful find always
                // consumes at least one element.
                if m.end > index {
                    self.next_index = m.end;
                    self.last = Some(m);
                    return true;
                }
            }
            index += 1;
        }
        self.next_index = index;
        false
    }

    /// Find the next occurrence at or after the given offset.
    pub fn find_from(&mut self, index: usize) -> bool {
        self.next_index = index;
        self.find()
    }

    /// True if the last `matches`/`find` call succeeded.
    pub fn has_match(&self) -> bool {
        self.last.is_some()
    }

    /// The last occurrence found, if any.
    pub fn last_match(&self) -> Option<&FsaMatch> {
        self.last.as_ref()
    }

    /// Start offset of the last occurrence.
    pub fn start(&self) -> Option<usize> {
        self.last.as_ref().map(|m| m.start)
    }

    /// End offset (exclusive) of the last occurrence.
    pub fn end(&self) -> Option<usize> {
        self.last.as_ref().map(|m| m.end)
    }

    /// Number of capture groups in the pattern (excluding group zero).
    pub fn group_count(&self) -> usize {
        self.pattern.group_count()
    }

    /// The elements captured by a group in the last occurrence; group 0
    /// is the whole occurrence.
    pub fn group(&self, group: usize) -> Option<&'i [IpaElement]> {
        let (start, end) = self.last.as_ref()?.group(group)?;
        Some(&self.input[start..end])
    }

    /// The elements captured by a named group in the last occurrence.
    pub fn named_group(&self, name: &str) -> Option<&'i [IpaElement]> {
        self.group(self.pattern.group_index(name)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ipa::parse_transcript;

    #[test]
    fn test_find_enumerates_non_overlapping_matches() {
        let pattern = PhonexPattern::compile("pa").unwrap();
        let input = parse_transcript("papa").unwrap();
        let mut matcher = pattern.matcher(&input);

        assert!(matcher.find());
        assert_eq!((matcher.start(), matcher.end()), (Some(0), Some(2)));
        assert!(matcher.find());
        assert_eq!((matcher.start(), matcher.end()), (Some(2), Some(4)));
        assert!(!matcher.find());
        assert!(!matcher.has_match());
    }

    #[test]
    fn test_matches_requires_full_input() {
        let pattern = PhonexPattern::compile("pa").unwrap();
        let exact = parse_transcript("pa").unwrap();
        let longer = parse_transcript("pat").unwrap();
        assert!(pattern.matcher(&exact).matches());
        assert!(!pattern.matcher(&longer).matches());
    }

    #[test]
    fn test_groups_expose_spans() {
        let pattern = PhonexPattern::compile("(onset=\\c+)(rime=\\v+)").unwrap();
        let input = parse_transcript("pla").unwrap();
        let mut matcher = pattern.matcher(&input);
        assert!(matcher.find());

        let onset: Vec<String> = matcher
            .named_group("onset")
            .unwrap()
            .iter()
            .map(|e| e.text())
            .collect();
        assert_eq!(onset, vec!["p", "l"]);
        let rime: Vec<String> = matcher
            .group(2)
            .unwrap()
            .iter()
            .map(|e| e.text())
            .collect();
        assert_eq!(rime, vec!["a"]);
        assert_eq!(matcher.group(0).unwrap().len(), 3);
    }

    #[test]
    fn test_zero_width_matches_skipped() {
        // 'a*' can match empty anywhere; find must not report it
        let pattern = PhonexPattern::compile("a*").unwrap();
        let input = parse_transcript("tta").unwrap();
        let mut matcher = pattern.matcher(&input);
        assert!(matcher.find());
        assert_eq!((matcher.start(), matcher.end()), (Some(2), Some(3)));
        assert!(!matcher.find());
    }

    #[test]
    fn test_find_from() {
        let pattern = PhonexPattern::compile("a").unwrap();
        let input = parse_transcript("ata").unwrap();
        let mut matcher = pattern.matcher(&input);
        assert!(matcher.find_from(1));
        assert_eq!(matcher.start(), Some(2));
    }
}
