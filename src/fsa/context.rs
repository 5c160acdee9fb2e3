//! Per-attempt running state during a match.

/// Mutable state for one match attempt.
///
/// Owned by a single call to [`Automaton::run`](super::Automaton::run) and
/// discarded at its end; concurrent runs over the same automaton each use
/// their own context.
#[derive(Debug, Clone)]
pub struct MatchContext {
    position: usize,
    group_starts: Vec<Option<usize>>,
    group_ends: Vec<Option<usize>>,
}

impl MatchContext {
    /// Create a context for `group_count` capture groups, positioned at
    /// `start_offset`.
    pub fn new(group_count: usize, start_offset: usize) -> Self {
        Self {
            position: start_offset,
            group_starts: vec![None; group_count],
            group_ends: vec![None; group_count],
        }
    }

    /// Current tape position.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Advance the tape head by one element.
    pub(crate) fn advance(&mut self) {
        self.position += 1;
    }

    /// (Re)open a capture group at the current position.
    ///
    /// Re-entering a quantified group resets its span, so the final
    /// capture reflects the last iteration.
    pub(crate) fn open_group(&mut self, group: usize) {
        let idx = group - 1;
        self.group_starts[idx] = Some(self.position);
        self.group_ends[idx] = None;
    }

    /// Extend a capture group through the element at the current position.
    pub(crate) fn extend_group(&mut self, group: usize) {
        self.group_ends[group - 1] = Some(self.position + 1);
    }

    /// The span of a capture group, if it was opened.
    ///
    /// A group that was opened but consumed nothing yields an empty span
    /// at its start position.
    pub fn group_span(&self, group: usize) -> Option<(usize, usize)> {
        let idx = group - 1;
        self.group_starts[idx].map(|s| (s, self.group_ends[idx].unwrap_or(s)))
    }

    /// Snapshot all group spans, index 0 holding group 1.
    pub(crate) fn snapshot_groups(&self) -> Vec<Option<(usize, usize)>> {
        (1..=self.group_starts.len())
            .map(|g| self.group_span(g))
            .collect()
    }
}

/// A successful match: consumed span plus capture-group spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsaMatch {
    /// Start offset of the match (inclusive).
    pub start: usize,
    /// End offset of the match (exclusive).
    pub end: usize,
    /// Capture-group spans; index 0 holds group 1.
    groups: Vec<Option<(usize, usize)>>,
}

impl FsaMatch {
    pub(crate) fn new(start: usize, end: usize, groups: Vec<Option<(usize, usize)>>) -> Self {
        Self { start, end, groups }
    }

    /// Number of capture groups (excluding group zero).
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// The span of a group: group 0 is the whole match, groups 1.. are
    /// captures. `None` for groups that did not participate.
    pub fn group(&self, group: usize) -> Option<(usize, usize)> {
        if group == 0 {
            Some((self.start, self.end))
        } else {
            self.groups.get(group - 1).copied().flatten()
        }
    }
}
