//! Deterministic automaton execution.
//!
//! The runner walks transitions greedily: at each state it takes the first
//! transition (in priority order) whose guard accepts, and never revisits
//! that choice. Quantifiers exist only as automaton topology; the runner
//! has no knowledge of them. Passing a final state records a last-accept
//! snapshot, so a walk that later dead-ends still yields the longest
//! accept it reached.

use smallvec::SmallVec;

use super::automaton::{Automaton, BoundaryKind, StateId, Transition, TransitionGuard};
use super::context::{FsaMatch, MatchContext};

impl<T> Automaton<T> {
    /// Run the automaton against `tape` starting at `start_offset`.
    ///
    /// Returns the match recorded at the last final state the walk passed,
    /// or `None` if no final state was reached. Absence of a match is a
    /// normal result, never an error.
    pub fn run(&self, tape: &[T], start_offset: usize) -> Option<FsaMatch> {
        if start_offset > tape.len() {
            return None;
        }
        debug_assert!(self.wildcards_ordered_last());

        let mut ctx = MatchContext::new(self.group_count(), start_offset);
        let mut state = self.start();
        let mut last_accept: Option<FsaMatch> = None;
        // States entered without consuming since the last consumption;
        // bars zero-width cycles from looping forever.
        let mut visited: SmallVec<[StateId; 8]> = SmallVec::new();
        visited.push(state);

        loop {
            if self.state(state).is_final() {
                last_accept = Some(FsaMatch::new(
                    start_offset,
                    ctx.position(),
                    ctx.snapshot_groups(),
                ));
            }

            let taken = self
                .state(state)
                .transitions()
                .iter()
                .position(|t| self.guard_accepts(t, tape, &ctx, &visited));
            let Some(idx) = taken else {
                break;
            };

            let transition = &self.state(state).transitions()[idx];
            for &g in transition.init_groups() {
                ctx.open_group(g);
            }
            if transition.consumes() {
                for &g in transition.match_groups() {
                    ctx.extend_group(g);
                }
                ctx.advance();
                visited.clear();
            }
            state = transition.target();
            if !visited.contains(&state) {
                visited.push(state);
            }
        }

        last_accept
    }

    fn guard_accepts(
        &self,
        transition: &Transition<T>,
        tape: &[T],
        ctx: &MatchContext,
        visited: &[StateId],
    ) -> bool {
        let pos = ctx.position();
        match transition.guard() {
            TransitionGuard::Specific(matcher) => {
                pos < tape.len() && matcher.matches(&tape[pos])
            }
            TransitionGuard::Wildcard => pos < tape.len(),
            // Zero-width guards refuse targets already entered without a
            // consumption in between; this is what terminates epsilon
            // cycles from degenerate quantifier nests.
            TransitionGuard::Epsilon => !visited.contains(&transition.target()),
            TransitionGuard::Boundary(kind) => {
                let at = match kind {
                    BoundaryKind::InputStart => pos == 0,
                    BoundaryKind::InputEnd => pos == tape.len(),
                };
                at && !visited.contains(&transition.target())
            }
        }
    }
}
