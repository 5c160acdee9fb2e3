//! Automaton model: states, transitions, and guards.
//!
//! Each compiled pattern owns one automaton; states and transitions are
//! arena-allocated in the automaton and never shared between automata.
//! Within a state, transition order is priority order: the runner tries
//! transitions front to back and takes the first whose guard accepts.

use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// Index of a state within its automaton.
pub type StateId = usize;

/// A predicate a transition applies to the element under the tape head.
///
/// Implementations must be `Send + Sync`: compiled automata are immutable
/// and may be shared across concurrently running matches.
pub trait TapeMatcher<T>: Send + Sync {
    /// Test the element under the tape head.
    fn matches(&self, item: &T) -> bool;

    /// Human-readable description for diagnostics.
    fn label(&self) -> String;
}

impl<T> fmt::Debug for dyn TapeMatcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TapeMatcher({})", self.label())
    }
}

/// Zero-width positional checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryKind {
    /// Accepts only at the start of the input.
    InputStart,
    /// Accepts only at the end of the input.
    InputEnd,
}

/// What a transition requires of the tape.
///
/// The wildcard is a separate variant rather than an always-true matcher so
/// the automaton can enforce its ordering structurally: a state stores all
/// wildcard transitions strictly after its other transitions, giving
/// specific predicates first refusal.
pub enum TransitionGuard<T> {
    /// Consumes one element if the matcher accepts it.
    Specific(Arc<dyn TapeMatcher<T>>),
    /// Consumes one element unconditionally; always ordered last.
    Wildcard,
    /// Zero-width, always accepts; glue for quantifier topology.
    Epsilon,
    /// Zero-width positional check.
    Boundary(BoundaryKind),
}

impl<T> Clone for TransitionGuard<T> {
    fn clone(&self) -> Self {
        match self {
            TransitionGuard::Specific(m) => TransitionGuard::Specific(Arc::clone(m)),
            TransitionGuard::Wildcard => TransitionGuard::Wildcard,
            TransitionGuard::Epsilon => TransitionGuard::Epsilon,
            TransitionGuard::Boundary(b) => TransitionGuard::Boundary(*b),
        }
    }
}

impl<T> fmt::Debug for TransitionGuard<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionGuard::Specific(m) => write!(f, "Specific({})", m.label()),
            TransitionGuard::Wildcard => write!(f, "Wildcard"),
            TransitionGuard::Epsilon => write!(f, "Epsilon"),
            TransitionGuard::Boundary(b) => write!(f, "Boundary({:?})", b),
        }
    }
}

impl<T> TransitionGuard<T> {
    /// True if following this guard consumes one tape element.
    #[inline]
    pub fn consumes(&self) -> bool {
        matches!(
            self,
            TransitionGuard::Specific(_) | TransitionGuard::Wildcard
        )
    }

    /// True for the wildcard variant.
    #[inline]
    pub fn is_wildcard(&self) -> bool {
        matches!(self, TransitionGuard::Wildcard)
    }
}

/// A directed edge between two states.
///
/// Besides its guard and target, a transition carries capture bookkeeping:
/// taking it (re)opens the groups in `init_groups`, and consuming input
/// through it extends the groups in `match_groups`.
pub struct Transition<T> {
    guard: TransitionGuard<T>,
    target: StateId,
    init_groups: SmallVec<[usize; 2]>,
    match_groups: SmallVec<[usize; 2]>,
}

// Derived Clone would demand `T: Clone`; matchers are shared by Arc, so
// cloning a transition never clones tape elements.
impl<T> Clone for Transition<T> {
    fn clone(&self) -> Self {
        Self {
            guard: self.guard.clone(),
            target: self.target,
            init_groups: self.init_groups.clone(),
            match_groups: self.match_groups.clone(),
        }
    }
}

impl<T> Transition<T> {
    /// Create a transition with the given guard and target state.
    pub fn new(guard: TransitionGuard<T>, target: StateId) -> Self {
        Self {
            guard,
            target,
            init_groups: SmallVec::new(),
            match_groups: SmallVec::new(),
        }
    }

    /// The transition's guard.
    pub fn guard(&self) -> &TransitionGuard<T> {
        &self.guard
    }

    /// The target state.
    #[inline]
    pub fn target(&self) -> StateId {
        self.target
    }

    /// True if following this transition consumes one tape element.
    #[inline]
    pub fn consumes(&self) -> bool {
        self.guard.consumes()
    }

    /// Groups (re)opened when this transition is taken.
    pub fn init_groups(&self) -> &[usize] {
        &self.init_groups
    }

    /// Groups extended when input is consumed through this transition.
    pub fn match_groups(&self) -> &[usize] {
        &self.match_groups
    }

    pub(crate) fn set_target(&mut self, target: StateId) {
        self.target = target;
    }

    pub(crate) fn add_init_group(&mut self, group: usize) {
        if !self.init_groups.contains(&group) {
            self.init_groups.push(group);
        }
    }

    pub(crate) fn add_match_group(&mut self, group: usize) {
        if !self.match_groups.contains(&group) {
            self.match_groups.push(group);
        }
    }
}

impl<T> fmt::Debug for Transition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} -> {}", self.guard, self.target)
    }
}

/// A state: a final flag and a priority-ordered transition list.
pub struct State<T> {
    transitions: SmallVec<[Transition<T>; 4]>,
    is_final: bool,
}

impl<T> State<T> {
    fn new() -> Self {
        Self {
            transitions: SmallVec::new(),
            is_final: false,
        }
    }

    /// Outgoing transitions in priority order.
    pub fn transitions(&self) -> &[Transition<T>] {
        &self.transitions
    }

    /// True if reaching this state records an accept.
    #[inline]
    pub fn is_final(&self) -> bool {
        self.is_final
    }

    /// Append a transition, keeping wildcards last.
    ///
    /// Non-wildcard transitions are inserted before the first wildcard so
    /// the ordering invariant holds by construction, not by caller
    /// discipline.
    fn push_transition(&mut self, transition: Transition<T>) {
        if transition.guard.is_wildcard() {
            self.transitions.push(transition);
        } else {
            let insert_at = self
                .transitions
                .iter()
                .position(|t| t.guard.is_wildcard())
                .unwrap_or(self.transitions.len());
            self.transitions.insert(insert_at, transition);
        }
    }

    pub(crate) fn transitions_mut(&mut self) -> &mut [Transition<T>] {
        &mut self.transitions
    }
}

/// A compiled automaton: an owned graph of states.
pub struct Automaton<T> {
    states: Vec<State<T>>,
    start: StateId,
    group_count: usize,
}

impl<T> Automaton<T> {
    /// Create an automaton with a single, non-final start state.
    pub fn new() -> Self {
        Self {
            states: vec![State::new()],
            start: 0,
            group_count: 0,
        }
    }

    /// Allocate a new state and return its id.
    pub fn add_state(&mut self) -> StateId {
        self.states.push(State::new());
        self.states.len() - 1
    }

    /// The start state.
    #[inline]
    pub fn start(&self) -> StateId {
        self.start
    }

    /// Re-point the start state.
    pub fn set_start(&mut self, state: StateId) {
        self.start = state;
    }

    /// Borrow a state.
    pub fn state(&self, id: StateId) -> &State<T> {
        &self.states[id]
    }

    pub(crate) fn state_mut(&mut self, id: StateId) -> &mut State<T> {
        &mut self.states[id]
    }

    /// Number of states.
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Mark a state as final.
    pub fn set_final(&mut self, id: StateId, is_final: bool) {
        self.states[id].is_final = is_final;
    }

    /// Add a transition out of `from`, keeping wildcards ordered last.
    pub fn add_transition(&mut self, from: StateId, transition: Transition<T>) {
        self.states[from].push_transition(transition);
    }

    /// Number of capture groups (excluding group zero).
    #[inline]
    pub fn group_count(&self) -> usize {
        self.group_count
    }

    /// Set the number of capture groups.
    pub fn set_group_count(&mut self, count: usize) {
        self.group_count = count;
    }

    /// Structural check: every wildcard transition is ordered strictly
    /// after all non-wildcard transitions of its state.
    pub fn wildcards_ordered_last(&self) -> bool {
        self.states.iter().all(|s| {
            let first_wildcard = s
                .transitions
                .iter()
                .position(|t| t.guard.is_wildcard())
                .unwrap_or(s.transitions.len());
            s.transitions[first_wildcard..]
                .iter()
                .all(|t| t.guard.is_wildcard())
        })
    }
}

impl<T> Default for Automaton<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for State<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("is_final", &self.is_final)
            .field("transitions", &self.transitions)
            .finish()
    }
}

impl<T> fmt::Debug for Automaton<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Automaton")
            .field("start", &self.start)
            .field("group_count", &self.group_count)
            .field("states", &self.states)
            .finish()
    }
}
