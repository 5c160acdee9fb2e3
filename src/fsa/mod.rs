//! Finite-state automaton model and deterministic runner.
//!
//! A phonex pattern compiles to one [`Automaton`]; the automaton owns its
//! states and transitions exclusively and is immutable once compiled, so
//! it can be shared read-only across concurrent matches. All per-attempt
//! mutable state lives in a [`MatchContext`] owned by a single run.

pub mod automaton;
pub mod context;
mod runner;

pub use automaton::{
    Automaton, BoundaryKind, State, StateId, TapeMatcher, Transition, TransitionGuard,
};
pub use context::{FsaMatch, MatchContext};
