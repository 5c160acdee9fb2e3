//! Pattern compiler: AST → automaton.
//!
//! Construction runs in three passes:
//!
//! 1. A Thompson-style build: every AST node becomes a fragment with one
//!    entry and one exit state, composed through epsilon glue. Quantifiers
//!    become loop and bypass edges only; the runner never learns about
//!    them. Plugin invocations resolve through the registry here, at
//!    compile time; any failure aborts the whole compilation.
//! 2. Epsilon elimination: each state's epsilon closure is flattened, in
//!    priority order, into direct predicate transitions. Alternative
//!    branches thereby become sibling transitions of a single state, which
//!    is what lets the greedy runner pick between them by predicate; and
//!    what makes the wildcard ordering rule bite: a `.` branch lands on
//!    the same state as its specific siblings and is forced last.
//! 3. A reachability prune that drops the construction scaffolding.
//!
//! Capture bookkeeping survives elimination: group-opening marks collected
//! along an epsilon path fold into the composed transition.

use std::sync::Arc;

use super::error::PhonexError;
use super::matchers::{
    AnyElementMatcher, BasePhoneMatcher, CompoundPhoneMatcher, GlyphSetMatcher, PhoneClassMatcher,
    PhoneMatcherRef, ScTypeMatcher,
};
use super::parser::Ast;
use super::plugins::PluginRegistry;
use crate::fsa::{Automaton, StateId, Transition, TransitionGuard};
use crate::ipa::IpaElement;

/// A sub-automaton with a single entry and a single exit state.
#[derive(Debug, Clone, Copy)]
struct Fragment {
    start: StateId,
    end: StateId,
}

/// Compile an AST into an epsilon-free automaton.
///
/// `group_count` is the number of capture groups the parser assigned.
pub(crate) fn compile(
    ast: &Ast,
    group_count: usize,
    registry: &PluginRegistry,
) -> Result<Automaton<IpaElement>, PhonexError> {
    let mut compiler = Compiler {
        automaton: Automaton::new(),
        registry,
    };
    let frag = compiler.build(ast)?;

    let start = compiler.automaton.start();
    compiler
        .automaton
        .add_transition(start, Transition::new(TransitionGuard::Epsilon, frag.start));
    compiler.automaton.set_final(frag.end, true);
    compiler.automaton.set_group_count(group_count);

    let automaton = prune_unreachable(eliminate_epsilons(&compiler.automaton));
    debug_assert!(automaton.wildcards_ordered_last());
    Ok(automaton)
}

struct Compiler<'r> {
    automaton: Automaton<IpaElement>,
    registry: &'r PluginRegistry,
}

impl Compiler<'_> {
    fn build(&mut self, node: &Ast) -> Result<Fragment, PhonexError> {
        match node {
            Ast::Literal(_)
            | Ast::Class(_)
            | Ast::GlyphSet { .. }
            | Ast::Plugin { .. }
            | Ast::WithSc { .. } => {
                let matcher = self.matcher_for(node)?;
                Ok(self.leaf(TransitionGuard::Specific(matcher)))
            }
            // A bare '.' compiles to the wildcard variant so the automaton
            // keeps it ordered after specific transitions.
            Ast::Any => Ok(self.leaf(TransitionGuard::Wildcard)),
            Ast::Anchor(kind) => Ok(self.leaf(TransitionGuard::Boundary(*kind))),
            Ast::Seq(items) => {
                let mut frags = Vec::with_capacity(items.len());
                for item in items {
                    frags.push(self.build(item)?);
                }
                Ok(self.chain(frags))
            }
            Ast::Alt(branches) => {
                let start = self.automaton.add_state();
                let end = self.automaton.add_state();
                for branch in branches {
                    let frag = self.build(branch)?;
                    self.epsilon(start, frag.start);
                    self.epsilon(frag.end, end);
                }
                Ok(Fragment { start, end })
            }
            Ast::Group { index, inner, .. } => {
                let state_lo = self.automaton.num_states();
                let frag = self.build(inner)?;
                let state_hi = self.automaton.num_states();

                // Consuming inside the fragment extends the group; taking
                // any transition out of its entry (re)opens it. Transitions
                // added later (chaining out of frag.end) stay unmarked -
                // they belong to the enclosing pattern.
                for sid in state_lo..state_hi {
                    for t in self.automaton.state_mut(sid).transitions_mut() {
                        t.add_match_group(*index);
                    }
                }
                for t in self.automaton.state_mut(frag.start).transitions_mut() {
                    t.add_init_group(*index);
                }
                Ok(frag)
            }
            Ast::Repeat { inner, min, max } => {
                let mut frags = Vec::new();
                for _ in 0..*min {
                    frags.push(self.build(inner)?);
                }
                match max {
                    None => {
                        let star = self.star(inner)?;
                        frags.push(star);
                    }
                    Some(max) => {
                        for _ in *min..*max {
                            let optional = self.optional(inner)?;
                            frags.push(optional);
                        }
                    }
                }
                if frags.is_empty() {
                    return Ok(self.empty());
                }
                Ok(self.chain(frags))
            }
        }
    }

    /// Fragment matching the empty sequence.
    fn empty(&mut self) -> Fragment {
        let state = self.automaton.add_state();
        Fragment {
            start: state,
            end: state,
        }
    }

    /// Two fresh states joined by one guarded transition.
    fn leaf(&mut self, guard: TransitionGuard<IpaElement>) -> Fragment {
        let start = self.automaton.add_state();
        let end = self.automaton.add_state();
        self.automaton
            .add_transition(start, Transition::new(guard, end));
        Fragment { start, end }
    }

    /// Chain fragments left to right with epsilon glue.
    fn chain(&mut self, frags: Vec<Fragment>) -> Fragment {
        let Some(&first) = frags.first() else {
            return self.empty();
        };
        for pair in frags.windows(2) {
            self.epsilon(pair[0].end, pair[1].start);
        }
        Fragment {
            start: first.start,
            end: frags[frags.len() - 1].end,
        }
    }

    /// Zero-or-more repetitions; the loop edge precedes the exit edge so
    /// repetition is greedy.
    fn star(&mut self, inner: &Ast) -> Result<Fragment, PhonexError> {
        let start = self.automaton.add_state();
        let end = self.automaton.add_state();
        let body = self.build(inner)?;
        self.epsilon(start, body.start);
        self.epsilon(start, end);
        self.epsilon(body.end, body.start);
        self.epsilon(body.end, end);
        Ok(Fragment { start, end })
    }

    /// Zero-or-one repetition; the body edge precedes the bypass edge.
    fn optional(&mut self, inner: &Ast) -> Result<Fragment, PhonexError> {
        let start = self.automaton.add_state();
        let end = self.automaton.add_state();
        let body = self.build(inner)?;
        self.epsilon(start, body.start);
        self.epsilon(start, end);
        self.epsilon(body.end, end);
        Ok(Fragment { start, end })
    }

    fn epsilon(&mut self, from: StateId, to: StateId) {
        self.automaton
            .add_transition(from, Transition::new(TransitionGuard::Epsilon, to));
    }

    fn matcher_for(&self, node: &Ast) -> Result<PhoneMatcherRef, PhonexError> {
        match node {
            Ast::Literal(c) => Ok(Arc::new(BasePhoneMatcher::new(*c))),
            Ast::Class(class) => Ok(Arc::new(PhoneClassMatcher::new(*class))),
            Ast::GlyphSet { glyphs, negated } => {
                Ok(Arc::new(GlyphSetMatcher::new(glyphs.clone(), *negated)))
            }
            Ast::Any => Ok(Arc::new(AnyElementMatcher)),
            Ast::Plugin { name, args, offset } => self.registry.create(name, args, *offset),
            Ast::WithSc { inner, sc } => {
                let base = self.matcher_for(inner)?;
                Ok(Arc::new(CompoundPhoneMatcher::new(
                    base,
                    vec![Arc::new(ScTypeMatcher::new(*sc))],
                )))
            }
            // The parser only places matcher terms here.
            _ => unreachable!("non-matcher term in matcher position"),
        }
    }
}

/// Flatten every state's epsilon closure into direct transitions.
///
/// The closure is walked depth-first in priority order, so greedy edge
/// ordering (loop before exit, branch before bypass) survives. A state
/// whose closure contains a final state becomes final itself. Group marks
/// on epsilon edges along the path fold into the composed transitions.
fn eliminate_epsilons<T>(automaton: &Automaton<T>) -> Automaton<T> {
    let mut out: Automaton<T> = Automaton::new();
    for _ in 1..automaton.num_states() {
        out.add_state();
    }
    out.set_start(automaton.start());
    out.set_group_count(automaton.group_count());

    for sid in 0..automaton.num_states() {
        let mut closure = Closure {
            automaton,
            visited: vec![sid],
            path_inits: Vec::new(),
            emitted: Vec::new(),
            is_final: false,
        };
        closure.visit(sid);
        for transition in closure.emitted {
            out.add_transition(sid, transition);
        }
        if closure.is_final {
            out.set_final(sid, true);
        }
    }
    out
}

struct Closure<'a, T> {
    automaton: &'a Automaton<T>,
    visited: Vec<StateId>,
    path_inits: Vec<usize>,
    emitted: Vec<Transition<T>>,
    is_final: bool,
}

impl<T> Closure<'_, T> {
    fn visit(&mut self, sid: StateId) {
        if self.automaton.state(sid).is_final() {
            self.is_final = true;
        }
        for transition in self.automaton.state(sid).transitions() {
            match transition.guard() {
                TransitionGuard::Epsilon => {
                    let target = transition.target();
                    if self.visited.contains(&target) {
                        continue;
                    }
                    self.visited.push(target);
                    let depth = self.path_inits.len();
                    self.path_inits.extend_from_slice(transition.init_groups());
                    self.visit(target);
                    self.path_inits.truncate(depth);
                }
                _ => {
                    let mut composed = transition.clone();
                    for &group in &self.path_inits {
                        composed.add_init_group(group);
                    }
                    self.emitted.push(composed);
                }
            }
        }
    }
}

/// Drop states the start state can no longer reach and renumber the rest.
fn prune_unreachable<T>(automaton: Automaton<T>) -> Automaton<T> {
    let mut reachable = vec![false; automaton.num_states()];
    let mut queue = vec![automaton.start()];
    reachable[automaton.start()] = true;
    while let Some(sid) = queue.pop() {
        for t in automaton.state(sid).transitions() {
            if !reachable[t.target()] {
                reachable[t.target()] = true;
                queue.push(t.target());
            }
        }
    }

    let mut remap = vec![usize::MAX; automaton.num_states()];
    let mut next = 0;
    for (sid, &keep) in reachable.iter().enumerate() {
        if keep {
            remap[sid] = next;
            next += 1;
        }
    }

    let mut out: Automaton<T> = Automaton::new();
    for _ in 1..next {
        out.add_state();
    }
    out.set_start(remap[automaton.start()]);
    out.set_group_count(automaton.group_count());
    for (sid, &keep) in reachable.iter().enumerate() {
        if !keep {
            continue;
        }
        let new_sid = remap[sid];
        if automaton.state(sid).is_final() {
            out.set_final(new_sid, true);
        }
        for t in automaton.state(sid).transitions() {
            let mut moved = t.clone();
            moved.set_target(remap[t.target()]);
            out.add_transition(new_sid, moved);
        }
    }
    out
}
