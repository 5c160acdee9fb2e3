//! # phonex
//!
//! Pattern matching over phonetic transcriptions.
//!
//! A phonex pattern compiles to a finite-state automaton whose transitions
//! carry predicates over transcription elements (phones, stress markers,
//! and boundaries) plus structural context such as syllable position.
//! Derived structure is attached to elements ahead of matching by
//! annotation providers (see [`syllable`]), and external code can
//! contribute new predicate kinds through the plugin registry without
//! touching the compiler.
//!
//! ## Example
//!
//! ```rust,ignore
//! use phonex::prelude::*;
//!
//! let mut transcript = parse_transcript("ˈtʰes.tɪŋ")?;
//! SonoritySyllabifier::new().annotate(&mut transcript)?;
//!
//! let pattern = PhonexPattern::compile("\\c:O\\v")?;
//! let mut matcher = pattern.matcher(&transcript);
//! while matcher.find() {
//!     println!("match at {}..{}", matcher.start().unwrap(), matcher.end().unwrap());
//! }
//! ```
//!
//! ## Pattern grammar
//!
//! | Syntax | Meaning |
//! |--------|---------|
//! | `p`, `ə`, ... | literal phone, matched by base glyph |
//! | `\c` `\v` `\g` `\w` `\s` | consonant, vowel, glide, any phone, stress marker |
//! | `[ptk]`, `[^ae]` | base-glyph set, optionally negated |
//! | `.` | any element (lowest priority at its state) |
//! | `^`, `$` | input start / end (zero-width) |
//! | `*` `+` `?` `{m}` `{m,}` `{m,n}` | quantifiers (greedy, no backtracking) |
//! | `(...)`, `(name=...)` | numbered / named capture group |
//! | `\|` | alternation |
//! | `name(arg, ...)` | plugin invocation, e.g. `suffix(ʰ)`, `diphthong()` |
//! | `term:CODE` | syllable-constituent check, e.g. `\c:O`, `.:N` |
//!
//! Whitespace between tokens is insignificant. An identifier counts as a
//! plugin invocation only when directly followed by `(`; otherwise its
//! letters are ordinary literals. Diacritics cannot appear in literals -
//! match them with the `suffix` plugin.
//!
//! Matching is greedy-deterministic: at every state the first transition
//! (in priority order) whose predicate accepts is taken and never
//! reconsidered, with wildcard transitions structurally ordered last so
//! specific predicates get first refusal. Patterns that need real
//! backtracking must spell the alternatives out with `|`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod fsa;
pub mod ipa;
pub mod phonex;
pub mod syllable;

/// Common imports for convenient usage.
pub mod prelude {
    pub use crate::fsa::{Automaton, FsaMatch, TapeMatcher};
    pub use crate::ipa::{parse_transcript, transcript_text, ElementKind, IpaElement, Phone};
    pub use crate::phonex::{
        PhonexError, PhonexMatcher, PhonexPattern, PluginProvider, PluginRegistry,
    };
    pub use crate::syllable::{
        AnnotationProvider, SonoritySyllabifier, SyllabificationInfo, SyllableConstituentType,
    };
}
