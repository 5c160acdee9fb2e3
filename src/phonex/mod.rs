//! The phonex pattern language: compiler, plugin registry, and matcher.
//!
//! Pattern text compiles to a [`crate::fsa::Automaton`] via
//! [`PhonexPattern::compile`]; plugin invocations in the text resolve
//! through a [`PluginRegistry`] at compile time. A [`PhonexMatcher`]
//! executes the compiled automaton against an annotated element
//! sequence. The grammar is documented at the crate root.

mod compiler;
pub mod error;
pub mod matcher;
pub mod matchers;
mod parser;
pub mod pattern;
pub mod plugins;
#[cfg(test)]
mod properties;
mod tokenizer;

pub use error::PhonexError;
pub use matcher::PhonexMatcher;
pub use matchers::{
    AnyElementMatcher, BasePhoneMatcher, CompoundPhoneMatcher, DiphthongMatcher, GlyphSetMatcher,
    PhoneClass, PhoneClassMatcher, PhoneMatcher, PhoneMatcherRef, ScTypeMatcher,
    SuffixDiacriticMatcher,
};
pub use pattern::PhonexPattern;
pub use plugins::{
    DiphthongPluginProvider, PluginProvider, PluginRegistry, SuffixDiacriticPluginProvider,
};
