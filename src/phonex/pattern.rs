//! Compiled patterns.

use std::fmt;

use super::compiler::compile;
use super::error::PhonexError;
use super::matcher::PhonexMatcher;
use super::parser::parse;
use super::plugins::PluginRegistry;
use super::tokenizer::tokenize;
use crate::fsa::Automaton;
use crate::ipa::IpaElement;

/// A compiled phonex pattern.
///
/// Compilation is all-or-nothing: any syntax, plugin, or argument error
/// aborts with a [`PhonexError`] and no partial automaton escapes. The
/// compiled pattern is immutable and may be shared across concurrently
/// running matches; each match keeps its own state in a
/// [`PhonexMatcher`].
pub struct PhonexPattern {
    pattern: String,
    automaton: Automaton<IpaElement>,
    group_names: Vec<Option<String>>,
}

impl PhonexPattern {
    /// Compile a pattern against the process-wide plugin registry.
    ///
    /// # Errors
    ///
    /// See [`PhonexError`] for the compile-time failure taxonomy.
    pub fn compile(pattern: &str) -> Result<Self, PhonexError> {
        Self::compile_with(pattern, PluginRegistry::global())
    }

    /// Compile a pattern, resolving plugin invocations through the given
    /// registry.
    pub fn compile_with(pattern: &str, registry: &PluginRegistry) -> Result<Self, PhonexError> {
        let tokens = tokenize(pattern)?;
        let (ast, group_names) = parse(&tokens)?;
        let automaton = compile(&ast, group_names.len(), registry)?;
        Ok(Self {
            pattern: pattern.to_string(),
            automaton,
            group_names,
        })
    }

    /// The source text this pattern was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Number of capture groups (excluding group zero).
    pub fn group_count(&self) -> usize {
        self.group_names.len()
    }

    /// The name of a capture group, if it was given one. Groups are
    /// numbered from 1.
    pub fn group_name(&self, group: usize) -> Option<&str> {
        self.group_names
            .get(group.checked_sub(1)?)
            .and_then(|n| n.as_deref())
    }

    /// The index of a named capture group.
    pub fn group_index(&self, name: &str) -> Option<usize> {
        self.group_names
            .iter()
            .position(|n| n.as_deref() == Some(name))
            .map(|i| i + 1)
    }

    /// Create a matcher for an input sequence.
    pub fn matcher<'p, 'i>(&'p self, input: &'i [IpaElement]) -> PhonexMatcher<'p, 'i> {
        PhonexMatcher::new(self, input)
    }

    pub(crate) fn automaton(&self) -> &Automaton<IpaElement> {
        &self.automaton
    }
}

impl fmt::Debug for PhonexPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhonexPattern")
            .field("pattern", &self.pattern)
            .field("groups", &self.group_names.len())
            .finish()
    }
}

impl fmt::Display for PhonexPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_name_lookup() {
        let pattern = PhonexPattern::compile("(p)(rime=\\v+)").unwrap();
        assert_eq!(pattern.group_count(), 2);
        assert_eq!(pattern.group_name(1), None);
        assert_eq!(pattern.group_name(2), Some("rime"));
        assert_eq!(pattern.group_index("rime"), Some(2));
        assert_eq!(pattern.group_index("onset"), None);
    }

    #[test]
    fn test_compile_errors_carry_offsets() {
        let err = PhonexPattern::compile("p{2").unwrap_err();
        assert!(matches!(err, PhonexError::Syntax { offset: 1, .. }));
    }
}
