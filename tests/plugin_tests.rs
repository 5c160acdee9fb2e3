//! Plugin registry behavior through the public API, including a custom
//! third-party provider.

use phonex::fsa::TapeMatcher;
use phonex::ipa::{parse_transcript, IpaElement};
use phonex::phonex::{PluginProvider, PluginRegistry, SuffixDiacriticPluginProvider};
use phonex::prelude::*;
use std::sync::Arc;

/// A third-party predicate: matches phones with at least `n` combining
/// diacritics.
struct MarkedMatcher {
    min_marks: usize,
}

impl TapeMatcher<IpaElement> for MarkedMatcher {
    fn matches(&self, element: &IpaElement) -> bool {
        element
            .as_phone()
            .is_some_and(|p| p.combining().len() >= self.min_marks)
    }

    fn label(&self) -> String {
        format!("marked({})", self.min_marks)
    }
}

struct MarkedPluginProvider;

impl PluginProvider for MarkedPluginProvider {
    fn create_matcher(
        &self,
        args: &[String],
    ) -> Result<Arc<dyn TapeMatcher<IpaElement>>, PhonexError> {
        let min_marks = match args {
            [] => 1,
            [arg] => arg.parse().map_err(|_| PhonexError::InvalidArgument {
                plugin: "marked".to_string(),
                reason: format!("expected a count, got '{}'", arg),
            })?,
            _ => {
                return Err(PhonexError::InvalidArgument {
                    plugin: "marked".to_string(),
                    reason: format!("expected at most 1 argument, got {}", args.len()),
                })
            }
        };
        Ok(Arc::new(MarkedMatcher { min_marks }))
    }
}

#[test]
fn test_custom_plugin_through_own_registry() {
    let mut registry = PluginRegistry::with_builtins();
    registry
        .register("marked", Box::new(MarkedPluginProvider))
        .unwrap();

    let pattern = PhonexPattern::compile_with("marked()", &registry).unwrap();
    let input = parse_transcript("tn̥a").unwrap();
    let mut matcher = pattern.matcher(&input);
    assert!(matcher.find());
    // only the 'n' carries a combining ring
    assert_eq!((matcher.start(), matcher.end()), (Some(1), Some(2)));
    assert!(!matcher.find());
}

#[test]
fn test_custom_plugin_unknown_in_global_registry() {
    let err = PhonexPattern::compile("marked()").unwrap_err();
    assert!(matches!(err, PhonexError::UnknownPlugin { ref name, .. } if name == "marked"));
}

#[test]
fn test_duplicate_registration_is_a_configuration_error() {
    let mut registry = PluginRegistry::with_builtins();
    registry
        .register("marked", Box::new(MarkedPluginProvider))
        .unwrap();
    let err = registry
        .register("marked", Box::new(MarkedPluginProvider))
        .unwrap_err();
    assert!(matches!(err, PhonexError::DuplicateProvider { ref name } if name == "marked"));

    // Rebinding a builtin fails the same way.
    let err = registry
        .register("diphthong", Box::new(SuffixDiacriticPluginProvider))
        .unwrap_err();
    assert!(matches!(err, PhonexError::DuplicateProvider { ref name } if name == "diphthong"));
}

#[test]
fn test_builtin_argument_validation_at_compile_time() {
    // Arity errors surface from compile, not at match time.
    assert!(matches!(
        PhonexPattern::compile("suffix()"),
        Err(PhonexError::InvalidArgument { .. })
    ));
    assert!(matches!(
        PhonexPattern::compile("suffix(h, w)"),
        Err(PhonexError::InvalidArgument { .. })
    ));
    assert!(matches!(
        PhonexPattern::compile("diphthong(maybe)"),
        Err(PhonexError::InvalidArgument { .. })
    ));
    assert!(PhonexPattern::compile("suffix(ʰ)").is_ok());
    assert!(PhonexPattern::compile("diphthong(false)").is_ok());
}

#[test]
fn test_plugin_invocations_compose_with_the_grammar() {
    let mut input = parse_transcript("tʰatʰa").unwrap();
    SonoritySyllabifier::new().annotate(&mut input).unwrap();

    // every aspirated 't' followed by a vowel
    let pattern = PhonexPattern::compile("suffix(ʰ)\\v").unwrap();
    let mut matcher = pattern.matcher(&input);
    let mut spans = Vec::new();
    while matcher.find() {
        spans.push((matcher.start().unwrap(), matcher.end().unwrap()));
    }
    assert_eq!(spans, vec![(0, 2), (2, 4)]);
}
