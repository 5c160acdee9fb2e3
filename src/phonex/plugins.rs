//! Plugin predicate registry.
//!
//! Plugins let external code contribute new predicate kinds addressable
//! from pattern text as `name(arg, ...)` without modifying the compiler.
//! A provider is a factory from the literal argument list to a matcher;
//! the registry maps plugin names to providers. Registration happens once
//! at startup; the registry is read-only during matching, and `create`
//! never mutates it, so concurrent compilation sessions may share it
//! freely.

use rustc_hash::FxHashMap;
use std::sync::{Arc, OnceLock};

use super::error::PhonexError;
use super::matchers::{DiphthongMatcher, PhoneMatcherRef, SuffixDiacriticMatcher};

/// A factory for one plugin's matchers.
///
/// The factory validates its own argument list: arity or type mismatches
/// fail with [`PhonexError::InvalidArgument`] at compile time, never
/// silently at match time.
pub trait PluginProvider: Send + Sync {
    /// Construct a matcher from the literal arguments parsed out of the
    /// pattern text.
    fn create_matcher(&self, args: &[String]) -> Result<PhoneMatcherRef, PhonexError>;
}

/// Provides the `suffix` plugin: matches phones carrying a specific
/// suffix diacritic. Requires exactly one single-glyph argument.
#[derive(Debug, Default)]
pub struct SuffixDiacriticPluginProvider;

impl PluginProvider for SuffixDiacriticPluginProvider {
    fn create_matcher(&self, args: &[String]) -> Result<PhoneMatcherRef, PhonexError> {
        if args.len() != 1 {
            return Err(PhonexError::InvalidArgument {
                plugin: "suffix".to_string(),
                reason: format!("expected exactly 1 argument, got {}", args.len()),
            });
        }
        let mut chars = args[0].chars();
        match (chars.next(), chars.next()) {
            (Some(glyph), None) => Ok(Arc::new(SuffixDiacriticMatcher::new(glyph))),
            _ => Err(PhonexError::InvalidArgument {
                plugin: "suffix".to_string(),
                reason: format!("expected a single glyph, got '{}'", args[0]),
            }),
        }
    }
}

/// Provides the `diphthong` plugin: matches elements by their annotated
/// diphthong-membership flag. Takes zero or one boolean literal; omitted,
/// the flag defaults to `true`.
#[derive(Debug, Default)]
pub struct DiphthongPluginProvider;

impl PluginProvider for DiphthongPluginProvider {
    fn create_matcher(&self, args: &[String]) -> Result<PhoneMatcherRef, PhonexError> {
        let diphthong = match args {
            [] => true,
            [arg] => match arg.as_str() {
                "true" => true,
                "false" => false,
                other => {
                    return Err(PhonexError::InvalidArgument {
                        plugin: "diphthong".to_string(),
                        reason: format!("expected 'true' or 'false', got '{}'", other),
                    })
                }
            },
            _ => {
                return Err(PhonexError::InvalidArgument {
                    plugin: "diphthong".to_string(),
                    reason: format!("expected at most 1 argument, got {}", args.len()),
                })
            }
        };
        Ok(Arc::new(DiphthongMatcher::new(diphthong)))
    }
}

/// Name-keyed registry of plugin providers.
#[derive(Default)]
pub struct PluginRegistry {
    providers: FxHashMap<String, Box<dyn PluginProvider>>,
}

impl PluginRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            providers: FxHashMap::default(),
        }
    }

    /// Create a registry with the built-in `suffix` and `diphthong`
    /// plugins registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry
            .providers
            .insert("suffix".to_string(), Box::new(SuffixDiacriticPluginProvider));
        registry
            .providers
            .insert("diphthong".to_string(), Box::new(DiphthongPluginProvider));
        registry
    }

    /// Bind a provider to a plugin name.
    ///
    /// # Errors
    ///
    /// Fails with [`PhonexError::DuplicateProvider`] if the name is
    /// already bound; rebinding is a configuration error, not an
    /// override.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        provider: Box<dyn PluginProvider>,
    ) -> Result<(), PhonexError> {
        let name = name.into();
        if self.providers.contains_key(&name) {
            return Err(PhonexError::DuplicateProvider { name });
        }
        self.providers.insert(name, provider);
        Ok(())
    }

    /// Construct a matcher for a plugin invocation.
    ///
    /// `offset` is the invocation's position in the pattern text, carried
    /// into the error for unknown names.
    ///
    /// # Errors
    ///
    /// [`PhonexError::UnknownPlugin`] for unbound names; whatever the
    /// provider raises for bad arguments.
    pub fn create(
        &self,
        name: &str,
        args: &[String],
        offset: usize,
    ) -> Result<PhoneMatcherRef, PhonexError> {
        let provider = self
            .providers
            .get(name)
            .ok_or_else(|| PhonexError::UnknownPlugin {
                name: name.to_string(),
                offset,
            })?;
        provider.create_matcher(args)
    }

    /// Check whether a name is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    /// Number of registered providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// True if no providers are registered.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// The process-wide registry, initialized with the built-in plugins
    /// on first use and read-only afterwards.
    ///
    /// Hosts that need additional plugins compile through their own
    /// registry with
    /// [`PhonexPattern::compile_with`](super::PhonexPattern::compile_with).
    pub fn global() -> &'static PluginRegistry {
        static GLOBAL: OnceLock<PluginRegistry> = OnceLock::new();
        GLOBAL.get_or_init(PluginRegistry::with_builtins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ipa::{parse_transcript, IpaElement, Phone};
    use crate::syllable::{AnnotationProvider, SonoritySyllabifier};

    #[test]
    fn test_register_duplicate_fails() {
        let mut registry = PluginRegistry::with_builtins();
        let err = registry
            .register("suffix", Box::new(SuffixDiacriticPluginProvider))
            .unwrap_err();
        assert_eq!(
            err,
            PhonexError::DuplicateProvider {
                name: "suffix".to_string()
            }
        );
    }

    #[test]
    fn test_create_unknown_plugin_fails() {
        let registry = PluginRegistry::with_builtins();
        let err = registry.create("nasal", &[], 3).unwrap_err();
        assert_eq!(
            err,
            PhonexError::UnknownPlugin {
                name: "nasal".to_string(),
                offset: 3
            }
        );
    }

    #[test]
    fn test_suffix_arity() {
        let registry = PluginRegistry::with_builtins();
        assert!(matches!(
            registry.create("suffix", &[], 0),
            Err(PhonexError::InvalidArgument { .. })
        ));
        assert!(registry.create("suffix", &["h".to_string()], 0).is_ok());
        assert!(matches!(
            registry.create("suffix", &["h".to_string(), "w".to_string()], 0),
            Err(PhonexError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_diphthong_default_is_true() {
        let registry = PluginRegistry::with_builtins();
        let defaulted = registry.create("diphthong", &[], 0).unwrap();
        let explicit = registry.create("diphthong", &["true".to_string()], 0).unwrap();

        let mut seq = parse_transcript("taɪp").unwrap();
        SonoritySyllabifier::new().annotate(&mut seq).unwrap();
        for e in &seq {
            assert_eq!(defaulted.matches(e), explicit.matches(e));
        }
    }

    #[test]
    fn test_diphthong_rejects_non_boolean() {
        let registry = PluginRegistry::with_builtins();
        assert!(matches!(
            registry.create("diphthong", &["yes".to_string()], 0),
            Err(PhonexError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_suffix_matcher_semantics() {
        let registry = PluginRegistry::with_builtins();
        let matcher = registry.create("suffix", &["ʰ".to_string()], 0).unwrap();
        let aspirated = IpaElement::phone(Phone::with_diacritics('t', &[], Some('ʰ')));
        let plain = IpaElement::phone(Phone::new('t'));
        assert!(matcher.matches(&aspirated));
        assert!(!matcher.matches(&plain));
    }

    #[test]
    fn test_global_registry_has_builtins() {
        let registry = PluginRegistry::global();
        assert!(registry.contains("suffix"));
        assert!(registry.contains("diphthong"));
    }
}
