//! Error types for pattern compilation and plugin registration.

use thiserror::Error;

/// Errors raised while compiling a pattern or configuring the plugin
/// registry.
///
/// All compile-time failures abort compilation entirely; no partial
/// automaton is ever returned. Matching itself never raises domain errors:
/// absence of a match is a normal result.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PhonexError {
    /// The pattern text is malformed.
    ///
    /// Carries the byte offset and offending token so the error can be
    /// shown to the pattern's author.
    #[error("pattern syntax error at offset {offset}: unexpected {found}")]
    Syntax {
        /// Byte offset of the offending token in the pattern text
        offset: usize,
        /// Description of what was found
        found: String,
    },

    /// The pattern references a plugin name no provider is registered for.
    #[error("unknown phonex plugin '{name}' at offset {offset}")]
    UnknownPlugin {
        /// The unresolved plugin name
        name: String,
        /// Byte offset of the invocation in the pattern text
        offset: usize,
    },

    /// A plugin factory rejected its argument list.
    #[error("invalid arguments for plugin '{plugin}': {reason}")]
    InvalidArgument {
        /// The plugin that rejected its arguments
        plugin: String,
        /// Why the arguments were rejected
        reason: String,
    },

    /// A plugin name was registered twice.
    ///
    /// A configuration error caught during plugin loading, not at
    /// pattern-authoring time.
    #[error("phonex plugin '{name}' is already registered")]
    DuplicateProvider {
        /// The doubly-bound name
        name: String,
    },
}

/// A specialized `Result` type for pattern operations.
pub type Result<T> = std::result::Result<T, PhonexError>;
