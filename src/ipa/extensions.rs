//! Typed side-annotations ("extensions") attached to transcription elements.
//!
//! Annotation providers compute derived facts about an element (e.g. its
//! syllable constituent role) and attach them here, keyed by the payload's
//! Rust type. At most one value per type may be attached; attaching twice is
//! a programming error reported via [`ExtensionError::Duplicate`] rather
//! than a silent overwrite. The matching core never interprets payloads -
//! it only hands them back to predicates that ask for a specific kind.

use rustc_hash::FxHashMap;
use std::any::{type_name, Any, TypeId};
use thiserror::Error;

/// Errors raised by the extension store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtensionError {
    /// An extension of this kind is already attached to the element.
    ///
    /// Extensions are attach-once: annotation providers must run exactly
    /// once per sequence per matching session.
    #[error("extension '{kind}' is already attached")]
    Duplicate {
        /// Type name of the extension kind
        kind: &'static str,
    },
}

/// A map of typed extension values, keyed by payload type.
///
/// Values must be `Send + Sync` so annotated sequences can be handed to
/// concurrently running matches.
#[derive(Default)]
pub struct ExtensionMap {
    values: FxHashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl std::fmt::Debug for ExtensionMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionMap")
            .field("len", &self.values.len())
            .finish()
    }
}

impl ExtensionMap {
    /// Create an empty extension map.
    pub fn new() -> Self {
        Self {
            values: FxHashMap::default(),
        }
    }

    /// Attach an extension value.
    ///
    /// # Errors
    ///
    /// Fails with [`ExtensionError::Duplicate`] if a value of type `T` is
    /// already attached.
    pub fn attach<T: Any + Send + Sync>(&mut self, value: T) -> Result<(), ExtensionError> {
        let key = TypeId::of::<T>();
        if self.values.contains_key(&key) {
            return Err(ExtensionError::Duplicate {
                kind: type_name::<T>(),
            });
        }
        self.values.insert(key, Box::new(value));
        Ok(())
    }

    /// Get the attached extension of type `T`, if any.
    pub fn get<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.values
            .get(&TypeId::of::<T>())
            .and_then(|v| v.downcast_ref::<T>())
    }

    /// Check whether an extension of type `T` is attached.
    pub fn contains<T: Any + Send + Sync>(&self) -> bool {
        self.values.contains_key(&TypeId::of::<T>())
    }

    /// Number of attached extensions.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if no extensions are attached.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Marker(u32);

    #[derive(Debug, PartialEq)]
    struct Other(&'static str);

    #[test]
    fn test_attach_then_get() {
        let mut map = ExtensionMap::new();
        map.attach(Marker(7)).unwrap();
        assert_eq!(map.get::<Marker>(), Some(&Marker(7)));
        assert_eq!(map.get::<Other>(), None);
    }

    #[test]
    fn test_duplicate_attach_fails() {
        let mut map = ExtensionMap::new();
        map.attach(Marker(1)).unwrap();
        let err = map.attach(Marker(2)).unwrap_err();
        assert!(matches!(err, ExtensionError::Duplicate { .. }));
        // The original value survives
        assert_eq!(map.get::<Marker>(), Some(&Marker(1)));
    }

    #[test]
    fn test_distinct_kinds_coexist() {
        let mut map = ExtensionMap::new();
        map.attach(Marker(1)).unwrap();
        map.attach(Other("x")).unwrap();
        assert_eq!(map.len(), 2);
        assert!(map.contains::<Marker>());
        assert!(map.contains::<Other>());
    }
}
