//! In-memory expansion registry.
//!
//! The registry keeps its handles behind an `RwLock<Arc<HashMap>>`. Readers
//! take a [`RegistrySnapshot`] by cloning the `Arc`, which is the whole cost
//! of a read: no lock is held while text is being resolved. Writers replace
//! the map copy-on-write, so a snapshot sees either the state before a
//! registration or the state after it, never a mix.
//!
//! # Example
//!
//! ```rust
//! use placeholder::{ExpansionRegistry, FnExpansion};
//!
//! let registry = ExpansionRegistry::new();
//! registry
//!     .register(FnExpansion::standard("Server", |_, _| Ok(Some("Lobby".into()))))
//!     .unwrap();
//!
//! assert!(registry.is_registered("server"));
//! assert!(registry.is_registered("SERVER"));
//! assert_eq!(registry.identifiers(), vec!["server".to_string()]);
//! ```

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use placeholder_engine::{dispatch_cleanup, Expansion, ExpansionLookup, ProviderHandle, Subject};
use placeholder_lexer::{fold_identifier, Closure, PARAMETER_SEPARATOR};
use thiserror::Error;

type HandleMap = HashMap<String, ProviderHandle>;

const DELIMITERS: [char; 3] = [
    Closure::Percent.head(),
    Closure::Bracket.head(),
    Closure::Bracket.tail(),
];

/// Errors returned when registering an expansion.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The identifier cannot appear in a token.
    #[error("invalid expansion identifier '{identifier}': {reason}")]
    InvalidIdentifier {
        identifier: String,
        reason: &'static str,
    },

    /// The expansion's `can_register` returned false.
    #[error("expansion '{identifier}' refused registration")]
    Refused { identifier: String },
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Checks that `identifier` can be written inside a token.
pub fn validate_identifier(identifier: &str) -> Result<()> {
    let reason = if identifier.is_empty() {
        "identifier is empty"
    } else if identifier.contains(PARAMETER_SEPARATOR) {
        "identifier contains an underscore"
    } else if identifier.chars().any(char::is_whitespace) {
        "identifier contains whitespace"
    } else if identifier.contains(&DELIMITERS[..]) {
        "identifier contains a closure delimiter"
    } else {
        return Ok(());
    };

    Err(RegistryError::InvalidIdentifier {
        identifier: identifier.to_string(),
        reason,
    })
}

/// An immutable view of the registry at one point in time.
#[derive(Debug, Clone, Default)]
pub struct RegistrySnapshot {
    handles: Arc<HandleMap>,
}

impl RegistrySnapshot {
    /// Looks up a handle, ignoring case.
    pub fn get(&self, identifier: &str) -> Option<&ProviderHandle> {
        self.handles.get(fold_identifier(identifier).as_ref())
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn handles(&self) -> impl Iterator<Item = &ProviderHandle> {
        self.handles.values()
    }

    /// Registered identifiers, sorted.
    pub fn identifiers(&self) -> Vec<String> {
        let mut identifiers: Vec<String> = self.handles.keys().cloned().collect();
        identifiers.sort();
        identifiers
    }
}

impl ExpansionLookup for RegistrySnapshot {
    fn lookup(&self, identifier: &str) -> Option<&ProviderHandle> {
        self.handles.get(identifier)
    }

    fn count(&self) -> usize {
        self.handles.len()
    }
}

/// Thread-safe store of registered expansions, keyed by lowercased
/// identifier.
#[derive(Debug, Default)]
pub struct ExpansionRegistry {
    handles: RwLock<Arc<HandleMap>>,
}

impl ExpansionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `expansion`, replacing any expansion with the same
    /// identifier.
    ///
    /// Returns the handle that was replaced, if any.
    ///
    /// # Errors
    ///
    /// [`RegistryError::InvalidIdentifier`] when the identifier is empty or
    /// contains an underscore, whitespace or a closure delimiter,
    /// [`RegistryError::Refused`] when
    /// the expansion's `can_register` says no.
    pub fn register<E: Expansion + 'static>(&self, expansion: E) -> Result<Option<ProviderHandle>> {
        self.register_shared(Arc::new(expansion))
    }

    /// Like [`register`](Self::register) for an already shared expansion.
    pub fn register_shared(&self, expansion: Arc<dyn Expansion>) -> Result<Option<ProviderHandle>> {
        validate_identifier(expansion.identifier())?;
        if !expansion.can_register() {
            tracing::debug!(
                identifier = expansion.identifier(),
                owner = expansion.owner(),
                "expansion refused registration"
            );
            return Err(RegistryError::Refused {
                identifier: expansion.identifier().to_string(),
            });
        }

        let handle = ProviderHandle::new(expansion);
        let key = handle.identifier().to_string();
        let previous = self.update(|map| map.insert(key, handle.clone()));

        match &previous {
            Some(old) => tracing::debug!(
                identifier = handle.identifier(),
                owner = handle.owner(),
                previous_owner = old.owner(),
                "replaced expansion"
            ),
            None => tracing::debug!(
                identifier = handle.identifier(),
                owner = handle.owner(),
                "registered expansion"
            ),
        }

        Ok(previous)
    }

    /// Removes the expansion registered under `identifier`.
    pub fn unregister(&self, identifier: &str) -> Option<ProviderHandle> {
        let key = fold_identifier(identifier);
        let removed = self.update(|map| map.remove(key.as_ref()));
        if let Some(handle) = &removed {
            tracing::debug!(
                identifier = handle.identifier(),
                owner = handle.owner(),
                "unregistered expansion"
            );
        }
        removed
    }

    /// Removes every expansion whose owner is `owner`.
    pub fn unregister_owner(&self, owner: &str) -> Vec<ProviderHandle> {
        let removed = self.update(|map| {
            let keys: Vec<String> = map
                .iter()
                .filter(|(_, handle)| handle.owner() == owner)
                .map(|(key, _)| key.clone())
                .collect();
            keys.iter()
                .filter_map(|key| map.remove(key))
                .collect::<Vec<_>>()
        });
        tracing::debug!(owner, count = removed.len(), "unregistered expansions by owner");
        removed
    }

    /// Removes everything. Returns how many expansions were dropped.
    pub fn clear(&self) -> usize {
        let removed = self.update(|map| {
            let count = map.len();
            map.clear();
            count
        });
        tracing::debug!(count = removed, "cleared expansion registry");
        removed
    }

    /// The current state, unaffected by later writes.
    pub fn snapshot(&self) -> RegistrySnapshot {
        let handles = self.handles.read().unwrap_or_else(PoisonError::into_inner);
        RegistrySnapshot {
            handles: Arc::clone(&*handles),
        }
    }

    pub fn is_registered(&self, identifier: &str) -> bool {
        self.snapshot().get(identifier).is_some()
    }

    /// Registered identifiers, sorted.
    pub fn identifiers(&self) -> Vec<String> {
        self.snapshot().identifiers()
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Notifies every cleanable expansion that `subject` left. Returns how
    /// many were notified without fault.
    pub fn cleanup(&self, subject: &Subject) -> usize {
        let snapshot = self.snapshot();
        dispatch_cleanup(snapshot.handles(), subject)
    }

    fn update<R>(&self, f: impl FnOnce(&mut HandleMap) -> R) -> R {
        let mut handles = self.handles.write().unwrap_or_else(PoisonError::into_inner);
        // Clones the map only while a snapshot still shares it.
        f(Arc::make_mut(&mut *handles))
    }
}
