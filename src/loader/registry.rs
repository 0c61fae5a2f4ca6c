//! Name-to-capability registries.

use crate::core::Capability;
use std::collections::HashMap;
use std::fmt;

/// Whether a registry key refers to an action or a checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityKind {
    Action,
    Checker,
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Action => f.write_str("action"),
            Self::Checker => f.write_str("checker"),
        }
    }
}

/// Capabilities indexed by their key.
///
/// Callers build one registry of actions and one of checkers; the loader
/// resolves the names in a description against them.
///
/// ```rust
/// use navtrie::core::Capability;
/// use navtrie::loader::Registry;
///
/// let checkers = Registry::new()
///     .with(Capability::constant("at_home", true))
///     .with(Capability::constant("at_terminal", false));
///
/// assert!(checkers.contains("at_home"));
/// assert_eq!(checkers.len(), 2);
/// ```
#[derive(Clone, Default)]
pub struct Registry {
    entries: HashMap<String, Capability>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `capability` under its own key, returning any entry it replaced.
    pub fn register(&mut self, capability: Capability) -> Option<Capability> {
        self.entries
            .insert(capability.key().to_string(), capability)
    }

    pub fn with(mut self, capability: Capability) -> Self {
        self.register(capability);
        self
    }

    /// Register a plain predicate under `key`.
    pub fn register_fn<F>(&mut self, key: &str, predicate: F) -> Option<Capability>
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.register(Capability::from_predicate(key, predicate))
    }

    pub fn get(&self, key: &str) -> Option<&Capability> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Capability> for Registry {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        let mut registry = Self::new();
        registry.extend(iter);
        registry
    }
}

impl Extend<Capability> for Registry {
    fn extend<I: IntoIterator<Item = Capability>>(&mut self, iter: I) {
        for capability in iter {
            self.register(capability);
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.keys().collect();
        keys.sort_unstable();
        f.debug_struct("Registry").field("keys", &keys).finish()
    }
}
