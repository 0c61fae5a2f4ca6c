//! Action and checker capabilities.
//!
//! A capability is a zero-argument predicate attached to the graph: edges
//! carry an *action* that attempts a transition, nodes carry a *checker*
//! that confirms the scene. Both share one representation and differ only
//! in where they are attached.

use super::cancel::Cancelled;
use std::fmt;
use std::sync::Arc;

/// Signature shared by every action and checker.
///
/// `Ok(false)` is an ordinary failed attempt and may be retried.
/// `Err(Cancelled)` aborts the whole navigation and is never retried.
pub type CapabilityFn = dyn Fn() -> Result<bool, Cancelled> + Send + Sync;

/// A named, cloneable predicate capability.
///
/// The key is the registry name the capability was resolved from. It is
/// used for logging and for rebinding placeholder graphs.
///
/// # Example
///
/// ```rust
/// use navtrie::core::Capability;
///
/// let tap = Capability::from_predicate("tap_start", || true);
/// assert_eq!(tap.key(), "tap_start");
/// assert_eq!(tap.call(), Ok(true));
/// ```
#[derive(Clone)]
pub struct Capability {
    key: Arc<str>,
    run: Arc<CapabilityFn>,
    placeholder: bool,
}

impl Capability {
    /// Create a capability from a cancellable predicate.
    pub fn new<F>(key: impl Into<Arc<str>>, predicate: F) -> Self
    where
        F: Fn() -> Result<bool, Cancelled> + Send + Sync + 'static,
    {
        Self {
            key: key.into(),
            run: Arc::new(predicate),
            placeholder: false,
        }
    }

    /// Create a capability from a predicate that never cancels.
    pub fn from_predicate<F>(key: impl Into<Arc<str>>, predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Self::new(key, move || Ok(predicate()))
    }

    /// A capability that always returns `value`.
    pub fn constant(key: impl Into<Arc<str>>, value: bool) -> Self {
        Self::new(key, move || Ok(value))
    }

    /// An inert stand-in that always fails.
    ///
    /// Placeholders keep their key so they can later be swapped for the
    /// real capability registered under the same name.
    pub fn placeholder(key: impl Into<Arc<str>>) -> Self {
        Self {
            placeholder: true,
            ..Self::constant(key, false)
        }
    }

    /// Run every capability in order, stopping at the first `false`.
    ///
    /// ```rust
    /// use navtrie::core::Capability;
    ///
    /// let open_menu = Capability::constant("open_menu", true);
    /// let pick_item = Capability::constant("pick_item", false);
    /// let both = Capability::sequence("open_and_pick", [open_menu, pick_item]);
    /// assert_eq!(both.call(), Ok(false));
    /// ```
    pub fn sequence<I>(key: impl Into<Arc<str>>, steps: I) -> Self
    where
        I: IntoIterator<Item = Capability>,
    {
        let steps: Vec<Capability> = steps.into_iter().collect();
        Self::new(key, move || {
            for step in &steps {
                if !step.call()? {
                    return Ok(false);
                }
            }
            Ok(true)
        })
    }

    /// Call this capability up to `times` times, succeeding on the first `true`.
    ///
    /// The returned capability keeps the original key.
    pub fn retry(self, times: usize) -> Self {
        let key = Arc::clone(&self.key);
        Self::new(key, move || {
            for _ in 0..times {
                if self.call()? {
                    return Ok(true);
                }
            }
            Ok(false)
        })
    }

    /// Registry key this capability was created under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether this is an unbound placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    /// Invoke the predicate.
    pub fn call(&self) -> Result<bool, Cancelled> {
        (self.run)()
    }
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capability")
            .field("key", &self.key)
            .field("placeholder", &self.placeholder)
            .finish_non_exhaustive()
    }
}
