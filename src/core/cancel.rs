//! Cooperative cancellation.

use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

const SLEEP_SLICE: Duration = Duration::from_millis(20);

/// Raised by an action or checker when the surrounding run has been aborted.
///
/// Navigation never treats this as a failed attempt: it stops retrying and
/// returns the error to the caller unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("navigation cancelled")]
pub struct Cancelled;

/// Shared flag that actions and checkers poll at their blocking points.
///
/// Clones observe the same flag. Backed by a [`CancellationToken`], which
/// needs no runtime to be raised or polled.
///
/// ```rust
/// use navtrie::core::{CancelToken, Cancelled};
///
/// let token = CancelToken::new();
/// assert_eq!(token.checkpoint(), Ok(()));
///
/// token.clone().cancel();
/// assert_eq!(token.checkpoint(), Err(Cancelled));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    inner: CancellationToken,
}

impl CancelToken {
    /// A token that has not been cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing token, e.g. one shared with async code.
    pub fn from_token(inner: CancellationToken) -> Self {
        Self { inner }
    }

    /// The underlying token.
    pub fn token(&self) -> &CancellationToken {
        &self.inner
    }

    /// Raise the signal. Cannot be undone.
    pub fn cancel(&self) {
        self.inner.cancel();
    }

    /// Whether the signal has been raised on this token or any clone.
    pub fn is_cancelled(&self) -> bool {
        self.inner.is_cancelled()
    }

    /// Return `Err(Cancelled)` once the signal has been raised.
    pub fn checkpoint(&self) -> Result<(), Cancelled> {
        if self.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }

    /// Block for `duration`, waking early with `Err(Cancelled)` if the
    /// signal is raised meanwhile.
    ///
    /// A duration too large to represent as a deadline waits until cancelled.
    pub fn sleep(&self, duration: Duration) -> Result<(), Cancelled> {
        self.checkpoint()?;
        let deadline = Instant::now().checked_add(duration);
        loop {
            self.checkpoint()?;
            let slice = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Ok(());
                    }
                    SLEEP_SLICE.min(deadline - now)
                }
                None => SLEEP_SLICE,
            };
            thread::sleep(slice);
        }
    }
}
