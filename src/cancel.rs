//! Cooperative cancellation for long-running algorithms

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{GraphError, Result};

/// A cheaply clonable handle polled by the iterative engines (clustering,
/// propagation, shuffling) between iterations.
///
/// Cancellation is cooperative: requesting it takes effect at the next
/// iteration boundary, surfacing [`GraphError::Cancelled`] to the caller.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Bail out with `Cancelled` if an optional token was tripped.
pub(crate) fn check(token: Option<&CancelToken>) -> Result<()> {
    match token {
        Some(t) if t.is_cancelled() => Err(GraphError::Cancelled),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_starts_clear_and_trips_once_cancelled() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
        assert!(check(Some(&token)).is_ok());

        let remote = token.clone();
        remote.cancel();
        assert!(token.is_cancelled());
        assert!(matches!(check(Some(&token)), Err(GraphError::Cancelled)));
    }

    #[test]
    fn missing_token_never_cancels() {
        assert!(check(None).is_ok());
    }
}
