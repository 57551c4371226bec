//! Snapshot slots and cancellable screen loads.
//!
//! A [`ScreenSlot`] only ever holds a complete snapshot. A failed load keeps
//! the previous one; a cancelled load is dropped without touching it.

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use socialdesk_core::types::Timestamp;
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::error::ViewError;

/// What a refresh did to the slot.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The new snapshot replaced the old one.
    Applied,
    /// The load failed; the previous snapshot is still current.
    Failed(ViewError),
    /// The screen went away before the load finished.
    Cancelled,
}

impl LoadOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, LoadOutcome::Applied)
    }
}

/// Lifetime of one open screen. Dropping it cancels every load started
/// under its token.
#[derive(Debug)]
pub struct ScreenTask {
    token: CancellationToken,
    _guard: DropGuard,
}

impl ScreenTask {
    pub fn new() -> Self {
        let token = CancellationToken::new();
        let guard = token.clone().drop_guard();
        Self {
            token,
            _guard: guard,
        }
    }

    /// A token cancelled when this screen closes.
    pub fn token(&self) -> CancellationToken {
        self.token.child_token()
    }

    pub fn close(self) {
        self.token.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Default for ScreenTask {
    fn default() -> Self {
        Self::new()
    }
}

/// Holds the last successfully loaded snapshot of a screen.
#[derive(Debug)]
pub struct ScreenSlot<S> {
    current: Option<Arc<S>>,
    loaded_at: Option<Timestamp>,
    screen: &'static str,
}

impl<S> ScreenSlot<S> {
    pub fn new(screen: &'static str) -> Self {
        Self {
            current: None,
            loaded_at: None,
            screen,
        }
    }

    pub fn snapshot(&self) -> Option<Arc<S>> {
        self.current.clone()
    }

    pub fn loaded_at(&self) -> Option<Timestamp> {
        self.loaded_at
    }

    /// Run `load` under `cancel` and apply its result.
    pub async fn refresh<F>(&mut self, cancel: &CancellationToken, load: F) -> LoadOutcome
    where
        F: Future<Output = Result<S, ViewError>>,
    {
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            result = load => Some(result),
        };

        match result {
            None => {
                tracing::debug!(screen = self.screen, "Screen load cancelled");
                LoadOutcome::Cancelled
            }
            Some(_) if cancel.is_cancelled() => {
                tracing::debug!(screen = self.screen, "Dropping late screen load");
                LoadOutcome::Cancelled
            }
            Some(Ok(snapshot)) => {
                self.current = Some(Arc::new(snapshot));
                self.loaded_at = Some(Utc::now());
                tracing::debug!(screen = self.screen, "Screen snapshot replaced");
                LoadOutcome::Applied
            }
            Some(Err(ViewError::Cancelled)) => LoadOutcome::Cancelled,
            Some(Err(e)) => {
                tracing::error!(
                    screen = self.screen,
                    error = %e,
                    "Screen load failed, keeping previous snapshot"
                );
                LoadOutcome::Failed(e)
            }
        }
    }
}
