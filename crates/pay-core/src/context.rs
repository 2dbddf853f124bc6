//! # Call Context
//!
//! Deadline and cancellation carried from an inbound request down to the
//! outbound gateway call. Deriving a child never extends the parent: the
//! earlier deadline always wins.

use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

/// Deadline and cancellation scope for one gateway call
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    deadline: Option<Instant>,
    cancel: Option<watch::Receiver<bool>>,
}

impl CallContext {
    /// Root context: no deadline, never cancelled
    pub fn background() -> Self {
        Self::default()
    }

    /// Derive a context whose deadline is at most `deadline`
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(current) if current <= deadline => current,
            _ => deadline,
        });
        self
    }

    /// Derive a context that expires `timeout` from now, or earlier
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Attach a cancellation signal.
    ///
    /// The context counts as cancelled once the channel holds `true` or its
    /// sender is gone.
    pub fn with_cancellation(mut self, cancel: watch::Receiver<bool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Effective deadline, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline, saturating at zero
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    /// Whether cancellation has already been signalled
    pub fn is_cancelled(&self) -> bool {
        match &self.cancel {
            Some(rx) => *rx.borrow() || rx.has_changed().is_err(),
            None => false,
        }
    }

    /// Resolves once the context is cancelled; pending forever otherwise
    pub async fn cancelled(&self) {
        let Some(rx) = &self.cancel else {
            return std::future::pending::<()>().await;
        };
        let mut rx = rx.clone();
        // wait_for checks the current value first
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}
