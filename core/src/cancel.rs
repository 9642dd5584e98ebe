//! cancel.rs
//! Cooperative cancellation for whole-stream reads and writes.
//!
//! Checked between top-level tokens only; a primitive is never interrupted halfway.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::types::{DynaryError, Result};

#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancelToken {
    /// Never fires unless `cancel` is called.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self { flag: Arc::default(), deadline: Some(deadline) }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// Request cancellation; visible to every clone.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// `tokens` is how many whole tokens were processed so far (for the error).
    pub fn check(&self, tokens: usize) -> Result<()> {
        if self.is_cancelled() {
            return Err(DynaryError::Cancelled { tokens });
        }
        match self.deadline {
            Some(d) if Instant::now() >= d => Err(DynaryError::DeadlineExceeded { tokens }),
            _ => Ok(()),
        }
    }
}
