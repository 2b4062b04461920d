//! Single-slot submission guard
//!
//! Each user may have at most one contact submission in flight. The slot is
//! held by a [`SubmitPermit`] and released when the permit drops, so every
//! exit path (including a dropped request future) frees it.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
pub struct SubmitGuard {
    in_flight: Mutex<HashSet<String>>,
}

impl SubmitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot for `key`, or `None` if a submission is already outstanding
    pub fn try_acquire(&self, key: &str) -> Option<SubmitPermit<'_>> {
        if !self.slots().insert(key.to_string()) {
            return None;
        }
        Some(SubmitPermit {
            guard: self,
            key: key.to_string(),
        })
    }

    /// Whether a submission for `key` is currently in flight
    pub fn is_submitting(&self, key: &str) -> bool {
        self.slots().contains(key)
    }

    // The set stays consistent even if a holder panicked
    fn slots(&self) -> MutexGuard<'_, HashSet<String>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Proof of an in-flight submission; releases its slot on drop
#[derive(Debug)]
pub struct SubmitPermit<'a> {
    guard: &'a SubmitGuard,
    key: String,
}

impl Drop for SubmitPermit<'_> {
    fn drop(&mut self) {
        self.guard.slots().remove(&self.key);
    }
}
