//! Seen-email stores.
//!
//! An accepted email address is remembered so the same address cannot be used
//! for a second lookup. The store sits behind `SeenEmailStore` so the handler
//! does not care whether addresses are kept forever, expire, or live elsewhere.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Remembers email addresses that have already been accepted.
pub trait SeenEmailStore: Send + Sync {
    /// Records `email` and returns `true` if it was not already present.
    ///
    /// Check and insert happen under one lock: of two concurrent calls with the
    /// same new address, exactly one returns `true`.
    fn mark_seen(&self, email: &str) -> bool;

    /// Returns `true` if `email` is currently remembered.
    fn has_seen(&self, email: &str) -> bool;

    /// Number of addresses currently remembered.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// A panic while holding the lock cannot leave a HashSet half-updated, so a
// poisoned lock is still safe to use.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Process-lifetime set of addresses. Never forgets; cleared only on restart.
#[derive(Debug, Default)]
pub struct InMemorySeenEmails {
    seen: Mutex<HashSet<String>>,
}

impl InMemorySeenEmails {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SeenEmailStore for InMemorySeenEmails {
    fn mark_seen(&self, email: &str) -> bool {
        lock(&self.seen).insert(email.to_string())
    }

    fn has_seen(&self, email: &str) -> bool {
        lock(&self.seen).contains(email)
    }

    fn len(&self) -> usize {
        lock(&self.seen).len()
    }
}

/// Addresses are forgotten `ttl` after they were accepted.
///
/// Expired entries are pruned whenever a new address is recorded, so memory is
/// bounded by the number of distinct addresses seen within one `ttl` window.
#[derive(Debug)]
pub struct ExpiringSeenEmails {
    ttl: Duration,
    seen: Mutex<HashMap<String, Instant>>,
}

impl ExpiringSeenEmails {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            seen: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn mark_seen_at(&self, email: &str, now: Instant) -> bool {
        let mut seen = lock(&self.seen);
        if let Some(accepted_at) = seen.get(email) {
            if now.saturating_duration_since(*accepted_at) < self.ttl {
                return false;
            }
        }
        seen.retain(|_, accepted_at| now.saturating_duration_since(*accepted_at) < self.ttl);
        seen.insert(email.to_string(), now);
        true
    }

    fn has_seen_at(&self, email: &str, now: Instant) -> bool {
        lock(&self.seen)
            .get(email)
            .is_some_and(|accepted_at| now.saturating_duration_since(*accepted_at) < self.ttl)
    }
}

impl SeenEmailStore for ExpiringSeenEmails {
    fn mark_seen(&self, email: &str) -> bool {
        self.mark_seen_at(email, Instant::now())
    }

    fn has_seen(&self, email: &str) -> bool {
        self.has_seen_at(email, Instant::now())
    }

    fn len(&self) -> usize {
        let now = Instant::now();
        lock(&self.seen)
            .values()
            .filter(|accepted_at| now.saturating_duration_since(**accepted_at) < self.ttl)
            .count()
    }
}
