//! Time-bounded set of processed event ids.
//!
//! Redis pub/sub may deliver a change twice (reconnects, several publishers
//! for one write). Handlers are idempotent on their own for creates, but
//! skipping known ids keeps duplicate work out of the store.

use dashmap::DashMap;
use std::time::{Duration, Instant};

/// In-memory idempotency guard with TTL-based expiry
#[derive(Debug)]
pub struct IdempotencyGuard {
    seen: DashMap<String, Instant>,
    ttl: Duration,
}

impl IdempotencyGuard {
    pub fn new(ttl: Duration) -> Self {
        Self {
            seen: DashMap::new(),
            ttl,
        }
    }

    /// Record `event_id`; false if it was already seen within the TTL
    pub fn first_delivery(&self, event_id: &str) -> bool {
        let now = Instant::now();
        match self.seen.entry(event_id.to_string()) {
            dashmap::mapref::entry::Entry::Occupied(mut entry) => {
                if now.duration_since(*entry.get()) > self.ttl {
                    entry.insert(now);
                    true
                } else {
                    false
                }
            }
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                entry.insert(now);
                true
            }
        }
    }

    /// Drop expired ids; returns how many were removed
    pub fn purge_expired(&self) -> usize {
        let before = self.seen.len();
        let ttl = self.ttl;
        self.seen.retain(|_, seen_at| seen_at.elapsed() <= ttl);
        before - self.seen.len()
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_is_detected() {
        let guard = IdempotencyGuard::new(Duration::from_secs(60));
        assert!(guard.first_delivery("e1"));
        assert!(!guard.first_delivery("e1"));
        assert!(guard.first_delivery("e2"));
        assert_eq!(guard.len(), 2);
    }

    #[test]
    fn test_expired_ids_are_forgotten() {
        let guard = IdempotencyGuard::new(Duration::ZERO);
        assert!(guard.first_delivery("e1"));
        std::thread::sleep(Duration::from_millis(2));
        assert!(guard.first_delivery("e1"));

        std::thread::sleep(Duration::from_millis(2));
        assert_eq!(guard.purge_expired(), 1);
        assert!(guard.is_empty());
    }
}
