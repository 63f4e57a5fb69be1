//! Metrics registry
//!
//! Counters only, monotonic, reset on process start.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters.
///
/// Relaxed ordering throughout; readers only need eventually exact values.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    posts_created: AtomicU64,
    posts_updated: AtomicU64,
    posts_deleted: AtomicU64,
    comments_added: AtomicU64,
    comments_updated: AtomicU64,
    comments_deleted: AtomicU64,
    /// Ownership denials (403)
    forbidden: AtomicU64,
    /// Requests answered with a 5xx
    failed_requests: AtomicU64,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_posts_created(&self) {
        self.posts_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_posts_updated(&self) {
        self.posts_updated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_posts_deleted(&self) {
        self.posts_deleted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_comments_added(&self) {
        self.comments_added.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_comments_updated(&self) {
        self.comments_updated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_comments_deleted(&self) {
        self.comments_deleted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_forbidden(&self) {
        self.forbidden.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_failed_requests(&self) {
        self.failed_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            posts_created: self.posts_created.load(Ordering::Relaxed),
            posts_updated: self.posts_updated.load(Ordering::Relaxed),
            posts_deleted: self.posts_deleted.load(Ordering::Relaxed),
            comments_added: self.comments_added.load(Ordering::Relaxed),
            comments_updated: self.comments_updated.load(Ordering::Relaxed),
            comments_deleted: self.comments_deleted.load(Ordering::Relaxed),
            forbidden: self.forbidden.load(Ordering::Relaxed),
            failed_requests: self.failed_requests.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub posts_created: u64,
    pub posts_updated: u64,
    pub posts_deleted: u64,
    pub comments_added: u64,
    pub comments_updated: u64,
    pub comments_deleted: u64,
    pub forbidden: u64,
    pub failed_requests: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry_has_zero_values() {
        let snapshot = MetricsRegistry::new().snapshot();
        assert_eq!(snapshot.posts_created, 0);
        assert_eq!(snapshot.forbidden, 0);
        assert_eq!(snapshot.failed_requests, 0);
    }

    #[test]
    fn test_increment_counters() {
        let registry = MetricsRegistry::new();

        registry.increment_posts_created();
        registry.increment_posts_created();
        registry.increment_comments_added();
        registry.increment_comments_deleted();
        registry.increment_forbidden();

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.posts_created, 2);
        assert_eq!(snapshot.comments_added, 1);
        assert_eq!(snapshot.comments_deleted, 1);
        assert_eq!(snapshot.forbidden, 1);
        assert_eq!(snapshot.posts_deleted, 0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let registry = MetricsRegistry::new();
        registry.increment_failed_requests();

        let json = serde_json::to_value(registry.snapshot()).unwrap();
        assert_eq!(json["failed_requests"], 1);
        assert_eq!(json["posts_created"], 0);
    }

    #[test]
    fn test_thread_safety() {
        use std::sync::Arc;
        use std::thread;

        let registry = Arc::new(MetricsRegistry::new());
        let handles: Vec<_> = (0..10)
            .map(|_| {
                let reg = Arc::clone(&registry);
                thread::spawn(move || {
                    for _ in 0..100 {
                        reg.increment_posts_updated();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.snapshot().posts_updated, 1000);
    }
}
