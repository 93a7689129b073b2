//! The read-through policy itself.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use stratus_core::Result;
use tracing::debug;

/// Which side of the cache produced a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Served from the store without touching the network.
    Cache,
    /// Fetched from the provider and written back.
    Fresh,
}

/// One cacheable domain bound to a concrete identity key.
///
/// `load` and `store` talk to the cache store; `fetch` talks to the cloud
/// client. A slot is constructed per request with its identity already
/// applied (for costs, the reporting period; for advisor, the check kind;
/// for the tag inventory, the whole table).
#[async_trait]
pub trait CacheSlot: Send + Sync {
    type Payload: Send + Sync;

    /// Name used in logs.
    fn domain(&self) -> &'static str;

    /// Look up the stored payload and its last-refreshed timestamp.
    async fn load(&self) -> Result<Option<(Self::Payload, DateTime<Utc>)>>;

    /// Fetch a fresh payload from the source of truth.
    async fn fetch(&self) -> Result<Self::Payload>;

    /// Persist a freshly fetched payload, overwriting any stored one.
    async fn store(&self, payload: &Self::Payload) -> Result<()>;
}

/// Serve-if-young, else fetch-and-overwrite.
#[derive(Debug, Clone, Copy)]
pub struct ReadThrough {
    max_age: Duration,
}

impl ReadThrough {
    pub fn new(max_age: Duration) -> Self {
        Self { max_age }
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    fn is_fresh(&self, last_updated: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now - last_updated < self.max_age
    }

    /// Resolve the slot to a payload.
    ///
    /// A cache hit inside the window is the only path that performs no
    /// network I/O. On miss or expiry the fetch runs, and the row is
    /// overwritten before the payload is returned; a fetch or store failure
    /// propagates as-is. There is deliberately no stale-on-error fallback:
    /// a failed refresh never falls back to the old row, even though it is
    /// still sitting in the store untouched.
    pub async fn resolve<S: CacheSlot>(&self, slot: &S) -> Result<(S::Payload, Source)> {
        let now = Utc::now();
        if let Some((payload, last_updated)) = slot.load().await? {
            if self.is_fresh(last_updated, now) {
                debug!(
                    domain = slot.domain(),
                    age_secs = (now - last_updated).num_seconds(),
                    "cache hit"
                );
                return Ok((payload, Source::Cache));
            }
            debug!(domain = slot.domain(), "cache row expired, refreshing");
        } else {
            debug!(domain = slot.domain(), "cache miss, fetching");
        }

        let payload = slot.fetch().await?;
        slot.store(&payload).await?;
        Ok((payload, Source::Fresh))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use stratus_core::Error;

    /// Slot double with a scripted store and a fetch counter.
    struct TestSlot {
        stored: Mutex<Option<(String, DateTime<Utc>)>>,
        fetches: AtomicUsize,
        fetch_fails: bool,
        store_fails: bool,
    }

    impl TestSlot {
        fn empty() -> Self {
            Self {
                stored: Mutex::new(None),
                fetches: AtomicUsize::new(0),
                fetch_fails: false,
                store_fails: false,
            }
        }

        fn seeded(payload: &str, age: Duration) -> Self {
            let slot = Self::empty();
            *slot.stored.lock().unwrap() = Some((payload.to_string(), Utc::now() - age));
            slot
        }

        fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CacheSlot for TestSlot {
        type Payload = String;

        fn domain(&self) -> &'static str {
            "test"
        }

        async fn load(&self) -> Result<Option<(String, DateTime<Utc>)>> {
            Ok(self.stored.lock().unwrap().clone())
        }

        async fn fetch(&self) -> Result<String> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fetch_fails {
                return Err(Error::Upstream("provider unavailable".to_string()));
            }
            Ok("fetched".to_string())
        }

        async fn store(&self, payload: &String) -> Result<()> {
            if self.store_fails {
                return Err(Error::Database("commit failed".to_string()));
            }
            *self.stored.lock().unwrap() = Some((payload.clone(), Utc::now()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn miss_fetches_and_writes_back() {
        let slot = TestSlot::empty();
        let policy = ReadThrough::new(Duration::days(1));

        let (payload, source) = policy.resolve(&slot).await.unwrap();
        assert_eq!(payload, "fetched");
        assert_eq!(source, Source::Fresh);
        assert_eq!(slot.fetch_count(), 1);
        assert!(slot.stored.lock().unwrap().is_some());
    }

    #[tokio::test]
    async fn young_row_is_served_without_fetching() {
        let slot = TestSlot::seeded("cached", Duration::hours(1));
        let policy = ReadThrough::new(Duration::days(1));

        let (payload, source) = policy.resolve(&slot).await.unwrap();
        assert_eq!(payload, "cached");
        assert_eq!(source, Source::Cache);
        assert_eq!(slot.fetch_count(), 0);
    }

    #[tokio::test]
    async fn repeated_reads_inside_window_fetch_at_most_once() {
        let slot = TestSlot::empty();
        let policy = ReadThrough::new(Duration::days(1));

        for _ in 0..5 {
            policy.resolve(&slot).await.unwrap();
        }
        assert_eq!(slot.fetch_count(), 1);
    }

    #[tokio::test]
    async fn expired_row_triggers_refresh() {
        let slot = TestSlot::seeded("stale", Duration::days(2));
        let policy = ReadThrough::new(Duration::days(1));

        let (payload, source) = policy.resolve(&slot).await.unwrap();
        assert_eq!(payload, "fetched");
        assert_eq!(source, Source::Fresh);
        assert_eq!(slot.fetch_count(), 1);
    }

    #[tokio::test]
    async fn failed_refresh_does_not_fall_back_to_stale_row() {
        let mut slot = TestSlot::seeded("stale", Duration::days(2));
        slot.fetch_fails = true;
        let policy = ReadThrough::new(Duration::days(1));

        let err = policy.resolve(&slot).await.unwrap_err();
        assert!(matches!(err, Error::Upstream(_)));
        // The old row is left untouched for the next successful refresh.
        assert_eq!(slot.stored.lock().unwrap().as_ref().unwrap().0, "stale");
    }

    #[tokio::test]
    async fn store_failure_surfaces_instead_of_serving_fetched_payload() {
        let mut slot = TestSlot::empty();
        slot.store_fails = true;
        let policy = ReadThrough::new(Duration::days(1));

        let err = policy.resolve(&slot).await.unwrap_err();
        assert!(matches!(err, Error::Database(_)));
    }
}
