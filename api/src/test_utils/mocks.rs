//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};

use crate::domain::entities::{NewSchool, School, SchoolId};
use crate::domain::ports::{RateLimitStore, SchoolRepository, WindowHits};
use crate::error::{DomainError, RateLimitError};

// ============================================================================
// In-Memory School Repository
// ============================================================================

#[derive(Default)]
pub struct InMemorySchoolRepository {
    schools: Arc<RwLock<Vec<School>>>,
    fail: AtomicBool,
    create_calls: AtomicUsize,
    find_all_calls: AtomicUsize,
}

impl InMemorySchoolRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a school for testing
    pub fn with_school(self, school: School) -> Self {
        self.schools.write().unwrap().push(school);
        self
    }

    /// Make every call fail as if the database were unreachable
    pub fn failing(self) -> Self {
        self.fail.store(true, Ordering::SeqCst);
        self
    }

    pub fn len(&self) -> usize {
        self.schools.read().unwrap().len()
    }

    /// Number of times `create` was called, successful or not
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn find_all_calls(&self) -> usize {
        self.find_all_calls.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.fail.load(Ordering::SeqCst) {
            Err(DomainError::Database("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SchoolRepository for InMemorySchoolRepository {
    async fn create(&self, new_school: &NewSchool) -> Result<School, DomainError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let mut schools = self.schools.write().unwrap();
        let next_id = schools.iter().map(|s| s.id.0).max().unwrap_or(0) + 1;
        let school = School {
            id: SchoolId(next_id),
            name: new_school.name.clone(),
            address: new_school.address.clone(),
            latitude: new_school.latitude,
            longitude: new_school.longitude,
        };
        schools.push(school.clone());

        Ok(school)
    }

    async fn find_all(&self) -> Result<Vec<School>, DomainError> {
        self.find_all_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        Ok(self.schools.read().unwrap().clone())
    }
}

// ============================================================================
// In-Memory Rate Limit Store
// ============================================================================

/// Fixed-window counters kept in a map, keyed like the Redis store
#[derive(Default)]
pub struct InMemoryRateLimitStore {
    windows: Mutex<HashMap<String, (u64, Instant)>>,
    fail: AtomicBool,
}

impl InMemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail as if Redis were unreachable
    pub fn failing(self) -> Self {
        self.fail.store(true, Ordering::SeqCst);
        self
    }

    /// Current hit count for a key (0 if unseen or expired)
    pub fn hits(&self, key: &str) -> u64 {
        let windows = self.windows.lock().unwrap();
        match windows.get(key) {
            Some((count, resets_at)) if *resets_at > Instant::now() => *count,
            _ => 0,
        }
    }
}

#[async_trait]
impl RateLimitStore for InMemoryRateLimitStore {
    async fn increment(&self, key: &str, window: Duration) -> Result<WindowHits, RateLimitError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(RateLimitError::Unavailable("connection refused".to_string()));
        }

        let now = Instant::now();
        let mut windows = self.windows.lock().unwrap();
        let entry = windows
            .entry(key.to_string())
            .or_insert((0, now + window));
        if entry.1 <= now {
            *entry = (0, now + window);
        }
        entry.0 += 1;

        Ok(WindowHits {
            total: entry.0,
            resets_in: entry.1.saturating_duration_since(now),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_school;

    #[tokio::test]
    async fn school_repository_ids_follow_existing_rows() {
        let repo = InMemorySchoolRepository::new().with_school(test_school());

        let created = repo
            .create(&NewSchool {
                name: "Beta".to_string(),
                address: "2 Main St".to_string(),
                latitude: 0.0,
                longitude: 0.0,
            })
            .await
            .unwrap();

        assert_eq!(created.id, SchoolId(2));
        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Alpha");
        assert_eq!(all[1].name, "Beta");
    }

    #[tokio::test]
    async fn failing_school_repository_errors() {
        let repo = InMemorySchoolRepository::new().failing();

        assert!(matches!(
            repo.find_all().await,
            Err(DomainError::Database(_))
        ));
        assert_eq!(repo.find_all_calls(), 1);
    }

    #[tokio::test]
    async fn rate_limit_store_counts_per_key() {
        let store = InMemoryRateLimitStore::new();
        let window = Duration::from_secs(60);

        store.increment("a", window).await.unwrap();
        let hits = store.increment("a", window).await.unwrap();
        store.increment("b", window).await.unwrap();

        assert_eq!(hits.total, 2);
        assert!(hits.resets_in <= window);
        assert_eq!(store.hits("a"), 2);
        assert_eq!(store.hits("b"), 1);
    }

    #[tokio::test]
    async fn rate_limit_store_resets_after_window() {
        let store = InMemoryRateLimitStore::new();
        let window = Duration::from_millis(20);

        store.increment("a", window).await.unwrap();
        store.increment("a", window).await.unwrap();
        tokio::time::sleep(Duration::from_millis(40)).await;
        let hits = store.increment("a", window).await.unwrap();

        assert_eq!(hits.total, 1);
    }
}
