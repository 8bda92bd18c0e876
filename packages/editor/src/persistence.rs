//! # Local Persistence
//!
//! Saves the lesson being edited to a local key-value cache and restores it
//! on the next session start.
//!
//! Cached value (a JSON string under a fixed key):
//!
//! ```text
//! { "timestamp": <epoch millis>, "data": <Lesson> }
//! ```
//!
//! Restoring never fails. A missing, unreadable, corrupt or stale entry
//! falls back to a fresh document, which is written back right away.

use crate::document::create_document;
use crate::errors::CacheError;
use serde::{Deserialize, Serialize};
use slidecraft_model::{Lesson, RoutingContext};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Cache key for the lesson of the current editing session
pub const SESSION_KEY: &str = "currentLesson";

/// Cached lessons younger than this are restored as-is
pub const DEFAULT_FRESHNESS_WINDOW_MS: i64 = 5_000;

/// Key-value store holding serialized envelopes
pub trait LocalCache {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;
}

/// In-process cache. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalCache for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| CacheError::Unavailable("memory cache lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| CacheError::Unavailable("memory cache lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Directory-backed cache: one `<key>.json` file per entry
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf, CacheError> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(CacheError::Unavailable(format!("invalid cache key: {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl LocalCache for FileCache {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let path = self.entry_path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let path = self.entry_path(key)?;
        std::fs::create_dir_all(&self.dir)?;

        // Write then rename so readers never see half an envelope
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// Wall clock in epoch milliseconds
pub trait Clock {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Manually driven clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct FixedClock {
    millis: Arc<AtomicI64>,
}

impl FixedClock {
    pub fn new(millis: i64) -> Self {
        Self {
            millis: Arc::new(AtomicI64::new(millis)),
        }
    }

    pub fn set(&self, millis: i64) {
        self.millis.store(millis, Ordering::SeqCst);
    }

    pub fn advance(&self, millis: i64) {
        self.millis.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }
}

/// Timestamped wrapper stored in the cache
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub timestamp: i64,
    pub data: Lesson,
}

impl Envelope {
    pub fn age_millis(&self, now: i64) -> i64 {
        now.saturating_sub(self.timestamp)
    }

    /// Fresh when younger than the window. Timestamps from the future count as fresh.
    pub fn is_fresh(&self, now: i64, freshness_window_ms: i64) -> bool {
        self.age_millis(now) < freshness_window_ms
    }
}

/// Write `doc` under `key`, stamped with the current time
pub fn save_lesson(
    cache: &dyn LocalCache,
    clock: &dyn Clock,
    key: &str,
    doc: &Lesson,
) -> Result<(), CacheError> {
    let envelope = Envelope {
        timestamp: clock.now_millis(),
        data: doc.clone(),
    };
    let json = serde_json::to_string(&envelope)?;
    cache.set(key, &json)?;

    info!(lesson_id = %doc.id, slides = doc.slide_count(), key, "Saved lesson");
    Ok(())
}

/// Read the raw envelope under `key`, if any
pub fn load_envelope(cache: &dyn LocalCache, key: &str) -> Result<Option<Envelope>, CacheError> {
    match cache.get(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Restore the cached lesson if it is fresh enough, otherwise start a new one
///
/// A fresh entry is returned regardless of `context`. Anything else creates
/// a document for `context` and persists it immediately.
pub fn restore_lesson(
    cache: &dyn LocalCache,
    clock: &dyn Clock,
    key: &str,
    context: &RoutingContext,
    freshness_window_ms: i64,
) -> Lesson {
    let now = clock.now_millis();

    match load_envelope(cache, key) {
        Ok(Some(envelope)) if envelope.is_fresh(now, freshness_window_ms) => {
            match envelope.data.validate() {
                Ok(()) => {
                    info!(
                        lesson_id = %envelope.data.id,
                        age_ms = envelope.age_millis(now),
                        "Restored cached lesson"
                    );
                    return envelope.data;
                }
                Err(e) => warn!(error = %e, key, "Cached lesson is invalid - starting fresh"),
            }
        }
        Ok(Some(envelope)) => {
            debug!(age_ms = envelope.age_millis(now), freshness_window_ms, "Cached lesson is stale");
        }
        Ok(None) => debug!(key, "No cached lesson"),
        Err(e) => warn!(error = %e, key, "Could not read cached lesson - starting fresh"),
    }

    let doc = create_document(context);
    info!(lesson_id = %doc.id, path_id = %context.path_id, course_id = %context.course_id, "Created lesson");

    if let Err(e) = save_lesson(cache, clock, key, &doc) {
        warn!(error = %e, key, "Could not persist new lesson - continuing in memory");
    }

    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> RoutingContext {
        RoutingContext {
            path_id: "p1".to_string(),
            course_id: "c1".to_string(),
            ..RoutingContext::default()
        }
    }

    #[test]
    fn test_round_trip_within_window() {
        let cache = MemoryCache::new();
        let clock = FixedClock::new(1_000_000);
        let doc = create_document(&context());

        save_lesson(&cache, &clock, SESSION_KEY, &doc).unwrap();
        clock.advance(4_999);

        let restored = restore_lesson(&cache, &clock, SESSION_KEY, &RoutingContext::default(), 5_000);
        assert_eq!(restored, doc);
    }

    #[test]
    fn test_stale_entry_is_replaced() {
        let cache = MemoryCache::new();
        let clock = FixedClock::new(1_000_000);
        let doc = create_document(&context());

        save_lesson(&cache, &clock, SESSION_KEY, &doc).unwrap();
        clock.advance(5_000);

        let restored = restore_lesson(&cache, &clock, SESSION_KEY, &context(), 5_000);
        assert_ne!(restored.id, doc.id);
        assert_eq!(restored.path_id, "p1");

        // The replacement was written back
        let envelope = load_envelope(&cache, SESSION_KEY).unwrap().unwrap();
        assert_eq!(envelope.data, restored);
        assert_eq!(envelope.timestamp, 1_005_000);
    }

    #[test]
    fn test_corrupt_entry_is_treated_as_absent() {
        let cache = MemoryCache::new();
        let clock = FixedClock::new(0);
        cache.set(SESSION_KEY, "{not json").unwrap();

        let restored = restore_lesson(&cache, &clock, SESSION_KEY, &context(), 5_000);
        assert_eq!(restored.slide_count(), 1);
        assert_eq!(restored.course_id, "c1");
    }

    #[test]
    fn test_extreme_timestamp_does_not_panic() {
        let cache = MemoryCache::new();
        let clock = FixedClock::new(5_000);
        let doc = create_document(&context());
        let json = serde_json::json!({ "timestamp": i64::MIN, "data": doc }).to_string();
        cache.set(SESSION_KEY, &json).unwrap();

        let restored = restore_lesson(&cache, &clock, SESSION_KEY, &context(), 5_000);
        assert_ne!(restored.id, doc.id);

        let envelope = Envelope {
            timestamp: i64::MAX,
            data: doc,
        };
        assert!(envelope.is_fresh(i64::MIN, 5_000));
    }

    #[test]
    fn test_invalid_entry_is_treated_as_absent() {
        let cache = MemoryCache::new();
        let clock = FixedClock::new(0);
        let mut doc = create_document(&context());
        doc.slides.push(doc.slides[0].clone());
        save_lesson(&cache, &clock, SESSION_KEY, &doc).unwrap();

        let restored = restore_lesson(&cache, &clock, SESSION_KEY, &context(), 5_000);
        assert_ne!(restored.id, doc.id);
    }

    #[test]
    fn test_future_timestamp_counts_as_fresh() {
        let envelope = Envelope {
            timestamp: 10_000,
            data: create_document(&context()),
        };
        assert!(envelope.is_fresh(2_000, 5_000));
        assert!(!envelope.is_fresh(15_000, 5_000));
    }

    #[test]
    fn test_envelope_shape() {
        let doc = create_document(&context());
        let json = serde_json::to_value(Envelope {
            timestamp: 42,
            data: doc,
        })
        .unwrap();

        assert_eq!(json["timestamp"], 42);
        assert_eq!(json["data"]["pathId"], "p1");
    }

    #[test]
    fn test_file_cache_rejects_path_keys() {
        let cache = FileCache::new("unused");
        assert!(cache.get("../escape").is_err());
        assert!(cache.set("", "x").is_err());
    }
}
