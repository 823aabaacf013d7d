//! Time Provider Abstraction
//!
//! The store never reads the system clock directly. Timestamps for
//! `createdAt`/`updatedAt` and auto-save scheduling come from a
//! [`TimeProvider`], so tests can drive time deterministically.
//!
//! # Examples
//!
//! ```rust
//! use notepad_core::models::time::{TimeProvider, SystemTimeProvider};
//! use chrono::Utc;
//!
//! let provider = SystemTimeProvider;
//! let now = provider.now();
//! assert!(now <= Utc::now());
//! ```

use chrono::{DateTime, Utc};
use std::sync::Mutex;

/// Trait for providing current time
pub trait TimeProvider: Send + Sync {
    /// Get the current UTC time
    fn now(&self) -> DateTime<Utc>;
}

/// System time provider using actual system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for tests and tooling.
///
/// Interior mutability lets a test keep an `Arc<MockTimeProvider>` and
/// advance it while a `NoteManager` holds another handle to it.
///
/// ```rust
/// use notepad_core::models::time::{TimeProvider, MockTimeProvider};
/// use chrono::Duration;
///
/// let provider = MockTimeProvider::new();
/// let t1 = provider.now();
/// provider.advance(Duration::hours(1));
/// assert_eq!(provider.now() - t1, Duration::hours(1));
/// ```
#[derive(Debug)]
pub struct MockTimeProvider {
    current_time: Mutex<DateTime<Utc>>,
}

impl MockTimeProvider {
    /// Create a new mock time provider starting at the current time
    pub fn new() -> Self {
        Self::with_time(Utc::now())
    }

    /// Create a mock time provider with a specific starting time
    pub fn with_time(time: DateTime<Utc>) -> Self {
        Self {
            current_time: Mutex::new(time),
        }
    }

    pub fn set_time(&self, time: DateTime<Utc>) {
        *self.lock() = time;
    }

    /// Advance time by the given duration
    pub fn advance(&self, duration: chrono::Duration) {
        *self.lock() += duration;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        // A poisoned clock still holds a valid timestamp.
        self.current_time
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TimeProvider for MockTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        *self.lock()
    }
}

impl Default for MockTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_system_time_provider() {
        let provider = SystemTimeProvider;
        let now1 = provider.now();
        let now2 = Utc::now();

        assert!((now2 - now1).num_milliseconds().abs() < 1000);
    }

    #[test]
    fn test_mock_time_provider_with_time() {
        let specific_time = Utc::now() - Duration::days(7);
        let provider = MockTimeProvider::with_time(specific_time);

        assert_eq!(provider.now(), specific_time);
    }

    #[test]
    fn test_mock_time_provider_set_and_advance() {
        let provider = MockTimeProvider::new();
        let base = Utc::now() + Duration::hours(3);

        provider.set_time(base);
        assert_eq!(provider.now(), base);

        provider.advance(Duration::minutes(30));
        assert_eq!(provider.now() - base, Duration::minutes(30));
    }

    #[test]
    fn test_mock_time_provider_shared_handle() {
        let provider = std::sync::Arc::new(MockTimeProvider::new());
        let other: std::sync::Arc<dyn TimeProvider> = provider.clone();
        let start = other.now();

        provider.advance(Duration::seconds(5));

        assert_eq!(other.now() - start, Duration::seconds(5));
    }
}
