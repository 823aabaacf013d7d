//! Periodic auto-save
//!
//! The host owns the timer loop and calls [`AutoSaver::tick`] whenever it
//! likes; the saver decides whether a save is due. Each due tick restarts
//! the interval, whether or not there was anything to save.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use super::note_manager::NoteManager;
use crate::config::AutoSaveConfig;
use crate::store::StoreError;

/// Longer intervals are clamped to one year
const MAX_INTERVAL_MINUTES: u64 = 60 * 24 * 365;

#[derive(Debug, Clone)]
pub struct AutoSaver {
    enabled: bool,
    interval: Duration,
    last_checkpoint: DateTime<Utc>,
}

impl AutoSaver {
    pub fn new(config: &AutoSaveConfig, now: DateTime<Utc>) -> Self {
        let minutes = config.interval_minutes.min(MAX_INTERVAL_MINUTES) as i64;
        Self {
            enabled: config.enabled,
            interval: Duration::minutes(minutes),
            last_checkpoint: now,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.enabled && now - self.last_checkpoint >= self.interval
    }

    /// Save `manager` to its data file if the interval has elapsed and
    /// there are unsaved changes. Returns whether a save happened.
    ///
    /// A failed save still restarts the interval, so a broken data path is
    /// retried on the next period rather than on every tick.
    pub fn tick(&mut self, manager: &mut NoteManager, now: DateTime<Utc>) -> Result<bool, StoreError> {
        if !self.is_due(now) {
            return Ok(false);
        }
        self.last_checkpoint = now;

        let saved = manager.save_if_dirty(None)?;
        debug!(saved, "Auto-save tick");
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;
    use crate::models::time::{MockTimeProvider, TimeProvider};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn setup(dir: &TempDir) -> (Arc<MockTimeProvider>, NoteManager, AutoSaver) {
        let clock = Arc::new(MockTimeProvider::new());
        let config = StoreConfig {
            autosave: AutoSaveConfig {
                enabled: true,
                interval_minutes: 5,
            },
            ..StoreConfig::default()
        }
        .with_data_path(dir.path().join("notes.json"));
        let saver = AutoSaver::new(&config.autosave, clock.now());
        let manager = NoteManager::with_time_provider(config, clock.clone());
        (clock, manager, saver)
    }

    #[test]
    fn test_saves_only_when_due_and_dirty() {
        let dir = TempDir::new().unwrap();
        let (clock, mut manager, mut saver) = setup(&dir);
        manager.create_note(Some("draft"));

        clock.advance(Duration::minutes(4));
        assert!(!saver.tick(&mut manager, clock.now()).unwrap());
        assert!(manager.is_dirty());

        clock.advance(Duration::minutes(1));
        assert!(saver.tick(&mut manager, clock.now()).unwrap());
        assert!(!manager.is_dirty());
        assert!(dir.path().join("notes.json").exists());

        clock.advance(Duration::minutes(5));
        assert!(!saver.tick(&mut manager, clock.now()).unwrap());
    }

    #[test]
    fn test_due_tick_restarts_interval_when_clean() {
        let dir = TempDir::new().unwrap();
        let (clock, mut manager, mut saver) = setup(&dir);

        clock.advance(Duration::minutes(5));
        assert!(!saver.tick(&mut manager, clock.now()).unwrap());

        manager.create_note(None);
        clock.advance(Duration::minutes(3));
        assert!(!saver.tick(&mut manager, clock.now()).unwrap());
        clock.advance(Duration::minutes(2));
        assert!(saver.tick(&mut manager, clock.now()).unwrap());
    }

    #[test]
    fn test_disabled_never_saves() {
        let now = Utc::now();
        let saver = AutoSaver::new(&AutoSaveConfig::default(), now);
        assert!(!saver.is_enabled());
        assert!(!saver.is_due(now + Duration::days(1)));
        assert_eq!(saver.interval(), Duration::minutes(5));
    }
}
