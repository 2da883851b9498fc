//! User settings
//!
//! Each setting is persisted under its own storage key as a plain string.
//! Saved changes are broadcast to subscribers so a live timer can pick up new
//! durations without a restart.

use crate::persistence::{
    KeyValueStore, BREAK_DURATION_KEY, FOCUS_DURATION_KEY, NOTIFICATIONS_KEY, SOUND_KEY,
};
use anyhow::Result;
use std::sync::mpsc::{self, Receiver, Sender};
use tracing::{debug, warn};

pub const DEFAULT_FOCUS_MINUTES: u32 = 25;
pub const MIN_FOCUS_MINUTES: u32 = 5;
pub const MAX_FOCUS_MINUTES: u32 = 60;

pub const DEFAULT_BREAK_MINUTES: u32 = 5;
pub const MIN_BREAK_MINUTES: u32 = 1;
pub const MAX_BREAK_MINUTES: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub notifications_enabled: bool,
    pub sound_enabled: bool,
    pub focus_minutes: u32,
    pub break_minutes: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            notifications_enabled: true,
            sound_enabled: true,
            focus_minutes: DEFAULT_FOCUS_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
        }
    }
}

impl Settings {
    /// Read every key, falling back to defaults for missing or unreadable values
    pub fn load(storage: &impl KeyValueStore) -> Self {
        let defaults = Self::default();

        Self {
            notifications_enabled: read_key(storage, NOTIFICATIONS_KEY)
                .and_then(|raw| parse_flag(&raw))
                .unwrap_or(defaults.notifications_enabled),
            sound_enabled: read_key(storage, SOUND_KEY)
                .and_then(|raw| parse_flag(&raw))
                .unwrap_or(defaults.sound_enabled),
            focus_minutes: read_key(storage, FOCUS_DURATION_KEY)
                .map(|raw| parse_focus_minutes(&raw))
                .unwrap_or(defaults.focus_minutes),
            break_minutes: read_key(storage, BREAK_DURATION_KEY)
                .map(|raw| parse_break_minutes(&raw))
                .unwrap_or(defaults.break_minutes),
        }
    }

    /// Write every key
    pub fn save(&self, storage: &impl KeyValueStore) -> Result<()> {
        storage.set(NOTIFICATIONS_KEY, &self.notifications_enabled.to_string())?;
        storage.set(SOUND_KEY, &self.sound_enabled.to_string())?;
        storage.set(FOCUS_DURATION_KEY, &self.focus_minutes.to_string())?;
        storage.set(BREAK_DURATION_KEY, &self.break_minutes.to_string())?;
        Ok(())
    }

    pub fn focus_seconds(&self) -> u32 {
        self.focus_minutes * 60
    }

    pub fn break_seconds(&self) -> u32 {
        self.break_minutes * 60
    }
}

fn read_key(storage: &impl KeyValueStore, key: &str) -> Option<String> {
    match storage.get(key) {
        Ok(value) => value,
        Err(e) => {
            warn!(key, error = %e, "could not read setting, using default");
            None
        }
    }
}

/// "true" / "false" (case-insensitive); anything else is unreadable
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Clamp a focus duration to [5, 60] minutes
pub fn clamp_focus_minutes(minutes: i64) -> u32 {
    minutes.clamp(MIN_FOCUS_MINUTES as i64, MAX_FOCUS_MINUTES as i64) as u32
}

/// Clamp a break duration to [1, 30] minutes
pub fn clamp_break_minutes(minutes: i64) -> u32 {
    minutes.clamp(MIN_BREAK_MINUTES as i64, MAX_BREAK_MINUTES as i64) as u32
}

/// Parse user input for focus minutes: clamped when numeric, default otherwise
pub fn parse_focus_minutes(raw: &str) -> u32 {
    match raw.trim().parse::<i64>() {
        Ok(minutes) => clamp_focus_minutes(minutes),
        Err(_) => DEFAULT_FOCUS_MINUTES,
    }
}

/// Parse user input for break minutes: clamped when numeric, default otherwise
pub fn parse_break_minutes(raw: &str) -> u32 {
    match raw.trim().parse::<i64>() {
        Ok(minutes) => clamp_break_minutes(minutes),
        Err(_) => DEFAULT_BREAK_MINUTES,
    }
}

/// Process-wide settings change signal
#[derive(Debug, Default)]
pub struct SettingsBus {
    subscribers: Vec<Sender<Settings>>,
}

impl SettingsBus {
    pub fn subscribe(&mut self) -> Receiver<Settings> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Deliver to every live subscriber, forgetting dropped ones
    pub fn publish(&mut self, settings: Settings) {
        self.subscribers.retain(|tx| tx.send(settings).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

/// Owns the persisted settings and their change signal
pub struct SettingsStore<S: KeyValueStore> {
    storage: S,
    current: Settings,
    bus: SettingsBus,
}

impl<S: KeyValueStore> SettingsStore<S> {
    pub fn load(storage: S) -> Self {
        let current = Settings::load(&storage);
        debug!(?current, "settings loaded");
        Self {
            storage,
            current,
            bus: SettingsBus::default(),
        }
    }

    pub fn current(&self) -> Settings {
        self.current
    }

    pub fn subscribe(&mut self) -> Receiver<Settings> {
        self.bus.subscribe()
    }

    /// Apply, broadcast and persist new settings. Durations are clamped first.
    /// The in-memory value and broadcast take effect even if the write fails.
    pub fn update(&mut self, settings: Settings) -> Result<()> {
        let settings = Settings {
            focus_minutes: clamp_focus_minutes(settings.focus_minutes as i64),
            break_minutes: clamp_break_minutes(settings.break_minutes as i64),
            ..settings
        };

        self.current = settings;
        self.bus.publish(settings);
        debug!(?settings, subscribers = self.bus.subscriber_count(), "settings updated");
        settings.save(&self.storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{FileStorage, MemoryStorage};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_when_storage_empty() {
        let settings = Settings::load(&MemoryStorage::new());
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.focus_seconds(), 1500);
        assert_eq!(settings.break_seconds(), 300);
    }

    #[test]
    fn test_save_and_load() {
        let storage = MemoryStorage::new();
        let settings = Settings {
            notifications_enabled: false,
            sound_enabled: false,
            focus_minutes: 45,
            break_minutes: 10,
        };
        settings.save(&storage).unwrap();

        assert_eq!(storage.get(NOTIFICATIONS_KEY).unwrap().as_deref(), Some("false"));
        assert_eq!(storage.get(FOCUS_DURATION_KEY).unwrap().as_deref(), Some("45"));
        assert_eq!(Settings::load(&storage), settings);
    }

    #[test]
    fn test_load_clamps_and_defaults() {
        let storage = MemoryStorage::new();
        storage.set(FOCUS_DURATION_KEY, "300").unwrap();
        storage.set(BREAK_DURATION_KEY, "abc").unwrap();
        storage.set(SOUND_KEY, "maybe").unwrap();

        let settings = Settings::load(&storage);
        assert_eq!(settings.focus_minutes, 60);
        assert_eq!(settings.break_minutes, DEFAULT_BREAK_MINUTES);
        assert!(settings.sound_enabled);
    }

    #[test]
    fn test_clamping_bounds() {
        assert_eq!(clamp_focus_minutes(1), 5);
        assert_eq!(clamp_focus_minutes(90), 60);
        assert_eq!(clamp_focus_minutes(30), 30);
        assert_eq!(clamp_break_minutes(0), 1);
        assert_eq!(clamp_break_minutes(-4), 1);
        assert_eq!(clamp_break_minutes(45), 30);
    }

    #[test]
    fn test_parse_minutes_input() {
        assert_eq!(parse_focus_minutes(" 40 "), 40);
        assert_eq!(parse_focus_minutes("2"), 5);
        assert_eq!(parse_focus_minutes(""), DEFAULT_FOCUS_MINUTES);
        assert_eq!(parse_break_minutes("100"), 30);
        assert_eq!(parse_break_minutes("x"), DEFAULT_BREAK_MINUTES);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("true"), Some(true));
        assert_eq!(parse_flag("FALSE"), Some(false));
        assert_eq!(parse_flag("1"), None);
    }

    #[test]
    fn test_bus_delivers_to_all_and_drops_closed() {
        let mut bus = SettingsBus::default();
        let first = bus.subscribe();
        let second = bus.subscribe();
        drop(second);

        let settings = Settings {
            focus_minutes: 30,
            ..Settings::default()
        };
        bus.publish(settings);

        assert_eq!(first.try_recv().unwrap(), settings);
        assert_eq!(bus.subscriber_count(), 1);
    }

    #[test]
    fn test_store_update_persists_and_broadcasts() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(temp_dir.path()).unwrap();
        let mut store = SettingsStore::load(storage.clone());
        let rx = store.subscribe();

        store
            .update(Settings {
                focus_minutes: 100,
                break_minutes: 0,
                ..Settings::default()
            })
            .unwrap();

        let received = rx.try_recv().unwrap();
        assert_eq!(received.focus_minutes, 60);
        assert_eq!(received.break_minutes, 1);
        assert_eq!(store.current(), received);
        assert_eq!(Settings::load(&storage), received);
    }
}
