//! Small key-value persistence for usage counts and display preferences.
//!
//! Storage is injected through [`KeyValueStore`] so the same trackers work
//! against a JSON file on disk, an in-memory map in tests, or whatever the
//! host provides. Values are JSON-encoded strings.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog;
use crate::error::SlotError;

/// Key holding the `{zone_id: count}` usage map.
pub const USAGE_KEY: &str = "timeZoneUsage";
/// Key holding the 24-hour clock preference.
pub const TIME_FORMAT_KEY: &str = "timeFormat24Hour";

/// String key-value persistence.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, SlotError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), SlotError>;
}

// ── Stores ──────────────────────────────────────────────────────────────────

/// Store that lives only as long as the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, SlotError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SlotError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a single JSON object file.
///
/// A missing file reads as empty. Every `set` rewrites the whole file,
/// creating parent directories as needed.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, SlotError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(SlotError::Storage(format!(
                    "reading {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };
        serde_json::from_str(&text)
            .map_err(|e| SlotError::Storage(format!("parsing {}: {}", self.path.display(), e)))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, SlotError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SlotError> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                SlotError::Storage(format!("creating {}: {}", parent.display(), e))
            })?;
        }
        let text = serde_json::to_string_pretty(&entries)
            .map_err(|e| SlotError::Storage(e.to_string()))?;
        fs::write(&self.path, text)
            .map_err(|e| SlotError::Storage(format!("writing {}: {}", self.path.display(), e)))
    }
}

// ── Usage counts ────────────────────────────────────────────────────────────

/// Counts how often each zone has been picked, for ordering the catalog.
#[derive(Debug)]
pub struct UsageTracker<S> {
    store: S,
}

impl<S: KeyValueStore> UsageTracker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Current counts. A missing or unreadable value reads as no usage.
    pub fn counts(&self) -> BTreeMap<String, u64> {
        let raw = match self.store.get(USAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return BTreeMap::new(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read zone usage");
                return BTreeMap::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring malformed zone usage");
            BTreeMap::new()
        })
    }

    /// Count one more pick of `zone_id`. UTC pseudo-zones are not counted.
    ///
    /// Returns the new count, or `None` for an uncounted pseudo-zone.
    pub fn record(&mut self, zone_id: &str) -> Result<Option<u64>, SlotError> {
        if catalog::is_pseudo_zone(zone_id) {
            return Ok(None);
        }
        let mut counts = self.counts();
        let count = counts.entry(zone_id.to_string()).or_insert(0);
        *count += 1;
        let updated = *count;

        let encoded = serde_json::to_string(&counts).map_err(|e| SlotError::Storage(e.to_string()))?;
        self.store.set(USAGE_KEY, &encoded)?;
        Ok(Some(updated))
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}

// ── Preferences ─────────────────────────────────────────────────────────────

/// Display preferences that survive between sessions.
#[derive(Debug)]
pub struct Preferences<S> {
    store: S,
}

impl<S: KeyValueStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Whether clocks render in 24-hour form. Defaults to `false`.
    pub fn use_24_hour(&self) -> bool {
        match self.store.get(TIME_FORMAT_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or(false),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(error = %e, "could not read time format preference");
                false
            }
        }
    }

    pub fn set_use_24_hour(&mut self, value: bool) -> Result<(), SlotError> {
        self.store.set(TIME_FORMAT_KEY, &value.to_string())
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}
