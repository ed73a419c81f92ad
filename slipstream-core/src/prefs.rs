//! Preference persistence for quality selection state.
//!
//! A preference is a single scalar value stored under a string key in a
//! pluggable key/value backend. Backends act as best-effort caches, not a
//! durability guarantee: an unavailable backend degrades to a no-op store
//! with a logged warning, never an error.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::warn;

/// Minimal get/set contract every preference backend implements.
///
/// Implementations must swallow failures of the underlying medium; callers
/// treat a missing value and a failed read identically.
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Writes `value` under `key`, best-effort.
    fn set(&self, key: &str, value: &str);
}

/// Named storage areas a host runtime may expose.
///
/// This is the fixed allow-list; anything else a host offers goes through
/// [`StorageSelection::Custom`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageArea {
    /// Scoped to the current session, discarded when it ends.
    Session,
    /// Persists across sessions.
    Local,
}

impl fmt::Display for StorageArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageArea::Session => write!(f, "session"),
            StorageArea::Local => write!(f, "local"),
        }
    }
}

/// Runtime capability that probes for named storage areas.
///
/// Injected at construction so the core never reaches for process globals.
/// Returning `None` means the area is unsupported or currently unavailable.
pub trait StorageProvider {
    /// Opens the named area, or `None` if the host cannot supply it.
    fn open(&self, area: StorageArea) -> Option<Arc<dyn KeyValueStore>>;
}

/// Provider for hosts that expose no named storage areas at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStorageProvider;

impl StorageProvider for NoStorageProvider {
    fn open(&self, _area: StorageArea) -> Option<Arc<dyn KeyValueStore>> {
        None
    }
}

/// How a preference slot picks its backend.
///
/// Resolved exactly once at construction into a concrete store.
#[derive(Clone, Default)]
pub enum StorageSelection {
    /// A named area, validated against the host's [`StorageProvider`].
    Named(StorageArea),
    /// A caller-supplied store used as-is.
    Custom(Arc<dyn KeyValueStore>),
    /// No configuration: an in-memory store for the process lifetime.
    #[default]
    None,
}

impl fmt::Debug for StorageSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageSelection::Named(area) => f.debug_tuple("Named").field(area).finish(),
            StorageSelection::Custom(_) => f.write_str("Custom(..)"),
            StorageSelection::None => f.write_str("None"),
        }
    }
}

/// In-memory store, the fallback when no backend is configured.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with a single entry.
    pub fn seeded(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.values.lock().insert(key.into(), value.into());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values.lock().insert(key.to_owned(), value.to_owned());
    }
}

/// Store that remembers nothing. Used when a named area is unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct NopStore;

impl KeyValueStore for NopStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) {}
}

/// One persisted scalar: a (store, key, default) triple.
///
/// `get` falls back to the default when the store has no value; `set` is
/// fire-and-forget. The slot never fails.
#[derive(Clone)]
pub struct PreferenceSlot {
    store: Arc<dyn KeyValueStore>,
    key: String,
    default: Option<String>,
}

impl fmt::Debug for PreferenceSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreferenceSlot")
            .field("key", &self.key)
            .field("default", &self.default)
            .finish_non_exhaustive()
    }
}

impl PreferenceSlot {
    /// Resolves a storage selection into a concrete slot.
    ///
    /// A named area the provider cannot open logs a warning and degrades to
    /// a [`NopStore`]; no configuration yields a process-lifetime
    /// [`MemoryStore`]. `initial` seeds the value returned while the store
    /// holds nothing under `key`.
    pub fn resolve(
        selection: StorageSelection,
        provider: &dyn StorageProvider,
        key: impl Into<String>,
        initial: Option<&str>,
    ) -> Self {
        let store: Arc<dyn KeyValueStore> = match selection {
            StorageSelection::Named(area) => match provider.open(area) {
                Some(store) => store,
                None => {
                    warn!(%area, "unsupported storage area, preferences will not persist");
                    Arc::new(NopStore)
                }
            },
            StorageSelection::Custom(store) => store,
            StorageSelection::None => Arc::new(MemoryStore::new()),
        };

        Self {
            store,
            key: key.into(),
            default: initial.map(str::to_owned),
        }
    }

    /// Creates a slot over an already-resolved store.
    pub fn with_store(
        store: Arc<dyn KeyValueStore>,
        key: impl Into<String>,
        initial: Option<&str>,
    ) -> Self {
        Self {
            store,
            key: key.into(),
            default: initial.map(str::to_owned),
        }
    }

    /// Returns the stored value, or the configured default when absent.
    pub fn get(&self) -> Option<String> {
        self.store.get(&self.key).or_else(|| self.default.clone())
    }

    /// Stores `value`, best-effort.
    pub fn set(&self, value: &str) {
        self.store.set(&self.key, value);
    }

    /// Reads the slot as a boolean flag. Anything but `"true"` is false.
    pub fn get_flag(&self) -> bool {
        self.get().as_deref() == Some("true")
    }

    /// Stores a boolean flag as `"true"`/`"false"`.
    pub fn set_flag(&self, value: bool) {
        self.set(if value { "true" } else { "false" });
    }
}
