//! High-score persistence port
//!
//! The score system talks to a [`HighScoreStore`] rather than any ambient
//! global, so tests substitute an in-memory stub and the web build plugs in
//! LocalStorage. The stored format is a plain integer string under a single
//! key. Store failures are never fatal: the session keeps its in-memory value.

/// Storage key for the persisted high score
pub const HIGH_SCORE_KEY: &str = "pixel-rush-high-score";

/// Get/set port for the single persisted high-score scalar
pub trait HighScoreStore {
    /// Read the stored high score. `None` if absent or unreadable.
    fn load(&self) -> Option<u64>;

    /// Write a new high score. Returns false if the write failed.
    fn save(&mut self, score: u64) -> bool;
}

/// In-memory store for tests and headless use
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store (e.g. to simulate an existing record)
    pub fn with_score(score: u64) -> Self {
        Self { value: Some(score) }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Option<u64> {
        self.value
    }

    fn save(&mut self, score: u64) -> bool {
        self.value = Some(score);
        true
    }
}

/// LocalStorage-backed store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn load(&self) -> Option<u64> {
        let storage = Self::storage()?;
        let raw = storage.get_item(HIGH_SCORE_KEY).ok()??;
        match raw.trim().parse::<u64>() {
            Ok(score) => Some(score),
            Err(_) => {
                log::warn!("discarding unparseable high score {raw:?}");
                None
            }
        }
    }

    fn save(&mut self, score: u64) -> bool {
        match Self::storage() {
            Some(storage) => storage.set_item(HIGH_SCORE_KEY, &score.to_string()).is_ok(),
            None => false,
        }
    }
}
