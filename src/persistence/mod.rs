//! Best-score persistence
//!
//! The simulation only needs a single scalar written through on game over.
//! `MemoryStore` backs native builds and tests; `LocalStorageStore` persists
//! to the browser on wasm32.

/// Storage for the best score across sessions
pub trait ScoreStore {
    /// Stored best score, 0 when nothing has been written yet
    fn best_score(&self) -> u32;
    /// Overwrite the stored best score
    fn set_best_score(&mut self, score: u32);
}

/// In-process store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: Option<u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a best score
    pub fn with_best(score: u32) -> Self {
        Self { best: Some(score) }
    }
}

impl ScoreStore for MemoryStore {
    fn best_score(&self) -> u32 {
        self.best.unwrap_or(0)
    }

    fn set_best_score(&mut self, score: u32) {
        self.best = Some(score);
    }
}

/// Browser LocalStorage store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "jump_jump_best_score";

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorageStore {
    fn best_score(&self) -> u32 {
        if let Some(storage) = Self::storage() {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(best) = serde_json::from_str::<u32>(&json) {
                    log::info!("Loaded best score {}", best);
                    return best;
                }
            }
        }

        log::info!("No best score found, starting fresh");
        0
    }

    fn set_best_score(&mut self, score: u32) {
        if let Some(storage) = Self::storage() {
            if let Ok(json) = serde_json::to_string(&score) {
                match storage.set_item(Self::STORAGE_KEY, &json) {
                    Ok(()) => log::info!("Best score saved ({})", score),
                    Err(_) => log::warn!("Failed to save best score {}", score),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_defaults_to_zero() {
        let store = MemoryStore::new();
        assert_eq!(store.best_score(), 0);
    }

    #[test]
    fn test_memory_store_reads_back_last_write() {
        let mut store = MemoryStore::with_best(30);
        assert_eq!(store.best_score(), 30);
        store.set_best_score(50);
        store.set_best_score(70);
        assert_eq!(store.best_score(), 70);
    }
}
