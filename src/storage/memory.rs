use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::{PlayerId, PlayerRecord, PlayerStore, StorageError};

/// In-process store. Nothing survives the process; writes are visible to the
/// next call immediately.
#[derive(Debug, Default)]
pub struct MemoryStore {
    players: Mutex<HashMap<PlayerId, PlayerRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, HashMap<PlayerId, PlayerRecord>> {
        // records are replaced whole, so a poisoned map is still consistent
        self.players.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl PlayerStore for MemoryStore {
    fn load(&self, id: &PlayerId) -> Result<Option<PlayerRecord>, StorageError> {
        Ok(self.guard().get(id).cloned())
    }

    fn save(&self, record: &PlayerRecord) -> Result<(), StorageError> {
        self.guard()
            .insert(record.identity.clone(), record.clone());
        Ok(())
    }

    fn insert_new(&self, record: &PlayerRecord) -> Result<bool, StorageError> {
        let mut players = self.guard();
        if players.contains_key(&record.identity) {
            return Ok(false);
        }
        players.insert(record.identity.clone(), record.clone());
        Ok(true)
    }

    fn count(&self) -> Result<usize, StorageError> {
        Ok(self.guard().len())
    }
}
