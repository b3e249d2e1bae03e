use std::path::{Path, PathBuf};

use log::debug;
use sled::IVec;

use super::{PlayerId, PlayerRecord, PlayerStore, StorageError, PLAYER_SCHEMA_VERSION};

const TREE_PLAYERS: &str = "players";
const PLAYER_PREFIX: &str = "players:";

/// Sled-backed persistence for player records.
pub struct SledStore {
    _db: sled::Db,
    players: sled::Tree,
    path: PathBuf,
}

impl SledStore {
    /// Open (or create) the store rooted at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let path_ref = path.as_ref();
        std::fs::create_dir_all(path_ref)?;
        let db = sled::open(path_ref)?;
        let players = db.open_tree(TREE_PLAYERS)?;
        debug!("Opened player store at {}", path_ref.display());
        Ok(Self {
            _db: db,
            players,
            path: path_ref.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn player_key(id: &PlayerId) -> Vec<u8> {
        format!("{}{}", PLAYER_PREFIX, id.as_str()).into_bytes()
    }

    fn serialize(record: &PlayerRecord) -> Result<Vec<u8>, StorageError> {
        Ok(bincode::serialize(record)?)
    }

    fn deserialize(bytes: IVec) -> Result<PlayerRecord, StorageError> {
        let record: PlayerRecord = bincode::deserialize(&bytes)?;
        if record.schema_version != PLAYER_SCHEMA_VERSION {
            return Err(StorageError::SchemaMismatch {
                entity: "player",
                expected: PLAYER_SCHEMA_VERSION,
                found: record.schema_version,
            });
        }
        Ok(record)
    }
}

impl PlayerStore for SledStore {
    fn load(&self, id: &PlayerId) -> Result<Option<PlayerRecord>, StorageError> {
        match self.players.get(Self::player_key(id))? {
            Some(bytes) => Ok(Some(Self::deserialize(bytes)?)),
            None => Ok(None),
        }
    }

    fn save(&self, record: &PlayerRecord) -> Result<(), StorageError> {
        let mut record = record.clone();
        record.schema_version = PLAYER_SCHEMA_VERSION;
        let bytes = Self::serialize(&record)?;
        self.players
            .insert(Self::player_key(&record.identity), bytes)?;
        self.players.flush()?;
        Ok(())
    }

    fn insert_new(&self, record: &PlayerRecord) -> Result<bool, StorageError> {
        let bytes = Self::serialize(record)?;
        let swapped = self.players.compare_and_swap(
            Self::player_key(&record.identity),
            None as Option<&[u8]>,
            Some(bytes),
        )?;
        if swapped.is_err() {
            return Ok(false);
        }
        self.players.flush()?;
        Ok(true)
    }

    fn count(&self) -> Result<usize, StorageError> {
        let mut n = 0usize;
        for entry in self.players.scan_prefix(PLAYER_PREFIX.as_bytes()) {
            entry?;
            n += 1;
        }
        Ok(n)
    }
}
