//! # Storage Module - Player Persistence
//!
//! One record per player, keyed by the identity the chat transport assigns.
//! A record carries the nickname, the explicit progress [`Stage`] and the
//! player's map in its encoded text form (see [`crate::game::map`]).
//!
//! ## Backends
//!
//! [`PlayerStore`] is the seam the router talks to. Backends only supply four
//! primitives (`load`, `save`, `insert_new`, `count`); every contract operation
//! is built on top of those so behaviour is identical across engines:
//!
//! - [`SledStore`] - embedded sled database, durable flush after every write
//! - [`MemoryStore`] - mutex-guarded map for tests and throwaway runs
//!
//! ## Usage
//!
//! ```rust,no_run
//! use empirebot::storage::{PlayerId, PlayerStore, RegisterOutcome, SledStore};
//!
//! # fn main() -> Result<(), empirebot::storage::StorageError> {
//! let store = SledStore::open("./data/players")?;
//! let id = PlayerId::from("42");
//! assert_eq!(store.register(&id)?, RegisterOutcome::Created);
//! assert_eq!(store.register(&id)?, RegisterOutcome::AlreadyExists);
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//!
//! Apart from `insert_new` (create-once), operations are plain
//! read-modify-write. Two concurrent writes for the same player resolve as
//! last-writer-wins; in particular two simultaneous first map views can both
//! generate a grid and the later `set_grid` is the one that sticks.

pub mod errors;
pub mod memory;
pub mod sled_store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::game::Grid;
use crate::validation::{NicknameError, NicknameRules};

pub use errors::StorageError;
pub use memory::MemoryStore;
pub use sled_store::SledStore;

pub const PLAYER_SCHEMA_VERSION: u8 = 1;

/// Opaque player identity assigned by the chat transport.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        PlayerId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        PlayerId(s.to_string())
    }
}

impl From<i64> for PlayerId {
    fn from(n: i64) -> Self {
        PlayerId(n.to_string())
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a registered player is in the naming flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// The next free-text message is taken as the character name.
    AwaitingName,
    /// Named; free text is ignored.
    Active,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::AwaitingName => "awaiting_name",
            Stage::Active => "active",
        }
    }
}

/// Stored state for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub identity: PlayerId,
    pub nickname: Option<String>,
    pub stage: Stage,
    /// Encoded grid text, `None` until the first map view.
    pub grid: Option<String>,
    pub registered_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
    pub schema_version: u8,
}

impl PlayerRecord {
    pub fn new(identity: PlayerId) -> Self {
        let now = Utc::now();
        Self {
            identity,
            nickname: None,
            stage: Stage::AwaitingName,
            grid: None,
            registered_at: now,
            last_active: now,
            schema_version: PLAYER_SCHEMA_VERSION,
        }
    }

    pub fn touch(&mut self) {
        self.last_active = Utc::now();
    }
}

/// Result of [`PlayerStore::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    Created,
    AlreadyExists,
}

/// Result of [`PlayerStore::set_nickname`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NicknameOutcome {
    /// Stored; carries the trimmed name.
    Accepted(String),
    /// Nothing was written.
    Rejected(NicknameError),
}

/// Player persistence contract.
///
/// Every mutating call has committed durably by the time it returns.
pub trait PlayerStore {
    /// Fetch a record, `None` when the identity never registered.
    fn load(&self, id: &PlayerId) -> Result<Option<PlayerRecord>, StorageError>;

    /// Overwrite (or create) a record.
    fn save(&self, record: &PlayerRecord) -> Result<(), StorageError>;

    /// Insert only if no record exists for the identity. Returns `false` when
    /// one already existed; the existing record is left untouched.
    fn insert_new(&self, record: &PlayerRecord) -> Result<bool, StorageError>;

    /// Number of stored records.
    fn count(&self) -> Result<usize, StorageError>;

    fn register(&self, id: &PlayerId) -> Result<RegisterOutcome, StorageError> {
        if self.insert_new(&PlayerRecord::new(id.clone()))? {
            Ok(RegisterOutcome::Created)
        } else {
            Ok(RegisterOutcome::AlreadyExists)
        }
    }

    fn get_player(&self, id: &PlayerId) -> Result<Option<PlayerRecord>, StorageError> {
        self.load(id)
    }

    /// Validate and store a nickname exactly as given, moving the player to
    /// [`Stage::Active`]. Out-of-bounds names leave the record unchanged.
    fn set_nickname(&self, id: &PlayerId, name: &str) -> Result<NicknameOutcome, StorageError> {
        let mut record = self.require(id)?;
        let name = match NicknameRules::default().validate(name) {
            Ok(name) => name,
            Err(e) => return Ok(NicknameOutcome::Rejected(e)),
        };
        record.nickname = Some(name.clone());
        record.stage = Stage::Active;
        record.touch();
        self.save(&record)?;
        Ok(NicknameOutcome::Accepted(name))
    }

    fn set_stage(&self, id: &PlayerId, stage: Stage) -> Result<(), StorageError> {
        let mut record = self.require(id)?;
        record.stage = stage;
        record.touch();
        self.save(&record)
    }

    fn get_grid(&self, id: &PlayerId) -> Result<Option<Grid>, StorageError> {
        let Some(record) = self.load(id)? else {
            return Ok(None);
        };
        match record.grid {
            Some(text) => Ok(Some(Grid::decode(&text)?)),
            None => Ok(None),
        }
    }

    fn set_grid(&self, id: &PlayerId, grid: &Grid) -> Result<(), StorageError> {
        let mut record = self.require(id)?;
        record.grid = Some(grid.encode());
        record.touch();
        self.save(&record)
    }

    /// Refresh `last_active` and return the refreshed record, `None` for
    /// unknown identities (nothing is written for them).
    fn touch(&self, id: &PlayerId) -> Result<Option<PlayerRecord>, StorageError> {
        let Some(mut record) = self.load(id)? else {
            return Ok(None);
        };
        record.touch();
        self.save(&record)?;
        Ok(Some(record))
    }

    fn count_players(&self) -> Result<usize, StorageError> {
        self.count()
    }

    #[doc(hidden)]
    fn require(&self, id: &PlayerId) -> Result<PlayerRecord, StorageError> {
        self.load(id)?
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }
}

impl<S: PlayerStore + ?Sized> PlayerStore for &S {
    fn load(&self, id: &PlayerId) -> Result<Option<PlayerRecord>, StorageError> {
        (**self).load(id)
    }
    fn save(&self, record: &PlayerRecord) -> Result<(), StorageError> {
        (**self).save(record)
    }
    fn insert_new(&self, record: &PlayerRecord) -> Result<bool, StorageError> {
        (**self).insert_new(record)
    }
    fn count(&self) -> Result<usize, StorageError> {
        (**self).count()
    }
}

impl<S: PlayerStore + ?Sized> PlayerStore for std::sync::Arc<S> {
    fn load(&self, id: &PlayerId) -> Result<Option<PlayerRecord>, StorageError> {
        (**self).load(id)
    }
    fn save(&self, record: &PlayerRecord) -> Result<(), StorageError> {
        (**self).save(record)
    }
    fn insert_new(&self, record: &PlayerRecord) -> Result<bool, StorageError> {
        (**self).insert_new(record)
    }
    fn count(&self) -> Result<usize, StorageError> {
        (**self).count()
    }
}
