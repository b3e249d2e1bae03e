//! Error kinds surfaced by the command router.
//!
//! Every variant except [`BotError::Storage`] is an expected outcome of user
//! input and is answered locally with an informational reply.

use thiserror::Error;

use crate::storage::{PlayerId, StorageError};
use crate::validation::NicknameError;

#[derive(Debug, Error)]
pub enum BotError {
    /// Nickname outside the allowed length.
    #[error("invalid nickname: {0}")]
    Validation(#[from] NicknameError),

    /// Map or cell action before `/start`.
    #[error("player {0} is not registered")]
    NotRegistered(PlayerId),

    #[error("player {0} is already registered")]
    AlreadyRegistered(PlayerId),

    /// Malformed or stale cell coordinate.
    #[error("cell out of bounds: {0}")]
    OutOfBounds(String),

    /// Admin-only command from a non-admin.
    #[error("player {0} is not an administrator")]
    Unauthorized(PlayerId),

    /// Cell pressed before the player's map was ever generated.
    #[error("player {0} has no map yet")]
    NoMap(PlayerId),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl BotError {
    /// Short stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            BotError::Validation(_) => "validation",
            BotError::NotRegistered(_) => "not_registered",
            BotError::AlreadyRegistered(_) => "already_registered",
            BotError::OutOfBounds(_) => "out_of_bounds",
            BotError::Unauthorized(_) => "unauthorized",
            BotError::NoMap(_) => "no_map",
            BotError::Storage(_) => "storage",
        }
    }

    /// Only storage failures are unexpected.
    pub fn is_internal(&self) -> bool {
        matches!(self, BotError::Storage(_))
    }
}
