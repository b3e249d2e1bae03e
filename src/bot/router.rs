//! Command routing: turns one [`InboundEvent`] into the replies for it.
//!
//! Player progress is read from storage on every event; nothing about a player
//! is cached between events. The states are:
//!
//! ```text
//! (no record) --/start--> AwaitingName --free text (valid)--> Active
//!                              ^                                 |
//!                              +------------- /rename -----------+
//! ```
//!
//! Free text only sets the nickname while the player is `AwaitingName`; for an
//! `Active` player it is ignored. `/show_map` and cell presses work in any
//! registered stage.
//!
//! Failures never escape [`Router::handle`]: each [`BotError`] becomes a reply
//! to the sender, so one bad event cannot affect the next one.

use std::collections::HashSet;

use log::{debug, error, info};

use super::event::{
    Button, CellCoord, ChatId, EventKind, InboundEvent, Keyboard, Outbound, BEGIN_TOKEN,
    CELL_PREFIX,
};
use super::texts;
use crate::config::BotConfig;
use crate::errors::BotError;
use crate::game::{map, outcome, Grid, Terrain};
use crate::logutil::{escape_log, sec_log};
use crate::metrics;
use crate::storage::{
    NicknameOutcome, PlayerId, PlayerRecord, PlayerStore, RegisterOutcome, Stage, StorageError,
};

/// Routes events against a [`PlayerStore`].
pub struct Router<S> {
    store: S,
    admins: HashSet<String>,
    grid_size: usize,
}

impl<S: PlayerStore> Router<S> {
    pub fn new(store: S, config: &BotConfig) -> Self {
        Self {
            store,
            admins: config
                .admins
                .iter()
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty())
                .collect(),
            grid_size: config.grid_size,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_admin(&self, id: &PlayerId) -> bool {
        self.admins.contains(id.as_str())
    }

    /// Handle one event and return everything that should be sent back.
    pub fn handle(&self, event: &InboundEvent) -> Vec<Outbound> {
        metrics::inc_events_handled();
        debug!(
            "event kind={} sender={} chat={}",
            event.kind.label(),
            event.sender,
            event.chat
        );
        match self.dispatch(event) {
            Ok(out) => out,
            Err(e) => self.render_error(event, e),
        }
    }

    fn dispatch(&self, event: &InboundEvent) -> Result<Vec<Outbound>, BotError> {
        let id = &event.sender;
        let chat = event.chat;
        // single activity refresh per event; handlers work from this record
        let record = self.store.touch(id)?;
        match &event.kind {
            EventKind::Command { name, .. } => match name.as_str() {
                "start" => self.start(id, chat),
                "show_map" => self.show_map(id, chat, record),
                "stats" => self.stats(id, chat),
                "rename" => self.rename(id, chat, record),
                "help" => Ok(vec![Outbound::message(chat, texts::HELP)]),
                other => {
                    debug!("unknown command /{} from {}", escape_log(other), id);
                    Ok(vec![Outbound::message(chat, texts::UNKNOWN_COMMAND)])
                }
            },
            EventKind::Text(text) => self.free_text(id, chat, record, text),
            EventKind::Callback {
                id: callback_id,
                token,
                message_id,
            } => {
                if token == BEGIN_TOKEN {
                    self.begin(id, chat, record, callback_id)
                } else if token.starts_with(CELL_PREFIX) {
                    self.select_cell(id, chat, record, callback_id, token, *message_id)
                } else {
                    debug!("ignoring callback token {} from {}", escape_log(token), id);
                    Ok(vec![Outbound::AnswerCallback {
                        id: callback_id.clone(),
                        text: None,
                    }])
                }
            }
        }
    }

    fn start(&self, id: &PlayerId, chat: ChatId) -> Result<Vec<Outbound>, BotError> {
        match self.store.register(id)? {
            RegisterOutcome::Created => {
                metrics::inc_registrations();
                info!("player {} registered", id);
                Ok(vec![Outbound::with_keyboard(
                    chat,
                    texts::WELCOME,
                    Keyboard::single(Button::new(texts::BEGIN_BUTTON, BEGIN_TOKEN)),
                )])
            }
            RegisterOutcome::AlreadyExists => Err(BotError::AlreadyRegistered(id.clone())),
        }
    }

    fn begin(
        &self,
        id: &PlayerId,
        chat: ChatId,
        record: Option<PlayerRecord>,
        callback_id: &str,
    ) -> Result<Vec<Outbound>, BotError> {
        let record = registered(id, record)?;
        let ack = Outbound::AnswerCallback {
            id: callback_id.to_string(),
            text: None,
        };
        let reply = match (record.stage, record.nickname.as_deref()) {
            (Stage::Active, Some(name)) => texts::already_named(name),
            _ => texts::ASK_NAME.to_string(),
        };
        Ok(vec![ack, Outbound::message(chat, reply)])
    }

    fn rename(
        &self,
        id: &PlayerId,
        chat: ChatId,
        record: Option<PlayerRecord>,
    ) -> Result<Vec<Outbound>, BotError> {
        registered(id, record)?;
        self.store.set_stage(id, Stage::AwaitingName)?;
        Ok(vec![Outbound::message(chat, texts::ASK_NAME)])
    }

    fn free_text(
        &self,
        id: &PlayerId,
        chat: ChatId,
        record: Option<PlayerRecord>,
        text: &str,
    ) -> Result<Vec<Outbound>, BotError> {
        let record = registered(id, record)?;
        if record.stage != Stage::AwaitingName {
            debug!("ignoring free text from active player {}", id);
            return Ok(Vec::new());
        }
        match self.store.set_nickname(id, text.trim())? {
            NicknameOutcome::Accepted(name) => {
                info!("player {} is now known as {}", id, escape_log(&name));
                Ok(vec![Outbound::message(chat, texts::greeting(&name))])
            }
            NicknameOutcome::Rejected(reason) => Err(reason.into()),
        }
    }

    fn show_map(
        &self,
        id: &PlayerId,
        chat: ChatId,
        record: Option<PlayerRecord>,
    ) -> Result<Vec<Outbound>, BotError> {
        let record = registered(id, record)?;
        let grid = match stored_grid(&record)? {
            Some(grid) => grid,
            None => {
                let grid =
                    map::generate(self.grid_size, &Terrain::ALL).map_err(StorageError::from)?;
                self.store.set_grid(id, &grid)?;
                metrics::inc_maps_generated();
                info!("generated {}x{} map for {}", grid.size(), grid.size(), id);
                grid
            }
        };
        Ok(vec![Outbound::with_keyboard(
            chat,
            texts::MAP_INTRO,
            Keyboard::for_grid(&grid),
        )])
    }

    fn select_cell(
        &self,
        id: &PlayerId,
        chat: ChatId,
        record: Option<PlayerRecord>,
        callback_id: &str,
        token: &str,
        message_id: Option<i64>,
    ) -> Result<Vec<Outbound>, BotError> {
        let record = registered(id, record)?;
        let coord = CellCoord::parse(token)
            .ok_or_else(|| BotError::OutOfBounds(format!("bad token {}", escape_log(token))))?;
        let grid = stored_grid(&record)?.ok_or_else(|| BotError::NoMap(id.clone()))?;
        let terrain = grid.get(coord.row, coord.col).ok_or_else(|| {
            BotError::OutOfBounds(format!(
                "{} on a {}x{} map",
                coord.label(),
                grid.size(),
                grid.size()
            ))
        })?;
        let text = outcome::for_terrain(terrain);
        metrics::inc_cells_revealed();
        debug!("{} selected {} ({})", id, coord.label(), terrain.name());

        let mut out = vec![Outbound::AnswerCallback {
            id: callback_id.to_string(),
            text: Some(text.to_string()),
        }];
        if let Some(message_id) = message_id {
            out.push(Outbound::EditMessage {
                chat,
                message_id,
                text: text.to_string(),
            });
        }
        Ok(out)
    }

    fn stats(&self, id: &PlayerId, chat: ChatId) -> Result<Vec<Outbound>, BotError> {
        if !self.is_admin(id) {
            return Err(BotError::Unauthorized(id.clone()));
        }
        let total = self.store.count_players()?;
        info!("admin {} requested stats ({} players)", id, total);
        Ok(vec![Outbound::message(chat, texts::player_count(total))])
    }

    fn render_error(&self, event: &InboundEvent, err: BotError) -> Vec<Outbound> {
        let text = match &err {
            BotError::Validation(_) => texts::NAME_REJECTED,
            BotError::NotRegistered(_) => texts::NOT_REGISTERED,
            BotError::AlreadyRegistered(_) => texts::ALREADY_REGISTERED,
            BotError::OutOfBounds(_) => texts::OUT_OF_BOUNDS,
            BotError::NoMap(_) => texts::NO_MAP,
            BotError::Unauthorized(_) => {
                sec_log!("denied admin command from {}", event.sender);
                texts::ADMIN_ONLY
            }
            BotError::Storage(e) => {
                metrics::inc_event_failures();
                error!(
                    "storage failure handling {} from {}: {}",
                    event.kind.label(),
                    event.sender,
                    e
                );
                texts::GENERIC_FAILURE
            }
        };
        if !err.is_internal() {
            debug!("{} -> {} ({})", event.sender, err.kind(), err);
        }
        match &event.kind {
            EventKind::Callback { id, .. } => vec![Outbound::AnswerCallback {
                id: id.clone(),
                text: Some(text.to_string()),
            }],
            _ => vec![Outbound::message(event.chat, text)],
        }
    }
}

fn registered(id: &PlayerId, record: Option<PlayerRecord>) -> Result<PlayerRecord, BotError> {
    record.ok_or_else(|| BotError::NotRegistered(id.clone()))
}

fn stored_grid(record: &PlayerRecord) -> Result<Option<Grid>, StorageError> {
    record
        .grid
        .as_deref()
        .map(Grid::decode)
        .transpose()
        .map_err(StorageError::from)
}
