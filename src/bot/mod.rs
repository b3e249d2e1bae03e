//! # Bot Core Module
//!
//! Everything between the chat transport and storage.
//!
//! ## Components
//!
//! - [`event`] - inbound events, outbound actions, button keyboards and callback tokens
//! - [`router`] - per-event command routing and the player state machine
//! - [`server`] - the polling loop and the [`Transport`] seam
//! - [`texts`] - reply texts
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  Transport      │ ← Telegram long polling (or a test double)
//! └─────────────────┘
//!          │ InboundEvent / Outbound
//! ┌─────────────────┐
//! │  BotServer      │ ← sequential event loop
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │  Router         │ ← registration, naming, map, cells, stats
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │  PlayerStore    │ ← sled / memory
//! └─────────────────┘
//! ```
//!
//! ## Commands
//!
//! - `/start` - register; replies with a welcome and a "begin" button
//! - `/show_map` - show the player's map as a grid of cell buttons
//! - `/rename` - ask for a new character name
//! - `/stats` - admin only: number of registered players
//! - `/help` - command list
//!
//! Free text names the character while a name is awaited. Cell buttons carry
//! `cell_<row>-<col>` tokens and answer with the terrain's outcome.

pub mod event;
pub mod router;
pub mod server;
pub mod texts;

pub use event::{InboundEvent, Outbound};
pub use router::Router;
pub use server::{BotServer, Transport};
