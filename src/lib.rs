//! # Empirebot - Legendary Empire Chat Game
//!
//! A small chat-bot exploration game. A player registers with `/start`, names a
//! hero, opens a private randomly generated map and reveals it one cell at a
//! time through inline buttons. Each terrain has its own (mostly fatal) fate.
//!
//! ## Features
//!
//! - **Per-player maps**: generated once on first view, then stable forever.
//! - **Explicit naming flow**: free text only renames while a name is awaited.
//! - **Safe persistence**: sled records with a plain-text grid encoding and a
//!   dedicated parser; nothing stored is ever evaluated.
//! - **Admin stats**: configurable allow-list of administrator identities.
//! - **Telegram transport**: Bot API long polling via `reqwest`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use empirebot::bot::BotServer;
//! use empirebot::config::Config;
//! use empirebot::storage::SledStore;
//! use empirebot::telegram::TelegramClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load_or_default("config.toml").await?;
//!     config.validate(true)?;
//!     let store = SledStore::open(config.storage.player_db_path())?;
//!     let transport = TelegramClient::new(&config.telegram)?;
//!     BotServer::new(&config, store, transport).run().await
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`bot`] - event model, command router, server loop
//! - [`game`] - terrain alphabet, map generation and encoding, outcome table
//! - [`storage`] - player persistence behind the [`storage::PlayerStore`] trait
//! - [`telegram`] - Bot API transport
//! - [`config`] - configuration loading, environment overrides, validation
//! - [`validation`] - nickname rules
//! - [`errors`] - router error kinds
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   Telegram      │ ← Transport (long polling)
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │   Bot Server    │ ← Routing and replies
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │   Storage       │ ← Player records
//! │   Layer         │
//! └─────────────────┘
//! ```

pub mod bot;
pub mod config;
pub mod errors;
pub mod game;
pub mod logutil;
pub mod metrics;
pub mod storage;
pub mod telegram;
pub mod validation;
