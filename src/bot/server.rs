use anyhow::Result;
use log::{debug, info, warn};
use std::future::Future;
use tokio::time::Duration;

use super::event::{InboundEvent, Outbound};
use super::router::Router;
use crate::config::Config;
use crate::metrics;
use crate::storage::PlayerStore;

/// Pause after a failed poll before trying again.
const POLL_ERROR_PAUSE: Duration = Duration::from_secs(3);

/// A chat transport: the source of inbound events and the sink for replies.
pub trait Transport {
    /// Wait for the next batch of events. An empty batch is normal (poll timeout).
    fn poll(&mut self) -> impl Future<Output = Result<Vec<InboundEvent>>> + Send;

    /// Perform one outbound action.
    fn deliver(&mut self, out: Outbound) -> impl Future<Output = Result<()>> + Send;
}

/// # Bot Server
///
/// Owns the [`Router`] and a [`Transport`] and shuttles events between them.
///
/// Events are handled strictly one after another in arrival order. There is
/// no per-player locking beyond that ordering; see [`crate::storage`] for what
/// that means for concurrent writes.
///
/// ```rust,no_run
/// use empirebot::bot::BotServer;
/// use empirebot::config::Config;
/// use empirebot::storage::SledStore;
/// use empirebot::telegram::TelegramClient;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let config = Config::load_or_default("config.toml").await?;
///     let store = SledStore::open(config.storage.player_db_path())?;
///     let transport = TelegramClient::new(&config.telegram)?;
///     let mut server = BotServer::new(&config, store, transport);
///     server.run().await
/// }
/// ```
pub struct BotServer<S, T> {
    name: String,
    router: Router<S>,
    transport: T,
}

impl<S: PlayerStore, T: Transport> BotServer<S, T> {
    pub fn new(config: &Config, store: S, transport: T) -> Self {
        Self {
            name: config.bot.name.clone(),
            router: Router::new(store, &config.bot),
            transport,
        }
    }

    pub fn router(&self) -> &Router<S> {
        &self.router
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Route each event and deliver its replies. Delivery failures are logged
    /// and skipped so the remaining replies and events still go out.
    pub async fn process_events(&mut self, events: Vec<InboundEvent>) {
        for event in events {
            for out in self.router.handle(&event) {
                if let Err(e) = self.transport.deliver(out).await {
                    warn!("delivery to chat {} failed: {}", event.chat, e);
                }
            }
        }
    }

    /// Poll and process until Ctrl-C.
    pub async fn run(&mut self) -> Result<()> {
        info!("Bot '{}' started", self.name);
        loop {
            tokio::select! {
                polled = self.transport.poll() => {
                    match polled {
                        Ok(events) => {
                            if !events.is_empty() {
                                debug!("received {} event(s)", events.len());
                            }
                            self.process_events(events).await;
                        }
                        Err(e) => {
                            warn!("poll failed: {}", e);
                            tokio::time::sleep(POLL_ERROR_PAUSE).await;
                        }
                    }
                }

                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal");
                    break;
                }
            }
        }
        info!("Bot '{}' stopped ({})", self.name, metrics::snapshot());
        Ok(())
    }
}
