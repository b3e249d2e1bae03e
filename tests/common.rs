//! Test utilities shared by the integration tests.

use empirebot::bot::event::{EventKind, InboundEvent, Outbound};
use empirebot::bot::Router;
use empirebot::config::BotConfig;
use empirebot::storage::{PlayerId, SledStore};

pub const ADMIN: &str = "99";

/// A router over a fresh sled store in a temp dir. Keep the `TempDir` alive
/// for as long as the router is used.
#[allow(dead_code)]
pub fn sled_router() -> (tempfile::TempDir, Router<SledStore>) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = SledStore::open(dir.path().join("players")).expect("store");
    (dir, Router::new(store, &bot_config()))
}

pub fn bot_config() -> BotConfig {
    BotConfig {
        admins: vec![ADMIN.to_string()],
        ..BotConfig::default()
    }
}

#[allow(dead_code)]
pub fn command(sender: &str, name: &str) -> InboundEvent {
    InboundEvent::from_text(PlayerId::from(sender), chat_of(sender), &format!("/{}", name))
}

#[allow(dead_code)]
pub fn text(sender: &str, body: &str) -> InboundEvent {
    InboundEvent::from_text(PlayerId::from(sender), chat_of(sender), body)
}

#[allow(dead_code)]
pub fn press(sender: &str, token: &str, message_id: i64) -> InboundEvent {
    InboundEvent {
        sender: PlayerId::from(sender),
        chat: chat_of(sender),
        kind: EventKind::Callback {
            id: format!("cb-{}-{}", sender, token),
            token: token.to_string(),
            message_id: Some(message_id),
        },
    }
}

fn chat_of(sender: &str) -> i64 {
    sender.parse().unwrap_or(0)
}

/// Concatenate every text carried by a reply batch.
#[allow(dead_code)]
pub fn texts(out: &[Outbound]) -> Vec<String> {
    out.iter().filter_map(|o| o.text().map(str::to_string)).collect()
}
