//! Telegram Bot API transport.
//!
//! Long-polls `getUpdates`, converts updates into [`InboundEvent`]s and
//! performs [`Outbound`] actions with `sendMessage`, `answerCallbackQuery` and
//! `editMessageText`. Only the JSON-over-HTTPS Bot API is used; no webhook.

pub mod types;

use anyhow::{anyhow, Result};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tokio::time::timeout;

use crate::bot::event::{EventKind, InboundEvent, Outbound};
use crate::bot::server::Transport;
use crate::config::TelegramConfig;
use crate::logutil::{escape_log, redact};
use crate::storage::PlayerId;
use types::{
    AnswerCallbackQuery, ApiResponse, EditMessageText, GetUpdates, InlineKeyboardMarkup,
    SendMessage, Update,
};

/// Bot API client that doubles as the bot's [`Transport`].
pub struct TelegramClient {
    client: reqwest::Client,
    api_base: String,
    token: String,
    poll_timeout: u64,
    request_timeout: Duration,
    /// Next `update_id` to ask for; everything below it is acknowledged.
    offset: i64,
}

impl TelegramClient {
    pub fn new(config: &TelegramConfig) -> Result<Self> {
        if config.token.trim().is_empty() {
            return Err(anyhow!("Telegram token is empty"));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            token: config.token.trim().to_string(),
            poll_timeout: config.poll_timeout_seconds,
            request_timeout: Duration::from_secs(
                config.poll_timeout_seconds + config.request_timeout_seconds,
            ),
            offset: 0,
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }

    /// POST a JSON body to a Bot API method and unwrap the response envelope.
    async fn call<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<R> {
        let request = self.client.post(self.method_url(method)).json(body);
        let response = timeout(self.request_timeout, request.send())
            .await
            .map_err(|_| anyhow!("{} timed out after {:?}", method, self.request_timeout))?
            .map_err(|e| anyhow!("{} request failed: {}", method, redact(&e.to_string(), &self.token)))?;

        let status = response.status();
        let envelope: ApiResponse<R> = response
            .json()
            .await
            .map_err(|e| anyhow!("{} returned unreadable JSON ({}): {}", method, status, redact(&e.to_string(), &self.token)))?;

        if !envelope.ok {
            return Err(anyhow!(
                "{} rejected ({}): {}",
                method,
                envelope.error_code.unwrap_or_else(|| i32::from(status.as_u16())),
                envelope.description.unwrap_or_default()
            ));
        }
        envelope
            .result
            .ok_or_else(|| anyhow!("{} returned ok without a result", method))
    }

    pub async fn get_updates(&mut self) -> Result<Vec<Update>> {
        let body = GetUpdates {
            offset: self.offset,
            timeout: self.poll_timeout,
            allowed_updates: vec!["message", "callback_query"],
        };
        let updates: Vec<Update> = self.call("getUpdates", &body).await?;
        if let Some(last) = updates.iter().map(|u| u.update_id).max() {
            self.offset = last + 1;
        }
        Ok(updates)
    }

    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_markup: Option<InlineKeyboardMarkup>,
    ) -> Result<()> {
        let body = SendMessage {
            chat_id,
            text,
            reply_markup,
        };
        let _: serde_json::Value = self.call("sendMessage", &body).await?;
        Ok(())
    }

    pub async fn answer_callback_query(&self, id: &str, text: Option<&str>) -> Result<()> {
        let body = AnswerCallbackQuery {
            callback_query_id: id,
            text,
        };
        let _: serde_json::Value = self.call("answerCallbackQuery", &body).await?;
        Ok(())
    }

    pub async fn edit_message_text(&self, chat_id: i64, message_id: i64, text: &str) -> Result<()> {
        let body = EditMessageText {
            chat_id,
            message_id,
            text,
        };
        let _: serde_json::Value = self.call("editMessageText", &body).await?;
        Ok(())
    }
}

/// Convert one update into an event, or `None` for updates the bot ignores
/// (non-text messages, anonymous senders, empty callbacks).
pub fn event_from_update(update: Update) -> Option<InboundEvent> {
    if let Some(query) = update.callback_query {
        let token = query.data?;
        let sender = PlayerId::from(query.from.id);
        let (chat, message_id) = match &query.message {
            Some(m) => (m.chat.id, Some(m.message_id)),
            None => (query.from.id, None),
        };
        return Some(InboundEvent {
            sender,
            chat,
            kind: EventKind::Callback {
                id: query.id,
                token,
                message_id,
            },
        });
    }
    let message = update.message?;
    let from = message.from?;
    let text = message.text?;
    Some(InboundEvent::from_text(
        PlayerId::from(from.id),
        message.chat.id,
        &text,
    ))
}

impl Transport for TelegramClient {
    async fn poll(&mut self) -> Result<Vec<InboundEvent>> {
        let updates = self.get_updates().await?;
        let mut events = Vec::with_capacity(updates.len());
        for update in updates {
            let update_id = update.update_id;
            match event_from_update(update) {
                Some(ev) => events.push(ev),
                None => debug!("skipping update {}", update_id),
            }
        }
        Ok(events)
    }

    async fn deliver(&mut self, out: Outbound) -> Result<()> {
        match out {
            Outbound::Message {
                chat,
                text,
                keyboard,
            } => {
                let markup = keyboard.as_ref().map(InlineKeyboardMarkup::from);
                self.send_message(chat, &text, markup).await
            }
            Outbound::AnswerCallback { id, text } => {
                self.answer_callback_query(&id, text.as_deref()).await
            }
            Outbound::EditMessage {
                chat,
                message_id,
                text,
            } => {
                if let Err(e) = self.edit_message_text(chat, message_id, &text).await {
                    // the answer toast already carried the outcome
                    warn!("edit of message {} failed: {}", message_id, escape_log(&e.to_string()));
                }
                Ok(())
            }
        }
    }
}
