use std::time::Duration;

use serde::Deserialize;
use tracing::{error, info};
use ureq::Agent;

/// Telegram Bot API client encapsulating the token-scoped base URL and the
/// fixed destination chat.
#[derive(Clone)]
pub struct Telegram {
    agent: Agent,
    base_url: String,
    chat_id: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdatesResponse {
    pub ok: bool,
    #[serde(default)]
    pub result: Vec<Update>,
}

#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
}

impl Telegram {
    pub fn new(token: &str, chat_id: &str) -> Self {
        Self::with_base_url(format!("https://api.telegram.org/bot{}", token), chat_id)
    }

    /// Construct against a different base URL (used by tests to avoid network).
    pub fn with_base_url(base_url: impl Into<String>, chat_id: &str) -> Self {
        // Timeout leaves headroom over the 25s getUpdates long poll.
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(35)))
            .build()
            .new_agent();
        Self { agent, base_url: base_url.into(), chat_id: chat_id.to_string() }
    }

    /// Send a Markdown message to the fixed alert chat.
    pub fn send_message(&self, text: &str) -> Result<(), String> {
        self.send_to(&self.chat_id, text)
    }

    /// Reply to the chat an inbound message came from.
    pub fn reply(&self, chat_id: i64, text: &str) -> Result<(), String> {
        self.send_to(&chat_id.to_string(), text)
    }

    fn send_to(&self, chat_id: &str, text: &str) -> Result<(), String> {
        let url = format!("{}/sendMessage", self.base_url);
        let payload = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
            "parse_mode": "Markdown",
        });
        match self.agent.post(&url).send_json(payload) {
            Ok(resp) => {
                info!(status = resp.status().as_u16(), "Sent Telegram message");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Failed to send Telegram message");
                Err(format!("Failed to send Telegram message: {}", e))
            }
        }
    }

    /// Long-poll for inbound updates starting at `offset`.
    pub fn get_updates(&self, offset: i64, timeout_secs: u64) -> Result<Vec<Update>, String> {
        let url = format!(
            "{}/getUpdates?offset={}&timeout={}",
            self.base_url, offset, timeout_secs
        );
        let response = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| format!("getUpdates request failed: {}", e))?;
        let mut body = response.into_body();
        let text = body
            .read_to_string()
            .map_err(|e| format!("failed to read getUpdates body: {}", e))?;
        let parsed: UpdatesResponse = serde_json::from_str(&text)
            .map_err(|e| format!("failed to deserialize getUpdates response: {}", e))?;
        if !parsed.ok {
            return Err("getUpdates returned ok=false".to_string());
        }
        Ok(parsed.result)
    }

    /// Discard any updates queued while the bot was down and return the offset
    /// to resume polling from.
    pub fn drop_pending(&self) -> Result<i64, String> {
        let pending = self.get_updates(-1, 0)?;
        Ok(pending.last().map(|u| u.update_id + 1).unwrap_or(0))
    }
}
