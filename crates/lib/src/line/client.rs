//! LINE Messaging API client (https://api.line.me by default).
//! Covers reply, leave group/room and profile lookup.

use crate::line::message::{validate_reply, Message};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_ENDPOINT_BASE: &str = "https://api.line.me";

#[derive(Debug, thiserror::Error)]
pub enum LineError {
    #[error("line request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("line api error: {status} {body}")]
    Api { status: u16, body: String },
    #[error("line response decode failed: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}

/// User profile as returned by GET /v2/bot/profile/{userId}.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub display_name: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub picture_url: Option<String>,
    #[serde(default)]
    pub status_message: Option<String>,
}

/// Outcome of a profile lookup: decoded profile on success, untouched body otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileResponse {
    Succeeded(Profile),
    Failed { status: u16, raw_body: String },
}

/// The calls the bot makes against the platform.
#[async_trait]
pub trait LineApi: Send + Sync {
    /// POST /v2/bot/message/reply with 1-5 messages.
    async fn reply_messages(&self, reply_token: &str, messages: Vec<Message>) -> Result<(), LineError>;

    async fn leave_group(&self, group_id: &str) -> Result<(), LineError>;

    async fn leave_room(&self, room_id: &str) -> Result<(), LineError>;

    async fn get_profile(&self, user_id: &str) -> Result<ProfileResponse, LineError>;

    /// Reply with one text message per entry.
    async fn reply_text(&self, reply_token: &str, texts: &[&str]) -> Result<(), LineError> {
        let messages = texts.iter().map(|t| Message::text(*t)).collect();
        self.reply_messages(reply_token, messages).await
    }

    async fn reply_message(&self, reply_token: &str, message: Message) -> Result<(), LineError> {
        self.reply_messages(reply_token, vec![message]).await
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplyRequest<'a> {
    reply_token: &'a str,
    messages: &'a [Message],
}

/// reqwest-backed client authenticated with the channel access token.
#[derive(Clone)]
pub struct LineClient {
    base_url: String,
    channel_token: String,
    client: reqwest::Client,
}

impl LineClient {
    pub fn new(channel_token: impl Into<String>, base_url: Option<String>) -> Self {
        let base_url = base_url
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_ENDPOINT_BASE.to_string());
        Self {
            base_url,
            channel_token: channel_token.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_empty(&self, url: &str) -> Result<(), LineError> {
        let res = self
            .client
            .post(url)
            .bearer_auth(&self.channel_token)
            .send()
            .await?;
        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(LineError::Api { status, body });
        }
        Ok(())
    }
}

#[async_trait]
impl LineApi for LineClient {
    async fn reply_messages(&self, reply_token: &str, messages: Vec<Message>) -> Result<(), LineError> {
        validate_reply(&messages).map_err(LineError::InvalidMessage)?;
        let url = format!("{}/v2/bot/message/reply", self.base_url);
        let body = ReplyRequest {
            reply_token,
            messages: &messages,
        };
        log::debug!("line reply: token={} messages={}", reply_token, messages.len());
        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.channel_token)
            .json(&body)
            .send()
            .await?;
        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(LineError::Api { status, body });
        }
        Ok(())
    }

    async fn leave_group(&self, group_id: &str) -> Result<(), LineError> {
        let url = format!("{}/v2/bot/group/{}/leave", self.base_url, group_id);
        self.post_empty(&url).await
    }

    async fn leave_room(&self, room_id: &str) -> Result<(), LineError> {
        let url = format!("{}/v2/bot/room/{}/leave", self.base_url, room_id);
        self.post_empty(&url).await
    }

    async fn get_profile(&self, user_id: &str) -> Result<ProfileResponse, LineError> {
        let url = format!("{}/v2/bot/profile/{}", self.base_url, user_id);
        let res = self
            .client
            .get(&url)
            .bearer_auth(&self.channel_token)
            .send()
            .await?;
        let status = res.status();
        let raw_body = res.text().await?;
        if !status.is_success() {
            return Ok(ProfileResponse::Failed {
                status: status.as_u16(),
                raw_body,
            });
        }
        let profile: Profile = serde_json::from_str(&raw_body)?;
        Ok(ProfileResponse::Succeeded(profile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_defaults_and_trims() {
        assert_eq!(LineClient::new("t", None).base_url(), DEFAULT_API_ENDPOINT_BASE);
        assert_eq!(
            LineClient::new("t", Some("http://127.0.0.1:9000/".to_string())).base_url(),
            "http://127.0.0.1:9000"
        );
    }

    #[test]
    fn profile_decodes_optional_fields() {
        let p: Profile = serde_json::from_str(r#"{"displayName":"Alice","userId":"U1"}"#).unwrap();
        assert_eq!(p.display_name, "Alice");
        assert_eq!(p.status_message, None);
    }

    #[test]
    fn reply_request_shape() {
        let messages = vec![Message::text("hi")];
        let body = ReplyRequest {
            reply_token: "r",
            messages: &messages,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "replyToken": "r", "messages": [{ "type": "text", "text": "hi" }] })
        );
    }

    #[tokio::test]
    async fn invalid_reply_is_rejected_before_sending() {
        // Unroutable base: the request must never be attempted.
        let client = LineClient::new("t", Some("http://127.0.0.1:1".to_string()));
        let err = client.reply_messages("r", vec![]).await.unwrap_err();
        assert!(matches!(err, LineError::InvalidMessage(_)));
    }
}
