//! Webhook request body: the subset of LINE webhook events this bot reacts to.

use serde::Deserialize;

/// POST body sent by the LINE platform to the webhook URL.
#[derive(Debug, Deserialize)]
pub struct WebhookRequest {
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub events: Vec<Event>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Event {
    Message(MessageEvent),
    /// follow, unfollow, join, leave, postback, beacon, ...
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEvent {
    pub reply_token: String,
    pub source: Source,
    pub message: MessageContent,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessageContent {
    Text { id: String, text: String },
    /// image, video, audio, file, location, sticker
    #[serde(other)]
    Unsupported,
}

/// Where an event came from. Group and room events carry the sender only when the user consented.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Source {
    User {
        #[serde(rename = "userId")]
        user_id: String,
    },
    Group {
        #[serde(rename = "groupId")]
        group_id: String,
        #[serde(rename = "userId", default)]
        user_id: Option<String>,
    },
    Room {
        #[serde(rename = "roomId")]
        room_id: String,
        #[serde(rename = "userId", default)]
        user_id: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    User,
    Group,
    Room,
}

impl Source {
    pub fn kind(&self) -> SourceKind {
        match self {
            Source::User { .. } => SourceKind::User,
            Source::Group { .. } => SourceKind::Group,
            Source::Room { .. } => SourceKind::Room,
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            Source::User { user_id } => Some(user_id),
            Source::Group { user_id, .. } | Source::Room { user_id, .. } => user_id.as_deref(),
        }
    }

    pub fn group_id(&self) -> Option<&str> {
        match self {
            Source::Group { group_id, .. } => Some(group_id),
            _ => None,
        }
    }

    pub fn room_id(&self) -> Option<&str> {
        match self {
            Source::Room { room_id, .. } => Some(room_id),
            _ => None,
        }
    }
}

/// A decoded text message: the only input the dispatcher sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMessageEvent {
    pub reply_token: String,
    pub text: String,
    pub source: Source,
}

impl TextMessageEvent {
    pub fn new(reply_token: impl Into<String>, text: impl Into<String>, source: Source) -> Self {
        Self {
            reply_token: reply_token.into(),
            text: text.into(),
            source,
        }
    }

    pub fn sender_user_id(&self) -> Option<&str> {
        self.source.user_id()
    }

    pub fn kind(&self) -> SourceKind {
        self.source.kind()
    }
}

impl Event {
    /// Returns the text message carried by this event, if it is one.
    pub fn into_text_message(self) -> Option<TextMessageEvent> {
        let Event::Message(ev) = self else {
            return None;
        };
        match ev.message {
            MessageContent::Text { text, .. } => Some(TextMessageEvent {
                reply_token: ev.reply_token,
                text,
                source: ev.source,
            }),
            MessageContent::Unsupported => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: serde_json::Value) -> WebhookRequest {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn user_text_message() {
        let req = parse(serde_json::json!({
            "destination": "U0000",
            "events": [{
                "type": "message",
                "replyToken": "r1",
                "timestamp": 1462629479859u64,
                "source": { "type": "user", "userId": "U123" },
                "message": { "id": "m1", "type": "text", "text": "profile" }
            }]
        }));
        let ev = req.events.into_iter().next().unwrap().into_text_message().unwrap();
        assert_eq!(ev.reply_token, "r1");
        assert_eq!(ev.text, "profile");
        assert_eq!(ev.kind(), SourceKind::User);
        assert_eq!(ev.sender_user_id(), Some("U123"));
    }

    #[test]
    fn group_and_room_sources() {
        let req = parse(serde_json::json!({
            "events": [
                {
                    "type": "message",
                    "replyToken": "r1",
                    "source": { "type": "group", "groupId": "G1" },
                    "message": { "id": "m1", "type": "text", "text": "bye" }
                },
                {
                    "type": "message",
                    "replyToken": "r2",
                    "source": { "type": "room", "roomId": "R1", "userId": "U9" },
                    "message": { "id": "m2", "type": "text", "text": "bye" }
                }
            ]
        }));
        let evs: Vec<_> = req
            .events
            .into_iter()
            .filter_map(Event::into_text_message)
            .collect();
        assert_eq!(evs[0].kind(), SourceKind::Group);
        assert_eq!(evs[0].source.group_id(), Some("G1"));
        assert_eq!(evs[0].sender_user_id(), None);
        assert_eq!(evs[1].kind(), SourceKind::Room);
        assert_eq!(evs[1].source.room_id(), Some("R1"));
        assert_eq!(evs[1].sender_user_id(), Some("U9"));
    }

    #[test]
    fn non_text_events_are_skipped() {
        let req = parse(serde_json::json!({
            "events": [
                {
                    "type": "follow",
                    "replyToken": "r1",
                    "source": { "type": "user", "userId": "U1" }
                },
                {
                    "type": "message",
                    "replyToken": "r2",
                    "source": { "type": "user", "userId": "U1" },
                    "message": { "id": "m1", "type": "sticker", "packageId": "1", "stickerId": "1" }
                }
            ]
        }));
        assert_eq!(req.events.len(), 2);
        assert!(req.events.into_iter().all(|e| e.into_text_message().is_none()));
    }

    #[test]
    fn empty_verification_body() {
        let req = parse(serde_json::json!({ "destination": "U0", "events": [] }));
        assert!(req.events.is_empty());
    }
}
