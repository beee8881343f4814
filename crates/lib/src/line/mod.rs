//! LINE Messaging API plumbing: webhook events, outbound messages, signature check and HTTP client.

mod client;
mod event;
mod message;
pub mod signature;

pub use client::{LineApi, LineClient, LineError, Profile, ProfileResponse, DEFAULT_API_ENDPOINT_BASE};
pub use event::{Event, MessageContent, MessageEvent, Source, SourceKind, TextMessageEvent, WebhookRequest};
pub use message::{
    validate_reply, BaseSize, CarouselColumn, ImagemapAction, ImagemapArea, Message, Template, TemplateAction,
};
