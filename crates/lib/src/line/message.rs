//! Outbound message payloads, serialised in the Messaging API JSON shape.

use serde::Serialize;

const MAX_ALT_TEXT: usize = 400;
const MAX_REPLY_MESSAGES: usize = 5;
const MAX_BUTTONS_ACTIONS: usize = 4;
const MAX_CAROUSEL_COLUMNS: usize = 10;
const MAX_COLUMN_ACTIONS: usize = 3;
const MAX_IMAGEMAP_ACTIONS: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Message {
    Text {
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    Template {
        alt_text: String,
        template: Template,
    },
    #[serde(rename_all = "camelCase")]
    Imagemap {
        base_url: String,
        alt_text: String,
        base_size: BaseSize,
        actions: Vec<ImagemapAction>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Template {
    Confirm {
        text: String,
        actions: Vec<TemplateAction>,
    },
    #[serde(rename_all = "camelCase")]
    Buttons {
        #[serde(skip_serializing_if = "Option::is_none")]
        thumbnail_image_url: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        text: String,
        actions: Vec<TemplateAction>,
    },
    Carousel {
        columns: Vec<CarouselColumn>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselColumn {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub text: String,
    pub actions: Vec<TemplateAction>,
}

/// Action attached to a template button.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TemplateAction {
    /// Sends `text` back as if the user typed it.
    Message { label: String, text: String },
    /// Delivers `data` in a postback event.
    Postback { label: String, data: String },
    /// Opens `uri`.
    Uri { label: String, uri: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BaseSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImagemapArea {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl ImagemapArea {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ImagemapAction {
    #[serde(rename_all = "camelCase")]
    Uri { link_uri: String, area: ImagemapArea },
    Message { text: String, area: ImagemapArea },
}

impl Message {
    pub fn text(text: impl Into<String>) -> Self {
        Message::Text { text: text.into() }
    }

    pub fn template(alt_text: impl Into<String>, template: Template) -> Self {
        Message::Template {
            alt_text: alt_text.into(),
            template,
        }
    }

    /// Checks the structural limits the platform enforces, so a bad payload fails before the request.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Message::Text { text } => {
                if text.is_empty() {
                    return Err("text message must not be empty".to_string());
                }
                Ok(())
            }
            Message::Template { alt_text, template } => {
                check_alt_text(alt_text)?;
                template.validate()
            }
            Message::Imagemap {
                base_url,
                alt_text,
                actions,
                ..
            } => {
                check_alt_text(alt_text)?;
                if base_url.is_empty() {
                    return Err("imagemap baseUrl must not be empty".to_string());
                }
                if actions.is_empty() || actions.len() > MAX_IMAGEMAP_ACTIONS {
                    return Err(format!(
                        "imagemap needs 1-{} actions, got {}",
                        MAX_IMAGEMAP_ACTIONS,
                        actions.len()
                    ));
                }
                Ok(())
            }
        }
    }
}

impl Template {
    fn validate(&self) -> Result<(), String> {
        match self {
            Template::Confirm { actions, .. } => {
                if actions.len() != 2 {
                    return Err(format!("confirm template needs exactly 2 actions, got {}", actions.len()));
                }
                Ok(())
            }
            Template::Buttons { actions, .. } => {
                if actions.is_empty() || actions.len() > MAX_BUTTONS_ACTIONS {
                    return Err(format!(
                        "buttons template needs 1-{} actions, got {}",
                        MAX_BUTTONS_ACTIONS,
                        actions.len()
                    ));
                }
                Ok(())
            }
            Template::Carousel { columns } => {
                if columns.is_empty() || columns.len() > MAX_CAROUSEL_COLUMNS {
                    return Err(format!(
                        "carousel needs 1-{} columns, got {}",
                        MAX_CAROUSEL_COLUMNS,
                        columns.len()
                    ));
                }
                let count = columns[0].actions.len();
                for c in columns {
                    if c.actions.is_empty() || c.actions.len() > MAX_COLUMN_ACTIONS {
                        return Err(format!(
                            "carousel column needs 1-{} actions, got {}",
                            MAX_COLUMN_ACTIONS,
                            c.actions.len()
                        ));
                    }
                    if c.actions.len() != count {
                        return Err("carousel columns must have the same number of actions".to_string());
                    }
                }
                Ok(())
            }
        }
    }
}

fn check_alt_text(alt_text: &str) -> Result<(), String> {
    let n = alt_text.chars().count();
    if n == 0 || n > MAX_ALT_TEXT {
        return Err(format!("altText must be 1-{} characters, got {}", MAX_ALT_TEXT, n));
    }
    Ok(())
}

/// Validate a whole reply: 1-5 messages, each valid.
pub fn validate_reply(messages: &[Message]) -> Result<(), String> {
    if messages.is_empty() || messages.len() > MAX_REPLY_MESSAGES {
        return Err(format!(
            "a reply carries 1-{} messages, got {}",
            MAX_REPLY_MESSAGES,
            messages.len()
        ));
    }
    messages.iter().try_for_each(Message::validate)
}
