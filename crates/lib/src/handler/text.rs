//! Text message dispatch: exact-match command table with a default arm.

use crate::handler::profile::send_profile;
use crate::handler::replies;
use crate::line::{LineApi, LineError, SourceKind, TextMessageEvent};

/// Every reply the bot knows, keyed by the literal text that triggers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextCommand {
    Profile,
    Bye,
    Confirm,
    Buttons,
    Carousel,
    Imagemap,
    DiagnosisResult,
    HospitalList,
    GlaucomaRiskFactors,
    AppUsage,
    Fallback,
}

const COMMANDS: &[(&str, TextCommand)] = &[
    ("profile", TextCommand::Profile),
    ("bye", TextCommand::Bye),
    ("confirm", TextCommand::Confirm),
    ("buttons", TextCommand::Buttons),
    ("carousel", TextCommand::Carousel),
    ("imagemap", TextCommand::Imagemap),
    ("ขอดูผลการวินิจฉัย", TextCommand::DiagnosisResult),
    ("ขอรายชื่อโรงพยาบาลที่เกี่ยวข้อง", TextCommand::HospitalList),
    ("ปัจจัยเสี่ยงของต้อหิน", TextCommand::GlaucomaRiskFactors),
    ("ขอทราบวิธีการใช้งาน App", TextCommand::AppUsage),
];

impl TextCommand {
    /// Case-sensitive, whole-string match. No trimming.
    pub fn from_text(text: &str) -> Self {
        COMMANDS
            .iter()
            .find(|(key, _)| *key == text)
            .map(|(_, cmd)| *cmd)
            .unwrap_or(TextCommand::Fallback)
    }
}

/// Handles one text message event against the platform API.
pub struct TextMessageHandler<'a> {
    api: &'a dyn LineApi,
    /// scheme://host used for static asset links in templates.
    base_url: &'a str,
}

impl<'a> TextMessageHandler<'a> {
    pub fn new(api: &'a dyn LineApi, base_url: &'a str) -> Self {
        Self { api, base_url }
    }

    pub async fn handle(&self, event: &TextMessageEvent) -> Result<(), LineError> {
        let text = event.text.as_str();
        let reply_token = event.reply_token.as_str();
        log::info!("Got text message from {}: {}", reply_token, text);

        match TextCommand::from_text(text) {
            TextCommand::Profile => send_profile(self.api, reply_token, event.sender_user_id()).await,
            TextCommand::Bye => self.leave(event).await,
            TextCommand::Confirm => self.api.reply_message(reply_token, replies::confirm()).await,
            TextCommand::Buttons => {
                self.api
                    .reply_message(reply_token, replies::buttons(self.base_url))
                    .await
            }
            TextCommand::Carousel => {
                self.api
                    .reply_message(reply_token, replies::carousel(self.base_url))
                    .await
            }
            TextCommand::Imagemap => {
                self.api
                    .reply_message(reply_token, replies::imagemap(self.base_url))
                    .await
            }
            TextCommand::DiagnosisResult => self.reply(reply_token, replies::DIAGNOSIS_RESULT).await,
            TextCommand::HospitalList => self.reply(reply_token, replies::HOSPITAL_LIST).await,
            TextCommand::GlaucomaRiskFactors => {
                self.reply(reply_token, replies::GLAUCOMA_RISK_FACTORS).await
            }
            TextCommand::AppUsage => self.reply(reply_token, replies::APP_USAGE).await,
            TextCommand::Fallback => self.reply(reply_token, replies::DEFAULT_REPLY).await,
        }
    }

    async fn reply(&self, reply_token: &str, text: &str) -> Result<(), LineError> {
        self.api.reply_text(reply_token, &[text]).await
    }

    async fn leave(&self, event: &TextMessageEvent) -> Result<(), LineError> {
        let reply_token = event.reply_token.as_str();
        match (event.kind(), event.source.room_id(), event.source.group_id()) {
            (SourceKind::Room, Some(room_id), _) => {
                self.reply(reply_token, replies::LEAVING_ROOM).await?;
                self.api.leave_room(room_id).await
            }
            (SourceKind::Group, _, Some(group_id)) => {
                self.reply(reply_token, replies::LEAVING_GROUP).await?;
                self.api.leave_group(group_id).await
            }
            _ => self.reply(reply_token, replies::CANNOT_LEAVE_USER_CHAT).await,
        }
    }
}
