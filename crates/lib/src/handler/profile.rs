//! `profile` command: look up the sender and reply with name and status.

use crate::line::{LineApi, LineError, ProfileResponse};

pub const PROFILE_NEEDS_USER_ID: &str = "Bot can't use profile API without user ID";

pub async fn send_profile(
    api: &dyn LineApi,
    reply_token: &str,
    user_id: Option<&str>,
) -> Result<(), LineError> {
    let Some(user_id) = user_id else {
        return api.reply_text(reply_token, &[PROFILE_NEEDS_USER_ID]).await;
    };

    match api.get_profile(user_id).await? {
        ProfileResponse::Failed { status, raw_body } => {
            log::info!("profile lookup for {} failed with {}", user_id, status);
            api.reply_text(reply_token, &[raw_body.as_str()]).await
        }
        ProfileResponse::Succeeded(profile) => {
            let name = format!("Display name: {}", profile.display_name);
            let status = format!(
                "Status message: {}",
                profile.status_message.as_deref().unwrap_or_default()
            );
            api.reply_text(reply_token, &[name.as_str(), status.as_str()]).await
        }
    }
}
