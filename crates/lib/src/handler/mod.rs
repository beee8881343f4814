//! Event handlers: text dispatch, reply builders and the profile responder.

mod profile;
pub mod replies;
mod text;

pub use profile::{send_profile, PROFILE_NEEDS_USER_ID};
pub use text::{TextCommand, TextMessageHandler};

#[cfg(test)]
pub(crate) mod testing {
    use crate::line::{LineApi, LineError, Message, ProfileResponse};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Reply(String, Vec<Message>),
        LeaveGroup(String),
        LeaveRoom(String),
        GetProfile(String),
    }

    /// Records every call in order; answers profile lookups with a canned response.
    #[derive(Default)]
    pub struct RecordingApi {
        calls: Mutex<Vec<Call>>,
        profile: Option<ProfileResponse>,
        fail: bool,
    }

    impl RecordingApi {
        pub fn with_profile(profile: ProfileResponse) -> Self {
            Self {
                profile: Some(profile),
                ..Self::default()
            }
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: Call) -> Result<(), LineError> {
            self.calls.lock().unwrap().push(call);
            if self.fail {
                return Err(LineError::Api {
                    status: 500,
                    body: "boom".to_string(),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl LineApi for RecordingApi {
        async fn reply_messages(&self, reply_token: &str, messages: Vec<Message>) -> Result<(), LineError> {
            self.record(Call::Reply(reply_token.to_string(), messages))
        }

        async fn leave_group(&self, group_id: &str) -> Result<(), LineError> {
            self.record(Call::LeaveGroup(group_id.to_string()))
        }

        async fn leave_room(&self, room_id: &str) -> Result<(), LineError> {
            self.record(Call::LeaveRoom(room_id.to_string()))
        }

        async fn get_profile(&self, user_id: &str) -> Result<ProfileResponse, LineError> {
            self.record(Call::GetProfile(user_id.to_string()))?;
            Ok(self.profile.clone().unwrap_or(ProfileResponse::Failed {
                status: 404,
                raw_body: "{}".to_string(),
            }))
        }
    }
}
