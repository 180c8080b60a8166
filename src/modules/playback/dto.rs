use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::device::DeviceCommand;
use super::model::{PlaybackContext, Platform};
use super::session::SessionSnapshot;
use crate::modules::subscription::gate::GateDecision;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct OpenSessionRequest {
    /// Movie or episode id. In the series context a series id opens its
    /// first episode.
    #[validate(length(min = 1, message = "Content ID is required"))]
    pub content_id: String,
    pub context: PlaybackContext,
    #[serde(default)]
    pub platform: Platform,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SwitchEpisodeRequest {
    #[validate(length(min = 1, message = "Episode ID is required"))]
    pub episode_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionView {
    pub session_id: Uuid,
    #[serde(flatten)]
    pub snapshot: SessionSnapshot,
    /// Device commands for the client to apply, oldest first.
    pub commands: Vec<DeviceCommand>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OpenSessionResponse {
    pub decision: GateDecision,
    /// Client route to send the user to when playback is denied.
    pub redirect: Option<String>,
    pub session: Option<SessionView>,
}

impl OpenSessionResponse {
    pub fn denied(decision: GateDecision) -> Self {
        let redirect = match decision {
            GateDecision::Allow => None,
            GateDecision::SignIn => Some("/sign-in".to_string()),
            GateDecision::Subscribe => Some("/subscription".to_string()),
        };
        Self {
            decision,
            redirect,
            session: None,
        }
    }

    pub fn allowed(session: SessionView) -> Self {
        Self {
            decision: GateDecision::Allow,
            redirect: None,
            session: Some(session),
        }
    }
}
