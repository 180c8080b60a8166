use serde::Serialize;
use utoipa::ToSchema;

/// Outcome of consulting the entitlement gate at a playback entry point.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum GateDecision {
    Allow,
    /// No session: send the user to sign-in.
    SignIn,
    /// Signed in without an active entitlement: send the user to the plans.
    Subscribe,
}

impl GateDecision {
    pub fn evaluate(signed_in: bool, entitled: bool) -> Self {
        match (signed_in, entitled) {
            (false, _) => GateDecision::SignIn,
            (true, false) => GateDecision::Subscribe,
            (true, true) => GateDecision::Allow,
        }
    }

    pub fn is_allowed(self) -> bool {
        self == GateDecision::Allow
    }

    pub fn message(self) -> &'static str {
        match self {
            GateDecision::Allow => "Playback allowed",
            GateDecision::SignIn => "Please sign in to watch",
            GateDecision::Subscribe => "An active subscription is required to watch",
        }
    }
}
