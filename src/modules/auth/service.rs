use super::dto::{AuthUser, MeResponse};
use crate::state::AppState;

pub struct AuthService;

impl AuthService {
    pub async fn me(state: AppState, user: &AuthUser) -> MeResponse {
        let library = state.library.get(&user.id).await;
        MeResponse {
            id: user.id.clone(),
            email: user.email.clone(),
            is_admin: user.is_admin(&state.config.admin_email),
            has_seen_landing: library.has_seen_landing,
        }
    }
}
