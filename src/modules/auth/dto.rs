use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims carried by the auth provider's access tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    pub sub: String,
    #[serde(default)]
    pub email: String,
    pub exp: usize,
}

/// The signed-in user, as injected by the auth middleware.
#[derive(Debug, Serialize, Clone, PartialEq, Eq, ToSchema)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
}

impl AuthUser {
    pub fn is_admin(&self, admin_email: &str) -> bool {
        !admin_email.is_empty() && self.email.eq_ignore_ascii_case(admin_email.trim())
    }
}

impl From<TokenClaims> for AuthUser {
    fn from(claims: TokenClaims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MeResponse {
    pub id: String,
    pub email: String,
    pub is_admin: bool,
    pub has_seen_landing: bool,
}
