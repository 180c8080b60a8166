use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::checkout::NavigationOutcome;
use super::model::{PaymentPlatform, Plan, PlanId, SubscriptionRecord, display_price};

#[derive(Debug, Serialize, ToSchema)]
pub struct PlanResponse {
    pub id: PlanId,
    pub name: String,
    pub price_ksh: u32,
    pub price_display: String,
    pub duration_days: i64,
    pub popular: bool,
    pub features: Vec<String>,
}

impl From<&Plan> for PlanResponse {
    fn from(plan: &Plan) -> Self {
        Self {
            id: plan.id,
            name: plan.name.to_string(),
            price_ksh: plan.price_ksh,
            price_display: display_price(f64::from(plan.price_ksh)),
            duration_days: plan.duration_days,
            popular: plan.popular,
            features: plan.features.iter().map(|f| f.to_string()).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubscriptionStatusResponse {
    pub is_active: bool,
    #[serde(with = "time::serde::rfc3339::option")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub expiry_date: Option<OffsetDateTime>,
    pub record: Option<SubscriptionRecord>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct StartCheckoutRequest {
    pub plan: PlanId,
    pub platform: PaymentPlatform,
    #[validate(length(min = 1, message = "Please enter a discount code"))]
    pub discount_code: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutResponse {
    pub checkout_id: Uuid,
    pub checkout_url: String,
    pub original_price: f64,
    pub discount: u8,
    pub final_price: f64,
    pub price_display: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct NavigationRequest {
    #[validate(length(min = 1, message = "Navigation URL is required"))]
    pub url: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NavigationResponse {
    #[serde(flatten)]
    pub outcome: NavigationOutcome,
    pub subscription: Option<SubscriptionRecord>,
}
