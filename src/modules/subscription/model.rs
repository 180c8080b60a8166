use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PlanId {
    Monthly,
    Yearly,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentPlatform {
    Paypal,
    Mpesa,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plan {
    pub id: PlanId,
    pub name: &'static str,
    pub price_ksh: u32,
    pub duration_days: i64,
    pub popular: bool,
    pub features: &'static [&'static str],
}

const BASE_FEATURES: &[&str] = &[
    "Unlimited streaming",
    "HD quality",
    "Watch on any device",
    "Cancel anytime",
];

const YEARLY_FEATURES: &[&str] = &[
    "Unlimited streaming",
    "HD quality",
    "Watch on any device",
    "Cancel anytime",
    "Save 17%",
];

pub const PLANS: [Plan; 2] = [
    Plan {
        id: PlanId::Monthly,
        name: "Monthly",
        price_ksh: 499,
        duration_days: 30,
        popular: false,
        features: BASE_FEATURES,
    },
    Plan {
        id: PlanId::Yearly,
        name: "Yearly",
        price_ksh: 4_999,
        duration_days: 365,
        popular: true,
        features: YEARLY_FEATURES,
    },
];

impl PlanId {
    pub fn plan(self) -> &'static Plan {
        match self {
            PlanId::Monthly => &PLANS[0],
            PlanId::Yearly => &PLANS[1],
        }
    }
}

impl Plan {
    pub fn duration(&self) -> Duration {
        Duration::days(self.duration_days)
    }
}

/// Formats a shilling amount the way the plan cards show it: `KSh 4,999`.
/// Fractions are rounded to the nearest shilling.
pub fn display_price(amount: f64) -> String {
    let whole = amount.round().max(0.0) as u64;
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("KSh {}", grouped)
}

/// Right to gated playback. Expiry is only noticed when checked.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Entitlement {
    active: bool,
    expires_at: Option<OffsetDateTime>,
}

impl Entitlement {
    pub fn new(active: bool, expires_at: Option<OffsetDateTime>) -> Self {
        Self { active, expires_at }
    }

    pub fn is_entitled(&self) -> bool {
        self.active
    }

    pub fn expires_at(&self) -> Option<OffsetDateTime> {
        self.expires_at
    }

    pub fn activate(&mut self, expires_at: OffsetDateTime) {
        self.active = true;
        self.expires_at = Some(expires_at);
    }

    /// Turns an active entitlement off once `now` reaches the expiry and
    /// returns the resulting flag.
    pub fn check_and_expire(&mut self, now: OffsetDateTime) -> bool {
        if self.active && self.expires_at.is_none_or(|expiry| now >= expiry) {
            self.active = false;
        }
        self.active
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Expired,
}

/// Stored per user under `@subscription_data_<user>`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct SubscriptionRecord {
    pub user_id: String,
    pub payment_method: PaymentPlatform,
    pub transaction_id: String,
    pub plan: PlanId,
    pub status: SubscriptionStatus,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub start_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub expiry_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: OffsetDateTime,
}

impl SubscriptionRecord {
    pub fn entitlement(&self) -> Entitlement {
        Entitlement::new(self.status == SubscriptionStatus::Active, Some(self.expiry_date))
    }
}
