use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

/// Redemption state of a code. Moves from `Unused` to `Used` once and
/// never back.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Redemption {
    Unused,
    Used {
        #[serde(with = "time::serde::rfc3339")]
        #[schema(value_type = String, format = DateTime)]
        used_at: OffsetDateTime,
        used_by: String,
    },
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct DiscountCode {
    pub code: String,
    pub discount_percentage: u8,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: OffsetDateTime,
    pub redemption: Redemption,
}

impl DiscountCode {
    pub fn is_used(&self) -> bool {
        matches!(self.redemption, Redemption::Used { .. })
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, ToSchema)]
pub struct DiscountValidation {
    pub is_valid: bool,
    pub discount: u8,
    pub message: String,
}

impl DiscountValidation {
    pub fn invalid() -> Self {
        Self {
            is_valid: false,
            discount: 0,
            message: "Invalid discount code".to_string(),
        }
    }

    pub fn already_used() -> Self {
        Self {
            is_valid: false,
            discount: 0,
            message: "This discount code has already been used".to_string(),
        }
    }

    pub fn valid(discount: u8) -> Self {
        Self {
            is_valid: true,
            discount,
            message: format!("{}% discount applied", discount),
        }
    }
}

/// Price after a percentage discount. Not rounded; rounding is a display
/// concern.
pub fn discounted_price(original: f64, discount_percentage: u8) -> f64 {
    original * (1.0 - f64::from(discount_percentage) / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discount_is_applied_without_rounding() {
        assert_eq!(discounted_price(499.0, 0), 499.0);
        assert!((discounted_price(499.0, 15) - 424.15).abs() < 1e-9);
        assert_eq!(discounted_price(4999.0, 100), 0.0);
    }

    #[test]
    fn redemption_is_tagged() {
        let json = serde_json::to_value(Redemption::Unused).unwrap();
        assert_eq!(json["state"], "unused");
    }
}
