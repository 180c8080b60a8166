use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GenerateDiscountRequest {
    #[validate(range(min = 1, max = 100, message = "Discount must be between 1 and 100 percent"))]
    pub discount_percentage: u8,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ValidateDiscountRequest {
    #[validate(length(min = 1, message = "Please enter a discount code"))]
    pub code: String,
}
