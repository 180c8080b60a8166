use super::dto::{GenerateDiscountRequest, ValidateDiscountRequest};
use super::model::{DiscountCode, DiscountValidation};
use crate::common::error::AppError;
use crate::state::AppState;
use validator::Validate;

pub struct DiscountService;

impl DiscountService {
    pub async fn list(state: AppState) -> Vec<DiscountCode> {
        state.discounts.list().await
    }

    pub async fn generate(
        state: AppState,
        req: GenerateDiscountRequest,
    ) -> Result<DiscountCode, AppError> {
        req.validate()?;
        state
            .discounts
            .generate(req.discount_percentage)
            .await
            .ok_or_else(|| AppError::Conflict("Could not allocate a unique discount code".to_string()))
    }

    pub async fn delete(state: AppState, code: &str) -> Result<(), AppError> {
        if state.discounts.delete(code).await {
            Ok(())
        } else {
            Err(AppError::not_found("Discount code"))
        }
    }

    pub async fn validate(
        state: AppState,
        req: ValidateDiscountRequest,
    ) -> Result<DiscountValidation, AppError> {
        req.validate()?;
        let code = req.code.trim();
        if code.is_empty() {
            return Err(AppError::Validation("Please enter a discount code".to_string()));
        }
        Ok(state.discounts.validate(code).await)
    }
}
