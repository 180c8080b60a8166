use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use super::checkout::{NavigationOutcome, PendingCheckout, checkout_url, classify_navigation};
use super::dto::{
    CheckoutResponse, NavigationRequest, NavigationResponse, PlanResponse, StartCheckoutRequest,
    SubscriptionStatusResponse,
};
use super::gate::GateDecision;
use super::model::{PLANS, display_price};
use crate::common::error::AppError;
use crate::modules::auth::dto::AuthUser;
use crate::modules::discount::model::discounted_price;
use crate::state::AppState;

pub struct SubscriptionService;

impl SubscriptionService {
    pub fn plans() -> Vec<PlanResponse> {
        PLANS.iter().map(PlanResponse::from).collect()
    }

    /// Gate consulted at every playback entry point.
    pub async fn gate(state: &AppState, user: Option<&AuthUser>) -> GateDecision {
        match user {
            None => GateDecision::evaluate(false, false),
            Some(user) => {
                let entitled = state.subscriptions.entitlement(&user.id).await.is_entitled();
                GateDecision::evaluate(true, entitled)
            }
        }
    }

    pub async fn status(state: AppState, user: &AuthUser) -> SubscriptionStatusResponse {
        let record = state.subscriptions.current(&user.id).await;
        let entitlement = record.as_ref().map(|r| r.entitlement()).unwrap_or_default();
        SubscriptionStatusResponse {
            is_active: entitlement.is_entitled(),
            expiry_date: entitlement.expires_at(),
            record,
        }
    }

    pub async fn start_checkout(
        state: AppState,
        user: &AuthUser,
        req: StartCheckoutRequest,
    ) -> Result<CheckoutResponse, AppError> {
        req.validate()?;
        let plan = req.plan.plan();
        let original_price = f64::from(plan.price_ksh);

        let discount_code = req
            .discount_code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_ascii_uppercase);

        let discount = match &discount_code {
            Some(code) => {
                let validation = state.discounts.validate(code).await;
                if !validation.is_valid {
                    return Err(AppError::Validation(validation.message));
                }
                validation.discount
            }
            None => 0,
        };

        let final_price = discounted_price(original_price, discount);
        let checkout_id = Uuid::new_v4();
        let url = checkout_url(&state.config.payments, req.platform, plan, final_price, checkout_id)
            .map_err(|e| AppError::Internal(format!("Invalid checkout URL: {}", e)))?;

        state
            .subscriptions
            .insert_checkout(PendingCheckout {
                id: checkout_id,
                user_id: user.id.clone(),
                plan: req.plan,
                platform: req.platform,
                discount_code,
                amount: final_price,
                created_at: state.clock.now(),
            })
            .await;

        info!(
            user_id = %user.id,
            checkout_id = %checkout_id,
            plan = ?req.plan,
            platform = ?req.platform,
            discount,
            "Checkout started"
        );

        Ok(CheckoutResponse {
            checkout_id,
            checkout_url: url.to_string(),
            original_price,
            discount,
            final_price,
            price_display: display_price(final_price),
        })
    }

    /// Feeds a URL the payment web view navigated to. Only a success page
    /// activates the subscription.
    pub async fn report_navigation(
        state: AppState,
        user: &AuthUser,
        checkout_id: Uuid,
        req: NavigationRequest,
    ) -> Result<NavigationResponse, AppError> {
        req.validate()?;

        let pending = state
            .subscriptions
            .checkout(checkout_id)
            .await
            .filter(|c| c.user_id == user.id)
            .ok_or_else(|| AppError::not_found("Checkout"))?;

        let outcome = classify_navigation(&req.url, checkout_id);
        let subscription = match &outcome {
            NavigationOutcome::Pending => None,
            NavigationOutcome::Cancelled => {
                state.subscriptions.take_checkout(checkout_id).await;
                info!(user_id = %user.id, checkout_id = %checkout_id, "Checkout cancelled");
                None
            }
            NavigationOutcome::Success { transaction_id } => {
                if state.subscriptions.take_checkout(checkout_id).await.is_none() {
                    return Err(AppError::not_found("Checkout"));
                }

                let record = state
                    .subscriptions
                    .activate(&user.id, pending.plan, pending.platform, transaction_id.clone())
                    .await;

                if let Some(code) = &pending.discount_code {
                    if !state.discounts.mark_used(code, &user.id).await {
                        warn!(code = %code, user_id = %user.id, "Discount code was already consumed");
                    }
                }
                Some(record)
            }
        };

        Ok(NavigationResponse {
            outcome,
            subscription,
        })
    }
}
