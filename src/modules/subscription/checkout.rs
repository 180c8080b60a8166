use serde::Serialize;
use time::{Duration, OffsetDateTime};
use url::Url;
use utoipa::ToSchema;
use uuid::Uuid;

use super::model::{PaymentPlatform, Plan, PlanId};
use crate::config::settings::PaymentConfig;

/// How long an unfinished checkout is remembered.
pub const CHECKOUT_TTL: Duration = Duration::hours(1);

/// A checkout handed to the payment web view and not yet resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingCheckout {
    pub id: Uuid,
    pub user_id: String,
    pub plan: PlanId,
    pub platform: PaymentPlatform,
    pub discount_code: Option<String>,
    pub amount: f64,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq, ToSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum NavigationOutcome {
    Success { transaction_id: String },
    Cancelled,
    Pending,
}

/// Platform checkout page for a plan at the given (possibly discounted)
/// amount.
pub fn checkout_url(
    config: &PaymentConfig,
    platform: PaymentPlatform,
    plan: &Plan,
    amount: f64,
    checkout_id: Uuid,
) -> Result<Url, url::ParseError> {
    match platform {
        PaymentPlatform::Paypal => Url::parse_with_params(
            &config.paypal_checkout_url,
            &[
                ("client-id", config.paypal_client_id.as_str()),
                ("vault", "true"),
                ("intent", "subscription"),
                ("return_url", config.return_url.as_str()),
                ("cancel_url", config.cancel_url.as_str()),
            ],
        ),
        PaymentPlatform::Mpesa => {
            let plan_id = match plan.id {
                PlanId::Monthly => "monthly",
                PlanId::Yearly => "yearly",
            };
            let amount = format!("{:.2}", amount);
            let reference = checkout_id.to_string();
            Url::parse_with_params(
                &config.mpesa_checkout_url,
                &[
                    ("plan", plan_id),
                    ("amount", amount.as_str()),
                    ("currency", "KES"),
                    ("reference", reference.as_str()),
                    ("return_url", config.return_url.as_str()),
                    ("cancel_url", config.cancel_url.as_str()),
                ],
            )
        }
    }
}

fn query_value(raw: &str, name: &str) -> Option<String> {
    let query = raw.split_once('?')?.1;
    let query = query.split('#').next().unwrap_or(query);
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, value)| key == name && !value.is_empty())
        .map(|(_, value)| value.into_owned())
}

/// Reads a URL the payment web view navigated to. Cancel pages are
/// recognised first since they can carry a `ba_token` too.
pub fn classify_navigation(raw: &str, checkout_id: Uuid) -> NavigationOutcome {
    let lower = raw.to_ascii_lowercase();
    if lower.contains("payment-cancel") {
        return NavigationOutcome::Cancelled;
    }

    let subscription_id = query_value(raw, "subscription_id");
    let ba_token = query_value(raw, "ba_token");

    if lower.contains("payment-success") || subscription_id.is_some() || ba_token.is_some() {
        let transaction_id = subscription_id
            .or(ba_token)
            .unwrap_or_else(|| checkout_id.to_string());
        return NavigationOutcome::Success { transaction_id };
    }

    NavigationOutcome::Pending
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PaymentConfig {
        PaymentConfig {
            paypal_client_id: "client-123".to_string(),
            ..PaymentConfig::default()
        }
    }

    #[test]
    fn paypal_url_carries_encoded_redirects() {
        let url = checkout_url(
            &config(),
            PaymentPlatform::Paypal,
            PlanId::Monthly.plan(),
            499.0,
            Uuid::nil(),
        )
        .unwrap();

        assert!(url.as_str().starts_with(
            "https://www.sandbox.paypal.com/webapps/billing/subscriptions/create?client-id=client-123&vault=true&intent=subscription"
        ));
        assert!(url
            .as_str()
            .contains("return_url=https%3A%2F%2Fmoviebox.app%2Fpayment-success"));
        assert!(url
            .as_str()
            .contains("cancel_url=https%3A%2F%2Fmoviebox.app%2Fpayment-cancel"));
    }

    #[test]
    fn mpesa_url_carries_plan_and_amount() {
        let url = checkout_url(
            &config(),
            PaymentPlatform::Mpesa,
            PlanId::Yearly.plan(),
            4249.15,
            Uuid::nil(),
        )
        .unwrap();

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("plan".to_string(), "yearly".to_string())));
        assert!(pairs.contains(&("amount".to_string(), "4249.15".to_string())));
    }

    #[test]
    fn navigation_is_classified() {
        let id = Uuid::nil();
        assert_eq!(
            classify_navigation("https://moviebox.app/payment-success?subscription_id=I-ABC&ba_token=BA-1", id),
            NavigationOutcome::Success { transaction_id: "I-ABC".to_string() }
        );
        assert_eq!(
            classify_navigation("https://www.paypal.com/return?ba_token=BA-9", id),
            NavigationOutcome::Success { transaction_id: "BA-9".to_string() }
        );
        assert_eq!(
            classify_navigation("https://moviebox.app/payment-success", id),
            NavigationOutcome::Success { transaction_id: id.to_string() }
        );
        assert_eq!(
            classify_navigation("https://moviebox.app/payment-cancel?ba_token=BA-9", id),
            NavigationOutcome::Cancelled
        );
        assert_eq!(
            classify_navigation("https://www.sandbox.paypal.com/checkoutnow?token=EC-1", id),
            NavigationOutcome::Pending
        );
    }
}
