use serde::Deserialize;
use crate::config::env::{self, EnvKey};

pub const DEFAULT_PAYPAL_CHECKOUT_URL: &str =
    "https://www.sandbox.paypal.com/webapps/billing/subscriptions/create";
pub const DEFAULT_MPESA_CHECKOUT_URL: &str = "https://payments.moviebox.app/mpesa/checkout";
pub const DEFAULT_RETURN_URL: &str = "https://moviebox.app/payment-success";
pub const DEFAULT_CANCEL_URL: &str = "https://moviebox.app/payment-cancel";

#[derive(Clone, Debug, Deserialize)]
pub struct PaymentConfig {
    pub paypal_client_id: String,
    pub paypal_checkout_url: String,
    pub mpesa_checkout_url: String,
    pub return_url: String,
    pub cancel_url: String,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            paypal_client_id: String::new(),
            paypal_checkout_url: DEFAULT_PAYPAL_CHECKOUT_URL.to_string(),
            mpesa_checkout_url: DEFAULT_MPESA_CHECKOUT_URL.to_string(),
            return_url: DEFAULT_RETURN_URL.to_string(),
            cancel_url: DEFAULT_CANCEL_URL.to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    pub server_port: u16,
    /// `None` keeps every collection in process memory.
    pub redis_url: Option<String>,
    pub auth_jwt_secret: String,
    pub admin_email: String,
    pub payments: PaymentConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self, std::env::VarError> {
        Ok(Self {
            server_port: env::get_parsed(EnvKey::ServerPort, 3000),
            redis_url: env::get_optional(EnvKey::RedisUrl),
            auth_jwt_secret: env::get(EnvKey::AuthJwtSecret)?,
            admin_email: env::get(EnvKey::AdminEmail)?,
            payments: PaymentConfig {
                paypal_client_id: env::get_or(EnvKey::PaypalClientId, ""),
                paypal_checkout_url: env::get_or(
                    EnvKey::PaypalCheckoutUrl,
                    DEFAULT_PAYPAL_CHECKOUT_URL,
                ),
                mpesa_checkout_url: env::get_or(
                    EnvKey::MpesaCheckoutUrl,
                    DEFAULT_MPESA_CHECKOUT_URL,
                ),
                return_url: env::get_or(EnvKey::PaymentReturnUrl, DEFAULT_RETURN_URL),
                cancel_url: env::get_or(EnvKey::PaymentCancelUrl, DEFAULT_CANCEL_URL),
            },
        })
    }
}
