use std::env;
use std::str::FromStr;

pub enum EnvKey {
    ServerPort,
    RedisUrl,
    AuthJwtSecret,
    AdminEmail,
    PaypalClientId,
    PaypalCheckoutUrl,
    MpesaCheckoutUrl,
    PaymentReturnUrl,
    PaymentCancelUrl,
}

impl EnvKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::ServerPort => "APP_PORT",
            EnvKey::RedisUrl => "REDIS_URL",
            EnvKey::AuthJwtSecret => "AUTH_JWT_SECRET",
            EnvKey::AdminEmail => "ADMIN_EMAIL",
            EnvKey::PaypalClientId => "PAYPAL_CLIENT_ID",
            EnvKey::PaypalCheckoutUrl => "PAYPAL_CHECKOUT_URL",
            EnvKey::MpesaCheckoutUrl => "MPESA_CHECKOUT_URL",
            EnvKey::PaymentReturnUrl => "PAYMENT_RETURN_URL",
            EnvKey::PaymentCancelUrl => "PAYMENT_CANCEL_URL",
        }
    }
}

pub fn get(key: EnvKey) -> Result<String, env::VarError> {
    env::var(key.as_str())
}

pub fn get_optional(key: EnvKey) -> Option<String> {
    env::var(key.as_str()).ok().filter(|v| !v.trim().is_empty())
}

pub fn get_or(key: EnvKey, default: &str) -> String {
    env::var(key.as_str()).unwrap_or_else(|_| default.to_string())
}

pub fn get_parsed<T: FromStr>(key: EnvKey, default: T) -> T {
    match get(key) {
        Ok(val) => val.parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}
