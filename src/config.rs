use anyhow::{Context, Result, bail};
use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,
    pub database_url: String,
    pub database_name: String,
    pub jwt_secret: String,
    pub access_token_ttl: usize,

    // Payment processor
    pub payment_secret_key: String,
    pub payment_api_base: String,
    pub payment_currency: String,

    // Rate limiting
    pub rate_token_per_min: u32,
    pub rate_protected_per_min: u32,
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parsed_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        Err(_) => Ok(default),
    }
}

fn required(key: &str) -> Result<String> {
    env::var(key).with_context(|| format!("{key} must be set"))
}

/// DATABASE_URL wins; otherwise the Atlas URI is assembled from DB_USER/DB_PASS/DB_HOST.
fn database_url() -> Result<String> {
    if let Ok(url) = env::var("DATABASE_URL") {
        return Ok(url);
    }

    let user = required("DB_USER")?;
    let pass = required("DB_PASS")?;
    let host = required("DB_HOST")?;

    Ok(format!(
        "mongodb+srv://{user}:{pass}@{host}/?retryWrites=true&w=majority"
    ))
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let port: u16 = parsed_or("PORT", 8080)?;

        let config = Self {
            server_addr: var_or("SERVER_ADDR", &format!("0.0.0.0:{port}")),
            database_url: database_url()?,
            database_name: var_or("DB_NAME", "WorkSync"),
            jwt_secret: required("ACCESS_TOKEN_KEY")?,
            access_token_ttl: parsed_or("ACCESS_TOKEN_TTL", 3600)?, // default 1h

            payment_secret_key: required("PAYMENT_SECRET_KEY")?,
            payment_api_base: var_or("PAYMENT_API_BASE", "https://api.stripe.com"),
            payment_currency: var_or("PAYMENT_CURRENCY", "usd"),

            rate_token_per_min: parsed_or("RATE_TOKEN_PER_MIN", 60)?,
            rate_protected_per_min: parsed_or("RATE_PROTECTED_PER_MIN", 1000)?,
        };

        if config.jwt_secret.is_empty() {
            bail!("ACCESS_TOKEN_KEY must not be empty");
        }
        if config.rate_token_per_min == 0 || config.rate_protected_per_min == 0 {
            bail!("rate limits must be greater than zero");
        }

        Ok(config)
    }
}
