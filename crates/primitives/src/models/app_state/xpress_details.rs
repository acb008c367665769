use eyre::eyre;
use eyre::Report;
use secrecy::SecretString;
use std::env;

#[derive(Debug, Clone)]
pub struct XpressInfo {
    pub api_url: String,
    pub account_email: String,
    pub account_password: SecretString,
    pub webhook_secret: SecretString,
    pub sandbox: bool,
    pub request_timeout_secs: u64,
    /// Assumed access-token lifetime when the partner does not return one.
    pub token_ttl_secs: i64,
}

impl XpressInfo {
    pub fn from_env() -> Result<Self, Report> {
        let sandbox = env::var("XPRESS_SANDBOX")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(true);

        Ok(Self {
            api_url: env::var("XPRESS_API_URL")
                .unwrap_or_else(|_| "https://payment.xpress-wallet.com/api/v1".into()),

            account_email: env::var("XPRESS_ACCOUNT_EMAIL")
                .map_err(|_| eyre!("XPRESS_ACCOUNT_EMAIL must be set"))?,

            account_password: SecretString::from(
                env::var("XPRESS_ACCOUNT_PASSWORD")
                    .map_err(|_| eyre!("XPRESS_ACCOUNT_PASSWORD must be set"))?,
            ),

            webhook_secret: SecretString::from(
                env::var("XPRESS_WEBHOOK_SECRET")
                    .map_err(|_| eyre!("XPRESS_WEBHOOK_SECRET must be set"))?,
            ),

            sandbox,

            request_timeout_secs: env::var("XPRESS_REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".into())
                .parse()?,

            token_ttl_secs: env::var("XPRESS_TOKEN_TTL_SECS")
                .unwrap_or_else(|_| "1500".into())
                .parse()?,
        })
    }
}
