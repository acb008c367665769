use crate::providers::retry::RetryPolicy;
use chrono::{DateTime, Duration, Utc};
use payrail_primitives::error::ProviderError;
use reqwest::{Client, Method};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Refresh window: calls made within this many seconds of token expiry
/// refresh (or re-authenticate) before proceeding.
const NEAR_EXPIRY_SECS: i64 = 300;

/// Where a partner expects and returns its auth tokens.
#[derive(Debug, Clone, Copy)]
pub struct AuthScheme {
    pub login_path: &'static str,
    pub refresh_path: &'static str,
    pub access_header: &'static str,
    pub refresh_header: &'static str,
}

/// In-memory auth state for one adapter instance. Never persisted; a process
/// restart simply re-authenticates.
#[derive(Debug, Clone)]
pub struct ProviderSession {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl ProviderSession {
    pub fn near_expiry(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - now <= Duration::seconds(NEAR_EXPIRY_SECS)
    }
}

/// Classify a non-2xx partner response into the normalized taxonomy.
/// 401/403 are authentication failures, 4xx are validation failures (with a
/// carve-out for insufficient-funds rejections), everything else keeps the
/// machine-readable code, status, and raw body for diagnostics.
pub fn classify_response(status: u16, body: Option<Value>, fallback: &str) -> ProviderError {
    let message = body
        .as_ref()
        .and_then(|b| b.get("message"))
        .and_then(Value::as_str)
        .unwrap_or(fallback)
        .to_string();

    let code = body
        .as_ref()
        .and_then(|b| b.get("code"))
        .and_then(Value::as_str)
        .unwrap_or("provider_error")
        .to_string();

    match status {
        401 | 403 => ProviderError::Authentication(message),
        402 => ProviderError::InsufficientFunds(message),
        400..=499 => {
            if message.to_lowercase().contains("insufficient")
                || code.eq_ignore_ascii_case("insufficient_funds")
                || code.eq_ignore_ascii_case("insufficient_balance")
            {
                ProviderError::InsufficientFunds(message)
            } else {
                ProviderError::Validation(message)
            }
        }
        _ => ProviderError::Api {
            code,
            status,
            message,
            body,
        },
    }
}

fn parse_session(body: &Value, default_ttl_secs: i64) -> Result<ProviderSession, ProviderError> {
    let access_token = body
        .get("token")
        .or_else(|| body.get("accessToken"))
        .and_then(Value::as_str)
        .ok_or_else(|| {
            ProviderError::Authentication("Login response missing access token".into())
        })?
        .to_string();

    let refresh_token = body
        .get("refreshToken")
        .and_then(Value::as_str)
        .map(str::to_string);

    let ttl = body
        .get("expiresIn")
        .and_then(Value::as_i64)
        .unwrap_or(default_ttl_secs);

    Ok(ProviderSession {
        access_token,
        refresh_token,
        expires_at: Utc::now() + Duration::seconds(ttl),
    })
}

/// Shared HTTP execution machinery for provider adapters: token lifecycle,
/// retry with exponential backoff, and error normalization. Stateless per
/// call apart from the session it owns.
pub struct ProviderHttpClient {
    http: Client,
    base_url: String,
    scheme: AuthScheme,
    login_body: Value,
    token_ttl_secs: i64,
    retry: RetryPolicy,
    session: Mutex<Option<ProviderSession>>,
}

impl ProviderHttpClient {
    pub fn new(
        http: Client,
        base_url: &str,
        scheme: AuthScheme,
        login_body: Value,
        token_ttl_secs: i64,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            scheme,
            login_body,
            token_ttl_secs,
            retry,
            session: Mutex::new(None),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Authorized call with the configured retry policy. Retries only on
    /// transport failures and partner 5xx; client errors surface immediately.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value, ProviderError> {
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            let token = self.ensure_token().await?;

            match self.execute(method.clone(), path, query, body, &token).await {
                Ok(value) => return Ok(value),
                Err(err) if self.retry.should_retry(&err, attempt) => {
                    let delay = self.retry.backoff(attempt);
                    warn!(
                        path,
                        attempt,
                        delay_secs = delay.as_secs(),
                        error = %err,
                        "Provider call failed, backing off before retry"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => {
                    // A rejected token is unusable; drop the session so the
                    // next call re-authenticates instead of replaying it.
                    if matches!(err, ProviderError::Authentication(_)) {
                        self.session.lock().await.take();
                    }
                    return Err(err);
                }
            }
        }
    }

    /// Force authentication now, discarding any current session.
    pub async fn authenticate(&self) -> Result<(), ProviderError> {
        let session = self.login().await?;
        *self.session.lock().await = Some(session);
        Ok(())
    }

    async fn ensure_token(&self) -> Result<String, ProviderError> {
        let mut guard = self.session.lock().await;
        let now = Utc::now();

        match guard.as_ref() {
            Some(session) if !session.near_expiry(now) => Ok(session.access_token.clone()),
            Some(session) => {
                // Refresh, falling back to a full login when the refresh
                // token is absent or rejected.
                let refreshed = match session.refresh_token.clone() {
                    Some(refresh_token) => match self.refresh(&refresh_token).await {
                        Ok(s) => s,
                        Err(err) => {
                            warn!(error = %err, "Token refresh failed, re-authenticating");
                            self.login().await?
                        }
                    },
                    None => self.login().await?,
                };
                let token = refreshed.access_token.clone();
                *guard = Some(refreshed);
                Ok(token)
            }
            None => {
                let session = self.login().await?;
                let token = session.access_token.clone();
                *guard = Some(session);
                Ok(token)
            }
        }
    }

    async fn login(&self) -> Result<ProviderSession, ProviderError> {
        debug!(path = self.scheme.login_path, "Authenticating with provider");

        let resp = self
            .http
            .post(self.endpoint(self.scheme.login_path))
            .json(&self.login_body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = resp.status().as_u16();
        let body: Value = resp
            .json()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !(200..300).contains(&status) {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Provider login rejected")
                .to_string();
            return Err(ProviderError::Authentication(message));
        }

        parse_session(&body, self.token_ttl_secs)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<ProviderSession, ProviderError> {
        let resp = self
            .http
            .post(self.endpoint(self.scheme.refresh_path))
            .header(self.scheme.refresh_header, refresh_token)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = resp.status().as_u16();
        let body: Value = resp
            .json()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(ProviderError::Authentication(
                "Provider token refresh rejected".into(),
            ));
        }

        let mut session = parse_session(&body, self.token_ttl_secs)?;
        if session.refresh_token.is_none() {
            session.refresh_token = Some(refresh_token.to_string());
        }
        Ok(session)
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
        token: &str,
    ) -> Result<Value, ProviderError> {
        let mut req = self
            .http
            .request(method, self.endpoint(path))
            .header(self.scheme.access_header, token);

        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(json) = body {
            req = req.json(json);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        // Partners may rotate tokens by echoing fresh ones on any response.
        let echoed_access = resp
            .headers()
            .get(self.scheme.access_header)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let echoed_refresh = resp
            .headers()
            .get(self.scheme.refresh_header)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        if let Some(access_token) = echoed_access {
            let mut guard = self.session.lock().await;
            let refresh_token = echoed_refresh
                .or_else(|| guard.as_ref().and_then(|s| s.refresh_token.clone()));
            *guard = Some(ProviderSession {
                access_token,
                refresh_token,
                expires_at: Utc::now() + Duration::seconds(self.token_ttl_secs),
            });
        }

        let status = resp.status().as_u16();
        let text = resp
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        let parsed: Option<Value> = serde_json::from_str(&text).ok();

        if (200..300).contains(&status) {
            parsed.ok_or_else(|| {
                ProviderError::api(
                    "invalid_response",
                    502,
                    format!(
                        "Provider returned non-JSON body: {}",
                        text.chars().take(200).collect::<String>()
                    ),
                    None,
                )
            })
        } else {
            Err(classify_response(
                status,
                parsed,
                &format!("Provider request to {} failed", path),
            ))
        }
    }
}
