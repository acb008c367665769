use crate::providers::retry::RetryPolicy;
use crate::providers::xpress::{self, XpressWallet};
use crate::providers::WalletProvider;
use payrail_primitives::error::ApiError;
use payrail_primitives::models::AppConfig;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::info;

/// Single point of construction for provider adapters. One instance is
/// created per provider name and reused; `remove`/`clear` exist for
/// credential rotation. An explicit value with injected configuration, not
/// a process-wide singleton.
pub struct ProviderRegistry {
    http: Client,
    config: AppConfig,
    instances: RwLock<HashMap<String, Arc<dyn WalletProvider>>>,
}

impl ProviderRegistry {
    pub fn new(http: Client, config: AppConfig) -> Self {
        Self {
            http,
            config,
            instances: RwLock::new(HashMap::new()),
        }
    }

    pub fn supported_providers() -> &'static [&'static str] {
        &[xpress::PROVIDER_NAME]
    }

    /// Fetch the adapter for `name`, creating and caching it on first use.
    pub fn get(&self, name: &str) -> Result<Arc<dyn WalletProvider>, ApiError> {
        if let Some(provider) = self
            .instances
            .read()
            .expect("provider registry lock poisoned")
            .get(name)
        {
            return Ok(provider.clone());
        }

        let provider = self.build(name)?;

        let mut instances = self
            .instances
            .write()
            .expect("provider registry lock poisoned");
        // Another request may have built it while we weren't holding the
        // write lock; keep the first instance.
        let entry = instances
            .entry(name.to_string())
            .or_insert_with(|| provider);
        Ok(entry.clone())
    }

    /// The provider used when a request does not name one.
    pub fn default_provider(&self) -> Result<Arc<dyn WalletProvider>, ApiError> {
        self.get(self.config.default_provider.as_str())
    }

    /// Resolve an optional caller-supplied provider name.
    pub fn resolve(&self, name: Option<&str>) -> Result<Arc<dyn WalletProvider>, ApiError> {
        match name {
            Some(name) => self.get(name),
            None => self.default_provider(),
        }
    }

    /// Drop one cached adapter so the next `get` rebuilds it with current
    /// configuration.
    pub fn remove(&self, name: &str) {
        self.instances
            .write()
            .expect("provider registry lock poisoned")
            .remove(name);
        info!(provider = name, "Provider instance removed from registry");
    }

    pub fn clear(&self) {
        self.instances
            .write()
            .expect("provider registry lock poisoned")
            .clear();
        info!("Provider registry cleared");
    }

    fn build(&self, name: &str) -> Result<Arc<dyn WalletProvider>, ApiError> {
        let retry = RetryPolicy::new(self.config.provider_max_attempts);

        match name {
            xpress::PROVIDER_NAME => {
                info!(provider = name, "Building provider adapter");
                Ok(Arc::new(XpressWallet::new(
                    self.http.clone(),
                    &self.config.xpress_details,
                    retry,
                )))
            }
            other => Err(ApiError::BadRequest(format!(
                "Unsupported provider: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payrail_primitives::models::XpressInfo;
    use secrecy::SecretString;

    fn test_config() -> AppConfig {
        AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            app_url: "http://localhost:8080".into(),
            default_provider: "xpress".into(),
            balance_ttl_secs: 300,
            provider_max_attempts: 3,
            xpress_details: XpressInfo {
                api_url: "http://localhost:9090/mock/xpress".into(),
                account_email: "ops@example.com".into(),
                account_password: SecretString::from("test-password"),
                webhook_secret: SecretString::from("test-webhook-secret"),
                sandbox: true,
                request_timeout_secs: 30,
                token_ttl_secs: 1500,
            },
        }
    }

    #[test]
    fn registry_caches_one_instance_per_name() {
        let registry = ProviderRegistry::new(Client::new(), test_config());
        let first = registry.get("xpress").unwrap();
        let second = registry.get("xpress").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn default_provider_comes_from_config() {
        let registry = ProviderRegistry::new(Client::new(), test_config());
        let provider = registry.default_provider().unwrap();
        assert_eq!(provider.name(), "xpress");

        let resolved = registry.resolve(None).unwrap();
        assert!(Arc::ptr_eq(&provider, &resolved));
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let registry = ProviderRegistry::new(Client::new(), test_config());
        assert!(matches!(
            registry.get("acme"),
            Err(ApiError::BadRequest(_))
        ));
    }

    #[test]
    fn remove_forces_a_rebuild() {
        let registry = ProviderRegistry::new(Client::new(), test_config());
        let first = registry.get("xpress").unwrap();
        registry.remove("xpress");
        let second = registry.get("xpress").unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn clear_empties_the_cache() {
        let registry = ProviderRegistry::new(Client::new(), test_config());
        let first = registry.get("xpress").unwrap();
        registry.clear();
        let second = registry.get("xpress").unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }
}
