use std::sync::Arc;

use crate::services::burrito::{
    models::errors::BurritoError,
    transport::{ReqwestTransport, RequestOptions, Transport},
    BurritoClient,
};

pub const BURRITO_URL_VAR: &str = "BURRITO_URL";
pub const BURRITO_KEY_VAR: &str = "BURRITO_KEY";

/// Everything needed to construct a [`BurritoClient`].
///
/// Values are only ever taken from the environment through an explicit call to
/// [`ClientBuilder::with_env_fallback`].
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub default_options: Option<RequestOptions>,
}

pub trait ClientBuilder {
    fn base_url(self, base_url: impl Into<String>) -> Self;
    fn api_key(self, api_key: impl Into<String>) -> Self;
    fn default_options(self, options: RequestOptions) -> Self;
    fn with_env_fallback(self) -> Self;
    fn with_fallback_from<F>(self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>;
    fn build(self) -> Result<BurritoClient, BurritoError>;
    fn build_with_transport<T>(self, transport: T) -> Result<BurritoClient, BurritoError>
    where
        T: Transport + 'static;
}

impl ClientBuilder for ClientConfig {
    fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    fn default_options(mut self, options: RequestOptions) -> Self {
        self.default_options = Some(options);
        self
    }

    /// Fills unset fields from `BURRITO_URL` and `BURRITO_KEY`.
    fn with_env_fallback(self) -> Self {
        self.with_fallback_from(|key| std::env::var(key).ok())
    }

    fn with_fallback_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if is_unset(&self.base_url) {
            self.base_url = lookup(BURRITO_URL_VAR);
        }
        if is_unset(&self.api_key) {
            self.api_key = lookup(BURRITO_KEY_VAR);
        }
        self
    }

    fn build(self) -> Result<BurritoClient, BurritoError> {
        BurritoClient::try_from(self)
    }

    fn build_with_transport<T>(self, transport: T) -> Result<BurritoClient, BurritoError>
    where
        T: Transport + 'static,
    {
        let (base_url, api_key) = self.resolve()?;
        BurritoClient::new(
            base_url,
            &api_key,
            self.default_options.unwrap_or_default(),
            Arc::new(transport),
        )
    }
}

impl ClientConfig {
    /// Returns the base URL and API key or a config error naming the missing variable.
    pub fn resolve(&self) -> Result<(String, String), BurritoError> {
        let base_url = required(&self.base_url, BURRITO_URL_VAR)?;
        let api_key = required(&self.api_key, BURRITO_KEY_VAR)?;
        Ok((base_url, api_key))
    }
}

impl TryFrom<ClientConfig> for BurritoClient {
    type Error = BurritoError;

    fn try_from(cfg: ClientConfig) -> Result<Self, Self::Error> {
        cfg.build_with_transport(ReqwestTransport::new())
    }
}

fn is_unset(value: &Option<String>) -> bool {
    value.as_deref().map(str::is_empty).unwrap_or(true)
}

fn required(value: &Option<String>, var: &str) -> Result<String, BurritoError> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(BurritoError::Config(format!(
            "Environment variable {var} must be set or passed in"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_with(url: Option<&'static str>, key: Option<&'static str>) -> impl Fn(&str) -> Option<String> {
        move |var: &str| match var {
            BURRITO_URL_VAR => url.map(String::from),
            BURRITO_KEY_VAR => key.map(String::from),
            _ => None,
        }
    }

    #[test]
    fn explicit_values_resolve() {
        let cfg = ClientConfig::default()
            .base_url("http://burrito.local")
            .api_key("secret");
        let (url, key) = cfg.resolve().unwrap();
        assert_eq!(url, "http://burrito.local");
        assert_eq!(key, "secret");
    }

    #[test]
    fn missing_url_names_the_variable() {
        let err = ClientConfig::default()
            .api_key("secret")
            .with_fallback_from(env_with(None, None))
            .resolve()
            .unwrap_err();
        assert!(matches!(&err, BurritoError::Config(m) if m.contains("BURRITO_URL")));
    }

    #[test]
    fn missing_key_names_the_variable() {
        let err = ClientConfig::default()
            .base_url("http://burrito.local")
            .with_fallback_from(env_with(None, None))
            .resolve()
            .unwrap_err();
        assert!(matches!(&err, BurritoError::Config(m) if m.contains("BURRITO_KEY")));
    }

    #[test]
    fn environment_fills_only_unset_fields() {
        let cfg = ClientConfig::default()
            .base_url("http://explicit.local")
            .with_fallback_from(env_with(Some("http://env.local"), Some("env-key")));
        let (url, key) = cfg.resolve().unwrap();
        assert_eq!(url, "http://explicit.local");
        assert_eq!(key, "env-key");
    }

    #[test]
    fn empty_values_count_as_unset() {
        let cfg = ClientConfig::default()
            .base_url("")
            .api_key("")
            .with_fallback_from(env_with(Some("http://env.local"), None));
        assert_eq!(cfg.base_url.as_deref(), Some("http://env.local"));
        assert!(matches!(cfg.resolve(), Err(BurritoError::Config(_))));
    }

    #[test]
    fn build_fails_without_configuration() {
        let err = ClientConfig::default().build().unwrap_err();
        assert!(matches!(err, BurritoError::Config(_)));
    }

    #[test]
    fn api_key_must_be_a_valid_header() {
        let err = ClientConfig::default()
            .base_url("http://burrito.local")
            .api_key("line\nbreak")
            .build()
            .unwrap_err();
        assert!(matches!(err, BurritoError::Config(_)));
    }
}
