use std::env;
use url::Url;

/// Production order endpoint.
pub const LIVE_URL: &str = "https://secure.epsilon.jp/cgi-bin/order/";

/// Sandbox order endpoint.
pub const SANDBOX_URL: &str = "https://beta.epsilon.jp/cgi-bin/order/";

/// Card payment script, relative to the endpoint base URL.
pub const PURCHASE_PATH: &str = "direct_card_payment.cgi";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Merchant contact code issued by Epsilon.
    pub contact_code: String,
    /// Base URL the payment scripts live under. Always ends with `/`.
    pub endpoint: String,
}

impl GatewayConfig {
    /// Configuration for the production endpoint.
    pub fn new(contact_code: impl Into<String>) -> Self {
        Self {
            contact_code: contact_code.into(),
            endpoint: LIVE_URL.to_string(),
        }
    }

    pub fn sandbox(contact_code: impl Into<String>) -> Self {
        Self {
            contact_code: contact_code.into(),
            endpoint: SANDBOX_URL.to_string(),
        }
    }

    /// Point the configuration at a different base URL.
    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self, ConfigError> {
        self.endpoint = normalize_endpoint(endpoint)?;
        Ok(self)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let contact_code = env::var("EPSILON_CONTACT_CODE")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingRequired("EPSILON_CONTACT_CODE"))?;

        let sandbox = env::var("EPSILON_SANDBOX")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let config = if sandbox {
            Self::sandbox(contact_code)
        } else {
            Self::new(contact_code)
        };

        match env::var("EPSILON_ENDPOINT").ok().filter(|s| !s.is_empty()) {
            Some(endpoint) => config.with_endpoint(&endpoint),
            None => Ok(config),
        }
    }

    /// Full URL of the card payment script.
    pub fn purchase_url(&self) -> String {
        format!("{}{}", self.endpoint, PURCHASE_PATH)
    }
}

fn normalize_endpoint(endpoint: &str) -> Result<String, ConfigError> {
    Url::parse(endpoint).map_err(|_| ConfigError::InvalidUrl(endpoint.to_string()))?;
    if endpoint.ends_with('/') {
        Ok(endpoint.to_string())
    } else {
        Ok(format!("{endpoint}/"))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingRequired(&'static str),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_live_endpoint() {
        let config = GatewayConfig::new("Foo");
        assert_eq!(config.contact_code, "Foo");
        assert_eq!(
            config.purchase_url(),
            "https://secure.epsilon.jp/cgi-bin/order/direct_card_payment.cgi"
        );
    }

    #[test]
    fn sandbox_endpoint() {
        assert_eq!(
            GatewayConfig::sandbox("Foo").purchase_url(),
            "https://beta.epsilon.jp/cgi-bin/order/direct_card_payment.cgi"
        );
    }

    #[test]
    fn endpoint_gets_trailing_slash() {
        let config = GatewayConfig::new("Foo")
            .with_endpoint("http://127.0.0.1:8080/order")
            .unwrap();
        assert_eq!(
            config.purchase_url(),
            "http://127.0.0.1:8080/order/direct_card_payment.cgi"
        );
    }

    #[test]
    fn rejects_invalid_endpoint() {
        let err = GatewayConfig::new("Foo")
            .with_endpoint("not a url")
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl(_)));
    }

    // Environment variables are process-global; from_env tests hold this lock.
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    const VARS: [&str; 3] = ["EPSILON_CONTACT_CODE", "EPSILON_SANDBOX", "EPSILON_ENDPOINT"];

    fn with_env<T>(vars: &[(&str, &str)], f: impl FnOnce() -> T) -> T {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        for name in VARS {
            env::remove_var(name);
        }
        for (name, value) in vars {
            env::set_var(name, value);
        }
        let out = f();
        for name in VARS {
            env::remove_var(name);
        }
        out
    }

    #[test]
    fn from_env_requires_contact_code() {
        let err = with_env(&[], GatewayConfig::from_env).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingRequired("EPSILON_CONTACT_CODE")
        ));

        let err = with_env(&[("EPSILON_CONTACT_CODE", "")], GatewayConfig::from_env).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired(_)));
    }

    #[test]
    fn from_env_defaults_to_live() {
        let config = with_env(&[("EPSILON_CONTACT_CODE", "Foo")], GatewayConfig::from_env).unwrap();
        assert_eq!(config, GatewayConfig::new("Foo"));
    }

    #[test]
    fn from_env_sandbox_switch() {
        for flag in ["1", "true"] {
            let config = with_env(
                &[("EPSILON_CONTACT_CODE", "Foo"), ("EPSILON_SANDBOX", flag)],
                GatewayConfig::from_env,
            )
            .unwrap();
            assert_eq!(config.endpoint, SANDBOX_URL, "EPSILON_SANDBOX={flag}");
        }

        let config = with_env(
            &[("EPSILON_CONTACT_CODE", "Foo"), ("EPSILON_SANDBOX", "no")],
            GatewayConfig::from_env,
        )
        .unwrap();
        assert_eq!(config.endpoint, LIVE_URL);
    }

    #[test]
    fn from_env_endpoint_override() {
        let config = with_env(
            &[
                ("EPSILON_CONTACT_CODE", "Foo"),
                ("EPSILON_SANDBOX", "1"),
                ("EPSILON_ENDPOINT", "http://127.0.0.1:9000/order"),
            ],
            GatewayConfig::from_env,
        )
        .unwrap();
        assert_eq!(config.endpoint, "http://127.0.0.1:9000/order/");
    }

    #[test]
    fn from_env_rejects_invalid_endpoint() {
        let err = with_env(
            &[
                ("EPSILON_CONTACT_CODE", "Foo"),
                ("EPSILON_ENDPOINT", "not a url"),
            ],
            GatewayConfig::from_env,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl(ref url) if url == "not a url"));
    }
}
