use anyhow::{Context, Result};

use crate::render::Variant;

/// Default request body cap: 1 MiB is far above any real CV payload.
const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable has a default; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Variant used when a render request names none.
    pub default_variant: Variant,
    pub max_body_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests need not touch the process env.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Config {
            port: var("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            default_variant: var("DEFAULT_VARIANT")
                .unwrap_or_else(|| Variant::Clean.id().to_string())
                .parse::<Variant>()
                .context("DEFAULT_VARIANT must name a registered variant")?,
            max_body_bytes: match var("MAX_BODY_BYTES") {
                Some(raw) => raw
                    .parse::<usize>()
                    .with_context(|| format!("MAX_BODY_BYTES must be a byte count, got '{raw}'"))?,
                None => DEFAULT_MAX_BODY_BYTES,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.default_variant, Variant::Clean);
        assert_eq!(config.max_body_bytes, 1024 * 1024);
    }

    #[test]
    fn test_overrides_accept_aliases() {
        let config = config(&[("PORT", "3000"), ("DEFAULT_VARIANT", "v2"), ("MAX_BODY_BYTES", "2048")])
            .unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.default_variant, Variant::Academic);
        assert_eq!(config.max_body_bytes, 2048);
    }

    #[test]
    fn test_invalid_values_fail_with_context() {
        let err = config(&[("PORT", "http")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));

        let err = config(&[("DEFAULT_VARIANT", "fancy")]).unwrap_err();
        assert!(err.to_string().contains("DEFAULT_VARIANT"));

        let err = config(&[("MAX_BODY_BYTES", "lots")]).unwrap_err();
        assert!(err.to_string().contains("lots"));
    }
}
