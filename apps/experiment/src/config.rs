use anyhow::{Context, Result};

/// Experiment configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads `key`, treating an empty or blank value as unset.
fn require_env(key: &str) -> Result<String> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .with_context(|| format!("Required environment variable '{key}' is not set"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_env_missing_names_the_variable() {
        let err = require_env("POLICY_FEWSHOT_TEST_UNSET_VAR").unwrap_err();
        assert!(err.to_string().contains("POLICY_FEWSHOT_TEST_UNSET_VAR"));
    }

    #[test]
    fn test_require_env_blank_counts_as_missing() {
        std::env::set_var("POLICY_FEWSHOT_TEST_BLANK_VAR", "   ");
        assert!(require_env("POLICY_FEWSHOT_TEST_BLANK_VAR").is_err());
    }

    #[test]
    fn test_require_env_returns_value() {
        std::env::set_var("POLICY_FEWSHOT_TEST_SET_VAR", "sk-test");
        assert_eq!(require_env("POLICY_FEWSHOT_TEST_SET_VAR").unwrap(), "sk-test");
    }
}
