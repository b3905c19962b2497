use crate::error::{ProxyError, Result};
use crate::providers::{ANTHROPIC_ENDPOINT, OPENAI_ENDPOINT};
use std::env;

/// Process-wide configuration, built once at startup and handed to the
/// router inside `AppState`. Nothing reads the environment after this.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub openai_api_key: String,
    pub anthropic_api_key: String,
    /// Origins permitted to call the relay. Parsed and carried so the CORS
    /// policy can consult it; the current policy allows every origin.
    pub origin_allowlist: Vec<String>,
    pub openai_url: String,
    pub anthropic_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Both provider keys are required; everything else has a default.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("RELAY_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("RELAY_PORT")
                .unwrap_or_else(|_| "8787".to_string())
                .parse()
                .map_err(|_| ProxyError::config("RELAY_PORT must be a port number"))?,
            openai_api_key: require("OPENAI_API_KEY")?,
            anthropic_api_key: require("ANTHROPIC_API_KEY")?,
            origin_allowlist: env::var("ORIGIN_ALLOWLIST")
                .map(|raw| parse_allowlist(&raw))
                .unwrap_or_default(),
            openai_url: env::var("OPENAI_API_URL").unwrap_or_else(|_| OPENAI_ENDPOINT.to_string()),
            anthropic_url: env::var("ANTHROPIC_API_URL")
                .unwrap_or_else(|_| ANTHROPIC_ENDPOINT.to_string()),
        })
    }
}

fn require(name: &str) -> Result<String> {
    env::var(name).map_err(|_| {
        ProxyError::config(format!(
            "Environment variable '{name}' not set. Set it with your provider API key."
        ))
    })
}

/// Parse a comma-separated origin list: entries are trimmed, empties dropped.
fn parse_allowlist(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_allowlist() {
        assert_eq!(
            parse_allowlist("https://a.example,https://b.example"),
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(
            parse_allowlist(" https://a.example , ,https://b.example,"),
            vec!["https://a.example", "https://b.example"]
        );
        assert!(parse_allowlist("").is_empty());
    }

    // Environment variables are process-global, so the from_env cases run
    // inside a single test.
    #[test]
    fn test_from_env() {
        env::remove_var("OPENAI_API_KEY");
        env::remove_var("ANTHROPIC_API_KEY");
        assert!(Config::from_env().is_err());

        env::set_var("OPENAI_API_KEY", "sk-test");
        env::set_var("ANTHROPIC_API_KEY", "sk-ant-test");
        env::remove_var("RELAY_HOST");
        env::remove_var("RELAY_PORT");
        env::remove_var("ORIGIN_ALLOWLIST");
        env::remove_var("OPENAI_API_URL");
        env::remove_var("ANTHROPIC_API_URL");

        let config = Config::from_env().unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8787);
        assert_eq!(config.openai_api_key, "sk-test");
        assert!(config.origin_allowlist.is_empty());
        assert_eq!(config.openai_url, OPENAI_ENDPOINT);
        assert_eq!(config.anthropic_url, ANTHROPIC_ENDPOINT);

        env::set_var("ORIGIN_ALLOWLIST", "https://app.example");
        let config = Config::from_env().unwrap();
        assert_eq!(config.origin_allowlist, vec!["https://app.example"]);

        env::remove_var("OPENAI_API_KEY");
        env::remove_var("ANTHROPIC_API_KEY");
        env::remove_var("ORIGIN_ALLOWLIST");
    }
}
