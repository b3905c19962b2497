//! The two upstream providers the relay fronts.
//!
//! Each provider pins its production endpoint, the route it is served
//! under, and the credential headers its API expects.

use crate::config::Config;
use reqwest::header::AUTHORIZATION;
use reqwest::RequestBuilder;

pub const OPENAI_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const ANTHROPIC_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";

/// Anthropic protocol version sent with every upstream call.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAi,
    Anthropic,
}

impl Provider {
    /// The relay route this provider is served under.
    #[must_use]
    pub fn route(&self) -> &'static str {
        match self {
            Self::OpenAi => "/openai",
            Self::Anthropic => "/anthropic",
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
        }
    }

    /// The upstream URL to post to. Defaults to the production endpoint;
    /// the config override exists for tests.
    #[must_use]
    pub fn endpoint<'a>(&self, config: &'a Config) -> &'a str {
        match self {
            Self::OpenAi => &config.openai_url,
            Self::Anthropic => &config.anthropic_url,
        }
    }

    /// Attach the server-held credentials for this provider.
    pub fn authorize(&self, request: RequestBuilder, config: &Config) -> RequestBuilder {
        match self {
            Self::OpenAi => {
                request.header(AUTHORIZATION, format!("Bearer {}", config.openai_api_key))
            }
            Self::Anthropic => request
                .header("x-api-key", config.anthropic_api_key.as_str())
                .header("anthropic-version", ANTHROPIC_VERSION),
        }
    }
}
