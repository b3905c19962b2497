//! The forwarder: a single upstream POST per inbound request, with
//! server-held credentials injected and streaming enabled by default.

use crate::config::Config;
use crate::error::Result;
use crate::providers::Provider;

use bytes::Bytes;
use serde_json::Value;
use tracing::info;

/// Forward an inbound provider request upstream.
///
/// The body is parsed only to default the `stream` flag; the upstream
/// response body is not touched here. Parse and transport failures
/// propagate to the caller unhandled.
pub async fn forward(
    provider: Provider,
    body: Bytes,
    config: &Config,
    client: &reqwest::Client,
) -> Result<reqwest::Response> {
    let mut payload: Value = serde_json::from_slice(&body)?;
    default_stream(&mut payload);

    let response = provider
        .authorize(client.post(provider.endpoint(config)), config)
        .json(&payload)
        .send()
        .await?;

    info!(
        provider = provider.name(),
        status = response.status().as_u16(),
        stream = payload
            .get("stream")
            .and_then(|value| value.as_bool())
            .unwrap_or(false),
        "forwarded request"
    );

    Ok(response)
}

/// Streaming is opt-out: a missing `stream` key becomes `true`; any value
/// the caller supplied, including `false` and `null`, is left untouched.
/// Non-object bodies pass through unchanged.
fn default_stream(payload: &mut Value) {
    if let Some(object) = payload.as_object_mut() {
        object.entry("stream").or_insert(Value::Bool(true));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_stream_defaults_to_true() {
        let mut payload = json!({"model": "x", "messages": []});
        default_stream(&mut payload);
        assert_eq!(payload["stream"], json!(true));
    }

    #[test]
    fn test_explicit_false_is_preserved() {
        let mut payload = json!({"model": "x", "stream": false});
        default_stream(&mut payload);
        assert_eq!(payload["stream"], json!(false));
    }

    #[test]
    fn test_explicit_true_is_preserved() {
        let mut payload = json!({"model": "x", "stream": true});
        default_stream(&mut payload);
        assert_eq!(payload["stream"], json!(true));
    }

    #[test]
    fn test_null_is_preserved() {
        let mut payload = json!({"model": "x", "stream": null});
        default_stream(&mut payload);
        assert_eq!(payload["stream"], Value::Null);
    }

    #[test]
    fn test_non_object_body_is_untouched() {
        let mut payload = json!(["not", "an", "object"]);
        default_stream(&mut payload);
        assert_eq!(payload, json!(["not", "an", "object"]));
    }
}
