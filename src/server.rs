use crate::config::Config;
use crate::cors;
use crate::error::Result;
use crate::providers::Provider;
use crate::proxy;

use axum::body::Body;
use axum::extract::State;
use axum::http::header::{
    self, HeaderName, HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_EXPOSE_HEADERS,
};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use bytes::Bytes;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Headers that describe the upstream hop rather than ours; never relayed.
const HOP_BY_HOP_HEADERS: &[HeaderName] = &[
    header::CONNECTION,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub client: reqwest::Client,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(Provider::OpenAi.route(), any(handle_openai))
        .route(Provider::Anthropic.route(), any(handle_anthropic))
        .route("/health", any(handle_health))
        .fallback(handle_not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn handle_openai(
    State(state): State<Arc<AppState>>,
    method: Method,
    body: Bytes,
) -> Result<Response> {
    provider_route(Provider::OpenAi, &state, method, body).await
}

async fn handle_anthropic(
    State(state): State<Arc<AppState>>,
    method: Method,
    body: Bytes,
) -> Result<Response> {
    provider_route(Provider::Anthropic, &state, method, body).await
}

/// Shared handling for both provider routes: preflight first, then the
/// POST-only check, then the forwarder.
async fn provider_route(
    provider: Provider,
    state: &AppState,
    method: Method,
    body: Bytes,
) -> Result<Response> {
    if method == Method::OPTIONS {
        return Ok(preflight(&state.config));
    }
    if method != Method::POST {
        return Ok(text_response(
            StatusCode::METHOD_NOT_ALLOWED,
            "Method Not Allowed",
            &state.config,
        ));
    }

    let upstream = proxy::forward(provider, body, &state.config, &state.client).await?;
    Ok(relay_response(upstream, &state.config))
}

async fn handle_health(State(state): State<Arc<AppState>>, method: Method) -> Response {
    if method == Method::OPTIONS {
        return preflight(&state.config);
    }
    text_response(StatusCode::OK, "ok", &state.config)
}

async fn handle_not_found(State(state): State<Arc<AppState>>, method: Method) -> Response {
    if method == Method::OPTIONS {
        return preflight(&state.config);
    }
    text_response(StatusCode::NOT_FOUND, "Not Found", &state.config)
}

/// Empty 204 answering a CORS preflight on any path.
fn preflight(config: &Config) -> Response {
    let mut response = StatusCode::NO_CONTENT.into_response();
    response
        .headers_mut()
        .extend(cors::cors_headers(&config.origin_allowlist));
    response
}

fn text_response(status: StatusCode, body: &'static str, config: &Config) -> Response {
    let mut response = (status, body).into_response();
    response
        .headers_mut()
        .extend(cors::cors_headers(&config.origin_allowlist));
    response
}

/// Mirror an upstream response: status verbatim, headers minus hop-by-hop,
/// the CORS origin overwritten, and the body attached as a pass-through
/// stream rather than buffered.
fn relay_response(upstream: reqwest::Response, config: &Config) -> Response {
    let status = upstream.status();
    let mut headers = upstream.headers().clone();

    for name in HOP_BY_HOP_HEADERS {
        headers.remove(name);
    }
    headers.insert(
        ACCESS_CONTROL_ALLOW_ORIGIN,
        cors::allowed_origin(&config.origin_allowlist),
    );
    headers.insert(
        ACCESS_CONTROL_EXPOSE_HEADERS,
        HeaderValue::from_static("content-type"),
    );

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}
