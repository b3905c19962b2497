use clap::Parser;
use llm_relay::{build_router, AppState, Config};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "llm-relay",
    about = "CORS-friendly reverse proxy that keeps LLM provider API keys server-side",
    version
)]
struct Cli {
    /// Host to bind (overrides RELAY_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides RELAY_PORT)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "llm_relay=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env()?;
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    // Streamed completions can run for minutes; the client carries no
    // overall request timeout.
    let client = reqwest::Client::builder().build()?;

    info!("llm-relay v{}", env!("CARGO_PKG_VERSION"));
    info!("  OpenAI upstream:    {}", config.openai_url);
    info!("  Anthropic upstream: {}", config.anthropic_url);
    info!(
        "  Origin allowlist:   {}",
        if config.origin_allowlist.is_empty() {
            "(every origin allowed)".to_string()
        } else {
            config.origin_allowlist.join(", ")
        }
    );

    let bind_addr = format!("{}:{}", config.host, config.port);
    let state = Arc::new(AppState { config, client });
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
