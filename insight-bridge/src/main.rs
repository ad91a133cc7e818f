use anyhow::Context;
use insight_bridge::app::ChatApp;
use insight_bridge::repl;
use insight_neural::{RelayConfig, WebhookClient};
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("=== Insight Starting ===");

    let config = RelayConfig::from_env().context("Failed to load relay configuration")?;
    let client = WebhookClient::new(&config)?;
    let mut app = ChatApp::new(client);

    tracing::info!("Session {}", app.session().session_id());

    repl::run(
        &mut app,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await
}
