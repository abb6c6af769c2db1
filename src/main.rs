mod config;
mod dates;
mod github;
mod html;
mod page;
mod server;
mod stats;

use anyhow::Context;
use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Read once; the GitHub client built from it is shared by every request.
    let config = Config::from_env().context("invalid configuration")?;

    server::serve(config).await
}
