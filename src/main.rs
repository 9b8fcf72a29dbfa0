use helpdesk_kv::{Client, Config, Session};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> mini_redis::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    tracing::debug!(?config, "loaded configuration");

    // Open a connection to the store; it is closed when `client` goes out
    // of scope, including on the error paths below.
    let mut client = Client::connect(&config).await?;

    let stdout = std::io::stdout();
    Session::new(&mut client, stdout.lock()).run().await?;

    Ok(())
}
