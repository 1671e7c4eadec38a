use anyhow::Result;
use todo_cli::{run_session, Config, UreqTransport};
use todo_sync_core::{App, TodoClient, TodoSync};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    tracing::info!(base_url = %config.base_url, "starting");

    let client = TodoClient::new(&config.base_url);
    let mut app = App::new(TodoSync::new(client, UreqTransport::new()));
    run_session(&mut app, std::io::stdin().lock(), std::io::stdout().lock())
}
