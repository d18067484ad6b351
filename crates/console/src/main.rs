use console::cli::{AppContext, Cli};
use console::shared::{config, logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::init();

    logger::init(cli.verbose)?;

    let config = config::load_config(cli.config.as_deref())?;
    tracing::debug!("API base URL: {}", config.api.base_url);
    let ctx = AppContext::new(config)?;

    if let Err(e) = cli.command.run(&ctx).await {
        tracing::error!("{:#}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
