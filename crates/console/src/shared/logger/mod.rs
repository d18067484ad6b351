use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Logging to stderr and to the file `target/logs/console.log`
///
/// `RUST_LOG` overrides the default filter. Reqwest/hyper internals are kept
/// at `warn` so request tracing stays readable.
pub fn init(verbose: bool) -> anyhow::Result<()> {
    let log_dir = Path::new("target").join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("console.log"))?;

    let default_filter = if verbose {
        "debug,hyper=warn,reqwest=warn"
    } else {
        "info,hyper=warn,reqwest=warn"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .try_init()?;

    Ok(())
}

/// Log a console event under `category`
///
/// # Examples
/// ```
/// console::shared::logger::log("export", "Billing summary written");
/// ```
pub fn log(category: &str, message: &str) {
    tracing::info!(category = category, "{}", message);
}
