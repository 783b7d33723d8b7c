mod app;
mod cli;
mod config;
mod delivery;
mod error;
mod model;
mod providers;
mod review;
mod secrets;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use tracing::error;

use app::ReviewJob;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = run(&args).await {
        error!("{e:#}");
        std::process::exit(1);
    }
}

async fn run(args: &[String]) -> Result<()> {
    let cli_args = cli::parse_args(args)?;
    if cli_args.help {
        cli::print_help();
        return Ok(());
    }

    let mut config = config::load_config(cli_args.config.as_deref())?;
    config.apply_env(|key| std::env::var(key).ok())?;
    cli_args.apply(&mut config);

    let settings = config.resolve()?;
    ReviewJob::from_settings(settings)?.run().await
}
