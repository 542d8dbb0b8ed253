mod cli;
mod daemon;

use std::path::PathBuf;
use std::process::ExitCode;

use paneld_common::ConfigError;
use paneld_config::toml_loader;
use tracing_subscriber::EnvFilter;

/// Explicit `--config` path, or the platform default, created from the
/// template on first run. The flag is true when the file was just created.
fn resolve_config_path(args: &cli::Args) -> Result<(PathBuf, bool), ConfigError> {
    if let Some(ref path) = args.config {
        return Ok((path.clone(), false));
    }

    let path = toml_loader::default_config_path()?;
    if path.exists() {
        return Ok((path, false));
    }
    toml_loader::create_default_config(&path)?;
    Ok((path, true))
}

fn main() -> ExitCode {
    // Parse CLI arguments
    let args = cli::parse();

    let (config_path, created) = match resolve_config_path(&args) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("paneld: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Load before logging so the config can pick the level. Nothing is
    // logged until the subscriber exists.
    let loaded = paneld_config::load_config(&config_path);

    // Initialize logging
    let log_directive = args
        .log_level
        .clone()
        .or_else(|| {
            loaded
                .as_ref()
                .ok()
                .map(|l| l.config.logging.level.as_filter().to_string())
        })
        .unwrap_or_else(|| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| tracing_subscriber::filter::LevelFilter::INFO.into()),
            ),
        )
        .init();

    tracing::info!("paneld v{} starting...", env!("CARGO_PKG_VERSION"));

    if created {
        tracing::info!("Created default config at {}", config_path.display());
    }
    let config = match loaded {
        Ok(loaded) => {
            loaded.log(&config_path);
            loaded.config
        }
        Err(e) => {
            tracing::warn!("Config load failed, using defaults: {e}");
            paneld_config::PaneldConfig::default()
        }
    };

    if args.print_config {
        println!("{}", paneld_config::config_to_json(&config));
        return ExitCode::SUCCESS;
    }

    match daemon::run(config, config_path, !args.no_reload) {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("paneld failed: {e}");
            ExitCode::FAILURE
        }
    }
}
