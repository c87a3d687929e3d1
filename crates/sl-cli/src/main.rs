use std::path::{Path, PathBuf};

use sl_core::error::LauncherError;
use sl_core::models::LauncherConfig;
use sl_core::services::launcher::LaunchController;
use sl_core::services::process::LocalSupervisor;
use sl_core::services::readiness::TcpReadinessWaiter;
use sl_core::services::{config_loader, descriptor};

/// Exit status for a supervisor connection failure.
const CONNECT_FAILURE_EXIT: i32 = 2;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // Parse CLI args
    let args: Vec<String> = std::env::args().skip(1).collect();
    let dry_run = args.iter().any(|a| a == "--dry-run");
    let debug = args.iter().any(|a| a == "--debug");
    let base_dir = match args.iter().find(|a| !a.starts_with("--")) {
        Some(path) => PathBuf::from(path),
        None => std::env::current_dir()?,
    };

    setup_logging(debug);

    let config = config_loader::load(&base_dir)?;

    if dry_run {
        return print_descriptors(&config, &base_dir);
    }

    let readiness = TcpReadinessWaiter::new(config.ports.clone());
    let controller = LaunchController::new(LocalSupervisor::new(), readiness);

    match controller.launch(&config, &base_dir).await {
        Ok(report) => {
            for outcome in &report.dependency_readiness {
                if !outcome.ready {
                    tracing::warn!(app = %outcome.name, "dependency never reported ready");
                }
            }
            tracing::info!(started = report.started.len(), "launch complete");
            Ok(())
        }
        Err(e @ LauncherError::Connection(_)) => {
            tracing::error!(error = %e, "cannot reach the process supervisor");
            std::process::exit(CONNECT_FAILURE_EXIT);
        }
        Err(e) => Err(e.into()),
    }
}

/// Configure stderr tracing; RUST_LOG overrides the default filter.
fn setup_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();
}

/// Print every resolved descriptor (dependencies first, aggregator last)
/// without contacting any supervisor.
fn print_descriptors(config: &LauncherConfig, base_dir: &Path) -> color_eyre::Result<()> {
    let mut descriptors = Vec::new();
    for app in config.dependency_apps() {
        descriptors.push(descriptor::synthesize(
            app,
            &config.common_env,
            &config.ports,
            base_dir,
        )?);
    }
    if let Some(app) = config.aggregator_app() {
        descriptors.push(descriptor::synthesize(
            app,
            &config.common_env,
            &config.ports,
            base_dir,
        )?);
    }
    println!("{}", serde_json::to_string_pretty(&descriptors)?);
    Ok(())
}
