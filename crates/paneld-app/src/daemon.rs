//! Hosting the supervisor: runtime setup, config reload, signal-driven shutdown.

use std::path::PathBuf;
use std::sync::Arc;

use paneld_common::PaneldError;
use paneld_config::{PaneldConfig, ReloadManager};
use paneld_supervisor::{PanelConfigSource, PanelSupervisor, SupervisorSettings};

// =============================================================================
// RUN
// =============================================================================

/// Run the supervisor until SIGINT or SIGTERM.
///
/// With `watch_config`, panel commands follow edits to `config_path`.
/// Loop timing is fixed at startup.
pub fn run(config: PaneldConfig, config_path: PathBuf, watch_config: bool) -> Result<(), PaneldError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("paneld-runtime")
        .enable_all()
        .build()?;

    let settings = SupervisorSettings::from(&config.supervisor);
    tracing::info!(
        "Sweeping panels every {:?} (tick {:?})",
        settings.sweep_interval(),
        settings.tick_interval
    );

    let supervisor = runtime.block_on(async {
        let source = panel_source(config, config_path, watch_config).await;
        let supervisor = PanelSupervisor::with_system_spawner(source, settings);
        supervisor.spawn()?;
        wait_for_shutdown(&supervisor).await?;
        Ok::<_, PaneldError>(supervisor)
    })?;

    shutdown(&supervisor);
    runtime.shutdown_background();
    Ok(())
}

/// Where panel commands come from: the loaded config as-is, or a live view
/// of the file that starts from that same config.
async fn panel_source(
    config: PaneldConfig,
    config_path: PathBuf,
    watch_config: bool,
) -> Arc<dyn PanelConfigSource> {
    if watch_config {
        tracing::info!("Watching {} for changes", config_path.display());
        Arc::new(ReloadManager::start(config_path, config).await)
    } else {
        Arc::new(config)
    }
}

// =============================================================================
// SHUTDOWN
// =============================================================================

/// Kill every panel, then wait for the loop thread to notice.
fn shutdown(supervisor: &PanelSupervisor) {
    tracing::info!("Stopping panels");
    supervisor.stop();
    supervisor.join();
    log_status(supervisor);
}

async fn wait_for_shutdown(supervisor: &PanelSupervisor) -> Result<(), PaneldError> {
    let mut status = tokio::time::interval(supervisor.settings().sweep_interval());
    let terminate = terminate_signal();
    tokio::pin!(terminate);

    loop {
        tokio::select! {
            res = tokio::signal::ctrl_c() => {
                res?;
                tracing::info!("Received SIGINT");
                return Ok(());
            }
            res = &mut terminate => {
                res?;
                tracing::info!("Received SIGTERM");
                return Ok(());
            }
            _ = status.tick() => log_status(supervisor),
        }
    }
}

#[cfg(unix)]
async fn terminate_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    signal(SignalKind::terminate())?.recv().await;
    Ok(())
}

#[cfg(not(unix))]
async fn terminate_signal() -> std::io::Result<()> {
    std::future::pending().await
}

fn log_status(supervisor: &PanelSupervisor) {
    for panel in supervisor.snapshot() {
        tracing::debug!(
            panel = %panel.role,
            pid = ?panel.pid,
            starts = panel.starts,
            "panel status"
        );
    }
}

// =============================================================================
// TESTS
// =============================================================================
