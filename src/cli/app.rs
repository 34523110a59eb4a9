//! Indicator app runner

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use crate::application::ports::{ConfigStore, EventChannel};
use crate::application::{IndicatorConfig, IndicatorCoordinator, IndicatorWindowSetManager};
use crate::domain::config::{AppConfig, OverlayBackend};
use crate::domain::indicator::DisplayBounds;
use crate::infrastructure::{create_overlay_factory, EventBus, StaticDisplay, XdgConfigStore};

use super::args::{RunArgs, RunOptions};
use super::ipc::{create_ipc_server, StatusFn};
use super::pid_file::PidFile;
use super::presenter::Presenter;
use super::signals::HostWindow;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Turn `run` arguments into a partial config.
///
/// An unparseable work area is a usage error.
pub fn cli_config_from_args(args: &RunArgs) -> Result<AppConfig, String> {
    let work_area = args
        .work_area
        .as_deref()
        .map(|s| s.parse::<DisplayBounds>().map_err(|e| e.to_string()))
        .transpose()?;

    if args.thickness == Some(0) {
        return Err("Border thickness must be greater than zero".to_string());
    }

    Ok(AppConfig {
        border_thickness: args.thickness,
        asset: args
            .asset
            .as_ref()
            .map(|p| p.to_string_lossy().to_string()),
        backend: args
            .backend
            .map(|b| OverlayBackend::from(b).to_string()),
        work_area: work_area.map(|b| b.to_string()),
        ..Default::default()
    })
}

/// Resolve the options `run` works with from a merged config
pub fn resolve_run_options(config: &AppConfig, store: &XdgConfigStore) -> RunOptions {
    RunOptions {
        channel: config.channel_or_default().to_string(),
        backend: config.backend_or_default(),
        work_area: config.work_area_or_default(),
        border_thickness: config.border_thickness_or_default(),
        asset: config
            .asset
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| store.default_asset_path()),
    }
}

/// Load and merge configuration from file and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring unreadable config file");
            AppConfig::empty()
        }
    };

    // Merge: defaults < file < cli
    AppConfig::defaults().merge(file_config).merge(cli_config)
}

/// Run the indicator until the host window closes
pub async fn run_indicator(options: RunOptions) -> ExitCode {
    let presenter = Presenter::new();

    // Acquire PID file
    let mut pid_file = PidFile::new();
    if let Err(e) = pid_file.acquire() {
        presenter.error(&e.to_string());
        return ExitCode::from(EXIT_ERROR);
    }

    let bus = Arc::new(EventBus::new(options.channel.clone()));
    let display = StaticDisplay::new(options.work_area);
    let factory = create_overlay_factory(options.backend);
    let (manager, notices) = IndicatorWindowSetManager::new(
        factory,
        display,
        IndicatorConfig {
            border_thickness: options.border_thickness,
            asset: options.asset.clone(),
        },
    );

    // Closing the host window is what stops the indicator
    let window = HostWindow::new();
    if let Err(e) = window.close_on_signals() {
        presenter.error(&format!("Failed to setup signal handler: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }

    let coordinator = IndicatorCoordinator::new(Arc::clone(&bus), &window, manager, notices);

    // Setup IPC server
    let mut server = create_ipc_server();
    if let Err(e) = server.bind() {
        presenter.error(&format!("Failed to bind IPC endpoint: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }
    let endpoint = server.path();

    let snapshot = coordinator.snapshot_handle();
    let status_fn: StatusFn =
        Arc::new(move || *snapshot.lock().unwrap_or_else(|e| e.into_inner()));
    let channel: Arc<dyn EventChannel> = bus;
    let server_task = tokio::spawn(async move {
        if let Err(e) = server.run(channel, status_fn).await {
            tracing::error!(error = %e, "IPC server stopped");
        }
        server.cleanup();
    });

    presenter.success("Indicator started, waiting for screen sharing events...");
    presenter.info(&format!(
        "PID: {} | Endpoint: {} | Backend: {} | Work area: {}",
        std::process::id(),
        endpoint,
        options.backend,
        options.work_area
    ));

    let report = coordinator.run().await;

    server_task.abort();
    let _ = server_task.await;
    let _ = pid_file.release();

    presenter.success(&format!(
        "Indicator stopped ({} events handled, {} overlays closed)",
        report.events_handled, report.overlays_reaped
    ));
    ExitCode::from(EXIT_SUCCESS)
}
