//! Coinchart - Main entry point

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::Context;
use coinchart_engine::Session;
use coinchart_gui_lib::{CoinchartApp, Settings, Theme};
use coinchart_networking::CoinGeckoClient;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "coinchart=info,coinchart_gui=debug,coinchart_engine=debug,coinchart_networking=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Ok(path) = dotenv::dotenv() {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    tracing::info!("Starting Coinchart");

    let settings = Settings::from_env().context("invalid configuration")?;
    tracing::info!(
        "API base {}, default coin {}, timeout {:?}",
        settings.api_base,
        settings.default_coin,
        settings.timeout
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("coinchart-worker")
        .build()
        .context("failed to start tokio runtime")?;

    let client = CoinGeckoClient::new(settings.client_config())
        .context("failed to create CoinGecko client")?;
    let session = Session::new(Arc::new(client), runtime.handle().clone(), &settings.default_coin);
    let theme = Theme::new(settings.dark_mode);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Coinchart")
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Coinchart",
        options,
        Box::new(move |cc| Box::new(CoinchartApp::new(&cc.egui_ctx, session, theme))),
    );

    runtime.shutdown_timeout(std::time::Duration::from_secs(1));
    tracing::info!("Coinchart stopped");

    result.map_err(|e| anyhow::anyhow!("eframe error: {e}"))
}
