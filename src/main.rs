//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here; the session check is delegated to AuthService.

use dotenv::dotenv;
use memoryos::adapters::http::{HttpMemoryClient, HttpSessionClient, build_client};
use memoryos::adapters::mock::MockReminderAdapter;
use memoryos::adapters::ui::TuiInputPort;
use memoryos::ports::{InputPort, MemoryPort, ReminderPort, SessionPort};
use memoryos::shared::config::AppConfig;
use memoryos::store::Store;
use memoryos::usecases::{AuthService, DashboardService, MemoryService, ReminderService};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    memoryos::adapters::ui::init_ui();

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "config load failed, using defaults");
        AppConfig::default()
    });
    let api_url = cfg.api_url_or_default();
    let timeout_secs = cfg.request_timeout_secs_or_default();
    info!(api_url = %api_url, timeout_secs, "API endpoint");

    // --- One HTTP client: the cookie jar carries the session between adapters ---
    let client = build_client(Duration::from_secs(timeout_secs))
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    let session: Arc<dyn SessionPort> =
        Arc::new(HttpSessionClient::new(client.clone(), api_url.clone()));
    let memories: Arc<dyn MemoryPort> = Arc::new(HttpMemoryClient::new(client, api_url));

    // --- Reminders are served in-process until the backend exposes them ---
    let reminder_delay_ms = cfg.reminder_delay_ms_or_default();
    info!(reminder_delay_ms, "using in-process reminder adapter");
    let reminders: Arc<dyn ReminderPort> = Arc::new(MockReminderAdapter::with_delay(reminder_delay_ms));

    // --- Store + services ---
    let store = Arc::new(Store::new());
    let auth = Arc::new(AuthService::new(Arc::clone(&session), Arc::clone(&store)));
    let memory_service = Arc::new(MemoryService::new(Arc::clone(&memories), Arc::clone(&store)));
    let reminder_service = Arc::new(ReminderService::new(
        Arc::clone(&reminders),
        Arc::clone(&store),
    ));
    let dashboard = Arc::new(DashboardService::new(memories, reminders, Arc::clone(&store)));

    let mut tui = TuiInputPort::new(
        store,
        auth,
        memory_service,
        reminder_service,
        dashboard,
        cfg.page_size_or_default(),
    );
    // Optional first argument: a screen path such as `/memories`.
    if let Some(path) = std::env::args().nth(1) {
        info!(path = %path, "start screen");
        tui = tui.with_start_path(&path);
    }
    let input_port: Arc<dyn InputPort> = Arc::new(tui);

    // --- Run (session check -> main menu) ---
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
