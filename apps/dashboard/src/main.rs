mod cli;
mod event;
mod terminal;
mod ui;

use clap::Parser;
use climate_dashboard::api::{ApiClient, ReqwestTransport};
use climate_dashboard::config::init_app_config;
use climate_dashboard::logging::{init_logging, LogDestination};
use climate_dashboard::notifications::ToastQueue;
use climate_dashboard::storage::SqliteTokenStore;
use climate_dashboard::{Dashboard, DashboardOptions, Hooks};
use cli::CliArgs;
use color_eyre::Result;
use std::sync::Arc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = init_app_config()?;

    // The terminal UI owns stdout, so it logs to a file.
    let headless = args.wants_headless() || args.save_token.is_some() || !is_terminal();
    let destination = if headless {
        LogDestination::Stderr
    } else {
        LogDestination::File(config.log_file.clone())
    };
    init_logging(config.debug, &destination)?;

    let store = SqliteTokenStore::open(&config.database_url).await?;
    if let Some(token) = &args.save_token {
        store.save_token(token).await?;
        tracing::info!("session token saved");
        return Ok(());
    }

    let toasts = ToastQueue::new();
    let api = ApiClient::from_store(
        config.api_base.clone(),
        &store,
        Arc::new(ReqwestTransport::new()),
        toasts.clone(),
    )
    .await;
    tracing::info!(base_url = api.base_url(), authenticated = api.has_token(), "api client ready");

    let options = DashboardOptions {
        mode: config.mode,
        initial_range: config.initial_range,
        ..DashboardOptions::default()
    };
    let mut dashboard = Dashboard::bootstrap(options, api, toasts, Hooks::default());

    if headless {
        return event::run_headless(&mut dashboard, args.json);
    }

    let mut terminal = terminal::setup_terminal()?;
    let result = event::run(&mut terminal, &mut dashboard).await;
    terminal::cleanup_terminal_state(true, true);

    result
}

fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
