use anyhow::Result;
use dotenv::dotenv;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use parkki_apuri::api::{HttpApi, ParkingApi};
use parkki_apuri::config::Config;
use parkki_apuri::session::Session;
use parkki_apuri::time::{Clock, SystemClock};
use parkki_apuri::ui;
use parkki_apuri::view::ReservationView;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if present
    dotenv().ok();

    // Load configuration, then initialize tracing from it
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_level))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Parkki-apuri reservation client");

    // Load the persisted sign-in identifiers
    let session = Session::load(&config.session_file)?;

    let api: Arc<dyn ParkingApi> = Arc::new(HttpApi::new(&config.api_base_url));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let mut view = ReservationView::new(api, clock, session);

    // Initial reference-data load, then the interactive loop
    view.load().await;
    ui::print_help();
    ui::render(&view);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if !handle_command(&mut view, line.trim()).await {
                    break;
                }
                ui::render(&view);
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Received shutdown signal");
                break;
            }
        }
    }

    info!("Client shutting down");
    Ok(())
}

/// Dispatch one line of input. Returns false when the user asked to quit.
async fn handle_command(view: &mut ReservationView, input: &str) -> bool {
    let (command, arg) = match input.split_once(' ') {
        Some((command, arg)) => (command, arg.trim()),
        None => (input, ""),
    };

    match command {
        "" => {}
        "locations" => view.load().await,
        "use" if !arg.is_empty() => view.select_location(arg).await,
        "spot" if !arg.is_empty() => view.select_spot(arg),
        "+" => view.increase_hour(),
        "-" => view.decrease_hour(),
        "reserve" => view.submit().await,
        "mine" => view.refresh_reservations().await,
        "cancel" if !arg.is_empty() => view.cancel(arg).await,
        "help" => ui::print_help(),
        "quit" | "exit" => return false,
        _ => ui::print_help(),
    }

    true
}
