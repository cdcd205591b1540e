// main.rs

mod api;
mod app;
mod config;
mod form;
mod models;
mod parser;
mod progress;
mod store;
mod ui;

use crate::api::AdviceClient;
use crate::app::App;
use crate::config::{config_dir, Config};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dotenv::dotenv;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, File};
use std::io;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

// The terminal belongs to the UI, so logs go to a file
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let Some(dir) = config_dir() else {
        return Ok(());
    };
    fs::create_dir_all(&dir)?;
    let file = File::create(dir.join("focusflow.log"))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("focusflow=debug")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv().ok();

    if std::env::var("FOCUSFLOW_DEBUG").is_ok() {
        init_logging()?;
    }

    let config = Config::load()?;
    let client = AdviceClient::new(config.advice_endpoint.clone());
    info!(endpoint = %client.endpoint(), seed = config.seed_demo_data, "starting");
    let app = App::from_config(&config);

    // Setup terminal UI
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    terminal.hide_cursor()?;

    let res = ui::run_app(&mut terminal, app, &client).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
