mod app;
mod config;
mod error;
mod form;
mod store;
mod ui;

use std::{fs::OpenOptions, sync::Mutex};

use engine::Ledger;
use tracing_subscriber::EnvFilter;

use crate::{
    app::{App, ToastLevel},
    config::AppConfig,
    error::{AppError, Result},
    store::Store,
};

fn main() -> Result<()> {
    let config = config::load()?;
    if let Err(err) = init_logging(&config) {
        eprintln!("logging disabled: {err}");
    }

    let initial = config.initial_amount()?;
    let store = Store::new(&config.state_path);
    let (ledger, load_error) = match store.load(initial) {
        Ok(ledger) => (ledger, None),
        Err(err) => {
            tracing::error!("failed to load ledger: {err}");
            let mut message = format!("Error: {err}");
            if err.is_bad_content() {
                match store.set_aside() {
                    Ok(moved) => message.push_str(&format!(" Kept as {}.", moved.display())),
                    Err(err) => tracing::error!("cannot set ledger file aside: {err}"),
                }
            }
            (Ledger::new(initial)?, Some(message))
        }
    };

    let mut app = App::new(ledger, store, config.toast_duration());
    if let Some(message) = load_error {
        app.notify(ToastLevel::Error, message);
    }
    app.run()?;

    print!("{}", app.ledger().summarize());
    Ok(())
}

/// Log to a file: stdout belongs to the terminal UI.
fn init_logging(config: &AppConfig) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!(
            "budget_tui={level},engine={level}",
            level = config.log_level
        )))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| AppError::Logging(err.to_string()))
}
