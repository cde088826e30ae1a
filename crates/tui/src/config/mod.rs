use std::time::Duration;

use clap::Parser;
use engine::MoneyCents;
use serde::Deserialize;

use crate::error::{AppError, Result};

const DEFAULT_CONFIG_PATH: &str = "config/budget.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// JSON file holding the ledger between sessions.
    pub state_path: String,
    /// Funds a fresh (or reset) ledger starts with, as a decimal string.
    pub initial_amount: String,
    pub toast_seconds: u64,
    pub log_file: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            state_path: "budget.json".to_string(),
            initial_amount: "1000".to_string(),
            toast_seconds: 3,
            log_file: "budget_tui.log".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn initial_amount(&self) -> Result<MoneyCents> {
        let amount: MoneyCents = self.initial_amount.parse().map_err(|err| AppError::Setting {
            key: "initial_amount",
            reason: format!("{err}"),
        })?;
        if amount.is_negative() {
            return Err(AppError::Setting {
                key: "initial_amount",
                reason: "must not be negative".to_string(),
            });
        }
        Ok(amount)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_secs(self.toast_seconds)
    }
}

#[derive(Debug, Parser)]
#[command(name = "budget_tui", about = "Personal budgeting ledger", disable_version_flag = true)]
pub struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the ledger state file.
    #[arg(long)]
    state_path: Option<String>,
    /// Override the initial fund amount (e.g. 2500 or 2500.00).
    #[arg(long)]
    initial_amount: Option<String>,
    /// Override the log file.
    #[arg(long)]
    log_file: Option<String>,
    /// Override the log level (error, warn, info, debug, trace).
    #[arg(long)]
    log_level: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    load_from(Args::parse())
}

pub fn load_from(args: Args) -> Result<AppConfig> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("BUDGET_TUI"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(state_path) = args.state_path {
        settings.state_path = state_path;
    }
    if let Some(initial_amount) = args.initial_amount {
        settings.initial_amount = initial_amount;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = log_file;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }

    // Fail at startup rather than on the first reset.
    settings.initial_amount()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["budget_tui"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults_without_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let settings = load_from(args(&["--config", missing.to_str().unwrap()])).unwrap();

        assert_eq!(settings.state_path, "budget.json");
        assert_eq!(settings.initial_amount().unwrap(), MoneyCents::from_units(1000));
        assert_eq!(settings.toast_duration(), Duration::from_secs(3));
    }

    #[test]
    fn file_values_then_cli_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("budget.toml");
        fs::write(
            &path,
            "state_path = \"from_file.json\"\ninitial_amount = \"2500\"\ntoast_seconds = 5\n",
        )
        .unwrap();

        let settings = load_from(args(&[
            "--config",
            path.to_str().unwrap(),
            "--state-path",
            "from_cli.json",
        ]))
        .unwrap();

        assert_eq!(settings.state_path, "from_cli.json");
        assert_eq!(settings.initial_amount().unwrap(), MoneyCents::from_units(2500));
        assert_eq!(settings.toast_seconds, 5);
    }

    #[test]
    fn rejects_bad_initial_amount() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let config = missing.to_str().unwrap();

        let err = load_from(args(&["--config", config, "--initial-amount", "lots"])).unwrap_err();
        assert!(matches!(err, AppError::Setting { key: "initial_amount", .. }));

        let err = load_from(args(&["--config", config, "--initial-amount=-5"])).unwrap_err();
        assert!(matches!(err, AppError::Setting { key: "initial_amount", .. }));
    }
}
