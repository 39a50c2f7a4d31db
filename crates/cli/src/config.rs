use clap::Parser;
use portfolio_tracker_core::models::settings::{Settings, DEFAULT_PROVIDER};
use portfolio_tracker_core::providers::registry::ALPHAVANTAGE;

/// Track a stock portfolio and value it against live market data.
#[derive(Debug, Parser)]
#[command(name = "portfolio-tracker", version, about)]
pub struct Args {
    /// Price provider to use ("yahoo" or "alphavantage")
    #[arg(long, default_value = DEFAULT_PROVIDER)]
    pub provider: String,

    /// Alpha Vantage API key
    #[arg(long, env = "ALPHAVANTAGE_API_KEY", hide_env_values = true)]
    pub alphavantage_key: Option<String>,

    /// Provider period token used for the latest close
    #[arg(long, default_value = "1d")]
    pub latest_period: String,

    /// Provider interval token used for the latest close
    #[arg(long, default_value = "1d")]
    pub latest_interval: String,

    /// Provider period token used for date lookups and history
    #[arg(long, default_value = "max")]
    pub history_period: String,

    /// Provider interval token used for date lookups and history
    #[arg(long, default_value = "1d")]
    pub history_interval: String,
}

impl Args {
    pub fn into_settings(self) -> Settings {
        let mut settings = Settings {
            provider: self.provider,
            latest_period: self.latest_period,
            latest_interval: self.latest_interval,
            history_period: self.history_period,
            history_interval: self.history_interval,
            ..Settings::default()
        };
        if let Some(key) = self.alphavantage_key.filter(|k| !k.trim().is_empty()) {
            settings.api_keys.insert(ALPHAVANTAGE.to_string(), key);
        }
        settings
    }
}
