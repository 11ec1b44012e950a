//! Wire types for the trading server's JSON API.
//!
//! Timestamps arrive as UTC strings without a zone suffix
//! (`"YYYY-MM-DD HH:MM:SS"`); parsing helpers in `format` append `Z`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

/// A configured AI trading model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Model {
    pub id: i64,
    /// Display name chosen by the user.
    pub name: String,
    pub provider_id: i64,
    /// Model identifier string at the provider, e.g. "gpt-4o".
    pub model_name: String,
    #[serde(default)]
    pub initial_capital: Option<f64>,
}

/// An API provider the models are served from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Provider {
    pub id: i64,
    pub name: String,
    pub api_url: String,
    pub api_key: String,
    /// Comma-separated list of available model identifiers.
    #[serde(default)]
    pub models: Option<String>,
}

impl Provider {
    /// Splits the comma-separated model list into trimmed identifiers.
    pub fn model_list(&self) -> Vec<String> {
        self.models
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Long,
    Short,
}

impl Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Long => write!(f, "LONG"),
            Side::Short => write!(f, "SHORT"),
        }
    }
}

/// An open position inside a portfolio snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub coin: String,
    pub side: Side,
    pub quantity: f64,
    pub avg_price: f64,
    #[serde(default)]
    pub current_price: Option<f64>,
    pub leverage: f64,
    #[serde(default)]
    pub pnl: f64,
}

/// Portfolio snapshot, either for one model or aggregated over all models.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Portfolio {
    #[serde(default)]
    pub total_value: f64,
    #[serde(default)]
    pub cash: f64,
    #[serde(default)]
    pub realized_pnl: f64,
    #[serde(default)]
    pub unrealized_pnl: f64,
    #[serde(default)]
    pub initial_capital: Option<f64>,
    #[serde(default)]
    pub positions: Vec<Position>,
}

/// Trade-intent tag attached to each trade record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    BuyToEnter,
    SellToEnter,
    ClosePosition,
    /// Unknown tags render verbatim rather than failing the whole fetch.
    #[serde(other)]
    Other,
}

impl Signal {
    pub fn label(&self) -> &'static str {
        match self {
            Signal::BuyToEnter => "OPEN LONG",
            Signal::SellToEnter => "OPEN SHORT",
            Signal::ClosePosition => "CLOSE",
            Signal::Other => "?",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trade {
    pub timestamp: String,
    pub coin: String,
    pub signal: Signal,
    pub quantity: f64,
    pub price: f64,
    #[serde(default)]
    pub pnl: f64,
    #[serde(default)]
    pub fee: f64,
}

/// One AI response from a model's conversation log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Conversation {
    pub timestamp: String,
    pub ai_response: String,
}

#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketPrice {
    pub price: f64,
    #[serde(default)]
    pub change_24h: f64,
}

/// Market prices keyed by coin symbol. BTreeMap keeps the render order stable.
pub type MarketPrices = BTreeMap<String, MarketPrice>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    pub trading_frequency_minutes: u32,
    pub trading_fee_rate: f64,
    #[serde(default)]
    pub data_source_priority: Option<String>,
}

/// One point of a model's account value history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountValuePoint {
    pub timestamp: String,
    pub total_value: f64,
}

/// Per-model portfolio endpoint response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioResponse {
    pub portfolio: Portfolio,
    /// Newest-first history of account values.
    #[serde(default)]
    pub account_value_history: Vec<AccountValuePoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartPoint {
    pub timestamp: String,
    #[serde(default)]
    pub value: Option<f64>,
}

/// One model's line in the aggregated comparison chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelSeries {
    pub model_name: String,
    #[serde(default)]
    pub data: Vec<ChartPoint>,
}

/// Aggregated portfolio endpoint response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AggregatedResponse {
    pub portfolio: Portfolio,
    #[serde(default)]
    pub chart_data: Vec<ModelSeries>,
}

/// Version-check endpoint response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct UpdateInfo {
    #[serde(default)]
    pub update_available: bool,
    #[serde(default)]
    pub current_version: String,
    #[serde(default)]
    pub latest_version: String,
    #[serde(default)]
    pub release_notes: Option<String>,
    #[serde(default)]
    pub release_url: Option<String>,
    #[serde(default)]
    pub repo_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PasswordStatus {
    pub has_password: bool,
}

/// Result of testing a provider/model pairing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestResult {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub test_response: Option<String>,
}

// ---------------------------------------------------------------------------
// Request bodies. Every mutating request carries a `password` field, empty
// when protection is disabled.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewModel {
    pub provider_id: i64,
    pub model_name: String,
    pub name: String,
    pub initial_capital: f64,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewProvider {
    pub name: String,
    pub api_url: String,
    pub api_key: String,
    pub models: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SettingsUpdate {
    pub trading_frequency_minutes: u32,
    pub trading_fee_rate: f64,
    pub data_source_priority: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_parses_known_and_unknown_tags() {
        let t: Trade = serde_json::from_str(
            r#"{"timestamp":"2025-01-02 03:04:05","coin":"BTC","signal":"buy_to_enter",
                "quantity":0.5,"price":43000.0,"pnl":0.0,"fee":21.5}"#,
        )
        .unwrap();
        assert_eq!(t.signal, Signal::BuyToEnter);

        let t: Trade = serde_json::from_str(
            r#"{"timestamp":"2025-01-02 03:04:05","coin":"BTC","signal":"rebalance",
                "quantity":0.5,"price":43000.0}"#,
        )
        .unwrap();
        assert_eq!(t.signal, Signal::Other);
        assert_eq!(t.fee, 0.0);
    }

    #[test]
    fn test_provider_model_list_splits_and_trims() {
        let provider = Provider {
            id: 1,
            name: "openai".to_string(),
            api_url: "https://api.openai.com/v1".to_string(),
            api_key: "sk-test".to_string(),
            models: Some(" gpt-4o , gpt-4o-mini,,o1 ".to_string()),
        };
        assert_eq!(provider.model_list(), vec!["gpt-4o", "gpt-4o-mini", "o1"]);

        let empty = Provider { models: None, ..provider };
        assert!(empty.model_list().is_empty());
    }

    #[test]
    fn test_portfolio_defaults_missing_fields() {
        let p: Portfolio = serde_json::from_str(r#"{"total_value": 105000.0}"#).unwrap();
        assert_eq!(p.total_value, 105000.0);
        assert_eq!(p.cash, 0.0);
        assert!(p.positions.is_empty());
        assert!(p.initial_capital.is_none());
    }
}
