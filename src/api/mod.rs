use crate::api::error::ApiError;
use crate::api::types::{
    AggregatedResponse, Conversation, MarketPrices, Model, NewModel, NewProvider, PortfolioResponse,
    Provider, Settings, SettingsUpdate, TestResult, Trade, UpdateInfo,
};
use crate::environment::Environment;

pub(crate) mod client;
pub use client::ApiClient;
pub mod error;
pub mod types;

#[cfg(test)]
use mockall::{automock, predicate::*};

/// The trading server's JSON API, one method per endpoint.
///
/// Mutating methods take a `password` argument; callers pass the empty string
/// when server-side protection is disabled.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait TradingApi: Send + Sync {
    fn environment(&self) -> &Environment;

    /// List the configured models.
    async fn get_models(&self) -> Result<Vec<Model>, ApiError>;

    /// Create a new model.
    async fn create_model(&self, model: &NewModel) -> Result<(), ApiError>;

    /// Delete a model and its history.
    async fn delete_model(&self, model_id: i64, password: &str) -> Result<(), ApiError>;

    /// List the configured API providers.
    async fn get_providers(&self) -> Result<Vec<Provider>, ApiError>;

    /// Create a new API provider.
    async fn create_provider(&self, provider: &NewProvider) -> Result<(), ApiError>;

    /// Delete an API provider.
    async fn delete_provider(&self, provider_id: i64, password: &str) -> Result<(), ApiError>;

    /// Ask the provider's own API which model identifiers it offers.
    async fn fetch_provider_models(
        &self,
        api_url: &str,
        api_key: &str,
    ) -> Result<Vec<String>, ApiError>;

    /// Run a connectivity test against one provider/model pairing.
    async fn test_provider(
        &self,
        provider_id: i64,
        model_name: &str,
    ) -> Result<TestResult, ApiError>;

    /// One model's portfolio snapshot plus account value history.
    async fn get_portfolio(
        &self,
        model_id: i64,
        time_range: &str,
    ) -> Result<PortfolioResponse, ApiError>;

    /// Portfolio summed over all models, with per-model chart series.
    async fn get_aggregated(&self, time_range: &str) -> Result<AggregatedResponse, ApiError>;

    /// One model's most recent trades, newest first.
    async fn get_trades(&self, model_id: i64, limit: u32) -> Result<Vec<Trade>, ApiError>;

    /// One model's most recent conversation log entries.
    async fn get_conversations(
        &self,
        model_id: i64,
        limit: u32,
    ) -> Result<Vec<Conversation>, ApiError>;

    /// Current market prices keyed by coin symbol.
    async fn get_market_prices(&self) -> Result<MarketPrices, ApiError>;

    async fn get_settings(&self) -> Result<Settings, ApiError>;

    async fn update_settings(&self, settings: &SettingsUpdate) -> Result<(), ApiError>;

    /// Whether server-side password protection is enabled.
    async fn has_password(&self) -> Result<bool, ApiError>;

    /// Set or change the operation password.
    async fn set_password(&self, old_password: &str, new_password: &str) -> Result<(), ApiError>;

    /// Query the server's version-check endpoint.
    async fn check_update(&self) -> Result<UpdateInfo, ApiError>;
}
