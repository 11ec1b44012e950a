//! Trading Server API Client
//!
//! A reqwest-based client for the trading server's JSON API.

use crate::api::TradingApi;
use crate::api::error::ApiError;
use crate::api::types::{
    AggregatedResponse, Conversation, MarketPrices, Model, NewModel, NewProvider, PasswordStatus,
    PortfolioResponse, Provider, Settings, SettingsUpdate, TestResult, Trade, UpdateInfo,
};
use crate::environment::Environment;
use reqwest::{Client, ClientBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("aitrade-cli/", env!("CARGO_PKG_VERSION"));

/// Outcome envelope used by the settings and password endpoints.
#[derive(Debug, serde::Deserialize)]
struct Outcome {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

impl Outcome {
    fn into_result(self) -> Result<(), ApiError> {
        if self.success {
            Ok(())
        } else {
            Err(ApiError::Server(
                self.error.unwrap_or_else(|| "Operation failed".to_string()),
            ))
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    environment: Environment,
}

impl ApiClient {
    pub fn new(environment: Environment) -> Self {
        Self {
            client: ClientBuilder::new()
                .connect_timeout(Duration::from_secs(10))
                .timeout(Duration::from_secs(10))
                .user_agent(USER_AGENT)
                .build()
                .expect("Failed to create HTTP client"),
            environment,
        }
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.api_base_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    async fn handle_response_status(response: Response) -> Result<Response, ApiError> {
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = self.build_url(endpoint);
        let response = self.client.get(&url).send().await?;
        let response = Self::handle_response_status(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn post_json<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.build_url(endpoint);
        let response = self.client.post(&url).json(body).send().await?;
        let response = Self::handle_response_status(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn post_no_response<B: Serialize + Sync>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let url = self.build_url(endpoint);
        let response = self.client.post(&url).json(body).send().await?;
        Self::handle_response_status(response).await?;
        Ok(())
    }

    async fn put_json<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.build_url(endpoint);
        let response = self.client.put(&url).json(body).send().await?;
        let response = Self::handle_response_status(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn delete_with_body<B: Serialize + Sync>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let url = self.build_url(endpoint);
        let response = self.client.delete(&url).json(body).send().await?;
        Self::handle_response_status(response).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl TradingApi for ApiClient {
    fn environment(&self) -> &Environment {
        &self.environment
    }

    async fn get_models(&self) -> Result<Vec<Model>, ApiError> {
        self.get_json("api/models").await
    }

    async fn create_model(&self, model: &NewModel) -> Result<(), ApiError> {
        self.post_no_response("api/models", model).await
    }

    async fn delete_model(&self, model_id: i64, password: &str) -> Result<(), ApiError> {
        let endpoint = format!("api/models/{}", model_id);
        self.delete_with_body(&endpoint, &json!({ "password": password }))
            .await
    }

    async fn get_providers(&self) -> Result<Vec<Provider>, ApiError> {
        self.get_json("api/providers").await
    }

    async fn create_provider(&self, provider: &NewProvider) -> Result<(), ApiError> {
        self.post_no_response("api/providers", provider).await
    }

    async fn delete_provider(&self, provider_id: i64, password: &str) -> Result<(), ApiError> {
        let endpoint = format!("api/providers/{}", provider_id);
        self.delete_with_body(&endpoint, &json!({ "password": password }))
            .await
    }

    async fn fetch_provider_models(
        &self,
        api_url: &str,
        api_key: &str,
    ) -> Result<Vec<String>, ApiError> {
        #[derive(serde::Deserialize)]
        struct ModelList {
            #[serde(default)]
            models: Vec<String>,
        }
        let list: ModelList = self
            .post_json(
                "api/providers/models",
                &json!({ "api_url": api_url, "api_key": api_key }),
            )
            .await?;
        Ok(list.models)
    }

    async fn test_provider(
        &self,
        provider_id: i64,
        model_name: &str,
    ) -> Result<TestResult, ApiError> {
        self.post_json(
            "api/providers/test",
            &json!({ "provider_id": provider_id, "model_name": model_name }),
        )
        .await
    }

    async fn get_portfolio(
        &self,
        model_id: i64,
        time_range: &str,
    ) -> Result<PortfolioResponse, ApiError> {
        let endpoint = format!("api/models/{}/portfolio?time_range={}", model_id, time_range);
        self.get_json(&endpoint).await
    }

    async fn get_aggregated(&self, time_range: &str) -> Result<AggregatedResponse, ApiError> {
        let endpoint = format!("api/aggregated/portfolio?time_range={}", time_range);
        self.get_json(&endpoint).await
    }

    async fn get_trades(&self, model_id: i64, limit: u32) -> Result<Vec<Trade>, ApiError> {
        let endpoint = format!("api/models/{}/trades?limit={}", model_id, limit);
        self.get_json(&endpoint).await
    }

    async fn get_conversations(
        &self,
        model_id: i64,
        limit: u32,
    ) -> Result<Vec<Conversation>, ApiError> {
        let endpoint = format!("api/models/{}/conversations?limit={}", model_id, limit);
        self.get_json(&endpoint).await
    }

    async fn get_market_prices(&self) -> Result<MarketPrices, ApiError> {
        self.get_json("api/market/prices").await
    }

    async fn get_settings(&self) -> Result<Settings, ApiError> {
        self.get_json("api/settings").await
    }

    async fn update_settings(&self, settings: &SettingsUpdate) -> Result<(), ApiError> {
        let outcome: Outcome = self.put_json("api/settings", settings).await?;
        outcome.into_result()
    }

    async fn has_password(&self) -> Result<bool, ApiError> {
        let status: PasswordStatus = self.get_json("api/password/has").await?;
        Ok(status.has_password)
    }

    async fn set_password(&self, old_password: &str, new_password: &str) -> Result<(), ApiError> {
        let outcome: Outcome = self
            .post_json(
                "api/password/set",
                &json!({ "old_password": old_password, "new_password": new_password }),
            )
            .await?;
        outcome.into_result()
    }

    async fn check_update(&self) -> Result<UpdateInfo, ApiError> {
        self.get_json("api/check-update").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_joins_slashes() {
        let client = ApiClient::new(Environment::from_url("http://localhost:5000/"));
        assert_eq!(
            client.build_url("/api/models"),
            "http://localhost:5000/api/models"
        );
        assert_eq!(
            client.build_url("api/market/prices"),
            "http://localhost:5000/api/market/prices"
        );
    }

    #[test]
    fn test_outcome_envelope() {
        let ok: Outcome = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(ok.into_result().is_ok());

        let failed: Outcome =
            serde_json::from_str(r#"{"success": false, "error": "wrong password"}"#).unwrap();
        match failed.into_result() {
            Err(ApiError::Server(msg)) => assert_eq!(msg, "wrong password"),
            other => panic!("unexpected: {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    /// Requests against an unreachable server surface as errors, not panics.
    async fn test_unreachable_server_is_an_error() {
        let client = ApiClient::new(Environment::from_url("http://127.0.0.1:9"));
        assert!(client.get_models().await.is_err());
    }
}
