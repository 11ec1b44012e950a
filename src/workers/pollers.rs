//! Background refresh loops.
//!
//! Two independent interval loops mirror the browser client's timers: market
//! prices and the active portfolio view, each every three minutes. They are
//! not deduplicated against manual refreshes, and concurrent fetches for the
//! same resource can race; the last response to arrive wins the render.

use super::core::EventSender;
use crate::api::TradingApi;
use crate::consts::cli_consts::{CONVERSATIONS_LIMIT, TRADES_LIMIT, polling};
use crate::error_classifier::{ErrorClassifier, LogLevel};
use crate::events::{EventType, Payload, PollView, Source, ViewMode};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};

/// Market price polling loop. The first tick fires immediately, covering the
/// initial page load.
pub async fn market_poller(
    api: Arc<dyn TradingApi>,
    event_sender: EventSender,
    mut shutdown: broadcast::Receiver<()>,
) {
    let mut interval = tokio::time::interval(polling::market_interval());
    loop {
        tokio::select! {
            _ = interval.tick() => {
                fetch_market_prices(api.as_ref(), &event_sender).await;
            }
            _ = shutdown.recv() => break,
        }
    }
}

/// Portfolio polling loop. Refetches on its interval and immediately whenever
/// the UI publishes a new view selection (model switch, time range change).
pub async fn portfolio_poller(
    api: Arc<dyn TradingApi>,
    event_sender: EventSender,
    mut view_rx: watch::Receiver<PollView>,
    mut shutdown: broadcast::Receiver<()>,
) {
    let mut interval = tokio::time::interval(polling::portfolio_interval());
    loop {
        tokio::select! {
            _ = interval.tick() => {
                let view = *view_rx.borrow();
                fetch_view_data(api.as_ref(), &event_sender, view).await;
            }
            changed = view_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = *view_rx.borrow_and_update();
                fetch_view_data(api.as_ref(), &event_sender, view).await;
            }
            _ = shutdown.recv() => break,
        }
    }
}

pub async fn fetch_market_prices(api: &dyn TradingApi, event_sender: &EventSender) {
    match api.get_market_prices().await {
        Ok(prices) => {
            event_sender
                .send_payload(
                    Source::MarketPoller,
                    format!("Market prices updated ({} coins)", prices.len()),
                    EventType::Success,
                    LogLevel::Debug,
                    Payload::MarketPrices(prices),
                )
                .await;
        }
        Err(e) => {
            // Background failure: log only, keep the last rendered prices.
            let level = ErrorClassifier::new().classify_api_error(&e);
            event_sender
                .send_message(
                    Source::MarketPoller,
                    format!("Failed to load market prices: {}", e),
                    EventType::Error,
                    level,
                )
                .await;
        }
    }
}

/// Fetch the list of configured models.
pub async fn fetch_models(api: &dyn TradingApi, event_sender: &EventSender) {
    match api.get_models().await {
        Ok(models) => {
            event_sender
                .send_payload(
                    Source::PortfolioPoller,
                    format!("Loaded {} models", models.len()),
                    EventType::Success,
                    LogLevel::Debug,
                    Payload::Models(models),
                )
                .await;
        }
        Err(e) => {
            let level = ErrorClassifier::new().classify_api_error(&e);
            event_sender
                .send_message(
                    Source::PortfolioPoller,
                    format!("Failed to load models: {}", e),
                    EventType::Error,
                    level,
                )
                .await;
        }
    }
}

/// Fetch everything the active view renders.
///
/// Aggregated mode needs one call; single-model mode fetches portfolio,
/// trades, and conversations concurrently, like the browser's `Promise.all`.
pub async fn fetch_view_data(api: &dyn TradingApi, event_sender: &EventSender, view: PollView) {
    match view.view {
        ViewMode::Aggregated => {
            match api.get_aggregated(view.time_range.as_param()).await {
                Ok(response) => {
                    event_sender
                        .send_payload(
                            Source::PortfolioPoller,
                            "Aggregated portfolio updated".to_string(),
                            EventType::Success,
                            LogLevel::Debug,
                            Payload::Aggregated(Box::new(response)),
                        )
                        .await;
                }
                Err(e) => {
                    let level = ErrorClassifier::new().classify_api_error(&e);
                    event_sender
                        .send_message(
                            Source::PortfolioPoller,
                            format!("Failed to load aggregated data: {}", e),
                            EventType::Error,
                            level,
                        )
                        .await;
                }
            }
        }
        ViewMode::SingleModel(model_id) => {
            let (portfolio, trades, conversations) = futures::join!(
                api.get_portfolio(model_id, view.time_range.as_param()),
                api.get_trades(model_id, TRADES_LIMIT),
                api.get_conversations(model_id, CONVERSATIONS_LIMIT),
            );

            match portfolio {
                Ok(response) => {
                    event_sender
                        .send_payload(
                            Source::PortfolioPoller,
                            format!("Portfolio updated for model {}", model_id),
                            EventType::Success,
                            LogLevel::Debug,
                            Payload::Portfolio {
                                model_id,
                                response: Box::new(response),
                            },
                        )
                        .await;
                }
                Err(e) => {
                    let level = ErrorClassifier::new().classify_api_error(&e);
                    event_sender
                        .send_message(
                            Source::PortfolioPoller,
                            format!("Failed to load portfolio: {}", e),
                            EventType::Error,
                            level,
                        )
                        .await;
                }
            }

            if let Ok(trades) = trades {
                event_sender
                    .send_payload(
                        Source::PortfolioPoller,
                        format!("Loaded {} trades", trades.len()),
                        EventType::Success,
                        LogLevel::Trace,
                        Payload::Trades { model_id, trades },
                    )
                    .await;
            }

            if let Ok(conversations) = conversations {
                event_sender
                    .send_payload(
                        Source::PortfolioPoller,
                        format!("Loaded {} conversation entries", conversations.len()),
                        EventType::Success,
                        LogLevel::Trace,
                        Payload::Conversations {
                            model_id,
                            conversations,
                        },
                    )
                    .await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockTradingApi;
    use crate::api::types::{AggregatedResponse, Portfolio};
    use crate::events::TimeRange;
    use tokio::sync::mpsc;

    fn sender_pair() -> (EventSender, mpsc::Receiver<crate::events::Event>) {
        let (tx, rx) = mpsc::channel(16);
        (EventSender::new(tx), rx)
    }

    #[tokio::test]
    /// Aggregated view fetches exactly one endpoint and forwards the payload.
    async fn test_aggregated_fetch_forwards_payload() {
        let mut api = MockTradingApi::new();
        api.expect_get_aggregated()
            .withf(|range| range == "1h")
            .times(1)
            .returning(|_| {
                Ok(AggregatedResponse {
                    portfolio: Portfolio::default(),
                    chart_data: vec![],
                })
            });

        let (sender, mut rx) = sender_pair();
        let view = PollView {
            view: ViewMode::Aggregated,
            time_range: TimeRange::Hour1,
        };
        fetch_view_data(&api, &sender, view).await;

        let event = rx.recv().await.unwrap();
        assert!(matches!(event.payload, Some(Payload::Aggregated(_))));
    }

    #[tokio::test]
    /// A failed background fetch produces an error event, never a panic, and
    /// no payload that would clobber previously rendered state.
    async fn test_poll_failure_is_silent_error_event() {
        let mut api = MockTradingApi::new();
        api.expect_get_market_prices().times(1).returning(|| {
            Err(crate::api::error::ApiError::Http {
                status: 503,
                message: "unavailable".to_string(),
            })
        });

        let (sender, mut rx) = sender_pair();
        fetch_market_prices(&api, &sender).await;

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event_type, EventType::Error);
        assert!(event.payload.is_none());
    }

    #[tokio::test]
    /// Single-model view fetches portfolio, trades, and conversations.
    async fn test_single_model_fetch_emits_three_payloads() {
        let mut api = MockTradingApi::new();
        api.expect_get_portfolio()
            .withf(|id, range| *id == 3 && range == "24h")
            .times(1)
            .returning(|_, _| {
                Ok(crate::api::types::PortfolioResponse {
                    portfolio: Portfolio::default(),
                    account_value_history: vec![],
                })
            });
        api.expect_get_trades()
            .withf(|id, limit| *id == 3 && *limit == TRADES_LIMIT)
            .times(1)
            .returning(|_, _| Ok(vec![]));
        api.expect_get_conversations()
            .withf(|id, limit| *id == 3 && *limit == CONVERSATIONS_LIMIT)
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let (sender, mut rx) = sender_pair();
        let view = PollView {
            view: ViewMode::SingleModel(3),
            time_range: TimeRange::Hour24,
        };
        fetch_view_data(&api, &sender, view).await;

        let mut payloads = 0;
        while let Ok(event) = rx.try_recv() {
            if event.payload.is_some() {
                payloads += 1;
            }
        }
        assert_eq!(payloads, 3);
    }
}
