//! Dashboard Runtime
//!
//! Spawns the background workers (market poller, portfolio poller, action
//! dispatcher, update checker) and hands the UI the channels it talks to
//! them over.

use crate::consts::cli_consts::{ACTION_QUEUE_SIZE, EVENT_QUEUE_SIZE};
use crate::events::{Event, PollView};
use crate::updates::update_checker;
use crate::workers::actions::{UiAction, action_dispatcher};
use crate::workers::core::EventSender;
use crate::workers::pollers::{fetch_models, market_poller, portfolio_poller};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;

use crate::api::TradingApi;

/// Channel endpoints the UI holds onto.
pub struct RuntimeHandles {
    /// Worker events (fetched payloads, errors, action results).
    pub event_receiver: mpsc::Receiver<Event>,
    /// User actions routed to the dispatcher.
    pub action_sender: mpsc::Sender<UiAction>,
    /// The view the pollers should fetch for; publishing triggers a refetch.
    pub view_sender: watch::Sender<PollView>,
    pub join_handles: Vec<JoinHandle<()>>,
}

/// Starts all background workers and performs the initial model-list fetch.
pub async fn start_runtime(
    api: Arc<dyn TradingApi>,
    shutdown: broadcast::Receiver<()>,
) -> RuntimeHandles {
    let mut join_handles = Vec::new();
    let (event_sender, event_receiver) = mpsc::channel::<Event>(EVENT_QUEUE_SIZE);
    let (action_sender, action_receiver) = mpsc::channel::<UiAction>(ACTION_QUEUE_SIZE);
    let (view_sender, view_receiver) = watch::channel(PollView::default());
    let event_sender = EventSender::new(event_sender);

    // Market price loop
    let market_handle = {
        let api = api.clone();
        let event_sender = event_sender.clone();
        let shutdown = shutdown.resubscribe();
        tokio::spawn(async move {
            market_poller(api, event_sender, shutdown).await;
        })
    };
    join_handles.push(market_handle);

    // Portfolio loop, refetching on view changes
    let portfolio_handle = {
        let api = api.clone();
        let event_sender = event_sender.clone();
        let view_receiver = view_receiver.clone();
        let shutdown = shutdown.resubscribe();
        tokio::spawn(async move {
            portfolio_poller(api, event_sender, view_receiver, shutdown).await;
        })
    };
    join_handles.push(portfolio_handle);

    // Action dispatcher
    let dispatcher_handle = {
        let api = api.clone();
        let event_sender = event_sender.clone();
        let shutdown = shutdown.resubscribe();
        tokio::spawn(async move {
            action_dispatcher(api, event_sender, action_receiver, view_receiver, shutdown).await;
        })
    };
    join_handles.push(dispatcher_handle);

    // One-shot delayed update check
    let update_handle = {
        let api = api.clone();
        let event_sender = event_sender.clone();
        let shutdown = shutdown.resubscribe();
        tokio::spawn(async move {
            update_checker(api, event_sender, shutdown).await;
        })
    };
    join_handles.push(update_handle);

    // Initial page load: the model list. The pollers' first ticks cover
    // market prices and the aggregated view.
    fetch_models(api.as_ref(), &event_sender).await;

    RuntimeHandles {
        event_receiver,
        action_sender,
        view_sender,
        join_handles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockTradingApi;
    use crate::api::types::{AggregatedResponse, Portfolio, UpdateInfo};
    use crate::events::Payload;
    use std::time::Duration;

    #[tokio::test]
    async fn test_runtime_performs_initial_fetches() {
        let mut api = MockTradingApi::new();
        api.expect_get_models().returning(|| Ok(vec![]));
        api.expect_get_market_prices()
            .returning(|| Ok(Default::default()));
        api.expect_get_aggregated().returning(|_| {
            Ok(AggregatedResponse {
                portfolio: Portfolio::default(),
                chart_data: vec![],
            })
        });
        api.expect_check_update()
            .returning(|| Ok(UpdateInfo::default()));

        let (shutdown_sender, _) = broadcast::channel(1);
        let mut handles =
            start_runtime(Arc::new(api), shutdown_sender.subscribe()).await;

        // The model list arrives first, then the pollers' immediate ticks.
        let mut saw_models = false;
        for _ in 0..4 {
            match tokio::time::timeout(Duration::from_secs(2), handles.event_receiver.recv()).await
            {
                Ok(Some(event)) => {
                    if matches!(event.payload, Some(Payload::Models(_))) {
                        saw_models = true;
                        break;
                    }
                }
                _ => break,
            }
        }
        assert!(saw_models);

        let _ = shutdown_sender.send(());
        for handle in handles.join_handles.drain(..) {
            handle.abort();
        }
    }
}
