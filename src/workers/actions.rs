//! User action dispatcher.
//!
//! The UI thread never performs network I/O; it sends `UiAction`s here. The
//! dispatcher gates mutations behind the server's password challenge: when
//! protection is on it hands the pending action back to the UI as a
//! `PasswordChallenge` payload and waits for a `ResolvePassword`. Cancelling
//! the challenge simply never sends that follow-up, so the mutation is a
//! no-op.

use super::core::EventSender;
use super::pollers::{fetch_market_prices, fetch_models, fetch_view_data};
use crate::api::TradingApi;
use crate::api::error::ApiError;
use crate::error_classifier::{ErrorClassifier, LogLevel};
use crate::events::{ActionOutcome, EventType, Payload, PendingAction, PollView, Source};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, watch};

/// Requests from the UI thread.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    /// Manual refresh: models, market prices, and the active view, together.
    Refresh,
    LoadModels,
    LoadProviders,
    LoadSettings,
    /// Begin a mutating action; a password challenge may come back first.
    Submit(PendingAction),
    /// The user answered the password challenge.
    ResolvePassword {
        action: PendingAction,
        password: String,
    },
    FetchProviderModels { api_url: String, api_key: String },
    TestProvider {
        provider_id: i64,
        model_name: String,
        label: String,
    },
    SetPassword {
        old_password: String,
        new_password: String,
    },
    CheckUpdate,
}

/// Runs the dispatcher until the action channel closes or shutdown fires.
pub async fn action_dispatcher(
    api: Arc<dyn TradingApi>,
    event_sender: EventSender,
    mut action_rx: mpsc::Receiver<UiAction>,
    view_rx: watch::Receiver<PollView>,
    mut shutdown: broadcast::Receiver<()>,
) {
    loop {
        tokio::select! {
            action = action_rx.recv() => {
                match action {
                    Some(action) => {
                        handle_action(api.as_ref(), &event_sender, &view_rx, action).await;
                    }
                    None => break,
                }
            }
            _ = shutdown.recv() => break,
        }
    }
}

async fn handle_action(
    api: &dyn TradingApi,
    event_sender: &EventSender,
    view_rx: &watch::Receiver<PollView>,
    action: UiAction,
) {
    match action {
        UiAction::Refresh => {
            let view = *view_rx.borrow();
            futures::join!(
                fetch_models(api, event_sender),
                fetch_market_prices(api, event_sender),
                fetch_view_data(api, event_sender, view),
            );
        }
        UiAction::LoadModels => fetch_models(api, event_sender).await,
        UiAction::LoadProviders => load_providers(api, event_sender).await,
        UiAction::LoadSettings => match api.get_settings().await {
            Ok(settings) => {
                event_sender
                    .send_payload(
                        Source::Action,
                        "Loaded settings".to_string(),
                        EventType::Success,
                        LogLevel::Debug,
                        Payload::Settings(settings),
                    )
                    .await;
            }
            Err(e) => report_action_error(event_sender, "Failed to load settings", &e).await,
        },
        UiAction::Submit(pending) => match api.has_password().await {
            Ok(true) => {
                event_sender
                    .send_payload(
                        Source::Action,
                        format!("Password required to {}", pending.describe()),
                        EventType::StateChange,
                        LogLevel::Info,
                        Payload::PasswordChallenge(pending),
                    )
                    .await;
            }
            // No password set, run the mutation with an empty password.
            Ok(false) => execute_mutation(api, event_sender, pending, String::new()).await,
            Err(e) => report_action_error(event_sender, "Failed to check password state", &e).await,
        },
        UiAction::ResolvePassword { action, password } => {
            execute_mutation(api, event_sender, action, password).await;
        }
        UiAction::FetchProviderModels { api_url, api_key } => {
            match api.fetch_provider_models(&api_url, &api_key).await {
                Ok(models) => {
                    event_sender
                        .send_payload(
                            Source::Action,
                            format!("Fetched {} model identifiers", models.len()),
                            EventType::Success,
                            LogLevel::Info,
                            Payload::ProviderModels(models),
                        )
                        .await;
                }
                Err(e) => {
                    report_action_error(event_sender, "Failed to fetch model list", &e).await;
                }
            }
        }
        UiAction::TestProvider {
            provider_id,
            model_name,
            label,
        } => match api.test_provider(provider_id, &model_name).await {
            Ok(result) => {
                let event_type = if result.success {
                    EventType::Success
                } else {
                    EventType::Error
                };
                event_sender
                    .send_payload(
                        Source::Action,
                        format!("Connection test for {}: {}", label, result.message),
                        event_type,
                        LogLevel::Info,
                        Payload::TestOutcome { label, result },
                    )
                    .await;
            }
            Err(e) => report_action_error(event_sender, "Connection test failed", &e).await,
        },
        UiAction::SetPassword {
            old_password,
            new_password,
        } => match api.set_password(&old_password, &new_password).await {
            Ok(()) => {
                event_sender
                    .send_payload(
                        Source::Action,
                        "Password updated".to_string(),
                        EventType::Success,
                        LogLevel::Info,
                        Payload::ActionDone(ActionOutcome::PasswordSet),
                    )
                    .await;
            }
            Err(e) => report_action_error(event_sender, "Failed to set password", &e).await,
        },
        UiAction::CheckUpdate => match api.check_update().await {
            Ok(info) => {
                event_sender
                    .send_payload(
                        Source::UpdateChecker,
                        "Update check complete".to_string(),
                        EventType::Success,
                        LogLevel::Debug,
                        Payload::Update(info),
                    )
                    .await;
            }
            Err(e) => report_action_error(event_sender, "Failed to check for updates", &e).await,
        },
    }
}

/// Runs a gated mutation, then reloads whatever the mutation invalidated.
async fn execute_mutation(
    api: &dyn TradingApi,
    event_sender: &EventSender,
    mut action: PendingAction,
    password: String,
) {
    // The password travels inside create/update bodies and alongside deletes.
    let result = match &mut action {
        PendingAction::CreateModel(model) => {
            model.password = password;
            api.create_model(model).await.map(|_| ActionOutcome::ModelCreated)
        }
        PendingAction::DeleteModel(id) => api
            .delete_model(*id, &password)
            .await
            .map(|_| ActionOutcome::ModelDeleted(*id)),
        PendingAction::CreateProvider(provider) => {
            provider.password = password;
            api.create_provider(provider)
                .await
                .map(|_| ActionOutcome::ProviderCreated)
        }
        PendingAction::DeleteProvider(id) => api
            .delete_provider(*id, &password)
            .await
            .map(|_| ActionOutcome::ProviderDeleted(*id)),
        PendingAction::SaveSettings(settings) => {
            settings.password = password;
            api.update_settings(settings)
                .await
                .map(|_| ActionOutcome::SettingsSaved)
        }
    };

    match result {
        Ok(outcome) => {
            event_sender
                .send_payload(
                    Source::Action,
                    format!("Completed: {}", action.describe()),
                    EventType::Success,
                    LogLevel::Info,
                    Payload::ActionDone(outcome),
                )
                .await;

            // Reload the affected lists, like the browser client does after
            // each successful mutation.
            match outcome {
                ActionOutcome::ModelCreated | ActionOutcome::ModelDeleted(_) => {
                    fetch_models(api, event_sender).await;
                }
                ActionOutcome::ProviderCreated | ActionOutcome::ProviderDeleted(_) => {
                    load_providers(api, event_sender).await;
                }
                ActionOutcome::SettingsSaved | ActionOutcome::PasswordSet => {}
            }
        }
        Err(e) => {
            let message = format!("Failed to {}", action.describe());
            report_action_error(event_sender, &message, &e).await;
        }
    }
}

async fn load_providers(api: &dyn TradingApi, event_sender: &EventSender) {
    match api.get_providers().await {
        Ok(providers) => {
            event_sender
                .send_payload(
                    Source::Action,
                    format!("Loaded {} providers", providers.len()),
                    EventType::Success,
                    LogLevel::Debug,
                    Payload::Providers(providers),
                )
                .await;
        }
        Err(e) => report_action_error(event_sender, "Failed to load providers", &e).await,
    }
}

/// User-initiated failures surface as Action error events; the UI raises a
/// blocking alert for these, unlike background poll errors.
async fn report_action_error(event_sender: &EventSender, context: &str, error: &ApiError) {
    let level = ErrorClassifier::new().classify_api_error(error);
    event_sender
        .send_message(
            Source::Action,
            format!("{}: {}", context, error),
            EventType::Error,
            level,
        )
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockTradingApi;
    use crate::api::types::NewModel;
    use crate::events::Event;
    use tokio::sync::mpsc;

    fn sender_pair() -> (EventSender, mpsc::Receiver<Event>) {
        let (tx, rx) = mpsc::channel(16);
        (EventSender::new(tx), rx)
    }

    fn view_watch() -> watch::Receiver<PollView> {
        let (tx, rx) = watch::channel(PollView::default());
        std::mem::forget(tx);
        rx
    }

    fn new_model() -> NewModel {
        NewModel {
            provider_id: 1,
            model_name: "gpt-4o".to_string(),
            name: "Scalper".to_string(),
            initial_capital: 100_000.0,
            password: String::new(),
        }
    }

    #[tokio::test]
    /// With protection enabled, submitting a mutation yields a password
    /// challenge and issues no mutation call.
    async fn test_submit_with_protection_challenges_first() {
        let mut api = MockTradingApi::new();
        api.expect_has_password().times(1).returning(|| Ok(true));
        api.expect_create_model().times(0);

        let (sender, mut rx) = sender_pair();
        let action = UiAction::Submit(PendingAction::CreateModel(new_model()));
        handle_action(&api, &sender, &view_watch(), action).await;

        let event = rx.recv().await.unwrap();
        assert!(matches!(
            event.payload,
            Some(Payload::PasswordChallenge(PendingAction::CreateModel(_)))
        ));
    }

    #[tokio::test]
    /// Without protection, the mutation runs immediately with an empty
    /// password and the model list reloads.
    async fn test_submit_without_protection_runs_mutation() {
        let mut api = MockTradingApi::new();
        api.expect_has_password().times(1).returning(|| Ok(false));
        api.expect_create_model()
            .withf(|model| model.password.is_empty())
            .times(1)
            .returning(|_| Ok(()));
        api.expect_get_models().times(1).returning(|| Ok(vec![]));

        let (sender, mut rx) = sender_pair();
        let action = UiAction::Submit(PendingAction::CreateModel(new_model()));
        handle_action(&api, &sender, &view_watch(), action).await;

        let event = rx.recv().await.unwrap();
        assert!(matches!(
            event.payload,
            Some(Payload::ActionDone(ActionOutcome::ModelCreated))
        ));
    }

    #[tokio::test]
    /// Resolving the challenge injects the password into the request body.
    async fn test_resolve_password_injects_password() {
        let mut api = MockTradingApi::new();
        api.expect_delete_model()
            .withf(|id, password| *id == 9 && password == "hunter2")
            .times(1)
            .returning(|_, _| Ok(()));
        api.expect_get_models().times(1).returning(|| Ok(vec![]));

        let (sender, mut rx) = sender_pair();
        let action = UiAction::ResolvePassword {
            action: PendingAction::DeleteModel(9),
            password: "hunter2".to_string(),
        };
        handle_action(&api, &sender, &view_watch(), action).await;

        let event = rx.recv().await.unwrap();
        assert!(matches!(
            event.payload,
            Some(Payload::ActionDone(ActionOutcome::ModelDeleted(9)))
        ));
    }

    #[tokio::test]
    /// A failed mutation reports an Action error event (the UI alerts on
    /// these) and does not reload lists.
    async fn test_failed_mutation_reports_error() {
        let mut api = MockTradingApi::new();
        api.expect_delete_provider().times(1).returning(|_, _| {
            Err(ApiError::Http {
                status: 401,
                message: "密码错误".to_string(),
            })
        });
        api.expect_get_providers().times(0);

        let (sender, mut rx) = sender_pair();
        let action = UiAction::ResolvePassword {
            action: PendingAction::DeleteProvider(4),
            password: "wrong".to_string(),
        };
        handle_action(&api, &sender, &view_watch(), action).await;

        let event = rx.recv().await.unwrap();
        assert_eq!(event.source, Source::Action);
        assert_eq!(event.event_type, EventType::Error);
        assert_eq!(event.log_level, LogLevel::Error);
    }
}
