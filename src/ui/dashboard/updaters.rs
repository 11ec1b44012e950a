//! Dashboard state update logic
//!
//! Applies queued worker events (and their typed payloads) to the state.
//! Payloads are applied last-wins: a slow response from a previous view can
//! overwrite a faster one, matching the original client's behavior.

use super::state::{DashboardState, FormField, FormState, Modal};
use crate::events::{
    ActionOutcome, Event as WorkerEvent, EventType, Payload, Source, ViewMode,
};
use crate::updates::verified;

impl DashboardState {
    /// Update the dashboard state with a new tick and all queued events.
    pub fn update(&mut self) {
        self.tick += 1;

        while let Some(event) = self.pending_events.pop_front() {
            self.add_to_activity_log(event.clone());
            self.process_event(event);
        }
    }

    fn process_event(&mut self, event: WorkerEvent) {
        // User-initiated failures raise a blocking alert; background poll
        // failures stay in the activity log.
        if event.source == Source::Action && event.event_type == EventType::Error {
            self.modal = Some(Modal::Alert(event.msg.clone()));
        }

        if let Some(payload) = event.payload {
            self.apply_payload(payload);
        }
    }

    fn apply_payload(&mut self, payload: Payload) {
        match payload {
            Payload::Models(models) => {
                self.models = models;
                // Keep the selection on a valid row.
                if self.selected_row > self.models.len() {
                    self.selected_row = self.models.len();
                }
            }
            Payload::Providers(providers) => self.providers = providers,
            Payload::Portfolio { response, .. } => {
                self.model_portfolio = Some(response.portfolio);
                self.model_history = response.account_value_history;
            }
            Payload::Aggregated(response) => {
                self.aggregated_portfolio = Some(response.portfolio);
                self.aggregated_series = response.chart_data;
            }
            Payload::Trades { trades, .. } => self.trades = trades,
            Payload::Conversations { conversations, .. } => self.conversations = conversations,
            Payload::MarketPrices(prices) => self.market_prices = prices,
            Payload::Settings(settings) => {
                self.settings = Some(settings);
                self.refresh_settings_form();
            }
            Payload::ProviderModels(models) => self.provider_model_hints = models,
            Payload::TestOutcome { label, result } => {
                self.modal = Some(Modal::Alert(format!("{}: {}", label, result.message)));
            }
            Payload::Update(info) => {
                self.update_info = Some(verified(info));
            }
            Payload::PasswordChallenge(action) => {
                // Single slot: a second challenge overwrites the first.
                self.pending_action = Some(action);
                self.modal = Some(Modal::Password(FormState::new(vec![FormField::masked(
                    "Password",
                )])));
            }
            Payload::ActionDone(outcome) => self.apply_action_outcome(outcome),
        }
    }

    fn apply_action_outcome(&mut self, outcome: ActionOutcome) {
        match outcome {
            ActionOutcome::ModelCreated
            | ActionOutcome::ProviderCreated
            | ActionOutcome::SettingsSaved
            | ActionOutcome::PasswordSet => {
                self.modal = None;
            }
            ActionOutcome::ModelDeleted(id) => {
                self.modal = None;
                // Deleting the model being viewed falls back to aggregated.
                if self.view == ViewMode::SingleModel(id) {
                    self.selected_row = 0;
                    self.set_view(ViewMode::Aggregated);
                }
            }
            ActionOutcome::ProviderDeleted(_) => {
                // The provider modal stays open; its list reloads separately.
                if !matches!(self.modal, Some(Modal::AddProvider(_))) {
                    self.modal = None;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{
        AggregatedResponse, Portfolio, PortfolioResponse, UpdateInfo,
    };
    use crate::config::Config;
    use crate::environment::Environment;
    use crate::error_classifier::LogLevel;
    use crate::events::{Event, PendingAction, TimeRange};
    use std::time::Instant;

    fn state() -> DashboardState {
        DashboardState::new(
            Environment::Local,
            Instant::now(),
            TimeRange::Hour1,
            true,
            Config::default(),
        )
    }

    fn payload_event(payload: Payload) -> Event {
        Event::with_payload(
            Source::PortfolioPoller,
            "test".to_string(),
            EventType::Success,
            LogLevel::Debug,
            payload,
        )
    }

    #[test]
    fn test_aggregated_payload_never_touches_single_model_caches() {
        let mut state = state();
        state.trades = vec![];
        state.add_event(payload_event(Payload::Aggregated(Box::new(
            AggregatedResponse {
                portfolio: Portfolio {
                    total_value: 123.0,
                    ..Default::default()
                },
                chart_data: vec![],
            },
        ))));
        state.update();

        assert_eq!(state.aggregated_portfolio.as_ref().unwrap().total_value, 123.0);
        assert!(state.model_portfolio.is_none());
    }

    #[test]
    fn test_portfolio_payloads_apply_last_wins() {
        let mut state = state();
        for (model_id, value) in [(1, 100.0), (2, 200.0)] {
            state.add_event(payload_event(Payload::Portfolio {
                model_id,
                response: Box::new(PortfolioResponse {
                    portfolio: Portfolio {
                        total_value: value,
                        ..Default::default()
                    },
                    account_value_history: vec![],
                }),
            }));
        }
        state.update();

        // No sequencing: the later response wins regardless of the view.
        assert_eq!(state.model_portfolio.as_ref().unwrap().total_value, 200.0);
    }

    #[test]
    fn test_password_challenge_overwrites_pending_slot() {
        let mut state = state();
        state.add_event(payload_event(Payload::PasswordChallenge(
            PendingAction::DeleteModel(1),
        )));
        state.add_event(payload_event(Payload::PasswordChallenge(
            PendingAction::DeleteModel(2),
        )));
        state.update();

        assert_eq!(state.pending_action, Some(PendingAction::DeleteModel(2)));
        assert!(matches!(state.modal, Some(Modal::Password(_))));
    }

    #[test]
    fn test_action_error_raises_alert_but_poll_error_does_not() {
        let mut state = state();
        state.add_event(Event::portfolio_with_level(
            "background fetch failed".to_string(),
            EventType::Error,
            LogLevel::Warn,
        ));
        state.update();
        assert!(state.modal.is_none());

        state.add_event(Event::action_with_level(
            "delete failed".to_string(),
            EventType::Error,
            LogLevel::Error,
        ));
        state.update();
        assert!(matches!(state.modal, Some(Modal::Alert(_))));
    }

    #[test]
    fn test_deleting_viewed_model_falls_back_to_aggregated() {
        let mut state = state();
        state.set_view(ViewMode::SingleModel(7));
        state.take_view_dirty();

        state.add_event(payload_event(Payload::ActionDone(
            ActionOutcome::ModelDeleted(7),
        )));
        state.update();

        assert_eq!(state.view, ViewMode::Aggregated);
        assert!(state.take_view_dirty());
    }

    #[test]
    fn test_server_update_claim_is_reverified() {
        let mut state = state();
        state.add_event(payload_event(Payload::Update(UpdateInfo {
            update_available: true,
            current_version: "1.0.0".to_string(),
            latest_version: "1.0.0".to_string(),
            ..Default::default()
        })));
        state.update();

        assert!(!state.update_info.as_ref().unwrap().update_available);
        assert!(!state.update_banner_visible());
    }
}
