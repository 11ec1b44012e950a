//! Core worker utilities

use crate::error_classifier::LogLevel;
use crate::events::{Event, EventType, Payload, Source};
use tokio::sync::mpsc;

/// Common event sending utilities for workers
#[derive(Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Send a generic event
    pub async fn send_event(&self, event: Event) {
        let _ = self.sender.send(event).await;
    }

    pub async fn send_message(
        &self,
        source: Source,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        let event = match source {
            Source::MarketPoller => Event::market_with_level(message, event_type, log_level),
            Source::PortfolioPoller => Event::portfolio_with_level(message, event_type, log_level),
            Source::UpdateChecker => Event::update_with_level(message, event_type, log_level),
            Source::Action => Event::action_with_level(message, event_type, log_level),
        };
        self.send_event(event).await;
    }

    pub async fn send_payload(
        &self,
        source: Source,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
        payload: Payload,
    ) {
        self.send_event(Event::with_payload(
            source, message, event_type, log_level, payload,
        ))
        .await;
    }
}
