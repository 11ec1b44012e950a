//! Event System
//!
//! Types and implementations for worker events, fetched payloads, and the
//! shared view vocabulary the pollers and the UI agree on.

use crate::api::types::{
    AggregatedResponse, Conversation, MarketPrices, Model, PortfolioResponse, Provider, Settings,
    TestResult, Trade, UpdateInfo,
};
use crate::error_classifier::LogLevel;
use crate::logging::should_log_with_env;
use chrono::Local;
use std::fmt::Display;

/// Which background worker produced an event.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Source {
    /// Market price polling loop.
    MarketPoller,
    /// Portfolio/trades/conversations polling loop.
    PortfolioPoller,
    /// One-shot (and manual) version check.
    UpdateChecker,
    /// User-initiated actions routed through the dispatcher.
    Action,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
    Waiting,
    StateChange,
}

/// Dashboard mode: exactly one of these is ever active.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ViewMode {
    /// All models summed and plotted together.
    Aggregated,
    /// One model's detail (positions, trades, conversations).
    SingleModel(i64),
}

impl ViewMode {
    pub fn is_aggregated(&self) -> bool {
        matches!(self, ViewMode::Aggregated)
    }

    pub fn model_id(&self) -> Option<i64> {
        match self {
            ViewMode::Aggregated => None,
            ViewMode::SingleModel(id) => Some(*id),
        }
    }
}

/// Client-selected history window passed to the backend.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum TimeRange {
    #[default]
    Hour1,
    Hour6,
    Hour24,
    Day7,
    All,
}

impl TimeRange {
    pub fn as_param(&self) -> &'static str {
        match self {
            TimeRange::Hour1 => "1h",
            TimeRange::Hour6 => "6h",
            TimeRange::Hour24 => "24h",
            TimeRange::Day7 => "7d",
            TimeRange::All => "all",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            TimeRange::Hour1 => TimeRange::Hour6,
            TimeRange::Hour6 => TimeRange::Hour24,
            TimeRange::Hour24 => TimeRange::Day7,
            TimeRange::Day7 => TimeRange::All,
            TimeRange::All => TimeRange::Hour1,
        }
    }
}

impl std::str::FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1h" => Ok(TimeRange::Hour1),
            "6h" => Ok(TimeRange::Hour6),
            "24h" => Ok(TimeRange::Hour24),
            "7d" => Ok(TimeRange::Day7),
            "all" => Ok(TimeRange::All),
            other => Err(format!(
                "unknown time range '{}', expected one of: 1h, 6h, 24h, 7d, all",
                other
            )),
        }
    }
}

/// The view the pollers should fetch for, published by the UI over a watch
/// channel.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PollView {
    pub view: ViewMode,
    pub time_range: TimeRange,
}

impl Default for PollView {
    fn default() -> Self {
        Self {
            view: ViewMode::Aggregated,
            time_range: TimeRange::default(),
        }
    }
}

/// A mutation waiting on the password challenge. Exactly one can be pending;
/// a second challenge overwrites the first (inherited from the original
/// client, where the modal held a single resolver slot).
#[derive(Debug, Clone, PartialEq)]
pub enum PendingAction {
    CreateModel(crate::api::types::NewModel),
    DeleteModel(i64),
    CreateProvider(crate::api::types::NewProvider),
    DeleteProvider(i64),
    SaveSettings(crate::api::types::SettingsUpdate),
}

impl PendingAction {
    pub fn describe(&self) -> &'static str {
        match self {
            PendingAction::CreateModel(_) => "add model",
            PendingAction::DeleteModel(_) => "delete model",
            PendingAction::CreateProvider(_) => "add provider",
            PendingAction::DeleteProvider(_) => "delete provider",
            PendingAction::SaveSettings(_) => "save settings",
        }
    }
}

/// Typed data carried from the workers into the UI thread.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Models(Vec<Model>),
    Providers(Vec<Provider>),
    /// Single-model portfolio, tagged with the model it was fetched for.
    Portfolio {
        model_id: i64,
        response: Box<PortfolioResponse>,
    },
    Aggregated(Box<AggregatedResponse>),
    Trades { model_id: i64, trades: Vec<Trade> },
    Conversations {
        model_id: i64,
        conversations: Vec<Conversation>,
    },
    MarketPrices(MarketPrices),
    Settings(Settings),
    ProviderModels(Vec<String>),
    TestOutcome { label: String, result: TestResult },
    Update(UpdateInfo),
    /// The server has password protection enabled; the UI must collect a
    /// password before this action can run.
    PasswordChallenge(PendingAction),
    ActionDone(ActionOutcome),
}

/// Completed mutations, for modal teardown and follow-up view switches.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ActionOutcome {
    ModelCreated,
    ModelDeleted(i64),
    ProviderCreated,
    ProviderDeleted(i64),
    SettingsSaved,
    PasswordSet,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub source: Source,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
    /// Fetched data or action signal, if this event carries one.
    pub payload: Option<Payload>,
}

impl Event {
    fn new(source: Source, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            source,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
            payload: None,
        }
    }

    pub fn with_payload(
        source: Source,
        msg: String,
        event_type: EventType,
        log_level: LogLevel,
        payload: Payload,
    ) -> Self {
        let mut event = Self::new(source, msg, event_type, log_level);
        event.payload = Some(payload);
        event
    }

    pub fn market_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Source::MarketPoller, msg, event_type, log_level)
    }

    pub fn portfolio_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Source::PortfolioPoller, msg, event_type, log_level)
    }

    pub fn update_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Source::UpdateChecker, msg, event_type, log_level)
    }

    pub fn action_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Source::Action, msg, event_type, log_level)
    }

    pub fn should_display(&self) -> bool {
        // Always show success events and info level events
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        // StateChange events are handled separately (not displayed in logs)
        if self.event_type == EventType::StateChange {
            return false;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.event_type, self.timestamp, self.msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_mode_exclusivity() {
        // The enum makes "both active" unrepresentable; these cover the accessors.
        let aggregated = ViewMode::Aggregated;
        assert!(aggregated.is_aggregated());
        assert_eq!(aggregated.model_id(), None);

        let single = ViewMode::SingleModel(7);
        assert!(!single.is_aggregated());
        assert_eq!(single.model_id(), Some(7));
    }

    #[test]
    fn test_time_range_cycle_covers_all_windows() {
        let mut range = TimeRange::default();
        let mut seen = vec![range.as_param()];
        for _ in 0..4 {
            range = range.next();
            seen.push(range.as_param());
        }
        assert_eq!(seen, vec!["1h", "6h", "24h", "7d", "all"]);
        assert_eq!(range.next(), TimeRange::Hour1);
    }

    #[test]
    fn test_success_events_always_display() {
        let event = Event::market_with_level(
            "Market prices updated".to_string(),
            EventType::Success,
            LogLevel::Debug,
        );
        assert!(event.should_display());
    }
}
