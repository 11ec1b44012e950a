pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! This module contains all configuration constants for the dashboard
    //! client, organized by functional area for clarity and maintainability.

    use std::time::Duration;

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Maximum event buffer size for worker channels.
    pub const EVENT_QUEUE_SIZE: usize = 100;

    /// Maximum number of queued user actions awaiting dispatch.
    pub const ACTION_QUEUE_SIZE: usize = 16;

    // =============================================================================
    // POLLING CONFIGURATION
    // =============================================================================

    /// Polling configuration for the two background refresh loops. The
    /// intervals match the server's data update cadence; the loops run
    /// independently of user-triggered refreshes.
    pub mod polling {
        use std::time::Duration;

        /// Interval between market price refreshes (milliseconds).
        pub const MARKET_INTERVAL_MS: u64 = 180_000;

        /// Interval between portfolio/trades/conversations refreshes (milliseconds).
        pub const PORTFOLIO_INTERVAL_MS: u64 = 180_000;

        pub const fn market_interval() -> Duration {
            Duration::from_millis(MARKET_INTERVAL_MS)
        }

        pub const fn portfolio_interval() -> Duration {
            Duration::from_millis(PORTFOLIO_INTERVAL_MS)
        }
    }

    // =============================================================================
    // UPDATE CHECK CONFIGURATION
    // =============================================================================

    /// Delay before the one-shot startup update check.
    pub const UPDATE_CHECK_DELAY: Duration = Duration::from_secs(3);

    /// How long a dismissed update notice stays hidden (milliseconds).
    pub const UPDATE_DISMISS_TTL_MS: i64 = 24 * 60 * 60 * 1000;

    // =============================================================================
    // DATA WINDOW CONFIGURATION
    // =============================================================================

    /// Number of trades requested per trade-log fetch.
    pub const TRADES_LIMIT: u32 = 50;

    /// Number of conversation entries requested per fetch.
    pub const CONVERSATIONS_LIMIT: u32 = 20;

    // =============================================================================
    // CHART CONFIGURATION
    // =============================================================================

    /// Y-axis max is this factor times the observed data maximum.
    pub const CHART_Y_HEADROOM: f64 = 1.3;

    /// Fallback data maximum when a chart has no points.
    pub const CHART_EMPTY_MAX: f64 = 100_000.0;

    /// Starting capital assumed when the server omits `initial_capital`.
    pub const DEFAULT_INITIAL_CAPITAL: f64 = 100_000.0;
}
