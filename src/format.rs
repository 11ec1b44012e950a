//! Stat and timestamp formatting.
//!
//! The P&L sign convention is locale-dependent: the original dashboard shows
//! losses unsigned in the default locale but signed under a Chinese locale.
//! The color convention, by contrast, is the same in both locales (profit is
//! always the "positive" tone). Both behaviors are preserved as-is.

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use std::env;

use crate::consts::cli_consts::DEFAULT_INITIAL_CAPITAL;

/// Display locale for sign conventions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    Default,
    Chinese,
}

impl Locale {
    /// Detects a Chinese locale from the usual environment variables.
    pub fn detect() -> Self {
        let lang = env::var("LC_ALL")
            .or_else(|_| env::var("LANG"))
            .unwrap_or_default();
        if lang.to_lowercase().contains("zh") {
            Locale::Chinese
        } else {
            Locale::Default
        }
    }
}

/// How stat values are rendered: dollar amounts or percent of initial capital.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, strum::Display)]
pub enum DisplayMode {
    #[default]
    Amount,
    Percent,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Amount => DisplayMode::Percent,
            DisplayMode::Percent => DisplayMode::Amount,
        }
    }
}

/// Which of the four headline stats a value belongs to. Percent mode treats
/// them differently.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StatKind {
    Total,
    Cash,
    Realized,
    Unrealized,
}

/// Visual tone of a P&L value. Unified across locales.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PnlTone {
    Positive,
    Negative,
    Neutral,
}

/// Formats a dollar value, with the P&L sign convention when `is_pnl`.
///
/// Sign table: `+` prefix iff the value is positive; zero and non-P&L values
/// are unsigned; negative values carry `-` only under the Chinese locale.
pub fn format_pnl(value: f64, is_pnl: bool, locale: Locale) -> String {
    if !is_pnl || value == 0.0 {
        return format!("${:.2}", value.abs());
    }

    let formatted = format!("${:.2}", value.abs());
    if value > 0.0 {
        return format!("+{}", formatted);
    }

    match locale {
        Locale::Chinese => format!("-{}", formatted),
        Locale::Default => formatted,
    }
}

/// Visual tone for a value; neutral for zero and non-P&L stats.
pub fn pnl_tone(value: f64, is_pnl: bool) -> PnlTone {
    if !is_pnl || value == 0.0 {
        PnlTone::Neutral
    } else if value > 0.0 {
        PnlTone::Positive
    } else {
        PnlTone::Negative
    }
}

/// Formats one headline stat according to the display mode.
///
/// Percent mode always divides by `initial_capital` (default 100 000).
pub fn format_stat(
    kind: StatKind,
    value: f64,
    mode: DisplayMode,
    initial_capital: Option<f64>,
    locale: Locale,
) -> String {
    match mode {
        DisplayMode::Amount => {
            let is_pnl = matches!(kind, StatKind::Realized | StatKind::Unrealized);
            format_pnl(value, is_pnl, locale)
        }
        DisplayMode::Percent => {
            let capital = initial_capital.unwrap_or(DEFAULT_INITIAL_CAPITAL);
            match kind {
                StatKind::Total => {
                    let percent = (value - capital) / capital * 100.0;
                    format!("{}{:.2}%", if percent >= 0.0 { "+" } else { "" }, percent)
                }
                StatKind::Cash => format!("{:.2}%", value / capital * 100.0),
                StatKind::Realized | StatKind::Unrealized => {
                    if value == 0.0 {
                        return "0.00%".to_string();
                    }
                    let percent = value / capital * 100.0;
                    format!("{}{:.2}%", if percent >= 0.0 { "+" } else { "" }, percent)
                }
            }
        }
    }
}

/// Parses a server timestamp (`"YYYY-MM-DD HH:MM:SS"`, UTC without a zone
/// suffix) by interpreting it as UTC.
pub fn parse_server_timestamp(timestamp: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Renders a server timestamp as local `HH:MM` for chart axis labels.
pub fn format_time_label(timestamp: &str) -> String {
    match parse_server_timestamp(timestamp) {
        Some(utc) => utc.with_timezone(&Local).format("%H:%M").to_string(),
        None => timestamp.to_string(),
    }
}

/// Renders a server timestamp as a full local datetime for tables.
pub fn format_datetime(timestamp: &str) -> String {
    match parse_server_timestamp(timestamp) {
        Some(utc) => utc
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => timestamp.to_string(),
    }
}

/// Epoch seconds of a server timestamp, for chart x positions and axis sorts.
pub fn timestamp_epoch(timestamp: &str) -> Option<i64> {
    parse_server_timestamp(timestamp).map(|utc| utc.timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pnl_sign_table_chinese() {
        assert_eq!(format_pnl(1234.5, true, Locale::Chinese), "+$1234.50");
        assert_eq!(format_pnl(-1234.5, true, Locale::Chinese), "-$1234.50");
        assert_eq!(format_pnl(0.0, true, Locale::Chinese), "$0.00");
        assert_eq!(format_pnl(-1234.5, false, Locale::Chinese), "$1234.50");
    }

    #[test]
    fn test_pnl_sign_table_default() {
        assert_eq!(format_pnl(1234.5, true, Locale::Default), "+$1234.50");
        // Negative values stay unsigned in the default locale.
        assert_eq!(format_pnl(-1234.5, true, Locale::Default), "$1234.50");
        assert_eq!(format_pnl(0.0, true, Locale::Default), "$0.00");
        assert_eq!(format_pnl(42.0, false, Locale::Default), "$42.00");
    }

    #[test]
    fn test_pnl_tone_is_locale_independent() {
        assert_eq!(pnl_tone(5.0, true), PnlTone::Positive);
        assert_eq!(pnl_tone(-5.0, true), PnlTone::Negative);
        assert_eq!(pnl_tone(0.0, true), PnlTone::Neutral);
        assert_eq!(pnl_tone(5.0, false), PnlTone::Neutral);
    }

    #[test]
    fn test_percent_mode_divides_by_initial_capital() {
        let mode = DisplayMode::Percent;
        assert_eq!(
            format_stat(StatKind::Total, 105_000.0, mode, Some(100_000.0), Locale::Default),
            "+5.00%"
        );
        assert_eq!(
            format_stat(StatKind::Total, 95_000.0, mode, Some(100_000.0), Locale::Default),
            "-5.00%"
        );
        assert_eq!(
            format_stat(StatKind::Cash, 25_000.0, mode, Some(100_000.0), Locale::Default),
            "25.00%"
        );
        assert_eq!(
            format_stat(StatKind::Realized, 0.0, mode, Some(100_000.0), Locale::Default),
            "0.00%"
        );
        assert_eq!(
            format_stat(StatKind::Unrealized, -2_500.0, mode, Some(100_000.0), Locale::Default),
            "-2.50%"
        );
    }

    #[test]
    fn test_percent_mode_defaults_capital_when_absent() {
        // Missing initial_capital falls back to 100 000.
        assert_eq!(
            format_stat(StatKind::Total, 130_000.0, DisplayMode::Percent, None, Locale::Default),
            "+30.00%"
        );
    }

    #[test]
    fn test_amount_mode_uses_pnl_convention_for_pnl_stats() {
        let mode = DisplayMode::Amount;
        assert_eq!(
            format_stat(StatKind::Realized, 250.0, mode, None, Locale::Default),
            "+$250.00"
        );
        assert_eq!(
            format_stat(StatKind::Total, 105_000.0, mode, None, Locale::Default),
            "$105000.00"
        );
    }

    #[test]
    fn test_parse_server_timestamp_is_utc() {
        let parsed = parse_server_timestamp("2025-03-01 12:00:00").unwrap();
        assert_eq!(parsed.timestamp(), 1_740_830_400);
        assert!(parse_server_timestamp("not a timestamp").is_none());
    }

    #[test]
    fn test_format_falls_back_on_unparseable_timestamps() {
        assert_eq!(format_time_label("garbage"), "garbage");
        assert_eq!(format_datetime("garbage"), "garbage");
    }
}
