//! Update notifications.
//!
//! The backend exposes its own version comparison via `api/check-update`, but
//! the client re-verifies the claim with semver before surfacing anything. A
//! tag that fails to parse means no update, never a false alarm.

use crate::api::TradingApi;
use crate::api::types::UpdateInfo;
use crate::consts::cli_consts::UPDATE_CHECK_DELAY;
use crate::error_classifier::{ErrorClassifier, LogLevel};
use crate::events::{EventType, Payload, Source};
use crate::workers::core::EventSender;
use semver::Version;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Parse a version string, handling an optional 'v' prefix.
fn parse_version(version: &str) -> Result<Version, semver::Error> {
    let clean_version = version.strip_prefix('v').unwrap_or(version);
    Version::parse(clean_version)
}

/// Semantic comparison of two version tags. If either side fails to parse,
/// there is no update.
pub fn is_newer_version(current: &str, latest: &str) -> bool {
    match (parse_version(current), parse_version(latest)) {
        (Ok(current), Ok(latest)) => latest > current,
        _ => false,
    }
}

/// Re-check the server's `update_available` claim locally and clear it when
/// the version tags disagree.
pub fn verified(mut info: UpdateInfo) -> UpdateInfo {
    if info.update_available
        && !is_newer_version(&info.current_version, &info.latest_version)
    {
        info.update_available = false;
    }
    info
}

/// One-shot update check, delayed a few seconds past startup so the first
/// page render is never blocked on it.
pub async fn update_checker(
    api: Arc<dyn TradingApi>,
    event_sender: EventSender,
    mut shutdown: broadcast::Receiver<()>,
) {
    tokio::select! {
        _ = tokio::time::sleep(UPDATE_CHECK_DELAY) => {}
        _ = shutdown.recv() => return,
    }

    match api.check_update().await {
        Ok(info) => {
            let info = verified(info);
            let msg = if info.update_available {
                format!(
                    "Update available: {} -> {}",
                    info.current_version, info.latest_version
                )
            } else {
                "Dashboard is up to date".to_string()
            };
            event_sender
                .send_payload(
                    Source::UpdateChecker,
                    msg,
                    EventType::Success,
                    LogLevel::Debug,
                    Payload::Update(info),
                )
                .await;
        }
        Err(e) => {
            // Startup check failures stay in the activity log.
            let level = ErrorClassifier::new().classify_api_error(&e);
            event_sender
                .send_message(
                    Source::UpdateChecker,
                    format!("Update check failed: {}", e),
                    EventType::Error,
                    level,
                )
                .await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_comparison() {
        assert!(is_newer_version("0.9.0", "0.9.1"));
        assert!(is_newer_version("0.9.0", "v0.9.1"));
        assert!(is_newer_version("0.9.1", "1.0.0"));
        assert!(is_newer_version("v0.9.1", "v1.0.0"));

        assert!(!is_newer_version("0.9.1", "0.9.1"));
        assert!(!is_newer_version("0.9.1", "v0.9.1"));
        assert!(!is_newer_version("0.9.1", "0.9.0"));
        assert!(!is_newer_version("1.0.0", "0.9.1"));
    }

    #[test]
    fn test_edge_case_version_comparisons() {
        assert!(is_newer_version("1.0.0", "1.10.0"));
        assert!(!is_newer_version("1.10.0", "1.9.0"));
        assert!(is_newer_version("1.0.0", "1.0.10"));
        assert!(!is_newer_version("1.0.10", "1.0.9"));

        // Malformed tags never announce an update.
        assert!(!is_newer_version("1.0.0", "not.a.version"));
        assert!(!is_newer_version("1.0.0", ""));
        assert!(!is_newer_version("garbage", "1.0.0"));
    }

    #[test]
    fn test_verified_clears_bogus_server_claim() {
        let info = UpdateInfo {
            update_available: true,
            current_version: "0.3.2".to_string(),
            latest_version: "0.3.2".to_string(),
            ..Default::default()
        };
        assert!(!verified(info).update_available);
    }

    #[test]
    fn test_verified_keeps_real_update() {
        let info = UpdateInfo {
            update_available: true,
            current_version: "0.3.2".to_string(),
            latest_version: "v0.4.0".to_string(),
            ..Default::default()
        };
        assert!(verified(info).update_available);
    }
}
