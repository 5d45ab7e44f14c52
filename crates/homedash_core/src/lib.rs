//! Core domain logic for the homedash start page.
//! This crate is the single source of truth for the persisted site state and
//! the memorial-day check.

pub mod db;
pub mod logging;
pub mod memorial;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use memorial::calendar::{memorial_for, MonthDay, MonthDayError};
pub use memorial::checker::{
    check_days, check_days_today, MemorialMatch, GRAYSCALE_STYLE_RULE,
    MEMORIAL_NOTIFICATION_DURATION_MS, MEMORIAL_NOTIFICATION_ICON,
};
pub use memorial::effects::{NotificationRequest, NullUiEffects, UiCapability, UiEffects};
pub use model::site::{Note, SiteData, SiteValidationError, Todo};
pub use repo::kv_repo::{KvError, KvRepository, KvResult, MemoryKvRepository, SqliteKvRepository};
pub use service::site_service::{
    RecoverError, RecoverReport, SiteDataService, SiteField, SiteResult, SiteServiceError,
    SITE_DATA_KEY,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
