//! Memorial-day check orchestration.
//!
//! # Responsibility
//! - Run the table lookup once per call and drive the commemorative effects.
//!
//! # Invariants
//! - A non-listed date produces no side effects at all.
//! - A listed date applies the grayscale rule exactly once and shows at most
//!   one notification, only when the capability is present.

use crate::memorial::calendar::{memorial_for, MonthDay};
use crate::memorial::effects::{NotificationRequest, UiCapability, UiEffects};
use log::{debug, info};

/// Global style rule desaturating the whole page.
pub const GRAYSCALE_STYLE_RULE: &str = "html{filter: grayscale(100%)}";

/// Notification display duration on memorial days.
pub const MEMORIAL_NOTIFICATION_DURATION_MS: u64 = 14_000;

/// Icon asset shown next to the memorial notification.
pub const MEMORIAL_NOTIFICATION_ICON: &str = "/icon/candle.png";

/// Outcome of a matched memorial-day check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemorialMatch {
    pub date: MonthDay,
    pub label: &'static str,
}

/// Checks one date against the memorial table and applies effects on match.
///
/// Returns the match, or `None` (and does nothing) for unlisted dates.
pub fn check_days(date: MonthDay, effects: &mut dyn UiEffects) -> Option<MemorialMatch> {
    let Some(label) = memorial_for(date) else {
        debug!(
            "event=memorial_check module=memorial status=ok key={} matched=false",
            date.key()
        );
        return None;
    };

    info!(
        "event=memorial_check module=memorial status=ok key={} matched=true label={label}",
        date.key()
    );

    effects.apply_page_style(GRAYSCALE_STYLE_RULE);

    if effects.supports(UiCapability::Notification) {
        effects.show_notification(&NotificationRequest {
            message: format!("今天是{label}"),
            duration_ms: MEMORIAL_NOTIFICATION_DURATION_MS,
            icon: Some(MEMORIAL_NOTIFICATION_ICON.to_string()),
        });
    }

    Some(MemorialMatch { date, label })
}

/// Convenience wrapper checking today's local date.
pub fn check_days_today(effects: &mut dyn UiEffects) -> Option<MemorialMatch> {
    check_days(MonthDay::today(), effects)
}
