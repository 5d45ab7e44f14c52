//! UI effect seam for environment-dependent side effects.
//!
//! # Responsibility
//! - Decouple the pure date lookup from page-style and notification calls.
//! - Gate optional capabilities so absent facilities degrade to no-ops.
//!
//! # Invariants
//! - Capability checks are deny-by-default; implementations opt in.
//! - Core never touches the rendering environment except through this trait.

/// Optional UI facilities an effects implementation may provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UiCapability {
    /// Injecting a global page style rule.
    PageStyle,
    /// Showing transient informational notifications.
    Notification,
}

impl UiCapability {
    /// Stable string id used in logs and diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PageStyle => "page_style",
            Self::Notification => "notification",
        }
    }
}

/// Notification payload handed to the UI shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    /// User-facing message text.
    pub message: String,
    /// Display duration in milliseconds.
    pub duration_ms: u64,
    /// Icon asset path rendered next to the message.
    pub icon: Option<String>,
}

/// Environment side effects invoked by the memorial checker.
pub trait UiEffects {
    /// Whether this implementation provides the given capability.
    fn supports(&self, capability: UiCapability) -> bool;

    /// Applies one global page style rule.
    fn apply_page_style(&mut self, rule: &str);

    /// Shows one informational notification.
    ///
    /// Only called after `supports(UiCapability::Notification)` returned
    /// true.
    fn show_notification(&mut self, request: &NotificationRequest);
}

/// No-op effects for headless embeddings; reports no capabilities.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullUiEffects;

impl UiEffects for NullUiEffects {
    fn supports(&self, _capability: UiCapability) -> bool {
        false
    }

    fn apply_page_style(&mut self, _rule: &str) {}

    fn show_notification(&mut self, _request: &NotificationRequest) {}
}

#[cfg(test)]
mod tests {
    use super::{NullUiEffects, UiCapability, UiEffects};

    #[test]
    fn null_effects_report_no_capabilities() {
        let effects = NullUiEffects;
        assert!(!effects.supports(UiCapability::PageStyle));
        assert!(!effects.supports(UiCapability::Notification));
    }

    #[test]
    fn capability_ids_are_stable() {
        assert_eq!(UiCapability::PageStyle.as_str(), "page_style");
        assert_eq!(UiCapability::Notification.as_str(), "notification");
    }
}
