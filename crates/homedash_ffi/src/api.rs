//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Hand UI effects back to the shell as data instead of touching the
//!   rendering environment from Rust.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Responses are deterministic envelopes with `ok`/`message` semantics.

use homedash_core::db::open_db;
use homedash_core::{
    check_days, core_version as core_version_inner, init_logging as init_logging_inner,
    ping as ping_inner, MonthDay, NotificationRequest, SiteDataService, SqliteKvRepository,
    UiCapability, UiEffects,
};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::OnceLock;

const SITE_DB_FILE_NAME: &str = "homedash_site.sqlite3";
static SITE_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static DEFAULT_SHORTCUT: OnceLock<Value> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Generic action response envelope for site store mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Optional created/affected entry id.
    pub entry_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl SiteActionResponse {
    fn success(message: impl Into<String>, entry_id: Option<String>) -> Self {
        Self {
            ok: true,
            entry_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            entry_id: None,
            message: message.into(),
        }
    }
}

/// Snapshot envelope carrying the current state as a JSON string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSnapshotResponse {
    pub ok: bool,
    /// Serialized `SiteData` (camelCase fields) when `ok`.
    pub site_json: Option<String>,
    pub message: String,
}

/// Recovery response naming the applied top-level fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRecoverResponse {
    pub ok: bool,
    /// Applied field names in canonical order (empty on failure).
    pub applied_fields: Vec<String>,
    pub message: String,
}

/// Registers the UI-supplied default shortcut configuration.
///
/// The default is consulted whenever storage holds no usable state yet. First
/// registration wins for the process lifetime.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never panics; rejects malformed JSON.
#[flutter_rust_bridge::frb(sync)]
pub fn site_set_default_shortcut(shortcut_json: String) -> SiteActionResponse {
    let value: Value = match serde_json::from_str(&shortcut_json) {
        Ok(value) => value,
        Err(err) => {
            return SiteActionResponse::failure(format!(
                "site_set_default_shortcut failed: invalid JSON: {err}"
            ));
        }
    };
    match DEFAULT_SHORTCUT.set(value) {
        Ok(()) => SiteActionResponse::success("Default shortcut registered.", None),
        Err(_) => SiteActionResponse::success("Default shortcut already registered.", None),
    }
}

/// Returns the current site state.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn site_snapshot() -> SiteSnapshotResponse {
    let result = with_site_service(|service| {
        serde_json::to_string(service.state())
            .map_err(|err| format!("state serialization failed: {err}"))
    });
    match result {
        Ok(site_json) => SiteSnapshotResponse {
            ok: true,
            site_json: Some(site_json),
            message: "Snapshot ready.".to_string(),
        },
        Err(err) => SiteSnapshotResponse {
            ok: false,
            site_json: None,
            message: format!("site_snapshot failed: {err}"),
        },
    }
}

/// Replaces the shortcut configuration wholesale.
///
/// # FFI contract
/// - Sync call, DB-backed execution; persists before returning.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn site_set_shortcut_data(shortcut_json: String) -> SiteActionResponse {
    let value: Value = match serde_json::from_str(&shortcut_json) {
        Ok(value) => value,
        Err(err) => {
            return SiteActionResponse::failure(format!(
                "site_set_shortcut_data failed: invalid JSON: {err}"
            ));
        }
    };
    match with_site_service(|service| {
        service
            .set_shortcut_data(value)
            .map_err(|err| err.to_string())
    }) {
        Ok(()) => SiteActionResponse::success("Shortcut configuration saved.", None),
        Err(err) => SiteActionResponse::failure(format!("site_set_shortcut_data failed: {err}")),
    }
}

/// Applies a backup payload through the atomic recovery reducer.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Either the whole payload applies or nothing does.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn site_recover(payload_json: String) -> SiteRecoverResponse {
    let payload: Value = match serde_json::from_str(&payload_json) {
        Ok(value) => value,
        Err(err) => {
            return SiteRecoverResponse {
                ok: false,
                applied_fields: Vec::new(),
                message: format!("site_recover failed: invalid JSON: {err}"),
            };
        }
    };

    let result = with_site_service(|service| {
        service
            .recover_site_data(&payload)
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(report) => SiteRecoverResponse {
            ok: true,
            applied_fields: report
                .applied
                .iter()
                .map(|field| field.as_str().to_string())
                .collect(),
            message: "Site data recovered.".to_string(),
        },
        Err(err) => SiteRecoverResponse {
            ok: false,
            applied_fields: Vec::new(),
            message: format!("site_recover failed: {err}"),
        },
    }
}

/// Creates one note.
///
/// # FFI contract
/// - Sync call, DB-backed execution; persists before returning.
/// - Never panics; returns the created entry id on success.
#[flutter_rust_bridge::frb(sync)]
pub fn site_add_note(title: String, content: String) -> SiteActionResponse {
    match with_site_service(|service| {
        service
            .add_note(title.trim().to_string(), content)
            .map_err(|err| err.to_string())
    }) {
        Ok(note) => SiteActionResponse::success("Note created.", Some(note.id)),
        Err(err) => SiteActionResponse::failure(format!("site_add_note failed: {err}")),
    }
}

/// Removes one note by id.
#[flutter_rust_bridge::frb(sync)]
pub fn site_remove_note(id: String) -> SiteActionResponse {
    match with_site_service(|service| service.remove_note(&id).map_err(|err| err.to_string())) {
        Ok(()) => SiteActionResponse::success("Note removed.", Some(id)),
        Err(err) => SiteActionResponse::failure(format!("site_remove_note failed: {err}")),
    }
}

/// Creates one open to-do.
#[flutter_rust_bridge::frb(sync)]
pub fn site_add_todo(text: String) -> SiteActionResponse {
    match with_site_service(|service| {
        service
            .add_todo(text.trim().to_string())
            .map_err(|err| err.to_string())
    }) {
        Ok(todo) => SiteActionResponse::success("Todo created.", Some(todo.id)),
        Err(err) => SiteActionResponse::failure(format!("site_add_todo failed: {err}")),
    }
}

/// Sets one to-do's completion flag.
#[flutter_rust_bridge::frb(sync)]
pub fn site_set_todo_completed(id: String, completed: bool) -> SiteActionResponse {
    match with_site_service(|service| {
        service
            .set_todo_completed(&id, completed)
            .map_err(|err| err.to_string())
    }) {
        Ok(()) => SiteActionResponse::success("Todo updated.", Some(id)),
        Err(err) => SiteActionResponse::failure(format!("site_set_todo_completed failed: {err}")),
    }
}

/// Notification payload the shell renders on memorial days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorialNotificationPayload {
    pub message: String,
    pub duration_ms: u64,
    pub icon: Option<String>,
}

/// Memorial check envelope: effects are returned as data for the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorialCheckResponse {
    pub matched: bool,
    pub label: Option<String>,
    /// Global style rule to inject when `matched`.
    pub style_rule: Option<String>,
    /// Present when `matched` and the shell reported notification support.
    pub notification: Option<MemorialNotificationPayload>,
    pub message: String,
}

/// Checks one explicit date against the memorial table.
///
/// # FFI contract
/// - Sync call, pure lookup; effects come back as response data.
/// - Never panics; out-of-range dates produce a failure message.
#[flutter_rust_bridge::frb(sync)]
pub fn memorial_check(month: u32, day: u32, notifications_available: bool) -> MemorialCheckResponse {
    let date = match MonthDay::try_new(month, day) {
        Ok(date) => date,
        Err(err) => {
            return MemorialCheckResponse {
                matched: false,
                label: None,
                style_rule: None,
                notification: None,
                message: format!("memorial_check failed: {err}"),
            };
        }
    };
    run_memorial_check(date, notifications_available)
}

/// Checks today's local date against the memorial table.
///
/// # FFI contract
/// - Sync call; intended to run once at application start.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn memorial_check_today(notifications_available: bool) -> MemorialCheckResponse {
    run_memorial_check(MonthDay::today(), notifications_available)
}

/// Effects sink that records requested effects for the shell to apply.
#[derive(Default)]
struct CollectingEffects {
    notifications_available: bool,
    style_rule: Option<String>,
    notification: Option<NotificationRequest>,
}

impl UiEffects for CollectingEffects {
    fn supports(&self, capability: UiCapability) -> bool {
        match capability {
            UiCapability::PageStyle => true,
            UiCapability::Notification => self.notifications_available,
        }
    }

    fn apply_page_style(&mut self, rule: &str) {
        self.style_rule = Some(rule.to_string());
    }

    fn show_notification(&mut self, request: &NotificationRequest) {
        self.notification = Some(request.clone());
    }
}

fn run_memorial_check(date: MonthDay, notifications_available: bool) -> MemorialCheckResponse {
    let mut effects = CollectingEffects {
        notifications_available,
        ..CollectingEffects::default()
    };

    match check_days(date, &mut effects) {
        Some(matched) => MemorialCheckResponse {
            matched: true,
            label: Some(matched.label.to_string()),
            style_rule: effects.style_rule,
            notification: effects.notification.map(|request| {
                MemorialNotificationPayload {
                    message: request.message,
                    duration_ms: request.duration_ms,
                    icon: request.icon,
                }
            }),
            message: format!("Memorial day matched: {}", matched.label),
        },
        None => MemorialCheckResponse {
            matched: false,
            label: None,
            style_rule: None,
            notification: None,
            message: "No memorial day today.".to_string(),
        },
    }
}

fn resolve_site_db_path() -> PathBuf {
    SITE_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("HOMEDASH_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(SITE_DB_FILE_NAME)
        })
        .clone()
}

fn default_shortcut() -> Value {
    DEFAULT_SHORTCUT.get().cloned().unwrap_or(Value::Null)
}

fn with_site_service<T>(
    f: impl FnOnce(&mut SiteDataService<SqliteKvRepository<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let db_path = resolve_site_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("site DB open failed: {err}"))?;
    let repo = SqliteKvRepository::try_new(&conn)
        .map_err(|err| format!("site repo init failed: {err}"))?;
    let mut service =
        SiteDataService::load(repo, default_shortcut()).map_err(|err| err.to_string())?;
    f(&mut service)
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, memorial_check, ping, site_add_note, site_add_todo,
        site_recover, site_set_shortcut_data, site_set_todo_completed, site_snapshot,
    };
    use serde_json::Value;
    use std::sync::Mutex;
    use std::time::{SystemTime, UNIX_EPOCH};

    // Site-store tests share one DB file and the store rewrites the whole
    // blob per mutation; serialize them so parallel tests cannot lose
    // each other's writes.
    static STORE_LOCK: Mutex<()> = Mutex::new(());

    fn store_guard() -> std::sync::MutexGuard<'static, ()> {
        STORE_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn set_shortcut_data_rejects_malformed_json() {
        let response = site_set_shortcut_data("{ not json".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("invalid JSON"));
    }

    #[test]
    fn added_note_appears_in_snapshot() {
        let _guard = store_guard();
        let token = unique_token("ffi-note");
        let created = site_add_note(token.clone(), "body".to_string());
        assert!(created.ok, "{}", created.message);
        let note_id = created.entry_id.expect("created note should return id");

        let snapshot = site_snapshot();
        assert!(snapshot.ok, "{}", snapshot.message);
        let state: Value =
            serde_json::from_str(&snapshot.site_json.expect("snapshot json")).expect("valid JSON");
        let notes = state["noteList"].as_array().expect("noteList is an array");
        assert!(notes
            .iter()
            .any(|note| note["id"] == Value::String(note_id.clone())));
    }

    #[test]
    fn todo_completion_round_trips() {
        let _guard = store_guard();
        let token = unique_token("ffi-todo");
        let created = site_add_todo(token);
        assert!(created.ok, "{}", created.message);
        let todo_id = created.entry_id.expect("created todo should return id");

        let updated = site_set_todo_completed(todo_id.clone(), true);
        assert!(updated.ok, "{}", updated.message);

        let snapshot = site_snapshot();
        let state: Value =
            serde_json::from_str(&snapshot.site_json.expect("snapshot json")).expect("valid JSON");
        let todos = state["todoList"].as_array().expect("todoList is an array");
        let entry = todos
            .iter()
            .find(|todo| todo["id"] == Value::String(todo_id.clone()))
            .expect("created todo should be present");
        assert_eq!(entry["completed"], Value::Bool(true));
    }

    #[test]
    fn recover_rejects_unknown_fields() {
        let _guard = store_guard();
        let response = site_recover(r##"{"themeColor": "#112233"}"##.to_string());
        assert!(!response.ok);
        assert!(response.applied_fields.is_empty());
        assert!(response.message.contains("unknown field"));
    }

    #[test]
    fn memorial_check_reports_style_and_notification_on_match() {
        let response = memorial_check(4, 4, true);
        assert!(response.matched);
        assert_eq!(response.label.as_deref(), Some("清明节"));
        assert_eq!(
            response.style_rule.as_deref(),
            Some("html{filter: grayscale(100%)}")
        );

        let notification = response.notification.expect("notification payload");
        assert_eq!(notification.duration_ms, 14_000);
        assert_eq!(notification.icon.as_deref(), Some("/icon/candle.png"));
    }

    #[test]
    fn memorial_check_without_notification_support_omits_payload() {
        let response = memorial_check(4, 4, false);
        assert!(response.matched);
        assert!(response.style_rule.is_some());
        assert!(response.notification.is_none());
    }

    #[test]
    fn memorial_check_misses_on_unlisted_date() {
        let response = memorial_check(1, 1, true);
        assert!(!response.matched);
        assert!(response.style_rule.is_none());
        assert!(response.notification.is_none());
    }

    #[test]
    fn memorial_check_rejects_out_of_range_dates() {
        let response = memorial_check(13, 1, true);
        assert!(!response.matched);
        assert!(response.message.contains("month out of range"));
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
