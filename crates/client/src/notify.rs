//! User-visible notifications.

/// Shown when an assignment write fails.
pub const ASSIGNMENT_SAVE_FAILED: &str =
    "Die Zuteilung konnte nicht gespeichert werden, bitte lade die Seite neu.";

/// Shown when the motivation texts of a trainee are requested but the
/// trainee is not on the board.
pub const MOTIVATION_NOT_FOUND: &str = "Die Motivationstexte konnten nicht gefunden werden, bitte laden Sie die Seite neu und probieren sie es erneut.";

/// Shown when the board data cannot be loaded.
pub const BOARD_LOAD_FAILED: &str =
    "Die Trainees konnten nicht geladen werden, bitte lade die Seite neu.";

/// Toast-style error display provided by the host UI.
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
}

/// Notifier that only logs, for headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        tracing::warn!(message, "User notification");
    }
}
