//! User-visible notices.

use tracing::warn;

/// Channel for short messages meant for the person using the app.
///
/// The host decides how a notice is shown (popup, stderr, status bar).
pub trait Notifier: Send + Sync {
    /// Show a single notice.
    fn notify(&self, message: &str);
}

/// Notifier that reports notices as `warn` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        warn!(target: "noteseek::notice", "{message}");
    }
}
