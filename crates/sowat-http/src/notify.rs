//! Default notifier and navigator that only log.

use tracing::{info, warn};

use sowat_core::{Navigator, Notifier};

/// Emits notifications as `WARN` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        warn!(%message, "request failed");
    }
}

/// Records login redirects as `INFO` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn redirect_to_login(&self, route: &str) {
        info!(%route, "session terminated, login required");
    }
}
