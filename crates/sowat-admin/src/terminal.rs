//! Terminal renditions of the client's notification and navigation hooks.

use tracing::debug;

use sowat_core::{Navigator, Notifier};

use crate::output;

/// Prints backend errors the way the web console shows a toast.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn error(&self, message: &str) {
        output::error(message);
    }
}

/// There is no login page to send the user to; tell them how to get back in.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn redirect_to_login(&self, route: &str) {
        debug!(route, "session terminated");
        output::hint("Your session has ended. Run 'sowat-admin auth login' to log in again.");
    }
}
