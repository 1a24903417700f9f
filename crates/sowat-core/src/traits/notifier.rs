//! User-facing notification trait.

/// Receives transient, best-effort error notifications.
///
/// The facade calls this once per unrecovered failure unless the request
/// opted out. Implementations must not block.
pub trait Notifier: Send + Sync {
    /// Show an error message to the user.
    fn error(&self, message: &str);
}
