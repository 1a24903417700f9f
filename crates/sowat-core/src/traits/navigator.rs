//! Login redirection trait.

/// Performs the "hard navigation" to the login entry point after the
/// session has been torn down.
pub trait Navigator: Send + Sync {
    /// Send the user to the login route.
    fn redirect_to_login(&self, route: &str);
}
