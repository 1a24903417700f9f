//! Typed wrappers over the backend's admin endpoints.
//!
//! Each wrapper is a borrowed view over an [`ApiClient`](crate::ApiClient),
//! so every call goes through the interceptor.

mod dashboard;
mod plans;
mod users;
mod whitelist;

pub use dashboard::Dashboard;
pub use plans::Plans;
pub use users::Users;
pub use whitelist::Whitelist;

use crate::client::ApiClient;

impl ApiClient {
    pub fn users(&self) -> Users<'_> {
        Users::new(self)
    }

    pub fn plans(&self) -> Plans<'_> {
        Plans::new(self)
    }

    pub fn whitelist(&self) -> Whitelist<'_> {
        Whitelist::new(self)
    }

    pub fn dashboard(&self) -> Dashboard<'_> {
        Dashboard::new(self)
    }
}
