//! sowat-core - Core types and traits for the Sowat admin client toolkit.
//!
//! This crate holds everything the HTTP facade and its consumers share:
//! the token types, the error taxonomy, validated identifiers, the backend's
//! domain model, and [`SessionState`], the single owner of the persisted
//! token slots.

pub mod credentials;
pub mod error;
pub mod model;
pub mod session;
pub mod store;
pub mod tokens;
pub mod traits;
pub mod types;

pub use credentials::Credentials;
pub use error::Error;
pub use session::{SessionSnapshot, SessionState};
pub use store::MemoryStore;
pub use tokens::{AccessToken, RefreshToken, TokenPair};
pub use traits::{KeyValueStore, Navigator, Notifier};
pub use types::{ApiUrl, ResourceId};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Storage slot holding the access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Storage slot holding the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Route the client is sent to when the session cannot be recovered.
pub const LOGIN_ROUTE: &str = "/login";

/// Backend used when no base URL is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3010";
