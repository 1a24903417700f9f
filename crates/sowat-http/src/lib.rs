//! sowat-http - HTTP client facade for the Sowat admin API.
//!
//! Every request goes through [`ApiClient`], which attaches the stored bearer
//! token, renews the session once when the backend answers 401, and surfaces
//! everything else as a typed [`Error`](sowat_core::Error).
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use sowat_core::{Credentials, MemoryStore};
//! use sowat_http::{ApiClient, AuthService, ClientConfig};
//!
//! # async fn example() -> sowat_core::Result<()> {
//! let client = ApiClient::builder(ClientConfig::from_env()?)
//!     .store(Arc::new(MemoryStore::new()))
//!     .build()?;
//!
//! let admin = AuthService::new(client.clone())
//!     .login(&Credentials::new("admin@sowat.io", "secret"))
//!     .await?;
//! println!("logged in as {}", admin.email);
//!
//! let users = client.users().list(&Default::default()).await?;
//! println!("{} users", users.meta.total);
//! # Ok(())
//! # }
//! ```

pub mod api;
mod auth;
mod client;
mod config;
mod endpoints;
mod notify;
mod request;

pub use auth::AuthService;
pub use client::{ApiClient, ApiClientBuilder};
pub use config::ClientConfig;
pub use notify::{TracingNavigator, TracingNotifier};
pub use request::{ApiRequest, Attempt, RequestOptions};
