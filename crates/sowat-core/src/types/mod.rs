//! Validated value types.
//!
//! These types enforce their invariants at construction time, so a request
//! path or base URL built from them is always well-formed.

mod api_url;
mod resource_id;

pub use api_url::ApiUrl;
pub use resource_id::ResourceId;
