//! Authentication endpoint paths and wire types.

use serde::{Deserialize, Serialize};

use sowat_core::TokenPair;
use sowat_core::model::User;

/// Endpoint for admin login.
pub const ADMIN_LOGIN: &str = "/admin/login";

/// Endpoint for token refresh.
pub const AUTH_REFRESH: &str = "/auth/refresh";

/// Endpoint for the current user's profile.
pub const AUTH_PROFILE: &str = "/auth/profile";

/// Endpoint for requesting a password-reset email.
pub const ADMIN_FORGOT_PASSWORD: &str = "/admin/forgot-password";

/// Endpoint for completing a password reset.
pub const ADMIN_RESET_PASSWORD: &str = "/admin/reset-password";

/// Request body for login.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Response from login.
#[derive(Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: User,
}

impl LoginResponse {
    pub fn tokens(&self) -> TokenPair {
        TokenPair::new(self.access_token.clone(), self.refresh_token.clone())
    }
}

/// Request body for refresh.
#[derive(Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

/// Response from refresh.
#[derive(Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl From<RefreshResponse> for TokenPair {
    fn from(response: RefreshResponse) -> Self {
        TokenPair::new(response.access_token, response.refresh_token)
    }
}

#[derive(Debug, Serialize)]
pub struct ForgotPasswordRequest<'a> {
    pub email: &'a str,
}

#[derive(Serialize)]
pub struct ResetPasswordRequest<'a> {
    pub token: &'a str,
    pub password: &'a str,
}

