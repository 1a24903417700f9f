//! Admin login, logout and session bootstrap.

use tracing::{debug, info, instrument, warn};

use sowat_core::error::AuthError;
use sowat_core::model::{ActionResponse, User};
use sowat_core::{Credentials, Error, Result};

use crate::client::ApiClient;
use crate::endpoints::{
    ADMIN_FORGOT_PASSWORD, ADMIN_LOGIN, ADMIN_RESET_PASSWORD, AUTH_PROFILE, ForgotPasswordRequest,
    LoginRequest, LoginResponse, ResetPasswordRequest,
};
use crate::request::ApiRequest;

/// Authentication flows on top of an [`ApiClient`].
#[derive(Debug, Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Log in as an administrator.
    ///
    /// Only admin accounts get their tokens stored; any other account is
    /// rejected with [`AuthError::NotAdmin`] and leaves storage untouched.
    /// The call raises no notification so the caller can render errors
    /// inline.
    #[instrument(skip(self, credentials), fields(email = credentials.email()))]
    pub async fn login(&self, credentials: &Credentials) -> Result<User> {
        info!("logging in");

        let request = ApiRequest::post(ADMIN_LOGIN)
            .with_json(&LoginRequest {
                email: credentials.email(),
                password: credentials.password(),
            })?
            .quiet()
            .without_auth_recovery();

        let response: LoginResponse = match self.client.send(&request).await {
            Ok(response) => response,
            Err(Error::Api(err)) if matches!(err.status, 400 | 401) => {
                debug!(status = err.status, "credentials rejected");
                return Err(AuthError::InvalidCredentials {
                    message: err.message,
                }
                .into());
            }
            Err(err) => return Err(err),
        };

        if !response.user.is_admin {
            warn!(user = %response.user.id, "login refused, account is not an admin");
            return Err(AuthError::NotAdmin.into());
        }

        self.client.session().store_login(&response.tokens())?;
        info!(user = %response.user.id, "logged in");
        Ok(response.user)
    }

    /// Forget both tokens. No network call; safe to repeat.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<()> {
        self.client.session().clear()?;
        info!("logged out");
        Ok(())
    }

    /// Renew the session now. Coalesced with any refresh already in flight.
    pub async fn refresh(&self) -> Result<()> {
        self.client.refresh_session().await
    }

    /// The profile behind the stored access token.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<User> {
        self.client.get(AUTH_PROFILE).await
    }

    /// Check stored tokens at startup.
    ///
    /// Returns the admin the tokens belong to, or `None` when there is no
    /// usable admin session. A session rejected with 401/403 or belonging to
    /// a non-admin is cleared. Any other failure is returned and the tokens
    /// are kept.
    #[instrument(skip(self))]
    pub async fn restore_session(&self) -> Result<Option<User>> {
        if !self.client.session().is_authenticated()? {
            debug!("no stored session");
            return Ok(None);
        }

        let request = ApiRequest::get(AUTH_PROFILE).quiet();
        match self.client.send::<User>(&request).await {
            Ok(user) if user.is_admin => {
                debug!(user = %user.id, "session restored");
                Ok(Some(user))
            }
            Ok(user) => {
                warn!(user = %user.id, "stored session is not an admin, clearing");
                self.client.session().clear()?;
                Ok(None)
            }
            Err(Error::Api(err)) if matches!(err.status, 401 | 403) => {
                debug!(error = %err, "stored session rejected, clearing");
                self.client.session().clear()?;
                Ok(None)
            }
            Err(err @ Error::Auth(_)) => {
                debug!(error = %err, "stored session rejected, clearing");
                self.client.session().clear()?;
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Ask the backend to email a password-reset link.
    #[instrument(skip(self))]
    pub async fn forgot_password(&self, email: &str) -> Result<ActionResponse> {
        self.client
            .post(ADMIN_FORGOT_PASSWORD, &ForgotPasswordRequest { email })
            .await
    }

    /// Complete a password reset with the token from the email.
    #[instrument(skip(self, token, password))]
    pub async fn reset_password(&self, token: &str, password: &str) -> Result<ActionResponse> {
        self.client
            .post(ADMIN_RESET_PASSWORD, &ResetPasswordRequest { token, password })
            .await
    }
}
