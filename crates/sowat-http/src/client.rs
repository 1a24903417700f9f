//! HTTP client facade with the session-refresh interceptor.
//!
//! A request moves through `NORMAL → AUTH_FAILED → REFRESHING →
//! {REPLAYED | SESSION_TERMINATED}`:
//!
//! - the stored access token (if any) is attached before dispatch;
//! - a 401 on the initial attempt enters recovery, unless the request opted
//!   out;
//! - recovery runs under a single refresh gate, so concurrent 401s share one
//!   refresh call;
//! - the request is replayed once, and the replay's outcome is final.
//!
//! Any recovery failure clears both tokens and redirects to login.

use std::sync::Arc;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, trace, warn};

use sowat_core::error::{ApiError, AuthError, Error, TransportError};
use sowat_core::{
    AccessToken, KeyValueStore, MemoryStore, Navigator, Notifier, RefreshToken, Result,
    SessionState, TokenPair,
};

use crate::config::ClientConfig;
use crate::endpoints::{AUTH_REFRESH, RefreshRequest, RefreshResponse};
use crate::notify::{TracingNavigator, TracingNotifier};
use crate::request::{ApiRequest, Attempt};

/// The facade every admin API call goes through.
///
/// Cheap to clone; clones share the session, the transport and the refresh
/// gate.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    config: ClientConfig,
    session: Arc<SessionState>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    refresh_gate: Mutex<()>,
}

/// Builder for [`ApiClient`].
pub struct ApiClientBuilder {
    config: ClientConfig,
    session: Option<Arc<SessionState>>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClientBuilder {
    /// Keep tokens in the given store.
    pub fn store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.session = Some(Arc::new(SessionState::new(store)));
        self
    }

    /// Share an existing session state.
    pub fn session(mut self, session: Arc<SessionState>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    /// Build the client. Without a store, tokens live in memory.
    pub fn build(self) -> Result<ApiClient> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .user_agent(self.config.user_agent.clone())
            .default_headers(headers);
        if let Some(timeout) = self.config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(transport_error)?;

        let session = self
            .session
            .unwrap_or_else(|| Arc::new(SessionState::new(Arc::new(MemoryStore::new()))));

        Ok(ApiClient {
            inner: Arc::new(ClientInner {
                http,
                config: self.config,
                session,
                notifier: self.notifier,
                navigator: self.navigator,
                refresh_gate: Mutex::new(()),
            }),
        })
    }
}

impl ApiClient {
    /// Start building a client for the given configuration.
    pub fn builder(config: ClientConfig) -> ApiClientBuilder {
        ApiClientBuilder {
            config,
            session: None,
            notifier: Arc::new(TracingNotifier),
            navigator: Arc::new(TracingNavigator),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// The token state this client reads and writes.
    pub fn session(&self) -> &Arc<SessionState> {
        &self.inner.session
    }

    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        self.send(&ApiRequest::get(path)).await
    }

    pub async fn get_with<Q, R>(&self, path: &str, query: &Q) -> Result<R>
    where
        Q: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send(&ApiRequest::get(path).with_query(query)?).await
    }

    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send(&ApiRequest::post(path).with_json(body)?).await
    }

    pub async fn put<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send(&ApiRequest::put(path).with_json(body)?).await
    }

    pub async fn patch<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send(&ApiRequest::patch(path).with_json(body)?).await
    }

    pub async fn delete<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        self.send(&ApiRequest::delete(path)).await
    }

    /// Send a request through the interceptor and decode the JSON body.
    ///
    /// An empty success body decodes as `null`, so `()` and `Option<T>`
    /// work for endpoints that return nothing.
    #[instrument(skip(self, request), fields(method = %request.method(), path = request.path()))]
    pub async fn send<R: DeserializeOwned>(&self, request: &ApiRequest) -> Result<R> {
        let body = self.execute(request).await?;
        decode(&body)
    }

    /// Renew the session now, outside of any failed request.
    ///
    /// Shares the refresh gate with the interceptor: if another caller is
    /// already refreshing, this waits for it and returns its outcome instead
    /// of spending the refresh token again. Failure terminates the session.
    #[instrument(skip(self))]
    pub async fn refresh_session(&self) -> Result<()> {
        let seen = self.inner.session.generation();
        let _gate = self.inner.refresh_gate.lock().await;

        if self.inner.session.generation() != seen {
            return self.settled_by_other_caller();
        }

        let Some(refresh_token) = self.inner.session.refresh_token()? else {
            warn!("no refresh token stored, terminating session");
            self.terminate_session();
            return Err(AuthError::MissingRefreshToken.into());
        };

        self.refresh_locked(&refresh_token).await
    }

    async fn execute(&self, request: &ApiRequest) -> Result<Vec<u8>> {
        let snapshot = match self.inner.session.snapshot() {
            Ok(snapshot) => snapshot,
            Err(err) => return Err(self.surface(request, err)),
        };

        let rejected = match self
            .dispatch(request, snapshot.access_token.as_ref(), Attempt::Initial)
            .await
        {
            Ok(body) => return Ok(body),
            Err(err) => err,
        };

        if !(rejected.is_unauthorized() && request.options().recover_auth) {
            return Err(self.surface(request, rejected));
        }

        debug!("access token rejected, recovering session");
        self.recover(request, snapshot.generation, rejected).await?;

        let token = self.inner.session.access_token()?;
        match self.dispatch(request, token.as_ref(), Attempt::Replay).await {
            Ok(body) => Ok(body),
            Err(err) => Err(self.surface(request, err)),
        }
    }

    /// `AUTH_FAILED → REFRESHING`. Returns `Ok` when a replay should follow.
    async fn recover(&self, request: &ApiRequest, seen: u64, rejected: Error) -> Result<()> {
        let _gate = self.inner.refresh_gate.lock().await;

        if self.inner.session.generation() != seen {
            return self.settled_by_other_caller();
        }

        let Some(refresh_token) = self.inner.session.refresh_token()? else {
            warn!("no refresh token stored, terminating session");
            self.notify(request, &rejected);
            self.terminate_session();
            return Err(AuthError::MissingRefreshToken.into());
        };

        self.refresh_locked(&refresh_token).await
    }

    /// Tokens changed while this caller waited for the gate: either another
    /// caller refreshed (replay with its token) or tore the session down.
    fn settled_by_other_caller(&self) -> Result<()> {
        if self.inner.session.is_authenticated()? {
            debug!("session renewed by a concurrent caller");
            Ok(())
        } else {
            debug!("session terminated by a concurrent caller");
            Err(AuthError::SessionTerminated.into())
        }
    }

    /// Exchange the refresh token. Must be called with the gate held.
    async fn refresh_locked(&self, refresh_token: &RefreshToken) -> Result<()> {
        info!("refreshing session");

        let tokens = match self.call_refresh(refresh_token).await {
            Ok(tokens) => tokens,
            Err(err) => {
                warn!(error = %err, "refresh failed, terminating session");
                self.terminate_session();
                return Err(AuthError::RefreshFailed(Box::new(err)).into());
            }
        };

        self.inner.session.store_refresh(&tokens)?;
        debug!("session refreshed");
        Ok(())
    }

    /// The dedicated refresh call. It bypasses the interceptor entirely: no
    /// bearer, no recovery, no notification.
    async fn call_refresh(&self, refresh_token: &RefreshToken) -> Result<TokenPair> {
        let url = self.inner.config.base_url.endpoint(AUTH_REFRESH);
        let response = self
            .inner
            .http
            .post(&url)
            .json(&RefreshRequest {
                refresh_token: refresh_token.as_str(),
            })
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(transport_error)?;
        trace!(status = %status, "refresh response");

        if !status.is_success() {
            return Err(ApiError::from_body(status.as_u16(), &body).into());
        }

        let refreshed: RefreshResponse = serde_json::from_slice(&body)?;
        Ok(refreshed.into())
    }

    /// `SESSION_TERMINATED`: clear both tokens and send the user to login.
    fn terminate_session(&self) {
        if let Err(err) = self.inner.session.clear() {
            warn!(error = %err, "failed to clear session tokens");
        }
        self.inner
            .navigator
            .redirect_to_login(&self.inner.config.login_route);
    }

    #[instrument(skip(self, request, token, attempt), fields(%attempt))]
    async fn dispatch(
        &self,
        request: &ApiRequest,
        token: Option<&AccessToken>,
        attempt: Attempt,
    ) -> Result<Vec<u8>> {
        let url = self.inner.config.base_url.endpoint(request.path());
        debug!(%url, authenticated = token.is_some(), "dispatching request");

        let mut builder = self.inner.http.request(request.method().clone(), &url);

        if !request.query_pairs().is_empty() {
            trace!(query = ?request.query_pairs(), "query parameters");
            builder = builder.query(request.query_pairs());
        }
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }
        for (name, value) in &request.options().headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(timeout) = request.options().timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(token) = token {
            builder = builder.bearer_auth(token.as_str());
        }

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(transport_error)?;
        trace!(status = %status, bytes = body.len(), "response");

        if status.is_success() {
            Ok(body.to_vec())
        } else {
            Err(ApiError::from_body(status.as_u16(), &body).into())
        }
    }

    fn notify(&self, request: &ApiRequest, err: &Error) {
        if request.options().notify_errors {
            self.inner.notifier.error(&err.user_message());
        }
    }

    /// Raise the user-facing notification for a failure and hand it back.
    fn surface(&self, request: &ApiRequest, err: Error) -> Error {
        self.notify(request, &err);
        err
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.config.base_url)
            .field("session", &self.inner.session)
            .finish()
    }
}

fn decode<R: DeserializeOwned>(body: &[u8]) -> Result<R> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_slice(b"null")?);
    }
    Ok(serde_json::from_slice(body)?)
}

pub(crate) fn transport_error(err: reqwest::Error) -> Error {
    let message = err.to_string();
    let err = if err.is_timeout() {
        TransportError::Timeout { message }
    } else if err.is_connect() {
        TransportError::Connection { message }
    } else {
        TransportError::Http { message }
    };
    Error::Transport(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sowat_core::ApiUrl;

    #[test]
    fn decode_empty_body_as_unit() {
        decode::<()>(b"").unwrap();
        let none: Option<u32> = decode(b"  \n").unwrap();
        assert_eq!(none, None);
    }

    #[test]
    fn decode_json_body() {
        let value: serde_json::Value = decode(br#"{"ok":true}"#).unwrap();
        assert_eq!(value["ok"], true);
    }

    #[test]
    fn decode_reports_malformed_json() {
        let result: Result<serde_json::Value> = decode(b"{not json");
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn client_creation() {
        let config = ClientConfig::new(ApiUrl::new("https://api.sowat.io").unwrap());
        let client = ApiClient::builder(config).build().unwrap();
        assert_eq!(client.config().base_url.host(), Some("api.sowat.io"));
        assert!(!client.session().is_authenticated().unwrap());
    }
}
