//! Session token state.
//!
//! [`SessionState`] is the only component that reads or writes the token
//! slots. Every write is serialized and bumps a generation counter, which
//! lets concurrent requests tell whether the tokens they were sent with are
//! still the current ones.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, instrument};

use crate::error::StorageError;
use crate::tokens::{AccessToken, RefreshToken, TokenPair};
use crate::traits::KeyValueStore;
use crate::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, Result};

/// The access token a request is about to carry, tagged with the write
/// generation it was read at.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub generation: u64,
    pub access_token: Option<AccessToken>,
}

/// Shared owner of the persisted access and refresh tokens.
pub struct SessionState {
    store: Arc<dyn KeyValueStore>,
    writer: Mutex<()>,
    generation: AtomicU64,
}

impl SessionState {
    /// Wrap a key-value store.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            writer: Mutex::new(()),
            generation: AtomicU64::new(0),
        }
    }

    /// The current access token, if any.
    pub fn access_token(&self) -> Result<Option<AccessToken>> {
        Ok(self.read(ACCESS_TOKEN_KEY)?.map(AccessToken::new))
    }

    /// The current refresh token, if any.
    pub fn refresh_token(&self) -> Result<Option<RefreshToken>> {
        Ok(self.read(REFRESH_TOKEN_KEY)?.map(RefreshToken::new))
    }

    /// Returns true if an access token is stored.
    pub fn is_authenticated(&self) -> Result<bool> {
        Ok(self.read(ACCESS_TOKEN_KEY)?.is_some())
    }

    /// Number of token writes seen so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Read the access token and the generation it belongs to.
    ///
    /// Taken under the writer lock so the pair is never torn by a
    /// concurrent write.
    pub fn snapshot(&self) -> Result<SessionSnapshot> {
        let _guard = self.writer.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(SessionSnapshot {
            generation: self.generation(),
            access_token: self.read(ACCESS_TOKEN_KEY)?.map(AccessToken::new),
        })
    }

    /// Persist the tokens of a fresh login.
    ///
    /// A login without a refresh token drops any refresh token left over
    /// from an earlier session.
    #[instrument(skip_all)]
    pub fn store_login(&self, tokens: &TokenPair) -> Result<()> {
        let access = tokens.access_token.as_str();
        match tokens.refresh_token {
            Some(ref refresh) => self.write(
                &[
                    (ACCESS_TOKEN_KEY, access),
                    (REFRESH_TOKEN_KEY, refresh.as_str()),
                ],
                &[],
            )?,
            None => self.write(&[(ACCESS_TOKEN_KEY, access)], &[REFRESH_TOKEN_KEY])?,
        }
        debug!(with_refresh = tokens.refresh_token.is_some(), "stored login tokens");
        Ok(())
    }

    /// Persist the result of a refresh call.
    ///
    /// The refresh token is only replaced when the backend rotated it.
    #[instrument(skip_all)]
    pub fn store_refresh(&self, tokens: &TokenPair) -> Result<()> {
        let access = tokens.access_token.as_str();
        match tokens.refresh_token {
            Some(ref refresh) => self.write(
                &[
                    (ACCESS_TOKEN_KEY, access),
                    (REFRESH_TOKEN_KEY, refresh.as_str()),
                ],
                &[],
            )?,
            None => self.write(&[(ACCESS_TOKEN_KEY, access)], &[])?,
        }
        debug!(rotated_refresh = tokens.refresh_token.is_some(), "stored refreshed tokens");
        Ok(())
    }

    /// Remove both tokens. Clearing an empty session is a no-op.
    #[instrument(skip_all)]
    pub fn clear(&self) -> Result<()> {
        self.write(&[], &[ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY])?;
        debug!("cleared session tokens");
        Ok(())
    }

    fn read(&self, key: &str) -> Result<Option<String>> {
        // An empty slot is the same as a missing one.
        Ok(self.store.get(key)?.filter(|v| !v.is_empty()))
    }

    fn write(&self, set: &[(&str, &str)], remove: &[&str]) -> Result<()> {
        let _guard = self.writer.lock().map_err(|_| StorageError::Poisoned)?;
        let result = self.store.apply(set, remove);
        self.generation.fetch_add(1, Ordering::AcqRel);
        result
    }
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState")
            .field("generation", &self.generation())
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}
