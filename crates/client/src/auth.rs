//! Credentials and session-token storage.
//!
//! The token is an explicit [`AuthToken`] handed to every API call. It is
//! kept between runs in a keyed [`TokenStore`]; [`Session`] reads it back
//! and reports [`ClientError::NotAuthenticated`] when none is stored.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use dreams_core::types::DbId;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Key under which the session token is stored.
pub const TOKEN_KEY: &str = "token";

// ---------------------------------------------------------------------------
// Token and login payloads
// ---------------------------------------------------------------------------

/// Opaque API token, sent as `Authorization: Token <token>`.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value of the `Authorization` header.
    pub fn header_value(&self) -> String {
        format!("Token {}", self.0)
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Response of `POST /login/`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user_id: Option<DbId>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl LoginResponse {
    pub fn auth_token(&self) -> AuthToken {
        AuthToken::new(self.token.clone())
    }
}

// ---------------------------------------------------------------------------
// Token stores
// ---------------------------------------------------------------------------

/// Keyed string storage for session state.
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> ClientResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> ClientResult<()>;
    fn remove(&self, key: &str) -> ClientResult<()>;
}

/// Process-local store; forgets everything on exit.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> ClientResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.values
            .lock()
            .map_err(|_| ClientError::TokenStore("memory store lock poisoned".to_string()))
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// Store persisted as a flat JSON object in a file.
///
/// A missing file reads as empty.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> ClientResult<HashMap<String, String>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        if raw.trim().is_empty() {
            return Ok(HashMap::new());
        }
        serde_json::from_str(&raw).map_err(|e| {
            ClientError::TokenStore(format!("{} is not a valid store: {e}", self.path.display()))
        })
    }

    fn write_all(&self, values: &HashMap<String, String>) -> ClientResult<()> {
        let raw = serde_json::to_string_pretty(values)
            .map_err(|e| ClientError::TokenStore(e.to_string()))?;
        std::fs::write(&self.path, raw).map_err(|e| self.io_error(e))
    }

    fn io_error(&self, e: std::io::Error) -> ClientError {
        ClientError::TokenStore(format!("{}: {e}", self.path.display()))
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        let mut values = self.read_all()?;
        if values.remove(key).is_some() {
            self.write_all(&values)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The signed-in state shared by all screens.
pub struct Session {
    store: Box<dyn TokenStore>,
}

impl Session {
    pub fn new(store: impl TokenStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// In-memory session with no token.
    pub fn in_memory() -> Self {
        Self::new(MemoryTokenStore::new())
    }

    /// In-memory session already holding `token`.
    pub fn with_token(token: &AuthToken) -> ClientResult<Self> {
        let session = Self::in_memory();
        session.store_token(token)?;
        Ok(session)
    }

    /// File-backed when `token_file` is configured, in-memory otherwise.
    pub fn from_config(config: &ClientConfig) -> Self {
        match &config.token_file {
            Some(path) => Self::new(FileTokenStore::new(path.clone())),
            None => Self::in_memory(),
        }
    }

    /// The stored token, or [`ClientError::NotAuthenticated`].
    pub fn credential(&self) -> ClientResult<AuthToken> {
        match self.store.get(TOKEN_KEY)? {
            Some(token) if !token.is_empty() => Ok(AuthToken::new(token)),
            _ => Err(ClientError::NotAuthenticated),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential().is_ok()
    }

    pub fn store_token(&self, token: &AuthToken) -> ClientResult<()> {
        self.store.set(TOKEN_KEY, token.as_str())
    }

    /// Forget the stored token.
    pub fn logout(&self) -> ClientResult<()> {
        tracing::info!("Clearing session token");
        self.store.remove(TOKEN_KEY)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
