//! Session reader.
//!
//! Extracts the user identifier from a locally stored credential. The
//! credential is an opaque JWT-style token whose payload segment carries an
//! `email` claim; the token is decoded without signature verification, since
//! validation belongs to the token issuer, not this dashboard.

use std::collections::HashMap;
use std::path::PathBuf;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::Deserialize;
use thiserror::Error;

/// The key under which the credential is stored.
pub const USER_TOKEN_KEY: &str = "userToken";

#[derive(Error, Debug, PartialEq)]
pub enum SessionError {
    /// No credential is stored. The session stays inactive and no fetch is
    /// attempted; callers treat this silently.
    #[error("no credential stored under \"{USER_TOKEN_KEY}\"")]
    CredentialMissing,

    /// A credential is present but cannot be decoded into an email claim.
    #[error("malformed credential: {0}")]
    CredentialMalformed(String),
}

/// A string-keyed read-only credential store.
///
/// The dashboard never reads ambient storage directly; the store is injected
/// at activation so tests can substitute [`MemoryCredentialStore`].
pub trait CredentialStore {
    fn get(&self, key: &str) -> Option<String>;
}

/// Credential store backed by a JSON string map in the platform config
/// directory (`local_storage.json`).
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Locates the store file for this platform. Returns `None` when no home
    /// directory can be determined.
    pub fn open() -> Option<Self> {
        let dirs = directories::ProjectDirs::from("", "", "plant-dashboard")?;
        Some(Self {
            path: dirs.config_dir().join("local_storage.json"),
        })
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: &str) -> Option<String> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) => {
                log::debug!("No credential store at {:?}: {e}", self.path);
                return None;
            }
        };

        match serde_json::from_str::<HashMap<String, String>>(&data) {
            Ok(map) => map.get(key).cloned(),
            Err(e) => {
                log::debug!("Unreadable credential store at {:?}: {e}", self.path);
                None
            }
        }
    }
}

/// In-memory credential store, the test double.
#[derive(Default)]
pub struct MemoryCredentialStore {
    values: HashMap<String, String>,
}

impl MemoryCredentialStore {
    pub fn with(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut store = Self::default();
        store.values.insert(key.into(), value.into());
        store
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// The claims this dashboard uses. Anything else in the token is ignored.
#[derive(Deserialize)]
struct Claims {
    email: String,
}

/// An active session, derived once at view activation and never refreshed.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    email: String,
}

impl Session {
    /// Reads the credential from `store` and decodes the email claim.
    pub fn from_store(store: &dyn CredentialStore) -> Result<Self, SessionError> {
        let token = store
            .get(USER_TOKEN_KEY)
            .ok_or(SessionError::CredentialMissing)?;
        Self::from_token(&token)
    }

    /// Decodes the payload segment of a JWT-style credential.
    pub fn from_token(token: &str) -> Result<Self, SessionError> {
        let mut segments = token.split('.');
        let payload = segments
            .nth(1)
            .ok_or_else(|| SessionError::CredentialMalformed("missing payload segment".into()))?;

        let bytes = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|e| SessionError::CredentialMalformed(format!("payload is not base64url: {e}")))?;

        let claims: Claims = serde_json::from_slice(&bytes)
            .map_err(|e| SessionError::CredentialMalformed(format!("bad claim set: {e}")))?;

        Ok(Self {
            email: claims.email,
        })
    }

    /// The identifier readings are fetched and submitted for.
    pub fn email(&self) -> &str {
        &self.email
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds an unsigned token in the `header.payload.signature` shape.
    fn token_with_payload(payload: &str) -> String {
        format!(
            "{}.{}.sig",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"none"}"#),
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    #[test]
    fn decodes_email_claim() {
        let token = token_with_payload(r#"{"email":"plant@example.com","iat":1700000000}"#);
        let session = Session::from_token(&token).unwrap();
        assert_eq!(session.email(), "plant@example.com");
    }

    #[test]
    fn missing_credential_is_inactive() {
        let store = MemoryCredentialStore::default();
        assert_eq!(
            Session::from_store(&store),
            Err(SessionError::CredentialMissing)
        );
    }

    #[test]
    fn garbage_credential_is_malformed() {
        let store = MemoryCredentialStore::with(USER_TOKEN_KEY, "not a token");
        assert!(matches!(
            Session::from_store(&store),
            Err(SessionError::CredentialMalformed(_))
        ));
    }

    #[test]
    fn missing_email_claim_is_malformed() {
        let token = token_with_payload(r#"{"sub":"1234"}"#);
        assert!(matches!(
            Session::from_token(&token),
            Err(SessionError::CredentialMalformed(_))
        ));
    }

    #[test]
    fn reads_token_from_store() {
        let token = token_with_payload(r#"{"email":"plant@example.com"}"#);
        let store = MemoryCredentialStore::with(USER_TOKEN_KEY, token);
        let session = Session::from_store(&store).unwrap();
        assert_eq!(session.email(), "plant@example.com");
    }
}
