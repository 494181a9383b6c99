//! Bearer credential handling.
//!
//! The token is opaque to this client: it is stored, attached to requests,
//! and its payload is decoded for display purposes only. No signature is
//! ever verified here.

use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::{Map, Value};

/// Process-wide holder for the bearer credential.
///
/// Lifecycle: set on successful login, cleared on logout, read when a
/// controller or client is initialized. Optionally persisted to a file so the
/// session survives restarts; persistence failures are logged and non-fatal.
pub struct TokenStore {
    token: RwLock<Option<String>>,
    path: Option<PathBuf>,
}

impl TokenStore {
    /// Store without persistence.
    pub fn in_memory() -> Self {
        Self {
            token: RwLock::new(None),
            path: None,
        }
    }

    /// Store backed by a file. An existing credential at `path` is loaded.
    pub fn with_persistence(path: PathBuf) -> Self {
        let token = match fs::read_to_string(&path) {
            Ok(contents) => {
                let trimmed = contents.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            Err(_) => None,
        };

        Self {
            token: RwLock::new(token),
            path: Some(path),
        }
    }

    pub fn get(&self) -> Option<String> {
        self.token.read().expect("token lock poisoned").clone()
    }

    pub fn set(&self, token: &str) {
        *self.token.write().expect("token lock poisoned") = Some(token.to_string());

        if let Some(path) = &self.path {
            if let Some(parent) = path.parent() {
                if let Err(e) = fs::create_dir_all(parent) {
                    tracing::warn!("Failed to create token directory: {}", e);
                }
            }
            if let Err(e) = fs::write(path, token) {
                tracing::warn!("Failed to persist token: {}", e);
            }
        }
    }

    pub fn clear(&self) {
        *self.token.write().expect("token lock poisoned") = None;

        if let Some(path) = &self.path {
            if path.exists() {
                if let Err(e) = fs::remove_file(path) {
                    tracing::warn!("Failed to remove persisted token: {}", e);
                }
            }
        }
    }
}

/// Decode the payload segment of a bearer credential into a claims mapping.
///
/// Returns `None` for any malformed input: wrong segment count, invalid
/// base64url, or a payload that is not a JSON object. Never verifies the
/// signature; the result is display data, not an identity assertion.
pub fn decode_token_claims(token: &str) -> Option<Map<String, Value>> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return None;
    }

    // Tolerate both padded and unpadded payload segments.
    let payload = segments[1].trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let value: Value = serde_json::from_slice(&bytes).ok()?;

    match value {
        Value::Object(claims) => Some(claims),
        _ => None,
    }
}

/// Display identifier derived from the credential's `sub` claim.
///
/// A malformed credential or a missing claim degrades to an empty string.
pub fn display_name(token: &str) -> String {
    decode_token_claims(token)
        .and_then(|claims| {
            claims
                .get("sub")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_default()
}
