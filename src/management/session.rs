use std::fmt;

use axum::http::{HeaderMap, header::COOKIE};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use sha2::Sha256;

use crate::config::Settings;

type HmacSha256 = Hmac<Sha256>;

pub const SESSION_COOKIE: &str = "spotifytime_session";
pub const LOGIN_COOKIE: &str = "spotifytime_login";
pub const LOGIN_TTL_SECS: u64 = 600;

#[derive(Debug)]
pub enum SessionError {
    // HMAC takes keys of any length, so `new_from_slice` does not reject a
    // secret in practice; the variant carries its error should that change.
    Key(String),
    SerdeError(serde_json::Error),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Key(e) => write!(f, "invalid session key: {}", e),
            SessionError::SerdeError(e) => write!(f, "cannot encode session: {}", e),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::SerdeError(err)
    }
}

#[derive(Serialize, Deserialize)]
struct Envelope<T> {
    exp: i64,
    data: T,
}

/// Signed, expiring cookie values.
///
/// A cookie value is `base64url(json) "." base64url(hmac)`, where the JSON
/// carries an absolute expiry (`exp`, unix seconds) and the payload. New values
/// are always signed with the current secret; verification also accepts the
/// previous secret so a rotation does not log everybody out at once.
#[derive(Clone)]
pub struct SessionManager {
    current: Vec<u8>,
    previous: Option<Vec<u8>>,
    secure: bool,
}

impl SessionManager {
    pub fn new(secret: &str, previous: Option<&str>, secure: bool) -> Self {
        Self {
            current: secret.as_bytes().to_vec(),
            previous: previous.map(|p| p.as_bytes().to_vec()),
            secure,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            &settings.session_secret,
            settings.session_secret_previous.as_deref(),
            settings.cookie_secure,
        )
    }

    pub fn seal<T: Serialize>(&self, data: &T, ttl_secs: u64) -> Result<String, SessionError> {
        let envelope = Envelope {
            exp: Utc::now()
                .timestamp()
                .saturating_add(i64::try_from(ttl_secs).unwrap_or(i64::MAX)),
            data,
        };
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&envelope)?);
        let signature = URL_SAFE_NO_PAD.encode(sign(&self.current, payload.as_bytes())?);
        Ok(format!("{}.{}", payload, signature))
    }

    /// Returns the payload if the value is intact, signed by a known key and
    /// not yet expired.
    pub fn open<T: DeserializeOwned>(&self, value: &str) -> Option<T> {
        let (payload, signature) = value.split_once('.')?;
        let signature = URL_SAFE_NO_PAD.decode(signature).ok()?;

        let trusted = std::iter::once(&self.current)
            .chain(self.previous.as_ref())
            .any(|key| verify(key, payload.as_bytes(), &signature));
        if !trusted {
            return None;
        }

        let json = URL_SAFE_NO_PAD.decode(payload).ok()?;
        let envelope: Envelope<T> = serde_json::from_slice(&json).ok()?;
        if envelope.exp <= Utc::now().timestamp() {
            return None;
        }
        Some(envelope.data)
    }

    /// Reads and verifies the named cookie from the request headers.
    pub fn read<T: DeserializeOwned>(&self, headers: &HeaderMap, name: &str) -> Option<T> {
        self.open(&read_cookie(headers, name)?)
    }

    pub fn set_cookie(&self, name: &str, value: &str, max_age_secs: u64) -> String {
        let mut cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            name, value, max_age_secs
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    pub fn clear_cookie(&self, name: &str) -> String {
        self.set_cookie(name, "", 0)
    }
}

/// Finds a cookie by name across all `Cookie` headers of a request.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

fn sign(key: &[u8], payload: &[u8]) -> Result<Vec<u8>, SessionError> {
    let mut mac = HmacSha256::new_from_slice(key).map_err(|e| SessionError::Key(e.to_string()))?;
    mac.update(payload);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn verify(key: &[u8], payload: &[u8], signature: &[u8]) -> bool {
    match HmacSha256::new_from_slice(key) {
        Ok(mut mac) => {
            mac.update(payload);
            mac.verify_slice(signature).is_ok()
        }
        Err(_) => false,
    }
}
