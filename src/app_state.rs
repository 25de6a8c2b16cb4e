//! Implements a struct that holds the state of the web server.

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};
use time::Duration;

use crate::ApiClient;

/// The state of the web server.
///
/// The server keeps no data of its own, so the state is just what is needed
/// to read the session cookie and to talk to the marketplace API.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,

    /// The duration for which session cookies are valid.
    pub cookie_duration: Duration,

    /// The client for the remote marketplace API.
    pub api: ApiClient,
}

impl AppState {
    /// Create a new [AppState] that talks to the marketplace API at `api_base_url`.
    pub fn new(cookie_secret: &str, api_base_url: &str, cookie_duration: Duration) -> Self {
        Self::with_api(cookie_secret, ApiClient::new(api_base_url), cookie_duration)
    }

    /// Create a new [AppState] with an existing API client.
    pub fn with_api(cookie_secret: &str, api: ApiClient, cookie_duration: Duration) -> Self {
        Self {
            cookie_key: create_cookie_key(cookie_secret),
            cookie_duration,
            api,
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

impl FromRef<AppState> for ApiClient {
    fn from_ref(state: &AppState) -> Self {
        state.api.clone()
    }
}

/// Create a signing key for cookies from a `secret`s string.
pub fn create_cookie_key(secret: &str) -> Key {
    let hash = Sha512::digest(secret);

    Key::from(&hash)
}
