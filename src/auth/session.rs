//! The session of a logged-in user: the bearer token issued by the
//! marketplace API and the ID of the user it belongs to.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A newtype wrapper for integer user IDs.
///
/// This helps disambiguate user IDs from item and folder IDs, leading to
/// better compile time errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct UserId(i64);

impl UserId {
    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the user ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The credentials of a logged-in user.
///
/// Stored in an encrypted private cookie and placed into the request
/// extensions by the auth guard, so route handlers can use
/// `Extension(session): Extension<Session>`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The user the token was issued to.
    pub user_id: UserId,
    /// The bearer token for the marketplace API.
    pub token: String,
}
