//! Defines functions for storing the session in private cookies.

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use time::{Duration, OffsetDateTime};

use crate::{Error, auth::Session};

pub(crate) const COOKIE_SESSION: &str = "session";
/// The default duration for which session cookies are valid.
pub const DEFAULT_COOKIE_DURATION: Duration = Duration::hours(1);

/// Add the session cookie to the cookie jar, indicating that a user is logged in.
///
/// The cookie expires `duration` from the current time.
///
/// # Errors
///
/// Returns an [Error::CookieMissing] if the session cannot be serialized.
pub(crate) fn set_session_cookie(
    jar: PrivateCookieJar,
    session: &Session,
    duration: Duration,
) -> Result<PrivateCookieJar, Error> {
    let expiry = OffsetDateTime::now_utc() + duration;
    let value = serde_json::to_string(session).map_err(|error| {
        tracing::error!("Could not serialize the session: {error}");
        Error::CookieMissing
    })?;

    Ok(jar.add(
        Cookie::build((COOKIE_SESSION, value))
            .expires(expiry)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true)
            .path("/"),
    ))
}

/// Set the session cookie to an invalid value and set its max age to zero,
/// which should delete the cookie on the client side.
pub(crate) fn invalidate_session_cookie(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.add(
        Cookie::build((COOKIE_SESSION, "deleted"))
            .expires(OffsetDateTime::UNIX_EPOCH)
            .max_age(Duration::ZERO)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true)
            .path("/"),
    )
}

/// Read the session from the cookie jar.
///
/// # Errors
///
/// Returns an [Error::CookieMissing] if there is no session cookie or it
/// does not hold a valid session.
pub(crate) fn get_session_from_cookies(jar: &PrivateCookieJar) -> Result<Session, Error> {
    let cookie = jar.get(COOKIE_SESSION).ok_or(Error::CookieMissing)?;

    serde_json::from_str(cookie.value_trimmed()).map_err(|_| Error::CookieMissing)
}
