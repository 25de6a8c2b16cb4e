//! Authentication middleware that reads the session cookie, extends it, and
//! handles redirects to the log-in page.

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::{StatusCode, header::SET_COOKIE},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;
use time::Duration;

use crate::{
    AppState,
    auth::{
        cookie::{get_session_from_cookies, invalidate_session_cookie, set_session_cookie},
        redirect::{build_log_in_redirect_url, build_log_in_redirect_url_from_target},
    },
    endpoints,
};

/// The state needed for the auth middleware
#[derive(Clone)]
pub struct AuthState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which session cookies are valid.
    pub cookie_duration: Duration,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AuthState> for Key {
    fn from_ref(state: &AuthState) -> Self {
        state.cookie_key.clone()
    }
}

/// Marks a response to a request whose session token the marketplace API
/// rejected. The auth guard deletes the session cookie for these responses
/// instead of extending it.
#[derive(Debug, Clone, Copy)]
pub struct SessionRejected;

/// Checks for a valid session cookie.
///
/// The session is placed into the request extensions and the request executed
/// normally if the cookie is valid, otherwise the response from `get_redirect`
/// is returned.
#[inline]
async fn auth_guard_internal(
    state: AuthState,
    request: Request,
    next: Next,
    get_redirect: impl Fn(&str) -> Response,
) -> Response {
    let log_in_redirect_url = build_log_in_redirect_url(&request).unwrap_or_else(|| {
        build_log_in_redirect_url_from_target(endpoints::ITEMS_VIEW)
            .unwrap_or_else(|| endpoints::LOG_IN_VIEW.to_owned())
    });

    let (mut parts, body) = request.into_parts();
    let jar = match PrivateCookieJar::from_request_parts(&mut parts, &state).await {
        Ok(jar) => jar,
        Err(err) => {
            tracing::error!("Error getting cookie jar: {err:?}. Redirecting to log in page.");
            return get_redirect(&log_in_redirect_url);
        }
    };
    let session = match get_session_from_cookies(&jar) {
        Ok(session) => session,
        Err(_) => return get_redirect(&log_in_redirect_url),
    };

    parts.extensions.insert(session.clone());
    let request = Request::from_parts(parts, body);
    let response = next.run(request).await;

    // Handlers that end the session set their own cookie, which must win.
    if response.headers().contains_key(SET_COOKIE) {
        return response;
    }

    let (mut parts, body) = response.into_parts();

    if parts.extensions.get::<SessionRejected>().is_some() {
        tracing::info!("Deleting the session cookie of user {}.", session.user_id);
        for (key, val) in invalidate_session_cookie(jar).into_response().headers().iter() {
            if key == SET_COOKIE {
                parts.headers.append(key, val.to_owned());
            }
        }

        return Response::from_parts(parts, body);
    }

    match set_session_cookie(jar, &session, state.cookie_duration) {
        Ok(jar) => {
            for (key, val) in jar.into_response().headers().iter() {
                if key == SET_COOKIE {
                    parts.headers.append(key, val.to_owned());
                }
            }
        }
        Err(error) => {
            tracing::error!("Error extending session cookie: {error}. Leaving it as is.");
        }
    }

    Response::from_parts(parts, body)
}

/// Middleware function that checks for a valid session cookie.
/// The session is placed into request and then the request executed normally if the cookie is valid, otherwise a redirect to the log-in page is returned.
///
/// **Note**: Route handlers can use the function argument `Extension(session): Extension<Session>` to receive the session.
pub async fn auth_guard(State(state): State<AuthState>, request: Request, next: Next) -> Response {
    auth_guard_internal(state, request, next, |redirect_url| {
        Redirect::to(redirect_url).into_response()
    })
    .await
}

/// Middleware function that checks for a valid session cookie.
/// The session is placed into request and then the request executed normally if the cookie is valid, otherwise a HTMX redirect to the log-in page is returned.
///
/// **Note**: Route handlers can use the function argument `Extension(session): Extension<Session>` to receive the session.
pub async fn auth_guard_hx(
    State(state): State<AuthState>,
    request: Request,
    next: Next,
) -> Response {
    auth_guard_internal(state, request, next, |redirect_url| {
        (HxRedirect(redirect_url.to_owned()), StatusCode::OK).into_response()
    })
    .await
}
