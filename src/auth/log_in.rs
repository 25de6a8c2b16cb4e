//! This file defines the routes for displaying the log-in page and handling log-in requests.
//! The credentials are checked by the marketplace API, this module only stores the
//! resulting session.

use axum::{
    Form,
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::{
    ApiClient, ApiError, AppState,
    auth::{
        Session, UserId,
        cookie::{invalidate_session_cookie, set_session_cookie},
        normalize_redirect_url,
    },
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base, link,
        loading_spinner, log_in_register, password_input,
    },
};

fn log_in_form(user_id: &str, error_message: Option<&str>, redirect_url: Option<&str>) -> Markup {
    html! {
        form
            hx-post=(endpoints::LOG_IN_API)
            hx-swap="outerHTML"
            hx-indicator="#indicator"
            hx-disabled-elt="#user_id, #password, #submit-button"
            class="space-y-4 md:space-y-6"
        {
            @if let Some(redirect_url) = redirect_url {
                input type="hidden" name="redirect_url" value=(redirect_url);
            }

            div
            {
                label for="user_id" class=(FORM_LABEL_STYLE) { "User ID" }

                input
                    type="number"
                    name="user_id"
                    id="user_id"
                    placeholder="User ID"
                    min="1"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required
                    autofocus
                    value=(user_id);
            }

            (password_input("", 1, error_message))

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="indicator"
                {
                    (loading_spinner())
                }
                "Log in"
            }

            p class="text-sm font-light text-gray-500 dark:text-gray-400" {
                "Don't have an account? "
                (link(endpoints::SIGN_UP_VIEW, "Sign up here"))
            }
        }
    }
}

fn parse_redirect_url(raw_url: Option<&str>, source: &str) -> Option<String> {
    match raw_url.and_then(normalize_redirect_url) {
        Some(redirect_url) => Some(redirect_url),
        None => {
            if let Some(redirect_url) = raw_url {
                tracing::warn!("Invalid redirect URL from {source}: {redirect_url}");
            }
            None
        }
    }
}

/// Display the log-in page.
pub async fn get_log_in_page(Query(query): Query<RedirectQuery>) -> Response {
    let redirect_url = parse_redirect_url(query.redirect_url.as_deref(), "log-in query");
    let log_in_form = log_in_form("", None, redirect_url.as_deref());
    let content = log_in_register("Log in to your account", &log_in_form);
    base("Log In", &[], &content).into_response()
}

/// The state needed to perform a login.
#[derive(Debug, Clone)]
pub struct LogInState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which session cookies are valid.
    pub cookie_duration: Duration,
    /// The client for the marketplace API, which checks the credentials.
    pub api: ApiClient,
}

impl FromRef<AppState> for LogInState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            api: state.api.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<LogInState> for Key {
    fn from_ref(state: &LogInState) -> Self {
        state.cookie_key.clone()
    }
}

pub const INVALID_CREDENTIALS_ERROR_MSG: &str = "Incorrect user ID or password.";
pub const MISSING_FIELDS_ERROR_MSG: &str = "Please fill out all fields";

/// Handler for log-in requests via the POST method.
///
/// On a successful log-in request, the session cookie is set and the client is redirected to the
/// home page, or to `redirect_url` if it is a safe, relative URL.
/// Otherwise, the form is returned with an error message explaining the problem.
pub async fn post_log_in(
    State(state): State<LogInState>,
    jar: PrivateCookieJar,
    Form(user_data): Form<LogInData>,
) -> Response {
    let redirect_url = parse_redirect_url(user_data.redirect_url.as_deref(), "log-in form");
    let redirect_url = redirect_url.as_deref();

    let user_id = match user_data.user_id.trim().parse::<i64>() {
        Ok(user_id) if !user_data.password.is_empty() => user_id,
        _ => {
            return log_in_form(&user_data.user_id, Some(MISSING_FIELDS_ERROR_MSG), redirect_url)
                .into_response();
        }
    };

    let user = match state.api.log_in(user_id, &user_data.password).await {
        Ok(user) => user,
        Err(ApiError::Unauthorized) => {
            tracing::info!("Rejected log-in attempt for user {user_id}");
            return log_in_form(
                &user_data.user_id,
                Some(INVALID_CREDENTIALS_ERROR_MSG),
                redirect_url,
            )
            .into_response();
        }
        Err(ApiError::Status { status, message }) => {
            tracing::warn!("Log-in for user {user_id} failed with status {status}: {message}");
            return log_in_form(&user_data.user_id, Some(&message), redirect_url).into_response();
        }
        Err(error) => {
            tracing::error!("Unhandled error while logging in: {error}");
            return log_in_form(
                &user_data.user_id,
                Some("Could not reach the marketplace. Please try again later."),
                redirect_url,
            )
            .into_response();
        }
    };

    tracing::info!("User {} ({}) logged in", user.id, user.name);

    let session = Session {
        user_id: UserId::new(user.id),
        token: user.token,
    };
    let redirect_url = redirect_url.unwrap_or(endpoints::ITEMS_VIEW);

    set_session_cookie(jar.clone(), &session, state.cookie_duration)
        .map(|updated_jar| {
            (
                StatusCode::SEE_OTHER,
                HxRedirect(redirect_url.to_owned()),
                updated_jar,
            )
        })
        .map_err(|err| {
            tracing::error!("Error setting session cookie: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                HxRedirect(endpoints::INTERNAL_ERROR_VIEW.to_owned()),
                invalidate_session_cookie(jar),
            )
        })
        .into_response()
}

#[derive(Deserialize)]
pub struct RedirectQuery {
    pub redirect_url: Option<String>,
}

/// The raw data entered by the user in the log-in form.
///
/// The user ID is kept as a string so that the form can be shown again with
/// what the user typed if it does not parse.
#[derive(Clone, Serialize, Deserialize)]
pub struct LogInData {
    /// The numeric user ID assigned at sign-up.
    pub user_id: String,

    /// Password entered during log-in.
    pub password: String,

    /// Optional URL to redirect to after logging in.
    /// Only accepted from the log-in form submission.
    pub redirect_url: Option<String>,
}
