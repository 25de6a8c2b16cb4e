//! The sign-up page for creating a marketplace account.
//!
//! The marketplace assigns each new user a numeric ID, which is what users
//! log in with, so a successful sign-up shows that ID instead of logging the
//! user in straight away.

use axum::{
    Form,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::{
    ApiClient, ApiError, AppState,
    api::RegisterResponse,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base, link, loading_spinner,
        log_in_register, password_input,
    },
};

pub fn confirm_password_input(error_message: Option<&str>) -> Markup {
    html! {
        div
        {
            label
                for="confirm-password"
                class=(FORM_LABEL_STYLE)
            {
                "Confirm Password"
            }

            input
                type="password"
                name="confirm_password"
                id="confirm-password"
                placeholder="••••••••"
                class=(FORM_TEXT_INPUT_STYLE)
                required
                autofocus[error_message.is_some()]
            ;

            @if let Some(error_message) = error_message
            {
                p class="text-red-500 text-base" { (error_message) }
            }
        }
    }
}

#[derive(Default)]
struct SignUpErrors<'a> {
    name: Option<&'a str>,
    password: Option<&'a str>,
    confirm_password: Option<&'a str>,
}

fn sign_up_form(name: &str, errors: SignUpErrors) -> Markup {
    html! {
        form
            hx-post=(endpoints::USERS)
            hx-swap="outerHTML"
            hx-indicator="#indicator"
            hx-disabled-elt="#name, #password, #submit-button"
            class="space-y-4 md:space-y-6"
        {
            div
            {
                label for="name" class=(FORM_LABEL_STYLE) { "Name" }

                input
                    type="text"
                    name="name"
                    id="name"
                    placeholder="Your name"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required
                    autofocus
                    value=(name);

                @if let Some(error_message) = errors.name
                {
                    p class="text-red-500 text-base" { (error_message) }
                }
            }

            (password_input("", 1, errors.password))
            (confirm_password_input(errors.confirm_password))

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="indicator"
                {
                    (loading_spinner())
                }
                "Sign up"
            }

            p class="text-sm font-light text-gray-500 dark:text-gray-400"
            {
                "Already have an account? "
                (link(endpoints::LOG_IN_VIEW, "Log in here"))
            }
        }
    }
}

fn sign_up_success(user: &RegisterResponse) -> Markup {
    html! {
        div id="sign-up-success" class="space-y-4 text-gray-900 dark:text-white"
        {
            p { "Welcome, " (user.name) "!" }
            p
            {
                "Your user ID is "
                span id="new-user-id" class="font-bold" { (user.id) }
                ". You will need it to log in."
            }
            p { (link(endpoints::LOG_IN_VIEW, "Log in now")) }
        }
    }
}

/// Display the sign-up page.
pub async fn get_sign_up_page() -> Response {
    let sign_up_form = sign_up_form("", SignUpErrors::default());
    let content = log_in_register("Create an account", &sign_up_form);
    base("Sign Up", &[], &content).into_response()
}

/// The state needed for creating a new user.
#[derive(Debug, Clone)]
pub struct SignUpState {
    /// The client for the marketplace API, which creates the user.
    pub api: ApiClient,
}

impl FromRef<AppState> for SignUpState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct SignUpForm {
    pub name: String,
    pub password: String,
    pub confirm_password: String,
}

/// Create a user with the marketplace API and show the new user's ID.
pub async fn post_sign_up(
    State(state): State<SignUpState>,
    Form(user_data): Form<SignUpForm>,
) -> Response {
    let name = user_data.name.trim();

    if name.is_empty() {
        return sign_up_form(
            name,
            SignUpErrors {
                name: Some("Name cannot be empty"),
                ..Default::default()
            },
        )
        .into_response();
    }

    if user_data.password.is_empty() {
        return sign_up_form(
            name,
            SignUpErrors {
                password: Some("Password cannot be empty"),
                ..Default::default()
            },
        )
        .into_response();
    }

    if user_data.password != user_data.confirm_password {
        return sign_up_form(
            name,
            SignUpErrors {
                confirm_password: Some("Passwords do not match"),
                ..Default::default()
            },
        )
        .into_response();
    }

    match state.api.register(name, &user_data.password).await {
        Ok(user) => {
            tracing::info!("Registered user {} ({})", user.id, user.name);
            sign_up_success(&user).into_response()
        }
        Err(ApiError::Status { status, message }) => {
            tracing::warn!("Sign-up failed with status {status}: {message}");
            sign_up_form(
                name,
                SignUpErrors {
                    name: Some(&message),
                    ..Default::default()
                },
            )
            .into_response()
        }
        Err(error) => {
            tracing::error!("An unhandled error occurred while registering a user: {error}");
            sign_up_form(
                name,
                SignUpErrors {
                    name: Some("Could not reach the marketplace. Please try again later."),
                    ..Default::default()
                },
            )
            .into_response()
        }
    }
}

#[cfg(test)]
mod get_sign_up_page_tests {
    use axum::http::StatusCode;

    use crate::{
        auth::sign_up::get_sign_up_page,
        endpoints,
        test_utils::{
            assert_form_input, assert_form_submit_button, assert_hx_endpoint, assert_valid_html,
            must_get_form, parse_html_document,
        },
    };

    #[tokio::test]
    async fn render_sign_up_page() {
        let response = get_sign_up_page().await;
        assert_eq!(response.status(), StatusCode::OK);

        let document = parse_html_document(response).await;
        assert_valid_html(&document);

        let h1_selector = scraper::Selector::parse("h1").unwrap();
        let title = document
            .select(&h1_selector)
            .next()
            .expect("want an h1")
            .text()
            .collect::<String>();
        assert_eq!(title.trim().to_lowercase(), "create an account");

        let form = must_get_form(&document);
        assert_hx_endpoint(&form, endpoints::USERS, "hx-post");
        assert_form_input(&form, "name", "text");
        assert_form_input(&form, "password", "password");
        assert_form_input(&form, "confirm_password", "password");
        assert_form_submit_button(&form);

        let log_in_link_selector = scraper::Selector::parse("a[href]").unwrap();
        let links = form.select(&log_in_link_selector).collect::<Vec<_>>();
        assert_eq!(links.len(), 1, "want 1 link, got {}", links.len());
        assert_eq!(links[0].value().attr("href"), Some(endpoints::LOG_IN_VIEW));
    }
}
