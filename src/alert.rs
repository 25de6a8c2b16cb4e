//! Alert system for displaying success and error messages to users.
//!
//! Alerts are toast notifications shown in the `#alert-container` element of
//! the base page. Returned on their own, they are retargeted into the
//! container. Alongside another fragment, such as a favorite widget, they are
//! swapped in out-of-band with [Alert::into_oob_html].

use axum::response::{Html, IntoResponse, Response};
use maud::{Markup, html};

const ALERT_CONTAINER_SELECTOR: &str = "#alert-container";

/// A message to show the user after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    /// The action succeeded.
    SuccessSimple { message: String },
    /// The action failed, with more details below the message.
    Error { message: String, details: String },
    /// The action failed.
    ErrorSimple { message: String },
}

impl Alert {
    fn is_error(&self) -> bool {
        matches!(self, Alert::Error { .. } | Alert::ErrorSimple { .. })
    }

    fn message(&self) -> &str {
        match self {
            Alert::SuccessSimple { message }
            | Alert::Error { message, .. }
            | Alert::ErrorSimple { message } => message,
        }
    }

    fn details(&self) -> Option<&str> {
        match self {
            Alert::Error { details, .. } => Some(details),
            Alert::SuccessSimple { .. } | Alert::ErrorSimple { .. } => None,
        }
    }

    /// Render the alert box.
    pub fn into_html(self) -> Markup {
        // Template adapted from https://flowbite.com/docs/components/alerts/
        let style = if self.is_error() {
            "flex items-start gap-3 p-4 mb-4 rounded-lg shadow-lg border \
            text-red-800 bg-red-50 border-red-300 \
            dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
        } else {
            "flex items-start gap-3 p-4 mb-4 rounded-lg shadow-lg border \
            text-green-800 bg-green-50 border-green-300 \
            dark:bg-gray-800 dark:text-green-400 dark:border-green-800"
        };

        html! {
            div role="alert" class=(style)
            {
                div class="flex-1"
                {
                    p class="text-sm font-medium" { (self.message()) }

                    @if let Some(details) = self.details() {
                        p class="mt-1 text-sm" { (details) }
                    }
                }

                button
                    type="button"
                    aria-label="Dismiss"
                    class="text-sm font-bold opacity-70 hover:opacity-100"
                    onclick="this.closest('[role=alert]').remove()"
                {
                    "✕"
                }
            }
        }
    }

    /// Render the alert so that htmx swaps it into the alert container
    /// regardless of where the rest of the response goes.
    pub fn into_oob_html(self) -> Markup {
        html! {
            div id="alert-container" hx-swap-oob="innerHTML"
            {
                (self.into_html())
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        (
            [
                ("HX-Retarget", ALERT_CONTAINER_SELECTOR),
                ("HX-Reswap", "innerHTML"),
            ],
            Html(self.into_html().into_string()),
        )
            .into_response()
    }
}
