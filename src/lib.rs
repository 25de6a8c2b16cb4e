//! Mini Market is a web client for a second-hand marketplace.
//!
//! The server renders HTML pages for browsing, buying, selling and
//! favoriting items, and forwards every read and write to the remote
//! marketplace REST API. It keeps no durable state of its own: the session
//! token lives in an encrypted cookie and everything else is fetched on
//! demand.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Extension,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_htmx::HxRedirect;
use axum_server::Handle;
use tokio::signal;

mod alert;
mod api;
mod app_state;
mod auth;
mod endpoints;
mod favorite;
mod html;
mod internal_server_error;
mod item;
mod logging;
mod navigation;
mod not_found;
mod routing;

#[cfg(test)]
mod test_utils;

pub use api::{ApiClient, ApiError};
pub use app_state::AppState;
pub use auth::{DEFAULT_COOKIE_DURATION, Session, UserId};
pub use logging::logging_middleware;
pub use routing::build_router;

use crate::{
    alert::Alert, auth::SessionRejected, internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Either the token or user ID cookie is missing from the cookie jar in
    /// the request.
    #[error("no cookies in the cookie jar :(")]
    CookieMissing,

    /// An empty string was used to create a folder name.
    #[error("Folder name cannot be empty")]
    EmptyFolderName,

    /// The folder name has more graphemes than allowed.
    #[error("Folder name cannot be longer than {0} characters")]
    FolderNameTooLong(usize),

    /// A favorite was submitted with both or neither of an existing folder
    /// and a new folder name.
    #[error("Please select OR enter a folder name")]
    AmbiguousFolderChoice,

    /// An empty string was used to create an item name.
    #[error("Item name cannot be empty")]
    EmptyItemName,

    /// The price is not a non-negative whole number.
    #[error("\"{0}\" is not a valid price, enter a whole number of yen")]
    InvalidPrice(String),

    /// The category ID in a form could not be parsed.
    #[error("\"{0}\" is not a valid category")]
    InvalidCategory(String),

    /// The remote API sent an item status outside of the known range.
    #[error("{0} is not a valid item status")]
    InvalidItemStatus(u8),

    /// A new listing was submitted without an image.
    #[error("Choose an image of the item")]
    MissingImage,

    /// The multipart form could not be parsed.
    #[error("Could not parse multipart form: {0}")]
    MultipartError(String),

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,

    /// A request to the remote marketplace API failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound | Error::Api(ApiError::Status { status: 404, .. }) => {
                get_404_not_found_response()
            }
            Error::Api(ApiError::Unauthorized) => {
                tracing::info!("The session token was rejected, redirecting to log in.");
                (Extension(SessionRejected), Redirect::to(endpoints::LOG_IN_VIEW)).into_response()
            }
            Error::Api(ApiError::Request(error)) => {
                tracing::error!("Could not reach the marketplace API: {error}");
                InternalServerError {
                    description: "Could not reach the marketplace",
                    fix: "Try again in a few moments.",
                }
                .into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Render the error as an alert fragment for HTMX requests.
    fn into_alert_response(self) -> Response {
        match self {
            Error::Api(ApiError::Unauthorized) => (
                Extension(SessionRejected),
                HxRedirect(endpoints::LOG_IN_VIEW.to_owned()),
                StatusCode::UNAUTHORIZED,
            )
                .into_response(),
            Error::Api(ApiError::Status { status, message }) => {
                tracing::warn!("The marketplace API responded with {status}: {message}");
                let status = StatusCode::from_u16(status)
                    .ok()
                    .filter(StatusCode::is_client_error)
                    .unwrap_or(StatusCode::BAD_GATEWAY);

                (
                    status,
                    Alert::Error {
                        message: "Request failed".to_owned(),
                        details: message,
                    },
                )
                    .into_response()
            }
            Error::Api(ApiError::Request(error)) => {
                tracing::error!("Could not reach the marketplace API: {error}");
                (
                    StatusCode::BAD_GATEWAY,
                    Alert::Error {
                        message: "Could not reach the marketplace".to_owned(),
                        details: "Check your connection and try again.".to_owned(),
                    },
                )
                    .into_response()
            }
            error @ (Error::EmptyFolderName
            | Error::FolderNameTooLong(_)
            | Error::AmbiguousFolderChoice
            | Error::EmptyItemName
            | Error::InvalidPrice(_)
            | Error::InvalidCategory(_)
            | Error::MissingImage
            | Error::MultipartError(_)) => (
                StatusCode::BAD_REQUEST,
                Alert::ErrorSimple {
                    message: error.to_string(),
                },
            )
                .into_response(),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Not found".to_owned(),
                    details: "Try refreshing the page to see if it has been removed.".to_owned(),
                },
            )
                .into_response(),
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Something went wrong".to_owned(),
                        details: "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                    },
                )
                    .into_response()
            }
        }
    }
}
