//! The htmx endpoints behind the favorite widget.
//!
//! Each endpoint answers with the re-rendered widget. Alerts produced by the
//! transition are swapped into the alert container out-of-band.

use axum::{
    Extension,
    extract::{FromRef, Path, Query, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use maud::html;
use serde::Deserialize;

use crate::{
    ApiClient, AppState, Error,
    alert::Alert,
    auth::Session,
    favorite::{
        FolderId,
        widget::{WidgetForm, favorite_widget},
        workflow::{Event, FavoriteWidget, Notice, mount, run},
    },
    item::ItemId,
};

/// The state needed by the favorite widget endpoints.
#[derive(Debug, Clone)]
pub struct FavoriteState {
    /// The client for the marketplace API.
    pub api: ApiClient,
}

impl FromRef<AppState> for FavoriteState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct WidgetQuery {
    /// The folder the card is shown in.
    pub folder_id: Option<FolderId>,
}

fn notice_into_alert(notice: &Notice) -> Option<Alert> {
    match notice {
        Notice::Success(message) => Some(Alert::SuccessSimple {
            message: message.clone(),
        }),
        Notice::Failure { message, details } => Some(Alert::Error {
            message: message.clone(),
            details: details.clone(),
        }),
        Notice::Invalid(_) => None,
    }
}

fn widget_response(widget: &FavoriteWidget, notices: &[Notice]) -> Response {
    let validation_message = notices.iter().find_map(|notice| match notice {
        Notice::Invalid(message) => Some(message.as_str()),
        _ => None,
    });
    // Only the latest alert is shown, e.g. a failed folder reload after a
    // folder was created.
    let alert = notices.iter().rev().find_map(notice_into_alert);

    html! {
        (favorite_widget(widget, validation_message))

        @if let Some(alert) = alert {
            (alert.into_oob_html())
        }
    }
    .into_response()
}

async fn handle_event(
    state: FavoriteState,
    session: Session,
    item_id: ItemId,
    form: WidgetForm,
    event: Event,
) -> Response {
    let widget = form.into_widget(item_id, session.user_id);

    match run(&state.api, &session, widget, event).await {
        Ok((widget, notices)) => widget_response(&widget, &notices),
        Err(error) => Error::from(error).into_alert_response(),
    }
}

/// Render the favorite widget of `item_id` in its initial state.
pub async fn get_favorite_widget(
    State(state): State<FavoriteState>,
    Extension(session): Extension<Session>,
    Path(item_id): Path<ItemId>,
    Query(query): Query<WidgetQuery>,
) -> Response {
    match mount(&state.api, &session, item_id, query.folder_id).await {
        Ok((widget, notice)) => widget_response(&widget, notice.as_slice()),
        Err(error) => Error::from(error).into_alert_response(),
    }
}

/// Handle a click on the heart button.
pub async fn toggle_favorite(
    State(state): State<FavoriteState>,
    Extension(session): Extension<Session>,
    Path(item_id): Path<ItemId>,
    Form(form): Form<WidgetForm>,
) -> Response {
    handle_event(state, session, item_id, form, Event::Toggle).await
}

/// Handle a click on a folder in the folder picker.
pub async fn select_folder(
    State(state): State<FavoriteState>,
    Extension(session): Extension<Session>,
    Path(item_id): Path<ItemId>,
    Form(form): Form<WidgetForm>,
) -> Response {
    let Some(folder_id) = form.clicked_folder_id else {
        tracing::warn!("Folder selection for item {item_id} did not say which folder was clicked");
        let widget = form.into_widget(item_id, session.user_id);
        return widget_response(&widget, &[]);
    };

    handle_event(state, session, item_id, form, Event::SelectFolder(folder_id)).await
}

/// Handle the submission of the folder picker.
pub async fn submit_folder(
    State(state): State<FavoriteState>,
    Extension(session): Extension<Session>,
    Path(item_id): Path<ItemId>,
    Form(form): Form<WidgetForm>,
) -> Response {
    handle_event(state, session, item_id, form, Event::Submit).await
}

/// Handle the close button of the folder picker.
pub async fn close_folder_picker(
    State(state): State<FavoriteState>,
    Extension(session): Extension<Session>,
    Path(item_id): Path<ItemId>,
    Form(form): Form<WidgetForm>,
) -> Response {
    handle_event(state, session, item_id, form, Event::Close).await
}
