//! Serves item images from the marketplace so that `<img>` tags can load them
//! with the session's token.

use axum::{
    Extension,
    extract::{Path, State},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    auth::Session,
    item::{ItemId, ItemState},
};

/// Get the image of an item.
pub async fn get_item_image(
    State(state): State<ItemState>,
    Extension(session): Extension<Session>,
    Path(item_id): Path<ItemId>,
) -> Result<Response, Error> {
    let image = state.api.get_item_image(&session, item_id).await?;

    Ok(([(CONTENT_TYPE, image.content_type)], image.bytes).into_response())
}
