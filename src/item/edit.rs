//! The page for editing a listing and the endpoint that saves the changes.

use axum::{
    Extension,
    extract::{Multipart, Path, State},
    response::{IntoResponse, Response},
};
use maud::html;

use crate::{
    Error,
    alert::Alert,
    auth::Session,
    endpoints::{self, format_endpoint},
    html::{FORM_CONTAINER_STYLE, base, yen_input_styles},
    item::{
        ItemId, ItemState,
        form::{ListingFormData, ListingFormValues, listing_form},
    },
    navigation::NavBar,
};

/// Display the listing form prefilled with the item's current details.
///
/// Only the seller may edit an item, anyone else gets a 404.
pub async fn get_edit_item_page(
    State(state): State<ItemState>,
    Extension(session): Extension<Session>,
    Path(item_id): Path<ItemId>,
) -> Result<Response, Error> {
    let item = state.api.get_item(item_id).await?;

    if item.user_id != session.user_id {
        tracing::warn!(
            "User {} tried to edit item {item_id} listed by user {}",
            session.user_id,
            item.user_id
        );
        return Err(Error::NotFound);
    }

    let categories = state.api.get_categories().await?;
    let values = ListingFormValues {
        name: &item.name,
        category_id: Some(item.category_id),
        price: Some(item.price.as_u64()),
        description: &item.description,
    };
    let action = format_endpoint(endpoints::ITEM_API, item_id);
    let image_url = format_endpoint(endpoints::ITEM_IMAGE, item_id);

    let content = html! {
        (NavBar::new(endpoints::EDIT_ITEM_VIEW, session.user_id).into_html())

        div class=(FORM_CONTAINER_STYLE)
        {
            div class="w-full max-w-md space-y-4"
            {
                h1 class="text-xl font-bold" { "Edit item" }

                img src=(image_url) alt=(item.name) class="w-32 rounded-lg object-cover";

                p class="text-sm text-gray-500 dark:text-gray-400"
                {
                    "Leave the image empty to keep the current one."
                }

                (listing_form("put", &action, "Update this item", &values, &categories, false))
            }
        }
    };

    Ok(base("Edit item", &[yen_input_styles()], &content).into_response())
}

/// Save the changes to a listing.
pub async fn update_item(
    State(state): State<ItemState>,
    Extension(session): Extension<Session>,
    Path(item_id): Path<ItemId>,
    multipart: Multipart,
) -> Response {
    let listing = match ListingFormData::from_multipart(multipart)
        .await
        .and_then(|form| form.into_listing(false))
    {
        Ok(listing) => listing,
        Err(error) => return error.into_alert_response(),
    };

    match state.api.update_item(&session, item_id, listing).await {
        Ok(_) => {
            tracing::info!("User {} updated item {item_id}", session.user_id);
            Alert::SuccessSimple {
                message: "Item updated successfully!".to_owned(),
            }
            .into_response()
        }
        Err(error) => Error::from(error).into_alert_response(),
    }
}
