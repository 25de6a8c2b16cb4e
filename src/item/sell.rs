//! The page for listing a new item and the endpoint that puts it on sale.

use axum::{
    Extension,
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::html;

use crate::{
    Error,
    auth::Session,
    endpoints::{self, format_endpoint},
    html::{FORM_CONTAINER_STYLE, base, yen_input_styles},
    item::{
        ItemState,
        form::{ListingFormData, ListingFormValues, listing_form},
    },
    navigation::NavBar,
};

/// Display the empty listing form.
pub async fn get_sell_page(
    State(state): State<ItemState>,
    Extension(session): Extension<Session>,
) -> Result<Response, Error> {
    let categories = state.api.get_categories().await?;

    let content = html! {
        (NavBar::new(endpoints::SELL_VIEW, session.user_id).into_html())

        div class=(FORM_CONTAINER_STYLE)
        {
            div class="w-full max-w-md space-y-4"
            {
                h1 class="text-xl font-bold" { "List an item" }

                (listing_form(
                    "post",
                    endpoints::ITEMS_API,
                    "List this item",
                    &ListingFormValues::default(),
                    &categories,
                    true,
                ))
            }
        }
    };

    Ok(base("Sell", &[yen_input_styles()], &content).into_response())
}

/// Create a listing, put it on sale and redirect to its page.
pub async fn create_item(
    State(state): State<ItemState>,
    Extension(session): Extension<Session>,
    multipart: Multipart,
) -> Response {
    let listing = match ListingFormData::from_multipart(multipart)
        .await
        .and_then(|form| form.into_listing(true))
    {
        Ok(listing) => listing,
        Err(error) => return error.into_alert_response(),
    };

    let item_id = match state.api.add_item(&session, listing).await {
        Ok(item_id) => item_id,
        Err(error) => return Error::from(error).into_alert_response(),
    };

    if let Err(error) = state.api.put_on_sale(&session, item_id).await {
        tracing::error!("Item {item_id} was listed but could not be put on sale: {error}");
        return Error::from(error).into_alert_response();
    }

    tracing::info!("User {} listed item {item_id}", session.user_id);

    (
        HxRedirect(format_endpoint(endpoints::ITEM_VIEW, item_id)),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
