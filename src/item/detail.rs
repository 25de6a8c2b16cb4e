//! The item detail page and the purchase endpoint.

use axum::{
    Extension,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    alert::Alert,
    auth::{Session, UserId},
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DISABLED_STYLE, BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE,
        CATEGORY_BADGE_STYLE, PAGE_CONTAINER_STYLE, base, format_price, loading_spinner,
    },
    item::{Item, ItemId, ItemState, ItemStatus},
    navigation::NavBar,
};

const ITEM_DETAIL_ID: &str = "item-detail";

fn item_detail(item: &Item, user_id: UserId) -> Markup {
    let image_url = format_endpoint(endpoints::ITEM_IMAGE, item.id);
    let purchase_url = format_endpoint(endpoints::PURCHASE_ITEM, item.id);
    let edit_url = format_endpoint(endpoints::EDIT_ITEM_VIEW, item.id);
    let seller_url = format_endpoint(endpoints::USER_ITEMS_VIEW, item.user_id.as_i64());
    let is_seller = item.user_id == user_id;

    html! {
        section id=(ITEM_DETAIL_ID) class="grid w-full max-w-screen-lg gap-8 md:grid-cols-2"
        {
            img
                src=(image_url)
                alt=(item.name)
                class="w-full rounded-lg bg-gray-100 object-cover dark:bg-gray-700";

            div class="flex flex-col gap-4"
            {
                h1 class="text-2xl font-bold" { (item.name) }

                p class="text-3xl font-bold" { (format_price(item.price.as_u64())) }

                div
                {
                    h2 class="text-sm font-semibold text-gray-500 dark:text-gray-400" { "Category" }
                    span class=(CATEGORY_BADGE_STYLE) { (item.category_name) }
                }

                div
                {
                    h2 class="text-sm font-semibold text-gray-500 dark:text-gray-400" { "Description" }
                    p class="whitespace-pre-line" { (item.description) }
                }

                p class="text-sm"
                {
                    "Listed by "
                    a href=(seller_url) class="underline" { "user " (item.user_id) }
                }

                @if item.status == ItemStatus::SoldOut {
                    button type="button" class=(BUTTON_DISABLED_STYLE) disabled { "Sold Out" }
                } @else {
                    button
                        type="button"
                        hx-post=(purchase_url)
                        hx-target={ "#" (ITEM_DETAIL_ID) }
                        hx-swap="outerHTML"
                        hx-indicator="#purchase-indicator"
                        hx-disabled-elt="this"
                        class=(BUTTON_PRIMARY_STYLE)
                    {
                        span class="inline htmx-indicator" id="purchase-indicator"
                        {
                            (loading_spinner())
                        }
                        "Purchase"
                    }
                }

                @if is_seller {
                    a href=(edit_url) class={ "text-center " (BUTTON_SECONDARY_STYLE) } { "Edit" }
                }
            }
        }
    }
}

/// Display the details of an item.
pub async fn get_item_page(
    State(state): State<ItemState>,
    Extension(session): Extension<Session>,
    Path(item_id): Path<ItemId>,
) -> Result<Response, Error> {
    let item = state.api.get_item(item_id).await?;

    let content = html! {
        (NavBar::new(endpoints::ITEM_VIEW, session.user_id).into_html())

        div class=(PAGE_CONTAINER_STYLE)
        {
            (item_detail(&item, session.user_id))
        }
    };

    Ok(base(&item.name, &[], &content).into_response())
}

/// Buy an item and re-render its details.
pub async fn purchase_item(
    State(state): State<ItemState>,
    Extension(session): Extension<Session>,
    Path(item_id): Path<ItemId>,
) -> Response {
    if let Err(error) = state.api.purchase(&session, item_id).await {
        tracing::warn!(
            "User {} could not purchase item {item_id}: {error}",
            session.user_id
        );
        return Error::from(error).into_alert_response();
    }

    tracing::info!("User {} purchased item {item_id}", session.user_id);

    match state.api.get_item(item_id).await {
        Ok(item) => html! {
            (item_detail(&item, session.user_id))

            (Alert::SuccessSimple {
                message: format!("You bought {}!", item.name),
            }
            .into_oob_html())
        }
        .into_response(),
        Err(error) => Error::from(error).into_alert_response(),
    }
}
