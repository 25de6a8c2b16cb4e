//! The home page with the item search, and the page listing one user's items.

use axum::{
    Extension,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    Error,
    auth::{Session, UserId},
    endpoints::{self, format_endpoint},
    html::{BUTTON_PRIMARY_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, base},
    item::{ItemState, ItemSummary, item_list},
    navigation::NavBar,
};

/// The query string of the home page.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    /// Only show items whose name matches.
    #[serde(default)]
    pub name: String,
}

fn search_form(search: &str) -> Markup {
    html! {
        form
            method="get"
            action=(endpoints::ITEMS_VIEW)
            role="search"
            class="flex w-full max-w-md gap-2"
        {
            input
                type="search"
                name="name"
                aria-label="Search items"
                placeholder="Type keyword"
                class=(FORM_TEXT_INPUT_STYLE)
                value=(search);

            button type="submit" class={ "max-w-24 " (BUTTON_PRIMARY_STYLE) } { "Search" }
        }
    }
}

fn list_page(
    title: &str,
    heading: &str,
    nav_bar: NavBar,
    header: Option<Markup>,
    items: &[ItemSummary],
) -> Response {
    let content = html! {
        (nav_bar.into_html())

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-screen-xl space-y-6"
            {
                @if let Some(header) = header {
                    (header)
                }

                h1 class="text-2xl font-bold" { (heading) }

                (item_list(items, None))
            }
        }
    };

    base(title, &[], &content).into_response()
}

/// Display the items on sale, or the items matching the `name` query.
pub async fn get_items_page(
    State(state): State<ItemState>,
    Extension(session): Extension<Session>,
    Query(query): Query<SearchQuery>,
) -> Result<Response, Error> {
    let search = query.name.trim();

    let (items, heading) = if search.is_empty() {
        (state.api.get_on_sale_items().await?, "On sale".to_owned())
    } else {
        (
            state.api.search_items(search).await?,
            format!("Results for \"{search}\""),
        )
    };

    let header = html! {
        div class="flex flex-col gap-4 sm:flex-row sm:items-center sm:justify-between"
        {
            p class="text-sm text-gray-600 dark:text-gray-400"
            {
                "Logged in as user "
                span id="user-id" class="font-semibold" { (session.user_id) }
            }

            (search_form(search))
        }
    };

    Ok(list_page(
        "Home",
        &heading,
        NavBar::new(endpoints::ITEMS_VIEW, session.user_id),
        Some(header),
        &items,
    ))
}

/// Display the items listed by `user_id`.
pub async fn get_user_items_page(
    State(state): State<ItemState>,
    Extension(session): Extension<Session>,
    Path(user_id): Path<i64>,
) -> Result<Response, Error> {
    let user_id = UserId::new(user_id);
    let items = state.api.get_user_items(user_id).await?;

    let heading = if user_id == session.user_id {
        "My items".to_owned()
    } else {
        format!("Items listed by user {user_id}")
    };
    let page_url = format_endpoint(endpoints::USER_ITEMS_VIEW, user_id.as_i64());

    Ok(list_page(
        &heading,
        &heading,
        NavBar::new(&page_url, session.user_id),
        None,
        &items,
    ))
}
