//! The Favorites page: every favorite item, or the items in one folder.

use axum::{
    Extension,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    ApiClient, Error,
    auth::Session,
    endpoints::{self, format_endpoint},
    favorite::{FavoriteApi, FavoriteFolder, FolderId, endpoints::FavoriteState},
    html::{PAGE_CONTAINER_STYLE, base},
    item::item_list,
    navigation::NavBar,
};

const SIDEBAR_LINK_STYLE: &str = "block rounded px-3 py-2 text-sm font-medium \
    text-gray-700 hover:bg-gray-100 dark:text-gray-300 dark:hover:bg-gray-700";
const SIDEBAR_LINK_ACTIVE_STYLE: &str = "block rounded px-3 py-2 text-sm font-semibold \
    bg-blue-50 text-blue-700 dark:bg-blue-900/30 dark:text-blue-200";

fn sidebar(folders: &[FavoriteFolder], selected: Option<FolderId>) -> Markup {
    let links = std::iter::once((endpoints::FAVORITES_VIEW.to_owned(), "All", selected.is_none()))
        .chain(folders.iter().map(|folder| {
            (
                format_endpoint(endpoints::FAVORITE_FOLDER_VIEW, folder.id),
                folder.name.as_str(),
                selected == Some(folder.id),
            )
        }));

    html! {
        nav aria-label="Favorite folders" class="w-full lg:w-56 shrink-0"
        {
            ul class="space-y-1"
            {
                @for (url, name, is_current) in links {
                    li {
                        a
                            href=(url)
                            class=(if is_current { SIDEBAR_LINK_ACTIVE_STYLE } else { SIDEBAR_LINK_STYLE })
                            aria-current=[is_current.then_some("page")]
                        {
                            (name)
                        }
                    }
                }
            }
        }
    }
}

async fn favorites_page(
    api: &ApiClient,
    session: &Session,
    folder_id: Option<FolderId>,
) -> Result<Response, Error> {
    let folders = api.list_folders(session).await?;

    let heading = match folder_id {
        Some(folder_id) => folders
            .iter()
            .find(|folder| folder.id == folder_id)
            .map(|folder| folder.name.clone())
            .ok_or(Error::NotFound)?,
        None => "All favorites".to_owned(),
    };

    let items = api.get_favorite_items(session, folder_id).await?;

    let nav_bar = NavBar::new(endpoints::FAVORITES_VIEW, session.user_id).into_html();
    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-screen-xl flex flex-col lg:flex-row gap-6"
            {
                (sidebar(&folders, folder_id))

                section class="flex-1 min-w-0"
                {
                    h1 class="mb-4 text-2xl font-bold" { (heading) }

                    (item_list(&items, folder_id))
                }
            }
        }
    };

    Ok(base("Favorites", &[], &content).into_response())
}

/// Display every favorite item of the logged-in user.
pub async fn get_favorites_page(
    State(state): State<FavoriteState>,
    Extension(session): Extension<Session>,
) -> Result<Response, Error> {
    favorites_page(&state.api, &session, None).await
}

/// Display the items in the folder `folder_id`.
pub async fn get_favorite_folder_page(
    State(state): State<FavoriteState>,
    Extension(session): Extension<Session>,
    Path(folder_id): Path<FolderId>,
) -> Result<Response, Error> {
    favorites_page(&state.api, &session, Some(folder_id)).await
}
