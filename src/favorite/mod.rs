//! Favorites: the favorite widget on every item card and the Favorites page.

mod api;
mod domain;
mod endpoints;
mod page;
mod widget;
mod workflow;

pub use api::FavoriteApi;
pub use domain::{FavoriteFolder, FolderId, FolderName};
pub use endpoints::{
    close_folder_picker, get_favorite_widget, select_folder, submit_folder, toggle_favorite,
};
pub use page::{get_favorite_folder_page, get_favorites_page};
pub use widget::favorite_widget_placeholder;
