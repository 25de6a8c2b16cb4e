//! Items: the home page, item cards, item details, purchasing, and the sell
//! and edit pages.

use axum::extract::FromRef;

use crate::{ApiClient, AppState};

mod browse;
mod card;
mod detail;
mod domain;
mod edit;
mod form;
mod image;
mod sell;

pub use browse::{get_items_page, get_user_items_page};
pub use card::item_list;
pub use detail::{get_item_page, purchase_item};
pub use domain::{
    Category, CategoryId, ImageUpload, Item, ItemId, ItemImage, ItemListing, ItemName,
    ItemStatus, ItemSummary, Price,
};
pub use edit::{get_edit_item_page, update_item};
pub use image::get_item_image;
pub use sell::{create_item, get_sell_page};

/// The state needed by the item pages.
#[derive(Debug, Clone)]
pub struct ItemState {
    /// The client for the marketplace API.
    pub api: ApiClient,
}

impl FromRef<AppState> for ItemState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}
