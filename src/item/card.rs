//! The item card and the list of cards shown on the item pages.

use maud::{Markup, html};

use crate::{
    endpoints::{self, format_endpoint},
    favorite::{FolderId, favorite_widget_placeholder},
    html::{BUTTON_PRIMARY_STYLE, CATEGORY_BADGE_STYLE, format_price, truncate},
    item::ItemSummary,
};

const CARD_NAME_MAX_GRAPHEMES: usize = 24;

/// Render the card for `item`.
///
/// `folder_id` is the favorite folder the card is being shown in, if any.
pub fn item_card(item: &ItemSummary, folder_id: Option<FolderId>) -> Markup {
    let item_url = format_endpoint(endpoints::ITEM_VIEW, item.id);
    let image_url = format_endpoint(endpoints::ITEM_IMAGE, item.id);
    let (name, full_name) = truncate(&item.name, CARD_NAME_MAX_GRAPHEMES);

    html! {
        article
            class="relative flex flex-col overflow-hidden rounded-lg border border-gray-200
                bg-white shadow-sm dark:border-gray-700 dark:bg-gray-800"
        {
            a href=(item_url) class="block aspect-square bg-gray-100 dark:bg-gray-700"
            {
                img
                    src=(image_url)
                    alt=(item.name)
                    loading="lazy"
                    class="h-full w-full object-cover";
            }

            div class="absolute top-2 right-2"
            {
                (favorite_widget_placeholder(item.id, folder_id))
            }

            div class="flex flex-col gap-1 p-3"
            {
                a href=(item_url) title=[full_name] class="font-semibold text-gray-900 dark:text-white hover:underline"
                {
                    (name)
                }

                div class="flex items-center justify-between"
                {
                    span class="font-bold text-gray-900 dark:text-white" { (format_price(item.price.as_u64())) }
                    span class=(CATEGORY_BADGE_STYLE) { (item.category_name) }
                }
            }
        }
    }
}

/// Render `items` as a grid of cards followed by a link to the sell page.
pub fn item_list(items: &[ItemSummary], folder_id: Option<FolderId>) -> Markup {
    html! {
        div class="w-full"
        {
            @if items.is_empty() {
                p class="py-12 text-center text-gray-500 dark:text-gray-400"
                {
                    "No items yet."
                }
            } @else {
                div class="grid grid-cols-2 gap-4 sm:grid-cols-3 lg:grid-cols-4"
                {
                    @for item in items {
                        (item_card(item, folder_id))
                    }
                }
            }

            div class="mt-6 flex justify-center pb-24 lg:pb-0"
            {
                a href=(endpoints::SELL_VIEW) class={ "max-w-xs text-center " (BUTTON_PRIMARY_STYLE) }
                {
                    "+ Add Item"
                }
            }
        }
    }
}
