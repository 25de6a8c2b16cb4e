//! The endpoint URIs served to the browser.
//!
//! For endpoints that take a parameter, e.g., '/items/{item_id}', use [format_endpoint].

/// The root route which redirects to the home page.
pub const ROOT: &str = "/";
/// The home page: items on sale and the search form.
pub const ITEMS_VIEW: &str = "/items";
/// The page for a single item.
pub const ITEM_VIEW: &str = "/items/{item_id}";
/// The page for editing an existing listing.
pub const EDIT_ITEM_VIEW: &str = "/items/{item_id}/edit";
/// The image of an item, proxied from the marketplace API.
pub const ITEM_IMAGE: &str = "/items/{item_id}/image";
/// The page for listing a new item for sale.
pub const SELL_VIEW: &str = "/sell";
/// The page listing the items of a single user.
pub const USER_ITEMS_VIEW: &str = "/users/{user_id}/items";
/// The page listing every favorite item.
pub const FAVORITES_VIEW: &str = "/favorites";
/// The page listing the items in one favorite folder.
pub const FAVORITE_FOLDER_VIEW: &str = "/favorites/{folder_id}";
/// The route for getting the log in page.
pub const LOG_IN_VIEW: &str = "/log_in";
/// The route for getting the sign-up page.
pub const SIGN_UP_VIEW: &str = "/sign_up";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for logging in a user.
pub const LOG_IN_API: &str = "/api/log_in";
/// The route for the client to log out the current user.
pub const LOG_OUT: &str = "/api/log_out";
/// The route to create users.
pub const USERS: &str = "/api/users";
/// The route to create a listing.
pub const ITEMS_API: &str = "/api/items";
/// The route to update a listing.
pub const ITEM_API: &str = "/api/items/{item_id}";
/// The route to buy an item.
pub const PURCHASE_ITEM: &str = "/api/items/{item_id}/purchase";
/// The favorite widget of an item card, in its mounted state.
pub const FAVORITE_WIDGET: &str = "/api/favorites/{item_id}";
/// The heart button of the favorite widget.
pub const FAVORITE_TOGGLE: &str = "/api/favorites/{item_id}/toggle";
/// Selecting or deselecting an existing folder in the folder picker.
pub const FAVORITE_SELECT: &str = "/api/favorites/{item_id}/select";
/// Submitting the folder picker.
pub const FAVORITE_SUBMIT: &str = "/api/favorites/{item_id}/submit";
/// Closing the folder picker without saving.
pub const FAVORITE_CLOSE: &str = "/api/favorites/{item_id}/close";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/items/{item_id}', '{item_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and at most one parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
