use std::future::Future;

use crate::{
    ApiError,
    auth::Session,
    favorite::{FavoriteFolder, FolderId, FolderName},
    item::ItemId,
};

/// The favorite endpoints of the marketplace API.
///
/// The favorite workflow only talks to the API through this trait so that it
/// can be driven by an in-memory fake in tests.
pub trait FavoriteApi {
    /// Get the folders of the session's user, in the order the API returns them.
    fn list_folders(
        &self,
        session: &Session,
    ) -> impl Future<Output = Result<Vec<FavoriteFolder>, ApiError>> + Send;

    /// Whether `item_id` is in any of the session user's folders.
    fn check_favorite(
        &self,
        session: &Session,
        item_id: ItemId,
    ) -> impl Future<Output = Result<bool, ApiError>> + Send;

    /// Put `item_id` into the folder `folder_id`.
    fn add_to_folder(
        &self,
        session: &Session,
        item_id: ItemId,
        folder_id: FolderId,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Create an empty folder named `folder_name`.
    fn create_folder(
        &self,
        session: &Session,
        folder_name: &FolderName,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Take `item_id` out of the folder `folder_id`.
    ///
    /// The API only deletes a favorite whose folder matches, so `None`
    /// removes nothing and still succeeds.
    fn remove_from_folder(
        &self,
        session: &Session,
        item_id: ItemId,
        folder_id: Option<FolderId>,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}
