//! Favorite folders as the marketplace API describes them.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::{Error, auth::UserId};

/// The ID the marketplace assigns to a favorite folder.
pub type FolderId = i64;

/// A user-defined group of favorite items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteFolder {
    /// The ID of the folder.
    #[serde(rename = "FavoriteFolderID")]
    pub id: FolderId,
    /// The user that owns the folder.
    #[serde(rename = "UserID")]
    pub user_id: UserId,
    /// The display name of the folder.
    #[serde(rename = "FavoriteFolderName")]
    pub name: String,
}

/// The name for a new favorite folder.
///
/// Folder names are trimmed and must not be empty. Names do not need to be
/// unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderName(String);

impl FolderName {
    /// The most graphemes a folder name may have.
    pub const MAX_GRAPHEMES: usize = 50;

    /// Create a folder name from user input.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyFolderName] if `name` is empty or only whitespace, or
    /// [Error::FolderNameTooLong] if it has more than [FolderName::MAX_GRAPHEMES] graphemes.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            return Err(Error::EmptyFolderName);
        }

        if name.graphemes(true).count() > Self::MAX_GRAPHEMES {
            return Err(Error::FolderNameTooLong(Self::MAX_GRAPHEMES));
        }

        Ok(Self(name.to_owned()))
    }
}

impl AsRef<str> for FolderName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for FolderName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
