//! Items, categories and listings as the marketplace API describes them.

use std::{fmt::Display, str::FromStr};

use axum::body::Bytes;
use serde::{Deserialize, Serialize};

use crate::{Error, auth::UserId};

/// The ID the marketplace assigns to an item.
pub type ItemId = i64;

/// The ID of an item category.
pub type CategoryId = i64;

/// Where an item is in its life cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "u8")]
pub enum ItemStatus {
    /// Listed but not yet on sale.
    Initial,
    /// Can be purchased.
    OnSale,
    /// Has been purchased.
    SoldOut,
}

impl TryFrom<u8> for ItemStatus {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ItemStatus::Initial),
            1 => Ok(ItemStatus::OnSale),
            2 => Ok(ItemStatus::SoldOut),
            other => Err(Error::InvalidItemStatus(other)),
        }
    }
}

/// A price in whole yen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// Create a price of `yen`.
    pub fn new(yen: u64) -> Self {
        Self(yen)
    }

    /// The price in yen.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl FromStr for Price {
    type Err = Error;

    /// Parse a non-negative whole number of yen, e.g. "1200".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Price)
            .map_err(|_| Error::InvalidPrice(s.to_owned()))
    }
}

/// The fields of an item shown in lists.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ItemSummary {
    pub id: ItemId,
    pub name: String,
    pub price: Price,
    pub category_name: String,
}

/// A single item with all of its details.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub category_id: CategoryId,
    pub category_name: String,
    /// The user who listed the item.
    pub user_id: UserId,
    pub price: Price,
    pub description: String,
    pub status: ItemStatus,
}

/// A category that items can be listed under.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// The name of an item, trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemName(String);

impl ItemName {
    /// Create an item name from user input.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyItemName] if `name` is empty or only whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyItemName)
        } else {
            Ok(Self(name.to_owned()))
        }
    }
}

impl Display for ItemName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// An image file uploaded through a listing form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// The details sent to the marketplace to create or update a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemListing {
    pub name: ItemName,
    pub category_id: CategoryId,
    pub price: Price,
    pub description: String,
    /// The new image, `None` keeps the existing image when updating.
    pub image: Option<ImageUpload>,
}

/// The image of an item along with its content type.
#[derive(Debug, Clone)]
pub struct ItemImage {
    pub content_type: String,
    pub bytes: Bytes,
}

#[cfg(test)]
mod item_domain_tests {
    use crate::{
        Error,
        auth::UserId,
        item::{Item, ItemName, ItemStatus, Price},
    };

    #[test]
    fn price_parses_whole_yen() {
        assert_eq!(" 1200 ".parse::<Price>().unwrap(), Price::new(1200));
    }

    #[test]
    fn price_rejects_negative_and_fractional_values() {
        for input in ["-1", "12.5", "", "abc"] {
            assert!(
                matches!(input.parse::<Price>(), Err(Error::InvalidPrice(_))),
                "want {input:?} to be rejected"
            );
        }
    }

    #[test]
    fn item_name_is_trimmed() {
        assert_eq!(ItemName::new("  Jacket ").unwrap().to_string(), "Jacket");
        assert!(matches!(ItemName::new("   "), Err(Error::EmptyItemName)));
    }

    #[test]
    fn deserialises_item() {
        let json = r#"{
            "id": 5,
            "name": "Jacket",
            "category_id": 1,
            "category_name": "fashion",
            "user_id": 7,
            "price": 1200,
            "description": "Barely worn",
            "status": 2
        }"#;

        let item: Item = serde_json::from_str(json).unwrap();

        assert_eq!(item.user_id, UserId::new(7));
        assert_eq!(item.price, Price::new(1200));
        assert_eq!(item.status, ItemStatus::SoldOut);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let json = r#"{
            "id": 5, "name": "Jacket", "category_id": 1, "category_name": "fashion",
            "user_id": 7, "price": 1200, "description": "", "status": 9
        }"#;

        assert!(serde_json::from_str::<Item>(json).is_err());
    }
}
