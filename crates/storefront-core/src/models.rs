use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressId(pub String);

impl AddressId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewId(pub String);

impl ReviewId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(pub String);

impl ArticleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One stored shipping destination. The identifier is assigned by the
/// remote store on creation and never changes; everything else is
/// replaced wholesale on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(rename = "_id")]
    pub id: AddressId,
    pub receiver_name: String,
    pub receiver_phone: String,
    pub main_address: String,
    pub detail_address: String,
    pub zip_code: String,
    pub is_default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_memo: Option<String>,
}

impl Address {
    pub fn from_value(value: serde_json::Value) -> Result<Self, ValidationError> {
        serde_json::from_value(value).map_err(|err| ValidationError::Schema {
            resource: "address",
            detail: err.to_string(),
        })
    }
}

/// Default-flagged entries first; ties keep fetch order. `sort_by_key`
/// on `Vec` is a stable sort, which the ordering contract relies on.
pub fn sort_addresses(addresses: &mut [Address]) {
    addresses.sort_by_key(|address| !address.is_default);
}

/// Form model for the Add/Edit step. All fields start empty; the form
/// applies partial patches and resets on cancel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressDraft {
    pub receiver_name: String,
    pub receiver_phone: String,
    pub main_address: String,
    pub detail_address: String,
    pub zip_code: String,
    pub is_default: bool,
    pub shipping_memo: String,
}

impl AddressDraft {
    pub fn apply(&mut self, patch: DraftPatch) {
        if let Some(receiver_name) = patch.receiver_name {
            self.receiver_name = receiver_name;
        }
        if let Some(receiver_phone) = patch.receiver_phone {
            self.receiver_phone = receiver_phone;
        }
        if let Some(main_address) = patch.main_address {
            self.main_address = main_address;
        }
        if let Some(detail_address) = patch.detail_address {
            self.detail_address = detail_address;
        }
        if let Some(zip_code) = patch.zip_code {
            self.zip_code = zip_code;
        }
        if let Some(is_default) = patch.is_default {
            self.is_default = is_default;
        }
        if let Some(shipping_memo) = patch.shipping_memo {
            self.shipping_memo = shipping_memo;
        }
    }

    /// Seed the form from a stored address when entering the Edit step.
    pub fn from_address(address: &Address) -> Self {
        Self {
            receiver_name: address.receiver_name.clone(),
            receiver_phone: address.receiver_phone.clone(),
            main_address: address.main_address.clone(),
            detail_address: address.detail_address.clone(),
            zip_code: address.zip_code.clone(),
            is_default: address.is_default,
            shipping_memo: address.shipping_memo.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftPatch {
    pub receiver_name: Option<String>,
    pub receiver_phone: Option<String>,
    pub main_address: Option<String>,
    pub detail_address: Option<String>,
    pub zip_code: Option<String>,
    pub is_default: Option<bool>,
    pub shipping_memo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: ReviewId,
    pub article: ArticleId,
    pub rate: u8,
    #[serde(default)]
    pub content: String,
    #[serde(rename = "likedBy", default)]
    pub liked_by: Vec<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Review {
    pub fn liked_by_user(&self, user_id: &str) -> bool {
        self.liked_by.iter().any(|id| id == user_id)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, ValidationError> {
        serde_json::from_value(value).map_err(|err| ValidationError::Schema {
            resource: "review",
            detail: err.to_string(),
        })
    }
}

/// Product payload embedded in a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInfo {
    #[serde(default)]
    pub product_name: String,
    pub price: u64,
    pub stock_quantity: u64,
    #[serde(default)]
    pub thumbnail: String,
}

/// A published shop article wrapping one product for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    #[serde(rename = "_id")]
    pub id: ArticleId,
    pub title: String,
    #[serde(default)]
    pub category: String,
    pub product: ProductInfo,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Listing {
    pub fn from_value(value: serde_json::Value) -> Result<Self, ValidationError> {
        serde_json::from_value(value).map_err(|err| ValidationError::Schema {
            resource: "listing",
            detail: err.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    pub category: String,
    #[serde(default)]
    pub user: String,
}

/// The `authCheck` payload the API hands back for the current cookie
/// session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub role: String,
    #[serde(rename = "isLoggedIn")]
    pub is_logged_in: bool,
}

impl SessionUser {
    pub fn from_value(value: serde_json::Value) -> Result<Self, ValidationError> {
        serde_json::from_value(value).map_err(|err| ValidationError::Schema {
            resource: "session",
            detail: err.to_string(),
        })
    }
}
