use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use storefront_core::models::AddressDraft;

/// Envelope the shop API wraps every JSON body in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// One page of published listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedResults<T> {
    pub results: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailConfirm {
    pub email: String,
    #[serde(rename = "emailCode")]
    pub email_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
}

/// JSON body for address create/update. Shaped exactly like the form
/// draft; the server assigns and keeps the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressPayload {
    pub receiver_name: String,
    pub receiver_phone: String,
    pub main_address: String,
    pub detail_address: String,
    pub zip_code: String,
    pub is_default: bool,
    pub shipping_memo: String,
}

impl From<&AddressDraft> for AddressPayload {
    fn from(draft: &AddressDraft) -> Self {
        Self {
            receiver_name: draft.receiver_name.clone(),
            receiver_phone: draft.receiver_phone.clone(),
            main_address: draft.main_address.clone(),
            detail_address: draft.detail_address.clone(),
            zip_code: draft.zip_code.clone(),
            is_default: draft.is_default,
            shipping_memo: draft.shipping_memo.clone(),
        }
    }
}

/// Multipart form for product registration. Field names are fixed by
/// the API: `product_name`, `price`, `stock_quantity`, repeated
/// `images`, and `thumbnail` carrying the first image again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub product_name: String,
    pub price: u64,
    pub stock_quantity: u64,
    pub images: Vec<PathBuf>,
}

/// Multipart form for publishing a listing: `title`, repeated
/// `detail_images`, `product` (the product id) and `category`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewListing {
    pub title: String,
    pub product: String,
    pub category: String,
    pub detail_images: Vec<PathBuf>,
}
