use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use std::time::Duration;

use reqwest::blocking::multipart::Form;
use reqwest::blocking::Response;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use tracing::warn;

use storefront_core::config::ApiConfig;
use storefront_core::error::GatewayError;
use storefront_core::error::ValidationError;
use storefront_core::models::Address;
use storefront_core::models::AddressId;
use storefront_core::models::ArticleId;
use storefront_core::models::Category;
use storefront_core::models::Listing;
use storefront_core::models::ProductInfo;
use storefront_core::models::Review;
use storefront_core::models::ReviewId;
use storefront_core::models::SessionUser;

use crate::contracts::AddressPayload;
use crate::contracts::Credentials;
use crate::contracts::DataEnvelope;
use crate::contracts::MailConfirm;
use crate::contracts::NewListing;
use crate::contracts::NewProduct;
use crate::contracts::PagedResults;
use crate::contracts::PasswordChange;
use crate::contracts::SignupRequest;

/// Everything the client core asks of the remote store. One blocking
/// call per operation, no retries, no caching; callers run these on
/// worker threads and surface failures to the user.
pub trait StoreClient: Send + Sync {
    fn list_addresses(&self) -> Result<Vec<Address>, GatewayError>;
    fn create_address(&self, payload: &AddressPayload) -> Result<Address, GatewayError>;
    fn update_address(
        &self,
        id: &AddressId,
        payload: &AddressPayload,
    ) -> Result<Address, GatewayError>;
    fn delete_address(&self, id: &AddressId) -> Result<(), GatewayError>;

    fn login(&self, credentials: &Credentials) -> Result<SessionUser, GatewayError>;
    fn logout(&self) -> Result<(), GatewayError>;
    fn signup(&self, request: &SignupRequest) -> Result<(), GatewayError>;
    fn send_mail_code(&self, email: &str) -> Result<(), GatewayError>;
    fn confirm_mail_code(&self, confirm: &MailConfirm) -> Result<(), GatewayError>;
    fn check_username(&self, username: &str) -> Result<(), GatewayError>;
    fn change_password(&self, change: &PasswordChange) -> Result<(), GatewayError>;
    fn delete_account(&self, credentials: &Credentials) -> Result<(), GatewayError>;
    fn auth_check(&self) -> Result<SessionUser, GatewayError>;

    fn list_listings(&self, page: u32) -> Result<Vec<Listing>, GatewayError>;
    fn create_product(&self, product: &NewProduct) -> Result<(), GatewayError>;
    fn create_listing(&self, listing: &NewListing) -> Result<(), GatewayError>;
    fn list_categories(&self) -> Result<Vec<Category>, GatewayError>;
    fn create_category(&self, name: &str) -> Result<(), GatewayError>;

    fn list_reviews(&self, article: &ArticleId) -> Result<Vec<Review>, GatewayError>;
    fn remove_review(&self, id: &ReviewId) -> Result<(), GatewayError>;
    fn like_review(&self, id: &ReviewId) -> Result<(), GatewayError>;
    fn unlike_review(&self, id: &ReviewId) -> Result<(), GatewayError>;
}

/// Map a non-success HTTP status onto the error taxonomy.
fn status_error(path: &str, status: StatusCode) -> Option<GatewayError> {
    if status.is_success() {
        return None;
    }
    let err = if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        GatewayError::Auth
    } else if status == StatusCode::NOT_FOUND {
        GatewayError::NotFound(path.to_string())
    } else {
        GatewayError::Network(format!("{path}: http {status}"))
    };
    Some(err)
}

fn transport(err: reqwest::Error) -> GatewayError {
    GatewayError::Network(err.to_string())
}

/// Session-cookie HTTP client against the shop API. Timeout policy
/// lives here, not in the core.
pub struct HttpStoreClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl HttpStoreClient {
    pub fn new(config: &ApiConfig) -> Result<Self, GatewayError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .cookie_store(true)
            .build()
            .map_err(transport)?;
        let mut base_url = config.base_url.clone();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Ok(Self { http, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn parse<T: DeserializeOwned>(
        resource: &'static str,
        response: Response,
    ) -> Result<T, GatewayError> {
        let envelope: DataEnvelope<T> =
            response
                .json()
                .map_err(|err| ValidationError::Schema {
                    resource,
                    detail: err.to_string(),
                })?;
        Ok(envelope.data)
    }

    fn check(path: &str, response: Response) -> Result<Response, GatewayError> {
        if let Some(err) = status_error(path, response.status()) {
            warn!(path, error = %err, "request failed");
            return Err(err);
        }
        Ok(response)
    }

    fn get(&self, path: &str) -> Result<Response, GatewayError> {
        debug!(path, "GET");
        let response = self.http.get(self.url(path)).send().map_err(transport)?;
        Self::check(path, response)
    }

    fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<Response, GatewayError> {
        debug!(path, "POST");
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .map_err(transport)?;
        Self::check(path, response)
    }

    fn put_json<B: Serialize>(&self, path: &str, body: &B) -> Result<Response, GatewayError> {
        debug!(path, "PUT");
        let response = self
            .http
            .put(self.url(path))
            .json(body)
            .send()
            .map_err(transport)?;
        Self::check(path, response)
    }

    fn delete(&self, path: &str) -> Result<Response, GatewayError> {
        debug!(path, "DELETE");
        let response = self.http.delete(self.url(path)).send().map_err(transport)?;
        Self::check(path, response)
    }

    fn post_multipart(&self, path: &str, form: Form) -> Result<Response, GatewayError> {
        debug!(path, "POST multipart");
        let response = self
            .http
            .post(self.url(path))
            .multipart(form)
            .send()
            .map_err(transport)?;
        Self::check(path, response)
    }
}

fn file_part(form: Form, field: &'static str, path: &std::path::Path) -> Result<Form, GatewayError> {
    form.file(field, path).map_err(|_| {
        GatewayError::Validation(ValidationError::InvalidField {
            field,
            reason: "file could not be read",
        })
    })
}

/// `product_name`, `price`, `stock_quantity`, repeated `images`, and
/// `thumbnail` carrying the first image again.
fn product_form(product: &NewProduct) -> Result<Form, GatewayError> {
    if product.images.is_empty() {
        return Err(GatewayError::Validation(ValidationError::MissingField {
            field: "images",
        }));
    }
    let mut form = Form::new()
        .text("product_name", product.product_name.clone())
        .text("price", product.price.to_string())
        .text("stock_quantity", product.stock_quantity.to_string());
    for image in &product.images {
        form = file_part(form, "images", image)?;
    }
    form = file_part(form, "thumbnail", &product.images[0])?;
    Ok(form)
}

/// `title`, repeated `detail_images`, `product`, `category`.
fn listing_form(listing: &NewListing) -> Result<Form, GatewayError> {
    if listing.detail_images.is_empty() {
        return Err(GatewayError::Validation(ValidationError::MissingField {
            field: "detail_images",
        }));
    }
    let mut form = Form::new()
        .text("title", listing.title.clone())
        .text("product", listing.product.clone())
        .text("category", listing.category.clone());
    for image in &listing.detail_images {
        form = file_part(form, "detail_images", image)?;
    }
    Ok(form)
}

impl StoreClient for HttpStoreClient {
    fn list_addresses(&self) -> Result<Vec<Address>, GatewayError> {
        Self::parse("address", self.get("addresses")?)
    }

    fn create_address(&self, payload: &AddressPayload) -> Result<Address, GatewayError> {
        Self::parse("address", self.post_json("addresses", payload)?)
    }

    fn update_address(
        &self,
        id: &AddressId,
        payload: &AddressPayload,
    ) -> Result<Address, GatewayError> {
        Self::parse(
            "address",
            self.put_json(&format!("addresses/{}", id.as_str()), payload)?,
        )
    }

    fn delete_address(&self, id: &AddressId) -> Result<(), GatewayError> {
        self.delete(&format!("addresses/{}", id.as_str()))?;
        Ok(())
    }

    fn login(&self, credentials: &Credentials) -> Result<SessionUser, GatewayError> {
        Self::parse("session", self.post_json("users/login", credentials)?)
    }

    fn logout(&self) -> Result<(), GatewayError> {
        self.post_json("users/logout", &serde_json::json!({}))?;
        Ok(())
    }

    fn signup(&self, request: &SignupRequest) -> Result<(), GatewayError> {
        self.post_json("users/signup", request)?;
        Ok(())
    }

    fn send_mail_code(&self, email: &str) -> Result<(), GatewayError> {
        self.post_json("users/send-mail", &serde_json::json!({ "email": email }))?;
        Ok(())
    }

    fn confirm_mail_code(&self, confirm: &MailConfirm) -> Result<(), GatewayError> {
        self.post_json("users/confirm-mail", confirm)?;
        Ok(())
    }

    fn check_username(&self, username: &str) -> Result<(), GatewayError> {
        self.post_json(
            "users/username-check",
            &serde_json::json!({ "username": username }),
        )?;
        Ok(())
    }

    fn change_password(&self, change: &PasswordChange) -> Result<(), GatewayError> {
        self.put_json("users/edit-password", change)?;
        Ok(())
    }

    fn delete_account(&self, credentials: &Credentials) -> Result<(), GatewayError> {
        let path = "users/delete-account";
        debug!(path, "DELETE");
        let response = self
            .http
            .delete(self.url(path))
            .json(credentials)
            .send()
            .map_err(transport)?;
        Self::check(path, response)?;
        Ok(())
    }

    fn auth_check(&self) -> Result<SessionUser, GatewayError> {
        Self::parse("session", self.get("users/auth-check")?)
    }

    fn list_listings(&self, page: u32) -> Result<Vec<Listing>, GatewayError> {
        let results: PagedResults<Listing> =
            Self::parse("listing", self.get(&format!("articles?page={page}"))?)?;
        Ok(results.results)
    }

    fn create_product(&self, product: &NewProduct) -> Result<(), GatewayError> {
        self.post_multipart("products", product_form(product)?)?;
        Ok(())
    }

    fn create_listing(&self, listing: &NewListing) -> Result<(), GatewayError> {
        self.post_multipart("articles", listing_form(listing)?)?;
        Ok(())
    }

    fn list_categories(&self) -> Result<Vec<Category>, GatewayError> {
        Self::parse("category", self.get("categories")?)
    }

    fn create_category(&self, name: &str) -> Result<(), GatewayError> {
        self.post_json("categories", &serde_json::json!({ "category": name }))?;
        Ok(())
    }

    fn list_reviews(&self, article: &ArticleId) -> Result<Vec<Review>, GatewayError> {
        Self::parse("review", self.get(&format!("comments/{}", article.as_str()))?)
    }

    fn remove_review(&self, id: &ReviewId) -> Result<(), GatewayError> {
        self.delete(&format!("comments/{}", id.as_str()))?;
        Ok(())
    }

    fn like_review(&self, id: &ReviewId) -> Result<(), GatewayError> {
        self.post_json(
            &format!("comments/{}/like", id.as_str()),
            &serde_json::json!({}),
        )?;
        Ok(())
    }

    fn unlike_review(&self, id: &ReviewId) -> Result<(), GatewayError> {
        self.delete(&format!("comments/{}/like", id.as_str()))?;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MemoryStore {
    next_id: u64,
    addresses: Vec<Address>,
    reviews: Vec<Review>,
    listings: Vec<Listing>,
    products: Vec<(String, NewProduct)>,
    categories: Vec<Category>,
    session: Option<SessionUser>,
    fail_next: Option<GatewayError>,
}

impl MemoryStore {
    fn assign_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }

    /// The real server keeps at most one default address; the twin
    /// mirrors that on every write.
    fn clear_other_defaults(&mut self, keep: &AddressId) {
        for address in &mut self.addresses {
            if &address.id != keep {
                address.is_default = false;
            }
        }
    }
}

/// In-process twin of the shop API for tests and offline runs. Same
/// observable contract as `HttpStoreClient`, plus scripted failure
/// injection.
#[derive(Debug, Default)]
pub struct MemoryStoreClient {
    store: Mutex<MemoryStore>,
}

impl MemoryStoreClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// A small populated shop for interactive runs.
    pub fn seeded() -> Self {
        let client = Self::new();
        {
            let mut store = client.lock();
            store.session = Some(SessionUser {
                user_id: "user-1".to_string(),
                email: "dana@shop.example".to_string(),
                username: "dana".to_string(),
                role: "user".to_string(),
                is_logged_in: true,
            });
        }
        let home = AddressPayload {
            receiver_name: "Dana".to_string(),
            receiver_phone: "01012345678".to_string(),
            main_address: "12 Mapo-daero".to_string(),
            detail_address: "Apt 301".to_string(),
            zip_code: "04123".to_string(),
            is_default: true,
            shipping_memo: String::new(),
        };
        let office = AddressPayload {
            receiver_name: "Dana".to_string(),
            receiver_phone: "01012345678".to_string(),
            main_address: "77 Teheran-ro".to_string(),
            detail_address: "Floor 9".to_string(),
            zip_code: "06234".to_string(),
            is_default: false,
            shipping_memo: "reception desk".to_string(),
        };
        let _ = client.create_address(&home);
        let _ = client.create_address(&office);
        let _ = client.create_product(&NewProduct {
            product_name: "Stoneware mug".to_string(),
            price: 12_000,
            stock_quantity: 40,
            images: vec![std::path::PathBuf::from("mug.png")],
        });
        let product = client
            .lock()
            .products
            .last()
            .map(|(id, _)| id.clone())
            .unwrap_or_default();
        let _ = client.create_listing(&NewListing {
            title: "Spring mugs".to_string(),
            product,
            category: "kitchen".to_string(),
            detail_images: vec![std::path::PathBuf::from("mug-detail.png")],
        });
        let article = client
            .lock()
            .listings
            .last()
            .map(|listing| listing.id.clone())
            .unwrap_or_else(|| ArticleId::new("art-0"));
        client.push_review(Review {
            id: ReviewId::new("rev-1"),
            article: article.clone(),
            rate: 5,
            content: "sturdy and keeps coffee warm".to_string(),
            liked_by: Vec::new(),
            updated_at: chrono::Utc::now(),
        });
        client.push_review(Review {
            id: ReviewId::new("rev-2"),
            article,
            rate: 3,
            content: "nice glaze, a little small".to_string(),
            liked_by: vec!["user-7".to_string()],
            updated_at: chrono::Utc::now(),
        });
        client
    }

    /// Make the next operation fail with `err`, once.
    pub fn fail_next(&self, err: GatewayError) {
        self.lock().fail_next = Some(err);
    }

    fn lock(&self) -> MutexGuard<'_, MemoryStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn guarded(&self) -> Result<MutexGuard<'_, MemoryStore>, GatewayError> {
        let mut store = self.lock();
        if let Some(err) = store.fail_next.take() {
            return Err(err);
        }
        Ok(store)
    }
}

impl StoreClient for MemoryStoreClient {
    fn list_addresses(&self) -> Result<Vec<Address>, GatewayError> {
        Ok(self.guarded()?.addresses.clone())
    }

    fn create_address(&self, payload: &AddressPayload) -> Result<Address, GatewayError> {
        let mut store = self.guarded()?;
        let id = AddressId::new(store.assign_id("addr"));
        let address = Address {
            id: id.clone(),
            receiver_name: payload.receiver_name.clone(),
            receiver_phone: payload.receiver_phone.clone(),
            main_address: payload.main_address.clone(),
            detail_address: payload.detail_address.clone(),
            zip_code: payload.zip_code.clone(),
            is_default: payload.is_default,
            shipping_memo: if payload.shipping_memo.is_empty() {
                None
            } else {
                Some(payload.shipping_memo.clone())
            },
        };
        store.addresses.push(address.clone());
        if payload.is_default {
            store.clear_other_defaults(&id);
        }
        Ok(address)
    }

    fn update_address(
        &self,
        id: &AddressId,
        payload: &AddressPayload,
    ) -> Result<Address, GatewayError> {
        let mut store = self.guarded()?;
        let position = store
            .addresses
            .iter()
            .position(|address| &address.id == id)
            .ok_or_else(|| GatewayError::NotFound(format!("addresses/{}", id.as_str())))?;
        {
            let address = &mut store.addresses[position];
            address.receiver_name = payload.receiver_name.clone();
            address.receiver_phone = payload.receiver_phone.clone();
            address.main_address = payload.main_address.clone();
            address.detail_address = payload.detail_address.clone();
            address.zip_code = payload.zip_code.clone();
            address.is_default = payload.is_default;
            address.shipping_memo = if payload.shipping_memo.is_empty() {
                None
            } else {
                Some(payload.shipping_memo.clone())
            };
        }
        if payload.is_default {
            store.clear_other_defaults(id);
        }
        Ok(store.addresses[position].clone())
    }

    fn delete_address(&self, id: &AddressId) -> Result<(), GatewayError> {
        let mut store = self.guarded()?;
        let position = store
            .addresses
            .iter()
            .position(|address| &address.id == id)
            .ok_or_else(|| GatewayError::NotFound(format!("addresses/{}", id.as_str())))?;
        // No default reassignment here; the client never expects one.
        store.addresses.remove(position);
        Ok(())
    }

    fn login(&self, credentials: &Credentials) -> Result<SessionUser, GatewayError> {
        let mut store = self.guarded()?;
        let username = credentials
            .email
            .split('@')
            .next()
            .unwrap_or("user")
            .to_string();
        let user = SessionUser {
            user_id: "user-1".to_string(),
            email: credentials.email.clone(),
            username,
            role: "user".to_string(),
            is_logged_in: true,
        };
        store.session = Some(user.clone());
        Ok(user)
    }

    fn logout(&self) -> Result<(), GatewayError> {
        self.guarded()?.session = None;
        Ok(())
    }

    fn signup(&self, _request: &SignupRequest) -> Result<(), GatewayError> {
        self.guarded()?;
        Ok(())
    }

    fn send_mail_code(&self, _email: &str) -> Result<(), GatewayError> {
        self.guarded()?;
        Ok(())
    }

    fn confirm_mail_code(&self, _confirm: &MailConfirm) -> Result<(), GatewayError> {
        self.guarded()?;
        Ok(())
    }

    fn check_username(&self, _username: &str) -> Result<(), GatewayError> {
        self.guarded()?;
        Ok(())
    }

    fn change_password(&self, _change: &PasswordChange) -> Result<(), GatewayError> {
        let store = self.guarded()?;
        if store.session.is_none() {
            return Err(GatewayError::Auth);
        }
        Ok(())
    }

    fn delete_account(&self, _credentials: &Credentials) -> Result<(), GatewayError> {
        self.guarded()?.session = None;
        Ok(())
    }

    fn auth_check(&self) -> Result<SessionUser, GatewayError> {
        self.guarded()?.session.clone().ok_or(GatewayError::Auth)
    }

    fn list_listings(&self, _page: u32) -> Result<Vec<Listing>, GatewayError> {
        Ok(self.guarded()?.listings.clone())
    }

    fn create_product(&self, product: &NewProduct) -> Result<(), GatewayError> {
        let mut store = self.guarded()?;
        let id = store.assign_id("prod");
        store.products.push((id, product.clone()));
        Ok(())
    }

    fn create_listing(&self, listing: &NewListing) -> Result<(), GatewayError> {
        let mut store = self.guarded()?;
        let product = store
            .products
            .iter()
            .find(|(id, _)| id == &listing.product)
            .map(|(_, product)| product.clone())
            .ok_or_else(|| GatewayError::NotFound(format!("products/{}", listing.product)))?;
        let id = ArticleId::new(store.assign_id("art"));
        store.listings.push(Listing {
            id,
            title: listing.title.clone(),
            category: listing.category.clone(),
            product: ProductInfo {
                product_name: product.product_name.clone(),
                price: product.price,
                stock_quantity: product.stock_quantity,
                thumbnail: product
                    .images
                    .first()
                    .map(|path| path.display().to_string())
                    .unwrap_or_default(),
            },
            created_at: chrono::Utc::now(),
        });
        Ok(())
    }

    fn list_categories(&self) -> Result<Vec<Category>, GatewayError> {
        Ok(self.guarded()?.categories.clone())
    }

    fn create_category(&self, name: &str) -> Result<(), GatewayError> {
        let mut store = self.guarded()?;
        let user = store
            .session
            .as_ref()
            .map(|session| session.user_id.clone())
            .unwrap_or_default();
        let id = store.assign_id("cat");
        store.categories.push(Category {
            id,
            category: name.to_string(),
            user,
        });
        Ok(())
    }

    fn list_reviews(&self, article: &ArticleId) -> Result<Vec<Review>, GatewayError> {
        Ok(self
            .guarded()?
            .reviews
            .iter()
            .filter(|review| &review.article == article)
            .cloned()
            .collect())
    }

    fn remove_review(&self, id: &ReviewId) -> Result<(), GatewayError> {
        let mut store = self.guarded()?;
        let position = store
            .reviews
            .iter()
            .position(|review| &review.id == id)
            .ok_or_else(|| GatewayError::NotFound(format!("comments/{}", id.as_str())))?;
        store.reviews.remove(position);
        Ok(())
    }

    fn like_review(&self, id: &ReviewId) -> Result<(), GatewayError> {
        let mut store = self.guarded()?;
        let user_id = store
            .session
            .as_ref()
            .map(|session| session.user_id.clone())
            .ok_or(GatewayError::Auth)?;
        let review = store
            .reviews
            .iter_mut()
            .find(|review| &review.id == id)
            .ok_or_else(|| GatewayError::NotFound(format!("comments/{}", id.as_str())))?;
        if !review.liked_by.contains(&user_id) {
            review.liked_by.push(user_id);
        }
        Ok(())
    }

    fn unlike_review(&self, id: &ReviewId) -> Result<(), GatewayError> {
        let mut store = self.guarded()?;
        let user_id = store
            .session
            .as_ref()
            .map(|session| session.user_id.clone())
            .ok_or(GatewayError::Auth)?;
        let review = store
            .reviews
            .iter_mut()
            .find(|review| &review.id == id)
            .ok_or_else(|| GatewayError::NotFound(format!("comments/{}", id.as_str())))?;
        review.liked_by.retain(|liker| liker != &user_id);
        Ok(())
    }
}

impl MemoryStoreClient {
    /// Seed a review directly, bypassing the API surface; tests use
    /// this to arrange like/unlike scenarios.
    pub fn push_review(&self, review: Review) {
        self.lock().reviews.push(review);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn payload(name: &str, is_default: bool) -> AddressPayload {
        AddressPayload {
            receiver_name: name.to_string(),
            receiver_phone: "01012345678".to_string(),
            main_address: "12 Mapo-daero".to_string(),
            detail_address: "Apt 301".to_string(),
            zip_code: "04123".to_string(),
            is_default,
            shipping_memo: String::new(),
        }
    }

    #[test]
    fn status_mapping_follows_the_taxonomy() {
        assert_eq!(status_error("addresses", StatusCode::OK), None);
        assert_eq!(
            status_error("addresses", StatusCode::UNAUTHORIZED),
            Some(GatewayError::Auth)
        );
        assert_eq!(
            status_error("addresses", StatusCode::FORBIDDEN),
            Some(GatewayError::Auth)
        );
        assert_eq!(
            status_error("addresses/a1", StatusCode::NOT_FOUND),
            Some(GatewayError::NotFound("addresses/a1".to_string()))
        );
        assert!(matches!(
            status_error("addresses", StatusCode::INTERNAL_SERVER_ERROR),
            Some(GatewayError::Network(_))
        ));
    }

    #[test]
    fn creating_a_default_address_demotes_the_previous_one() {
        let client = MemoryStoreClient::new();
        let first = client.create_address(&payload("first", true)).unwrap();
        let second = client.create_address(&payload("second", true)).unwrap();

        let list = client.list_addresses().unwrap();
        let defaults: Vec<&Address> = list.iter().filter(|address| address.is_default).collect();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].id, second.id);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn updating_to_default_demotes_the_previous_one() {
        let client = MemoryStoreClient::new();
        let first = client.create_address(&payload("first", true)).unwrap();
        let second = client.create_address(&payload("second", false)).unwrap();

        client
            .update_address(&second.id, &payload("second", true))
            .unwrap();
        let list = client.list_addresses().unwrap();
        let defaults: Vec<&Address> = list.iter().filter(|address| address.is_default).collect();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].id, second.id);
        assert!(list.iter().any(|address| address.id == first.id));
    }

    #[test]
    fn deleting_the_default_leaves_no_default_behind() {
        let client = MemoryStoreClient::new();
        let default = client.create_address(&payload("default", true)).unwrap();
        client.create_address(&payload("other", false)).unwrap();

        client.delete_address(&default.id).unwrap();
        let list = client.list_addresses().unwrap();
        assert_eq!(list.len(), 1);
        assert!(list.iter().all(|address| !address.is_default));
    }

    #[test]
    fn unknown_ids_map_to_not_found() {
        let client = MemoryStoreClient::new();
        let err = client
            .delete_address(&AddressId::new("missing"))
            .unwrap_err();
        assert_eq!(err, GatewayError::NotFound("addresses/missing".to_string()));
        let err = client
            .update_address(&AddressId::new("missing"), &payload("x", false))
            .unwrap_err();
        assert!(matches!(err, GatewayError::NotFound(_)));
    }

    #[test]
    fn injected_failures_fire_exactly_once() {
        let client = MemoryStoreClient::new();
        client.create_address(&payload("keep", false)).unwrap();
        client.fail_next(GatewayError::Network("scripted".to_string()));

        let err = client.list_addresses().unwrap_err();
        assert_eq!(err, GatewayError::Network("scripted".to_string()));
        assert_eq!(client.list_addresses().unwrap().len(), 1);
    }

    #[test]
    fn likes_require_a_session_and_are_idempotent() {
        let client = MemoryStoreClient::new();
        client.push_review(Review {
            id: ReviewId::new("r1"),
            article: ArticleId::new("p1"),
            rate: 5,
            content: String::new(),
            liked_by: Vec::new(),
            updated_at: chrono::Utc::now(),
        });

        assert_eq!(
            client.like_review(&ReviewId::new("r1")).unwrap_err(),
            GatewayError::Auth
        );

        client
            .login(&Credentials {
                email: "dana@shop.example".to_string(),
                password: "abcd1234".to_string(),
            })
            .unwrap();
        client.like_review(&ReviewId::new("r1")).unwrap();
        client.like_review(&ReviewId::new("r1")).unwrap();
        let reviews = client.list_reviews(&ArticleId::new("p1")).unwrap();
        assert_eq!(reviews[0].liked_by, vec!["user-1".to_string()]);

        client.unlike_review(&ReviewId::new("r1")).unwrap();
        let reviews = client.list_reviews(&ArticleId::new("p1")).unwrap();
        assert!(reviews[0].liked_by.is_empty());
    }

    #[test]
    fn password_change_requires_a_session() {
        let client = MemoryStoreClient::new();
        let change = PasswordChange {
            old_password: "abcd1234".to_string(),
            new_password: "efgh5678".to_string(),
        };
        assert_eq!(client.change_password(&change).unwrap_err(), GatewayError::Auth);

        client
            .login(&Credentials {
                email: "dana@shop.example".to_string(),
                password: "abcd1234".to_string(),
            })
            .unwrap();
        assert_eq!(client.change_password(&change), Ok(()));

        client.logout().unwrap();
        assert_eq!(client.auth_check().unwrap_err(), GatewayError::Auth);
    }

    #[test]
    fn categories_remember_their_creator() {
        let client = MemoryStoreClient::new();
        client
            .login(&Credentials {
                email: "admin@shop.example".to_string(),
                password: "abcd1234".to_string(),
            })
            .unwrap();
        client.create_category("kitchen").unwrap();
        let list = client.list_categories().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].category, "kitchen");
        assert_eq!(list[0].user, "user-1");
    }

    #[test]
    fn the_seeded_shop_is_browsable() {
        let client = MemoryStoreClient::seeded();
        assert!(client.auth_check().is_ok());
        let listings = client.list_listings(1).unwrap();
        assert_eq!(listings.len(), 1);
        let reviews = client.list_reviews(&listings[0].id).unwrap();
        assert_eq!(reviews.len(), 2);
        assert!(client.list_addresses().unwrap().iter().any(|a| a.is_default));
    }

    #[test]
    fn listing_creation_requires_a_registered_product() {
        let client = MemoryStoreClient::new();
        let missing = NewListing {
            title: "New arrivals".to_string(),
            product: "prod-404".to_string(),
            category: "tops".to_string(),
            detail_images: Vec::new(),
        };
        assert!(matches!(
            client.create_listing(&missing).unwrap_err(),
            GatewayError::NotFound(_)
        ));
    }

    #[test]
    fn multipart_forms_reject_missing_image_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let present = dir.path().join("one.png");
        std::fs::write(&present, b"png").expect("write image");

        let ok = NewProduct {
            product_name: "Mug".to_string(),
            price: 12_000,
            stock_quantity: 40,
            images: vec![present.clone()],
        };
        assert!(product_form(&ok).is_ok());

        let missing = NewProduct {
            images: vec![dir.path().join("absent.png")],
            ..ok.clone()
        };
        assert!(matches!(
            product_form(&missing).unwrap_err(),
            GatewayError::Validation(ValidationError::InvalidField { field: "images", .. })
        ));

        let empty = NewProduct {
            images: Vec::new(),
            ..ok
        };
        assert!(matches!(
            product_form(&empty).unwrap_err(),
            GatewayError::Validation(ValidationError::MissingField { field: "images" })
        ));
    }

    #[test]
    fn listing_form_requires_detail_images() {
        let listing = NewListing {
            title: "New arrivals".to_string(),
            product: "prod-1".to_string(),
            category: "tops".to_string(),
            detail_images: Vec::new(),
        };
        assert!(matches!(
            listing_form(&listing).unwrap_err(),
            GatewayError::Validation(ValidationError::MissingField {
                field: "detail_images"
            })
        ));
    }
}
