//! REST API client for the remote marketplace.
//!
//! Wraps every marketplace endpoint the web client consumes using
//! [`reqwest`]. Calls that read or mutate private data take the caller's
//! [Session] and send its token as a bearer token.

use axum::body::Bytes;
use reqwest::{Client, RequestBuilder, Response, StatusCode, header::CONTENT_TYPE, multipart};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    auth::{Session, UserId},
    favorite::{FavoriteApi, FavoriteFolder, FolderId, FolderName},
    item::{Category, Item, ItemId, ItemImage, ItemListing, ItemSummary},
};

/// The content type assumed for item images when the API does not send one.
const DEFAULT_IMAGE_CONTENT_TYPE: &str = "image/jpeg";

/// HTTP client for the remote marketplace API.
///
/// Cloning is cheap, the underlying [reqwest::Client] pools connections.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

/// Errors from the marketplace API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API rejected the bearer token, or the request needed one.
    #[error("the marketplace API rejected the session token")]
    Unauthorized,

    /// The API returned a non-2xx status code other than 401.
    #[error("marketplace API error ({status}): {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// The error message from the response body, or the status text.
        message: String,
    },
}

/// The body returned by the API after a successful log-in.
#[derive(Debug, Clone, Deserialize)]
pub struct LogInResponse {
    /// The ID of the user that logged in.
    pub id: i64,
    /// The display name of the user.
    pub name: String,
    /// The bearer token for subsequent requests.
    pub token: String,
}

/// The body returned by the API after registering a user.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    /// The ID assigned to the new user. Users log in with this ID.
    pub id: i64,
    /// The display name of the new user.
    pub name: String,
}

#[derive(Serialize)]
struct LogInRequest<'a> {
    user_id: i64,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    name: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct IdResponse {
    id: i64,
}

#[derive(Serialize)]
struct SellRequest {
    item_id: ItemId,
}

#[derive(Serialize)]
struct PurchaseRequest {
    user_id: UserId,
}

#[derive(Serialize)]
struct FavoriteRequest {
    item_id: ItemId,
    folder_id: Option<FolderId>,
}

#[derive(Serialize)]
struct NewFolderRequest<'a> {
    folder_name: &'a str,
}

/// The error envelope the API uses for non-2xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl ApiClient {
    /// Create a new API client for the marketplace at `base_url`, e.g.
    /// `http://localhost:9000`.
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create an API client reusing an existing [reqwest::Client].
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Exchange a user ID and password for a session token.
    ///
    /// Returns [ApiError::Unauthorized] if the credentials are wrong.
    pub async fn log_in(&self, user_id: i64, password: &str) -> Result<LogInResponse, ApiError> {
        let response = self
            .client
            .post(self.url("/login"))
            .json(&LogInRequest { user_id, password })
            .send()
            .await?;

        parse_response(response).await
    }

    /// Register a new user.
    pub async fn register(&self, name: &str, password: &str) -> Result<RegisterResponse, ApiError> {
        let response = self
            .client
            .post(self.url("/register"))
            .json(&RegisterRequest { name, password })
            .send()
            .await?;

        parse_response(response).await
    }

    /// Get the items that are currently on sale.
    pub async fn get_on_sale_items(&self) -> Result<Vec<ItemSummary>, ApiError> {
        let response = self.client.get(self.url("/items")).send().await?;

        parse_list(response).await
    }

    /// Get the on-sale items whose name matches `name`.
    pub async fn search_items(&self, name: &str) -> Result<Vec<ItemSummary>, ApiError> {
        let response = self
            .client
            .get(self.url("/search"))
            .query(&[("name", name)])
            .send()
            .await?;

        parse_list(response).await
    }

    /// Get a single item.
    pub async fn get_item(&self, item_id: ItemId) -> Result<Item, ApiError> {
        let response = self
            .client
            .get(self.url(&format!("/items/{item_id}")))
            .send()
            .await?;

        parse_response(response).await
    }

    /// Get the raw image of an item along with its content type.
    pub async fn get_item_image(
        &self,
        session: &Session,
        item_id: ItemId,
    ) -> Result<ItemImage, ApiError> {
        let response = self
            .authorized(
                self.client
                    .get(self.url(&format!("/items/{item_id}/image"))),
                session,
            )
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or(DEFAULT_IMAGE_CONTENT_TYPE)
            .to_owned();
        let bytes: Bytes = response.bytes().await?;

        Ok(ItemImage {
            content_type,
            bytes,
        })
    }

    /// Get all item categories.
    pub async fn get_categories(&self) -> Result<Vec<Category>, ApiError> {
        let response = self.client.get(self.url("/items/categories")).send().await?;

        parse_list(response).await
    }

    /// Get the items listed by `user_id`.
    pub async fn get_user_items(&self, user_id: UserId) -> Result<Vec<ItemSummary>, ApiError> {
        let response = self
            .client
            .get(self.url(&format!("/users/{user_id}/items")))
            .send()
            .await?;

        parse_list(response).await
    }

    /// Create a new listing and return its ID.
    ///
    /// The item is not on sale until [ApiClient::put_on_sale] is called.
    pub async fn add_item(
        &self,
        session: &Session,
        listing: ItemListing,
    ) -> Result<ItemId, ApiError> {
        let form = listing_form(listing)?;
        let response = self
            .authorized(self.client.post(self.url("/items")), session)
            .multipart(form)
            .send()
            .await?;

        parse_response::<IdResponse>(response)
            .await
            .map(|body| body.id)
    }

    /// Replace the details of an existing listing.
    pub async fn update_item(
        &self,
        session: &Session,
        item_id: ItemId,
        listing: ItemListing,
    ) -> Result<ItemId, ApiError> {
        let form = listing_form(listing)?;
        let response = self
            .authorized(
                self.client.put(self.url(&format!("/items/{item_id}"))),
                session,
            )
            .multipart(form)
            .send()
            .await?;

        parse_response::<IdResponse>(response)
            .await
            .map(|body| body.id)
    }

    /// Mark a listing as on sale.
    pub async fn put_on_sale(&self, session: &Session, item_id: ItemId) -> Result<(), ApiError> {
        let response = self
            .authorized(self.client.post(self.url("/sell")), session)
            .json(&SellRequest { item_id })
            .send()
            .await?;

        check_status(response).await
    }

    /// Buy an item as the session's user.
    pub async fn purchase(&self, session: &Session, item_id: ItemId) -> Result<(), ApiError> {
        let response = self
            .authorized(
                self.client.post(self.url(&format!("/purchase/{item_id}"))),
                session,
            )
            .json(&PurchaseRequest {
                user_id: session.user_id,
            })
            .send()
            .await?;

        check_status(response).await
    }

    /// Get the items in a favorite folder, or every favorite when `folder_id`
    /// is `None`.
    pub async fn get_favorite_items(
        &self,
        session: &Session,
        folder_id: Option<FolderId>,
    ) -> Result<Vec<ItemSummary>, ApiError> {
        let path = match folder_id {
            Some(folder_id) => format!("/favorite/{folder_id}"),
            None => "/favorite/".to_owned(),
        };
        let response = self
            .authorized(self.client.get(self.url(&path)), session)
            .send()
            .await?;

        parse_list(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder, session: &Session) -> RequestBuilder {
        request.bearer_auth(&session.token)
    }
}

impl FavoriteApi for ApiClient {
    async fn list_folders(&self, session: &Session) -> Result<Vec<FavoriteFolder>, ApiError> {
        let response = self
            .authorized(self.client.get(self.url("/favorite")), session)
            .send()
            .await?;

        parse_list(response).await
    }

    async fn check_favorite(&self, session: &Session, item_id: ItemId) -> Result<bool, ApiError> {
        let response = self
            .authorized(
                self.client
                    .get(self.url(&format!("/favorite/check/{item_id}"))),
                session,
            )
            .send()
            .await?;

        parse_response(response).await
    }

    async fn add_to_folder(
        &self,
        session: &Session,
        item_id: ItemId,
        folder_id: FolderId,
    ) -> Result<(), ApiError> {
        let response = self
            .authorized(self.client.post(self.url("/favorite")), session)
            .json(&FavoriteRequest {
                item_id,
                folder_id: Some(folder_id),
            })
            .send()
            .await?;

        check_status(response).await
    }

    async fn create_folder(
        &self,
        session: &Session,
        folder_name: &FolderName,
    ) -> Result<(), ApiError> {
        let response = self
            .authorized(self.client.post(self.url("/favorite/new")), session)
            .json(&NewFolderRequest {
                folder_name: folder_name.as_ref(),
            })
            .send()
            .await?;

        check_status(response).await
    }

    async fn remove_from_folder(
        &self,
        session: &Session,
        item_id: ItemId,
        folder_id: Option<FolderId>,
    ) -> Result<(), ApiError> {
        let response = self
            .authorized(self.client.post(self.url("/favorite/delete")), session)
            .json(&FavoriteRequest { item_id, folder_id })
            .send()
            .await?;

        check_status(response).await
    }
}

fn listing_form(listing: ItemListing) -> Result<multipart::Form, ApiError> {
    let mut form = multipart::Form::new()
        .text("name", listing.name.to_string())
        .text("category_id", listing.category_id.to_string())
        .text("price", listing.price.as_u64().to_string())
        .text("description", listing.description);

    if let Some(image) = listing.image {
        let part = multipart::Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.content_type)?;
        form = form.part("image", part);
    }

    Ok(form)
}

/// Ensure the response has a success status code. Returns the response
/// unchanged on success, [ApiError::Unauthorized] for a 401, or an
/// [ApiError::Status] with the API's error message otherwise.
async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();

        return Err(ApiError::Status {
            status: status.as_u16(),
            message: error_message(status, &body),
        });
    }

    Ok(response)
}

fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|body| body.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unexpected response")
                .to_owned()
        })
}

async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let response = ensure_success(response).await?;

    Ok(response.json::<T>().await?)
}

/// Parse a JSON list where the API sends `null` for an empty list.
async fn parse_list<T: DeserializeOwned>(response: Response) -> Result<Vec<T>, ApiError> {
    parse_response::<Option<Vec<T>>>(response)
        .await
        .map(Option::unwrap_or_default)
}

/// Assert the response has a success status code, discarding the body.
async fn check_status(response: Response) -> Result<(), ApiError> {
    ensure_success(response).await?;

    Ok(())
}
