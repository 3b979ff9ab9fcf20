//! REST gateway for the Gaun Roots backend.
//!
//! Each operation issues exactly one request and hands back the JSON body
//! unchanged. Non-success statuses become [`ApiError::Rejected`] carrying the
//! server's message or the operation's fallback text. Nothing is retried.

mod error;


pub use error::{ApiError, ApiResult};

use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::models::{
    AlertRegistration, Credentials, DiseaseReport, ErrorBody, RecordId, ScanRequest, UserUpdate,
};

/// Gateway actions, used for fallback messages and log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Register,
    Login,
    GetUser,
    UpdateUser,
    AddCredits,
    AddFriend,
    GetProducts,
    GetSellerProducts,
    CreateProduct,
    DeleteProduct,
    IncrementView,
    RegisterForAlerts,
    ReportDisease,
    FetchRecentAlerts,
    Predict,
}

impl Operation {
    /// Text reported when a rejected response carries no usable message.
    #[must_use]
    pub const fn fallback_message(self) -> &'static str {
        match self {
            Self::Register | Self::RegisterForAlerts => "Registration failed",
            Self::Login => "Login failed",
            Self::GetUser => "User not found",
            Self::UpdateUser => "Failed to update user",
            Self::AddCredits => "Failed to add credits",
            Self::AddFriend => "Failed to add friend",
            Self::GetProducts | Self::GetSellerProducts => "Failed to load products",
            Self::CreateProduct => "Failed to create product",
            Self::DeleteProduct => "Failed to delete product",
            Self::IncrementView => "Failed to record view",
            Self::ReportDisease => "Report submission failed",
            Self::FetchRecentAlerts => "Failed to fetch recent alerts",
            Self::Predict => "Prediction failed",
        }
    }
}

/// Client for the backend REST API, rooted at a configured base address.
#[derive(Clone, Debug)]
pub struct GaunRootsClient {
    base_url: Url,
    http: Client,
}

impl GaunRootsClient {
    /// Create a client for an absolute base URL such as `http://localhost:8000/api`.
    ///
    /// # Errors
    /// Returns [`ApiError::InvalidBaseUrl`] when the URL does not parse or cannot carry a path.
    pub fn new(base_url: &str) -> ApiResult<Self> {
        let url = Url::parse(base_url)
            .map_err(|err| ApiError::InvalidBaseUrl(format!("{base_url}: {err}")))?;
        Self::from_url(url)
    }

    /// Create a client from an already parsed base URL.
    ///
    /// # Errors
    /// Returns [`ApiError::InvalidBaseUrl`] for URLs like `mailto:` that cannot carry a path.
    pub fn from_url(base_url: Url) -> ApiResult<Self> {
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            base_url,
            http: Client::new(),
        })
    }

    /// Swap the underlying HTTP client, e.g. to set a user agent.
    #[must_use]
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL with `segments` appended, each one percent-escaped.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(&self, operation: Operation, request: RequestBuilder) -> ApiResult<Response> {
        let request = request.build()?;
        debug!(
            operation = ?operation,
            method = %request.method(),
            path = %request.url().path(),
            "sending request"
        );
        Ok(self.http.execute(request).await?)
    }

    /// Check the status, then decode the body verbatim.
    async fn checked(operation: Operation, response: Response) -> ApiResult<Value> {
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            let message = ErrorBody::parse(&body)
                .and_then(|error| error.server_message().map(str::to_owned))
                .unwrap_or_else(|| operation.fallback_message().to_string());
            warn!(operation = ?operation, status = status.as_u16(), %message, "request rejected");
            return Err(ApiError::rejected(status, message));
        }
        decode(&body)
    }

    /// Decode the body without looking at the status.
    async fn unchecked(response: Response) -> ApiResult<Value> {
        let body = response.bytes().await?;
        decode(&body)
    }

    /// Create an account.
    pub async fn register(&self, credentials: &Credentials) -> ApiResult<Value> {
        let op = Operation::Register;
        let url = self.endpoint(&["users", "register"]);
        let response = self.send(op, self.http.post(url).json(credentials)).await?;
        Self::checked(op, response).await
    }

    /// Log in with a display name and account type.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<Value> {
        let op = Operation::Login;
        let url = self.endpoint(&["users", "login"]);
        let response = self.send(op, self.http.post(url).json(credentials)).await?;
        Self::checked(op, response).await
    }

    /// Fetch a user profile.
    pub async fn get_user(&self, id: &RecordId) -> ApiResult<Value> {
        let op = Operation::GetUser;
        let url = self.endpoint(&["users", &id.to_string()]);
        let response = self.send(op, self.http.get(url)).await?;
        Self::checked(op, response).await
    }

    /// Overwrite the credits and/or friend list of a user.
    pub async fn update_user(&self, id: &RecordId, update: &UserUpdate) -> ApiResult<Value> {
        let op = Operation::UpdateUser;
        let url = self.endpoint(&["users", &id.to_string()]);
        let response = self.send(op, self.http.put(url).json(update)).await?;
        Self::checked(op, response).await
    }

    /// Add `amount` credits to a user's balance.
    pub async fn add_credits(&self, id: &RecordId, amount: i64) -> ApiResult<Value> {
        let op = Operation::AddCredits;
        let url = self.endpoint(&["users", &id.to_string(), "add-credits"]);
        let request = self.http.post(url).query(&[("amount", amount)]);
        let response = self.send(op, request).await?;
        Self::checked(op, response).await
    }

    /// Add a friend by name.
    pub async fn add_friend(&self, id: &RecordId, friend_name: &str) -> ApiResult<Value> {
        let op = Operation::AddFriend;
        let url = self.endpoint(&["users", &id.to_string(), "add-friend"]);
        let request = self.http.post(url).query(&[("friend_name", friend_name)]);
        let response = self.send(op, request).await?;
        Self::checked(op, response).await
    }

    /// List every product. The status is not inspected.
    pub async fn get_products(&self) -> ApiResult<Value> {
        let op = Operation::GetProducts;
        let url = self.endpoint(&["products"]);
        let response = self.send(op, self.http.get(url)).await?;
        Self::unchecked(response).await
    }

    /// List the products of one seller. The status is not inspected.
    pub async fn get_seller_products(&self, seller_id: &RecordId) -> ApiResult<Value> {
        let op = Operation::GetSellerProducts;
        let url = self.endpoint(&["products", "seller", &seller_id.to_string()]);
        let response = self.send(op, self.http.get(url)).await?;
        Self::unchecked(response).await
    }

    /// Publish a listing on behalf of a seller.
    pub async fn create_product<B>(
        &self,
        product: &B,
        seller_id: &RecordId,
        seller_name: &str,
    ) -> ApiResult<Value>
    where
        B: Serialize + ?Sized,
    {
        let op = Operation::CreateProduct;
        let url = self.endpoint(&["products"]);
        let seller_id = seller_id.to_string();
        let request = self
            .http
            .post(url)
            .query(&[("seller_id", seller_id.as_str()), ("seller_name", seller_name)])
            .json(product);
        let response = self.send(op, request).await?;
        Self::checked(op, response).await
    }

    /// Remove a listing.
    pub async fn delete_product(&self, id: &RecordId) -> ApiResult<Value> {
        let op = Operation::DeleteProduct;
        let url = self.endpoint(&["products", &id.to_string()]);
        let response = self.send(op, self.http.delete(url)).await?;
        Self::checked(op, response).await
    }

    /// Count a view of a listing. Best effort: only transport failures surface.
    pub async fn increment_view(&self, id: &RecordId) -> ApiResult<()> {
        let op = Operation::IncrementView;
        let url = self.endpoint(&["products", &id.to_string(), "view"]);
        let response = self.send(op, self.http.post(url)).await?;
        if !response.status().is_success() {
            debug!(status = response.status().as_u16(), product = %id, "view not recorded");
        }
        Ok(())
    }

    /// Subscribe a farmer to SMS outbreak alerts.
    pub async fn register_for_alerts(&self, registration: &AlertRegistration) -> ApiResult<Value> {
        let op = Operation::RegisterForAlerts;
        let url = self.endpoint(&["register-alerts"]);
        let response = self.send(op, self.http.post(url).json(registration)).await?;
        Self::checked(op, response).await
    }

    /// Report a disease sighting.
    pub async fn report_disease(&self, report: &DiseaseReport) -> ApiResult<Value> {
        let op = Operation::ReportDisease;
        let url = self.endpoint(&["report-disease"]);
        let response = self.send(op, self.http.post(url).json(report)).await?;
        Self::checked(op, response).await
    }

    /// Recent outbreak reports, optionally narrowed to a location.
    pub async fn fetch_recent_alerts(&self, location: Option<&str>) -> ApiResult<Value> {
        let op = Operation::FetchRecentAlerts;
        let url = self.endpoint(&["recent-alerts"]);
        let mut request = self.http.get(url);
        if let Some(location) = location.map(str::trim).filter(|value| !value.is_empty()) {
            request = request.query(&[("location", location)]);
        }
        let response = self.send(op, request).await?;
        Self::checked(op, response).await
    }

    /// Classify a plant photo.
    pub async fn predict(&self, scan: &ScanRequest) -> ApiResult<Value> {
        let op = Operation::Predict;
        let url = self.endpoint(&["predict"]);
        let response = self.send(op, self.http.post(url).json(scan)).await?;
        Self::checked(op, response).await
    }
}

fn decode(body: &[u8]) -> ApiResult<Value> {
    if body.is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(body)?)
}
