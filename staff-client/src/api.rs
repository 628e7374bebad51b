//! Typed API for the ordering backend
//!
//! [`StaffApi`] is the operation set the staff views depend on.
//! [`StaffClient`] implements it on top of any [`HttpClient`] transport.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use shared::models::{
    Category, CategoryPayload, CategoryRef, Order, OrderStatus, OrderUpdateStatus, Product,
    ProductPayload,
};
use shared::response::{
    ApiResponse, CategoryCreated, HealthStatus, MessageResponse, ProductCreated, ResponseStatus,
};
use urlencoding::encode;

use crate::http::{HttpClient, NetworkHttpClient};
use crate::{ClientError, ClientResult};

/// Staff-facing backend operations
#[async_trait]
pub trait StaffApi: Send + Sync {
    // ========== Orders ==========

    /// List orders, optionally filtered server-side by status
    async fn list_orders(&self, status: Option<&OrderStatus>) -> ClientResult<Vec<Order>>;
    async fn get_order(&self, id: i64) -> ClientResult<Order>;
    async fn update_order_status(&self, id: i64, status: &OrderStatus) -> ClientResult<()>;

    // ========== Categories ==========

    async fn list_categories(&self) -> ClientResult<Vec<Category>>;
    async fn get_category(&self, id: i64) -> ClientResult<Category>;
    /// Returns the new category id
    async fn create_category(&self, payload: &CategoryPayload) -> ClientResult<i64>;
    async fn update_category(&self, id: i64, payload: &CategoryPayload) -> ClientResult<()>;
    async fn delete_category(&self, id: i64) -> ClientResult<()>;

    // ========== Products ==========

    async fn list_products(&self) -> ClientResult<Vec<Product>>;
    async fn list_products_by_category(&self, category: &CategoryRef) -> ClientResult<Vec<Product>>;
    async fn get_product(&self, id: i64) -> ClientResult<Product>;
    /// Returns the new product id
    async fn create_product(&self, payload: &ProductPayload) -> ClientResult<i64>;
    async fn update_product(&self, id: i64, payload: &ProductPayload) -> ClientResult<()>;
    async fn delete_product(&self, id: i64) -> ClientResult<()>;

    // ========== Health ==========

    async fn health(&self) -> ClientResult<HealthStatus>;
}

/// API client over an HTTP transport
#[derive(Debug, Clone)]
pub struct StaffClient<H = NetworkHttpClient> {
    http: H,
}

impl<H: HttpClient> StaffClient<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }

    async fn fetch<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T> {
        let resp: ApiResponse<T> = self.http.get(path).await?;
        into_data(resp)
    }
}

/// Extract `data` from a success envelope
fn into_data<T>(resp: ApiResponse<T>) -> ClientResult<T> {
    if !resp.is_success() {
        return Err(ClientError::InvalidResponse(
            resp.message.unwrap_or_else(|| "Backend reported an error".into()),
        ));
    }
    resp.data
        .ok_or_else(|| ClientError::InvalidResponse("Missing data".into()))
}

/// Check the envelope of a mutating call
fn ensure_success(status: ResponseStatus, message: Option<String>) -> ClientResult<()> {
    match status {
        ResponseStatus::Success => Ok(()),
        ResponseStatus::Error => Err(ClientError::InvalidResponse(
            message.unwrap_or_else(|| "Backend reported an error".into()),
        )),
    }
}

#[async_trait]
impl<H: HttpClient> StaffApi for StaffClient<H> {
    async fn list_orders(&self, status: Option<&OrderStatus>) -> ClientResult<Vec<Order>> {
        match status {
            Some(status) => {
                self.fetch(&format!("orders?status={}", encode(status.as_str())))
                    .await
            }
            None => self.fetch("orders").await,
        }
    }

    async fn get_order(&self, id: i64) -> ClientResult<Order> {
        self.fetch(&format!("orders/{}", id)).await
    }

    async fn update_order_status(&self, id: i64, status: &OrderStatus) -> ClientResult<()> {
        let body = OrderUpdateStatus {
            status: status.clone(),
        };
        let resp: MessageResponse = self
            .http
            .put(&format!("orders/{}/status", id), &body)
            .await?;
        ensure_success(resp.status, resp.message)
    }

    async fn list_categories(&self) -> ClientResult<Vec<Category>> {
        self.fetch("categories").await
    }

    async fn get_category(&self, id: i64) -> ClientResult<Category> {
        self.fetch(&format!("categories/{}", id)).await
    }

    async fn create_category(&self, payload: &CategoryPayload) -> ClientResult<i64> {
        let resp: CategoryCreated = self.http.post("categories", payload).await?;
        ensure_success(resp.status, resp.message)?;
        Ok(resp.category_id)
    }

    async fn update_category(&self, id: i64, payload: &CategoryPayload) -> ClientResult<()> {
        let resp: MessageResponse = self
            .http
            .put(&format!("categories/{}", id), payload)
            .await?;
        ensure_success(resp.status, resp.message)
    }

    async fn delete_category(&self, id: i64) -> ClientResult<()> {
        let resp: MessageResponse = self.http.delete(&format!("categories/{}", id)).await?;
        ensure_success(resp.status, resp.message)
    }

    async fn list_products(&self) -> ClientResult<Vec<Product>> {
        self.fetch("products").await
    }

    async fn list_products_by_category(&self, category: &CategoryRef) -> ClientResult<Vec<Product>> {
        let segment = category.to_string();
        self.fetch(&format!("products/category/{}", encode(&segment)))
            .await
    }

    async fn get_product(&self, id: i64) -> ClientResult<Product> {
        self.fetch(&format!("products/{}", id)).await
    }

    async fn create_product(&self, payload: &ProductPayload) -> ClientResult<i64> {
        let resp: ProductCreated = self.http.post("products", payload).await?;
        ensure_success(resp.status, resp.message)?;
        Ok(resp.product_id)
    }

    async fn update_product(&self, id: i64, payload: &ProductPayload) -> ClientResult<()> {
        let resp: MessageResponse = self
            .http
            .put(&format!("products/{}", id), payload)
            .await?;
        ensure_success(resp.status, resp.message)
    }

    async fn delete_product(&self, id: i64) -> ClientResult<()> {
        let resp: MessageResponse = self.http.delete(&format!("products/{}", id)).await?;
        ensure_success(resp.status, resp.message)
    }

    async fn health(&self) -> ClientResult<HealthStatus> {
        self.http.get("health").await
    }
}
