//! In-memory backend for view tests

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use shared::models::{
    Category, CategoryPayload, CategoryRef, Order, OrderStatus, PriceValue, Product, ProductPayload,
};
use shared::response::HealthStatus;
use staff_client::{ClientError, ClientResult, StaffApi};
use tokio::sync::Notify;

#[derive(Default)]
pub struct MemoryApi {
    pub orders: Mutex<Vec<Order>>,
    pub categories: Mutex<Vec<Category>>,
    pub products: Mutex<Vec<Product>>,
    calls: Mutex<Vec<String>>,
    failing: Mutex<HashSet<&'static str>>,
    order_gate: Mutex<Option<Arc<Notify>>>,
}

impl MemoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_orders(self, orders: Vec<Order>) -> Self {
        *self.orders.lock() = orders;
        self
    }

    pub fn with_categories(self, categories: Vec<Category>) -> Self {
        *self.categories.lock() = categories;
        self
    }

    pub fn with_products(self, products: Vec<Product>) -> Self {
        *self.products.lock() = products;
        self
    }

    /// Make every call to `op` fail
    pub fn fail_on(&self, op: &'static str) {
        self.failing.lock().insert(op);
    }

    pub fn recover(&self, op: &'static str) {
        self.failing.lock().remove(op);
    }

    /// Block `list_orders` until the returned notifier is triggered
    pub fn gate_orders(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.order_gate.lock() = Some(notify.clone());
        notify
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    fn enter(&self, op: &'static str, call: String) -> ClientResult<()> {
        self.calls.lock().push(call);
        if self.failing.lock().contains(op) {
            return Err(ClientError::Api {
                status: 500,
                message: format!("{} failed", op),
            });
        }
        Ok(())
    }

    fn not_found(what: &str, id: i64) -> ClientError {
        ClientError::NotFound(format!("{} {} not found", what, id))
    }

    fn product_from(id: i64, payload: &ProductPayload) -> Product {
        Product {
            id,
            name: payload.name.clone(),
            description: Some(payload.description.clone()),
            price: PriceValue::from(payload.price),
            category_id: payload.category_id,
            category_name: payload.category_name.clone(),
            icon: None,
            image_url: payload.image_url.clone(),
        }
    }
}

#[async_trait]
impl StaffApi for MemoryApi {
    async fn list_orders(&self, status: Option<&OrderStatus>) -> ClientResult<Vec<Order>> {
        self.enter(
            "list_orders",
            format!("list_orders({})", status.map(|s| s.as_str()).unwrap_or("*")),
        )?;
        let gate = self.order_gate.lock().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let orders = self.orders.lock();
        Ok(orders
            .iter()
            .filter(|o| status.is_none_or(|s| &o.status == s))
            .cloned()
            .collect())
    }

    async fn get_order(&self, id: i64) -> ClientResult<Order> {
        self.enter("get_order", format!("get_order({})", id))?;
        self.orders
            .lock()
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found("order", id))
    }

    async fn update_order_status(&self, id: i64, status: &OrderStatus) -> ClientResult<()> {
        self.enter(
            "update_order_status",
            format!("update_order_status({}, {})", id, status),
        )?;
        let mut orders = self.orders.lock();
        let order = orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| Self::not_found("order", id))?;
        order.status = status.clone();
        Ok(())
    }

    async fn list_categories(&self) -> ClientResult<Vec<Category>> {
        self.enter("list_categories", "list_categories".into())?;
        Ok(self.categories.lock().clone())
    }

    async fn get_category(&self, id: i64) -> ClientResult<Category> {
        self.enter("get_category", format!("get_category({})", id))?;
        self.categories
            .lock()
            .iter()
            .find(|c| c.id == Some(id))
            .cloned()
            .ok_or_else(|| Self::not_found("category", id))
    }

    async fn create_category(&self, payload: &CategoryPayload) -> ClientResult<i64> {
        self.enter("create_category", format!("create_category({})", payload.name))?;
        let mut categories = self.categories.lock();
        let id = categories.iter().filter_map(|c| c.id).max().unwrap_or(0) + 1;
        categories.push(Category {
            id: Some(id),
            name: payload.name.clone(),
            description: payload.description.clone(),
            icon: payload.icon.clone(),
            order_position: payload.order_position,
            created_at: None,
        });
        Ok(id)
    }

    async fn update_category(&self, id: i64, payload: &CategoryPayload) -> ClientResult<()> {
        self.enter("update_category", format!("update_category({})", id))?;
        let mut categories = self.categories.lock();
        let category = categories
            .iter_mut()
            .find(|c| c.id == Some(id))
            .ok_or_else(|| Self::not_found("category", id))?;
        category.name = payload.name.clone();
        category.description = payload.description.clone();
        category.icon = payload.icon.clone();
        category.order_position = payload.order_position;
        Ok(())
    }

    async fn delete_category(&self, id: i64) -> ClientResult<()> {
        self.enter("delete_category", format!("delete_category({})", id))?;
        self.categories.lock().retain(|c| c.id != Some(id));
        Ok(())
    }

    async fn list_products(&self) -> ClientResult<Vec<Product>> {
        self.enter("list_products", "list_products".into())?;
        Ok(self.products.lock().clone())
    }

    async fn list_products_by_category(&self, category: &CategoryRef) -> ClientResult<Vec<Product>> {
        self.enter(
            "list_products_by_category",
            format!("list_products_by_category({})", category),
        )?;
        Ok(self
            .products
            .lock()
            .iter()
            .filter(|p| category.matches(p))
            .cloned()
            .collect())
    }

    async fn get_product(&self, id: i64) -> ClientResult<Product> {
        self.enter("get_product", format!("get_product({})", id))?;
        self.products
            .lock()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found("product", id))
    }

    async fn create_product(&self, payload: &ProductPayload) -> ClientResult<i64> {
        self.enter("create_product", format!("create_product({})", payload.name))?;
        let mut products = self.products.lock();
        let id = products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        products.push(Self::product_from(id, payload));
        Ok(id)
    }

    async fn update_product(&self, id: i64, payload: &ProductPayload) -> ClientResult<()> {
        self.enter("update_product", format!("update_product({})", id))?;
        let mut products = self.products.lock();
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Self::not_found("product", id))?;
        *product = Self::product_from(id, payload);
        Ok(())
    }

    async fn delete_product(&self, id: i64) -> ClientResult<()> {
        self.enter("delete_product", format!("delete_product({})", id))?;
        self.products.lock().retain(|p| p.id != id);
        Ok(())
    }

    async fn health(&self) -> ClientResult<HealthStatus> {
        self.enter("health", "health".into())?;
        Ok(HealthStatus {
            status: "healthy".into(),
            timestamp: None,
        })
    }
}

// ========== Fixtures ==========

pub fn order(id: i64, status: &str, total_price: PriceValue) -> Order {
    Order {
        id,
        order_number: format!("ORD-{}", id),
        status: OrderStatus::from(status),
        total_price,
        items: Vec::new(),
        created_at: None,
        updated_at: None,
    }
}

pub fn category(id: i64, name: &str, icon: &str) -> Category {
    Category {
        id: Some(id),
        name: name.into(),
        description: None,
        icon: Some(icon.into()),
        order_position: id as i32,
        created_at: None,
    }
}

pub fn product(id: i64, name: &str, price: Decimal, category: CategoryRef) -> Product {
    let (category_id, category_name) = match category {
        CategoryRef::Id(id) => (Some(id), None),
        CategoryRef::Name(name) => (None, Some(name)),
    };
    Product {
        id,
        name: name.into(),
        description: None,
        price: PriceValue::from(price),
        category_id,
        category_name,
        icon: None,
        image_url: None,
    }
}
