//! Order Queue
//!
//! Orders filtered server-side by one status. Staff expand a row to see its
//! items and advance it one step along the status progression.

use std::sync::Arc;

use shared::models::{Order, OrderStatus};
use staff_client::StaffApi;

use crate::error::{ViewError, ViewResult};

/// Next status in the progression; terminal and unknown statuses return themselves
pub fn next_status(current: &OrderStatus) -> OrderStatus {
    current.next()
}

/// Display label for a status
pub fn status_label(status: &OrderStatus) -> &str {
    status.label()
}

pub struct OrderQueue {
    api: Arc<dyn StaffApi>,
    selected_status: OrderStatus,
    orders: Vec<Order>,
    expanded: Option<i64>,
    loading: bool,
    error: Option<ViewError>,
}

impl OrderQueue {
    pub fn new(api: Arc<dyn StaffApi>) -> Self {
        Self {
            api,
            selected_status: OrderStatus::Pending,
            orders: Vec::new(),
            expanded: None,
            loading: false,
            error: None,
        }
    }

    pub fn selected_status(&self) -> &OrderStatus {
        &self.selected_status
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn expanded(&self) -> Option<i64> {
        self.expanded
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<ViewError> {
        self.error
    }

    pub async fn mount(&mut self) -> ViewResult<()> {
        self.load().await
    }

    /// Fetch the orders for the selected status
    pub async fn load(&mut self) -> ViewResult<()> {
        self.loading = true;
        self.error = None;
        let result = self.api.list_orders(Some(&self.selected_status)).await;
        self.loading = false;

        match result {
            Ok(orders) => {
                tracing::debug!(status = %self.selected_status, count = orders.len(), "Order queue loaded");
                self.orders = orders;
                Ok(())
            }
            Err(e) => Err(self.fail(ViewError::LoadOrders.caused_by(&e))),
        }
    }

    /// Change the filter and reload
    pub async fn select_status(&mut self, status: OrderStatus) -> ViewResult<()> {
        self.selected_status = status;
        self.load().await
    }

    /// Expand `order_id`, collapsing any other; toggling the expanded order collapses it
    pub fn toggle_expanded(&mut self, order_id: i64) {
        self.expanded = match self.expanded {
            Some(id) if id == order_id => None,
            _ => Some(order_id),
        };
    }

    pub fn is_expanded(&self, order_id: i64) -> bool {
        self.expanded == Some(order_id)
    }

    /// Move an order one step along the progression and reload the list.
    ///
    /// Returns the status that was requested. Terminal and unknown statuses have
    /// no successor, so nothing is sent.
    pub async fn advance(&mut self, order_id: i64, current: &OrderStatus) -> ViewResult<OrderStatus> {
        let next = next_status(current);
        if &next == current {
            tracing::debug!(order_id, status = %current, "Order has no next status");
            return Ok(next);
        }
        self.set_status(order_id, next).await
    }

    /// Set an explicit status and reload the list
    pub async fn set_status(&mut self, order_id: i64, status: OrderStatus) -> ViewResult<OrderStatus> {
        self.error = None;
        if let Err(e) = self.api.update_order_status(order_id, &status).await {
            return Err(self.fail(ViewError::UpdateOrder.caused_by(&e)));
        }
        tracing::info!(order_id, status = %status, "Order status updated");

        self.load().await?;
        Ok(status)
    }

    fn fail(&mut self, err: ViewError) -> ViewError {
        self.error = Some(err);
        err
    }
}
