//! View-level errors
//!
//! Every failing operation maps to exactly one message, shown inline by the
//! view. The underlying client error is logged, not surfaced.

use staff_client::ClientError;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ViewError {
    // Orders
    #[error("Failed to load orders")]
    LoadOrders,
    #[error("Failed to update order")]
    UpdateOrder,

    // Categories
    #[error("Failed to load categories")]
    LoadCategories,
    #[error("Category name is required")]
    MissingCategoryName,
    #[error("Creating new categories is not allowed")]
    CategoryCreationNotAllowed,
    #[error("Failed to update category")]
    UpdateCategory,
    #[error("Failed to delete category")]
    DeleteCategory,

    // Products
    #[error("Failed to load products")]
    LoadProducts,
    #[error("Fill in all required fields")]
    MissingProductFields,
    #[error("Failed to create product")]
    CreateProduct,
    #[error("Failed to update product")]
    UpdateProduct,
    #[error("Failed to delete product")]
    DeleteProduct,
}

impl ViewError {
    /// Stable error code, format `{RESOURCE}_{OPERATION}_{REASON}`
    pub fn code(&self) -> &'static str {
        match self {
            ViewError::LoadOrders => "ORDER_LIST_FAILED",
            ViewError::UpdateOrder => "ORDER_UPDATE_FAILED",
            ViewError::LoadCategories => "CATEGORY_LIST_FAILED",
            ViewError::MissingCategoryName => "CATEGORY_NAME_REQUIRED",
            ViewError::CategoryCreationNotAllowed => "CATEGORY_CREATE_NOT_ALLOWED",
            ViewError::UpdateCategory => "CATEGORY_UPDATE_FAILED",
            ViewError::DeleteCategory => "CATEGORY_DELETE_FAILED",
            ViewError::LoadProducts => "PRODUCT_LIST_FAILED",
            ViewError::MissingProductFields => "PRODUCT_FIELDS_REQUIRED",
            ViewError::CreateProduct => "PRODUCT_CREATE_FAILED",
            ViewError::UpdateProduct => "PRODUCT_UPDATE_FAILED",
            ViewError::DeleteProduct => "PRODUCT_DELETE_FAILED",
        }
    }

    /// Log the client-side cause and return self
    pub(crate) fn caused_by(self, cause: &ClientError) -> Self {
        tracing::warn!(code = self.code(), error = %cause, "{}", self);
        self
    }
}

pub type ViewResult<T> = Result<T, ViewError>;
