//! Menu Manager
//!
//! Categories and products with local edit drafts. Every successful mutation
//! is followed by a full reload of the affected collection.
//!
//! Categories can be edited and deleted but not created from here. Categories
//! served by a name-keyed backend carry no id and are read-only.

use std::sync::Arc;

use rust_decimal::Decimal;
use shared::models::{
    Category, CategoryPayload, CategoryRef, DEFAULT_CATEGORY_ICON, Product, ProductPayload,
};
use staff_client::StaffApi;

use crate::error::{ViewError, ViewResult};

/// Fallback for products whose category is not loaded
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Asks the user to confirm a destructive action
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

/// Product list filter
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(CategoryRef),
}

impl CategoryFilter {
    fn category(&self) -> Option<&CategoryRef> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Category(category) => Some(category),
        }
    }
}

// ========== Drafts ==========

/// Editable copy of a product
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: Option<CategoryRef>,
    pub image_url: Option<String>,
}

impl ProductDraft {
    pub fn empty(category: Option<CategoryRef>) -> Self {
        Self {
            id: None,
            name: String::new(),
            description: String::new(),
            price: Decimal::ZERO,
            category,
            image_url: None,
        }
    }

    pub fn from_product(product: &Product) -> Self {
        Self {
            id: Some(product.id),
            name: product.name.clone(),
            description: product.description.clone().unwrap_or_default(),
            // Unparseable prices come up as zero and must be re-entered
            price: product.price.parse().unwrap_or(Decimal::ZERO),
            category: product.category_ref(),
            image_url: product.image_url.clone(),
        }
    }

    /// Build the request payload; `None` when a required field is missing
    pub fn validate(&self) -> Option<ProductPayload> {
        if self.name.trim().is_empty() || self.price.is_zero() {
            return None;
        }
        let category = self.category.as_ref()?;

        let payload = ProductPayload {
            name: self.name.trim().to_string(),
            description: self.description.clone(),
            price: self.price,
            category_id: None,
            category_name: None,
            image_url: self.image_url.clone().filter(|url| !url.trim().is_empty()),
        };
        Some(payload.with_category(category))
    }
}

/// Editable copy of a category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDraft {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub order_position: i32,
}

impl CategoryDraft {
    pub fn from_category(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            description: category.description.clone().unwrap_or_default(),
            icon: category.icon_or_default().to_string(),
            order_position: category.order_position,
        }
    }

    pub fn payload(&self) -> CategoryPayload {
        CategoryPayload {
            name: self.name.trim().to_string(),
            description: Some(self.description.clone()).filter(|d| !d.is_empty()),
            icon: Some(self.icon.clone()).filter(|i| !i.is_empty()),
            order_position: self.order_position,
        }
    }
}

// ========== Manager ==========

pub struct MenuManager {
    api: Arc<dyn StaffApi>,
    categories: Vec<Category>,
    products: Vec<Product>,
    selected: CategoryFilter,
    category_draft: Option<CategoryDraft>,
    product_draft: Option<ProductDraft>,
    loading: bool,
    error: Option<ViewError>,
    /// Set once the first non-empty category list has picked the initial filter
    initial_selection_done: bool,
}

impl MenuManager {
    pub fn new(api: Arc<dyn StaffApi>) -> Self {
        Self {
            api,
            categories: Vec::new(),
            products: Vec::new(),
            selected: CategoryFilter::All,
            category_draft: None,
            product_draft: None,
            loading: false,
            error: None,
            initial_selection_done: false,
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn selected(&self) -> &CategoryFilter {
        &self.selected
    }

    pub fn category_draft(&self) -> Option<&CategoryDraft> {
        self.category_draft.as_ref()
    }

    pub fn product_draft(&self) -> Option<&ProductDraft> {
        self.product_draft.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<ViewError> {
        self.error
    }

    /// Load categories and all products. Both are attempted; the first failure is returned.
    pub async fn mount(&mut self) -> ViewResult<()> {
        let categories = self.load_categories().await;
        let products = self.load_all_products().await;
        categories.and(products)
    }

    // ========== Loading ==========

    pub async fn load_categories(&mut self) -> ViewResult<()> {
        self.loading = true;
        let result = self.api.list_categories().await;
        self.loading = false;

        match result {
            Ok(categories) => {
                self.categories = categories;
                self.select_initial_category();
                Ok(())
            }
            Err(e) => Err(self.fail(ViewError::LoadCategories.caused_by(&e))),
        }
    }

    /// The first loaded category becomes the filter, unless the user already picked one
    fn select_initial_category(&mut self) {
        if self.initial_selection_done {
            return;
        }
        let Some(first) = self.categories.first() else {
            return;
        };
        self.initial_selection_done = true;
        if self.selected == CategoryFilter::All {
            let category = CategoryRef::from(first);
            tracing::debug!(category = %category, "Selecting first category");
            self.selected = CategoryFilter::Category(category);
        }
    }

    pub async fn load_all_products(&mut self) -> ViewResult<()> {
        self.loading = true;
        let result = self.api.list_products().await;
        self.loading = false;
        self.apply_products(result)
    }

    pub async fn load_products_by_category(&mut self, category: &CategoryRef) -> ViewResult<()> {
        self.loading = true;
        let result = self.api.list_products_by_category(category).await;
        self.loading = false;
        self.apply_products(result)
    }

    fn apply_products(&mut self, result: staff_client::ClientResult<Vec<Product>>) -> ViewResult<()> {
        match result {
            Ok(products) => {
                self.products = products;
                Ok(())
            }
            Err(e) => Err(self.fail(ViewError::LoadProducts.caused_by(&e))),
        }
    }

    /// Change the filter and fetch its products
    pub async fn select_category(&mut self, filter: CategoryFilter) -> ViewResult<()> {
        self.error = None;
        self.selected = filter;
        self.reload_products().await
    }

    /// Fetch products for the current filter
    pub async fn reload_products(&mut self) -> ViewResult<()> {
        match self.selected.clone() {
            CategoryFilter::All => self.load_all_products().await,
            CategoryFilter::Category(category) => self.load_products_by_category(&category).await,
        }
    }

    /// Products visible under the current filter
    pub fn filtered_products(&self) -> Vec<&Product> {
        match &self.selected {
            CategoryFilter::All => self.products.iter().collect(),
            CategoryFilter::Category(category) => {
                self.products.iter().filter(|p| category.matches(p)).collect()
            }
        }
    }

    fn find_category(&self, category: &CategoryRef) -> Option<&Category> {
        self.categories.iter().find(|c| category.refers_to(c))
    }

    pub fn category_name(&self, category: &CategoryRef) -> &str {
        self.find_category(category)
            .map(|c| c.name.as_str())
            .unwrap_or(UNKNOWN_CATEGORY)
    }

    pub fn category_icon(&self, category: &CategoryRef) -> &str {
        self.find_category(category)
            .map(|c| c.icon_or_default())
            .unwrap_or(DEFAULT_CATEGORY_ICON)
    }

    // ========== Category form ==========

    /// Open the edit form for `category`. There is no creation form, so `None` is ignored.
    pub fn open_category_form(&mut self, category: Option<&Category>) {
        match category {
            Some(category) => {
                self.error = None;
                self.category_draft = Some(CategoryDraft::from_category(category));
            }
            None => tracing::debug!("Category creation form requested, ignoring"),
        }
    }

    pub fn close_category_form(&mut self) {
        self.category_draft = None;
    }

    pub fn category_draft_mut(&mut self) -> Option<&mut CategoryDraft> {
        self.category_draft.as_mut()
    }

    /// Submit the open category draft
    pub async fn save_category(&mut self) -> ViewResult<()> {
        self.error = None;
        let Some(draft) = self.category_draft.as_ref() else {
            return Ok(());
        };

        if draft.name.trim().is_empty() {
            return Err(self.fail(ViewError::MissingCategoryName));
        }
        let Some(id) = draft.id else {
            return Err(self.fail(ViewError::CategoryCreationNotAllowed));
        };
        let payload = draft.payload();

        if let Err(e) = self.api.update_category(id, &payload).await {
            return Err(self.fail(ViewError::UpdateCategory.caused_by(&e)));
        }
        tracing::info!(category_id = id, name = %payload.name, "Category updated");

        self.category_draft = None;
        self.load_categories().await
    }

    /// Delete a category after confirmation. Returns `false` when the user declined.
    pub async fn delete_category(&mut self, id: i64, confirm: &dyn Confirm) -> ViewResult<bool> {
        self.error = None;
        if !confirm.confirm("Delete this category?") {
            return Ok(false);
        }

        if let Err(e) = self.api.delete_category(id).await {
            return Err(self.fail(ViewError::DeleteCategory.caused_by(&e)));
        }
        tracing::info!(category_id = id, "Category deleted");

        if self.selected.category().and_then(CategoryRef::id) == Some(id) {
            self.selected = CategoryFilter::All;
        }
        let categories = self.load_categories().await;
        let products = self.reload_products().await;
        categories.and(products).map(|_| true)
    }

    // ========== Product form ==========

    /// Open the product form: a copy of `product`, or an empty draft in the
    /// selected (else first) category.
    pub fn open_product_form(&mut self, product: Option<&Product>) {
        self.error = None;
        let draft = match product {
            Some(product) => ProductDraft::from_product(product),
            None => {
                let category = self
                    .selected
                    .category()
                    .cloned()
                    .or_else(|| self.categories.first().map(CategoryRef::from));
                ProductDraft::empty(category)
            }
        };
        self.product_draft = Some(draft);
    }

    pub fn close_product_form(&mut self) {
        self.product_draft = None;
    }

    pub fn product_draft_mut(&mut self) -> Option<&mut ProductDraft> {
        self.product_draft.as_mut()
    }

    /// Submit the open product draft: update when it has an id, create otherwise
    pub async fn save_product(&mut self) -> ViewResult<()> {
        self.error = None;
        let Some(draft) = self.product_draft.as_ref() else {
            return Ok(());
        };
        let Some(payload) = draft.validate() else {
            return Err(self.fail(ViewError::MissingProductFields));
        };
        let draft_id = draft.id;

        match draft_id {
            Some(id) => {
                if let Err(e) = self.api.update_product(id, &payload).await {
                    return Err(self.fail(ViewError::UpdateProduct.caused_by(&e)));
                }
                tracing::info!(product_id = id, name = %payload.name, "Product updated");
            }
            None => match self.api.create_product(&payload).await {
                Ok(id) => tracing::info!(product_id = id, name = %payload.name, "Product created"),
                Err(e) => return Err(self.fail(ViewError::CreateProduct.caused_by(&e))),
            },
        }

        self.product_draft = None;
        self.load_all_products().await
    }

    /// Delete a product after confirmation. Returns `false` when the user declined.
    pub async fn delete_product(&mut self, id: i64, confirm: &dyn Confirm) -> ViewResult<bool> {
        self.error = None;
        if !confirm.confirm("Delete this product?") {
            return Ok(false);
        }

        if let Err(e) = self.api.delete_product(id).await {
            return Err(self.fail(ViewError::DeleteProduct.caused_by(&e)));
        }
        tracing::info!(product_id = id, "Product deleted");

        self.load_all_products().await.map(|_| true)
    }

    fn fail(&mut self, err: ViewError) -> ViewError {
        self.error = Some(err);
        err
    }
}
