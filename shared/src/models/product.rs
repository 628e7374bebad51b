//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::category_ref::CategoryRef;
use super::price::PriceValue;

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: PriceValue,
    /// Category reference by id (id-keyed backend)
    #[serde(default)]
    pub category_id: Option<i64>,
    /// Category name: joined by the id-keyed backend, the only key on the name-keyed one
    #[serde(default, alias = "category")]
    pub category_name: Option<String>,
    /// Category icon (joined)
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Product {
    /// Category this product belongs to, preferring the numeric id
    pub fn category_ref(&self) -> Option<CategoryRef> {
        match (self.category_id, &self.category_name) {
            (Some(id), _) => Some(CategoryRef::Id(id)),
            (None, Some(name)) => Some(CategoryRef::Name(name.clone())),
            (None, None) => None,
        }
    }
}

/// Create / update product payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    /// Category name for name-keyed backends
    #[serde(rename = "category", skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    pub image_url: Option<String>,
}

impl ProductPayload {
    /// Attach a category reference to the payload
    pub fn with_category(mut self, category: &CategoryRef) -> Self {
        match category {
            CategoryRef::Id(id) => {
                self.category_id = Some(*id);
                self.category_name = None;
            }
            CategoryRef::Name(name) => {
                self.category_id = None;
                self.category_name = Some(name.clone());
            }
        }
        self
    }
}
