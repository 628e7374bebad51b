//! Unified category identifier
//!
//! Backends key products either by numeric category id or by category name.
//! `CategoryRef` carries whichever the backend uses.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::product::Product;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Id(i64),
    Name(String),
}

impl CategoryRef {
    /// Whether `product` belongs to this category
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryRef::Id(id) => product.category_id == Some(*id),
            CategoryRef::Name(name) => product.category_name.as_deref() == Some(name.as_str()),
        }
    }

    /// Whether this ref points at `category`
    pub fn refers_to(&self, category: &Category) -> bool {
        match self {
            CategoryRef::Id(id) => category.id == Some(*id),
            CategoryRef::Name(name) => category.name == *name,
        }
    }

    pub fn id(&self) -> Option<i64> {
        match self {
            CategoryRef::Id(id) => Some(*id),
            CategoryRef::Name(_) => None,
        }
    }
}

impl From<&Category> for CategoryRef {
    fn from(category: &Category) -> Self {
        match category.id {
            Some(id) => CategoryRef::Id(id),
            None => CategoryRef::Name(category.name.clone()),
        }
    }
}

impl From<i64> for CategoryRef {
    fn from(id: i64) -> Self {
        CategoryRef::Id(id)
    }
}

impl From<&str> for CategoryRef {
    fn from(name: &str) -> Self {
        CategoryRef::Name(name.to_string())
    }
}

impl fmt::Display for CategoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryRef::Id(id) => write!(f, "{}", id),
            CategoryRef::Name(name) => f.write_str(name),
        }
    }
}
