//! Category Model

use serde::{Deserialize, Serialize};

/// Default icon shown for categories without one
pub const DEFAULT_CATEGORY_ICON: &str = "🍔";

/// Category entity
///
/// Name-keyed backends return categories as bare strings; those decode with
/// `id = None` and are read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CategoryWire")]
pub struct Category {
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub order_position: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Category {
    /// A category known only by name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
            icon: None,
            order_position: 0,
            created_at: None,
        }
    }

    /// Icon with fallback
    pub fn icon_or_default(&self) -> &str {
        self.icon.as_deref().unwrap_or(DEFAULT_CATEGORY_ICON)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CategoryWire {
    Name(String),
    Record {
        #[serde(default)]
        id: Option<i64>,
        name: String,
        #[serde(default)]
        description: Option<String>,
        #[serde(default)]
        icon: Option<String>,
        #[serde(default)]
        order_position: Option<i32>,
        #[serde(default)]
        created_at: Option<String>,
    },
}

impl From<CategoryWire> for Category {
    fn from(wire: CategoryWire) -> Self {
        match wire {
            CategoryWire::Name(name) => Category::named(name),
            CategoryWire::Record {
                id,
                name,
                description,
                icon,
                order_position,
                created_at,
            } => Category {
                id,
                name,
                description,
                icon,
                order_position: order_position.unwrap_or(0),
                created_at,
            },
        }
    }
}

/// Create / update category payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPayload {
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub order_position: i32,
}
