use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::category::{Category, CategoryId};
use crate::domain::user::User;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category_id: CategoryId,
}

/// A product with its category and the category's owner resolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedProduct {
    pub id: ProductId,
    pub name: String,
    pub category_id: CategoryId,
    pub category: Category,
    pub user: User,
}

impl EnrichedProduct {
    pub fn new(product: Product, category: Category, user: User) -> Self {
        Self {
            id: product.id,
            name: product.name,
            category_id: product.category_id,
            category,
            user,
        }
    }
}
