pub mod dataset;

use std::collections::BTreeSet;

use tracing::info;

use crate::domain::{Category, CategoryId, EnrichedProduct, Product, ProductId, User, UserId};
use crate::errors::DataIntegrityError;

pub use dataset::{Dataset, DatasetError, DatasetFormat};

/// Users, categories and the joined product list, fixed once loaded.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    users: Vec<User>,
    categories: Vec<Category>,
    products: Vec<EnrichedProduct>,
}

impl Catalog {
    /// Resolves every product's category and owner. Any dangling reference or repeated id
    /// rejects the whole dataset.
    pub fn join(dataset: Dataset) -> Result<Self, DataIntegrityError> {
        let Dataset { users, categories, products } = dataset;

        ensure_unique("user", users.iter().map(|user| user.id.0))?;
        ensure_unique("category", categories.iter().map(|category| category.id.0))?;
        ensure_unique("product", products.iter().map(|product| product.id.0))?;

        let mut catalog = Self { users, categories: Vec::new(), products: Vec::new() };
        for category in categories {
            catalog.ensure_owner(&category)?;
            catalog.categories.push(category);
        }
        for product in products {
            let enriched = catalog.enrich(product)?;
            catalog.products.push(enriched);
        }

        info!(
            event_name = "catalog.join.completed",
            users = catalog.users.len(),
            categories = catalog.categories.len(),
            products = catalog.products.len(),
            "catalog joined"
        );
        Ok(catalog)
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn products(&self) -> &[EnrichedProduct] {
        &self.products
    }

    pub fn user(&self, user_id: UserId) -> Option<&User> {
        self.users.iter().find(|user| user.id == user_id)
    }

    pub fn category(&self, category_id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == category_id)
    }

    pub fn product(&self, product_id: ProductId) -> Option<&EnrichedProduct> {
        self.products.iter().find(|product| product.id == product_id)
    }

    /// Adds a category after the initial join, with the same owner check.
    pub fn add_category(&mut self, category: Category) -> Result<(), DataIntegrityError> {
        if self.category(category.id).is_some() {
            return Err(DataIntegrityError::DuplicateId {
                collection: "category",
                id: category.id.0,
            });
        }
        self.ensure_owner(&category)?;

        info!(
            event_name = "catalog.category.added",
            category_id = category.id.0,
            owner_id = category.owner_id.0,
            "category added to catalog"
        );
        self.categories.push(category);
        Ok(())
    }

    /// Appends a product after the initial join; its category must already be present.
    pub fn add_product(&mut self, product: Product) -> Result<(), DataIntegrityError> {
        if self.product(product.id).is_some() {
            return Err(DataIntegrityError::DuplicateId {
                collection: "product",
                id: product.id.0,
            });
        }
        let enriched = self.enrich(product)?;

        info!(
            event_name = "catalog.product.added",
            product_id = enriched.id.0,
            category_id = enriched.category.id.0,
            "product added to catalog"
        );
        self.products.push(enriched);
        Ok(())
    }

    fn ensure_owner(&self, category: &Category) -> Result<(), DataIntegrityError> {
        match self.user(category.owner_id) {
            Some(_) => Ok(()),
            None => Err(DataIntegrityError::UnknownOwner {
                category_id: category.id,
                owner_id: category.owner_id,
            }),
        }
    }

    fn enrich(&self, product: Product) -> Result<EnrichedProduct, DataIntegrityError> {
        let category = self.category(product.category_id).cloned().ok_or(
            DataIntegrityError::UnknownCategory {
                product_id: product.id,
                category_id: product.category_id,
            },
        )?;
        let user = self.user(category.owner_id).cloned().ok_or(DataIntegrityError::UnknownOwner {
            category_id: category.id,
            owner_id: category.owner_id,
        })?;

        Ok(EnrichedProduct::new(product, category, user))
    }
}

fn ensure_unique(
    collection: &'static str,
    ids: impl Iterator<Item = u32>,
) -> Result<(), DataIntegrityError> {
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(DataIntegrityError::DuplicateId { collection, id });
        }
    }
    Ok(())
}
