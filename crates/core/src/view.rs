use serde::Serialize;
use tracing::debug;

use crate::catalog::{Catalog, Dataset};
use crate::domain::{Category, CategoryId, EnrichedProduct, Product, ProductId, Sex, UserId};
use crate::errors::DataIntegrityError;
use crate::filter::{visible_products, FilterEvent, FilterState, TransitionOutcome};

/// One browsing session: a joined catalog plus the filter criteria applied to it.
#[derive(Clone, Debug)]
pub struct CatalogView {
    catalog: Catalog,
    state: FilterState,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerEmphasis {
    Link,
    Danger,
}

impl From<Sex> for OwnerEmphasis {
    fn from(value: Sex) -> Self {
        match value {
            Sex::Male => Self::Link,
            Sex::Female => Self::Danger,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProductRow {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub user: String,
    pub user_emphasis: OwnerEmphasis,
}

impl From<&EnrichedProduct> for ProductRow {
    fn from(product: &EnrichedProduct) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            category: product.category.label(),
            user: product.user.name.clone(),
            user_emphasis: product.user.sex.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UserTab {
    pub id: UserId,
    pub name: String,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryChip {
    pub id: CategoryId,
    pub title: String,
    pub active: bool,
}

/// Everything a renderer needs for one frame: criteria, affordance state and visible rows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ViewSnapshot {
    pub filters: FilterState,
    pub all_users_active: bool,
    pub users: Vec<UserTab>,
    pub all_categories_active: bool,
    pub categories: Vec<CategoryChip>,
    pub rows: Vec<ProductRow>,
    pub no_matching_products: bool,
}

impl CatalogView {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog, state: FilterState::default() }
    }

    pub fn load(dataset: Dataset) -> Result<Self, DataIntegrityError> {
        Catalog::join(dataset).map(Self::new)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn select_user(&mut self, user_id: UserId) -> TransitionOutcome {
        self.apply(FilterEvent::SelectUser(user_id))
    }

    pub fn clear_user(&mut self) -> TransitionOutcome {
        self.apply(FilterEvent::ClearUser)
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) -> TransitionOutcome {
        self.apply(FilterEvent::SetSearchQuery(query.into()))
    }

    pub fn clear_search(&mut self) -> TransitionOutcome {
        self.apply(FilterEvent::ClearSearch)
    }

    pub fn toggle_category(&mut self, category_id: CategoryId) -> TransitionOutcome {
        self.apply(FilterEvent::ToggleCategory(category_id))
    }

    pub fn select_all_categories(&mut self) -> TransitionOutcome {
        self.apply(FilterEvent::SelectAllCategories)
    }

    pub fn reset_all(&mut self) -> TransitionOutcome {
        self.apply(FilterEvent::ResetAll)
    }

    pub fn apply(&mut self, event: FilterEvent) -> TransitionOutcome {
        let outcome = self.state.apply(event);
        debug!(
            event_name = "catalog.filter.applied",
            filter_event = ?outcome.event,
            changed = outcome.changed(),
            visible = self.visible().len(),
            "filter event applied"
        );
        outcome
    }

    pub fn add_category(&mut self, category: Category) -> Result<(), DataIntegrityError> {
        self.catalog.add_category(category)
    }

    pub fn add_product(&mut self, product: Product) -> Result<(), DataIntegrityError> {
        self.catalog.add_product(product)
    }

    /// Recomputed from the current state on every call.
    pub fn visible(&self) -> Vec<&EnrichedProduct> {
        visible_products(&self.state, self.catalog.products())
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        let rows: Vec<ProductRow> = self.visible().into_iter().map(ProductRow::from).collect();
        let users = self
            .catalog
            .users()
            .iter()
            .map(|user| UserTab {
                id: user.id,
                name: user.name.clone(),
                active: self.state.selected_user == Some(user.id),
            })
            .collect();
        let categories = self
            .catalog
            .categories()
            .iter()
            .map(|category| CategoryChip {
                id: category.id,
                title: category.title.clone(),
                active: self.state.categories.contains(category.id),
            })
            .collect();

        ViewSnapshot {
            filters: self.state.clone(),
            all_users_active: self.state.selected_user.is_none(),
            users,
            all_categories_active: self.state.categories.is_all(),
            categories,
            no_matching_products: rows.is_empty(),
            rows,
        }
    }
}
