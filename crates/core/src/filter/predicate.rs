use crate::domain::EnrichedProduct;
use crate::filter::states::FilterState;

pub fn matches_user(state: &FilterState, product: &EnrichedProduct) -> bool {
    state.selected_user.map_or(true, |user_id| product.user.id == user_id)
}

pub fn matches_category(state: &FilterState, product: &EnrichedProduct) -> bool {
    state.categories.matches(product.category.id)
}

/// Case-insensitive substring match using Unicode lowercasing, independent of locale.
pub fn matches_search(state: &FilterState, product: &EnrichedProduct) -> bool {
    if state.search_query.is_empty() {
        return true;
    }
    product.name.to_lowercase().contains(&state.search_query.to_lowercase())
}

pub fn is_visible(state: &FilterState, product: &EnrichedProduct) -> bool {
    matches_user(state, product)
        && matches_category(state, product)
        && matches_search(state, product)
}

/// Visible products, in input order.
pub fn visible_products<'a>(
    state: &FilterState,
    products: &'a [EnrichedProduct],
) -> Vec<&'a EnrichedProduct> {
    products.iter().filter(|product| is_visible(state, product)).collect()
}
