use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::{CategoryId, UserId};

/// Category criterion: the "all" marker plus the explicitly chosen ids.
///
/// Explicit ids always narrow the match. With no explicit ids the marker decides: set means every
/// category matches (including ones added after load), unset means nothing does. Toggling only
/// touches the explicit ids, so toggling the same id twice restores any selection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySelection {
    all: bool,
    ids: BTreeSet<CategoryId>,
}

impl Default for CategorySelection {
    fn default() -> Self {
        Self { all: true, ids: BTreeSet::new() }
    }
}

impl CategorySelection {
    pub fn only(ids: impl IntoIterator<Item = CategoryId>) -> Self {
        Self { all: false, ids: ids.into_iter().collect() }
    }

    pub fn none() -> Self {
        Self { all: false, ids: BTreeSet::new() }
    }

    /// The "all" sentinel is in effect: marker set and nothing chosen explicitly.
    pub fn is_all(&self) -> bool {
        self.all && self.ids.is_empty()
    }

    pub fn contains(&self, category_id: CategoryId) -> bool {
        self.ids.contains(&category_id)
    }

    pub fn ids(&self) -> impl Iterator<Item = CategoryId> + '_ {
        self.ids.iter().copied()
    }

    pub fn matches(&self, category_id: CategoryId) -> bool {
        if self.ids.is_empty() {
            self.all
        } else {
            self.ids.contains(&category_id)
        }
    }

    /// Adds the id if absent, removes it if present. The "all" marker is left as it is.
    pub fn toggle(&mut self, category_id: CategoryId) {
        if !self.ids.remove(&category_id) {
            self.ids.insert(category_id);
        }
    }
}

/// The three independent criteria of one browsing session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub selected_user: Option<UserId>,
    pub categories: CategorySelection,
    pub search_query: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "event", content = "value")]
pub enum FilterEvent {
    SelectUser(UserId),
    ClearUser,
    SetSearchQuery(String),
    ClearSearch,
    ToggleCategory(CategoryId),
    SelectAllCategories,
    ResetAll,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionOutcome {
    pub from: FilterState,
    pub to: FilterState,
    pub event: FilterEvent,
}

impl TransitionOutcome {
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

impl FilterState {
    /// Selecting the active user clears the selection; any other user replaces it.
    pub fn select_user(&mut self, user_id: UserId) {
        self.selected_user = match self.selected_user {
            Some(active) if active == user_id => None,
            _ => Some(user_id),
        };
    }

    pub fn clear_user(&mut self) {
        self.selected_user = None;
    }

    /// Stored verbatim, no trimming.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn clear_search(&mut self) {
        self.search_query.clear();
    }

    pub fn toggle_category(&mut self, category_id: CategoryId) {
        self.categories.toggle(category_id);
    }

    pub fn select_all_categories(&mut self) {
        self.categories = CategorySelection::default();
    }

    pub fn reset_all(&mut self) {
        *self = Self::default();
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Applies one event as a single transition and reports both sides of it.
    pub fn apply(&mut self, event: FilterEvent) -> TransitionOutcome {
        let from = self.clone();
        match &event {
            FilterEvent::SelectUser(user_id) => self.select_user(*user_id),
            FilterEvent::ClearUser => self.clear_user(),
            FilterEvent::SetSearchQuery(query) => self.set_search_query(query.clone()),
            FilterEvent::ClearSearch => self.clear_search(),
            FilterEvent::ToggleCategory(category_id) => self.toggle_category(*category_id),
            FilterEvent::SelectAllCategories => self.select_all_categories(),
            FilterEvent::ResetAll => self.reset_all(),
        }
        TransitionOutcome { from, to: self.clone(), event }
    }
}

#[cfg(test)]
mod tests {
    use super::{CategorySelection, FilterEvent, FilterState};
    use crate::domain::{CategoryId, UserId};

    fn busy_state() -> FilterState {
        FilterState {
            selected_user: Some(UserId(2)),
            categories: CategorySelection::only([CategoryId(1), CategoryId(3)]),
            search_query: "Mi".to_string(),
        }
    }

    #[test]
    fn select_user_toggles_back_to_all_users() {
        let mut state = FilterState::default();

        state.select_user(UserId(1));
        assert_eq!(state.selected_user, Some(UserId(1)));

        state.select_user(UserId(1));
        assert_eq!(state.selected_user, None);
    }

    #[test]
    fn select_user_replaces_a_different_user() {
        let mut state = FilterState::default();
        state.select_user(UserId(1));
        state.select_user(UserId(2));

        assert_eq!(state.selected_user, Some(UserId(2)));
    }

    #[test]
    fn clear_user_is_not_a_toggle() {
        let mut state = busy_state();
        state.clear_user();
        state.clear_user();

        assert_eq!(state.selected_user, None);
    }

    #[test]
    fn search_query_is_stored_verbatim() {
        let mut state = FilterState::default();
        state.set_search_query("  Milk ");
        assert_eq!(state.search_query, "  Milk ");

        state.clear_search();
        assert!(state.search_query.is_empty());
    }

    #[test]
    fn toggle_category_twice_restores_any_selection() {
        let mut narrowed_all = CategorySelection::default();
        narrowed_all.toggle(CategoryId(1));

        let starts = [
            CategorySelection::default(),
            CategorySelection::none(),
            CategorySelection::only([CategoryId(1)]),
            CategorySelection::only([CategoryId(1), CategoryId(2)]),
            narrowed_all,
        ];

        for start in starts {
            for id in [CategoryId(1), CategoryId(2), CategoryId(7)] {
                let mut selection = start.clone();
                selection.toggle(id);
                selection.toggle(id);
                assert_eq!(selection, start, "toggling {id} twice from {start:?}");
            }
        }
    }

    #[test]
    fn toggle_from_all_narrows_to_the_chosen_id() {
        let mut selection = CategorySelection::default();
        selection.toggle(CategoryId(4));

        assert!(!selection.is_all());
        assert!(selection.contains(CategoryId(4)));
        assert!(selection.matches(CategoryId(4)));
        assert!(!selection.matches(CategoryId(5)));

        selection.toggle(CategoryId(4));
        assert!(selection.is_all());
        assert!(selection.matches(CategoryId(5)));
    }

    #[test]
    fn select_all_differs_from_selecting_every_id() {
        let mut explicit = FilterState::default();
        explicit.toggle_category(CategoryId(1));
        explicit.toggle_category(CategoryId(2));

        let mut sentinel = explicit.clone();
        sentinel.select_all_categories();

        assert!(sentinel.categories.is_all());
        assert_ne!(explicit.categories, sentinel.categories);
        assert!(sentinel.categories.matches(CategoryId(99)));
        assert!(!explicit.categories.matches(CategoryId(99)));
    }

    #[test]
    fn empty_explicit_selection_matches_nothing() {
        let selection = CategorySelection::none();
        assert!(!selection.is_all());
        assert!(!selection.matches(CategoryId(1)));
    }

    #[test]
    fn empty_explicit_selection_survives_a_double_toggle() {
        let mut selection = CategorySelection::none();

        selection.toggle(CategoryId(1));
        assert_eq!(selection, CategorySelection::only([CategoryId(1)]));

        selection.toggle(CategoryId(1));
        assert_eq!(selection, CategorySelection::none());
        assert!(!selection.matches(CategoryId(1)));
    }

    #[test]
    fn reset_all_is_idempotent() {
        let mut once = busy_state();
        once.reset_all();

        let mut twice = busy_state();
        twice.reset_all();
        twice.reset_all();

        assert_eq!(once, twice);
        assert!(once.is_default());
    }

    #[test]
    fn apply_reports_a_single_transition() {
        let mut state = busy_state();
        let outcome = state.apply(FilterEvent::ResetAll);

        assert_eq!(outcome.from, busy_state());
        assert_eq!(outcome.to, FilterState::default());
        assert!(outcome.changed());
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn apply_matches_direct_mutators() {
        let events = vec![
            FilterEvent::SelectUser(UserId(1)),
            FilterEvent::ToggleCategory(CategoryId(2)),
            FilterEvent::SetSearchQuery("br".to_string()),
            FilterEvent::SelectUser(UserId(1)),
            FilterEvent::ClearSearch,
        ];

        let mut replayed = FilterState::default();
        for event in events {
            replayed.apply(event);
        }

        let mut direct = FilterState::default();
        direct.select_user(UserId(1));
        direct.toggle_category(CategoryId(2));
        direct.set_search_query("br");
        direct.select_user(UserId(1));
        direct.clear_search();

        assert_eq!(replayed, direct);
        assert_eq!(replayed.categories.ids().collect::<Vec<_>>(), vec![CategoryId(2)]);
    }

    #[test]
    fn selection_serializes_marker_and_ids() {
        let mut selection = CategorySelection::default();
        selection.toggle(CategoryId(3));

        let encoded = serde_json::to_string(&selection).expect("serialize selection");
        assert_eq!(encoded, r#"{"all":true,"ids":[3]}"#);
    }

    #[test]
    fn events_round_trip_through_json() {
        let event = FilterEvent::ToggleCategory(CategoryId(3));
        let encoded = serde_json::to_string(&event).expect("serialize event");

        assert_eq!(encoded, r#"{"event":"toggle_category","value":3}"#);
        let decoded: FilterEvent = serde_json::from_str(&encoded).expect("deserialize event");
        assert_eq!(decoded, event);
    }
}
