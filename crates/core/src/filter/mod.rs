pub mod predicate;
pub mod states;

pub use predicate::{is_visible, visible_products};
pub use states::{CategorySelection, FilterEvent, FilterState, TransitionOutcome};
