pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod filter;
pub mod fixtures;
pub mod view;

pub use catalog::{Catalog, Dataset, DatasetError};
pub use domain::{Category, CategoryId, EnrichedProduct, Product, ProductId, Sex, User, UserId};
pub use errors::{ApplicationError, DataIntegrityError, DomainError, InterfaceError};
pub use filter::{CategorySelection, FilterEvent, FilterState, TransitionOutcome};
pub use view::{CatalogView, ProductRow, ViewSnapshot};
