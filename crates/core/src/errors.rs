use thiserror::Error;

use crate::catalog::dataset::DatasetError;
use crate::config::ConfigError;
use crate::domain::{CategoryId, ProductId, UserId};

/// A foreign key in the static records that does not resolve, or an id that is not unique.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DataIntegrityError {
    #[error("product {product_id} references unknown category {category_id}")]
    UnknownCategory { product_id: ProductId, category_id: CategoryId },
    #[error("category {category_id} references unknown owner {owner_id}")]
    UnknownOwner { category_id: CategoryId, owner_id: UserId },
    #[error("duplicate {collection} id {id}")]
    DuplicateId { collection: &'static str, id: u32 },
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error(transparent)]
    DataIntegrity(#[from] DataIntegrityError),
}

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Configuration(#[from] ConfigError),
}

impl From<DataIntegrityError> for ApplicationError {
    fn from(value: DataIntegrityError) -> Self {
        Self::Domain(DomainError::DataIntegrity(value))
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("bad request: {message}")]
    BadRequest { message: String, correlation_id: String },
    #[error("data unavailable: {message}")]
    DataUnavailable { message: String, correlation_id: String },
    #[error("internal error: {message}")]
    Internal { message: String, correlation_id: String },
}

impl InterfaceError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => {
                "The catalog data is inconsistent. Check the dataset references and try again."
            }
            Self::DataUnavailable { .. } => {
                "The catalog dataset could not be loaded. Check the dataset path and format."
            }
            Self::Internal { .. } => "An unexpected internal error occurred.",
        }
    }

    pub fn error_class(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => "data_integrity",
            Self::DataUnavailable { .. } => "dataset_load",
            Self::Internal { .. } => "config_validation",
        }
    }
}

impl ApplicationError {
    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        let correlation_id = correlation_id.into();
        let mut mapped = InterfaceError::from(self);
        match &mut mapped {
            InterfaceError::BadRequest { correlation_id: id, .. }
            | InterfaceError::DataUnavailable { correlation_id: id, .. }
            | InterfaceError::Internal { correlation_id: id, .. } => *id = correlation_id,
        }
        mapped
    }
}

impl From<ApplicationError> for InterfaceError {
    fn from(value: ApplicationError) -> Self {
        match value {
            ApplicationError::Domain(error) => Self::BadRequest {
                message: error.to_string(),
                correlation_id: "unassigned".to_owned(),
            },
            ApplicationError::Dataset(error) => Self::DataUnavailable {
                message: error.to_string(),
                correlation_id: "unassigned".to_owned(),
            },
            ApplicationError::Configuration(error) => Self::Internal {
                message: error.to_string(),
                correlation_id: "unassigned".to_owned(),
            },
        }
    }
}
