//! Factory types

use crate::option::OptionError;
use crate::types::{Asset, ErrorKind};
use thiserror::Error;

/// Factory errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactoryError {
    #[error("Access denied: governance capability required")]
    AccessDenied,
    #[error("Option already exists for {0}")]
    AlreadyExists(Asset),
    #[error(transparent)]
    Option(#[from] OptionError),
}

impl FactoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FactoryError::AccessDenied => ErrorKind::AccessDenied,
            FactoryError::AlreadyExists(_) => ErrorKind::StateViolation,
            FactoryError::Option(e) => e.kind(),
        }
    }
}
