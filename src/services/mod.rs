use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::forms::categories::{
    AddCategoryFormError, DeleteCategoryFormError, UpdateCategoryFormError,
};
use crate::forms::video_refs::SaveVideoRefFormError;

pub mod categories;
pub mod preview;
pub mod tags;
pub mod video_refs;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The user is not authorized to perform the operation.
    #[error("unauthorized")]
    Unauthorized,
    /// Requested resource was not found.
    #[error("not found")]
    NotFound,
    /// User-correctable failure surfaced as a flash message.
    #[error("{0}")]
    Form(String),
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<TypeConstraintError> for ServiceError {
    fn from(value: TypeConstraintError) -> Self {
        Self::Form(value.to_string())
    }
}

impl From<AddCategoryFormError> for ServiceError {
    fn from(value: AddCategoryFormError) -> Self {
        Self::Form(value.to_string())
    }
}

impl From<UpdateCategoryFormError> for ServiceError {
    fn from(value: UpdateCategoryFormError) -> Self {
        Self::Form(value.to_string())
    }
}

impl From<DeleteCategoryFormError> for ServiceError {
    fn from(value: DeleteCategoryFormError) -> Self {
        Self::Form(value.to_string())
    }
}

impl From<SaveVideoRefFormError> for ServiceError {
    fn from(value: SaveVideoRefFormError) -> Self {
        Self::Form(value.to_string())
    }
}
