use shared::error::{ApiError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("required fields missing: {}", .fields.join(", "))]
    MissingFields { fields: Vec<&'static str> },
    #[error("id {0} is already in use")]
    DuplicateId(String),
    #[error("id {0} is past the last assignable sequence")]
    IdOutOfRange(String),
    #[error("record {0} not found")]
    NotFound(String),
}

impl ListError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ListError::MissingFields { .. }
            | ListError::DuplicateId(_)
            | ListError::IdOutOfRange(_) => ErrorCode::Validation,
            ListError::NotFound(_) => ErrorCode::NotFound,
        }
    }
}

impl From<ListError> for ApiError {
    fn from(value: ListError) -> Self {
        ApiError::new(value.code(), value.to_string())
    }
}
