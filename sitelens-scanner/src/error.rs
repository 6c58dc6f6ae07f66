use thiserror::Error;
use uuid::Uuid;

/// Rejection reasons for user-supplied website addresses.
///
/// The `Display` text is what gets shown next to the input field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a website URL")]
    EmptyInput,

    #[error("Please enter a valid website URL")]
    InvalidUrl { reason: String },
}

#[derive(Error, Debug)]
pub enum ScanError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Audit {0} was cancelled")]
    Cancelled(Uuid),
}

pub type Result<T> = std::result::Result<T, ScanError>;
