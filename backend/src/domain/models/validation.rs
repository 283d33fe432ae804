#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Full name cannot be empty")]
    EmptyName,
    #[error("Full name cannot exceed 100 characters")]
    NameTooLong,
    #[error("Date must be in YYYY-MM-DD format")]
    InvalidDate,
    #[error("Phone number cannot be empty")]
    EmptyPhone,
    #[error("Amount must be greater than zero")]
    NonPositiveAmount,
    #[error("Unknown month name: {0}")]
    UnknownMonth(String),
    #[error("Grade name cannot be empty")]
    EmptyGradeName,
}
