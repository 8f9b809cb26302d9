use thiserror::Error;

/// Error for CustomerId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CustomerIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for FullName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FullNameError {
    #[error("Full name too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Full name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for PhoneNumber validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PhoneError {
    #[error("Invalid phone number (expected + followed by 5-13 digits): {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for all customer-related operations
#[derive(Debug, Clone, Error)]
pub enum CustomerError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid customer ID: {0}")]
    InvalidCustomerId(#[from] CustomerIdError),

    #[error("Invalid full name: {0}")]
    InvalidFullName(#[from] FullNameError),

    #[error("Invalid phone number: {0}")]
    InvalidPhone(#[from] PhoneError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    // Domain-level errors
    #[error("Customer not found: {0}")]
    NotFound(String),

    #[error("Customer not found with email: {0}")]
    NotFoundByEmail(String),

    #[error("Customer with email {0} already exists")]
    EmailAlreadyExists(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("All updatable fields must be provided for a full update")]
    MissingUpdateFields,

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for CustomerError {
    fn from(err: anyhow::Error) -> Self {
        CustomerError::Unknown(err.to_string())
    }
}
