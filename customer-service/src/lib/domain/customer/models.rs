use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::customer::errors::CustomerIdError;
use crate::customer::errors::EmailError;
use crate::customer::errors::FullNameError;
use crate::customer::errors::PhoneError;

/// Customer aggregate entity.
///
/// The credential store record: identity, role, and hashed secret. The
/// `active` flag implements soft deletion; deactivated customers keep their
/// row but disappear from reads and lose the ability to authenticate.
#[derive(Debug, Clone)]
pub struct Customer {
    pub id: CustomerId,
    pub full_name: FullName,
    pub email: EmailAddress,
    pub phone: Option<PhoneNumber>,
    pub role: String,
    pub password_hash: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Customer unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CustomerId(pub Uuid);

impl CustomerId {
    /// Generate a new random customer ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a customer ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, CustomerIdError> {
        Uuid::parse_str(s)
            .map(CustomerId)
            .map_err(|e| CustomerIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for CustomerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Full name value type
///
/// Ensures the name is 2-50 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullName(String);

impl FullName {
    const MIN_LENGTH: usize = 2;
    const MAX_LENGTH: usize = 50;

    /// Create a new valid full name.
    ///
    /// # Errors
    /// * `TooShort` - Name shorter than 2 characters
    /// * `TooLong` - Name longer than 50 characters
    pub fn new(full_name: String) -> Result<Self, FullNameError> {
        let length = full_name.chars().count();
        if length < Self::MIN_LENGTH {
            Err(FullNameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(FullNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(full_name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Phone number value type
///
/// International format: a leading `+` followed by 5-13 digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    const MIN_DIGITS: usize = 5;
    const MAX_DIGITS: usize = 13;

    /// Create a new valid phone number.
    ///
    /// # Errors
    /// * `InvalidFormat` - Missing `+` prefix, non-digit characters, or
    ///   digit count outside 5-13
    pub fn new(phone: String) -> Result<Self, PhoneError> {
        let digits = phone
            .strip_prefix('+')
            .ok_or_else(|| PhoneError::InvalidFormat(phone.clone()))?;

        let digit_count = digits.chars().count();
        if digit_count < Self::MIN_DIGITS
            || digit_count > Self::MAX_DIGITS
            || !digits.chars().all(|c| c.is_ascii_digit())
        {
            return Err(PhoneError::InvalidFormat(phone));
        }

        Ok(Self(phone))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to register a new customer with domain types
#[derive(Debug)]
pub struct CreateCustomerCommand {
    pub full_name: FullName,
    pub email: EmailAddress,
    pub phone: Option<PhoneNumber>,
    pub password: String,
}

impl CreateCustomerCommand {
    pub fn new(
        full_name: FullName,
        email: EmailAddress,
        phone: Option<PhoneNumber>,
        password: String,
    ) -> Self {
        Self {
            full_name,
            email,
            phone,
            password,
        }
    }
}

/// Command to update an existing customer.
///
/// Only `full_name` and `phone` are updatable; email is the credential
/// identifier and is fixed at registration. Fields left as `None` are kept
/// unchanged (partial update). Full update requires every field present.
#[derive(Debug)]
pub struct UpdateCustomerCommand {
    pub full_name: Option<FullName>,
    pub phone: Option<PhoneNumber>,
}

impl UpdateCustomerCommand {
    /// True iff every updatable field is provided.
    pub fn is_complete(&self) -> bool {
        self.full_name.is_some() && self.phone.is_some()
    }
}

/// Partial-match search filter for customer listing.
///
/// Empty strings match everything.
#[derive(Debug, Clone, Default)]
pub struct CustomerSearchFilter {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

/// Pagination window for customer listing. Pages are zero-based.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    const DEFAULT_PER_PAGE: u32 = 20;
    const MAX_PER_PAGE: u32 = 100;

    /// Build a pagination window, clamping `per_page` into 1-100.
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page,
            per_page: per_page.clamp(1, Self::MAX_PER_PAGE),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_PER_PAGE)
    }
}

/// One page of customer search results.
#[derive(Debug)]
pub struct CustomerPage {
    pub customers: Vec<Customer>,
    pub number_of_items: u64,
    pub number_of_pages: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_bounds() {
        assert!(FullName::new("Jo".to_string()).is_ok());
        assert!(FullName::new("J".to_string()).is_err());
        assert!(FullName::new("a".repeat(50)).is_ok());
        assert!(FullName::new("a".repeat(51)).is_err());
    }

    #[test]
    fn test_phone_format() {
        assert!(PhoneNumber::new("+12345".to_string()).is_ok());
        assert!(PhoneNumber::new("+1234567890123".to_string()).is_ok());
        assert!(PhoneNumber::new("+1234".to_string()).is_err());
        assert!(PhoneNumber::new("+12345678901234".to_string()).is_err());
        assert!(PhoneNumber::new("12345".to_string()).is_err());
        assert!(PhoneNumber::new("+123a5".to_string()).is_err());
    }

    #[test]
    fn test_email_format() {
        assert!(EmailAddress::new("frank@x.com".to_string()).is_ok());
        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
    }

    #[test]
    fn test_update_command_completeness() {
        let complete = UpdateCustomerCommand {
            full_name: Some(FullName::new("Frank Sinatra".to_string()).unwrap()),
            phone: Some(PhoneNumber::new("+380123456".to_string()).unwrap()),
        };
        assert!(complete.is_complete());

        let partial = UpdateCustomerCommand {
            full_name: Some(FullName::new("Frank Sinatra".to_string()).unwrap()),
            phone: None,
        };
        assert!(!partial.is_complete());
    }

    #[test]
    fn test_page_request_clamps_per_page() {
        assert_eq!(PageRequest::new(0, 0).per_page(), 1);
        assert_eq!(PageRequest::new(0, 500).per_page(), 100);
        assert_eq!(PageRequest::new(3, 25).offset(), 75);
    }
}
