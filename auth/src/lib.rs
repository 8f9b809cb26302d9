//! Authentication infrastructure library
//!
//! Provides the building blocks the customer service authenticates with:
//! - Password hashing (Argon2id)
//! - Signed, time-bounded token issuance and validation (HS256)
//! - Credential verification coordination
//!
//! The service owns its credential store; this crate only verifies secrets
//! and mints/parses tokens, so it stays free of persistence concerns.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Tokens
//! ```
//! use auth::TokenCodec;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let token = codec.issue("frank@x.com", "Admin", 24).unwrap();
//! let claims = codec.parse(&token).unwrap();
//! assert_eq!(claims.sub, "frank@x.com");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, Claims};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash the secret
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and mint a token
//! let claims = Claims::new("frank@x.com", "Admin", 24);
//! let result = auth.authenticate("password123", &hash, &claims).unwrap();
//!
//! // Per request: validate the token
//! let decoded = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(decoded.role, "Admin");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::TokenCodec;
pub use password::PasswordError;
pub use password::PasswordHasher;
