use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Token payload.
///
/// `sub` carries the customer's email, `role` the role stored on the
/// customer record at issuance time. Timestamps are Unix seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (customer email)
    pub sub: String,

    /// Role claim
    pub role: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a subject with automatic expiration.
    ///
    /// # Arguments
    /// * `subject` - Customer email
    /// * `role` - Role stored on the customer record
    /// * `ttl_hours` - Hours until the token expires
    pub fn new(subject: impl ToString, role: impl ToString, ttl_hours: i64) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::hours(ttl_hours);

        Self {
            sub: subject.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Check whether the token is expired at `current_timestamp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims() {
        let claims = Claims::new("frank@x.com", "Admin", 24);

        assert_eq!(claims.sub, "frank@x.com");
        assert_eq!(claims.role, "Admin");
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims {
            sub: "frank@x.com".to_string(),
            role: "Admin".to_string(),
            iat: 900,
            exp: 1000,
        };

        assert!(!claims.is_expired(999));
        assert!(!claims.is_expired(1000)); // exactly at expiration
        assert!(claims.is_expired(1001));
    }

    #[test]
    fn test_fresh_claims_not_expired() {
        let claims = Claims::new("frank@x.com", "Admin", 1);
        assert!(!claims.is_expired(Utc::now().timestamp()));
    }
}
