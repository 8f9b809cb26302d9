use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// Signed token codec (HS256).
///
/// Issuance and verification happen inside the same service, so a symmetric
/// signing key is sufficient. Both keys are derived from the configured
/// secret once, at construction, and held for the process lifetime.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenCodec {
    /// Create a new codec from the configured signing secret.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a signed token for a subject and role.
    ///
    /// Builds claims with `iat = now` and `exp = now + ttl_hours`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed
    pub fn issue(&self, subject: &str, role: &str, ttl_hours: i64) -> Result<String, JwtError> {
        self.encode(&Claims::new(subject, role, ttl_hours))
    }

    /// Encode pre-built claims into a signed token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token's signature and expiry, returning its claims.
    ///
    /// Expiry is checked with zero leeway.
    ///
    /// # Errors
    /// * `TokenExpired` - `exp` is in the past
    /// * `InvalidToken` - Signature mismatch or malformed token
    pub fn parse(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                    _ => JwtError::InvalidToken(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    #[test]
    fn test_issue_and_parse() {
        let codec = TokenCodec::new(SECRET);

        let token = codec
            .issue("frank@x.com", "Admin", 24)
            .expect("Failed to issue token");
        assert_eq!(token.split('.').count(), 3);

        let claims = codec.parse(&token).expect("Failed to parse token");
        assert_eq!(claims.sub, "frank@x.com");
        assert_eq!(claims.role, "Admin");
        assert!(!claims.is_expired(Utc::now().timestamp()));
    }

    #[test]
    fn test_parse_malformed_token() {
        let codec = TokenCodec::new(SECRET);

        let result = codec.parse("not.a.token");
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_parse_with_wrong_secret() {
        let codec = TokenCodec::new(SECRET);
        let other = TokenCodec::new(b"another_secret_at_least_32_bytes!!");

        let token = codec
            .issue("frank@x.com", "Admin", 24)
            .expect("Failed to issue token");

        let result = other.parse(&token);
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_parse_tampered_signature() {
        let codec = TokenCodec::new(SECRET);

        let token = codec
            .issue("frank@x.com", "Admin", 24)
            .expect("Failed to issue token");

        // Flip the last character of the signature segment
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        let result = codec.parse(&tampered);
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_parse_expired_token() {
        let codec = TokenCodec::new(SECRET);

        let now = Utc::now().timestamp();
        let expired = Claims {
            sub: "frank@x.com".to_string(),
            role: "Admin".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };

        let token = codec.encode(&expired).expect("Failed to encode token");

        let result = codec.parse(&token);
        assert!(matches!(result, Err(JwtError::TokenExpired)));
    }
}
