use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::Error as JsonWebTokenError;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// JWT token handler for encoding and decoding tokens.
///
/// Generic over the claims type to allow services to define their own token payload.
/// Uses HS256 (HMAC with SHA-256) unless another HMAC algorithm is selected
/// with [`with_algorithm`](Self::with_algorithm).
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    issuer: Option<String>,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least as long as the HMAC output (32 bytes for HS256)
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            issuer: None,
        }
    }

    /// Select the signing algorithm.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Require decoded tokens to carry this `iss` claim.
    pub fn with_issuer(mut self, issuer: impl ToString) -> Self {
        self.issuer = Some(issuer.to_string());
        self
    }

    /// Encode claims into a JWT token.
    ///
    /// # Errors
    /// * `Signing` - Token encoding failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::Signing(e.to_string()))
    }

    /// Decode and validate a JWT token.
    ///
    /// Signature and `exp` are always checked, with no leeway. `sub` and `exp`
    /// must be present, and `iss` must match when an issuer was configured.
    ///
    /// # Errors
    /// * `Expired` - Token has expired
    /// * `MissingClaim` - A required claim is absent
    /// * `Rejected` - Signature or issuer does not match
    /// * `Malformed` - Token is malformed
    pub fn decode<T: for<'de> Deserialize<'de>>(&self, token: &str) -> Result<T, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        if let Some(issuer) = &self.issuer {
            validation.set_issuer(&[issuer]);
        }

        let token_data =
            decode::<T>(token, &self.decoding_key, &validation).map_err(map_decode_error)?;

        Ok(token_data.claims)
    }
}

fn map_decode_error(e: JsonWebTokenError) -> JwtError {
    match e.kind() {
        ErrorKind::ExpiredSignature => JwtError::Expired,
        ErrorKind::MissingRequiredClaim(claim) => JwtError::MissingClaim(claim.clone()),
        ErrorKind::InvalidSignature | ErrorKind::InvalidIssuer | ErrorKind::InvalidAlgorithm => {
            JwtError::Rejected(e.to_string())
        }
        _ => JwtError::Malformed(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::Utc;

    use super::*;
    use crate::jwt::Claims;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    fn valid_claims() -> Claims {
        Claims::issued("user123", "test-issuer", Utc::now(), Duration::hours(1))
    }

    #[test]
    fn test_encode_and_decode() {
        let handler = JwtHandler::new(SECRET);
        let claims = valid_claims();

        let token = handler.encode(&claims).expect("Failed to encode token");
        assert!(!token.is_empty());

        let decoded: Claims = handler.decode(&token).expect("Failed to decode token");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_encode_and_decode_hs512() {
        let handler = JwtHandler::new(SECRET).with_algorithm(Algorithm::HS512);
        let token = handler.encode(&valid_claims()).expect("Failed to encode token");

        let decoded: Claims = handler.decode(&token).expect("Failed to decode token");
        assert_eq!(decoded.sub, Some("user123".to_string()));

        let hs256 = JwtHandler::new(SECRET);
        assert!(matches!(
            hs256.decode::<Claims>(&token),
            Err(JwtError::Rejected(_))
        ));
    }

    #[test]
    fn test_decode_invalid_token() {
        let handler = JwtHandler::new(SECRET);

        let result = handler.decode::<Claims>("invalid.token.here");
        assert!(matches!(result, Err(JwtError::Malformed(_))));
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let handler1 = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!");
        let handler2 = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!");

        let token = handler1.encode(&valid_claims()).expect("Failed to encode token");

        let result = handler2.decode::<Claims>(&token);
        assert!(matches!(result, Err(JwtError::Rejected(_))));
    }

    #[test]
    fn test_decode_expired_token() {
        let handler = JwtHandler::new(SECRET);
        let claims = Claims::issued(
            "user123",
            "test-issuer",
            Utc::now() - Duration::hours(2),
            Duration::hours(1),
        );
        let token = handler.encode(&claims).expect("Failed to encode token");

        assert_eq!(
            handler.decode::<Claims>(&token),
            Err(JwtError::Expired)
        );
    }

    #[test]
    fn test_decode_missing_subject() {
        let handler = JwtHandler::new(SECRET);
        let claims = Claims::new().with_expiration((Utc::now() + Duration::hours(1)).timestamp());
        let token = handler.encode(&claims).expect("Failed to encode token");

        assert_eq!(
            handler.decode::<Claims>(&token),
            Err(JwtError::MissingClaim("sub".to_string()))
        );
    }

    #[test]
    fn test_decode_checks_issuer() {
        let issuing = JwtHandler::new(SECRET);
        let token = issuing.encode(&valid_claims()).expect("Failed to encode token");

        let expecting_other = JwtHandler::new(SECRET).with_issuer("someone-else");
        assert!(matches!(
            expecting_other.decode::<Claims>(&token),
            Err(JwtError::Rejected(_))
        ));

        let expecting_same = JwtHandler::new(SECRET).with_issuer("test-issuer");
        assert!(expecting_same.decode::<Claims>(&token).is_ok());
    }
}
