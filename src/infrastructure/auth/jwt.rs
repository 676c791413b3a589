//! HS256 token issuance and verification

use chrono::{NaiveDate, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use uuid::Uuid;

use crate::domain::user::User;
use crate::domain::{DomainError, Principal, UserId};

/// Which flow a token was minted for, carried in the `sub` claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    #[serde(rename = "access-token")]
    Access,
    #[serde(rename = "public-token")]
    Public,
}

/// Token payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub aud: String,
    pub sub: TokenKind,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
    pub jti: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<NaiveDate>,
}

impl Claims {
    fn base(config: &JwtConfig, sub: TokenKind, now: i64) -> Self {
        Self {
            iss: config.issuer.clone(),
            aud: config.audience.clone(),
            sub,
            iat: now,
            nbf: now,
            exp: now + config.ttl_secs,
            jti: Uuid::new_v4().to_string(),
            user_id: None,
            username: None,
            dob: None,
        }
    }

    /// Claims for an anonymous public token issued at `now`
    pub fn public(config: &JwtConfig, now: i64) -> Self {
        Self::base(config, TokenKind::Public, now)
    }

    /// Claims identifying `user`, issued at `now`
    pub fn access(config: &JwtConfig, user: &User, now: i64) -> Self {
        Self {
            user_id: Some(user.id()),
            username: Some(user.username().to_string()),
            dob: Some(user.dob()),
            ..Self::base(config, TokenKind::Access, now)
        }
    }

    /// The caller identity, available only on access tokens
    pub fn principal(&self) -> Result<Principal, DomainError> {
        match (self.sub, self.user_id) {
            (TokenKind::Access, Some(user_id)) => Ok(Principal::new(
                user_id,
                self.username.clone().unwrap_or_default(),
            )),
            _ => Err(DomainError::invalid_token("not an access token")),
        }
    }
}

/// Signing configuration, fixed for the lifetime of the process
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    /// Lifetime of issued tokens in seconds
    pub ttl_secs: i64,
}

impl JwtConfig {
    pub fn new(
        secret: impl Into<String>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
        ttl_secs: i64,
    ) -> Self {
        Self {
            secret: secret.into(),
            issuer: issuer.into(),
            audience: audience.into(),
            ttl_secs,
        }
    }
}

/// Trait for token operations
pub trait TokenCodec: Send + Sync + Debug {
    /// Mint an anonymous token
    fn issue_public(&self) -> Result<String, DomainError>;

    /// Mint a token identifying a user
    fn issue_access(&self, user: &User) -> Result<String, DomainError>;

    /// Check signature, issuer, audience and the validity window
    fn verify(&self, token: &str) -> Result<Claims, DomainError>;
}

/// JWT service signing with a shared HS256 secret
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .field("ttl_secs", &self.config.ttl_secs)
            .field("secret", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    /// Create a new JWT service with the given configuration
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        // Time checks run in verify_at against an explicit clock.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "aud", "sub"]);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    pub fn config(&self) -> &JwtConfig {
        &self.config
    }

    /// Sign arbitrary claims
    pub fn issue(&self, claims: &Claims) -> Result<String, DomainError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to sign token: {}", e)))
    }

    /// Verify a token against the clock value `now` (unix seconds)
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Claims, DomainError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| DomainError::invalid_token(format!("invalid token: {}", e)))?
            .claims;

        if now < claims.nbf {
            return Err(DomainError::invalid_token("token not valid yet"));
        }
        if now >= claims.exp {
            return Err(DomainError::invalid_token("token expired"));
        }

        Ok(claims)
    }
}

impl TokenCodec for JwtService {
    fn issue_public(&self) -> Result<String, DomainError> {
        self.issue(&Claims::public(&self.config, Utc::now().timestamp()))
    }

    fn issue_access(&self, user: &User) -> Result<String, DomainError> {
        self.issue(&Claims::access(&self.config, user, Utc::now().timestamp()))
    }

    fn verify(&self, token: &str) -> Result<Claims, DomainError> {
        self.verify_at(token, Utc::now().timestamp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::NewUser;

    const NOW: i64 = 1_790_000_000;

    fn create_service() -> JwtService {
        JwtService::new(JwtConfig::new("test-secret-key-12345", "mygram", "mygram-clients", 3600))
    }

    fn create_test_user() -> User {
        let new_user = NewUser {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "hash".to_string(),
            dob: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
        };
        User::from_parts(UserId::new(7), new_user, Utc::now(), Utc::now())
    }

    #[test]
    fn test_access_token_round_trip() {
        let service = create_service();
        let user = create_test_user();

        let token = service.issue(&Claims::access(service.config(), &user, NOW)).unwrap();
        assert_eq!(token.split('.').count(), 3);

        let claims = service.verify_at(&token, NOW).unwrap();
        assert_eq!(claims.sub, TokenKind::Access);
        assert_eq!(claims.user_id, Some(UserId::new(7)));
        assert_eq!(claims.username.as_deref(), Some("alice"));
        assert_eq!(claims.iat, NOW);
        assert_eq!(claims.nbf, NOW);
        assert_eq!(claims.exp, NOW + 3600);
        assert!(Uuid::parse_str(&claims.jti).is_ok());

        let principal = claims.principal().unwrap();
        assert_eq!(principal.user_id, UserId::new(7));
        assert_eq!(principal.username, "alice");
    }

    #[test]
    fn test_validity_window() {
        let service = create_service();
        let token = service.issue(&Claims::public(service.config(), NOW)).unwrap();

        assert!(service.verify_at(&token, NOW + 3599).is_ok());
        assert!(matches!(
            service.verify_at(&token, NOW + 3600),
            Err(DomainError::InvalidToken { .. })
        ));
        assert!(matches!(
            service.verify_at(&token, NOW - 1),
            Err(DomainError::InvalidToken { .. })
        ));
    }

    #[test]
    fn test_fresh_token_verifies_now() {
        let service = create_service();
        let token = service.issue_access(&create_test_user()).unwrap();

        assert!(service.verify(&token).is_ok());
    }

    #[test]
    fn test_public_token_has_no_principal() {
        let service = create_service();
        let token = service.issue_public().unwrap();

        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.sub, TokenKind::Public);
        assert!(claims.user_id.is_none());
        assert!(claims.principal().is_err());
    }

    #[test]
    fn test_wrong_secret() {
        let service1 = create_service();
        let service2 = JwtService::new(JwtConfig::new("secret-2", "mygram", "mygram-clients", 3600));

        let token = service1.issue_public().unwrap();
        assert!(service2.verify(&token).is_err());
    }

    #[test]
    fn test_wrong_audience() {
        let issuer = create_service();
        let other = JwtService::new(JwtConfig::new(
            "test-secret-key-12345",
            "mygram",
            "someone-else",
            3600,
        ));

        let token = issuer.issue_public().unwrap();
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn test_tampered_payload() {
        let service = create_service();
        let token = service.issue_public().unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        parts[1] = "eyJzdWIiOiJhY2Nlc3MtdG9rZW4ifQ";

        assert!(service.verify(&parts.join(".")).is_err());
    }

    #[test]
    fn test_garbage_token() {
        let service = create_service();
        assert!(matches!(
            service.verify("invalid-token"),
            Err(DomainError::InvalidToken { .. })
        ));
    }
}
