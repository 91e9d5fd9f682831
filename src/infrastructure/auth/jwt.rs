//! JWT token generation and validation

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::account::{Account, AccountId};
use crate::domain::DomainError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (account ID)
    pub sub: String,
    /// Tenant the account belonged to when the token was issued
    pub tenant_id: String,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
}

impl JwtClaims {
    /// Create new claims for an account
    pub fn new(account: &Account, expiration_hours: u64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours as i64);

        Self {
            sub: account.id().as_str().to_string(),
            tenant_id: account.tenant_id().as_str().to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    pub fn account_id(&self) -> AccountId {
        AccountId::from(self.sub.as_str())
    }
}

/// Configuration for JWT service
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token expiration time in hours
    pub expiration_hours: u64,
}

impl Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[hidden]")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expiration_hours: u64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
        }
    }
}

/// Trait for JWT operations
pub trait JwtGenerator: Send + Sync + Debug {
    /// Generate a JWT token for an account
    fn generate(&self, account: &Account) -> Result<String, DomainError>;

    /// Validate a JWT token and return the claims
    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError>;
}

/// HS256 JWT service
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("config", &self.config)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }
}

impl JwtGenerator for JwtService {
    fn generate(&self, account: &Account) -> Result<String, DomainError> {
        let claims = JwtClaims::new(account, self.config.expiration_hours);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to generate JWT: {}", e)))
    }

    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError> {
        let token_data = decode::<JwtClaims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| DomainError::validation(format!("Invalid JWT: {}", e)))?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::{AccountRole, TenantId};

    fn account() -> Account {
        Account::new(
            AccountId::from("acc-1"),
            TenantId::from("tenant-1"),
            "Ada",
            AccountRole::Editor,
        )
    }

    fn service(secret: &str) -> JwtService {
        JwtService::new(JwtConfig::new(secret, 1))
    }

    #[test]
    fn test_generate_and_validate() {
        let service = service("secret");
        let token = service.generate(&account()).unwrap();

        let claims = service.validate(&token).unwrap();

        assert_eq!(claims.account_id(), AccountId::from("acc-1"));
        assert_eq!(claims.tenant_id, "tenant-1");
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_validate_rejects_foreign_signature() {
        let token = service("one").generate(&account()).unwrap();

        let result = service("two").validate(&token);

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[test]
    fn test_validate_rejects_garbage() {
        assert!(service("secret").validate("not-a-jwt").is_err());
    }

    #[test]
    fn test_debug_hides_secret() {
        let debug = format!("{:?}", service("top-secret"));
        assert!(!debug.contains("top-secret"));
    }
}
