//! HS256 access tokens and the identity resolver backed by them.
//!
//! Tokens are issued by the account service that shares `JWT_SECRET`; this
//! server only checks them. [`issue_token`] exists for tooling and tests.

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use toycraft_catalog::IdentityResolver;
use toycraft_core::error::CoreError;
use toycraft_core::types::DbId;
use uuid::Uuid;

/// Default lifetime of issued tokens, in minutes.
pub const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 15;

/// Claims carried by an access token. `sub` is the user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: DbId,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

impl Claims {
    fn for_user(user_id: DbId, lifetime_mins: i64) -> Self {
        let iat = chrono::Utc::now().timestamp();
        Self {
            sub: user_id,
            exp: iat + lifetime_mins * 60,
            iat,
            jti: Uuid::new_v4().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_mins: i64,
}

/// Sign an access token for `user_id`.
pub fn issue_token(user_id: DbId, config: &JwtConfig) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims::for_user(user_id, config.access_token_expiry_mins);
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Resolves access tokens by checking signature and expiry locally.
pub struct JwtIdentityResolver {
    key: DecodingKey,
    validation: Validation,
}

impl JwtIdentityResolver {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Decode a token into its claims.
    pub fn claims(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        jsonwebtoken::decode::<Claims>(token, &self.key, &self.validation).map(|data| data.claims)
    }
}

#[async_trait]
impl IdentityResolver for JwtIdentityResolver {
    async fn resolve(&self, access_token: &str) -> Result<DbId, CoreError> {
        match self.claims(access_token) {
            Ok(claims) => Ok(claims.sub),
            Err(e) => {
                tracing::debug!(error = %e, "Access token rejected");
                Err(CoreError::Unauthenticated(
                    "Invalid or expired token".into(),
                ))
            }
        }
    }
}
