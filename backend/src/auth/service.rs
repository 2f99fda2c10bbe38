//! Core business logic for the authentication system.
//!
//! This service authenticates credentials against the configured
//! [`CredentialStore`], issues HMAC-SHA-256 signed JWTs and verifies the tokens
//! presented on later requests.
//!
//! Signing keys form a versioned set: one current key signs new tokens, and
//! retired keys stay around only to verify tokens they signed earlier. A token
//! names its key through the `kid` header. The set is built once at startup and
//! never mutated; rotating a key means restarting with a new configuration.

use std::collections::HashMap;
use std::sync::Arc;

use adapters::{CredentialStore, User};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, decode_header, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header,
    Validation,
};
use tracing::{debug, info};

use super::errors::AuthError;
use super::models::{Claims, LoginResponse};

/// Lifetime of an access token.
pub const TOKEN_TTL_HOURS: i64 = 2;

/// A named HMAC secret.
#[derive(Clone)]
pub struct SigningKey {
    pub key_id: String,
    secret: Vec<u8>,
}

impl SigningKey {
    pub fn new(key_id: impl Into<String>, secret: impl AsRef<[u8]>) -> Self {
        Self {
            key_id: key_id.into(),
            secret: secret.as_ref().to_vec(),
        }
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("key_id", &self.key_id)
            .finish_non_exhaustive()
    }
}

/// Current signing key plus any retired keys still accepted for verification.
pub struct KeySet {
    current: SigningKey,
    encoding: EncodingKey,
    decoding: HashMap<String, DecodingKey>,
}

impl KeySet {
    pub fn new(current: SigningKey, retired: Vec<SigningKey>) -> Self {
        let mut decoding = HashMap::with_capacity(retired.len() + 1);
        for key in retired {
            decoding.insert(key.key_id.clone(), DecodingKey::from_secret(&key.secret));
        }
        // The current key wins if a retired key reuses its id.
        decoding.insert(
            current.key_id.clone(),
            DecodingKey::from_secret(&current.secret),
        );
        let encoding = EncodingKey::from_secret(&current.secret);
        Self {
            current,
            encoding,
            decoding,
        }
    }

    pub fn current_key_id(&self) -> &str {
        &self.current.key_id
    }

    fn decoding_key(&self, key_id: &str) -> Option<&DecodingKey> {
        self.decoding.get(key_id)
    }
}

#[derive(Clone)]
pub struct TokenService {
    keys: Arc<KeySet>,
    credentials: Arc<dyn CredentialStore>,
}

impl TokenService {
    pub fn new(keys: KeySet, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            keys: Arc::new(keys),
            credentials,
        }
    }

    /// Checks the credential pair and, on success, mints a token for the user.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, AuthError> {
        let Some(user) = self.credentials.authenticate(username, password).await? else {
            return Err(AuthError::InvalidCredentials);
        };
        let token = self.issue(&user)?;
        info!(user = %user.username, role = %user.role, "user logged in");
        Ok(LoginResponse {
            user: user.redacted(),
            token,
        })
    }

    /// Signs a token carrying the user's name and role, valid for two hours.
    pub fn issue(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.username.clone(),
            role: user.role.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        };
        self.sign(&claims)
    }

    fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        let mut header = Header::new(Algorithm::HS256);
        header.kid = Some(self.keys.current_key_id().to_string());
        encode(&header, claims, &self.keys.encoding)
            .map_err(|e| AuthError::TokenCreation(e.to_string()))
    }

    /// Validates signature and expiry and returns the embedded claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token).map_err(|_| AuthError::InvalidToken)?;
        if header.alg != Algorithm::HS256 {
            return Err(AuthError::InvalidToken);
        }
        let key_id = header.kid.ok_or(AuthError::UnknownKey)?;
        let key = self
            .keys
            .decoding_key(&key_id)
            .ok_or(AuthError::UnknownKey)?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, key, &validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            _ => AuthError::InvalidToken,
        })?;
        debug!(user = %data.claims.sub, key_id = %key_id, "token verified");
        Ok(data.claims)
    }
}
