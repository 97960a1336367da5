use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::api::errors::ApiError;
use crate::domain::authorization::{Claims, UserContext};

/// HS256 keys derived from `JWT_SECRET`
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtKeys {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // `exp` is optional; it is still checked when present.
        validation.required_spec_claims.clear();
        validation.validate_exp = true;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Issue a token for `user`
    pub fn sign(&self, user: &UserContext) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            username: user.username.clone(),
            is_admin: user.is_admin,
            iat: chrono::Utc::now().timestamp(),
            exp: None,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, &self.decoding, &self.validation).map(|data| data.claims)
    }
}

/// Attach a `UserContext` when the request carries a valid bearer token.
///
/// Missing or invalid tokens are not an error here; routes that need a user
/// reject the request through [`RequireAdmin`].
pub async fn authenticate(
    State(keys): State<Arc<JwtKeys>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim);

    if let Some(token) = token {
        match keys.verify(token) {
            Ok(claims) => {
                request.extensions_mut().insert(UserContext::from(claims));
            }
            Err(e) => tracing::debug!(error = %e, "ignoring invalid bearer token"),
        }
    }

    next.run(request).await
}

/// Extractor that only succeeds for admin users
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub UserContext);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<UserContext>() {
            Some(user) if user.is_admin => Ok(Self(user.clone())),
            _ => Err(ApiError::unauthorized("Unauthorized")),
        }
    }
}
