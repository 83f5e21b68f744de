//! Session token issue/validation and cookie helpers

use axum::http::{header, HeaderMap, HeaderValue};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::claims::SessionClaims;
use crate::config::AuthConfig;
use crate::error::AuthError;

/// Name of the HTTP-only session cookie
pub const SESSION_COOKIE: &str = "access_token";

/// Mint a signed, time-limited session token for a caller.
pub fn issue_token(email: &str, user_id: Uuid, config: &AuthConfig) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = SessionClaims {
        sub: email.to_string(),
        id: user_id.to_string(),
        iat: now.timestamp() as u64,
        exp: (now + Duration::minutes(config.token_expiry_minutes)).timestamp() as u64,
    };

    let key = EncodingKey::from_secret(config.jwt_secret.as_ref());
    encode(&Header::new(Algorithm::HS256), &claims, &key).map_err(|e| {
        tracing::error!(error = %e, "Failed to sign session token");
        AuthError::TokenSigningFailed
    })
}

/// Validate a session token: signature, expiry, and claim shape.
pub(crate) fn validate_token(token: &str, config: &AuthConfig) -> Result<SessionClaims, AuthError> {
    let validation = Validation::new(Algorithm::HS256);
    let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_ref());

    let token_data = decode::<SessionClaims>(token, &decoding_key, &validation).map_err(|e| {
        tracing::debug!(error = %e, "Session token validation failed");
        AuthError::InvalidToken
    })?;

    Ok(token_data.claims)
}

/// Extract the session token from request headers.
///
/// The primary carrier is the HTTP-only `access_token` cookie; an
/// `Authorization: Bearer` header is accepted as a fallback for
/// non-browser clients.
pub(crate) fn extract_session_token(headers: &HeaderMap) -> Result<String, AuthError> {
    if let Some(cookie_header) = headers.get(header::COOKIE) {
        let cookies = cookie_header
            .to_str()
            .map_err(|_| AuthError::InvalidAuthorizationFormat)?;
        if let Some(token) = find_cookie(cookies, SESSION_COOKIE) {
            return Ok(token.to_string());
        }
    }

    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        let header_str = auth_header
            .to_str()
            .map_err(|_| AuthError::InvalidAuthorizationFormat)?;
        if let Some(token) = header_str.strip_prefix("Bearer ") {
            return Ok(token.to_string());
        }
        return Err(AuthError::InvalidAuthorizationFormat);
    }

    Err(AuthError::MissingCredentials)
}

/// Find a cookie value within a `Cookie` header string.
fn find_cookie<'a>(cookies: &'a str, name: &str) -> Option<&'a str> {
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}

/// Build the `Set-Cookie` value that establishes a session.
pub fn session_cookie(token: &str) -> HeaderValue {
    let cookie = format!(
        "{SESSION_COOKIE}={token}; HttpOnly; Path=/; SameSite=Lax",
    );
    HeaderValue::from_str(&cookie).unwrap_or_else(|_| HeaderValue::from_static(""))
}

/// Build the `Set-Cookie` value that clears a session.
pub fn session_cookie_clear() -> HeaderValue {
    HeaderValue::from_static(concat!(
        "access_token=",
        "; HttpOnly; Path=/; SameSite=Lax; Max-Age=0"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
            token_expiry_minutes: 60,
        }
    }

    #[test]
    fn test_token_roundtrip() {
        let config = test_config();
        let user_id = Uuid::new_v4();

        let token = issue_token("user@uni.edu", user_id, &config).unwrap();
        let claims = validate_token(&token, &config).unwrap();

        assert_eq!(claims.sub, "user@uni.edu");
        assert_eq!(claims.id, user_id.to_string());
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_rejected_with_wrong_secret() {
        let config = test_config();
        let other = AuthConfig {
            jwt_secret: "different-secret".to_string(),
            token_expiry_minutes: 60,
        };

        let token = issue_token("user@uni.edu", Uuid::new_v4(), &config).unwrap();
        assert!(matches!(
            validate_token(&token, &other),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = AuthConfig {
            jwt_secret: "test-secret".to_string(),
            token_expiry_minutes: -10,
        };

        let token = issue_token("user@uni.edu", Uuid::new_v4(), &config).unwrap();
        assert!(matches!(
            validate_token(&token, &config),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_malformed_token_rejected() {
        let config = test_config();
        assert!(validate_token("not-a-token", &config).is_err());
        assert!(validate_token("", &config).is_err());
    }

    #[test]
    fn test_extract_token_from_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; access_token=abc123; lang=en"),
        );
        assert_eq!(extract_session_token(&headers).unwrap(), "abc123");
    }

    #[test]
    fn test_extract_token_from_bearer_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer xyz789"),
        );
        assert_eq!(extract_session_token(&headers).unwrap(), "xyz789");
    }

    #[test]
    fn test_extract_token_missing() {
        let headers = HeaderMap::new();
        assert!(matches!(
            extract_session_token(&headers),
            Err(AuthError::MissingCredentials)
        ));
    }

    #[test]
    fn test_extract_token_bad_authorization_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic abc123"),
        );
        assert!(matches!(
            extract_session_token(&headers),
            Err(AuthError::InvalidAuthorizationFormat)
        ));
    }

    #[test]
    fn test_session_cookie_attributes() {
        let value = session_cookie("tok");
        let s = value.to_str().unwrap();
        assert!(s.starts_with("access_token=tok"));
        assert!(s.contains("HttpOnly"));
        assert!(s.contains("Path=/"));

        let cleared = session_cookie_clear();
        assert!(cleared.to_str().unwrap().contains("Max-Age=0"));
    }
}
