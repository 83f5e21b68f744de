//! Authentication configuration

/// Configuration for session token signing and expiry
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HS256 signing secret
    pub jwt_secret: String,
    /// Token lifetime in minutes
    pub token_expiry_minutes: i64,
}
