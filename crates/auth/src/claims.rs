//! Session token claims

use serde::{Deserialize, Serialize};

/// Claims carried by a signed session token.
///
/// `sub` holds the subject email, `id` the caller's user id; both are
/// bound together so a token can never be replayed for another account.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (email)
    pub sub: String,
    /// Caller user id
    pub id: String,
    /// Issued at
    pub iat: u64,
    /// Expires at
    pub exp: u64,
}
