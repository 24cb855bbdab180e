//! Session-stored types for admin authentication.

use serde::{Deserialize, Serialize};

use portfolio_core::Email;

use crate::backend::AccessToken;

/// Session-stored owner identity.
///
/// Holds the bearer token for owner-only backend operations alongside the
/// identity shown in the admin chrome. `Debug` on the token is redacted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Owner's email address.
    pub email: Email,
    /// Display name shown in the admin header.
    pub display_name: String,
    /// Bearer token for owner-only backend operations.
    pub token: AccessToken,
}

/// Session keys for admin authentication data.
pub mod keys {
    /// Key for storing the current logged-in owner.
    pub const CURRENT_ADMIN: &str = "current_admin";
}
