//! Domain models for the site beyond the backend record types.

pub mod session;

pub use session::{CurrentAdmin, keys as session_keys};
