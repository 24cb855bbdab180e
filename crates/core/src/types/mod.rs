//! Core types for the portfolio site.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod lines;
pub mod ordering;
pub mod status;
pub mod storage;

pub use email::{Email, EmailError};
pub use id::*;
pub use lines::{LineListError, join_lines, split_lines};
pub use ordering::{Direction, move_item, neighbor_index};
pub use status::{ContactStatus, PostStatus};
pub use storage::{StorageKey, StoragePrefix};
