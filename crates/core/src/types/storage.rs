//! Storage keys for uploaded files.
//!
//! Uploaded binaries live in the managed backend's file storage, partitioned
//! by an entity-type prefix. Records store only the key; the site never
//! persists file contents itself.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Entity-type prefix under which a file is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoragePrefix {
    /// Blog post featured images.
    Blog,
    /// Service icons.
    Services,
    /// Project gallery images.
    Projects,
    /// Shared site assets.
    Assets,
}

impl StoragePrefix {
    /// Path segment for this prefix.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blog => "blog",
            Self::Services => "services",
            Self::Projects => "projects",
            Self::Assets => "assets",
        }
    }
}

impl fmt::Display for StoragePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A key referencing one stored file, including its entity prefix.
///
/// Keys take the form `<prefix>/<timestamp-millis>-<original filename>`.
/// The timestamp makes keys unique across repeated uploads of the same
/// filename; the original filename is kept for operator legibility.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageKey(String);

impl StorageKey {
    /// Derive a fresh key for an upload.
    ///
    /// The filename is sanitized: path separators and control characters are
    /// replaced so the key stays a single path segment under the prefix.
    #[must_use]
    pub fn derive(prefix: StoragePrefix, timestamp_millis: i64, filename: &str) -> Self {
        let safe: String = filename
            .chars()
            .map(|c| {
                if c == '/' || c == '\\' || c.is_control() {
                    '_'
                } else {
                    c
                }
            })
            .collect();
        let safe = if safe.is_empty() {
            "upload".to_owned()
        } else {
            safe
        };
        Self(format!("{}/{timestamp_millis}-{safe}", prefix.as_str()))
    }

    /// Wrap an existing key (e.g. one retained from a previous edit).
    #[must_use]
    pub fn from_existing(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the key and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_prefixes_and_timestamps() {
        let key = StorageKey::derive(StoragePrefix::Blog, 1_716_000_000_000, "cover.png");
        assert_eq!(key.as_str(), "blog/1716000000000-cover.png");
    }

    #[test]
    fn derive_sanitizes_path_separators() {
        let key = StorageKey::derive(StoragePrefix::Projects, 1, "../evil/name.png");
        assert_eq!(key.as_str(), "projects/1-.._evil_name.png");
    }

    #[test]
    fn derive_handles_empty_filename() {
        let key = StorageKey::derive(StoragePrefix::Services, 7, "");
        assert_eq!(key.as_str(), "services/7-upload");
    }

    #[test]
    fn same_filename_different_timestamps_differ() {
        let a = StorageKey::derive(StoragePrefix::Blog, 1, "a.png");
        let b = StorageKey::derive(StoragePrefix::Blog, 2, "a.png");
        assert_ne!(a, b);
    }
}
