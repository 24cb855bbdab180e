//! Status enums for portfolio entities.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a contact message.
///
/// Every message submitted through the public contact form is created as
/// `New`, regardless of prior submissions from the same visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContactStatus {
    #[default]
    New,
    Read,
    Replied,
}

impl ContactStatus {
    /// Wire representation (matches the backend's stored string).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Read => "READ",
            Self::Replied => "REPLIED",
        }
    }
}

/// Publication status of a blog post.
///
/// Only `Published` posts appear on the public blog pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

impl PostStatus {
    /// Wire representation (matches the backend's stored string).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Published => "PUBLISHED",
        }
    }

    /// Parse from the wire representation, defaulting unknown values to draft.
    #[must_use]
    pub fn parse_or_draft(s: &str) -> Self {
        match s {
            "PUBLISHED" => Self::Published,
            _ => Self::Draft,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_status_serializes_screaming() {
        let json = serde_json::to_string(&ContactStatus::New).expect("serialize");
        assert_eq!(json, "\"NEW\"");
    }

    #[test]
    fn post_status_round_trip() {
        for status in [PostStatus::Draft, PostStatus::Published] {
            assert_eq!(PostStatus::parse_or_draft(status.as_str()), status);
        }
        assert_eq!(PostStatus::parse_or_draft("bogus"), PostStatus::Draft);
    }
}
