//! Domain Value Objects

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of a cache entry: hex SHA-256 of the normalized request target
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derive the key of a normalized request target
    pub fn from_target(target: &str) -> Self {
        Self(platform::crypto::sha256_hex(target.as_bytes()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the entry inside the cache directory
    pub fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Publication state of a saved post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    #[serde(alias = "publish")]
    Published,
    Draft,
    Pending,
    Private,
    Future,
    #[serde(other)]
    Other,
}

/// Content mutation reported by the CMS
///
/// Any change that can alter a public API response flushes the whole cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ContentChange {
    PostSaved {
        status: PostStatus,
        #[serde(default)]
        revision: bool,
        #[serde(default)]
        autosave: bool,
    },
    PostDeleted,
    CommentPosted {
        #[serde(default)]
        approved: bool,
    },
}

impl ContentChange {
    /// Whether this change makes cached responses stale
    pub fn invalidates(&self) -> bool {
        match self {
            ContentChange::PostSaved {
                status,
                revision,
                autosave,
            } => *status == PostStatus::Published && !revision && !autosave,
            ContentChange::PostDeleted => true,
            ContentChange::CommentPosted { approved } => *approved,
        }
    }
}
