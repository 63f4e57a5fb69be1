//! Ownership policy.
//!
//! A resource may be mutated only by its author. Every handler goes through
//! [`is_owner`]; nothing compares author ids inline.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::Caller;

use super::model::{Comment, Post};

/// A record with an immutable author reference
pub trait Owned {
    fn owner(&self) -> Uuid;
}

impl Owned for Post {
    fn owner(&self) -> Uuid {
        self.author
    }
}

impl Owned for Comment {
    fn owner(&self) -> Uuid {
        self.author
    }
}

/// True if `caller` authored `resource`.
pub fn is_owner(caller: &Caller, resource: &impl Owned) -> bool {
    caller.id() == resource.owner()
}

/// Who may edit or delete a comment.
///
/// Posts are always author-only. Comments default to `Open`, where any
/// authenticated caller may edit or delete any comment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentPolicy {
    #[default]
    Open,
    AuthorOnly,
}

impl CommentPolicy {
    /// Whether `caller` may modify `comment` under this policy
    pub fn permits(&self, caller: &Caller, comment: &Comment) -> bool {
        match self {
            CommentPolicy::Open => true,
            CommentPolicy::AuthorOnly => is_owner(caller, comment),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CommentPolicy::Open => "open",
            CommentPolicy::AuthorOnly => "author_only",
        }
    }
}
