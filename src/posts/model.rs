//! Post and Comment records as stored, plus the request payloads that
//! create or patch them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A comment embedded in exactly one post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub author: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// New comment authored by `author`, stamped now
    pub fn new(author: Uuid, text: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author,
            text,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A top-level post ("hoot")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub author: Uuid,
    pub title: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Insertion order
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn comment(&self, id: Uuid) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == id)
    }

    pub fn comment_mut(&mut self, id: Uuid) -> Option<&mut Comment> {
        self.comments.iter_mut().find(|c| c.id == id)
    }

    /// Remove the comment with `id`, keeping the order of the others.
    pub fn remove_comment(&mut self, id: Uuid) -> Option<Comment> {
        let index = self.comments.iter().position(|c| c.id == id)?;
        Some(self.comments.remove(index))
    }

    /// Apply the present fields of a patch. Author and comments are never
    /// touched here.
    pub fn apply(&mut self, patch: PostPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(text) = patch.text {
            self.text = text;
        }
        if let Some(category) = patch.category {
            self.category = Some(category);
        }
    }
}

/// Fields of a post ready for insertion; the store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPostRecord {
    pub author: Uuid,
    pub title: String,
    pub text: String,
    pub category: Option<String>,
}

/// Create-post request body.
///
/// Any `author` or `comments` keys a client sends are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPost {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Update-post request body; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Add-comment and update-comment request body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentBody {
    #[serde(default)]
    pub text: Option<String>,
}
