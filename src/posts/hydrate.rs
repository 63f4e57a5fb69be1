//! Author hydration.
//!
//! Stored records carry author ids. Before a record leaves the service its
//! author references are expanded to [`UserProfile`]s. The caller's own
//! identity answers first, so a just-written record never needs a directory
//! round trip; anything else is looked up in the user directory. A reference
//! that resolves nowhere stays a bare id.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::{Caller, UserProfile, UserRepository};

use super::model::{Comment, Post};

/// An author reference in a response: expanded when resolvable
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Author {
    Profile(UserProfile),
    Id(Uuid),
}

impl Author {
    pub fn id(&self) -> Uuid {
        match self {
            Author::Profile(profile) => profile.id,
            Author::Id(id) => *id,
        }
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        match self {
            Author::Profile(profile) => Some(profile),
            Author::Id(_) => None,
        }
    }
}

/// Resolves author ids to profiles
pub trait AuthorLookup {
    fn lookup(&self, id: Uuid) -> Option<UserProfile>;
}

impl AuthorLookup for Caller {
    fn lookup(&self, id: Uuid) -> Option<UserProfile> {
        (self.id() == id).then(|| self.profile().clone())
    }
}

/// Caller first, then the user directory
pub struct CallerThenDirectory<'a, U: UserRepository> {
    pub caller: &'a Caller,
    pub users: &'a U,
}

impl<U: UserRepository> AuthorLookup for CallerThenDirectory<'_, U> {
    fn lookup(&self, id: Uuid) -> Option<UserProfile> {
        self.caller.lookup(id).or_else(|| {
            self.users
                .find_by_id(id)
                .ok()
                .flatten()
                .map(|user| user.profile())
        })
    }
}

fn resolve(id: Uuid, lookup: &impl AuthorLookup) -> Author {
    lookup.lookup(id).map(Author::Profile).unwrap_or(Author::Id(id))
}

/// Comment as returned to clients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub author: Author,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Post as returned to clients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub author: Author,
    pub title: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub comments: Vec<CommentView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub fn hydrate_comment(comment: Comment, lookup: &impl AuthorLookup) -> CommentView {
    CommentView {
        id: comment.id,
        author: resolve(comment.author, lookup),
        text: comment.text,
        created_at: comment.created_at,
        updated_at: comment.updated_at,
    }
}

pub fn hydrate_post(post: Post, lookup: &impl AuthorLookup) -> PostView {
    PostView {
        id: post.id,
        author: resolve(post.author, lookup),
        title: post.title,
        text: post.text,
        category: post.category,
        comments: post
            .comments
            .into_iter()
            .map(|c| hydrate_comment(c, lookup))
            .collect(),
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}
