//! Post document store.
//!
//! Each post (with its embedded comments) is one document. Writes are
//! atomic per document; concurrent replaces of the same post are
//! last-write-wins. Field updates and comment appends touch only their
//! part of the document, so they never drop each other's changes.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use super::model::{Comment, NewPostRecord, Post, PostPatch};

/// Store-level errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Replace targeted a document that no longer exists
    #[error("document not found: {0}")]
    NotFound(Uuid),

    /// Internal lock was poisoned by a panicking writer
    #[error("store lock poisoned")]
    LockPoisoned,
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Abstract document store for posts.
///
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait PostStore: Send + Sync + 'static {
    /// Persist a new post; assigns `_id`, `createdAt` and `updatedAt`.
    async fn insert(&self, record: NewPostRecord) -> StoreResult<Post>;

    /// All posts, newest `createdAt` first.
    async fn list(&self) -> StoreResult<Vec<Post>>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Post>>;

    /// Rewrite a whole document; stamps `updatedAt`.
    async fn replace(&self, post: Post) -> StoreResult<Post>;

    /// Set only the fields present in `patch`; stamps `updatedAt`.
    async fn update_fields(&self, id: Uuid, patch: PostPatch) -> StoreResult<Post>;

    /// Append one comment to the end of a document's comments; stamps `updatedAt`.
    async fn push_comment(&self, id: Uuid, comment: Comment) -> StoreResult<Post>;

    /// Remove a document, returning it if it existed.
    async fn remove(&self, id: Uuid) -> StoreResult<Option<Post>>;
}

#[derive(Debug)]
struct StoredPost {
    /// Insertion sequence, breaks `createdAt` ties in listings
    seq: u64,
    post: Post,
}

#[derive(Debug, Default)]
struct Documents {
    next_seq: u64,
    posts: HashMap<Uuid, StoredPost>,
}

/// In-memory post store
#[derive(Debug, Default)]
pub struct InMemoryPostStore {
    docs: RwLock<Documents>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutate one stored document in place under the write lock
    fn modify(&self, id: Uuid, change: impl FnOnce(&mut Post)) -> StoreResult<Post> {
        let mut docs = self.docs.write().map_err(|_| StoreError::LockPoisoned)?;
        let stored = docs.posts.get_mut(&id).ok_or(StoreError::NotFound(id))?;

        change(&mut stored.post);
        stored.post.updated_at = Utc::now();
        Ok(stored.post.clone())
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn insert(&self, record: NewPostRecord) -> StoreResult<Post> {
        let mut docs = self.docs.write().map_err(|_| StoreError::LockPoisoned)?;

        let now = Utc::now();
        let post = Post {
            id: Uuid::new_v4(),
            author: record.author,
            title: record.title,
            text: record.text,
            category: record.category,
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        let seq = docs.next_seq;
        docs.next_seq += 1;
        docs.posts.insert(
            post.id,
            StoredPost {
                seq,
                post: post.clone(),
            },
        );

        Ok(post)
    }

    async fn list(&self) -> StoreResult<Vec<Post>> {
        let docs = self.docs.read().map_err(|_| StoreError::LockPoisoned)?;

        let mut stored: Vec<&StoredPost> = docs.posts.values().collect();
        stored.sort_by(|a, b| {
            b.post
                .created_at
                .cmp(&a.post.created_at)
                .then(b.seq.cmp(&a.seq))
        });

        Ok(stored.into_iter().map(|s| s.post.clone()).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Post>> {
        let docs = self.docs.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(docs.posts.get(&id).map(|s| s.post.clone()))
    }

    async fn replace(&self, mut post: Post) -> StoreResult<Post> {
        let mut docs = self.docs.write().map_err(|_| StoreError::LockPoisoned)?;

        let stored = docs
            .posts
            .get_mut(&post.id)
            .ok_or(StoreError::NotFound(post.id))?;

        post.updated_at = Utc::now();
        stored.post = post.clone();
        Ok(post)
    }

    async fn update_fields(&self, id: Uuid, patch: PostPatch) -> StoreResult<Post> {
        self.modify(id, |post| post.apply(patch))
    }

    async fn push_comment(&self, id: Uuid, comment: Comment) -> StoreResult<Post> {
        self.modify(id, |post| post.comments.push(comment))
    }

    async fn remove(&self, id: Uuid) -> StoreResult<Option<Post>> {
        let mut docs = self.docs.write().map_err(|_| StoreError::LockPoisoned)?;
        Ok(docs.posts.remove(&id).map(|s| s.post))
    }
}
