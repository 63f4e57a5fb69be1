//! # Post Service
//!
//! The eight post/comment operations. Each one is a single store call or a
//! load-mutate-replace of one post document, followed by author hydration.
//! Ownership decisions go through [`is_owner`] and [`CommentPolicy`].

use std::sync::Arc;

use uuid::Uuid;

use crate::auth::{Caller, UserRepository};
use crate::observability::{log_event_with_fields, Event, Logger, MetricsRegistry};

use super::errors::{PostError, PostResult};
use super::hydrate::{hydrate_comment, hydrate_post, CallerThenDirectory, CommentView, PostView};
use super::model::{Comment, CommentBody, NewPost, NewPostRecord, Post, PostPatch};
use super::policy::{is_owner, CommentPolicy};
use super::store::PostStore;

/// Post resource service
pub struct PostService<S: PostStore, U: UserRepository> {
    store: Arc<S>,
    users: Arc<U>,
    comment_policy: CommentPolicy,
    metrics: Arc<MetricsRegistry>,
}

impl<S: PostStore, U: UserRepository> PostService<S, U> {
    pub fn new(store: Arc<S>, users: Arc<U>) -> Self {
        Self {
            store,
            users,
            comment_policy: CommentPolicy::default(),
            metrics: Arc::new(MetricsRegistry::new()),
        }
    }

    pub fn with_comment_policy(mut self, policy: CommentPolicy) -> Self {
        self.comment_policy = policy;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<MetricsRegistry>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn comment_policy(&self) -> CommentPolicy {
        self.comment_policy
    }

    pub fn metrics(&self) -> &Arc<MetricsRegistry> {
        &self.metrics
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    fn lookup<'a>(&'a self, caller: &'a Caller) -> CallerThenDirectory<'a, U> {
        CallerThenDirectory {
            caller,
            users: self.users.as_ref(),
        }
    }

    /// Load a post or fail with `PostNotFound`. Malformed ids are unknown ids.
    async fn load(&self, raw_id: &str) -> PostResult<Post> {
        let id = Uuid::parse_str(raw_id).map_err(|_| PostError::PostNotFound(raw_id.to_string()))?;
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| PostError::PostNotFound(raw_id.to_string()))
    }

    fn comment_id(post: &Post, raw_id: &str) -> PostResult<Uuid> {
        Uuid::parse_str(raw_id)
            .ok()
            .filter(|id| post.comment(*id).is_some())
            .ok_or_else(|| PostError::CommentNotFound {
                post_id: post.id,
                comment_id: raw_id.to_string(),
            })
    }

    fn deny(&self, caller: &Caller, event: Event, resource: Uuid) -> PostError {
        self.metrics.increment_forbidden();
        let caller_id = caller.id().to_string();
        let resource_id = resource.to_string();
        Logger::warn(
            Event::OwnershipDenied.as_str(),
            &[
                ("attempted", event.as_str()),
                ("caller", &caller_id),
                ("resource", &resource_id),
            ],
        );
        PostError::Forbidden
    }

    /// Create a post authored by the caller
    pub async fn create(&self, caller: &Caller, payload: NewPost) -> PostResult<PostView> {
        let record = NewPostRecord {
            author: caller.id(),
            title: required(payload.title, "title")?,
            text: required(payload.text, "text")?,
            category: payload.category,
        };

        let post = self.store.insert(record).await?;

        self.metrics.increment_posts_created();
        log_event_with_fields(
            Event::PostCreated,
            &[("author", &caller.id().to_string()), ("post_id", &post.id.to_string())],
        );

        Ok(hydrate_post(post, &self.lookup(caller)))
    }

    /// All posts, newest first
    pub async fn list(&self, caller: &Caller) -> PostResult<Vec<PostView>> {
        let posts = self.store.list().await?;
        let lookup = self.lookup(caller);

        Ok(posts.into_iter().map(|p| hydrate_post(p, &lookup)).collect())
    }

    pub async fn get(&self, caller: &Caller, id: &str) -> PostResult<PostView> {
        let post = self.load(id).await?;
        Ok(hydrate_post(post, &self.lookup(caller)))
    }

    /// Apply a patch to a post the caller authored
    pub async fn update(&self, caller: &Caller, id: &str, patch: PostPatch) -> PostResult<PostView> {
        let post = self.load(id).await?;
        if !is_owner(caller, &post) {
            return Err(self.deny(caller, Event::PostUpdated, post.id));
        }

        let post = self.store.update_fields(post.id, patch).await?;

        self.metrics.increment_posts_updated();
        log_event_with_fields(Event::PostUpdated, &[("post_id", &post.id.to_string())]);

        Ok(hydrate_post(post, &self.lookup(caller)))
    }

    /// Permanently remove a post the caller authored; returns the removed record
    pub async fn delete(&self, caller: &Caller, id: &str) -> PostResult<PostView> {
        let post = self.load(id).await?;
        if !is_owner(caller, &post) {
            return Err(self.deny(caller, Event::PostDeleted, post.id));
        }

        let removed = self
            .store
            .remove(post.id)
            .await?
            .ok_or_else(|| PostError::PostNotFound(id.to_string()))?;

        self.metrics.increment_posts_deleted();
        log_event_with_fields(Event::PostDeleted, &[("post_id", &removed.id.to_string())]);

        Ok(hydrate_post(removed, &self.lookup(caller)))
    }

    /// Append a comment by the caller to the end of a post's comments
    pub async fn add_comment(
        &self,
        caller: &Caller,
        post_id: &str,
        body: CommentBody,
    ) -> PostResult<CommentView> {
        let post = self.load(post_id).await?;
        let text = required(body.text, "text")?;

        let comment = Comment::new(caller.id(), text);
        let comment_id = comment.id;
        let post = self.store.push_comment(post.id, comment).await?;

        let comment = post
            .comments
            .into_iter()
            .find(|c| c.id == comment_id)
            .ok_or_else(|| PostError::CommentNotFound {
                post_id: post.id,
                comment_id: comment_id.to_string(),
            })?;

        self.metrics.increment_comments_added();
        log_event_with_fields(
            Event::CommentAdded,
            &[("comment_id", &comment.id.to_string()), ("post_id", &post.id.to_string())],
        );

        Ok(hydrate_comment(comment, &self.lookup(caller)))
    }

    /// Overwrite the text of one comment; author and other comments untouched
    pub async fn update_comment(
        &self,
        caller: &Caller,
        post_id: &str,
        comment_id: &str,
        body: CommentBody,
    ) -> PostResult<()> {
        let mut post = self.load(post_id).await?;
        let cid = Self::comment_id(&post, comment_id)?;
        let text = required(body.text, "text")?;

        let parent = post.id;
        let comment = post.comment_mut(cid).ok_or_else(|| PostError::CommentNotFound {
            post_id: parent,
            comment_id: comment_id.to_string(),
        })?;
        if !self.comment_policy.permits(caller, comment) {
            return Err(self.deny(caller, Event::CommentUpdated, cid));
        }

        comment.text = text;
        comment.updated_at = chrono::Utc::now();
        self.store.replace(post).await?;

        self.metrics.increment_comments_updated();
        log_event_with_fields(
            Event::CommentUpdated,
            &[("comment_id", &cid.to_string()), ("post_id", &parent.to_string())],
        );

        Ok(())
    }

    /// Remove one comment, preserving the order of the rest
    pub async fn delete_comment(
        &self,
        caller: &Caller,
        post_id: &str,
        comment_id: &str,
    ) -> PostResult<()> {
        let mut post = self.load(post_id).await?;
        let cid = Self::comment_id(&post, comment_id)?;

        if let Some(comment) = post.comment(cid) {
            if !self.comment_policy.permits(caller, comment) {
                return Err(self.deny(caller, Event::CommentDeleted, cid));
            }
        }

        post.remove_comment(cid);
        let parent = post.id;
        self.store.replace(post).await?;

        self.metrics.increment_comments_deleted();
        log_event_with_fields(
            Event::CommentDeleted,
            &[("comment_id", &cid.to_string()), ("post_id", &parent.to_string())],
        );

        Ok(())
    }
}

/// Schema presence check: the field must be there and not blank
fn required(value: Option<String>, field: &str) -> PostResult<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| PostError::Validation(format!("`{}` is required", field)))
}
