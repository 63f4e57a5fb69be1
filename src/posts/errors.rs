//! # Post Errors

use thiserror::Error;
use uuid::Uuid;

use super::store::StoreError;

/// Result type for post operations
pub type PostResult<T> = Result<T, PostError>;

/// Post and comment operation errors
#[derive(Debug, Clone, Error)]
pub enum PostError {
    /// Caller is not the resource's author
    #[error("You're not allowed to do that!")]
    Forbidden,

    /// No post with this id
    #[error("post not found: {0}")]
    PostNotFound(String),

    /// Post exists but has no comment with this id
    #[error("comment {comment_id} not found on post {post_id}")]
    CommentNotFound { post_id: Uuid, comment_id: String },

    /// Payload is missing a field the document schema requires
    #[error("validation failed: {0}")]
    Validation(String),

    /// Underlying persistence failure
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl PostError {
    /// Returns the HTTP status code for this error
    ///
    /// Schema violations are store rejections and surface as 500 like any
    /// other persistence failure.
    pub fn status_code(&self) -> u16 {
        match self {
            PostError::Forbidden => 403,
            PostError::PostNotFound(_) => 404,
            PostError::CommentNotFound { .. } => 404,
            PostError::Validation(_) => 500,
            PostError::Store(StoreError::NotFound(_)) => 404,
            PostError::Store(_) => 500,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(PostError::Forbidden.status_code(), 403);
        assert_eq!(PostError::PostNotFound("x".into()).status_code(), 404);
        assert_eq!(
            PostError::CommentNotFound {
                post_id: Uuid::new_v4(),
                comment_id: "c".into()
            }
            .status_code(),
            404
        );
        assert_eq!(PostError::Validation("title".into()).status_code(), 500);
        assert_eq!(PostError::Store(StoreError::LockPoisoned).status_code(), 500);
    }

    #[test]
    fn test_vanished_document_is_not_found() {
        let err: PostError = StoreError::NotFound(Uuid::new_v4()).into();
        assert_eq!(err.status_code(), 404);
        assert!(err.is_client_error());
    }

    #[test]
    fn test_forbidden_message() {
        assert_eq!(
            PostError::Forbidden.to_string(),
            "You're not allowed to do that!"
        );
    }
}
