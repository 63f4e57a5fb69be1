//! # Posts
//!
//! Posts ("hoots") with embedded comments, owned by their authors.
//!
//! - [`model`]: stored records and request payloads
//! - [`store`]: the document store trait and its in-memory engine
//! - [`policy`]: who may mutate what
//! - [`hydrate`]: author reference expansion for responses
//! - [`service`]: the operations

pub mod errors;
pub mod hydrate;
pub mod model;
pub mod policy;
pub mod service;
pub mod store;

pub use errors::{PostError, PostResult};
pub use hydrate::{Author, CommentView, PostView};
pub use model::{Comment, CommentBody, NewPost, Post, PostPatch};
pub use policy::{is_owner, CommentPolicy, Owned};
pub use service::PostService;
pub use store::{InMemoryPostStore, PostStore, StoreError};
