//! Observable events
//!
//! Every line the service logs is named by one of these.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    /// Startup begins
    BootStart,
    /// Configuration loaded
    ConfigLoaded,
    /// Listening for requests
    Serving,
    /// Server stopped with an error
    ServeFailed,
    /// Comment edits/deletes are not author-gated
    CommentPolicyOpen,

    // Auth
    UserSignedUp,
    UserSignedIn,
    /// Token missing, malformed or expired
    AuthRejected,

    // Posts
    PostCreated,
    PostUpdated,
    PostDeleted,

    // Comments
    CommentAdded,
    CommentUpdated,
    CommentDeleted,

    // Failures
    /// Caller tried to mutate something they do not own
    OwnershipDenied,
    /// Request failed with a server error
    RequestFailed,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "HOOTS_STARTUP_BEGIN",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::Serving => "HOOTS_SERVING",
            Event::ServeFailed => "HOOTS_SERVE_FAILED",
            Event::CommentPolicyOpen => "COMMENT_POLICY_OPEN",

            Event::UserSignedUp => "USER_SIGNED_UP",
            Event::UserSignedIn => "USER_SIGNED_IN",
            Event::AuthRejected => "AUTH_REJECTED",

            Event::PostCreated => "POST_CREATED",
            Event::PostUpdated => "POST_UPDATED",
            Event::PostDeleted => "POST_DELETED",

            Event::CommentAdded => "COMMENT_ADDED",
            Event::CommentUpdated => "COMMENT_UPDATED",
            Event::CommentDeleted => "COMMENT_DELETED",

            Event::OwnershipDenied => "OWNERSHIP_DENIED",
            Event::RequestFailed => "REQUEST_FAILED",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::ServeFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
