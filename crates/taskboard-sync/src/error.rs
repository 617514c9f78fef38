//! Error Types
//!
//! Failure taxonomy of the sync layer. None of these is fatal: the session
//! and the cached collections stay usable after any of them.

use thiserror::Error;

use crate::mutation::MutationKind;

/// Result type for remote calls
pub type ClientResult<T> = Result<T, ClientError>;

/// Failure of a single request to the remote API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("server responded with {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("invalid response payload: {0}")]
    Decode(String),
}

impl ClientError {
    /// True when the server itself refused the request (4xx)
    pub fn is_rejection(&self) -> bool {
        matches!(self, ClientError::Status { status, .. } if (400..500).contains(status))
    }
}

/// Local precondition failures. These never reach the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title is required!")]
    ProjectTitleRequired,

    #[error("Please enter a task name.")]
    TaskTitleRequired,

    #[error("Password is too weak! It must be at least 6 characters.")]
    PasswordTooShort,

    #[error("Weak password! Please include a special character (e.g. @, #, $).")]
    PasswordMissingSpecial,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Another mutation of the same kind is in flight for this target.
    #[error("{kind} already in progress")]
    Busy { kind: MutationKind },

    #[error("no delete is awaiting confirmation")]
    NothingToConfirm,

    #[error("{kind} failed: {source}")]
    Remote {
        kind: MutationKind,
        #[source]
        source: ClientError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Registration refused by the server.
    #[error("This email is already in use. Will you log in instead?")]
    AccountExists,

    #[error("Registration failed. Please try again later.")]
    RegistrationFailed(#[source] ClientError),

    #[error("Authentication failed. Please check your credentials.")]
    LoginFailed(#[source] ClientError),

    /// The same sign-in or registration request is still outstanding.
    #[error("Please wait, your request is still being processed.")]
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
