//! Taskboard Sync Core
//!
//! Client-side state for the Taskboard UI, kept consistent with the REST API:
//! - session: bearer token lifecycle and view gating
//! - collection: id-keyed, insertion-ordered entity cache
//! - loader: concurrent fan-out loads that tolerate partial failure
//! - mutation: validated, confirmation-gated, server-reconciled writes
//! - metrics: pure derived views over the cache
//! - client: the remote resource contract and its HTTP implementation

mod auth;
mod client;
mod collection;
mod config;
mod error;
mod in_flight;
mod loader;
mod models;
mod mutation;
mod notice;
mod session;
mod state;

pub mod metrics;

#[cfg(test)]
mod testing;
mod tests;

pub use auth::{validate_password, Auth};
pub use client::{Api, HttpClient, ResourceClient, ResourcePath};
pub use collection::Collection;
pub use config::SyncConfig;
pub use error::{AuthError, ClientError, ClientResult, ConfigError, MutationError, ValidationError};
pub use loader::{Fetch, LoadOutcome, LoadReport, Loader, Payload};
pub use models::{
    Credentials, Entity, Project, ProjectDraft, ProjectId, ProjectRef, Registration, Task,
    TaskDraft, TaskId, TaskStatus, TokenResponse,
};
pub use mutation::{MutationKind, MutationOutcome, Mutations};
pub use notice::{Notice, NoticeLevel, Notices};
pub use session::{Guarded, MemoryTokenStore, Session, SessionGuard, TokenStore, View};
pub use state::{EntityKind, PendingConfirmation, SharedState, SyncState};
