//! Remote Resource Client
//!
//! Contract for the CRUD service behind the UI. Implementations exchange JSON
//! values; `Api` layers the typed project/task/auth calls on top.

mod api;
mod http;

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ClientResult;

pub use api::Api;
pub use http::HttpClient;

/// Relative location of a resource, e.g. `tasks/project/4`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourcePath {
    segments: Vec<String>,
}

impl ResourcePath {
    pub fn collection(name: &str) -> Self {
        Self {
            segments: vec![name.to_string()],
        }
    }

    pub fn segment(mut self, segment: &str) -> Self {
        self.segments.push(segment.to_string());
        self
    }

    pub fn id(mut self, id: impl fmt::Display) -> Self {
        self.segments.push(id.to_string());
        self
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

/// CRUD requests against named collections.
///
/// Futures are `!Send`: the client runs on the browser's single thread.
#[async_trait(?Send)]
pub trait ResourceClient {
    async fn list(&self, path: &ResourcePath) -> ClientResult<Value>;

    async fn get(&self, path: &ResourcePath) -> ClientResult<Value>;

    async fn create(&self, path: &ResourcePath, payload: Value) -> ClientResult<Value>;

    async fn update(&self, path: &ResourcePath, payload: Value) -> ClientResult<Value>;

    async fn delete(&self, path: &ResourcePath) -> ClientResult<()>;

    async fn patch(&self, path: &ResourcePath, payload: Option<Value>) -> ClientResult<Value>;
}
