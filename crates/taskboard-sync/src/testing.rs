//! Scripted in-memory client for tests.
//!
//! Responses are queued per (method, path); every call is recorded so tests
//! can assert exactly which requests went out.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use serde_json::Value;

use crate::client::{ResourceClient, ResourcePath};
use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    List,
    Get,
    Create,
    Update,
    Delete,
    Patch,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub payload: Option<Value>,
}

#[derive(Default)]
pub struct FakeClient {
    responses: RefCell<HashMap<(Method, String), VecDeque<ClientResult<Value>>>>,
    calls: RefCell<Vec<Call>>,
    latency: usize,
}

impl FakeClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Yield this many times before answering, so concurrent callers interleave
    pub fn with_latency(mut self, yields: usize) -> Self {
        self.latency = yields;
        self
    }

    pub fn respond(&self, method: Method, path: &str, result: ClientResult<Value>) -> &Self {
        self.responses
            .borrow_mut()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(result);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.method == method && c.path == path)
            .count()
    }

    async fn answer(&self, method: Method, path: &ResourcePath, payload: Option<Value>) -> ClientResult<Value> {
        let path = path.to_string();
        self.calls.borrow_mut().push(Call {
            method,
            path: path.clone(),
            payload,
        });

        for _ in 0..self.latency {
            tokio::task::yield_now().await;
        }

        self.responses
            .borrow_mut()
            .get_mut(&(method, path.clone()))
            .and_then(|queue| queue.pop_front())
            .unwrap_or_else(|| {
                Err(ClientError::Status {
                    status: 404,
                    message: format!("no scripted response for {:?} {}", method, path),
                })
            })
    }
}

#[async_trait(?Send)]
impl ResourceClient for FakeClient {
    async fn list(&self, path: &ResourcePath) -> ClientResult<Value> {
        self.answer(Method::List, path, None).await
    }

    async fn get(&self, path: &ResourcePath) -> ClientResult<Value> {
        self.answer(Method::Get, path, None).await
    }

    async fn create(&self, path: &ResourcePath, payload: Value) -> ClientResult<Value> {
        self.answer(Method::Create, path, Some(payload)).await
    }

    async fn update(&self, path: &ResourcePath, payload: Value) -> ClientResult<Value> {
        self.answer(Method::Update, path, Some(payload)).await
    }

    async fn delete(&self, path: &ResourcePath) -> ClientResult<()> {
        self.answer(Method::Delete, path, None).await.map(|_| ())
    }

    async fn patch(&self, path: &ResourcePath, payload: Option<Value>) -> ClientResult<Value> {
        self.answer(Method::Patch, path, payload).await
    }
}
