//! HTTP Client
//!
//! `ResourceClient` over the REST API. Every request carries the session's
//! bearer token when one is present.

use std::rc::Rc;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, Response};
use serde_json::Value;

use super::{ResourceClient, ResourcePath};
use crate::config::SyncConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::Session;

pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
    session: Rc<Session>,
}

impl HttpClient {
    pub fn new(config: &SyncConfig, session: Rc<Session>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url().to_string(),
            session,
        }
    }

    pub fn url(&self, path: &ResourcePath) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &ResourcePath) -> RequestBuilder {
        log::debug!("[HTTP] {} {}", method, path);
        let builder = self.http.request(method, self.url(path));
        match self.session.token() {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> ClientResult<Response> {
        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(ClientError::Status {
            status: status.as_u16(),
            message,
        })
    }

    /// Body as JSON; an empty body reads as `null`
    async fn read_json(response: Response) -> ClientResult<Value> {
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[async_trait(?Send)]
impl ResourceClient for HttpClient {
    async fn list(&self, path: &ResourcePath) -> ClientResult<Value> {
        let response = self.send(self.request(Method::GET, path)).await?;
        Self::read_json(response).await
    }

    async fn get(&self, path: &ResourcePath) -> ClientResult<Value> {
        let response = self.send(self.request(Method::GET, path)).await?;
        Self::read_json(response).await
    }

    async fn create(&self, path: &ResourcePath, payload: Value) -> ClientResult<Value> {
        let response = self.send(self.request(Method::POST, path).json(&payload)).await?;
        Self::read_json(response).await
    }

    async fn update(&self, path: &ResourcePath, payload: Value) -> ClientResult<Value> {
        let response = self.send(self.request(Method::PUT, path).json(&payload)).await?;
        Self::read_json(response).await
    }

    async fn delete(&self, path: &ResourcePath) -> ClientResult<()> {
        self.send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    async fn patch(&self, path: &ResourcePath, payload: Option<Value>) -> ClientResult<Value> {
        let mut builder = self.request(Method::PATCH, path);
        if let Some(payload) = payload {
            builder = builder.json(&payload);
        }
        let response = self.send(builder).await?;
        Self::read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_base_and_path() {
        let config = SyncConfig {
            api_base_url: "http://localhost:8080/api/".to_string(),
            ..SyncConfig::default()
        };
        let client = HttpClient::new(&config, Rc::new(Session::in_memory()));
        let path = ResourcePath::collection("tasks").segment("due-soon");
        assert_eq!(client.url(&path), "http://localhost:8080/api/tasks/due-soon");
    }
}
