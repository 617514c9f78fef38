//! Typed API
//!
//! Project, task and auth calls mapped onto the generic resource client.

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::{ResourceClient, ResourcePath};
use crate::error::{ClientError, ClientResult};
use crate::models::{
    Credentials, Project, ProjectDraft, ProjectId, Registration, Task, TaskDraft, TaskId,
    TokenResponse,
};

// ========================
// Paths
// ========================

fn projects() -> ResourcePath {
    ResourcePath::collection("projects")
}

fn project(id: ProjectId) -> ResourcePath {
    projects().id(id)
}

fn tasks() -> ResourcePath {
    ResourcePath::collection("tasks")
}

fn project_tasks(project_id: ProjectId) -> ResourcePath {
    tasks().segment("project").id(project_id)
}

fn auth(action: &str) -> ResourcePath {
    ResourcePath::collection("auth").segment(action)
}

fn decode<T: DeserializeOwned>(value: Value) -> ClientResult<T> {
    serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
}

fn encode<T: Serialize>(payload: &T) -> ClientResult<Value> {
    serde_json::to_value(payload).map_err(|e| ClientError::Decode(e.to_string()))
}

// ========================
// Api
// ========================

pub struct Api<C> {
    client: Rc<C>,
}

impl<C> Clone for Api<C> {
    fn clone(&self) -> Self {
        Self {
            client: Rc::clone(&self.client),
        }
    }
}

impl<C: ResourceClient> Api<C> {
    pub fn new(client: Rc<C>) -> Self {
        Self { client }
    }

    pub async fn list_projects(&self) -> ClientResult<Vec<Project>> {
        decode(self.client.list(&projects()).await?)
    }

    pub async fn get_project(&self, id: ProjectId) -> ClientResult<Project> {
        decode(self.client.get(&project(id)).await?)
    }

    pub async fn create_project(&self, draft: &ProjectDraft) -> ClientResult<Project> {
        decode(self.client.create(&projects(), encode(draft)?).await?)
    }

    pub async fn update_project(&self, id: ProjectId, draft: &ProjectDraft) -> ClientResult<Project> {
        decode(self.client.update(&project(id), encode(draft)?).await?)
    }

    pub async fn delete_project(&self, id: ProjectId) -> ClientResult<()> {
        self.client.delete(&project(id)).await
    }

    pub async fn list_project_tasks(&self, project_id: ProjectId) -> ClientResult<Vec<Task>> {
        decode(self.client.list(&project_tasks(project_id)).await?)
    }

    pub async fn list_due_soon(&self) -> ClientResult<Vec<Task>> {
        decode(self.client.list(&tasks().segment("due-soon")).await?)
    }

    pub async fn create_task(&self, project_id: ProjectId, draft: &TaskDraft) -> ClientResult<Task> {
        decode(self.client.create(&project_tasks(project_id), encode(draft)?).await?)
    }

    /// Ask the server to flip the task's status
    pub async fn toggle_task(&self, id: TaskId) -> ClientResult<Task> {
        decode(self.client.patch(&tasks().id(id).segment("complete"), None).await?)
    }

    pub async fn delete_task(&self, id: TaskId) -> ClientResult<()> {
        self.client.delete(&tasks().id(id)).await
    }

    pub async fn login(&self, credentials: &Credentials) -> ClientResult<TokenResponse> {
        decode(self.client.create(&auth("login"), encode(credentials)?).await?)
    }

    pub async fn register(&self, registration: &Registration) -> ClientResult<()> {
        self.client.create(&auth("register"), encode(registration)?).await?;
        Ok(())
    }
}
