//! Domain Models
//!
//! Entities exchanged with the remote API, plus the drafts submitted to it.
//! Wire format is the server's camelCase JSON.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::ValidationError;

/// Core trait for all cached entities
pub trait Entity: Clone {
    /// The type of the entity's unique identifier
    type Id: Copy + Eq + Hash + Debug;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;
}

pub type ProjectId = u64;
pub type TaskId = u64;

// ========================
// Project
// ========================

/// Project as served by the API.
///
/// The list endpoint fills the task counters and the server-computed
/// percentage; single-entity responses omit them, so they default to zero
/// and are never merged over cached counters (`SyncState::merge_project`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub total_tasks: u32,
    #[serde(default)]
    pub completed_tasks: u32,
    #[serde(default)]
    pub progress_percentage: f64,
}

impl Entity for Project {
    type Id = ProjectId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Title and description submitted when creating or editing a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectDraft {
    pub title: String,
    pub description: Option<String>,
}

impl ProjectDraft {
    pub fn new(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            title: title.into(),
            description,
        }
    }

    /// Trimmed copy of the draft, rejected when the title is blank
    pub fn validated(&self) -> Result<Self, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::ProjectTitleRequired);
        }
        Ok(Self {
            title: title.to_string(),
            description: self.description.clone(),
        })
    }
}

// ========================
// Task
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
}

impl TaskStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, TaskStatus::Completed)
    }
}

/// Informational link from a task to its project (not an ownership link)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRef {
    pub id: ProjectId,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub project: Option<ProjectRef>,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }

    /// Id of the referenced project, if the server sent one
    pub fn project_id(&self) -> Option<ProjectId> {
        self.project.as_ref().map(|p| p.id)
    }
}

impl Entity for Task {
    type Id = TaskId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Payload for creating a task under a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    pub due_date: NaiveDate,
    pub status: TaskStatus,
}

impl TaskDraft {
    /// Pending task due today (local calendar date)
    pub fn due_today(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            due_date: Local::now().date_naive(),
            status: TaskStatus::Pending,
        }
    }

    pub fn validated(&self) -> Result<Self, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::TaskTitleRequired);
        }
        Ok(Self {
            title: title.to_string(),
            ..self.clone()
        })
    }
}

// ========================
// Auth payloads
// ========================

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}
