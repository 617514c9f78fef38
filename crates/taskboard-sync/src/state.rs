//! Shared Client State
//!
//! Everything the views read: the cached collections, the open project,
//! the pending delete confirmation and the notice queue.
//!
//! All access happens on the single UI thread. Borrows must never be held
//! across an `.await`.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::collection::Collection;
use crate::models::{Project, ProjectId, Task};
use crate::notice::Notices;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Project,
    Task,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Project => write!(f, "project"),
            EntityKind::Task => write!(f, "task"),
        }
    }
}

/// Destructive action waiting for the user's go-ahead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PendingConfirmation {
    #[default]
    None,
    ConfirmingDelete(EntityKind, u64),
}

impl PendingConfirmation {
    pub fn is_pending(&self) -> bool {
        !matches!(self, PendingConfirmation::None)
    }
}

#[derive(Debug, Default)]
pub struct SyncState {
    /// Dashboard project list
    pub projects: Collection<Project>,
    /// Dashboard "due soon" tasks across all projects
    pub deadlines: Collection<Task>,
    /// Tasks of the open project
    pub tasks: Collection<Task>,
    /// Project shown in the detail view
    pub open_project: Option<ProjectId>,
    pub pending: PendingConfirmation,
    pub notices: Notices,
}

impl SyncState {
    pub fn shared() -> SharedState {
        Rc::new(RefCell::new(Self::default()))
    }

    /// The open project, if it has been loaded
    pub fn current_project(&self) -> Option<&Project> {
        self.open_project.and_then(|id| self.projects.get(id))
    }

    /// Merge a single-project response.
    ///
    /// Only the list endpoint carries task counters, so an entry already
    /// cached keeps its counters and takes the editable fields. Returns the
    /// entry as stored.
    pub fn merge_project(&mut self, project: Project) -> Project {
        match self.projects.get_mut(project.id) {
            Some(cached) => {
                cached.title = project.title;
                cached.description = project.description;
                if project.created_at.is_some() {
                    cached.created_at = project.created_at;
                }
                cached.clone()
            }
            None => {
                self.projects.upsert(project.clone());
                project
            }
        }
    }

    /// Write back a task returned by the server.
    ///
    /// The task list only holds the open project's tasks, so a task of any
    /// other project is ignored unless it is already listed.
    pub fn merge_task(&mut self, task: Task) {
        let belongs = self.open_project.is_some() && task.project_id() == self.open_project;
        if belongs || self.tasks.contains(task.id) {
            self.tasks.upsert(task);
        }
    }

    /// Forget everything tied to the signed-in user
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

pub type SharedState = Rc<RefCell<SyncState>>;
