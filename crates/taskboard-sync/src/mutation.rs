//! Mutation Orchestrator
//!
//! Every create/update/delete/toggle goes through the same steps:
//! validate locally, send exactly one request, then reconcile the cache with
//! the entity the server returned. Nothing is applied optimistically and
//! failures leave the cache untouched. Deletes wait for an explicit
//! confirmation first.

use std::fmt;
use std::future::Future;
use std::rc::Rc;

use crate::client::{Api, ResourceClient};
use crate::error::{ClientResult, MutationError, ValidationError};
use crate::in_flight::InFlight;
use crate::models::{Project, ProjectDraft, ProjectId, Task, TaskDraft, TaskId};
use crate::state::{EntityKind, PendingConfirmation, SharedState, SyncState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    CreateProject,
    UpdateProject,
    DeleteProject,
    CreateTask,
    ToggleTask,
    DeleteTask,
}

impl MutationKind {
    fn failure_message(&self) -> &'static str {
        match self {
            MutationKind::CreateProject => "Error creating project",
            MutationKind::UpdateProject => "Failed to update project.",
            MutationKind::DeleteProject => "Failed to delete project.",
            MutationKind::CreateTask => "Error adding task.",
            MutationKind::ToggleTask => "Error updating task.",
            MutationKind::DeleteTask => "Error deleting task.",
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MutationKind::CreateProject => "project create",
            MutationKind::UpdateProject => "project update",
            MutationKind::DeleteProject => "project delete",
            MutationKind::CreateTask => "task create",
            MutationKind::ToggleTask => "task toggle",
            MutationKind::DeleteTask => "task delete",
        };
        write!(f, "{}", name)
    }
}

/// What a finished mutation did to the cache
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    ProjectSaved(Project),
    TaskSaved(Task),
    Deleted(EntityKind, u64),
    /// The user backed out of a delete; nothing happened
    ConfirmationAborted,
}

// ========================
// Orchestrator
// ========================

pub struct Mutations<C> {
    api: Api<C>,
    state: SharedState,
    /// Outstanding targets keyed by kind. Creations have no id yet: a project
    /// create targets `None`, a task create targets its project.
    in_flight: InFlight<(MutationKind, Option<u64>)>,
}

impl<C: ResourceClient> Mutations<C> {
    pub fn new(client: Rc<C>, state: SharedState) -> Self {
        Self {
            api: Api::new(client),
            state,
            in_flight: InFlight::default(),
        }
    }

    /// True while a request of this kind is outstanding for the target
    pub fn is_in_flight(&self, kind: MutationKind, target: Option<u64>) -> bool {
        self.in_flight.is_active((kind, target))
    }

    // ------------------------
    // Projects
    // ------------------------

    pub async fn create_project(&self, draft: &ProjectDraft) -> Result<MutationOutcome, MutationError> {
        let draft = self.validate(draft.validated())?;
        self.commit(
            MutationKind::CreateProject,
            None,
            self.api.create_project(&draft),
            |state, project: Project| {
                state.projects.upsert(project.clone());
                ("Project Created!".to_string(), MutationOutcome::ProjectSaved(project))
            },
        )
        .await
    }

    pub async fn update_project(
        &self,
        id: ProjectId,
        draft: &ProjectDraft,
    ) -> Result<MutationOutcome, MutationError> {
        let draft = self.validate(draft.validated())?;
        self.commit(
            MutationKind::UpdateProject,
            Some(id),
            self.api.update_project(id, &draft),
            |state, project: Project| {
                let project = state.merge_project(project);
                (
                    "Project updated successfully!".to_string(),
                    MutationOutcome::ProjectSaved(project),
                )
            },
        )
        .await
    }

    // ------------------------
    // Tasks
    // ------------------------

    pub async fn create_task(
        &self,
        project_id: ProjectId,
        draft: &TaskDraft,
    ) -> Result<MutationOutcome, MutationError> {
        let draft = self.validate(draft.validated())?;
        self.commit(
            MutationKind::CreateTask,
            Some(project_id),
            self.api.create_task(project_id, &draft),
            |state, task: Task| {
                // the user may have opened another project meanwhile
                if state.open_project == Some(project_id) {
                    state.tasks.upsert(task.clone());
                }
                ("Task added!".to_string(), MutationOutcome::TaskSaved(task))
            },
        )
        .await
    }

    /// Flip completion server-side and write back the returned task verbatim
    pub async fn toggle_task(&self, id: TaskId) -> Result<MutationOutcome, MutationError> {
        self.commit(
            MutationKind::ToggleTask,
            Some(id),
            self.api.toggle_task(id),
            |state, task: Task| {
                state.merge_task(task.clone());
                let message = if task.is_completed() {
                    // due-soon only lists open tasks
                    state.deadlines.remove(task.id);
                    "Task marked as completed."
                } else {
                    if state.deadlines.contains(task.id) {
                        state.deadlines.upsert(task.clone());
                    }
                    "Task reopened."
                };
                (message.to_string(), MutationOutcome::TaskSaved(task))
            },
        )
        .await
    }

    // ------------------------
    // Confirmation-gated deletes
    // ------------------------

    /// Enter the confirm step for a delete. No request is made.
    pub fn request_delete(&self, kind: EntityKind, id: u64) {
        log::debug!("[MUTATION] awaiting confirmation to delete {} {}", kind, id);
        self.state.borrow_mut().pending = PendingConfirmation::ConfirmingDelete(kind, id);
    }

    /// Back out of the pending delete without side effects
    pub fn cancel_delete(&self) -> MutationOutcome {
        self.state.borrow_mut().pending = PendingConfirmation::None;
        MutationOutcome::ConfirmationAborted
    }

    /// Carry out the pending delete
    pub async fn confirm_delete(&self) -> Result<MutationOutcome, MutationError> {
        let pending = std::mem::take(&mut self.state.borrow_mut().pending);
        match pending {
            PendingConfirmation::None => Err(MutationError::NothingToConfirm),
            PendingConfirmation::ConfirmingDelete(EntityKind::Project, id) => {
                self.commit(
                    MutationKind::DeleteProject,
                    Some(id),
                    self.api.delete_project(id),
                    |state, ()| {
                        remove_project(state, id);
                        ("Project deleted.".to_string(), MutationOutcome::Deleted(EntityKind::Project, id))
                    },
                )
                .await
            }
            PendingConfirmation::ConfirmingDelete(EntityKind::Task, id) => {
                self.commit(
                    MutationKind::DeleteTask,
                    Some(id),
                    self.api.delete_task(id),
                    |state, ()| {
                        state.tasks.remove(id);
                        state.deadlines.remove(id);
                        ("Task deleted.".to_string(), MutationOutcome::Deleted(EntityKind::Task, id))
                    },
                )
                .await
            }
        }
    }

    // ------------------------
    // Shared steps
    // ------------------------

    /// Surface a failed precondition as a warning notice
    fn validate<T>(&self, checked: Result<T, ValidationError>) -> Result<T, MutationError> {
        checked.map_err(|err| {
            log::warn!("[MUTATION] rejected locally: {}", err);
            self.state.borrow_mut().notices.warning(err.to_string());
            MutationError::from(err)
        })
    }

    /// InFlight -> Committed | Failed.
    ///
    /// The request future is lazy, so a busy target never reaches the network.
    async fn commit<T, F>(
        &self,
        kind: MutationKind,
        target: Option<u64>,
        request: F,
        apply: impl FnOnce(&mut SyncState, T) -> (String, MutationOutcome),
    ) -> Result<MutationOutcome, MutationError>
    where
        F: Future<Output = ClientResult<T>>,
    {
        let Some(_guard) = self.in_flight.begin((kind, target)) else {
            log::warn!("[MUTATION] {} rejected, {:?} already in flight", kind, target);
            return Err(MutationError::Busy { kind });
        };
        log::debug!("[MUTATION] {} {:?} in flight", kind, target);

        match request.await {
            Ok(value) => {
                let mut state = self.state.borrow_mut();
                let (message, outcome) = apply(&mut *state, value);
                state.notices.success(message);
                log::info!("[MUTATION] {} {:?} committed", kind, target);
                Ok(outcome)
            }
            Err(source) => {
                log::warn!("[MUTATION] {} {:?} failed: {}", kind, target, source);
                self.state.borrow_mut().notices.error(kind.failure_message());
                Err(MutationError::Remote { kind, source })
            }
        }
    }
}

/// Drop a deleted project and everything cached under it
fn remove_project(state: &mut SyncState, id: ProjectId) {
    state.projects.remove(id);
    state.deadlines.retain(|task| task.project_id() != Some(id));
    if state.open_project == Some(id) {
        state.open_project = None;
        state.tasks.clear();
    }
}
