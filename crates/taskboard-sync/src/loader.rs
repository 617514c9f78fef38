//! Load Orchestrator
//!
//! Issues independent fetches concurrently and waits for all of them to
//! settle. Each outcome lands in its own slice of the state as soon as it
//! arrives; a failed fetch leaves its slice as it was (stale but present).
//! Nothing is retried here.

use std::rc::Rc;

use futures::future::join_all;

use crate::client::{Api, ResourceClient};
use crate::error::ClientError;
use crate::models::{Project, ProjectId, Task};
use crate::state::SharedState;

/// One independent fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fetch {
    /// All projects with their task counters
    Projects,
    /// Open tasks due within the next week
    DueSoon,
    Project(ProjectId),
    ProjectTasks(ProjectId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Projects(Vec<Project>),
    Project(Project),
    Tasks(Vec<Task>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(Payload),
    Failed(ClientError),
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub fetch: Fetch,
    pub outcome: LoadOutcome,
}

impl LoadReport {
    pub fn failed(&self) -> bool {
        !self.outcome.is_loaded()
    }
}

pub struct Loader<C> {
    api: Api<C>,
    state: SharedState,
}

impl<C: ResourceClient> Loader<C> {
    pub fn new(client: Rc<C>, state: SharedState) -> Self {
        Self {
            api: Api::new(client),
            state,
        }
    }

    /// Run every fetch concurrently; one report per request, in request order
    pub async fn load_all(&self, requests: &[Fetch]) -> Vec<LoadReport> {
        let pending = requests.iter().map(move |&fetch| async move {
            let outcome = match self.fetch(fetch).await {
                Ok(payload) => {
                    self.apply(fetch, payload.clone());
                    LoadOutcome::Loaded(payload)
                }
                Err(err) => {
                    log::warn!("[LOAD] {:?} failed, keeping previous data: {}", fetch, err);
                    LoadOutcome::Failed(err)
                }
            };
            LoadReport { fetch, outcome }
        });
        join_all(pending).await
    }

    /// Dashboard entry: projects and upcoming deadlines, independently
    pub async fn load_dashboard(&self) -> Vec<LoadReport> {
        self.load_all(&[Fetch::Projects, Fetch::DueSoon]).await
    }

    /// Project detail entry: the project and its tasks
    pub async fn load_project(&self, id: ProjectId) -> Vec<LoadReport> {
        {
            let mut state = self.state.borrow_mut();
            if state.open_project != Some(id) {
                // tasks of another project must not show up under this one
                state.tasks.clear();
                state.open_project = Some(id);
            }
        }

        let reports = self.load_all(&[Fetch::Project(id), Fetch::ProjectTasks(id)]).await;
        if reports.iter().any(|r| r.fetch == Fetch::Project(id) && r.failed()) {
            self.state.borrow_mut().notices.error("Could not load project.");
        }
        reports
    }

    async fn fetch(&self, fetch: Fetch) -> Result<Payload, ClientError> {
        log::debug!("[LOAD] fetching {:?}", fetch);
        match fetch {
            Fetch::Projects => self.api.list_projects().await.map(Payload::Projects),
            Fetch::DueSoon => self.api.list_due_soon().await.map(Payload::Tasks),
            Fetch::Project(id) => self.api.get_project(id).await.map(Payload::Project),
            Fetch::ProjectTasks(id) => self.api.list_project_tasks(id).await.map(Payload::Tasks),
        }
    }

    fn apply(&self, fetch: Fetch, payload: Payload) {
        let mut state = self.state.borrow_mut();
        match (fetch, payload) {
            (Fetch::Projects, Payload::Projects(projects)) => {
                log::info!("[LOAD] {} projects", projects.len());
                state.projects.replace_all(projects);
            }
            (Fetch::DueSoon, Payload::Tasks(tasks)) => {
                log::info!("[LOAD] {} tasks due soon", tasks.len());
                state.deadlines.replace_all(tasks);
            }
            (Fetch::Project(_), Payload::Project(project)) => {
                state.merge_project(project);
            }
            (Fetch::ProjectTasks(id), Payload::Tasks(tasks)) => {
                // the user may have navigated elsewhere while this was in flight
                if state.open_project == Some(id) {
                    log::info!("[LOAD] {} tasks for project {}", tasks.len(), id);
                    state.tasks.replace_all(tasks);
                }
            }
            (fetch, _) => log::warn!("[LOAD] payload does not match {:?}", fetch),
        }
    }
}
