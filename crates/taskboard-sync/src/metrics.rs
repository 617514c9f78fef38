//! Derived Metrics
//!
//! Pure functions over cached entities. Nothing here is stored; callers
//! recompute on every render.

use crate::models::{Project, Task};

/// Dashboard counters summed over the loaded projects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardSummary {
    pub total_projects: usize,
    pub total_tasks: u32,
    pub completed_tasks: u32,
    pub pending_tasks: u32,
}

pub fn summarize(projects: &[Project]) -> DashboardSummary {
    let total_tasks: u32 = projects.iter().map(|p| p.total_tasks).sum();
    let completed_tasks: u32 = projects.iter().map(|p| p.completed_tasks).sum();
    DashboardSummary {
        total_projects: projects.len(),
        total_tasks,
        completed_tasks,
        // a malformed project (completed > total) must not underflow
        pending_tasks: total_tasks.saturating_sub(completed_tasks),
    }
}

/// Share of completed tasks in percent, unrounded; 0 for an empty list
pub fn task_progress(tasks: &[Task]) -> f64 {
    if tasks.is_empty() {
        return 0.0;
    }
    let completed = tasks.iter().filter(|t| t.is_completed()).count();
    completed as f64 / tasks.len() as f64 * 100.0
}

/// Round a percentage for display
pub fn rounded_percent(percent: f64) -> u32 {
    percent.round().clamp(0.0, 100.0) as u32
}

/// Case-insensitive title filter; an empty query matches everything
pub fn search_projects<'a>(projects: &'a [Project], query: &str) -> Vec<&'a Project> {
    let needle = query.to_lowercase();
    projects
        .iter()
        .filter(|p| p.title.to_lowercase().contains(&needle))
        .collect()
}

/// Whether the server reports every task of the project as done
pub fn is_complete(project: &Project) -> bool {
    project.progress_percentage >= 100.0
}

/// Project title for a task row, `...` when the reference is missing
pub fn project_label(task: &Task) -> &str {
    match &task.project {
        Some(project) if !project.title.is_empty() => &project.title,
        _ => "...",
    }
}
