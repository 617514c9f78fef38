//! UI State Store
//!
//! Reactive mirror of the sync core's state. Views read from here with
//! field-level reactivity; the core stays the single writer and the store is
//! refreshed after every load, mutation or navigation.

use leptos::prelude::*;
use reactive_stores::Store;
use taskboard_sync::{Notice, PendingConfirmation, Project, SyncState, Task, View};

#[derive(Clone, Debug, Default, Store)]
pub struct UiState {
    /// View the user asked for (the guard still decides what renders)
    pub view: View,
    /// Dashboard project list
    pub projects: Vec<Project>,
    /// Open tasks due soon
    pub deadlines: Vec<Task>,
    /// Tasks of the open project
    pub tasks: Vec<Task>,
    /// Project shown in the detail view
    pub open_project: Option<Project>,
    /// Delete awaiting confirmation
    pub pending: PendingConfirmation,
    /// Toasts on screen
    pub notices: Vec<Notice>,
}

/// Type alias for the store
pub type UiStore = Store<UiState>;

/// Get the UI store from context
pub fn use_ui_store() -> UiStore {
    expect_context::<UiStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Copy the core's collections into the store
pub fn store_sync(store: &UiStore, state: &SyncState) {
    *store.projects().write() = state.projects.list().to_vec();
    *store.deadlines().write() = state.deadlines.list().to_vec();
    *store.tasks().write() = state.tasks.list().to_vec();
    *store.open_project().write() = state.current_project().cloned();
    *store.pending().write() = state.pending;
    *store.notices().write() = state.notices.iter().cloned().collect();
}

/// Record the requested view
pub fn store_set_view(store: &UiStore, view: View) {
    *store.view().write() = view;
}
