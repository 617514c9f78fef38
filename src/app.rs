//! Taskboard Frontend App
//!
//! Wires the sync core into context and switches between the three views.

use std::rc::Rc;

use leptos::prelude::*;
use reactive_stores::Store;
use taskboard_sync::{Guarded, Session, SyncConfig, View};

use crate::components::{ConfirmDeleteDialog, DashboardPage, LoginPage, NoticeStack, ProjectDetailPage};
use crate::context::{AppContext, Core};
use crate::storage::{self, LocalStorageTokens};
use crate::store::{UiState, UiStateStoreFields};

#[component]
pub fn App(config: SyncConfig) -> impl IntoView {
    let session = Rc::new(Session::new(LocalStorageTokens));
    let store = Store::new(UiState::default());
    let ctx = AppContext::new(Core::new(config, session), store);

    // Provide context to all children
    provide_context(ctx);
    provide_context(store);

    ctx.enter(storage::current_location());

    view! {
        <div class="app-layout">
            <NoticeStack />
            // The guard runs on every render, not only on navigation
            {move || {
                let requested = store.view().get();
                let view = match ctx.core().guard.require_auth(requested) {
                    Guarded::Render(view) => view,
                    Guarded::Redirect(to) => to,
                };
                match view {
                    View::SignIn => view! { <LoginPage /> }.into_any(),
                    View::Dashboard => view! { <DashboardPage /> }.into_any(),
                    View::ProjectDetail(id) => view! { <ProjectDetailPage id=id /> }.into_any(),
                }
            }}
            <ConfirmDeleteDialog />
        </div>
    }
}
