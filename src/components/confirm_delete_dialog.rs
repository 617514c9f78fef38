//! Confirm Delete Dialog Component
//!
//! Modal shown while a delete awaits confirmation. Nothing is sent until
//! the user confirms.

use leptos::prelude::*;
use leptos::task::spawn_local;
use taskboard_sync::{EntityKind, MutationOutcome, PendingConfirmation, View};

use crate::context::use_app_context;
use crate::store::UiStateStoreFields;

#[component]
pub fn ConfirmDeleteDialog() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;

    let message = move || match store.pending().get() {
        PendingConfirmation::ConfirmingDelete(EntityKind::Project, id) => {
            let title = store
                .projects()
                .get()
                .into_iter()
                .find(|p| p.id == id)
                .or_else(|| store.open_project().get())
                .map(|p| p.title)
                .unwrap_or_default();
            format!(
                "Are you sure you want to delete \"{}\"? This action cannot be undone and will remove all tasks inside it.",
                title
            )
        }
        PendingConfirmation::ConfirmingDelete(EntityKind::Task, _) => {
            "Are you sure you want to delete this task?".to_string()
        }
        PendingConfirmation::None => String::new(),
    };

    let on_confirm = move |_| {
        let core = ctx.core();
        spawn_local(async move {
            match core.mutations.confirm_delete().await {
                Ok(MutationOutcome::Deleted(EntityKind::Project, _)) => ctx.navigate(View::Dashboard),
                Ok(_) => ctx.refresh(),
                Err(err) => {
                    log::warn!("[UI] delete not completed: {}", err);
                    ctx.refresh();
                }
            }
        });
    };

    let on_cancel = move |_| {
        ctx.core().mutations.cancel_delete();
        ctx.refresh();
    };

    view! {
        <Show when=move || store.pending().get().is_pending()>
            <div class="modal-backdrop" on:click=on_cancel>
                <div class="modal" on:click=|ev| ev.stop_propagation()>
                    <h3>"Delete?"</h3>
                    <p>{message}</p>
                    <div class="modal-actions">
                        <button class="cancel-btn" on:click=on_cancel>"Cancel"</button>
                        <button class="confirm-btn danger" on:click=on_confirm>"Delete"</button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
