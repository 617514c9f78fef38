//! Project Detail Page Component
//!
//! One project with its task list: edit, delete, add and toggle tasks.

use leptos::prelude::*;
use leptos::task::spawn_local;
use taskboard_sync::metrics;
use taskboard_sync::{EntityKind, ProjectDraft, ProjectId, TaskDraft, View};

use crate::components::ProgressBar;
use crate::context::use_app_context;
use crate::store::UiStateStoreFields;

#[component]
pub fn ProjectDetailPage(id: ProjectId) -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;

    Effect::new(move |_| {
        let core = ctx.core();
        spawn_local(async move {
            core.loader.load_project(id).await;
            ctx.refresh();
        });
    });

    let (editing, set_editing) = signal(false);

    let progress = Signal::derive(move || metrics::rounded_percent(metrics::task_progress(&store.tasks().get())));

    view! {
        <div class="project-detail">
            <button class="link-btn" on:click=move |_| ctx.navigate(View::Dashboard)>"← Back to projects"</button>

            <Show
                when=move || store.open_project().get().is_some_and(|p| p.id == id)
                fallback=|| view! { <p class="loading">"Loading project..."</p> }
            >
                <header class="page-header">
                    <Show
                        when=move || editing.get()
                        fallback=move || view! {
                            <div class="project-heading">
                                <h1>{move || store.open_project().get().map(|p| p.title).unwrap_or_default()}</h1>
                                <p class="project-desc">
                                    {move || store.open_project().get().and_then(|p| p.description).unwrap_or_default()}
                                </p>
                            </div>
                            <div class="header-actions">
                                <button on:click=move |_| set_editing.set(true)>"Edit"</button>
                                <button
                                    class="danger"
                                    on:click=move |_| {
                                        ctx.core().mutations.request_delete(EntityKind::Project, id);
                                        ctx.refresh();
                                    }
                                >
                                    "Delete"
                                </button>
                            </div>
                        }
                    >
                        <EditProjectForm id=id on_done=Callback::new(move |_| set_editing.set(false)) />
                    </Show>
                </header>

                <ProgressBar percent=progress />

                <NewTaskForm project_id=id />
                <TaskList />
            </Show>
        </div>
    }
}

#[component]
fn EditProjectForm(id: ProjectId, #[prop(into)] on_done: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let current = ctx.store.open_project().get_untracked();

    let (title, set_title) = signal(current.as_ref().map(|p| p.title.clone()).unwrap_or_default());
    let (description, set_description) =
        signal(current.and_then(|p| p.description).unwrap_or_default());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let description = description.get_untracked();
        let draft = ProjectDraft::new(
            title.get_untracked(),
            (!description.trim().is_empty()).then_some(description),
        );
        let core = ctx.core();
        spawn_local(async move {
            let result = core.mutations.update_project(id, &draft).await;
            ctx.refresh();
            if result.is_ok() {
                on_done.run(());
            }
        });
    };

    view! {
        <form class="edit-project-form" on:submit=on_submit>
            <input
                type="text"
                prop:value=move || title.get()
                on:input=move |ev| set_title.set(event_target_value(&ev))
            />
            <textarea
                prop:value=move || description.get()
                on:input=move |ev| set_description.set(event_target_value(&ev))
            ></textarea>
            <div class="form-actions">
                <button type="button" class="cancel-btn" on:click=move |_| on_done.run(())>"Cancel"</button>
                <button type="submit">"Save"</button>
            </div>
        </form>
    }
}

#[component]
fn NewTaskForm(project_id: ProjectId) -> impl IntoView {
    let ctx = use_app_context();
    let (title, set_title) = signal(String::new());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = TaskDraft::due_today(title.get_untracked());
        let core = ctx.core();
        spawn_local(async move {
            let result = core.mutations.create_task(project_id, &draft).await;
            ctx.refresh();
            if result.is_ok() {
                set_title.set(String::new());
            }
        });
    };

    view! {
        <form class="new-task-form" on:submit=on_submit>
            <input
                type="text"
                placeholder="Add a task"
                prop:value=move || title.get()
                on:input=move |ev| set_title.set(event_target_value(&ev))
            />
            <button type="submit">"Add"</button>
        </form>
    }
}

#[component]
fn TaskList() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;

    let rows = move || {
        store
            .tasks()
            .get()
            .into_iter()
            .map(|task| {
                let task_id = task.id;
                let done = task.is_completed();
                view! {
                    <li class=if done { "task-row done" } else { "task-row" }>
                        <input
                            type="checkbox"
                            prop:checked=done
                            on:change=move |_| {
                                let core = ctx.core();
                                spawn_local(async move {
                                    if let Err(err) = core.mutations.toggle_task(task_id).await {
                                        log::debug!("[UI] toggle skipped: {}", err);
                                    }
                                    ctx.refresh();
                                });
                            }
                        />
                        <span class="task-title">{task.title}</span>
                        {task.due_date.map(|d| view! { <span class="task-due">{d.format("%Y-%m-%d").to_string()}</span> })}
                        <button
                            class="delete-btn"
                            on:click=move |_| {
                                ctx.core().mutations.request_delete(EntityKind::Task, task_id);
                                ctx.refresh();
                            }
                        >
                            "×"
                        </button>
                    </li>
                }
            })
            .collect_view()
    };

    view! {
        <Show
            when=move || !store.tasks().get().is_empty()
            fallback=|| view! { <p class="empty-hint">"No tasks yet."</p> }
        >
            <ul class="task-list">{rows}</ul>
        </Show>
    }
}
