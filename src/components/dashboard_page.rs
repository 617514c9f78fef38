//! Dashboard Page Component
//!
//! Project cards, summary counters and upcoming deadlines.

use leptos::prelude::*;
use leptos::task::spawn_local;
use taskboard_sync::metrics::{self, DashboardSummary};
use taskboard_sync::{ProjectDraft, Task, View};

use crate::components::ProgressBar;
use crate::context::use_app_context;
use crate::store::UiStateStoreFields;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;

    // Full reload on every entry
    Effect::new(move |_| {
        let core = ctx.core();
        spawn_local(async move {
            let reports = core.loader.load_dashboard().await;
            log::debug!("[UI] dashboard loaded, {} failed", reports.iter().filter(|r| r.failed()).count());
            ctx.refresh();
        });
    });

    let (search, set_search) = signal(String::new());
    let (show_form, set_show_form) = signal(false);

    let summary = move || metrics::summarize(&store.projects().get());

    let project_cards = move || {
        let projects = store.projects().get();
        let query = search.get();
        metrics::search_projects(&projects, &query)
            .into_iter()
            .map(|project| {
                let id = project.id;
                let percent = metrics::rounded_percent(project.progress_percentage);
                let complete = metrics::is_complete(project);
                view! {
                    <div
                        class=if complete { "project-card complete" } else { "project-card" }
                        on:click=move |_| ctx.navigate(View::ProjectDetail(id))
                    >
                        <h3>{project.title.clone()}</h3>
                        <p class="project-desc">{project.description.clone().unwrap_or_default()}</p>
                        <ProgressBar percent=percent />
                        <span class="project-counts">
                            {format!("{}/{} tasks", project.completed_tasks, project.total_tasks)}
                        </span>
                    </div>
                }
            })
            .collect_view()
    };

    view! {
        <div class="dashboard">
            <header class="page-header">
                <h1>"Projects"</h1>
                <div class="header-actions">
                    <input
                        type="search"
                        placeholder="Search projects"
                        prop:value=move || search.get()
                        on:input=move |ev| set_search.set(event_target_value(&ev))
                    />
                    <button on:click=move |_| set_show_form.update(|v| *v = !*v)>"New Project"</button>
                    <button class="link-btn" on:click=move |_| ctx.sign_out()>"Log out"</button>
                </div>
            </header>

            <SummaryRow summary=Signal::derive(summary) />

            <Show when=move || show_form.get()>
                <NewProjectForm on_done=Callback::new(move |_| set_show_form.set(false)) />
            </Show>

            <section class="project-grid">{project_cards}</section>

            <DeadlineTable />
        </div>
    }
}

#[component]
fn SummaryRow(#[prop(into)] summary: Signal<DashboardSummary>) -> impl IntoView {
    view! {
        <div class="summary-row">
            <div class="summary-item">
                <span class="summary-value">{move || summary.get().total_projects}</span>
                <span class="summary-label">"Projects"</span>
            </div>
            <div class="summary-item">
                <span class="summary-value">{move || summary.get().total_tasks}</span>
                <span class="summary-label">"Tasks"</span>
            </div>
            <div class="summary-item">
                <span class="summary-value">{move || summary.get().completed_tasks}</span>
                <span class="summary-label">"Completed"</span>
            </div>
            <div class="summary-item">
                <span class="summary-value">{move || summary.get().pending_tasks}</span>
                <span class="summary-label">"Pending"</span>
            </div>
        </div>
    }
}

#[component]
fn NewProjectForm(#[prop(into)] on_done: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let (title, set_title) = signal(String::new());
    let (description, set_description) = signal(String::new());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let description = description.get_untracked();
        let draft = ProjectDraft::new(
            title.get_untracked(),
            (!description.trim().is_empty()).then_some(description),
        );
        let core = ctx.core();
        spawn_local(async move {
            let result = core.mutations.create_project(&draft).await;
            ctx.refresh();
            if result.is_ok() {
                set_title.set(String::new());
                set_description.set(String::new());
                on_done.run(());
            }
        });
    };

    view! {
        <form class="new-project-form" on:submit=on_submit>
            <input
                type="text"
                placeholder="Project title"
                prop:value=move || title.get()
                on:input=move |ev| set_title.set(event_target_value(&ev))
            />
            <textarea
                placeholder="Description (optional)"
                prop:value=move || description.get()
                on:input=move |ev| set_description.set(event_target_value(&ev))
            ></textarea>
            <div class="form-actions">
                <button type="button" class="cancel-btn" on:click=move |_| on_done.run(())>"Cancel"</button>
                <button type="submit">"Create"</button>
            </div>
        </form>
    }
}

#[component]
fn DeadlineTable() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;

    let open_task = move |task: &Task| match task.project_id() {
        Some(id) => ctx.navigate(View::ProjectDetail(id)),
        None => ctx.warn("Project details missing"),
    };

    let rows = move || {
        store
            .deadlines()
            .get()
            .into_iter()
            .map(|task| {
                let label = metrics::project_label(&task).to_string();
                let due = task
                    .due_date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "-".to_string());
                let title = task.title.clone();
                view! {
                    <tr class="deadline-row" on:click=move |_| open_task(&task)>
                        <td>{title}</td>
                        <td>{label}</td>
                        <td>{due}</td>
                    </tr>
                }
            })
            .collect_view()
    };

    view! {
        <section class="deadlines">
            <h2>"Upcoming Deadlines"</h2>
            <Show
                when=move || !store.deadlines().get().is_empty()
                fallback=|| view! { <p class="empty-hint">"Nothing due soon."</p> }
            >
                <table>
                    <thead>
                        <tr><th>"Task"</th><th>"Project"</th><th>"Due"</th></tr>
                    </thead>
                    <tbody>{rows}</tbody>
                </table>
            </Show>
        </section>
    }
}
