//! Sync Scenario Tests
//!
//! Loader, mutations and auth driven against the scripted `FakeClient`.

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use serde_json::{json, Value};

    use crate::auth::Auth;
    use crate::error::{AuthError, ClientError, MutationError, ValidationError};
    use crate::loader::{Fetch, LoadOutcome, Loader};
    use crate::metrics;
    use crate::models::{Project, ProjectDraft, Registration, Task, TaskDraft, TaskStatus};
    use crate::mutation::{MutationKind, MutationOutcome, Mutations};
    use crate::notice::NoticeLevel;
    use crate::session::{Session, View};
    use crate::state::{EntityKind, PendingConfirmation, SharedState, SyncState};
    use crate::testing::{FakeClient, Method};

    fn project_json(id: u64, title: &str, total: u32, completed: u32) -> Value {
        json!({
            "id": id,
            "title": title,
            "description": "",
            "totalTasks": total,
            "completedTasks": completed,
            "progressPercentage": if total == 0 { 0.0 } else { completed as f64 / total as f64 * 100.0 }
        })
    }

    fn task_json(id: u64, title: &str, status: &str, project_id: u64) -> Value {
        json!({
            "id": id,
            "title": title,
            "status": status,
            "dueDate": "2024-06-01",
            "project": { "id": project_id, "title": "Launch" }
        })
    }

    fn task(id: u64, project_id: u64) -> Task {
        serde_json::from_value(task_json(id, &format!("Task {}", id), "PENDING", project_id)).unwrap()
    }

    fn transport_error() -> ClientError {
        ClientError::Transport("connection refused".to_string())
    }

    fn setup(client: FakeClient) -> (Rc<FakeClient>, SharedState) {
        (Rc::new(client), SyncState::shared())
    }

    fn last_notice(state: &SharedState) -> (NoticeLevel, String) {
        let state = state.borrow();
        let notice = state.notices.latest().expect("a notice should be queued");
        (notice.level, notice.message.clone())
    }

    // ========================
    // Load Orchestrator
    // ========================

    #[tokio::test]
    async fn test_dashboard_survives_failed_deadlines() {
        let (client, state) = setup(FakeClient::new());
        client
            .respond(Method::List, "projects", Ok(json!([project_json(1, "Launch", 2, 1)])))
            .respond(Method::List, "tasks/due-soon", Err(transport_error()));
        let loader = Loader::new(client.clone(), state.clone());

        let reports = loader.load_dashboard().await;

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].fetch, Fetch::Projects);
        assert!(reports[0].outcome.is_loaded());
        assert_eq!(reports[1].outcome, LoadOutcome::Failed(transport_error()));

        let state = state.borrow();
        assert_eq!(state.projects.len(), 1);
        assert_eq!(state.projects.get(1).unwrap().title, "Launch");
        assert!(state.deadlines.is_empty());
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_stale_slice() {
        let (client, state) = setup(FakeClient::new().with_latency(2));
        client
            .respond(Method::List, "projects", Err(transport_error()))
            .respond(Method::List, "tasks/due-soon", Ok(json!([task_json(5, "Ship", "PENDING", 1)])));
        state
            .borrow_mut()
            .projects
            .replace_all(vec![serde_json::from_value::<Project>(project_json(1, "Cached", 0, 0)).unwrap()]);
        let loader = Loader::new(client.clone(), state.clone());

        let reports = loader.load_dashboard().await;

        assert!(reports[0].failed());
        assert!(!reports[1].failed());
        let state = state.borrow();
        assert_eq!(state.projects.get(1).unwrap().title, "Cached");
        assert_eq!(state.deadlines.len(), 1);
        // both requests were issued even though one failed
        assert_eq!(client.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_project_load_failure_notifies_and_keeps_tasks() {
        let (client, state) = setup(FakeClient::new());
        client
            .respond(Method::Get, "projects/3", Err(ClientError::Status { status: 500, message: String::new() }))
            .respond(Method::List, "tasks/project/3", Ok(json!([task_json(8, "Draft", "PENDING", 3)])));
        let loader = Loader::new(client.clone(), state.clone());

        loader.load_project(3).await;

        assert_eq!(last_notice(&state), (NoticeLevel::Error, "Could not load project.".to_string()));
        let state = state.borrow();
        assert_eq!(state.open_project, Some(3));
        assert!(state.current_project().is_none());
        assert_eq!(state.tasks.len(), 1);
    }

    #[tokio::test]
    async fn test_switching_projects_drops_previous_tasks() {
        let (client, state) = setup(FakeClient::new());
        client
            .respond(Method::Get, "projects/2", Ok(project_json(2, "Other", 0, 0)))
            .respond(Method::List, "tasks/project/2", Err(transport_error()));
        {
            let mut state = state.borrow_mut();
            state.open_project = Some(1);
            state.tasks.replace_all(vec![task(1, 1)]);
        }
        let loader = Loader::new(client.clone(), state.clone());

        loader.load_project(2).await;

        let state = state.borrow();
        assert!(state.tasks.is_empty());
        assert_eq!(state.current_project().unwrap().title, "Other");
    }

    #[tokio::test]
    async fn test_opening_project_keeps_dashboard_counters() {
        let (client, state) = setup(FakeClient::new());
        client
            .respond(Method::List, "projects", Ok(json!([project_json(1, "Launch", 4, 1)])))
            .respond(Method::List, "tasks/due-soon", Ok(json!([])))
            .respond(Method::Get, "projects/1", Ok(json!({ "id": 1, "title": "Launch v2", "description": "Renamed" })))
            .respond(Method::List, "tasks/project/1", Ok(json!([])))
            .respond(Method::List, "projects", Err(transport_error()))
            .respond(Method::List, "tasks/due-soon", Ok(json!([])));
        let loader = Loader::new(client.clone(), state.clone());

        loader.load_dashboard().await;
        let before = metrics::summarize(state.borrow().projects.list());

        loader.load_project(1).await;
        let reports = loader.load_dashboard().await;
        assert!(reports[0].failed());

        let state = state.borrow();
        assert_eq!(metrics::summarize(state.projects.list()), before);
        assert_eq!(before.pending_tasks, 3);
        let project = state.projects.get(1).unwrap();
        assert_eq!(project.title, "Launch v2");
        assert_eq!(project.description.as_deref(), Some("Renamed"));
        assert_eq!(project.progress_percentage, 25.0);
    }

    // ========================
    // Mutation Orchestrator
    // ========================

    #[tokio::test]
    async fn test_blank_project_title_never_hits_network() {
        let (client, state) = setup(FakeClient::new());
        let mutations = Mutations::new(client.clone(), state.clone());

        let result = mutations.create_project(&ProjectDraft::new("   ", None)).await;

        assert_eq!(
            result,
            Err(MutationError::Validation(ValidationError::ProjectTitleRequired))
        );
        assert!(client.calls().is_empty());
        assert_eq!(last_notice(&state), (NoticeLevel::Warning, "Title is required!".to_string()));
        assert!(state.borrow().projects.is_empty());
    }

    #[tokio::test]
    async fn test_create_project_applies_server_entity() {
        let (client, state) = setup(FakeClient::new());
        client.respond(Method::Create, "projects", Ok(json!({ "id": 42, "title": "Website" })));
        let mutations = Mutations::new(client.clone(), state.clone());

        let outcome = mutations
            .create_project(&ProjectDraft::new("  Website ", Some("Q3".to_string())))
            .await
            .unwrap();

        match outcome {
            MutationOutcome::ProjectSaved(project) => assert_eq!(project.id, 42),
            other => panic!("unexpected outcome {:?}", other),
        }
        let calls = client.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].payload,
            Some(json!({ "title": "Website", "description": "Q3" }))
        );
        assert!(state.borrow().projects.contains(42));
        assert_eq!(last_notice(&state), (NoticeLevel::Success, "Project Created!".to_string()));
    }

    #[tokio::test]
    async fn test_failed_update_leaves_store_untouched() {
        let (client, state) = setup(FakeClient::new());
        client.respond(Method::Update, "projects/1", Err(transport_error()));
        state
            .borrow_mut()
            .projects
            .upsert(serde_json::from_value(project_json(1, "Original", 1, 0)).unwrap());
        let mutations = Mutations::new(client.clone(), state.clone());

        let result = mutations.update_project(1, &ProjectDraft::new("Renamed", None)).await;

        assert!(matches!(
            result,
            Err(MutationError::Remote { kind: MutationKind::UpdateProject, .. })
        ));
        assert_eq!(state.borrow().projects.get(1).unwrap().title, "Original");
        assert_eq!(last_notice(&state), (NoticeLevel::Error, "Failed to update project.".to_string()));
        assert!(!mutations.is_in_flight(MutationKind::UpdateProject, Some(1)));
    }

    #[tokio::test]
    async fn test_create_task_appends_returned_task() {
        let (client, state) = setup(FakeClient::new());
        client.respond(Method::Create, "tasks/project/1", Ok(task_json(9, "Write tests", "PENDING", 1)));
        {
            let mut state = state.borrow_mut();
            state.open_project = Some(1);
            state.tasks.upsert(task(1, 1));
        }
        let mutations = Mutations::new(client.clone(), state.clone());

        mutations.create_task(1, &TaskDraft::due_today("Write tests")).await.unwrap();

        let ids: Vec<u64> = state.borrow().tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 9]);
        let payload = client.calls()[0].payload.clone().unwrap();
        assert_eq!(payload["status"], "PENDING");
        assert!(payload["dueDate"].is_string());
    }

    #[tokio::test]
    async fn test_toggle_writes_back_server_state() {
        let (client, state) = setup(FakeClient::new());
        client.respond(Method::Patch, "tasks/1/complete", Ok(task_json(1, "Task 1", "COMPLETED", 1)));
        {
            let mut state = state.borrow_mut();
            state.tasks.upsert(task(1, 1));
            state.deadlines.upsert(task(1, 1));
        }
        let mutations = Mutations::new(client.clone(), state.clone());

        mutations.toggle_task(1).await.unwrap();

        let state = state.borrow();
        assert_eq!(state.tasks.get(1).unwrap().status, TaskStatus::Completed);
        assert!(!state.deadlines.contains(1));
        assert_eq!(client.count(Method::Patch, "tasks/1/complete"), 1);
    }

    #[tokio::test]
    async fn test_update_project_keeps_counters() {
        let (client, state) = setup(FakeClient::new());
        client.respond(Method::Update, "projects/1", Ok(json!({ "id": 1, "title": "Renamed" })));
        state
            .borrow_mut()
            .projects
            .upsert(serde_json::from_value(project_json(1, "Original", 4, 2)).unwrap());
        let mutations = Mutations::new(client.clone(), state.clone());

        let outcome = mutations.update_project(1, &ProjectDraft::new("Renamed", None)).await.unwrap();

        let saved = match outcome {
            MutationOutcome::ProjectSaved(project) => project,
            other => panic!("unexpected outcome {:?}", other),
        };
        assert_eq!(saved.title, "Renamed");
        assert_eq!((saved.total_tasks, saved.completed_tasks), (4, 2));
        assert_eq!(state.borrow().projects.get(1), Some(&saved));
    }

    #[tokio::test]
    async fn test_task_mutations_for_closed_project_skip_task_list() {
        let (client, state) = setup(FakeClient::new());
        client
            .respond(Method::Create, "tasks/project/1", Ok(task_json(9, "Late", "PENDING", 1)))
            .respond(Method::Patch, "tasks/5/complete", Ok(task_json(5, "Task 5", "COMPLETED", 1)));
        state.borrow_mut().open_project = Some(2);
        let mutations = Mutations::new(client.clone(), state.clone());

        assert!(mutations.create_task(1, &TaskDraft::due_today("Late")).await.is_ok());
        assert!(mutations.toggle_task(5).await.is_ok());

        assert!(state.borrow().tasks.is_empty());
        assert_eq!(client.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_switching_project_while_task_create_in_flight() {
        let (client, state) = setup(FakeClient::new().with_latency(3));
        client
            .respond(Method::Create, "tasks/project/1", Ok(task_json(9, "Late", "PENDING", 1)))
            .respond(Method::Get, "projects/2", Ok(project_json(2, "Other", 0, 0)))
            .respond(Method::List, "tasks/project/2", Ok(json!([task_json(20, "Theirs", "PENDING", 2)])));
        {
            let mut state = state.borrow_mut();
            state.open_project = Some(1);
            state.tasks.upsert(task(1, 1));
        }
        let mutations = Mutations::new(client.clone(), state.clone());
        let loader = Loader::new(client.clone(), state.clone());

        let draft = TaskDraft::due_today("Late");
        let (created, _) = futures::join!(
            mutations.create_task(1, &draft),
            loader.load_project(2)
        );

        assert!(created.is_ok());
        let state = state.borrow();
        assert_eq!(state.open_project, Some(2));
        let ids: Vec<u64> = state.tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![20]);
    }

    #[tokio::test]
    async fn test_second_toggle_on_same_task_is_rejected() {
        let (client, state) = setup(FakeClient::new().with_latency(3));
        client.respond(Method::Patch, "tasks/1/complete", Ok(task_json(1, "Task 1", "COMPLETED", 1)));
        state.borrow_mut().tasks.upsert(task(1, 1));
        let mutations = Mutations::new(client.clone(), state.clone());

        let (first, second) = futures::join!(mutations.toggle_task(1), mutations.toggle_task(1));

        assert!(first.is_ok());
        assert_eq!(second, Err(MutationError::Busy { kind: MutationKind::ToggleTask }));
        assert_eq!(client.count(Method::Patch, "tasks/1/complete"), 1);

        // the guard is released once the first request settles
        client.respond(Method::Patch, "tasks/1/complete", Ok(task_json(1, "Task 1", "PENDING", 1)));
        assert!(mutations.toggle_task(1).await.is_ok());
    }

    #[tokio::test]
    async fn test_different_targets_run_concurrently() {
        let (client, state) = setup(FakeClient::new().with_latency(2));
        client
            .respond(Method::Patch, "tasks/1/complete", Ok(task_json(1, "Task 1", "COMPLETED", 1)))
            .respond(Method::Patch, "tasks/2/complete", Ok(task_json(2, "Task 2", "COMPLETED", 1)));
        state.borrow_mut().open_project = Some(1);
        let mutations = Mutations::new(client.clone(), state.clone());

        let (a, b) = futures::join!(mutations.toggle_task(1), mutations.toggle_task(2));

        assert!(a.is_ok() && b.is_ok());
        assert_eq!(state.borrow().tasks.len(), 2);
    }

    #[tokio::test]
    async fn test_task_delete_requires_confirmation() {
        let (client, state) = setup(FakeClient::new());
        client.respond(Method::Delete, "tasks/1", Ok(Value::Null));
        state.borrow_mut().tasks.upsert(task(1, 1));
        let mutations = Mutations::new(client.clone(), state.clone());

        mutations.request_delete(EntityKind::Task, 1);
        assert_eq!(
            state.borrow().pending,
            PendingConfirmation::ConfirmingDelete(EntityKind::Task, 1)
        );
        assert_eq!(mutations.cancel_delete(), MutationOutcome::ConfirmationAborted);
        assert!(state.borrow().tasks.contains(1));
        assert!(client.calls().is_empty());

        mutations.request_delete(EntityKind::Task, 1);
        let outcome = mutations.confirm_delete().await.unwrap();

        assert_eq!(outcome, MutationOutcome::Deleted(EntityKind::Task, 1));
        assert!(!state.borrow().tasks.contains(1));
        assert_eq!(state.borrow().pending, PendingConfirmation::None);
        assert_eq!(client.count(Method::Delete, "tasks/1"), 1);
    }

    #[tokio::test]
    async fn test_confirm_without_request_is_an_error() {
        let (client, state) = setup(FakeClient::new());
        let mutations = Mutations::new(client.clone(), state);

        assert_eq!(mutations.confirm_delete().await, Err(MutationError::NothingToConfirm));
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_project_delete_drops_related_cache() {
        let (client, state) = setup(FakeClient::new());
        client.respond(Method::Delete, "projects/1", Ok(Value::Null));
        {
            let mut state = state.borrow_mut();
            state.projects.upsert(serde_json::from_value(project_json(1, "Launch", 2, 0)).unwrap());
            state.projects.upsert(serde_json::from_value(project_json(2, "Keep", 0, 0)).unwrap());
            state.open_project = Some(1);
            state.tasks.replace_all(vec![task(1, 1), task(2, 1)]);
            state.deadlines.replace_all(vec![task(1, 1), task(7, 2)]);
        }
        let mutations = Mutations::new(client.clone(), state.clone());

        mutations.request_delete(EntityKind::Project, 1);
        let outcome = mutations.confirm_delete().await.unwrap();

        assert_eq!(outcome, MutationOutcome::Deleted(EntityKind::Project, 1));
        let state = state.borrow();
        assert!(!state.projects.contains(1));
        assert!(state.projects.contains(2));
        assert!(state.tasks.is_empty());
        assert_eq!(state.open_project, None);
        let deadline_ids: Vec<u64> = state.deadlines.iter().map(|t| t.id).collect();
        assert_eq!(deadline_ids, vec![7]);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_entity() {
        let (client, state) = setup(FakeClient::new());
        client.respond(Method::Delete, "tasks/1", Err(transport_error()));
        state.borrow_mut().tasks.upsert(task(1, 1));
        let mutations = Mutations::new(client.clone(), state.clone());

        mutations.request_delete(EntityKind::Task, 1);
        assert!(mutations.confirm_delete().await.is_err());

        assert!(state.borrow().tasks.contains(1));
        assert_eq!(last_notice(&state), (NoticeLevel::Error, "Error deleting task.".to_string()));
    }

    // ========================
    // Auth
    // ========================

    fn registration(password: &str) -> Registration {
        Registration {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_weak_password_is_rejected_locally() {
        let (client, state) = setup(FakeClient::new());
        let auth = Auth::new(client.clone(), Rc::new(Session::in_memory()), state);

        let result = auth.register(&registration("abcdef")).await;

        assert_eq!(
            result,
            Err(AuthError::Validation(ValidationError::PasswordMissingSpecial))
        );
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_valid_password_reaches_network() {
        let (client, state) = setup(FakeClient::new());
        client.respond(Method::Create, "auth/register", Ok(json!({ "message": "ok" })));
        let auth = Auth::new(client.clone(), Rc::new(Session::in_memory()), state.clone());

        auth.register(&registration("abc@123")).await.unwrap();

        assert_eq!(client.count(Method::Create, "auth/register"), 1);
        assert_eq!(
            last_notice(&state),
            (NoticeLevel::Success, "Registration Successful! Please login.".to_string())
        );
    }

    #[tokio::test]
    async fn test_registration_failures_are_told_apart() {
        let (client, state) = setup(FakeClient::new());
        client
            .respond(Method::Create, "auth/register", Err(ClientError::Status { status: 400, message: "taken".into() }))
            .respond(Method::Create, "auth/register", Err(transport_error()));
        let auth = Auth::new(client.clone(), Rc::new(Session::in_memory()), state);

        assert_eq!(auth.register(&registration("abc@123")).await, Err(AuthError::AccountExists));
        assert_eq!(
            auth.register(&registration("abc@123")).await,
            Err(AuthError::RegistrationFailed(transport_error()))
        );
    }

    #[tokio::test]
    async fn test_login_initialises_session() {
        let (client, state) = setup(FakeClient::new());
        client
            .respond(Method::Create, "auth/login", Ok(json!({ "token": "jwt-123" })))
            .respond(Method::Create, "auth/login", Err(ClientError::Status { status: 401, message: String::new() }));
        let session = Rc::new(Session::in_memory());
        let auth = Auth::new(client.clone(), session.clone(), state);

        assert_eq!(auth.login("ada@example.com", "abc@123").await, Ok(View::Dashboard));
        assert_eq!(session.token().as_deref(), Some("jwt-123"));
        assert_eq!(
            client.calls()[0].payload,
            Some(json!({ "email": "ada@example.com", "password": "abc@123" }))
        );

        assert!(matches!(
            auth.login("ada@example.com", "wrong").await,
            Err(AuthError::LoginFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_double_submit_sends_one_registration() {
        let (client, state) = setup(FakeClient::new().with_latency(3));
        client.respond(Method::Create, "auth/register", Ok(json!({ "message": "ok" })));
        let auth = Auth::new(client.clone(), Rc::new(Session::in_memory()), state.clone());
        let form = registration("abc@123");

        let (first, second) = futures::join!(auth.register(&form), auth.register(&form));

        assert_eq!(first, Ok(()));
        assert_eq!(second, Err(AuthError::Busy));
        assert_eq!(client.count(Method::Create, "auth/register"), 1);
        assert_eq!(
            last_notice(&state),
            (NoticeLevel::Success, "Registration Successful! Please login.".to_string())
        );
    }

    #[tokio::test]
    async fn test_double_submit_sends_one_login() {
        let (client, state) = setup(FakeClient::new().with_latency(3));
        client.respond(Method::Create, "auth/login", Ok(json!({ "token": "jwt-1" })));
        let auth = Auth::new(client.clone(), Rc::new(Session::in_memory()), state);

        let (first, second) = futures::join!(
            auth.login("ada@example.com", "abc@123"),
            auth.login("ada@example.com", "abc@123")
        );

        assert_eq!(first, Ok(View::Dashboard));
        assert_eq!(second, Err(AuthError::Busy));
        assert_eq!(client.count(Method::Create, "auth/login"), 1);
    }
}
