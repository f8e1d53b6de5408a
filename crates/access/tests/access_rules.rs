//! Ownership, cap and status rules of the access layer, run against the
//! in-memory store.

use assert_matches::assert_matches;
use tracker_access::tasks::FOREIGN_PROJECT_DENIAL;
use tracker_access::{AccessError, ProjectAccess, TaskAccess};
use tracker_core::error::CoreError;
use tracker_core::task::TaskStatus;
use tracker_core::types::DbId;
use tracker_db::models::project::{CreateProject, UpdateProject};
use tracker_db::models::task::{CreateTask, UpdateTask};
use tracker_db::models::user::CreateUser;
use tracker_db::{MemoryStore, TrackerStore};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn user(store: &MemoryStore, email: &str) -> DbId {
    store
        .create_user(&CreateUser {
            name: "Ann".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            country: "US".to_string(),
        })
        .await
        .unwrap()
        .id
}

fn project_input(title: &str) -> CreateProject {
    CreateProject {
        title: title.to_string(),
        description: "Things to do".to_string(),
    }
}

fn task_input(project_id: DbId, status: Option<TaskStatus>) -> CreateTask {
    CreateTask {
        title: "Buy milk".to_string(),
        description: "2 litres".to_string(),
        status,
        project_id: Some(project_id),
    }
}

async fn project(store: &MemoryStore, owner: DbId, title: &str) -> DbId {
    ProjectAccess::create(store, owner, &project_input(title))
        .await
        .unwrap()
        .id
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_project_sets_owner() {
    let store = MemoryStore::new();
    let ann = user(&store, "ann@x.com").await;

    let created = ProjectAccess::create(&store, ann, &project_input("Home"))
        .await
        .unwrap();

    assert_eq!(created.owner_id, ann);
    assert_eq!(created.title, "Home");
    assert_eq!(ProjectAccess::list(&store, ann).await.unwrap(), vec![created]);
}

#[tokio::test]
async fn blank_project_title_is_rejected() {
    let store = MemoryStore::new();
    let ann = user(&store, "ann@x.com").await;

    let err = ProjectAccess::create(&store, ann, &project_input("   "))
        .await
        .unwrap_err();

    assert_matches!(err, AccessError::Core(CoreError::Validation(ref m)) if m == "Title is required");
    assert!(ProjectAccess::list(&store, ann).await.unwrap().is_empty());
}

#[tokio::test]
async fn fifth_project_hits_the_cap() {
    let store = MemoryStore::new();
    let ann = user(&store, "ann@x.com").await;
    for title in ["A", "B", "C", "D"] {
        project(&store, ann, title).await;
    }

    let err = ProjectAccess::create(&store, ann, &project_input("E"))
        .await
        .unwrap_err();

    assert_matches!(err, AccessError::Core(CoreError::LimitExceeded(_)));
    assert_eq!(ProjectAccess::list(&store, ann).await.unwrap().len(), 4);
}

#[tokio::test]
async fn cap_is_per_user() {
    let store = MemoryStore::new();
    let ann = user(&store, "ann@x.com").await;
    let bob = user(&store, "bob@x.com").await;
    for title in ["A", "B", "C", "D"] {
        project(&store, ann, title).await;
    }

    assert!(ProjectAccess::create(&store, bob, &project_input("Mine")).await.is_ok());
}

#[tokio::test]
async fn deleting_a_project_frees_a_slot() {
    let store = MemoryStore::new();
    let ann = user(&store, "ann@x.com").await;
    let mut ids = Vec::new();
    for title in ["A", "B", "C", "D"] {
        ids.push(project(&store, ann, title).await);
    }

    ProjectAccess::delete(&store, ann, ids[0]).await.unwrap();

    assert!(ProjectAccess::create(&store, ann, &project_input("E")).await.is_ok());
}

#[tokio::test]
async fn concurrent_creates_never_exceed_the_cap() {
    let store = std::sync::Arc::new(MemoryStore::new());
    let ann = user(&store, "ann@x.com").await;

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                ProjectAccess::create(store.as_ref(), ann, &project_input(&format!("P{i}"))).await
            })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            created += 1;
        }
    }

    assert_eq!(created, 4);
    assert_eq!(store.count_projects(ann).await.unwrap(), 4);
}

#[tokio::test]
async fn foreign_project_reads_like_missing() {
    let store = MemoryStore::new();
    let ann = user(&store, "ann@x.com").await;
    let bob = user(&store, "bob@x.com").await;
    let id = project(&store, ann, "Private").await;

    let foreign = ProjectAccess::get(&store, bob, id).await.unwrap_err();
    let missing = ProjectAccess::get(&store, bob, 9_999).await.unwrap_err();

    assert_matches!(foreign, AccessError::Core(CoreError::NotFound { entity: "Project", .. }));
    assert_matches!(missing, AccessError::Core(CoreError::NotFound { entity: "Project", .. }));
}

#[tokio::test]
async fn foreign_project_cannot_be_updated_or_deleted() {
    let store = MemoryStore::new();
    let ann = user(&store, "ann@x.com").await;
    let bob = user(&store, "bob@x.com").await;
    let id = project(&store, ann, "Private").await;

    let update = UpdateProject {
        title: Some("Hijacked".to_string()),
        description: None,
    };
    assert_matches!(
        ProjectAccess::update(&store, bob, id, &update).await,
        Err(AccessError::Core(CoreError::NotFound { .. }))
    );
    assert_matches!(
        ProjectAccess::delete(&store, bob, id).await,
        Err(AccessError::Core(CoreError::NotFound { .. }))
    );

    let unchanged = ProjectAccess::get(&store, ann, id).await.unwrap();
    assert_eq!(unchanged.title, "Private");
}

#[tokio::test]
async fn project_update_ignores_blank_fields() {
    let store = MemoryStore::new();
    let ann = user(&store, "ann@x.com").await;
    let id = project(&store, ann, "Home").await;

    let updated = ProjectAccess::update(
        &store,
        ann,
        id,
        &UpdateProject {
            title: Some("  ".to_string()),
            description: Some("Chores".to_string()),
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.title, "Home");
    assert_eq!(updated.description, "Chores");
}

#[tokio::test]
async fn project_delete_removes_its_tasks() {
    let store = MemoryStore::new();
    let ann = user(&store, "ann@x.com").await;
    let doomed = project(&store, ann, "Doomed").await;
    let kept = project(&store, ann, "Kept").await;
    let gone = TaskAccess::create(&store, ann, &task_input(doomed, None)).await.unwrap();
    let stays = TaskAccess::create(&store, ann, &task_input(kept, None)).await.unwrap();

    let removed = ProjectAccess::delete(&store, ann, doomed).await.unwrap();
    assert_eq!(removed.message(), "Project removed");

    assert_matches!(
        TaskAccess::get(&store, ann, gone.id).await,
        Err(AccessError::Core(CoreError::NotFound { entity: "Task", .. }))
    );
    let remaining = TaskAccess::list(&store, ann, None).await.unwrap();
    assert_eq!(remaining, vec![stays]);
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[tokio::test]
async fn task_defaults_to_to_do() {
    let store = MemoryStore::new();
    let ann = user(&store, "ann@x.com").await;
    let pid = project(&store, ann, "Home").await;

    let task = TaskAccess::create(&store, ann, &task_input(pid, None)).await.unwrap();

    assert_eq!(task.status, TaskStatus::ToDo);
    assert_eq!(task.owner_id, ann);
    assert_eq!(task.project_id, pid);
    assert!(task.completed_at.is_none());
}

#[tokio::test]
async fn task_created_completed_is_stamped() {
    let store = MemoryStore::new();
    let ann = user(&store, "ann@x.com").await;
    let pid = project(&store, ann, "Home").await;

    let task = TaskAccess::create(&store, ann, &task_input(pid, Some(TaskStatus::Completed)))
        .await
        .unwrap();

    assert!(task.completed_at.is_some());
}

#[tokio::test]
async fn task_under_foreign_project_is_forbidden() {
    let store = MemoryStore::new();
    let ann = user(&store, "ann@x.com").await;
    let bob = user(&store, "bob@x.com").await;
    let anns = project(&store, ann, "Ann's").await;

    let err = TaskAccess::create(&store, bob, &task_input(anns, None))
        .await
        .unwrap_err();

    assert_matches!(err, AccessError::Core(CoreError::Forbidden(ref m)) if m == FOREIGN_PROJECT_DENIAL);
    assert!(TaskAccess::list(&store, ann, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn task_under_missing_project_is_not_found() {
    let store = MemoryStore::new();
    let ann = user(&store, "ann@x.com").await;

    let err = TaskAccess::create(&store, ann, &task_input(404, None))
        .await
        .unwrap_err();

    assert_matches!(err, AccessError::Core(CoreError::NotFound { entity: "Project", id: 404 }));
}

#[tokio::test]
async fn task_without_project_is_a_validation_error() {
    let store = MemoryStore::new();
    let ann = user(&store, "ann@x.com").await;
    let mut input = task_input(1, None);
    input.project_id = None;

    let err = TaskAccess::create(&store, ann, &input).await.unwrap_err();

    assert_matches!(err, AccessError::Core(CoreError::Validation(ref m)) if m.contains("Project is required"));
}

#[tokio::test]
async fn task_list_is_scoped_to_requester() {
    let store = MemoryStore::new();
    let ann = user(&store, "ann@x.com").await;
    let bob = user(&store, "bob@x.com").await;
    let anns = project(&store, ann, "Ann's").await;
    let bobs = project(&store, bob, "Bob's").await;
    TaskAccess::create(&store, ann, &task_input(anns, None)).await.unwrap();
    TaskAccess::create(&store, bob, &task_input(bobs, None)).await.unwrap();

    let tasks = TaskAccess::list(&store, ann, None).await.unwrap();

    assert_eq!(tasks.len(), 1);
    assert!(tasks.iter().all(|t| t.owner_id == ann));
}

#[tokio::test]
async fn task_list_filters_by_project() {
    let store = MemoryStore::new();
    let ann = user(&store, "ann@x.com").await;
    let home = project(&store, ann, "Home").await;
    let work = project(&store, ann, "Work").await;
    TaskAccess::create(&store, ann, &task_input(home, None)).await.unwrap();
    TaskAccess::create(&store, ann, &task_input(work, None)).await.unwrap();
    TaskAccess::create(&store, ann, &task_input(work, None)).await.unwrap();

    let tasks = TaskAccess::list(&store, ann, Some(work)).await.unwrap();

    assert_eq!(tasks.len(), 2);
    assert!(tasks.iter().all(|t| t.project_id == work));
}

#[tokio::test]
async fn task_list_by_foreign_project_is_not_found() {
    let store = MemoryStore::new();
    let ann = user(&store, "ann@x.com").await;
    let bob = user(&store, "bob@x.com").await;
    let anns = project(&store, ann, "Ann's").await;

    assert_matches!(
        TaskAccess::list(&store, bob, Some(anns)).await,
        Err(AccessError::Core(CoreError::NotFound { entity: "Project", .. }))
    );
}

#[tokio::test]
async fn foreign_task_is_hidden() {
    let store = MemoryStore::new();
    let ann = user(&store, "ann@x.com").await;
    let bob = user(&store, "bob@x.com").await;
    let pid = project(&store, ann, "Home").await;
    let task = TaskAccess::create(&store, ann, &task_input(pid, None)).await.unwrap();

    assert_matches!(
        TaskAccess::get(&store, bob, task.id).await,
        Err(AccessError::Core(CoreError::NotFound { entity: "Task", .. }))
    );
    assert_matches!(
        TaskAccess::update(&store, bob, task.id, &UpdateTask::default()).await,
        Err(AccessError::Core(CoreError::NotFound { .. }))
    );
    assert_matches!(
        TaskAccess::delete(&store, bob, task.id).await,
        Err(AccessError::Core(CoreError::NotFound { .. }))
    );
    assert!(TaskAccess::get(&store, ann, task.id).await.is_ok());
}

#[tokio::test]
async fn completing_and_reopening_a_task_tracks_completed_at() {
    let store = MemoryStore::new();
    let ann = user(&store, "ann@x.com").await;
    let pid = project(&store, ann, "Home").await;
    let task = TaskAccess::create(&store, ann, &task_input(pid, None)).await.unwrap();

    let done = TaskAccess::update(
        &store,
        ann,
        task.id,
        &UpdateTask {
            status: Some(TaskStatus::Completed),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(done.status, TaskStatus::Completed);
    let stamped = done.completed_at.expect("completed task has completed_at");

    // Re-sending Completed keeps the original stamp.
    let again = TaskAccess::update(
        &store,
        ann,
        task.id,
        &UpdateTask {
            status: Some(TaskStatus::Completed),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(again.completed_at, Some(stamped));

    // A title-only update leaves the stamp alone.
    let renamed = TaskAccess::update(
        &store,
        ann,
        task.id,
        &UpdateTask {
            title: Some("Buy oat milk".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(renamed.title, "Buy oat milk");
    assert_eq!(renamed.completed_at, Some(stamped));

    let reopened = TaskAccess::update(
        &store,
        ann,
        task.id,
        &UpdateTask {
            status: Some(TaskStatus::InProgress),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(reopened.status, TaskStatus::InProgress);
    assert!(reopened.completed_at.is_none());
}

#[tokio::test]
async fn task_update_ignores_blank_text() {
    let store = MemoryStore::new();
    let ann = user(&store, "ann@x.com").await;
    let pid = project(&store, ann, "Home").await;
    let task = TaskAccess::create(&store, ann, &task_input(pid, None)).await.unwrap();

    let updated = TaskAccess::update(
        &store,
        ann,
        task.id,
        &UpdateTask {
            title: Some(String::new()),
            description: Some("3 litres".to_string()),
            status: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.title, "Buy milk");
    assert_eq!(updated.description, "3 litres");
    assert_eq!(updated.status, TaskStatus::ToDo);
}

#[tokio::test]
async fn deleted_task_is_gone() {
    let store = MemoryStore::new();
    let ann = user(&store, "ann@x.com").await;
    let pid = project(&store, ann, "Home").await;
    let task = TaskAccess::create(&store, ann, &task_input(pid, None)).await.unwrap();

    let removed = TaskAccess::delete(&store, ann, task.id).await.unwrap();

    assert_eq!(removed.message(), "Task removed");
    assert_matches!(
        TaskAccess::delete(&store, ann, task.id).await,
        Err(AccessError::Core(CoreError::NotFound { .. }))
    );
}

#[tokio::test]
async fn blank_status_in_update_payload_keeps_status() {
    let store = MemoryStore::new();
    let ann = user(&store, "ann@x.com").await;
    let pid = project(&store, ann, "Home").await;
    let task = TaskAccess::create(&store, ann, &task_input(pid, Some(TaskStatus::Completed)))
        .await
        .unwrap();

    let input: UpdateTask = serde_json::from_str(r#"{"title": "new", "status": ""}"#).unwrap();
    let updated = TaskAccess::update(&store, ann, task.id, &input).await.unwrap();

    assert_eq!(updated.title, "new");
    assert_eq!(updated.status, TaskStatus::Completed);
    assert_eq!(updated.completed_at, task.completed_at);
}

#[tokio::test]
async fn project_key_in_create_payload_names_the_parent() {
    let store = MemoryStore::new();
    let ann = user(&store, "ann@x.com").await;
    let pid = project(&store, ann, "Home").await;

    let input: CreateTask = serde_json::from_value(serde_json::json!({
        "title": "t",
        "description": "d",
        "project": pid,
    }))
    .unwrap();
    let task = TaskAccess::create(&store, ann, &input).await.unwrap();

    assert_eq!(task.project_id, pid);
}
