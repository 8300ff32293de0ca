//! Runs against a live database only when TODO_TEST_DATABASE_URL is set.
//! Repository tests work inside a transaction that is rolled back at the end;
//! the tests that commit remove their rows afterwards.

mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use chrono::Utc;
use serde_json::json;

use todo_api_rust::api::{app, AppState};
use todo_api_rust::cli::commands::serve::seed_users;
use todo_api_rust::config::DatabaseConfig;
use todo_api_rust::database::models::NewTodo;
use todo_api_rust::database::repository::{finish, Store, TodoRepository, UnitOfWork, UserRepository};
use todo_api_rust::database::{DatabaseError, DatabaseManager, PgStore};
use todo_api_rust::services::{CreateTodo, ErrorKind, ListTodos, TodoPatch, TodoService};
use todo_api_rust::types::{Order, Priority, Sorter, Status};

async fn store() -> Result<Option<PgStore>> {
    let Ok(url) = std::env::var("TODO_TEST_DATABASE_URL") else {
        eprintln!("TODO_TEST_DATABASE_URL not set, skipping");
        return Ok(None);
    };
    let config = DatabaseConfig {
        url: Some(url),
        max_connections: 2,
        connection_timeout: 5,
        ..DatabaseConfig::default()
    };
    let pool = DatabaseManager::connect(&config).await?;
    DatabaseManager::migrate(&pool).await?;
    Ok(Some(PgStore::new(pool)))
}

fn owner(tag: &str) -> String {
    format!("{}-{}", tag, Utc::now().timestamp_nanos_opt().unwrap_or_default())
}

fn new_todo(title: &str, status: Status, priority: Priority) -> NewTodo {
    NewTodo {
        title: title.to_string(),
        description: String::new(),
        status,
        priority,
    }
}

#[tokio::test]
async fn crud_inside_a_transaction() -> Result<()> {
    let Some(store) = store().await? else { return Ok(()) };
    let repo = store.todos();
    let alice = owner("alice");
    let mut cx = store.begin().await?;

    let id = repo.create(&mut cx, &alice, new_todo("pg", Status::Ready, Priority::Low)).await?;
    let created = repo.get(&mut cx, &alice, id).await?;
    assert_eq!(created.title, "pg");
    assert_eq!(created.status, Status::Ready);
    assert_eq!(created.created_at, created.updated_at);

    let mut changed = created.clone();
    changed.title = "renamed".to_string();
    repo.update(&mut cx, &changed).await?;
    let updated = repo.get(&mut cx, &alice, id).await?;
    assert_eq!(updated.title, "renamed");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);

    assert!(matches!(repo.get(&mut cx, "someone-else", id).await, Err(DatabaseError::NotFound(_))));

    repo.delete(&mut cx, id).await?;
    assert!(matches!(repo.get(&mut cx, &alice, id).await, Err(DatabaseError::NotFound(_))));
    assert!(matches!(repo.delete(&mut cx, id).await, Err(DatabaseError::NotFound(_))));

    cx.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn list_orders_with_id_tie_break() -> Result<()> {
    let Some(store) = store().await? else { return Ok(()) };
    let repo = store.todos();
    let alice = owner("alice");
    let mut cx = store.begin().await?;

    let a = repo.create(&mut cx, &alice, new_todo("a", Status::NotReady, Priority::Middle)).await?;
    let b = repo.create(&mut cx, &alice, new_todo("b", Status::Done, Priority::High)).await?;
    let c = repo.create(&mut cx, &alice, new_todo("c", Status::Ready, Priority::Low)).await?;
    let d = repo.create(&mut cx, &alice, new_todo("d", Status::Doing, Priority::High)).await?;
    let e = repo.create(&mut cx, &alice, new_todo("e", Status::NotReady, Priority::Low)).await?;

    let ids = |todos: Vec<todo_api_rust::database::models::Todo>| todos.into_iter().map(|t| t.id).collect::<Vec<_>>();

    let default = repo.list(&mut cx, &alice, Sorter::Id, Order::Asc, false).await?;
    assert_eq!(ids(default), vec![a, c, d, e]);

    let by_priority = repo.list(&mut cx, &alice, Sorter::Priority, Order::Desc, true).await?;
    assert_eq!(ids(by_priority), vec![c, e, a, b, d]);

    let by_priority = repo.list(&mut cx, &alice, Sorter::Priority, Order::Asc, true).await?;
    assert_eq!(ids(by_priority), vec![b, d, a, c, e]);

    cx.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn rolled_back_writes_are_invisible() -> Result<()> {
    let Some(store) = store().await? else { return Ok(()) };
    let repo = store.todos();
    let alice = owner("alice");

    let mut cx = store.begin().await?;
    let id = repo.create(&mut cx, &alice, new_todo("gone", Status::NotReady, Priority::Middle)).await?;
    cx.rollback().await?;

    let mut cx = store.read().await?;
    assert!(matches!(repo.get(&mut cx, &alice, id).await, Err(DatabaseError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn users_authenticate_and_conflict() -> Result<()> {
    let Some(store) = store().await? else { return Ok(()) };
    let users = store.users();
    let id = owner("user");
    let mut cx = store.begin().await?;

    users.create(&mut cx, &id, "secret").await?;
    assert!(users.authenticate(&mut cx, &id, "secret").await?);
    assert!(!users.authenticate(&mut cx, &id, "Secret").await?);
    assert!(!users.authenticate(&mut cx, "nobody-at-all", "secret").await?);

    cx.rollback().await?;

    // A unique violation aborts the transaction, so it gets one of its own
    let mut cx = store.begin().await?;
    users.create(&mut cx, &id, "first").await?;
    let err = users.create(&mut cx, &id, "second").await.unwrap_err();
    assert!(matches!(err, DatabaseError::Conflict(_)));
    cx.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn service_reads_its_own_writes() -> Result<()> {
    let Some(store) = store().await? else { return Ok(()) };
    let service = TodoService::new(store.todos());
    let alice = owner("alice");
    let mut cx = store.begin().await?;

    let created = service
        .create(
            &mut cx,
            &alice,
            CreateTodo {
                title: "svc".to_string(),
                description: "d".to_string(),
                status: 1,
                priority: 2,
            },
        )
        .await?;

    let patch = TodoPatch {
        priority: Some(1),
        ..TodoPatch::default()
    };
    let updated = service.update(&mut cx, &alice, &created.id.to_string(), patch).await?;
    assert_eq!(updated.priority, Priority::High);
    assert_eq!(updated.description, "d");

    let listed = service
        .list(
            &mut cx,
            &alice,
            ListTodos {
                sort_by: "priority".to_string(),
                order_by: "asc".to_string(),
                include_done: false,
            },
        )
        .await?;
    assert_eq!(listed.len(), 1);

    let err = service.get(&mut cx, &alice, "x1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadRequest);

    cx.rollback().await?;
    Ok(())
}

async fn remove_user_data(store: &PgStore, user_ids: &[&str]) -> Result<()> {
    for id in user_ids {
        sqlx::query("DELETE FROM todos WHERE user_id = $1").bind(*id).execute(store.pool()).await?;
        sqlx::query("DELETE FROM users WHERE user_id = $1").bind(*id).execute(store.pool()).await?;
    }
    Ok(())
}

#[tokio::test]
async fn finish_with_error_discards_the_transaction() -> Result<()> {
    let Some(store) = store().await? else { return Ok(()) };
    let repo = store.todos();
    let alice = owner("alice");

    let mut cx = store.begin().await?;
    let id = repo.create(&mut cx, &alice, new_todo("abandoned", Status::Ready, Priority::High)).await?;
    let failed: Result<i64, DatabaseError> = Err(DatabaseError::Conflict("give up after writing".into()));
    assert!(finish(cx, failed).await.is_err());

    let mut cx = store.read().await?;
    assert!(matches!(repo.get(&mut cx, &alice, id).await, Err(DatabaseError::NotFound(_))));

    // A service call that fails after an earlier write in the same request
    let service = TodoService::new(store.todos());
    let mut cx = store.begin().await?;
    let created = service
        .create(
            &mut cx,
            &alice,
            CreateTodo {
                title: "half done".to_string(),
                description: String::new(),
                status: 1,
                priority: 2,
            },
        )
        .await?;
    let bad_patch = TodoPatch {
        status: Some(9),
        ..TodoPatch::default()
    };
    let result = service.update(&mut cx, &alice, &created.id.to_string(), bad_patch).await;
    let err = finish(cx, result).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadRequest);

    let mut cx = store.read().await?;
    assert!(matches!(repo.get(&mut cx, &alice, created.id).await, Err(DatabaseError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn finish_with_success_commits() -> Result<()> {
    let Some(store) = store().await? else { return Ok(()) };
    let repo = store.todos();
    let alice = owner("alice");

    let mut cx = store.begin().await?;
    let result = repo.create(&mut cx, &alice, new_todo("kept", Status::NotReady, Priority::Low)).await;
    let id = finish(cx, result).await?;

    let mut cx = store.read().await?;
    let stored = repo.get(&mut cx, &alice, id).await;
    drop(cx);
    remove_user_data(&store, &[alice.as_str()]).await?;

    assert_eq!(stored?.title, "kept");
    Ok(())
}

#[tokio::test]
async fn http_lifecycle_over_postgres() -> Result<()> {
    let Some(store) = store().await? else { return Ok(()) };
    let alice = owner("alice");
    let bob = owner("bob");
    seed_users(
        &store,
        &[(alice.clone(), "pw".to_string()), (bob.clone(), "pw".to_string())],
    )
    .await?;

    let result = http_lifecycle(&store, &format!("{}:pw", alice), &format!("{}:pw", bob)).await;
    remove_user_data(&store, &[alice.as_str(), bob.as_str()]).await?;
    result
}

async fn http_lifecycle(store: &PgStore, alice: &str, bob: &str) -> Result<()> {
    let app = app(AppState::new(store.clone()), false);

    let created = common::create_todo(&app, alice, json!({ "title": "on disk", "priority": 3 })).await?;
    let id = created["id"].as_str().unwrap_or_default().to_string();
    let uri = format!("/todos/{}", id);
    assert_eq!(created["status"], 1);
    assert_eq!(created["createdAt"], created["updatedAt"]);

    let res = common::send(&app, Method::PATCH, &uri, Some(alice), Some(json!({ "priority": 7 }))).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = common::send(&app, Method::PATCH, &uri, Some(alice), Some(json!({ "status": 3 }))).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["status"], 3);
    assert_eq!(res.body["priority"], 3);
    let created_at = created["createdAt"].as_str().unwrap_or_default();
    let updated_at = res.body["updatedAt"].as_str().unwrap_or_default();
    assert!(updated_at > created_at, "{} <= {}", updated_at, created_at);

    let res = common::send(&app, Method::DELETE, &uri, Some(bob), None).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let res = common::send(&app, Method::DELETE, &uri, Some(alice), None).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["message"], format!("todo {} is deleted", id));

    let res = common::send(&app, Method::GET, &uri, Some(alice), None).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    Ok(())
}
