mod common;

use common::TestTable;
use pretty_assertions::assert_eq;
use todo_storage::todo::{
    TodoAttribute, TodoItem, TodoStorage, TodoStorageError, TodoStore, TodoUpdate,
};
use uuid::Uuid;

struct TestContext {
    storage: TodoStorage,
    _table: TestTable,
}

async fn setup_test() -> TestContext {
    let table = TestTable::create(
        "test-todos",
        &TodoAttribute::TodoId.to_string(),
        &TodoAttribute::UserId.to_string(),
    )
    .await;

    let storage = TodoStorage::new(
        table.client.clone(),
        table.table_name.clone(),
        table.index_name.clone(),
    );

    TestContext {
        storage,
        _table: table,
    }
}

fn create_test_todo(user_id: &str, name: &str) -> TodoItem {
    TodoItem {
        user_id: user_id.to_string(),
        todo_id: Uuid::new_v4().to_string(),
        created_at: "2024-01-01T10:00:00+00:00".to_string(),
        name: name.to_string(),
        due_date: "2024-01-02".to_string(),
        done: false,
        attachment_url: None,
    }
}

#[tokio::test]
#[ignore = "Requires LocalStack"]
async fn test_create_and_list_by_user() {
    let context = setup_test().await;
    let user_id = format!("user-{}", Uuid::new_v4());

    let first = context
        .storage
        .create(create_test_todo(&user_id, "Buy milk"))
        .await
        .expect("Failed to create todo");
    let second = context
        .storage
        .create(create_test_todo(&user_id, "Walk the dog"))
        .await
        .expect("Failed to create todo");
    context
        .storage
        .create(create_test_todo("someone-else", "Not mine"))
        .await
        .expect("Failed to create todo");

    let mut todos = context
        .storage
        .get_all_by_user(&user_id)
        .await
        .expect("Failed to list todos");
    todos.sort_by(|a, b| a.name.cmp(&b.name));

    assert_eq!(todos, vec![first, second]);
}

#[tokio::test]
#[ignore = "Requires LocalStack"]
async fn test_update_preserves_other_attributes() {
    let context = setup_test().await;
    let todo = context
        .storage
        .create(create_test_todo("user-1", "Buy milk"))
        .await
        .expect("Failed to create todo");
    context
        .storage
        .set_attachment_url(&todo.todo_id, "user-1", "https://bucket.s3.amazonaws.com/x")
        .await
        .expect("Failed to set attachment");

    let update = TodoUpdate {
        name: "Buy oat milk".to_string(),
        due_date: "2024-02-01".to_string(),
        done: true,
    };
    context
        .storage
        .update(&todo.todo_id, "user-1", &update)
        .await
        .expect("Failed to update todo");

    let todos = context.storage.get_all_by_user("user-1").await.unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].name, "Buy oat milk");
    assert_eq!(todos[0].due_date, "2024-02-01");
    assert!(todos[0].done);
    assert_eq!(todos[0].created_at, todo.created_at);
    assert_eq!(
        todos[0].attachment_url.as_deref(),
        Some("https://bucket.s3.amazonaws.com/x")
    );
}

#[tokio::test]
#[ignore = "Requires LocalStack"]
async fn test_update_missing_todo_is_not_found() {
    let context = setup_test().await;
    let update = TodoUpdate {
        name: "Ghost".to_string(),
        due_date: "2024-02-01".to_string(),
        done: true,
    };

    let result = context.storage.update("missing", "user-1", &update).await;
    assert!(matches!(result, Err(TodoStorageError::NotFound)));

    let todos = context.storage.get_all_by_user("user-1").await.unwrap();
    assert!(todos.is_empty());
}

#[tokio::test]
#[ignore = "Requires LocalStack"]
async fn test_delete_removes_todo_and_is_idempotent() {
    let context = setup_test().await;
    let todo = context
        .storage
        .create(create_test_todo("user-1", "Buy milk"))
        .await
        .unwrap();

    context.storage.delete(&todo.todo_id, "user-1").await.unwrap();
    context.storage.delete(&todo.todo_id, "user-1").await.unwrap();

    let todos = context.storage.get_all_by_user("user-1").await.unwrap();
    assert!(todos.is_empty());
}
