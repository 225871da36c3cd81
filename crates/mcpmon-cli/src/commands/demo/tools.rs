//! Todo tools

use super::store::{TodoStore, as_text_list};
use mcpmon_sdk::{MonitoredServer, ToolError};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::Arc;

#[derive(Deserialize)]
struct AddArgs {
    text: String,
}

#[derive(Deserialize)]
struct IdArgs {
    id: String,
}

fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, ToolError> {
    serde_json::from_value(args).map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

fn non_empty(field: &str, value: String) -> Result<String, ToolError> {
    if value.trim().is_empty() {
        return Err(ToolError::invalid_arguments(format!("{} must not be empty", field)));
    }
    Ok(value)
}

/// Register `todos_add`, `todos_list`, `todos_toggle` and `todos_remove`
pub fn register_todo_tools(server: &MonitoredServer, store: Arc<TodoStore>) -> Result<(), ToolError> {
    let s = store.clone();
    server.register_tool("todos_add", "Add a todo item", move |args| add(s.clone(), args))?;

    let s = store.clone();
    server.register_tool("todos_list", "List all todos", move |_args: Value| list(s.clone()))?;

    let s = store.clone();
    server.register_tool(
        "todos_toggle",
        "Toggle a todo completed state by id",
        move |args| toggle(s.clone(), args),
    )?;

    server.register_tool("todos_remove", "Remove a todo by id", move |args| {
        remove(store.clone(), args)
    })?;

    Ok(())
}

async fn add(store: Arc<TodoStore>, args: Value) -> Result<Value, ToolError> {
    let AddArgs { text } = parse_args(args)?;
    let todo = store.add(non_empty("text", text)?).await?;
    Ok(json!({ "message": format!("Added {}", todo.id), "todo": todo }))
}

async fn list(store: Arc<TodoStore>) -> Result<Value, ToolError> {
    let todos = store.list();
    Ok(json!({ "message": as_text_list(&todos), "todos": todos }))
}

async fn toggle(store: Arc<TodoStore>, args: Value) -> Result<Value, ToolError> {
    let IdArgs { id } = parse_args(args)?;
    let id = non_empty("id", id)?;
    match store.toggle(&id).await? {
        Some(todo) => Ok(json!({
            "message": format!("Toggled {} -> {}", id, todo.completed),
            "todo": todo,
        })),
        None => Err(ToolError::execution_failed(format!("Not found: {}", id))),
    }
}

async fn remove(store: Arc<TodoStore>, args: Value) -> Result<Value, ToolError> {
    let IdArgs { id } = parse_args(args)?;
    let id = non_empty("id", id)?;
    if store.remove(&id).await? {
        Ok(json!({ "message": format!("Removed {}", id), "removedId": id }))
    } else {
        Err(ToolError::execution_failed(format!("Not found: {}", id)))
    }
}
