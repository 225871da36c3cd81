//! Todo storage persisted through a serialized write queue

use chrono::{SecondsFormat, Utc};
use mcpmon_sdk::WriteQueue;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub created_at: String,
}

/// In-memory todos mirrored to a JSON file
///
/// Every mutation queues a snapshot write; the queue applies them one at a
/// time, so the file always ends up with the latest snapshot.
pub struct TodoStore {
    todos: Mutex<HashMap<String, Todo>>,
    writes: WriteQueue<Vec<Todo>, io::Result<()>>,
    path: PathBuf,
}

impl TodoStore {
    /// Open the store, loading existing todos; a missing file means none
    pub async fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let todos = load(&path).await?;
        Ok(Self::with_todos(path, todos))
    }

    /// Open the store, starting empty if the file cannot be read
    pub async fn open_or_empty(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match load(&path).await {
            Ok(todos) => Self::with_todos(path, todos),
            Err(e) => {
                tracing::error!(error = %e, path = %path.display(), "Failed to load todos");
                Self::with_todos(path, Vec::new())
            }
        }
    }

    fn with_todos(path: PathBuf, todos: Vec<Todo>) -> Self {
        let target = path.clone();
        let writes = WriteQueue::new(move |snapshot: Vec<Todo>| {
            let target = target.clone();
            async move { save(&target, &snapshot).await }
        });

        Self {
            todos: Mutex::new(todos.into_iter().map(|t| (t.id.clone(), t)).collect()),
            writes,
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Todos ordered by creation time
    pub fn list(&self) -> Vec<Todo> {
        sorted(&self.todos.lock())
    }

    pub async fn add(&self, text: impl Into<String>) -> io::Result<Todo> {
        let todo = Todo {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.into(),
            completed: false,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        let write = {
            let mut todos = self.todos.lock();
            todos.insert(todo.id.clone(), todo.clone());
            self.queue_snapshot(&todos)
        };
        write.await?;
        Ok(todo)
    }

    /// Flip the completed flag; `None` if no such todo
    pub async fn toggle(&self, id: &str) -> io::Result<Option<Todo>> {
        let (updated, write) = {
            let mut todos = self.todos.lock();
            let Some(todo) = todos.get_mut(id) else {
                return Ok(None);
            };
            todo.completed = !todo.completed;
            let updated = todo.clone();
            (updated, self.queue_snapshot(&todos))
        };
        write.await?;
        Ok(Some(updated))
    }

    /// Remove a todo; `false` if no such todo
    pub async fn remove(&self, id: &str) -> io::Result<bool> {
        let write = {
            let mut todos = self.todos.lock();
            if todos.remove(id).is_none() {
                return Ok(false);
            }
            self.queue_snapshot(&todos)
        };
        write.await?;
        Ok(true)
    }

    /// Wait for queued writes and stop the writer
    pub async fn close(&self) {
        self.writes.shutdown().await;
    }

    // Queued while the map is locked so snapshots reach the file in mutation order
    fn queue_snapshot(
        &self,
        todos: &HashMap<String, Todo>,
    ) -> impl Future<Output = io::Result<()>> + use<> {
        let write = self.writes.submit(sorted(todos));
        async move { write.await.map_err(io::Error::other)? }
    }
}

fn sorted(todos: &HashMap<String, Todo>) -> Vec<Todo> {
    let mut items: Vec<Todo> = todos.values().cloned().collect();
    items.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
    items
}

async fn load(path: &Path) -> io::Result<Vec<Todo>> {
    match tokio::fs::read_to_string(path).await {
        Ok(raw) => serde_json::from_str(&raw).map_err(io::Error::other),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e),
    }
}

async fn save(path: &Path, todos: &[Todo]) -> io::Result<()> {
    let mut content = serde_json::to_string_pretty(todos).map_err(io::Error::other)?;
    content.push('\n');
    tokio::fs::write(path, content).await
}

/// Render todos as one line each
pub fn as_text_list(items: &[Todo]) -> String {
    if items.is_empty() {
        return "No todos.".to_string();
    }
    items
        .iter()
        .map(|t| format!("{} {} {}", if t.completed { "[x]" } else { "[ ]" }, t.id, t.text))
        .collect::<Vec<_>>()
        .join("\n")
}
