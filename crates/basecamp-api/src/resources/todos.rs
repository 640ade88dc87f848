//! To-do items.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, instrument};

use basecamp_core::Result;

use super::{CREATED, Creator, OK, decode, expect_no_content};
use crate::client::ResourceClient;
use crate::transport::Payload;

/// A single to-do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    #[serde(default)]
    pub todolist_id: Option<u64>,
    pub content: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(default)]
    pub due_at: Option<NaiveDate>,
    #[serde(default)]
    pub comments_count: Option<u32>,
    #[serde(default)]
    pub creator: Option<Creator>,
    #[serde(default)]
    pub created_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Restrict a to-do listing to one state. Without a filter both completed
/// and remaining to-dos are returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoFilter {
    Completed,
    Remaining,
    Trashed,
}

impl TodoFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            TodoFilter::Completed => "completed",
            TodoFilter::Remaining => "remaining",
            TodoFilter::Trashed => "trashed",
        }
    }
}

/// Options for listing the to-dos of a project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoQuery {
    pub filter: Option<TodoFilter>,
    /// Only to-dos due after this date.
    pub due_since: Option<NaiveDate>,
}

/// To-do operations.
#[derive(Debug, Clone, Copy)]
pub struct Todos<'a> {
    client: &'a ResourceClient,
}

impl<'a> Todos<'a> {
    pub(crate) fn new(client: &'a ResourceClient) -> Self {
        Self { client }
    }

    /// To-dos of a project.
    #[instrument(skip(self))]
    pub async fn list(&self, project_id: u64, query: &TodoQuery) -> Result<Vec<Todo>> {
        debug!("Listing to-dos");
        let endpoint = with_filter(format!("projects/{project_id}/todos"), query.filter);
        let response = match query.due_since {
            Some(date) => {
                let date = date.format("%Y-%m-%d").to_string();
                self.client
                    .get_with_query(&endpoint, &[("due_since", date.as_str())])
                    .await?
            }
            None => self.client.get(&endpoint).await?,
        };
        decode(response, OK)
    }

    /// To-dos of one list.
    #[instrument(skip(self))]
    pub async fn list_for_list(
        &self,
        project_id: u64,
        todolist_id: u64,
        filter: Option<TodoFilter>,
    ) -> Result<Vec<Todo>> {
        let endpoint = with_filter(
            format!("projects/{project_id}/todolists/{todolist_id}/todos"),
            filter,
        );
        decode(self.client.get(&endpoint).await?, OK)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, project_id: u64, id: u64) -> Result<Todo> {
        decode(self.client.get(&todo_path(project_id, id)).await?, OK)
    }

    #[instrument(skip(self, content))]
    pub async fn create(&self, project_id: u64, todolist_id: u64, content: &str) -> Result<Todo> {
        debug!("Creating to-do");
        let endpoint = format!("projects/{project_id}/todolists/{todolist_id}/todos.json");
        let payload = Payload::Json(json!({ "content": content }));
        decode(self.client.post(&endpoint, &payload).await?, CREATED)
    }

    #[instrument(skip(self, content))]
    pub async fn update(&self, project_id: u64, id: u64, content: &str) -> Result<Todo> {
        let payload = Payload::Json(json!({ "content": content }));
        decode(self.client.put(&todo_path(project_id, id), &payload).await?, OK)
    }

    /// Mark a to-do as done.
    pub async fn complete(&self, project_id: u64, id: u64) -> Result<Todo> {
        self.set_completed(project_id, id, true).await
    }

    /// Reopen a completed to-do.
    pub async fn uncomplete(&self, project_id: u64, id: u64) -> Result<Todo> {
        self.set_completed(project_id, id, false).await
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, project_id: u64, id: u64) -> Result<()> {
        expect_no_content(self.client.delete(&todo_path(project_id, id)).await?)
    }

    #[instrument(skip(self))]
    async fn set_completed(&self, project_id: u64, id: u64, completed: bool) -> Result<Todo> {
        let payload = Payload::Json(json!({ "completed": completed }));
        decode(self.client.put(&todo_path(project_id, id), &payload).await?, OK)
    }
}

fn with_filter(mut path: String, filter: Option<TodoFilter>) -> String {
    if let Some(filter) = filter {
        path.push('/');
        path.push_str(filter.as_str());
    }
    path.push_str(".json");
    path
}

fn todo_path(project_id: u64, id: u64) -> String {
    format!("projects/{project_id}/todos/{id}.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filtered_paths() {
        assert_eq!(
            with_filter("projects/1/todos".to_string(), None),
            "projects/1/todos.json"
        );
        assert_eq!(
            with_filter("projects/1/todos".to_string(), Some(TodoFilter::Remaining)),
            "projects/1/todos/remaining.json"
        );
        assert_eq!(
            with_filter(
                "projects/1/todolists/2/todos".to_string(),
                Some(TodoFilter::Trashed)
            ),
            "projects/1/todolists/2/todos/trashed.json"
        );
        assert_eq!(todo_path(1, 3), "projects/1/todos/3.json");
    }

    #[test]
    fn todo_deserializes_due_date() {
        let todo: Todo = serde_json::from_value(json!({
            "id": 223304243,
            "todolist_id": 968316918,
            "position": 1,
            "content": "Design it",
            "completed": false,
            "due_at": "2012-03-27",
            "comments_count": 0
        }))
        .unwrap();

        assert_eq!(todo.due_at, NaiveDate::from_ymd_opt(2012, 3, 27));
        assert_eq!(todo.todolist_id, Some(968316918));
    }

    #[test]
    fn default_query_has_no_filters() {
        let query = TodoQuery::default();
        assert!(query.filter.is_none());
        assert!(query.due_since.is_none());
    }
}
