//! To-do lists, across the account or within one project.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, instrument};

use basecamp_core::Result;

use super::{CREATED, Creator, OK, decode, expect_no_content};
use crate::client::ResourceClient;
use crate::transport::Payload;

/// A to-do list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoList {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub trashed: bool,
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(default)]
    pub completed_count: Option<u32>,
    #[serde(default)]
    pub remaining_count: Option<u32>,
    #[serde(default)]
    pub creator: Option<Creator>,
    #[serde(default)]
    pub created_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Body of a create or update request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewTodoList {
    pub name: String,
    pub description: String,
    pub milestone_id: Option<u64>,
    pub private: bool,
    pub tracked: bool,
}

impl NewTodoList {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Which lists to return instead of the active ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoListFilter {
    Completed,
    Trashed,
}

impl TodoListFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            TodoListFilter::Completed => "completed",
            TodoListFilter::Trashed => "trashed",
        }
    }
}

/// To-do list operations.
#[derive(Debug, Clone, Copy)]
pub struct TodoLists<'a> {
    client: &'a ResourceClient,
}

impl<'a> TodoLists<'a> {
    pub(crate) fn new(client: &'a ResourceClient) -> Self {
        Self { client }
    }

    /// Lists across every project of the account.
    #[instrument(skip(self))]
    pub async fn list(&self, filter: Option<TodoListFilter>) -> Result<Vec<TodoList>> {
        debug!("Listing to-do lists");
        decode(self.client.get(&lists_path(None, filter)).await?, OK)
    }

    /// Lists of one project.
    #[instrument(skip(self))]
    pub async fn list_for_project(
        &self,
        project_id: u64,
        filter: Option<TodoListFilter>,
    ) -> Result<Vec<TodoList>> {
        decode(self.client.get(&lists_path(Some(project_id), filter)).await?, OK)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, project_id: u64, id: u64) -> Result<TodoList> {
        decode(self.client.get(&list_path(project_id, id)).await?, OK)
    }

    #[instrument(skip(self, list), fields(name = %list.name))]
    pub async fn create(&self, project_id: u64, list: &NewTodoList) -> Result<TodoList> {
        debug!("Creating to-do list");
        let endpoint = format!("projects/{project_id}/todolists.json");
        decode(self.client.post(&endpoint, &Payload::json(list)?).await?, CREATED)
    }

    #[instrument(skip(self, list), fields(name = %list.name))]
    pub async fn update(&self, project_id: u64, id: u64, list: &NewTodoList) -> Result<TodoList> {
        let endpoint = list_path(project_id, id);
        decode(self.client.put(&endpoint, &Payload::json(list)?).await?, OK)
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, project_id: u64, id: u64) -> Result<()> {
        expect_no_content(self.client.delete(&list_path(project_id, id)).await?)
    }

    /// Put the project's lists in the given order.
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn reorder(&self, project_id: u64, ids: &[u64]) -> Result<()> {
        debug!("Reordering to-do lists");
        let endpoint = format!("projects/{project_id}/todolists/reorder.json");
        let payload = Payload::Json(reorder_body(ids));
        expect_no_content(self.client.put(&endpoint, &payload).await?)
    }
}

fn lists_path(project_id: Option<u64>, filter: Option<TodoListFilter>) -> String {
    let mut path = match project_id {
        Some(project_id) => format!("projects/{project_id}/todolists"),
        None => "todolists".to_string(),
    };
    if let Some(filter) = filter {
        path.push('/');
        path.push_str(filter.as_str());
    }
    path.push_str(".json");
    path
}

fn list_path(project_id: u64, id: u64) -> String {
    format!("projects/{project_id}/todolists/{id}.json")
}

fn reorder_body(ids: &[u64]) -> serde_json::Value {
    ids.iter()
        .map(|id| json!({ "todo-list": { "id": id } }))
        .collect()
}
