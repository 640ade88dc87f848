//! Projects: list, create, edit, archive and delete.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, instrument};

use basecamp_core::Result;
use basecamp_core::error::ResourceError;

use super::{CREATED, Creator, OK, decode, expect_no_content};
use crate::client::ResourceClient;
use crate::transport::Payload;

/// A project in a Basecamp account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub starred: bool,
    #[serde(default)]
    pub creator: Option<Creator>,
    #[serde(default)]
    pub created_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Project operations.
#[derive(Debug, Clone, Copy)]
pub struct Projects<'a> {
    client: &'a ResourceClient,
}

impl<'a> Projects<'a> {
    pub(crate) fn new(client: &'a ResourceClient) -> Self {
        Self { client }
    }

    /// Active projects. Archived ones are left out.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Project>> {
        debug!("Listing projects");
        decode(self.client.get("projects.json").await?, OK)
    }

    /// Archived projects only.
    #[instrument(skip(self))]
    pub async fn list_archived(&self) -> Result<Vec<Project>> {
        debug!("Listing archived projects");
        decode(self.client.get("projects/archived.json").await?, OK)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: u64) -> Result<Project> {
        decode(self.client.get(&project_path(id)).await?, OK)
    }

    /// Create a project. A 403 means the account may not create projects or
    /// has reached its project limit.
    #[instrument(skip(self, description))]
    pub async fn create(&self, name: &str, description: &str) -> Result<Project> {
        debug!("Creating project");
        let payload = Payload::Json(json!({
            "name": name,
            "description": description,
        }));
        decode(self.client.post("projects.json", &payload).await?, CREATED)
    }

    #[instrument(skip(self, description))]
    pub async fn update(&self, id: u64, name: &str, description: &str) -> Result<Project> {
        let payload = Payload::Json(json!({
            "name": name,
            "description": description,
        }));
        decode(self.client.put(&project_path(id), &payload).await?, OK)
    }

    /// Archive (`true`) or restore (`false`) a project.
    ///
    /// # Errors
    ///
    /// [`ResourceError::NotArchived`] when archiving was acknowledged but the
    /// returned project is still active.
    #[instrument(skip(self))]
    pub async fn archive(&self, id: u64, archived: bool) -> Result<Project> {
        let payload = Payload::Json(json!({ "archived": archived }));
        let project: Project = decode(self.client.put(&project_path(id), &payload).await?, OK)?;

        if archived && !project.archived {
            return Err(ResourceError::NotArchived { id }.into());
        }
        Ok(project)
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, id: u64) -> Result<()> {
        debug!("Deleting project");
        expect_no_content(self.client.delete(&project_path(id)).await?)
    }
}

fn project_path(id: u64) -> String {
    format!("projects/{id}.json")
}
