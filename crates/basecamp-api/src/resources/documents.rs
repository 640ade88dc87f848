//! Text documents, account-wide or per project.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, instrument};

use basecamp_core::Result;

use super::{CREATED, Creator, OK, decode, expect_no_content};
use crate::client::ResourceClient;
use crate::transport::Payload;

/// A document.
///
/// Listings omit `content`; fetch the single document to get it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub creator: Option<Creator>,
    #[serde(default)]
    pub created_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Document operations.
#[derive(Debug, Clone, Copy)]
pub struct Documents<'a> {
    client: &'a ResourceClient,
}

impl<'a> Documents<'a> {
    pub(crate) fn new(client: &'a ResourceClient) -> Self {
        Self { client }
    }

    /// Documents across every project of the account.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Document>> {
        decode(self.client.get("documents.json").await?, OK)
    }

    #[instrument(skip(self))]
    pub async fn list_for_project(&self, project_id: u64) -> Result<Vec<Document>> {
        let endpoint = format!("projects/{project_id}/documents.json");
        decode(self.client.get(&endpoint).await?, OK)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, project_id: u64, id: u64) -> Result<Document> {
        decode(self.client.get(&document_path(project_id, id)).await?, OK)
    }

    #[instrument(skip(self, content))]
    pub async fn create(&self, project_id: u64, title: &str, content: &str) -> Result<Document> {
        debug!("Creating document");
        let endpoint = format!("projects/{project_id}/documents.json");
        let payload = Payload::Json(json!({ "title": title, "content": content }));
        decode(self.client.post(&endpoint, &payload).await?, CREATED)
    }

    #[instrument(skip(self, content))]
    pub async fn update(
        &self,
        project_id: u64,
        id: u64,
        title: &str,
        content: &str,
    ) -> Result<Document> {
        let payload = Payload::Json(json!({ "title": title, "content": content }));
        decode(
            self.client
                .put(&document_path(project_id, id), &payload)
                .await?,
            OK,
        )
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, project_id: u64, id: u64) -> Result<()> {
        expect_no_content(self.client.delete(&document_path(project_id, id)).await?)
    }
}

fn document_path(project_id: u64, id: u64) -> String {
    format!("projects/{project_id}/documents/{id}.json")
}
