//! Comments on messages, to-dos, documents, uploads and calendar events.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, instrument};

use basecamp_core::Result;

use super::{CREATED, Creator, decode, expect_no_content};
use crate::client::ResourceClient;
use crate::transport::Payload;

/// A comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub content: String,
    #[serde(default)]
    pub creator: Option<Creator>,
    #[serde(default)]
    pub created_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<FixedOffset>>,
}

/// Kinds of record that accept comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicKind {
    Messages,
    Todos,
    Documents,
    Uploads,
    CalendarEvents,
}

impl TopicKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TopicKind::Messages => "messages",
            TopicKind::Todos => "todos",
            TopicKind::Documents => "documents",
            TopicKind::Uploads => "uploads",
            TopicKind::CalendarEvents => "calendar_events",
        }
    }
}

/// The record a comment is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topic {
    pub kind: TopicKind,
    pub id: u64,
}

impl Topic {
    pub fn new(kind: TopicKind, id: u64) -> Self {
        Self { kind, id }
    }
}

/// Comment operations.
#[derive(Debug, Clone, Copy)]
pub struct Comments<'a> {
    client: &'a ResourceClient,
}

impl<'a> Comments<'a> {
    pub(crate) fn new(client: &'a ResourceClient) -> Self {
        Self { client }
    }

    /// Comment on a topic, notifying `subscribers` (person ids).
    #[instrument(skip(self, content, subscribers))]
    pub async fn create(
        &self,
        project_id: u64,
        topic: Topic,
        content: &str,
        subscribers: &[u64],
    ) -> Result<Comment> {
        debug!("Creating comment");
        let payload = Payload::Json(json!({
            "content": content,
            "subscribers": subscribers,
        }));
        decode(
            self.client
                .post(&comments_path(project_id, topic), &payload)
                .await?,
            CREATED,
        )
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, project_id: u64, id: u64) -> Result<()> {
        let endpoint = format!("projects/{project_id}/comments/{id}.json");
        expect_no_content(self.client.delete(&endpoint).await?)
    }
}

fn comments_path(project_id: u64, topic: Topic) -> String {
    format!(
        "projects/{project_id}/{}/{}/comments.json",
        topic.kind.as_str(),
        topic.id
    )
}
