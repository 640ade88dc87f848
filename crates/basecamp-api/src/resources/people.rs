//! People with access to the account.
//!
//! Granting or revoking access to a project is not handled here.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use basecamp_core::Result;

use super::{OK, decode, expect_no_content};
use crate::client::ResourceClient;

/// A person in the account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub email_address: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub updated_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub url: Option<String>,
}

/// People operations.
#[derive(Debug, Clone, Copy)]
pub struct People<'a> {
    client: &'a ResourceClient,
}

impl<'a> People<'a> {
    pub(crate) fn new(client: &'a ResourceClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Person>> {
        decode(self.client.get("people.json").await?, OK)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: u64) -> Result<Person> {
        decode(self.client.get(&format!("people/{id}.json")).await?, OK)
    }

    /// The person behind the access token.
    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<Person> {
        decode(self.client.get("people/me.json").await?, OK)
    }

    /// Remove a person from the account. Admins only.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: u64) -> Result<()> {
        expect_no_content(self.client.delete(&format!("people/{id}.json")).await?)
    }
}
