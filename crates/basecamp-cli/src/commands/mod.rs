//! Subcommand implementations.

pub mod auth;
pub mod projects;
pub mod todos;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use basecamp_api::ResourceClient;
use basecamp_core::AccessToken;

/// Where and as whom resource commands run.
#[derive(Args, Debug)]
pub struct AccountArgs {
    /// Account API URL, the `href` of an entry from `bcx auth accounts`
    #[arg(long)]
    pub account_url: String,

    /// OAuth access token
    #[arg(long)]
    pub token: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl AccountArgs {
    pub fn client(&self) -> Result<ResourceClient> {
        debug!(account_url = %self.account_url, "Using account");
        ResourceClient::new(
            self.account_url.as_str(),
            AccessToken::new(self.token.as_str()),
            None,
        )
        .context("Failed to create HTTP client")
    }
}
