//! basecamp-api - Client for the Basecamp (bcx) API.
//!
//! Authorization goes through [`AuthFlow`]; resource calls go through a
//! [`ResourceClient`] scoped to one account. Both sit on [`HttpTransport`],
//! which turns provider 500s and 429s into typed errors.
//!
//! # Example
//!
//! ```no_run
//! use basecamp_api::{AuthFlow, ResourceClient};
//! use basecamp_core::{AccountType, Credentials};
//!
//! # async fn example(code: &str) -> basecamp_core::Result<()> {
//! let flow = AuthFlow::new(Credentials::new("client-id", "client-secret", "https://app.example/cb"))?;
//! println!("send the user to {}", flow.launchpad_url());
//!
//! // ... later, with the code Launchpad handed back:
//! let tokens = flow.get_token(code).await?;
//! let accounts = flow.get_accounts(&tokens.access_token, &AccountType::default()).await?;
//!
//! let client = ResourceClient::new(
//!     accounts[0].href.clone(),
//!     tokens.access_token.clone(),
//!     tokens.refresh_token.clone(),
//! )?;
//! for project in client.projects().list().await? {
//!     println!("{}: {}", project.id, project.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod resources;
pub mod transport;

pub use auth::{AuthFlow, DEFAULT_AUTH_BASE_URL, Launchpad};
pub use client::ResourceClient;
pub use transport::{HttpTransport, Payload, ResponseEnvelope, TransportConfig};

pub use basecamp_core::{Error, Result};
