//! basecamp-core - Core types for the Basecamp API binding.
//!
//! Plain data carried between the authorization flow and the resource
//! layer, plus the error taxonomy shared by every crate in the workspace.
//! Nothing in here touches the network.

pub mod account;
pub mod credentials;
pub mod error;
pub mod tokens;

pub use account::{AccountReference, AccountType, Authorization, Identity};
pub use credentials::Credentials;
pub use error::Error;
pub use tokens::{AccessToken, RefreshToken, TokenPair};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
