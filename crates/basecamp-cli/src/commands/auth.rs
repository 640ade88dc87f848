//! Launchpad authorization commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use basecamp_api::{AuthFlow, DEFAULT_AUTH_BASE_URL, Launchpad};
use basecamp_core::{AccessToken, AccountType, Credentials};

use crate::output;

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Print the URL to send the user to
    Url(UrlArgs),

    /// Exchange an authorization code for tokens
    Token(TokenArgs),

    /// Show who a token belongs to
    Identity(IdentityArgs),

    /// List the accounts a token can reach
    Accounts(AccountsArgs),
}

/// The registered application.
#[derive(Args, Debug)]
pub struct ClientArgs {
    /// Application client id
    #[arg(long)]
    pub client_id: String,

    /// Application client secret
    #[arg(long)]
    pub client_secret: String,

    /// Redirect URI registered for the application
    #[arg(long)]
    pub redirect_uri: String,

    /// Authorization server base URL
    #[arg(long, default_value = DEFAULT_AUTH_BASE_URL)]
    pub auth_base_url: String,
}

impl ClientArgs {
    fn flow(&self) -> Result<AuthFlow> {
        let credentials = Credentials::new(
            self.client_id.as_str(),
            self.client_secret.as_str(),
            self.redirect_uri.as_str(),
        );
        Ok(AuthFlow::new(credentials)
            .context("Failed to create HTTP client")?
            .with_auth_base_url(self.auth_base_url.as_str()))
    }
}

#[derive(Args, Debug)]
pub struct UrlArgs {
    #[command(flatten)]
    pub client: ClientArgs,
}

#[derive(Args, Debug)]
pub struct TokenArgs {
    #[command(flatten)]
    pub client: ClientArgs,

    /// Code Launchpad appended to the redirect URI
    #[arg(long)]
    pub code: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Debug)]
pub struct IdentityArgs {
    /// OAuth access token
    #[arg(long)]
    pub token: String,

    /// Authorization server base URL
    #[arg(long, default_value = DEFAULT_AUTH_BASE_URL)]
    pub auth_base_url: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Debug)]
pub struct AccountsArgs {
    /// OAuth access token
    #[arg(long)]
    pub token: String,

    /// Product to keep (`bcx`, `bc3`, ...) or `all`
    #[arg(long, default_value = "bcx")]
    pub product: String,

    /// Authorization server base URL
    #[arg(long, default_value = DEFAULT_AUTH_BASE_URL)]
    pub auth_base_url: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn handle(cmd: AuthCommand) -> Result<()> {
    match cmd.command {
        AuthSubcommand::Url(args) => url(args),
        AuthSubcommand::Token(args) => token(args).await,
        AuthSubcommand::Identity(args) => identity(args).await,
        AuthSubcommand::Accounts(args) => accounts(args).await,
    }
}

fn url(args: UrlArgs) -> Result<()> {
    let flow = args.client.flow()?;
    println!("{}", flow.launchpad_url());
    Ok(())
}

async fn token(args: TokenArgs) -> Result<()> {
    let flow = args.client.flow()?;

    output::status("Exchanging authorization code...");
    let tokens = flow
        .get_token(&args.code)
        .await
        .context("Failed to exchange authorization code")?;

    output::success("Authorization code exchanged");
    output::json(&tokens, args.pretty)
}

async fn identity(args: IdentityArgs) -> Result<()> {
    let identity = launchpad(&args.auth_base_url)?
        .get_identity(&AccessToken::new(args.token.as_str()))
        .await
        .context("Failed to fetch identity")?;

    output::json(&identity, args.pretty)
}

async fn accounts(args: AccountsArgs) -> Result<()> {
    let account_type = AccountType::from(args.product.as_str());
    let accounts = launchpad(&args.auth_base_url)?
        .get_accounts(&AccessToken::new(args.token.as_str()), &account_type)
        .await
        .context("Failed to fetch accounts")?;

    if accounts.is_empty() {
        output::status(&format!("No {account_type} accounts found."));
    }
    output::json(&accounts, args.pretty)
}

fn launchpad(auth_base_url: &str) -> Result<Launchpad> {
    Ok(Launchpad::new()
        .context("Failed to create HTTP client")?
        .with_auth_base_url(auth_base_url))
}
