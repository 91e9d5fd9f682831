//! Token command - issues a console bearer token for local use

use anyhow::Context;
use clap::Args;

use crate::config::AppConfig;
use crate::domain::account::AccountId;

#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Account the token authenticates as
    #[arg(long)]
    pub account_id: String,
}

pub async fn run(args: TokenArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    let repositories = crate::create_repositories(&config).await?;

    let account = repositories
        .accounts
        .get(&AccountId::from(args.account_id.as_str()))
        .await?
        .with_context(|| format!("account not found: {}", args.account_id))?;

    let token = crate::create_jwt_service(&config).generate(&account)?;
    println!("{}", token);

    Ok(())
}
