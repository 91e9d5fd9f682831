//! CLI module for the Draft Variable API
//!
//! - `serve`: run the HTTP server
//! - `migrate`: apply or revert PostgreSQL migrations
//! - `token`: issue a console token for an account

pub mod migrate;
pub mod serve;
pub mod token;

use clap::{Parser, Subcommand};

/// Draft Variable API - inspect and edit draft workflow variables
#[derive(Parser)]
#[command(name = "draft-variable-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Run PostgreSQL migrations
    Migrate(migrate::MigrateArgs),

    /// Print a signed console token for an account
    Token(token::TokenArgs),
}
