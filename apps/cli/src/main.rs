//! Awesauce CLI — query the content API and render page metadata.
//!
//! Fetches sites, posts, and posts feedback against the configured CMS, and
//! prints the meta tags and JSON-LD a page for a post would carry.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
