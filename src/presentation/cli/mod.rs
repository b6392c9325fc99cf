use std::net::SocketAddr;

use clap::{Args, Parser, Subcommand};

use crate::infrastructure::anilist::ANILIST_URL;
use crate::infrastructure::client::RewindClient;

#[derive(Debug, Parser)]
#[command(author, version, about = "Build a year-in-review report from an AniList profile", long_about = None)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "ANIREWIND_URL",
        default_value = "http://localhost:2110"
    )]
    pub api_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve(ServeCommand),

    /// Fetch a year-in-review report for an AniList user
    Rewind(RewindCommand),

    /// Fetch a previously generated report by share id
    Share(ShareCommand),
}

#[derive(Debug, Args)]
pub struct ServeCommand {
    #[arg(long, env = "ANIREWIND_BIND_ADDRESS", default_value = "127.0.0.1:2110")]
    pub bind_address: SocketAddr,

    #[arg(long, env = "ANIREWIND_ANILIST_URL", default_value = ANILIST_URL)]
    pub anilist_url: String,

    /// How long a built report is served from cache, in seconds.
    #[arg(long, env = "ANIREWIND_CACHE_TTL_SECS", default_value_t = 3600)]
    pub cache_ttl_secs: u64,
}

#[derive(Debug, Args)]
pub struct RewindCommand {
    /// AniList username
    #[arg(long)]
    pub username: String,

    /// Target year; the server defaults to the current UTC year
    #[arg(long)]
    pub year: Option<i32>,
}

#[derive(Debug, Args)]
pub struct ShareCommand {
    pub share_id: String,
}

pub async fn run_rewind(client: &RewindClient, command: RewindCommand) -> anyhow::Result<()> {
    let report = client.rewind(&command.username, command.year).await?;
    print_json(&report)
}

pub async fn run_share(client: &RewindClient, command: ShareCommand) -> anyhow::Result<()> {
    let report = client.share(&command.share_id).await?;
    print_json(&report)
}

pub(crate) fn print_json<T>(value: &T) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
