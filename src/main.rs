#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::cargo)]
#![warn(clippy::perf)]
#![warn(clippy::complexity)]
#![warn(clippy::style)]
#![allow(clippy::multiple_crate_versions)]

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use playlist::FilterRules;
use sources::{builtin_sources, load_sources};
use sync::{collect, merge};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use util::{init_http_client, user_agent_from_env};

pub mod fetch;
pub mod playlist;
pub mod sources;
pub mod sync;
pub mod util;

/// Merges remote IPTV playlists into a single deduplicated M3U file
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path of the M3U file to write
    #[arg(long, default_value = "main.m3u")]
    m3u: PathBuf,

    /// Print what would be done, do not write
    #[arg(long)]
    dry_run: bool,

    /// JSON file listing `{ "label", "url" }` sources in priority order (defaults to the built-in list)
    #[arg(long)]
    sources: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Leave out the `# Last synced` line
    #[arg(long)]
    no_timestamp: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    for line in run(args, &user_agent_from_env()).await? {
        println!("{line}");
    }

    Ok(())
}

/// Runs one sync and returns the summary lines for stdout
async fn run(args: Args, user_agent: &str) -> Result<Vec<String>> {
    let sources = match &args.sources {
        Some(path) => load_sources(path).await?,
        None => builtin_sources(),
    };
    debug!("Merging {} sources", sources.len());

    let client = init_http_client(user_agent, Duration::from_secs(args.timeout))?;
    let filtered = collect(&client, &sources, &FilterRules::default()).await?;
    let (playlist, report) = merge(filtered);

    let synced_at = (!args.no_timestamp).then(Utc::now);
    let total = report.total_kept();
    let path = args.m3u.display();

    if args.dry_run {
        return Ok(vec![
            format!("Would write {total} channels to {path} {report}"),
            format!("Output would be {} lines", playlist.line_count(synced_at)),
        ]);
    }

    tokio::fs::write(&args.m3u, playlist.render(synced_at))
        .await
        .with_context(|| format!("Writing {path}"))?;
    info!("Wrote {path}");

    Ok(vec![format!("Synced {total} channels into {path} {report}")])
}
