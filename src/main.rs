//! `usher` CLI - fetch Twitch playback manifests from the terminal

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use usher::{StreamVariant, Usher, DEFAULT_CLIENT_ID};

#[derive(Parser)]
#[command(name = "usher")]
#[command(about = "Fetch Twitch HLS variant playlists for live channels and VODs")]
#[command(version)]
struct Cli {
    /// Twitch API client id (the public web-player id by default)
    #[arg(long, global = true, env = "USHER_CLIENT_ID", default_value = DEFAULT_CLIENT_ID)]
    client_id: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the variant playlist of a live channel
    Stream {
        /// Channel login name
        channel: String,

        /// Print the raw manifest instead of the parsed variant list
        #[arg(short, long)]
        raw: bool,
    },

    /// Fetch the variant playlist of an archived video
    Vod {
        /// Numeric video id
        id: String,

        /// Print the raw manifest instead of the parsed variant list
        #[arg(short, long)]
        raw: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    let twitch = Usher::new(cli.client_id)?;

    match cli.command {
        Commands::Stream { channel, raw } => {
            if raw {
                print!("{}", twitch.get_stream_raw(&channel).await?);
            } else {
                print_variants(&twitch.get_stream(&channel).await?);
            }
        }
        Commands::Vod { id, raw } => {
            if raw {
                print!("{}", twitch.get_vod_raw(&id).await?);
            } else {
                print_variants(&twitch.get_vod(&id).await?);
            }
        }
    }

    Ok(())
}

fn print_variants(variants: &[StreamVariant]) {
    for v in variants {
        println!(
            "{:<20} {:<12} {}",
            v.quality,
            v.resolution.as_deref().unwrap_or("-"),
            v.url
        );
    }
}
