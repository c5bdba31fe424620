//! Console front end: fetch one container and print its links.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;
use url::Url;

use filedecrypt::application::services::{ContainerService, ServiceOptions};
use filedecrypt::config;
use filedecrypt::domain::entities::ContainerStatus;
use filedecrypt::infrastructure::http::{
    HttpKeyClient, HttpLinkResolver, HttpPageFetcher, HttpSettings,
};

/// Recover download links from a FileCrypt container.
#[derive(Parser)]
#[command(name = "filedecrypt")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Container URL, e.g. https://filecrypt.co/Container/XYZ123
    url: String,

    /// Print the assembled container as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(config.log_level.parse()?),
        )
        .init();
    config.print_summary();

    let url: Url = cli.url.parse().context("invalid container URL")?;

    let settings = HttpSettings::standard(config.user_agent.clone(), config.http_timeout());
    let fetcher = HttpPageFetcher::new(&settings)?;
    let key_client = HttpKeyClient::new(&settings, config.key_service_url.clone())?;
    let resolver = HttpLinkResolver::new(&settings)?;

    let service = ContainerService::new(
        Arc::new(fetcher),
        Arc::new(key_client),
        Arc::new(resolver),
        ServiceOptions {
            base_url: config.base_url.clone(),
            link_endpoint: config.link_endpoint.clone(),
            resolution_policy: config.resolution_policy,
        },
    );

    let container = match service.build_container(&url).await {
        Ok(container) => container,
        Err(err) => {
            eprintln!("{} {} stage failed: {}", "error:".red().bold(), err.stage(), err);
            std::process::exit(1);
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&container)?);
    } else {
        let status = match container.status() {
            ContainerStatus::Online => "online".green(),
            ContainerStatus::Offline => "offline".red(),
            ContainerStatus::Partial => "partial".yellow(),
            ContainerStatus::Unknown => "unknown".dimmed(),
        };
        println!("[{status}]");
        print!("{container}");
    }

    Ok(())
}
