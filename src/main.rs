// Copyright 2026 bcv-rates Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::sync::Arc;

use bcv_rates::extraction;
use bcv_rates::fetch::PageFetcher;
use bcv_rates::rest::{self, AppState};

#[derive(Parser)]
#[command(
    name = "bcv-rates",
    about = "HTTP API for USD/EUR exchange rates published by the Banco Central de Venezuela",
    version
)]
struct Cli {
    /// Source page URL to scrape
    #[arg(
        long,
        global = true,
        env = "BCV_SOURCE_URL",
        default_value = "https://www.bcv.org.ve/"
    )]
    source_url: String,

    /// Outbound request timeout in milliseconds
    #[arg(long, global = true, default_value_t = 10_000)]
    timeout_ms: u64,

    /// Accept invalid upstream TLS certificates (the BCV chain is often broken)
    #[arg(long, global = true, default_value_t = true, action = clap::ArgAction::Set)]
    accept_invalid_certs: bool,

    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port to bind
        #[arg(long, env = "PORT", default_value_t = 3000)]
        port: u16,
    },
    /// Fetch the source page once and print the extracted record as JSON
    Fetch,
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let directive = if cli.verbose {
        "bcv_rates=debug"
    } else {
        "bcv_rates=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(directive.parse().unwrap()),
        )
        .init();

    match cli.command {
        Commands::Serve { port } => {
            let source_url = validated_source_url(&cli.source_url)?;
            let state = Arc::new(AppState {
                fetcher: PageFetcher::new(cli.timeout_ms, cli.accept_invalid_certs),
                source_url,
            });
            rest::serve(port, state).await
        }
        Commands::Fetch => {
            let source_url = validated_source_url(&cli.source_url)?;
            let fetcher = PageFetcher::new(cli.timeout_ms, cli.accept_invalid_certs);
            let html = fetcher.fetch(&source_url).await?;

            // scraper's types are !Send; keep extraction off the async task
            let record =
                tokio::task::spawn_blocking(move || extraction::extract_rates(&html, &source_url))
                    .await??;

            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "bcv-rates", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn validated_source_url(raw: &str) -> Result<String> {
    let parsed = url::Url::parse(raw).context("invalid --source-url")?;
    Ok(parsed.to_string())
}
