use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{ExhibitionBrowser, HttpSearchClient, ViewportClass};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    task::JoinSet,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod controller;
mod render;

use config::load_settings;
use controller::{
    events::{parse_command, UiEvent},
    orchestration::{dispatch_ui_event, settle, UiStep},
};
use render::{render_view, TableState};

#[derive(Parser, Debug)]
#[command(name = "exhibit-browser", about = "Browse, search and sort museum exhibitions")]
struct Args {
    /// Exhibitions API root, e.g. https://api.artic.edu/api/v1/exhibitions
    #[arg(long)]
    base_url: Option<String>,
    /// Viewport width in pixels used to pick the pagination density.
    #[arg(long)]
    viewport_width: Option<u32>,
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(base_url) = args.base_url {
        settings.api_base_url = base_url;
    }
    if let Some(width) = args.viewport_width {
        settings.viewport_width = width;
    }

    let remote = HttpSearchClient::new(&settings.api_base_url)
        .context("failed to configure exhibitions api client")?;
    info!(
        base_url = %remote.base_url(),
        viewport_width = settings.viewport_width,
        "starting exhibition browser"
    );
    let browser = Arc::new(ExhibitionBrowser::new(
        Arc::new(remote),
        settings.throttle_interval(),
        ViewportClass::from_width(settings.viewport_width),
    ));

    let mut table = TableState::wrapping();
    let mut in_flight = JoinSet::new();
    let step = dispatch_ui_event(
        &browser,
        UiEvent::RetryRequested,
        &mut table,
        &mut in_flight,
    )
    .await;
    present(&browser, &step, &table).await;
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let step = tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read input")? else {
                    break;
                };
                match parse_command(&line) {
                    Ok(event) => {
                        dispatch_ui_event(&browser, event, &mut table, &mut in_flight).await
                    }
                    Err(err) if err.is_silent() => continue,
                    Err(err) => {
                        println!("{err}");
                        continue;
                    }
                }
            }
            Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                settle(joined.context("fetch task failed")?, &mut table)
            }
        };

        if step.exit {
            break;
        }
        present(&browser, &step, &table).await;
    }

    Ok(())
}

async fn present(browser: &ExhibitionBrowser, step: &UiStep, table: &TableState) {
    if let Some(status) = &step.status {
        println!("{status}");
    }
    if step.rerender {
        print!("{}", render_view(&browser.view().await, table));
    }
}
