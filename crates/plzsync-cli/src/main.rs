#![doc = include_str!("../README.md")]

mod host;

use clap::Parser;
use host::command::{Command, HELP, in_postal_code_region};
use host::config::{CliArgs, HostConfig};
use host::instrumented::InstrumentedLookup;
use host::render::render;
use host::telemetry::init_telemetry;
use plzsync::{FormSnapshot, HttpLookup, Resolver, ResolverHandle};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tokio::sync::watch;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = HostConfig::try_from(args)?;

    let providers = init_telemetry()?;
    log_startup_info(&config);

    let lookup = HttpLookup::new(&config.base_url, config.lookup_timeout)?;
    let resolver = Resolver::spawn(
        Arc::new(InstrumentedLookup::new(lookup)),
        config.resolver.clone(),
    );

    let printer = tokio::spawn(print_renders(resolver.subscribe()?));
    println!("{HELP}");

    let session = run_session(&resolver).await;

    if let Err(e) = resolver.shutdown().await {
        tracing::error!("Error during resolver shutdown: {:?}", e);
    }
    let _ = printer.await;
    providers.shutdown();

    tracing::info!("Resolver shut down");
    session
}

fn log_startup_info(config: &HostConfig) {
    if cfg!(debug_assertions) {
        tracing::info!("Starting resolver with full config: {:#?}", config);
    } else {
        tracing::info!(
            "Starting resolver against {} ({:?} debounce)",
            config.base_url,
            config.resolver.debounce
        );
    }
}

/// Feeds stdin commands to the resolver until `quit`, end of input or Ctrl+C.
async fn run_session(resolver: &ResolverHandle) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            interrupted = signal::ctrl_c() => {
                interrupted?;
                tracing::info!("Received Ctrl+C signal");
                return Ok(());
            }
        };
        let Some(line) = line else {
            tracing::debug!("End of input");
            return Ok(());
        };

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };

        match command {
            Command::Locality(text) => resolver.edit_locality(text).await?,
            Command::PostalCode(text) => resolver.edit_postal_code(text).await?,
            Command::Toggle => resolver.toggle_dropdown().await?,
            Command::Select(code) => resolver.select_candidate(code).await?,
            Command::Click(target) => {
                resolver
                    .pointer_down(&in_postal_code_region, target.as_str())
                    .await?;
            }
            Command::Show => print!("{}", render(&resolver.snapshot().await?)),
            Command::Help => println!("{HELP}"),
            Command::Quit => return Ok(()),
        }
    }
}

/// Prints every render the resolver publishes until it shuts down.
async fn print_renders(mut renders: watch::Receiver<FormSnapshot>) {
    while renders.changed().await.is_ok() {
        let form = renders.borrow_and_update().clone();
        println!("{}", render(&form));
    }
}
