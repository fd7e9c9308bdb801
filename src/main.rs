// =============================================================================
// Txmediator - Main Entry Point
// =============================================================================
//
// Project: Txmediator - Transaction mediation client
// Author: arkSong (arksong2018@gmail.com)
// Date: 2026-10-17
// Version: 0.1.0
// License: Apache 2.0 / MIT
//
// Description:
//   Command line front end for the concepts contract. Results are printed
//   as JSON on stdout, logs go to stderr.
//
// Runtime Requirements:
//   • RPC_URL / PRIVATE_KEY (or TXMEDIATOR_* / txmediator.toml) for
//     contract commands
//   • `units` commands need no configuration
//
// =============================================================================

use tracing::{error, info};
use tracing_subscriber::{prelude::*, EnvFilter};
use txmediator_common::ConfigFile;

mod clap;
mod commands;

const DEFAULT_LOG: &str = "info";

#[tokio::main]
async fn main() {
    let args = clap::parse();

    // the log directive may come from the config file, so read it first
    let file = ConfigFile::load(args.config.as_deref());
    let directive = args
        .log_level
        .clone()
        .or_else(|| file.as_ref().ok().and_then(|file| file.log.clone()));
    init_tracing(directive.as_deref());

    info!("🚀 Starting txmediator {}", clap::version());

    let file = match file {
        Ok(file) => file,
        Err(err) => {
            error!("❌ Failed to load configuration: {}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = commands::run(args.command, file).await {
        error!("❌ {:#}", err);
        std::process::exit(1);
    }
}

fn init_tracing(directive: Option<&str>) {
    let filter_layer = match directive {
        Some(directive) => EnvFilter::try_new(directive).unwrap_or_else(|err| {
            eprintln!("It looks like your log config is invalid. The following error occurred: {err}");
            EnvFilter::new(DEFAULT_LOG)
        }),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG)),
    };
    let fmt_layer = tracing_subscriber::fmt::Layer::new().with_writer(std::io::stderr);

    let subscriber = tracing_subscriber::Registry::default()
        .with(filter_layer)
        .with(fmt_layer);
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install tracing subscriber: {err}");
    }
}
