//! QnABot CLI
//!
//! Manage bots and their QnA banks, query the retrieval engine and run the
//! HTTP API.

use anyhow::Result;
use clap::Parser;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use commands::{Cli, Commands};

/// Initialize tracing, optionally mirroring output to a log file.
///
/// The returned guard flushes the file writer and must live until exit.
fn init_tracing(log_file: Option<&Path>) -> Option<WorkerGuard> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "qnabot=info,qnabot_engine=debug,qnabot_web=debug".into());

    let file_target = log_file.and_then(|path| {
        let dir = path.parent().filter(|p| !p.as_os_str().is_empty())?;
        let name = path.file_name()?;
        let _ = std::fs::create_dir_all(dir);
        Some((dir.to_path_buf(), name.to_os_string()))
    });

    match file_target {
        Some((dir, name)) => {
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false),
                )
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = match &cli.command {
        Commands::Serve(args) if args.log => Some(
            args.log_file
                .clone()
                .unwrap_or_else(commands::serve::default_log_path),
        ),
        _ => None,
    };

    let _guard = init_tracing(log_file.as_deref());

    cli.execute().await
}
