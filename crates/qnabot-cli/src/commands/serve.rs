//! Web server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use qnabot_core::Settings;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on (defaults to the configured port)
    #[arg(long)]
    pub port: Option<u16>,

    /// Host to bind to (defaults to the configured host)
    #[arg(long)]
    pub host: Option<String>,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path, used with --log
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// `<data dir>/qnabot/serve.log`, or `./qnabot-serve.log` without a data dir.
pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("qnabot").join("serve.log"))
        .unwrap_or_else(|| PathBuf::from("qnabot-serve.log"))
}

pub async fn execute(args: ServeArgs, settings: &Settings) -> Result<()> {
    let host = args.host.unwrap_or_else(|| settings.host.clone());
    let port = args.port.unwrap_or(settings.port);
    let services = super::connect(settings).await?;

    println!();
    println!("  {} {}", "QnABot".cyan().bold(), "API Server".bold());
    println!();
    println!("  {}       http://{}:{}/api", "API".green(), host, port);
    println!("  {}    http://{}:{}/api/health", "Health".green(), host, port);
    println!(
        "  {}     {:?} / {:?}",
        "Store".green(),
        settings.store,
        settings.provider
    );
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    qnabot_web::run_server(services, &host, port).await?;

    Ok(())
}
