//! Unresolved query triage commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;

use qnabot_core::unresolved::{self, UnresolvedStatus};
use qnabot_core::Settings;

use crate::output;

#[derive(Subcommand)]
pub enum UnresolvedCommands {
    /// List logged questions, newest first
    List(ListArgs),

    /// Change the triage status of an entry
    SetStatus {
        /// Entry ID
        id: String,

        /// New status (pending, skipped, resolved)
        status: String,
    },

    /// Delete an entry
    Delete {
        /// Entry ID
        id: String,
    },
}

#[derive(Args)]
pub struct ListArgs {
    /// Only entries of this bot
    #[arg(short, long)]
    pub bot: Option<String>,

    #[arg(long, default_value = "0")]
    pub offset: usize,

    #[arg(long, default_value = "20")]
    pub limit: usize,
}

pub async fn execute(cmd: UnresolvedCommands, settings: &Settings) -> Result<()> {
    let services = super::connect(settings).await?;
    let log = services.unresolved.as_ref();

    match cmd {
        UnresolvedCommands::List(args) => {
            let entries =
                unresolved::list(log, args.bot.as_deref(), args.offset, args.limit).await?;
            output::print_unresolved_table(&entries);
        }

        UnresolvedCommands::SetStatus { id, status } => {
            let parsed = UnresolvedStatus::from_str(&status).ok_or_else(|| {
                anyhow::anyhow!(
                    "Invalid status '{}'. Use: pending, skipped, resolved",
                    status
                )
            })?;
            let entry = unresolved::set_status(log, &id, parsed).await?;
            println!(
                "{} Marked {} as {}",
                "✓".green().bold(),
                entry.id.dimmed(),
                entry.status.as_str().cyan()
            );
        }

        UnresolvedCommands::Delete { id } => {
            unresolved::delete(log, &id).await?;
            println!("{} Deleted unresolved query {}", "✓".green().bold(), id.dimmed());
        }
    }

    Ok(())
}
