//! Bot management commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;

use qnabot_core::bot::{self, NewBot};
use qnabot_core::Settings;

use crate::output;

#[derive(Subcommand)]
pub enum BotCommands {
    /// Register a new bot
    Create(CreateBotArgs),

    /// List all bots
    List,

    /// Show one bot
    Show {
        /// Bot ID
        id: String,
    },
}

#[derive(Args)]
pub struct CreateBotArgs {
    /// Bot name
    pub name: String,

    /// Explicit bot ID (generated when omitted)
    #[arg(long)]
    pub id: Option<String>,

    /// Bot description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Reply used when no answer qualifies
    #[arg(long)]
    pub fallback: Option<String>,

    /// Offer a human handover in the default fallback
    #[arg(long)]
    pub handover: bool,

    /// Handover text appended to the default fallback
    #[arg(long)]
    pub handover_message: Option<String>,
}

pub async fn execute(cmd: BotCommands, settings: &Settings) -> Result<()> {
    let services = super::connect(settings).await?;
    let registry = services.bots.as_ref();

    match cmd {
        BotCommands::Create(args) => {
            let new = NewBot {
                name: args.name,
                description: args.description,
                fallback_message: args.fallback,
                handover_to_human: args.handover,
                handover_message: args.handover_message,
            };
            let bot = bot::create_bot(registry, new, args.id.as_deref()).await?;
            println!(
                "{} Created bot: {} ({})",
                "✓".green().bold(),
                bot.name.cyan(),
                bot.id.dimmed()
            );
        }

        BotCommands::List => {
            let bots = bot::list_bots(registry).await?;
            output::print_bots_table(&bots);
        }

        BotCommands::Show { id } => {
            let bot = bot::get_bot(registry, &id).await?;
            output::print_bot(&bot);
        }
    }

    Ok(())
}
