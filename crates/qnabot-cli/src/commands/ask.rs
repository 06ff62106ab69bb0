//! Ask command: one conversational turn against a bot.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use qnabot_core::Settings;

#[derive(Args)]
pub struct AskArgs {
    /// Bot ID
    #[arg(short, long)]
    pub bot: String,

    /// Conversation ID recorded with unresolved questions
    #[arg(short, long, default_value = "cli")]
    pub conversation: String,

    /// The user's message
    pub message: String,
}

pub async fn execute(args: AskArgs, settings: &Settings) -> Result<()> {
    let services = super::connect(settings).await?;
    let reply = services
        .conversation
        .reply(&args.bot, &args.conversation, &args.message)
        .await?;

    println!("{} {}", "Bot:".cyan().bold(), reply.content.trim_end());

    if let Some(matched) = &reply.matched {
        println!(
            "{}",
            format!(
                "matched \"{}\" (combined {:.3})",
                matched.question,
                matched.combined_score.unwrap_or_default()
            )
            .dimmed()
        );
    }
    if let Some(entry) = &reply.unresolved {
        println!(
            "{}",
            format!("logged as unresolved query {}", entry.id).dimmed()
        );
    }

    Ok(())
}
