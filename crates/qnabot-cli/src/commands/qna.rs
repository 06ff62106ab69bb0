//! QnA record commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use qnabot_core::qna::{NewQna, QnaFilter, QnaUpdate};
use qnabot_core::Settings;

use crate::output;

#[derive(Subcommand)]
pub enum QnaCommands {
    /// Add a QnA record, with generated paraphrases
    Add(AddArgs),

    /// Import records from a JSON file in one all-or-nothing batch
    Import(ImportArgs),

    /// Show one record
    Show {
        /// Record ID
        id: String,
    },

    /// List records
    List(ListArgs),

    /// Change a record's question and/or answer
    Update(UpdateArgs),

    /// Delete a record
    Delete(DeleteArgs),
}

#[derive(Args)]
pub struct AddArgs {
    /// Owning bot ID
    #[arg(short, long)]
    pub bot: String,

    /// Question text
    pub question: String,

    /// Answer text
    pub answer: String,
}

#[derive(Args)]
pub struct ImportArgs {
    /// JSON file: an array of {question, answer, botId} or {"vectors": [...]}
    pub file: PathBuf,

    /// Assign every entry to this bot, overriding botId in the file
    #[arg(short, long)]
    pub bot: Option<String>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Only records of this bot
    #[arg(short, long)]
    pub bot: Option<String>,

    /// Case-insensitive text filter on question and answer
    #[arg(short, long)]
    pub query: Option<String>,

    #[arg(long, default_value = "0")]
    pub offset: usize,

    #[arg(long, default_value = "20")]
    pub limit: usize,
}

#[derive(Args)]
pub struct UpdateArgs {
    /// Record ID
    pub id: String,

    /// New question (re-embeds the record)
    #[arg(short, long)]
    pub question: Option<String>,

    /// New answer
    #[arg(short, long)]
    pub answer: Option<String>,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Record ID
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ImportFile {
    Wrapped { vectors: Vec<NewQna> },
    Plain(Vec<NewQna>),
}

fn read_import(path: &Path, bot: Option<&str>) -> Result<Vec<NewQna>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    let parsed: ImportFile = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid import file {}", path.display()))?;
    let mut entries = match parsed {
        ImportFile::Wrapped { vectors } => vectors,
        ImportFile::Plain(entries) => entries,
    };
    if let Some(bot) = bot {
        for entry in &mut entries {
            entry.bot_id = bot.to_string();
        }
    }
    Ok(entries)
}

pub async fn execute(cmd: QnaCommands, settings: &Settings) -> Result<()> {
    let services = super::connect(settings).await?;
    let pipeline = &services.pipeline;

    match cmd {
        QnaCommands::Add(args) => {
            let record = pipeline
                .create_qna(NewQna::new(&args.question, &args.answer, &args.bot))
                .await?;
            println!(
                "{} Created QnA: {} ({})",
                "✓".green().bold(),
                record.question.cyan(),
                record.id.dimmed()
            );
        }

        QnaCommands::Import(args) => {
            let entries = read_import(&args.file, args.bot.as_deref())?;
            let total = entries.len();

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::with_template("{spinner:.cyan} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.set_message(format!("Embedding {} entries...", total));
            spinner.enable_steady_tick(Duration::from_millis(100));

            let result = pipeline.create_qna_batch(entries).await;
            spinner.finish_and_clear();

            let result = result?;
            println!(
                "{} Imported {} QnA record(s) from {}",
                "✓".green().bold(),
                result.count,
                args.file.display().to_string().cyan()
            );
        }

        QnaCommands::Show { id } => {
            let record = pipeline.get_qna(&id).await?;
            output::print_qna(&record);
        }

        QnaCommands::List(args) => {
            let filter = QnaFilter {
                bot_id: args.bot,
                q: args.query,
                offset: args.offset,
                limit: args.limit,
            };
            let records = pipeline.list_qna(&filter).await?;
            output::print_qna_table(&records);
        }

        QnaCommands::Update(args) => {
            let update = QnaUpdate {
                question: args.question,
                answer: args.answer,
            };
            if update.is_empty() {
                println!("{}", "Nothing to update: pass --question and/or --answer.".yellow());
                return Ok(());
            }
            let record = pipeline.update_qna(&args.id, update).await?;
            println!(
                "{} Updated QnA: {} ({})",
                "✓".green().bold(),
                record.question.cyan(),
                record.id.dimmed()
            );
        }

        QnaCommands::Delete(args) => {
            if !args.yes {
                let record = pipeline.get_qna(&args.id).await?;
                let confirmed = Confirm::new()
                    .with_prompt(format!("Delete \"{}\"?", record.question))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    println!("{}", "Aborted.".dimmed());
                    return Ok(());
                }
            }
            let record = pipeline.delete_qna(&args.id).await?;
            println!(
                "{} Deleted QnA: {} ({})",
                "✓".green().bold(),
                record.question.cyan(),
                record.id.dimmed()
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("qnabot-{}-{}.json", name, std::process::id()));
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_read_import_accepts_both_shapes() {
        let plain = write_temp(
            "plain",
            r#"[{"question": "Q1", "answer": "A1", "botId": "b"}]"#,
        );
        let wrapped = write_temp(
            "wrapped",
            r#"{"vectors": [{"question": "Q1", "answer": "A1", "botId": "b"},
                            {"question": "Q2", "answer": "A2", "botId": "b"}]}"#,
        );

        assert_eq!(read_import(&plain, None).unwrap().len(), 1);
        assert_eq!(read_import(&wrapped, None).unwrap().len(), 2);

        std::fs::remove_file(plain).ok();
        std::fs::remove_file(wrapped).ok();
    }

    #[test]
    fn test_read_import_bot_override() {
        let path = write_temp(
            "override",
            r#"[{"question": "Q1", "answer": "A1", "botId": "old"}]"#,
        );
        let entries = read_import(&path, Some("new")).unwrap();
        assert_eq!(entries[0].bot_id, "new");
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_read_import_rejects_garbage() {
        let path = write_temp("garbage", r#"{"nope": true}"#);
        assert!(read_import(&path, None).is_err());
        std::fs::remove_file(path).ok();
    }
}
