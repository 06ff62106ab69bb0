//! Status command.

use anyhow::Result;
use colored::Colorize;

use qnabot_core::config::{ProviderKind, StoreKind};
use qnabot_core::{bot, QnaStore, Settings};

pub async fn execute(settings: &Settings) -> Result<()> {
    println!("{}", "Configuration".bold());
    match settings.store {
        StoreKind::Redis => println!("  {:<10} redis ({})", "Store", settings.redis_url),
        StoreKind::Memory => println!("  {:<10} memory", "Store"),
    }
    match settings.provider {
        ProviderKind::Ollama => println!(
            "  {:<10} ollama ({}, embed={}, gen={})",
            "Provider", settings.ollama_url, settings.embed_model, settings.gen_model
        ),
        ProviderKind::Hashing => println!("  {:<10} hashing (offline)", "Provider"),
    }
    println!("  {:<10} {}:{}", "Server", settings.host, settings.port);
    println!();

    let services = match super::connect(settings).await {
        Ok(services) => services,
        Err(e) => {
            println!("{}", "Health".bold());
            println!("  {:<10} {} {}", "Store", "✗".red().bold(), e);
            return Ok(());
        }
    };

    let report = services.health().await;
    let mark = |ok: bool| if ok { "✓".green().bold() } else { "✗".red().bold() };

    println!("{}", "Health".bold());
    println!("  {:<10} {}", "Store", mark(report.store));
    println!("  {:<10} {}", "Provider", mark(report.provider));

    if report.store {
        let total = services.store.count_qna(None).await?;
        let bots = bot::list_bots(services.bots.as_ref()).await?;
        println!();
        println!("{} bot(s), {} QnA record(s)", bots.len(), total);
    }

    Ok(())
}
