//! Search command.

use anyhow::Result;
use clap::{Args, ValueEnum};

use qnabot_core::search::SearchRequest;
use qnabot_core::Settings;

use crate::output;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Strategy {
    /// Nearest by vector distance
    Vector,
    /// Highest cosine similarity
    Cosine,
    /// Blend of cosine and trigram text similarity
    Hybrid,
    /// Thresholded merge of cosine and hybrid
    Ensemble,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Question to search for
    pub query: String,

    /// Restrict to one bot
    #[arg(short, long)]
    pub bot: Option<String>,

    /// Maximum number of results
    #[arg(short, long, default_value = "5")]
    pub limit: usize,

    /// Retrieval strategy
    #[arg(short, long, value_enum, default_value = "ensemble")]
    pub strategy: Strategy,
}

pub async fn execute(args: SearchArgs, settings: &Settings) -> Result<()> {
    let services = super::connect(settings).await?;
    let retrieval = &services.retrieval;
    let req = SearchRequest::new(&args.query, args.bot.as_deref(), args.limit);

    let results = match args.strategy {
        Strategy::Vector => retrieval.search_by_vector(&req).await?,
        Strategy::Cosine => retrieval.search_by_cosine(&req).await?,
        Strategy::Hybrid => retrieval.search_by_hybrid(&req).await?,
        Strategy::Ensemble => retrieval.search_ensemble(&req).await?,
    };

    output::print_candidates(&results);
    Ok(())
}
