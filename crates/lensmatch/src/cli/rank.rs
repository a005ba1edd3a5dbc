//! The `lensmatch rank` command.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Args;
use lensmatch_core::classify::parse_predictions;
use lensmatch_core::{Config, MatchResult, Prediction, Query};
use serde::Serialize;

use super::{open_lensmatch, open_writer, resolve_format, OutputFormat};

/// Arguments for the `rank` command.
#[derive(Args, Debug)]
pub struct RankArgs {
    /// Classifier predictions as JSON (`-` reads stdin)
    #[arg(short, long, required_unless_present = "image", conflicts_with = "image")]
    pub predictions: Option<PathBuf>,

    /// Image to send to the configured classifier
    #[arg(short, long)]
    pub image: Option<PathBuf>,

    /// Catalog file (defaults to `[catalog] path`)
    #[arg(short, long, env = "LENSMATCH_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Maximum number of items (defaults to `[ranking] default_limit`)
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Keep only results whose name, category, description or tags contain this text
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Keep only results in this category
    #[arg(long, default_value = "all")]
    pub category: String,

    /// Output format (defaults to `[output] format`)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Include predictions, scores and matched fields
    #[arg(long)]
    pub explain: bool,
}

/// `--explain` output for the JSON formats.
#[derive(Serialize)]
struct Explanation<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<&'a Path>,
    predictions: &'a [Prediction],
    fallback: bool,
    results: &'a [MatchResult<'a>],
}

/// Execute the rank command.
pub async fn execute(args: RankArgs, config: Config) -> anyhow::Result<()> {
    let format = resolve_format(args.format, &config);
    let pretty = config.output.pretty;
    let lensmatch = open_lensmatch(args.catalog.as_deref(), config)?;
    let query = Query::new(args.query.as_str(), args.category.as_str());

    let (predictions, ranking) = match &args.image {
        Some(image) => {
            let report = lensmatch.rank_image(image, args.limit).await?;
            (report.predictions, report.ranking)
        }
        None => {
            let source = args.predictions.as_deref().unwrap_or(Path::new("-"));
            let predictions = read_predictions(source)?;
            let ranking = lensmatch.rank(&predictions, args.limit);
            (predictions, ranking)
        }
    };

    if ranking.fallback {
        tracing::warn!(
            "No item matched the predictions; showing the first {} catalog items",
            ranking.results.len()
        );
    }
    let fallback = ranking.fallback;
    let results = apply_query(ranking.results, &query);

    let mut writer = open_writer(args.output.as_deref(), format, pretty)?;
    if !args.explain {
        let items: Vec<_> = results.iter().map(|r| r.item).collect();
        writer.write_items(&items)?;
    } else if format == lensmatch_core::OutputFormat::Text {
        writer.write_strings(&[summarize(&predictions)])?;
        writer.write_results(&results)?;
    } else {
        writer.write(&Explanation {
            image: args.image.as_deref(),
            predictions: &predictions,
            fallback,
            results: &results,
        })?;
    }
    writer.flush()?;

    if let Some(path) = &args.output {
        tracing::info!("Output written to {:?}", path);
    }
    Ok(())
}

/// Read a prediction list from a file, or stdin for `-`.
fn read_predictions(path: &Path) -> anyhow::Result<Vec<Prediction>> {
    let json = if path == Path::new("-") {
        let mut json = String::new();
        std::io::stdin().read_to_string(&mut json)?;
        json
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read predictions {:?}: {e}", path))?
    };
    Ok(parse_predictions(&json)?)
}

/// Post-filter ranked results, keeping their order.
fn apply_query<'a>(mut results: Vec<MatchResult<'a>>, query: &Query) -> Vec<MatchResult<'a>> {
    results.retain(|r| query.matches(r.item));
    results
}

/// "Predictions: coffee mug (0.92), cup (0.05)"
fn summarize(predictions: &[Prediction]) -> String {
    if predictions.is_empty() {
        return "Predictions: none".to_string();
    }
    let labels: Vec<String> = predictions
        .iter()
        .map(|p| format!("{} ({:.2})", p.label, p.confidence))
        .collect();
    format!("Predictions: {}", labels.join(", "))
}
