//! The `lensmatch search` command: browse the catalog without an image.

use std::path::PathBuf;

use clap::Args;
use lensmatch_core::{Config, Query};

use super::{open_lensmatch, open_writer, resolve_format, OutputFormat};

/// Arguments for the `search` command.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Text to look for in names, categories, descriptions and tags
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Category to keep (`all` keeps every category)
    #[arg(long, default_value = "all")]
    pub category: String,

    /// Catalog file (defaults to `[catalog] path`)
    #[arg(short, long, env = "LENSMATCH_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Maximum number of items
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Output format (defaults to `[output] format`)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Execute the search command.
pub fn execute(args: SearchArgs, config: Config) -> anyhow::Result<()> {
    let format = resolve_format(args.format, &config);
    let pretty = config.output.pretty;
    let lensmatch = open_lensmatch(args.catalog.as_deref(), config)?;

    let query = Query::new(args.query, args.category);
    let mut items = lensmatch.search(&query);
    tracing::debug!("{} of {} items match {:?}", items.len(), lensmatch.catalog().len(), query);
    if let Some(limit) = args.limit {
        items.truncate(limit);
    }

    let mut writer = open_writer(None, format, pretty)?;
    writer.write_items(&items)?;
    writer.flush()?;
    Ok(())
}
