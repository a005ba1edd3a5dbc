//! The `lensmatch categories` command.

use std::path::PathBuf;

use clap::Args;
use lensmatch_core::Config;

use super::{open_lensmatch, open_writer, resolve_format, OutputFormat};

/// Arguments for the `categories` command.
#[derive(Args, Debug)]
pub struct CategoriesArgs {
    /// Catalog file (defaults to `[catalog] path`)
    #[arg(short, long, env = "LENSMATCH_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Output format (defaults to `[output] format`)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Print `all` followed by every distinct category, sorted.
pub fn execute(args: CategoriesArgs, config: Config) -> anyhow::Result<()> {
    let format = resolve_format(args.format, &config);
    let pretty = config.output.pretty;
    let lensmatch = open_lensmatch(args.catalog.as_deref(), config)?;

    let mut writer = open_writer(None, format, pretty)?;
    writer.write_strings(&lensmatch.categories())?;
    writer.flush()?;
    Ok(())
}
