//! Subcommand handlers and the helpers they share.

pub mod categories;
pub mod config;
pub mod rank;
pub mod search;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use clap::ValueEnum;
use lensmatch_core::{Catalog, Config, Lensmatch, OutputFormat as CoreOutputFormat, OutputWriter};

/// Output formats accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single JSON document
    Json,
    /// One JSON object per line (newline-delimited)
    Jsonl,
    /// Numbered plain text
    Text,
}

impl From<OutputFormat> for CoreOutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => CoreOutputFormat::Json,
            OutputFormat::Jsonl => CoreOutputFormat::JsonLines,
            OutputFormat::Text => CoreOutputFormat::Text,
        }
    }
}

/// The `--format` flag wins over `[output] format`.
pub(crate) fn resolve_format(flag: Option<OutputFormat>, config: &Config) -> CoreOutputFormat {
    flag.map(Into::into)
        .or_else(|| CoreOutputFormat::parse(&config.output.format))
        .unwrap_or(CoreOutputFormat::Text)
}

/// Load the catalog (`--catalog` or `[catalog] path`) and build the facade.
pub(crate) fn open_lensmatch(catalog: Option<&Path>, config: Config) -> anyhow::Result<Lensmatch> {
    let path = catalog
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.catalog_path());
    let catalog = Catalog::load(&path)?;
    Ok(Lensmatch::new(config, catalog)?)
}

/// Writer for stdout, or for `path` when given.
pub(crate) fn open_writer(
    path: Option<&Path>,
    format: CoreOutputFormat,
    pretty: bool,
) -> anyhow::Result<OutputWriter<Box<dyn Write>>> {
    let sink: Box<dyn Write> = match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };
    Ok(OutputWriter::new(sink, format, pretty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_overrides_config_format() {
        let mut config = Config::default();
        config.output.format = "jsonl".to_string();
        assert_eq!(resolve_format(None, &config), CoreOutputFormat::JsonLines);
        assert_eq!(
            resolve_format(Some(OutputFormat::Json), &config),
            CoreOutputFormat::Json
        );
    }

    #[test]
    fn test_unknown_config_format_falls_back_to_text() {
        let mut config = Config::default();
        config.output.format = "yaml".to_string();
        assert_eq!(resolve_format(None, &config), CoreOutputFormat::Text);
    }

    #[test]
    fn test_open_lensmatch_missing_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("catalog.json");
        let err = open_lensmatch(Some(&missing), Config::default())
            .err()
            .unwrap();
        assert!(err.to_string().contains("not found"));
    }
}
