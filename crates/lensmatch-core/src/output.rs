//! Output formatting for ranked items, search results, and category lists.
//!
//! JSON writes one document, JSON Lines one object per line, and Text a
//! numbered human-readable listing.

use serde::Serialize;
use std::io::{self, Write};

use crate::types::{CatalogItem, MatchResult};

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Single JSON array
    Json,
    /// One JSON value per line (newline-delimited JSON)
    JsonLines,
    /// Numbered plain text
    Text,
}

impl OutputFormat {
    /// Parse format from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "jsonl" | "jsonlines" | "ndjson" => Some(Self::JsonLines),
            "text" | "txt" | "plain" => Some(Self::Text),
            _ => None,
        }
    }
}

/// Writes listings in the chosen format.
pub struct OutputWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    pretty: bool,
    items_written: usize,
}

impl<W: Write> OutputWriter<W> {
    /// Create a new output writer.
    ///
    /// `pretty` only affects the JSON format.
    pub fn new(writer: W, format: OutputFormat, pretty: bool) -> Self {
        Self {
            writer,
            format,
            pretty,
            items_written: 0,
        }
    }

    /// Write a single serializable value.
    ///
    /// JSON honors `pretty`; JSON Lines and Text emit one compact line.
    pub fn write<T: Serialize>(&mut self, value: &T) -> io::Result<()> {
        if self.format == OutputFormat::Json && self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, value).map_err(io::Error::other)?;
        } else {
            serde_json::to_writer(&mut self.writer, value).map_err(io::Error::other)?;
        }
        writeln!(self.writer)?;
        self.items_written += 1;
        Ok(())
    }

    /// Write catalog items in order.
    pub fn write_items(&mut self, items: &[&CatalogItem]) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => {
                for (i, item) in items.iter().enumerate() {
                    writeln!(self.writer, "{:>2}. {}", i + 1, describe(item))?;
                }
                self.items_written += items.len();
                Ok(())
            }
            _ => self.write_serialized(items),
        }
    }

    /// Write ranked results with their scores and matched fields.
    pub fn write_results(&mut self, results: &[MatchResult<'_>]) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => {
                for (i, result) in results.iter().enumerate() {
                    write!(
                        self.writer,
                        "{:>2}. {}  score {:.1}",
                        i + 1,
                        describe(result.item),
                        result.score
                    )?;
                    if !result.matched_fields.is_empty() {
                        let fields: Vec<String> =
                            result.matched_fields.iter().map(|f| f.to_string()).collect();
                        write!(self.writer, "  ({})", fields.join(", "))?;
                    }
                    writeln!(self.writer)?;
                }
                self.items_written += results.len();
                Ok(())
            }
            _ => self.write_serialized(results),
        }
    }

    /// Write plain strings (e.g. a category list).
    pub fn write_strings(&mut self, values: &[String]) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => {
                for value in values {
                    writeln!(self.writer, "{value}")?;
                }
                self.items_written += values.len();
                Ok(())
            }
            _ => self.write_serialized(values),
        }
    }

    /// JSON array or JSON Lines for any serializable slice.
    fn write_serialized<T: Serialize>(&mut self, items: &[T]) -> io::Result<()> {
        match self.format {
            OutputFormat::Json | OutputFormat::Text => {
                if self.pretty {
                    serde_json::to_writer_pretty(&mut self.writer, items)
                        .map_err(io::Error::other)?;
                } else {
                    serde_json::to_writer(&mut self.writer, items).map_err(io::Error::other)?;
                }
                writeln!(self.writer)?;
            }
            OutputFormat::JsonLines => {
                // JSONL is never pretty-printed (one value per line)
                for item in items {
                    serde_json::to_writer(&mut self.writer, item).map_err(io::Error::other)?;
                    writeln!(self.writer)?;
                }
            }
        }
        self.items_written += items.len();
        Ok(())
    }

    /// Get the number of entries written.
    pub fn items_written(&self) -> usize {
        self.items_written
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Consume the writer and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// One-line summary: name, category, price.
fn describe(item: &CatalogItem) -> String {
    format!("{} [{}] ${:.2}", item.name, item.category, item.price)
}
