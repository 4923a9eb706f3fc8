use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub const DEFAULT_HISTORY_FILE: &str = "history.json";

#[derive(Debug, Parser)]
#[command(author, version, about = "Summarize equipment-sensor CSV datasets", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Ingest a CSV file, print its summary, and record it in upload history
    Ingest(IngestArgs),
    /// List recent uploads, newest first
    History(HistoryArgs),
    /// Ingest a CSV file and export the full summary as JSON
    Export(ExportArgs),
}

#[derive(Debug, Args)]
pub struct IngestArgs {
    /// Input CSV file to ingest ('-' reads from stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Upload history file
    #[arg(long, default_value = DEFAULT_HISTORY_FILE)]
    pub history: PathBuf,
    /// Do not record this ingestion in upload history
    #[arg(long = "no-history")]
    pub no_history: bool,
    /// Treat a history persistence failure as a command failure
    #[arg(long = "strict-persist")]
    pub strict_persist: bool,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Emit the summary as JSON instead of tables
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Upload history file
    #[arg(long, default_value = DEFAULT_HISTORY_FILE)]
    pub history: PathBuf,
    /// Maximum entries to display (defaults to the full retained history)
    #[arg(long)]
    pub limit: Option<usize>,
    /// Emit history entries as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Input CSV file to ingest ('-' reads from stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Destination JSON file
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
    /// Upload history file
    #[arg(long, default_value = DEFAULT_HISTORY_FILE)]
    pub history: PathBuf,
    /// Do not record this ingestion in upload history
    #[arg(long = "no-history")]
    pub no_history: bool,
    /// Treat a history persistence failure as a command failure
    #[arg(long = "strict-persist")]
    pub strict_persist: bool,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
