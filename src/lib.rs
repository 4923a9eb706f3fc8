pub mod cli;
pub mod error;
pub mod history;
pub mod io_utils;
pub mod normalize;
pub mod pipeline;
pub mod render;
pub mod summary;
pub mod table;
pub mod validate;

use std::{env, fs::File, path::Path, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};

use crate::{
    cli::{Cli, Commands, ExportArgs, HistoryArgs, IngestArgs},
    history::{
        Durability, HISTORY_CAPACITY, HistoryRepository, HistoryStore, JsonFileRepository,
        MemoryRepository,
    },
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("equipstats", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Ingest(args) => handle_ingest(&args),
        Commands::History(args) => handle_history(&args),
        Commands::Export(args) => handle_export(&args),
    }
}

fn handle_ingest(args: &IngestArgs) -> Result<()> {
    let mut store = open_store(&args.history, args.no_history, args.strict_persist)?;
    let summary = run_pipeline(
        &args.input,
        args.delimiter,
        args.input_encoding.as_deref(),
        &mut store,
    )?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        table::print_table(&render::summary_headers(), &render::summary_rows(&summary));
        println!();
        table::print_table(
            &render::distribution_headers(),
            &render::distribution_rows(&summary),
        );
    }
    if !args.no_history {
        info!(
            "Upload history now holds {} of {} entr(ies) in {:?}",
            store.len(),
            HISTORY_CAPACITY,
            args.history
        );
    }
    Ok(())
}

fn handle_history(args: &HistoryArgs) -> Result<()> {
    let store = open_store(&args.history, false, false)?;
    let entries = store.list(args.limit);
    if args.json {
        println!("{}", serde_json::to_string_pretty(entries)?);
    } else if entries.is_empty() {
        println!("No uploads recorded yet.");
    } else {
        table::print_table(&render::history_headers(), &render::history_rows(entries));
    }
    Ok(())
}

fn handle_export(args: &ExportArgs) -> Result<()> {
    let mut store = open_store(&args.history, args.no_history, args.strict_persist)?;
    let summary = run_pipeline(
        &args.input,
        args.delimiter,
        args.input_encoding.as_deref(),
        &mut store,
    )?;

    let file = File::create(&args.output)
        .with_context(|| format!("Creating export file {:?}", args.output))?;
    serde_json::to_writer_pretty(file, &summary)
        .with_context(|| format!("Writing summary JSON to {:?}", args.output))?;
    info!("Exported summary to {:?}", args.output);
    Ok(())
}

fn run_pipeline(
    input: &Path,
    delimiter: Option<u8>,
    input_encoding: Option<&str>,
    store: &mut HistoryStore,
) -> Result<summary::Summary> {
    let delimiter = io_utils::resolve_input_delimiter(input, delimiter);
    let encoding = io_utils::resolve_encoding(input_encoding)?;
    let reader = io_utils::open_input(input)?;
    let summary = pipeline::ingest(reader, &input_label(input), delimiter, encoding, store)
        .with_context(|| format!("Ingesting {input:?}"))?;
    Ok(summary)
}

fn open_store(path: &Path, no_history: bool, strict_persist: bool) -> Result<HistoryStore> {
    let repository: Box<dyn HistoryRepository> = if no_history {
        Box::new(MemoryRepository)
    } else {
        Box::new(JsonFileRepository::new(path))
    };
    let durability = if strict_persist {
        Durability::Strict
    } else {
        Durability::BestEffort
    };
    let store = HistoryStore::open(repository, durability)
        .with_context(|| format!("Loading upload history from {path:?}"))?;
    Ok(store)
}

fn input_label(path: &Path) -> String {
    if io_utils::is_dash(path) {
        "stdin".to_string()
    } else {
        path.file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| path.display().to_string())
    }
}
