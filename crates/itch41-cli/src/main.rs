//! # itch41-cli
//!
//! Command-line front end for the ITCH 4.1 feed toolkit.
//!
//! # Usage
//!
//! ```bash
//! itch41 parse feed.dat --types A,F --limit 10
//! itch41 parse --config feed.json
//! itch41 generate Itch.test1.dat --scenario 1
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::info;

use itch41_core::config::{self, DEFAULT_CHUNK_SIZE};
use itch41_core::{Field, FieldMap, FieldValue, ItchMessage, MessageType};
use itch41_feed::consumer::{self, ConsumerOptions};
use itch41_feed::{FeedWriter, FrameReader, dump};

/// ITCH 4.1 feed parser and test-data generator.
#[derive(Parser)]
#[command(name = "itch41", about = "ITCH 4.1 feed parser and test-data generator")]
struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Optional log directory for file output.
    #[arg(long)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a captured feed file and dump retained messages.
    Parse {
        /// Feed file to read (or use --config).
        file: Option<PathBuf>,

        /// JSON config file supplying source, filters and limits.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Comma-separated allow-list of type codes (e.g. `A,F`).
        #[arg(long)]
        types: Option<String>,

        /// Stop after this many delivered messages.
        #[arg(long)]
        limit: Option<u64>,

        /// Read chunk size in bytes.
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,

        /// Hex-dump raw frames instead of pretty-printing fields.
        #[arg(long)]
        hex: bool,

        /// Treat any frame error as fatal.
        #[arg(long)]
        strict: bool,
    },

    /// Write a deterministic test feed file.
    Generate {
        /// Output file path.
        out: PathBuf,

        /// Scenario number (1 or 2).
        #[arg(long, default_value_t = 1)]
        scenario: u8,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    itch41_core::logging::init_logging(&cli.log_level, cli.log_dir.as_deref(), "itch41-cli");

    match cli.command {
        Command::Parse { file, config, types, limit, chunk_size, hex, strict } => {
            run_parse(file, config, types, limit, chunk_size, hex, strict)
        }
        Command::Generate { out, scenario } => run_generate(&out, scenario),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_parse(
    file: Option<PathBuf>,
    config_path: Option<PathBuf>,
    types: Option<String>,
    limit: Option<u64>,
    chunk_size: usize,
    hex: bool,
    strict: bool,
) -> Result<()> {
    // A config file supplies defaults; command-line flags win where given.
    let mut source = file;
    let mut allow_codes: Option<Vec<String>> = types
        .map(|t| t.split(',').map(|s| s.trim().to_owned()).collect());
    let mut limit = limit;
    let mut chunk_size = chunk_size;
    let mut fatal_errors = strict;

    if let Some(path) = config_path {
        let cfg = config::load_config(&path)
            .with_context(|| format!("loading config {}", path.display()))?;
        if source.is_none() {
            source = Some(PathBuf::from(&cfg.source));
        }
        if allow_codes.is_none() {
            allow_codes = cfg.message_types.clone();
        }
        if limit.is_none() {
            limit = cfg.limit;
        }
        if chunk_size == DEFAULT_CHUNK_SIZE {
            chunk_size = cfg.effective_chunk_size();
        }
        fatal_errors = fatal_errors || cfg.is_fatal_errors();
    }

    let Some(source) = source else {
        bail!("no feed file given: pass a path or --config");
    };

    let allow = match &allow_codes {
        Some(codes) => Some(consumer::parse_type_codes(codes)?),
        None => None,
    };
    let opts = ConsumerOptions { allow, fatal_errors, limit };

    info!(
        "parsing {} (chunk_size={chunk_size}, strict={fatal_errors})",
        source.display()
    );

    let feed = File::open(&source).with_context(|| format!("opening {}", source.display()))?;
    let mut reader = FrameReader::with_chunk_size(BufReader::new(feed), chunk_size);

    let stats = consumer::process_feed(&mut reader, &opts, |msg| {
        if hex {
            print!("{}", dump::hex_dump(msg));
        } else {
            print!("{}", dump::pretty(msg)?);
        }
        Ok(())
    })?;

    info!(
        "done: {} frames, {} delivered, {} filtered, {} errors",
        stats.frames, stats.delivered, stats.skipped, stats.errors
    );
    Ok(())
}

fn run_generate(out: &PathBuf, scenario: u8) -> Result<()> {
    let messages = match scenario {
        1 => scenario_one()?,
        2 => scenario_two()?,
        other => bail!("unknown scenario {other} (expected 1 or 2)"),
    };

    let mut writer = FeedWriter::create(out)?;
    for msg in &messages {
        writer.write(msg)?;
    }
    writer.flush()?;

    info!("wrote {} messages to {}", messages.len(), out.display());
    Ok(())
}

fn add_order(nanos: i64, order_ref: i64, shares: u32, stock: &str, price: f64) -> Result<ItchMessage> {
    let values = FieldMap::from_iter([
        (Field::NanoSeconds, FieldValue::Int(nanos)),
        (Field::OrderRefNum, FieldValue::Int(order_ref)),
        (Field::Side, FieldValue::from('B')),
        (Field::Shares, FieldValue::from(shares)),
        (Field::Stock, FieldValue::from(stock)),
        (Field::Price, FieldValue::from(price)),
    ]);
    Ok(ItchMessage::from_values(MessageType::AddOrder, &values)?)
}

fn time_stamp(seconds: i64) -> Result<ItchMessage> {
    let values = FieldMap::from_iter([(Field::Seconds, FieldValue::Int(seconds))]);
    Ok(ItchMessage::from_values(MessageType::TimeStamp, &values)?)
}

/// Three add orders, then order #2 executes.
fn scenario_one() -> Result<Vec<ItchMessage>> {
    let executed = FieldMap::from_iter([
        (Field::NanoSeconds, FieldValue::Int(40)),
        (Field::OrderRefNum, FieldValue::Int(2)),
        (Field::Shares, FieldValue::from(300u32)),
        (Field::MatchNum, FieldValue::Int(1001)),
    ]);
    Ok(vec![
        time_stamp(1000)?,
        add_order(10, 1, 200, "AAPL", 100.53)?,
        add_order(20, 2, 300, "AAPL", 100.55)?,
        add_order(30, 3, 400, "AAPL", 100.56)?,
        ItchMessage::from_values(MessageType::OrderExecuted, &executed)?,
    ])
}

/// Three add orders, order #30 replaced by #40, which then executes.
fn scenario_two() -> Result<Vec<ItchMessage>> {
    let replace = FieldMap::from_iter([
        (Field::NanoSeconds, FieldValue::Int(45)),
        (Field::OrderRefNum, FieldValue::Int(30)),
        (Field::NewOrderRefNum, FieldValue::Int(40)),
        (Field::Shares, FieldValue::from(200u32)),
        (Field::Price, FieldValue::from(100.52)),
    ]);
    let executed = FieldMap::from_iter([
        (Field::NanoSeconds, FieldValue::Int(55)),
        (Field::OrderRefNum, FieldValue::Int(40)),
        (Field::Shares, FieldValue::from(200u32)),
        (Field::MatchNum, FieldValue::Int(1001)),
    ]);
    Ok(vec![
        time_stamp(2000)?,
        add_order(15, 10, 225, "AAPL", 100.11)?,
        add_order(25, 20, 325, "AAPL", 100.12)?,
        add_order(35, 30, 425, "AAPL", 100.10)?,
        ItchMessage::from_values(MessageType::OrderReplace, &replace)?,
        ItchMessage::from_values(MessageType::OrderExecuted, &executed)?,
    ])
}
