//! # abif-reader
//!
//! Command-line front end for inspecting and decoding ABIF trace files.
//!
//! ```bash
//! # Show the header and directory table
//! abif-reader info sample.ab1
//!
//! # Print the decoded chromatogram as JSON
//! abif-reader decode sample.ab1 --json
//! ```

use std::path::{Path, PathBuf};

use abif_reader::{AbifReader, Channel, FieldRole};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

/// Reader for ABIF capillary sequencer trace files
#[derive(Parser)]
#[command(name = "abif-reader")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display the header and directory table of an ABIF file
    Info {
        /// Input ABIF file path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Decode traces, base calls, quality scores and peak locations
    Decode {
        /// Input ABIF file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the full record as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Info { file } => run_info(&file),
        Commands::Decode { file, json } => run_decode(&file, json),
    }
}

fn run_info(path: &Path) -> Result<()> {
    let reader = AbifReader::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let header = reader.header();

    println!("File: {}", path.display());
    println!("  Version: {} (raw {})", header.version, header.version.raw());
    println!("  Directory entries: {}", header.element_count);
    println!("  Directory offset: {}", header.directory_offset);
    println!("  Samples per trace: {}", reader.num_samples());
    println!("  Called bases: {}", reader.num_bases());

    println!("\nResolved fields:");
    for role in FieldRole::ALL {
        match reader.entry(role) {
            Some(entry) => println!("  {:<16} {}", role.to_string(), entry),
            None => println!("  {:<16} (absent)", role.to_string()),
        }
    }

    println!("\nDirectory:");
    println!(
        "  {:<6} {:>6} {:>6} {:>6} {:>10} {:>10} {:>10}",
        "NAME", "TAG", "TYPE", "SIZE", "COUNT", "BYTES", "OFFSET"
    );
    for entry in reader.directory() {
        println!(
            "  {:<6} {:>6} {:>6} {:>6} {:>10} {:>10} {:>10}",
            entry.name_lossy(),
            entry.tag_number,
            entry.element_type,
            entry.element_size,
            entry.element_count,
            entry.data_size,
            entry.data_offset
        );
    }
    Ok(())
}

fn run_decode(path: &Path, json: bool) -> Result<()> {
    info!("Decoding {}", path.display());
    let record = abif_reader::decode_file(path)
        .with_context(|| format!("Failed to decode {}", path.display()))?;

    if json {
        let text = serde_json::to_string_pretty(&record).context("Failed to serialize record")?;
        println!("{}", text);
        return Ok(());
    }

    println!("File: {}", path.display());
    for channel in Channel::ALL {
        println!("  Trace {}: {} samples", channel, record.trace(channel).len());
    }
    println!("  Called bases: {}", record.num_bases());
    println!("  Quality scores: {}", record.quality_scores().len());
    println!("  Peak locations: {}", record.peak_indexes().len());
    if record.num_bases() > 0 {
        println!("\n>{}", path.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default());
        println!("{}", record.called_sequence());
    }
    Ok(())
}
