use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "UPPER")]
pub enum LogLevel {
    Warning,
    Info,
    Debug,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Warning => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Count reads and optionally map them to a library
    Count {
        /// Query sequence file (fastq[.gz], sam, bam, cram)
        queries: PathBuf,

        /// Final output to this filename prefix
        #[arg(short = 'o', long = "output")]
        output: PathBuf,

        /// Minimum read length [default: 1, or min_length from config.toml]
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        min_length: Option<u64>,

        /// Output top N most common unique read sequences in FASTA format
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..=50))]
        most_common: Option<u64>,

        /// Sample name; required for FASTQ, read from the @RG header otherwise
        #[arg(short = 's', long)]
        sample: Option<String>,

        /// Reference FASTA (required for CRAM)
        #[arg(short = 'r', long)]
        reference: Option<PathBuf>,

        /// Library definition TSV (id, name, sequence)
        #[arg(short = 'l', long)]
        library: Option<PathBuf>,

        /// Additional low-count cut-off reported in the stats file
        #[arg(long)]
        low_count: Option<u64>,

        /// CPUs to use (0 to detect) [default: 1, or cpus from config.toml]
        #[arg(short = 'c', long)]
        cpus: Option<usize>,

        /// Exclude reads failing vendor QC
        #[arg(long)]
        discard_qc_fail: bool,

        /// Set logging verbosity
        #[arg(long, value_enum, ignore_case = true, default_value = "INFO")]
        loglevel: LogLevel,

        /// Disable output compression
        #[arg(long)]
        no_compression: bool,
    },
}
