use crate::counting::{LibraryDependentStats, LibraryIndependentStats, SequenceCounter};
use crate::error::QuestError;
use crate::export::{
    open_output, output_path, write_most_common, write_query_counts, write_stats, AppInfo,
    LibCountsWriter,
};
use crate::library::TargetLibrary;
use crate::sequence_processor::{
    InputFormat, InputReader, ReaderOptions, SequenceProcessor, SequenceReader,
};
use crate::utils::progress_bar_builder::ProgressBarBuilder;
use anyhow::{Context, Result};
use log::{info, warn};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Fully resolved settings for one counting run
#[derive(Debug, Clone)]
pub struct CountOptions {
    pub queries: PathBuf,
    pub output: PathBuf,
    pub min_length: usize,
    pub most_common: Option<usize>,
    pub sample: Option<String>,
    pub reference: Option<PathBuf>,
    pub library: Option<PathBuf>,
    pub low_count: Option<u64>,
    pub cpus: usize,
    pub discard_qc_fail: bool,
    pub compress: bool,
    pub show_progress: bool,
}

/// Stats written to the report, depending on whether a library was mapped
#[derive(Debug, Clone, PartialEq)]
pub enum CountOutcome {
    Independent(LibraryIndependentStats),
    Dependent(LibraryDependentStats),
}

impl CountOutcome {
    pub fn reads(&self) -> &LibraryIndependentStats {
        match self {
            CountOutcome::Independent(stats) => stats,
            CountOutcome::Dependent(stats) => &stats.reads,
        }
    }
}

/// `0` means one thread per available CPU
pub fn resolve_cpus(cpus: usize) -> usize {
    if cpus > 0 {
        cpus
    } else {
        num_cpus::get()
    }
}

fn setup_output_dir(prefix: &Path) -> Result<()> {
    if let Some(parent) = prefix.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory {}", parent.display())
            })?;
        }
    }
    Ok(())
}

fn missing_fastq_sample() -> QuestError {
    QuestError::MissingMetadata("When a FASTQ is provided, a sample name is required!".to_string())
}

fn resolve_sample(reader: &InputReader, sample: Option<&str>) -> Result<String> {
    if let Some(sample) = sample {
        return Ok(sample.to_string());
    }
    match reader.format() {
        InputFormat::Fastq => Err(missing_fastq_sample().into()),
        InputFormat::Hts => reader.sample_name()?.ok_or_else(|| {
            QuestError::MissingMetadata("No sample name found in the read group headers!".to_string())
                .into()
        }),
    }
}

pub fn run(options: &CountOptions, app_info: &AppInfo) -> Result<CountOutcome> {
    if options.library.is_none() && options.low_count.is_some() {
        warn!("Low count option ignored in library-independent mode.");
    }

    if InputFormat::from_path(&options.queries) == InputFormat::Fastq && options.sample.is_none()
    {
        return Err(missing_fastq_sample().into());
    }

    setup_output_dir(&options.output)?;

    let reader_options = ReaderOptions {
        reference: options.reference.as_deref(),
        threads: options.cpus,
        discard_qc_fail: options.discard_qc_fail,
    };
    let mut reader = InputReader::open(&options.queries, &reader_options)
        .with_context(|| format!("Failed to open query file {}", options.queries.display()))?;
    let sample = resolve_sample(&reader, options.sample.as_deref())?;

    info!("Loading reads...");
    let progress = ProgressBarBuilder::new("Loading reads...")
        .with_tick(Duration::from_millis(500))
        .hidden(!options.show_progress)
        .build()?;
    let mut counter = SequenceCounter::new(sample, options.min_length, options.discard_qc_fail)
        .with_progress(progress);
    reader.read_sequences(&mut counter)?;
    counter.finalize()?;
    let (stats, query_counts) = counter.into_parts();
    info!(
        "Parsed {} reads, {} were unique",
        stats.input_reads,
        query_counts.len()
    );

    let query_counts_path = output_path(&options.output, ".query_counts.tsv", options.compress);
    info!("Writing query counts file: {}", query_counts_path.display());
    let mut writer = open_output(&query_counts_path, options.compress)?;
    write_query_counts(&mut writer, app_info, &query_counts)
        .with_context(|| format!("Failed to write {}", query_counts_path.display()))?;
    drop(writer);

    if let Some(n) = options.most_common {
        let suffix = format!(".{}.top{}.fasta", stats.sample_name, n);
        let fasta_path = output_path(&options.output, &suffix, options.compress);
        info!("Writing most common reads file: {}", fasta_path.display());
        let writer = open_output(&fasta_path, options.compress)?;
        write_most_common(writer, &query_counts, n)
            .with_context(|| format!("Failed to write {}", fasta_path.display()))?;
    }

    let outcome = match &options.library {
        Some(library_path) => {
            info!("Loading library...");
            let library = TargetLibrary::load(library_path, options.min_length as i64)
                .with_context(|| format!("Failed to load library {}", library_path.display()))?;

            let lib_counts_path =
                output_path(&options.output, ".lib_counts.tsv", options.compress);
            info!(
                "Finding exact matches and writing library-dependent counts: {}",
                lib_counts_path.display()
            );
            let mut writer = LibCountsWriter::new(
                open_output(&lib_counts_path, options.compress)?,
                app_info,
            )?;
            let mapped =
                library.map_and_write(&stats, &query_counts, options.low_count, &mut writer)?;
            writer.finish()?;
            CountOutcome::Dependent(mapped)
        }
        None => CountOutcome::Independent(stats),
    };

    let stats_path = output_path(&options.output, ".stats.json", false);
    info!("Writing statistics file: {}", stats_path.display());
    let mut writer = BufWriter::new(
        File::create(&stats_path)
            .with_context(|| format!("Failed to create {}", stats_path.display()))?,
    );
    match &outcome {
        CountOutcome::Independent(stats) => write_stats(&mut writer, app_info, stats)?,
        CountOutcome::Dependent(stats) => write_stats(&mut writer, app_info, stats)?,
    }

    Ok(outcome)
}
