mod bam;
mod fastq;

pub use bam::BamReader;
pub use fastq::FastqReader;

use crate::error::QuestResult;
use crate::sequence_processor::core::{ProcessingStats, SequenceProcessor, SequenceReader};
use std::path::Path;

/// Input format, chosen from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Fastq,
    Hts,
}

impl InputFormat {
    /// `.bam`, `.cram` and `.sam` are read through htslib; anything else is
    /// treated as (optionally compressed) FASTQ.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("bam") | Some("cram") | Some("sam") => InputFormat::Hts,
            _ => InputFormat::Fastq,
        }
    }
}

/// Options shared by all sequence sources
#[derive(Debug, Clone, Default)]
pub struct ReaderOptions<'a> {
    pub reference: Option<&'a Path>,
    pub threads: usize,
    pub discard_qc_fail: bool,
}

/// Either supported sequence source behind one [`SequenceReader`]
pub enum InputReader {
    Fastq(FastqReader),
    Hts(BamReader),
}

impl InputReader {
    pub fn open(path: &Path, options: &ReaderOptions<'_>) -> QuestResult<Self> {
        match InputFormat::from_path(path) {
            InputFormat::Hts => Ok(InputReader::Hts(BamReader::new(
                path,
                options.reference,
                options.threads,
                options.discard_qc_fail,
            )?)),
            InputFormat::Fastq => Ok(InputReader::Fastq(FastqReader::new(path)?)),
        }
    }

    pub fn format(&self) -> InputFormat {
        match self {
            InputReader::Fastq(_) => InputFormat::Fastq,
            InputReader::Hts(_) => InputFormat::Hts,
        }
    }
}

impl SequenceReader for InputReader {
    fn sample_name(&self) -> QuestResult<Option<String>> {
        match self {
            InputReader::Fastq(reader) => reader.sample_name(),
            InputReader::Hts(reader) => reader.sample_name(),
        }
    }

    fn read_sequences<P: SequenceProcessor>(
        &mut self,
        processor: &mut P,
    ) -> QuestResult<ProcessingStats> {
        match self {
            InputReader::Fastq(reader) => reader.read_sequences(processor),
            InputReader::Hts(reader) => reader.read_sequences(processor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(InputFormat::from_path(Path::new("a.bam")), InputFormat::Hts);
        assert_eq!(InputFormat::from_path(Path::new("a.cram")), InputFormat::Hts);
        assert_eq!(InputFormat::from_path(Path::new("a.sam")), InputFormat::Hts);
        assert_eq!(InputFormat::from_path(Path::new("a.fq.gz")), InputFormat::Fastq);
        assert_eq!(InputFormat::from_path(Path::new("reads")), InputFormat::Fastq);
    }
}
