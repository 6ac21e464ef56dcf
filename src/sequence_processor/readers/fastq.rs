use crate::error::{QuestError, QuestResult};
use crate::sequence_processor::core::*;
use crate::utils::input::decompress;
use bio::io::fastq::{self, FastqRead};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub struct FastqReader {
    reader: fastq::Reader<BufReader<Box<dyn Read>>>,
}

impl FastqReader {
    pub fn new(path: &Path) -> QuestResult<Self> {
        let file = File::open(path)?;
        Self::from_reader(Box::new(file))
    }

    /// Wrap an arbitrary (possibly compressed) byte stream
    pub fn from_reader(inner: Box<dyn Read>) -> QuestResult<Self> {
        let inner_reader = decompress(inner)?;
        Ok(Self {
            reader: fastq::Reader::from_bufread(BufReader::with_capacity(
                16 * 1024 * 1024,
                inner_reader,
            )),
        })
    }

    fn create_sequence_from_record(record: &fastq::Record) -> QuestResult<Sequence> {
        let is_qc_fail = parse_fastq_header(record.id(), record.desc())?;
        Ok(Sequence {
            data: record.seq().to_vec(),
            metadata: SequenceMetadata {
                is_qc_fail,
                ..SequenceMetadata::default()
            },
        })
    }
}

impl SequenceReader for FastqReader {
    fn read_sequences<P: SequenceProcessor>(
        &mut self,
        processor: &mut P,
    ) -> QuestResult<ProcessingStats> {
        let mut stats = ProcessingStats::default();
        let mut record = fastq::Record::new();

        loop {
            self.reader
                .read(&mut record)
                .map_err(|e| QuestError::InvalidInputFormat(format!("FASTQ error: {}", e)))?;
            if record.is_empty() {
                break;
            }

            let sequence = Self::create_sequence_from_record(&record)?;
            processor.process_sequence(&sequence)?;
            stats.processed += 1;

            if stats.processed % PROGRESS_INTERVAL == 0 {
                processor.update_progress(&stats);
            }
        }

        processor.update_progress(&stats);
        Ok(stats)
    }
}

/// Validate a FASTQ header and return its vendor-failed flag.
///
/// Accepted layouts: `@name`, `@name/1` or `@name/2` (Illumina), and
/// `@name <pair>:<Y|N>:<control>:<index>` (Casava 1.8+). Only the Casava form
/// carries a filter flag.
pub(crate) fn parse_fastq_header(id: &str, desc: Option<&str>) -> QuestResult<bool> {
    let unsupported = || {
        let header = match desc {
            Some(d) => format!("@{} {}", id, d),
            None => format!("@{}", id),
        };
        QuestError::InvalidInputFormat(format!("Unsupported FastQ header format: {}", header))
    };

    if id.is_empty() {
        return Err(unsupported());
    }

    let desc = match desc {
        None => {
            return match id.rsplit_once('/') {
                None => Ok(false),
                Some((name, "1" | "2")) if !name.is_empty() => Ok(false),
                Some(_) => Err(unsupported()),
            };
        }
        Some(desc) => desc,
    };

    let fields: Vec<&str> = desc.splitn(4, ':').collect();
    if fields.len() != 4 {
        return Err(unsupported());
    }
    let (member, filter, control, index) = (fields[0], fields[1], fields[2], fields[3]);

    let valid = matches!(member, "0" | "1" | "2")
        && !filter.is_empty()
        && filter.bytes().all(|b| b == b'Y' || b == b'N')
        && !control.is_empty()
        && control.bytes().all(|b| b.is_ascii_digit() || b == b'+')
        && !index.is_empty()
        && !index.bytes().any(|b| b.is_ascii_whitespace());
    if !valid {
        return Err(unsupported());
    }

    Ok(filter.ends_with('Y'))
}
