use crate::error::{QuestError, QuestResult};
use crate::sequence_processor::core::*;
use bio::alphabets::dna;
use rust_htslib::bam::{self, Read};
use std::path::Path;

/// Upper bound on htslib decoder threads
const MAX_HTS_THREADS: usize = 4;

pub struct BamReader {
    reader: bam::Reader,
    discard_qc_fail: bool,
}

impl BamReader {
    pub fn new(
        path: &Path,
        reference: Option<&Path>,
        threads: usize,
        discard_qc_fail: bool,
    ) -> QuestResult<Self> {
        let mut reader = bam::Reader::from_path(path)?;

        if path.extension().map_or(false, |ext| ext == "cram") {
            if let Some(ref_path) = reference {
                reader.set_reference(ref_path)?;
            }
        }

        let threads = threads.min(MAX_HTS_THREADS);
        if threads > 1 {
            reader.set_threads(threads)?;
        }

        Ok(Self {
            reader,
            discard_qc_fail,
        })
    }

    fn create_sequence_from_record(&self, record: &bam::Record) -> QuestResult<Sequence> {
        let seq = record.seq().as_bytes();
        if seq.is_empty() {
            return Err(QuestError::InvalidRead(format!(
                "Error while parsing HTS file: missing sequence for read '{}'!",
                String::from_utf8_lossy(record.qname())
            )));
        }

        // Reads aligned to the reverse strand are stored reverse complemented
        let data = if record.is_reverse() {
            dna::revcomp(&seq)
        } else {
            seq
        };

        let is_qc_fail = record.is_quality_check_failed();
        let is_flagged = record.is_secondary()
            || record.is_supplementary()
            || (self.discard_qc_fail && is_qc_fail);
        let is_soft_clipped = record
            .cigar()
            .iter()
            .any(|op| op.char() == 'S');

        Ok(Sequence {
            data,
            metadata: SequenceMetadata {
                is_qc_fail,
                is_flagged,
                is_soft_clipped,
            },
        })
    }
}

impl SequenceReader for BamReader {
    /// Sample name from the `SM` tag of the `@RG` header lines
    fn sample_name(&self) -> QuestResult<Option<String>> {
        let header = bam::Header::from_template(self.reader.header()).to_hashmap();
        let mut sample: Option<String> = None;

        if let Some(read_groups) = header.get("RG") {
            for rg in read_groups {
                let Some(sm) = rg.get("SM") else {
                    continue;
                };
                match &sample {
                    None => sample = Some(sm.to_string()),
                    Some(existing) if existing != sm => {
                        return Err(QuestError::InvalidInputFormat(
                            "Multiple different sample names found in header".to_string(),
                        ));
                    }
                    Some(_) => {}
                }
            }
        }

        Ok(sample)
    }

    fn read_sequences<P: SequenceProcessor>(
        &mut self,
        processor: &mut P,
    ) -> QuestResult<ProcessingStats> {
        let mut stats = ProcessingStats::default();
        let mut record = bam::Record::new();

        while let Some(result) = self.reader.read(&mut record) {
            result?;
            let sequence = self.create_sequence_from_record(&record)?;
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
