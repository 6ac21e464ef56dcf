use super::stats::LibraryIndependentStats;
use super::SequenceCounts;
use crate::error::QuestResult;
use crate::read_qc::ReadClassifier;
use crate::sequence_processor::core::{ProcessingStats, Sequence, SequenceProcessor};
use indicatif::ProgressBar;
use log::debug;

const LOAD_INFO_THRESHOLD: u64 = 1_000_000;

/// Accumulates exact-sequence counts and read-level stats over a read stream
pub struct SequenceCounter {
    classifier: ReadClassifier,
    discard_qc: bool,
    stats: LibraryIndependentStats,
    counts: SequenceCounts,
    progress: Option<ProgressBar>,
}

impl SequenceCounter {
    pub fn new(sample_name: impl Into<String>, min_length: usize, discard_qc: bool) -> Self {
        Self {
            classifier: ReadClassifier::new(min_length),
            discard_qc,
            stats: LibraryIndependentStats::empty(sample_name),
            counts: SequenceCounts::default(),
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Classify and count one read; returns whether it was kept.
    ///
    /// An invalid read fails before any counter is touched.
    pub fn count(&mut self, sequence: &Sequence) -> QuestResult<bool> {
        let read = self.classifier.classify(&sequence.data, &sequence.metadata)?;

        let (stats, keep) = std::mem::take(&mut self.stats).tally(&read, self.discard_qc);
        self.stats = stats;

        if keep {
            match self.counts.get_mut(read.sequence) {
                Some(count) => *count += 1,
                None => {
                    self.counts.insert(read.sequence.to_owned(), 1);
                }
            }
        }

        Ok(keep)
    }

    pub fn count_all<'a, I>(&mut self, sequences: I) -> QuestResult<()>
    where
        I: IntoIterator<Item = &'a Sequence>,
    {
        for sequence in sequences {
            self.count(sequence)?;
        }
        Ok(())
    }

    pub fn stats(&self) -> &LibraryIndependentStats {
        &self.stats
    }

    pub fn counts(&self) -> &SequenceCounts {
        &self.counts
    }

    pub fn unique_count(&self) -> usize {
        self.counts.len()
    }

    pub fn into_parts(self) -> (LibraryIndependentStats, SequenceCounts) {
        (self.stats, self.counts)
    }
}

/// Kept-read totals at which a progress line is logged
fn report_due(kept: bool, total_reads: u64) -> bool {
    kept && total_reads % LOAD_INFO_THRESHOLD == 0
}

impl SequenceProcessor for SequenceCounter {
    fn process_sequence(&mut self, sequence: &Sequence) -> QuestResult<()> {
        let kept = self.count(sequence)?;

        if report_due(kept, self.stats.total_reads) {
            debug!(
                "Parsed {} reads, {} were unique...",
                self.stats.total_reads,
                self.counts.len()
            );
        }
        Ok(())
    }

    fn update_progress(&mut self, stats: &ProcessingStats) {
        if let Some(progress) = &self.progress {
            progress.set_position(stats.processed);
            progress.set_message(format!(
                "Parsed {} reads, {} unique",
                stats.processed,
                self.counts.len()
            ));
        }
    }

    fn finalize(&mut self) -> QuestResult<()> {
        if let Some(progress) = self.progress.take() {
            progress.finish_with_message(format!(
                "Parsed {} reads, {} were unique",
                self.stats.input_reads,
                self.counts.len()
            ));
        }
        Ok(())
    }
}
