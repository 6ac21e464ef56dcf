use super::processor::SequenceProcessor;
use super::stats::ProcessingStats;
use crate::error::QuestResult;

/// How often readers report progress to their processor
pub const PROGRESS_INTERVAL: u64 = 100_000;

/// A source of reads, streamed one record at a time into a processor
pub trait SequenceReader {
    /// Sample name declared by the source itself, if any
    fn sample_name(&self) -> QuestResult<Option<String>> {
        Ok(None)
    }

    fn read_sequences<P: SequenceProcessor>(
        &mut self,
        processor: &mut P,
    ) -> QuestResult<ProcessingStats>;
}
