use super::sequence::Sequence;
use super::stats::ProcessingStats;
use crate::error::QuestResult;

/// Consumer of the reads produced by a [`SequenceReader`](super::SequenceReader).
///
/// Readers call `process_sequence` once per record, in file order, and stop at
/// the first error.
pub trait SequenceProcessor {
    fn process_sequence(&mut self, sequence: &Sequence) -> QuestResult<()>;
    fn update_progress(&mut self, stats: &ProcessingStats);
    fn finalize(&mut self) -> QuestResult<()> {
        Ok(())
    }
}
