//! Read classification: alphabet validation and per-read QC flags.
//!
//! Classification is a pure step. Deciding whether a classified read is kept
//! is left to [`ReadRecord::to_discard`] so that policy stays with the counter.

use crate::error::{QuestError, QuestResult};
use crate::sequence_processor::SequenceMetadata;
use bio::alphabets::Alphabet;

/// Nucleotides and the ambiguity codes accepted in reads, both cases
const DNA_SYMBOLS: &[u8] = b"ACGTNRYKMSWacgtnrykmsw";
const AMBIGUOUS_SYMBOLS: &[u8] = b"NRYKMSWnrykmsw";

/// Disposition of a single read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadRecord<'a> {
    pub sequence: &'a str,
    pub is_flagged: bool,
    pub is_qc_fail: bool,
    pub is_ambiguous: bool,
    pub is_masked: bool,
    pub is_short: bool,
    pub is_empty: bool,
}

impl ReadRecord<'_> {
    pub fn to_discard(&self, discard_qc: bool) -> bool {
        self.is_masked
            || self.is_ambiguous
            || self.is_short
            || self.is_empty
            || self.is_flagged
            || (discard_qc && self.is_qc_fail)
    }

    /// Ambiguous or masked bases make the sequence itself unusable
    pub fn is_sequence_invalid(&self) -> bool {
        self.is_ambiguous || self.is_masked
    }
}

pub fn is_masked(seq: &[u8]) -> bool {
    seq.iter().any(|b| b.is_ascii_lowercase())
}

pub fn is_ambiguous(seq: &[u8]) -> bool {
    seq.iter().any(|b| AMBIGUOUS_SYMBOLS.contains(b))
}

#[derive(Debug, Clone)]
pub struct ReadClassifier {
    min_length: usize,
    alphabet: Alphabet,
}

impl ReadClassifier {
    /// `min_length` of 0 disables the length filter
    pub fn new(min_length: usize) -> Self {
        Self {
            min_length,
            alphabet: Alphabet::new(DNA_SYMBOLS),
        }
    }

    pub fn is_dna(&self, seq: &[u8]) -> bool {
        self.alphabet.is_word(seq)
    }

    pub fn classify<'a>(
        &self,
        raw: &'a [u8],
        metadata: &SequenceMetadata,
    ) -> QuestResult<ReadRecord<'a>> {
        if !self.is_dna(raw) {
            return Err(invalid_sequence(raw));
        }
        let sequence = std::str::from_utf8(raw).map_err(|_| invalid_sequence(raw))?;

        Ok(ReadRecord {
            sequence,
            is_flagged: metadata.is_flagged,
            is_qc_fail: metadata.is_qc_fail,
            is_ambiguous: is_ambiguous(raw),
            is_masked: metadata.is_soft_clipped || is_masked(raw),
            is_short: raw.len() < self.min_length,
            is_empty: raw.is_empty(),
        })
    }
}

fn invalid_sequence(raw: &[u8]) -> QuestError {
    QuestError::InvalidRead(format!(
        "Invalid sequence: '{}'!",
        String::from_utf8_lossy(raw)
    ))
}
