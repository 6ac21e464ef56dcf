/// A raw read as produced by a sequence source, before classification.
///
/// `data` is in the read's original orientation; sources never hand over a
/// reverse-complemented sequence.
#[derive(Debug, Clone)]
pub struct Sequence {
    pub data: Vec<u8>,
    pub metadata: SequenceMetadata,
}

/// Source-specific flags carried alongside a read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequenceMetadata {
    /// Vendor/QC failure (Casava filter flag, SAM 0x200)
    pub is_qc_fail: bool,
    /// Excluded by the source format (secondary or supplementary alignments)
    pub is_flagged: bool,
    /// The alignment soft-clips part of the read
    pub is_soft_clipped: bool,
}

impl Sequence {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            metadata: SequenceMetadata::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: SequenceMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}
