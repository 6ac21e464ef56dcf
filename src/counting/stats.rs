use crate::read_qc::ReadRecord;
use serde::{Serialize, Serializer};

/// Read-level counters for one sample, independent of any library.
///
/// Values only ever grow; `input_reads == total_reads + total_excluded_reads`
/// holds after every update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LibraryIndependentStats {
    pub sample_name: String,
    pub input_reads: u64,
    pub total_reads: u64,
    #[serde(rename = "discarded_reads")]
    pub total_excluded_reads: u64,
    pub vendor_failed_reads: u64,
    pub length_excluded_reads: u64,
    pub ambiguous_nt_reads: u64,
    pub masked_reads: u64,
    #[serde(skip)]
    pub total_invalid_reads: u64,
    #[serde(rename = "zero_length_reads")]
    pub total_zero_reads: u64,
}

impl LibraryIndependentStats {
    pub fn empty(sample_name: impl Into<String>) -> Self {
        Self {
            sample_name: sample_name.into(),
            ..Self::default()
        }
    }

    /// Fold one classified read into the counters.
    ///
    /// Returns the updated stats and whether the read is kept under the
    /// given QC policy.
    pub fn tally(mut self, read: &ReadRecord<'_>, discard_qc: bool) -> (Self, bool) {
        if read.is_qc_fail {
            self.vendor_failed_reads += 1;
        }
        if read.is_ambiguous {
            self.ambiguous_nt_reads += 1;
        }
        if read.is_masked {
            self.masked_reads += 1;
        }
        if read.is_sequence_invalid() {
            self.total_invalid_reads += 1;
        }
        if read.is_short {
            self.length_excluded_reads += 1;
        }
        if read.is_empty {
            self.total_zero_reads += 1;
        }

        self.input_reads += 1;
        let keep = !read.to_discard(discard_qc);
        if keep {
            self.total_reads += 1;
        } else {
            self.total_excluded_reads += 1;
        }
        (self, keep)
    }

    /// Fold a whole stream of classified reads, starting from `self`
    pub fn fold<'a, I>(self, reads: I, discard_qc: bool) -> Self
    where
        I: IntoIterator<Item = ReadRecord<'a>>,
    {
        reads
            .into_iter()
            .fold(self, |stats, read| stats.tally(&read, discard_qc).0)
    }
}

/// Number of templates below a caller-supplied count threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LowCountThreshold {
    pub lt: u64,
    pub count: u64,
}

/// Library-independent stats extended with the outcome of library mapping
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LibraryDependentStats {
    #[serde(flatten)]
    pub reads: LibraryIndependentStats,

    pub mapped_to_template_reads: u64,
    #[serde(serialize_with = "round_float")]
    pub mean_count_per_template: f64,
    #[serde(serialize_with = "round_float")]
    pub median_count_per_template: f64,
    pub multimap_reads: u64,
    pub unmapped_reads: u64,

    pub total_templates: u64,
    pub total_unique_templates: u64,
    pub length_excluded_templates: u64,
    pub zero_count_templates: u64,
    pub low_count_templates_lt_15: u64,
    pub low_count_templates_lt_30: u64,
    pub low_count_templates_user: Option<LowCountThreshold>,

    #[serde(serialize_with = "round_float")]
    pub gini_coefficient: f64,
}

fn round_float<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64((value * 100.0).round() / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read_qc::ReadClassifier;
    use crate::sequence_processor::SequenceMetadata;

    #[test]
    fn test_tally_updates_counters() {
        let classifier = ReadClassifier::new(3);
        let metadata = SequenceMetadata::default();
        let cases = [
            ("ACGgtTAC", false, true, false),
            ("ACGgtNNN", false, true, true),
            ("AC", true, false, false),
            ("ac", true, true, false),
            ("an", true, true, true),
            ("ACNgtTAC", false, true, true),
            ("ACGgnTAC", false, true, true),
            ("ACGTACGT", false, false, false),
        ];

        for (seq, short, masked, ambiguous) in cases {
            let read = classifier.classify(seq.as_bytes(), &metadata).unwrap();
            let (stats, keep) = LibraryIndependentStats::empty("A").tally(&read, false);

            assert_eq!(keep, !(short || masked || ambiguous), "{}", seq);
            assert_eq!(stats.length_excluded_reads, short as u64);
            assert_eq!(stats.masked_reads, masked as u64);
            assert_eq!(stats.ambiguous_nt_reads, ambiguous as u64);
            assert_eq!(stats.total_invalid_reads, (masked || ambiguous) as u64);
            assert_eq!(stats.total_excluded_reads, (masked || ambiguous || short) as u64);
            assert_eq!(stats.input_reads, 1);
        }
    }

    #[test]
    fn test_fold_preserves_input_invariant() {
        let classifier = ReadClassifier::new(2);
        let qc_fail = SequenceMetadata {
            is_qc_fail: true,
            ..SequenceMetadata::default()
        };
        let seqs: [(&[u8], SequenceMetadata); 5] = [
            (b"ACGT", SequenceMetadata::default()),
            (b"A", SequenceMetadata::default()),
            (b"", SequenceMetadata::default()),
            (b"ACGT", qc_fail),
            (b"acgt", SequenceMetadata::default()),
        ];

        for discard_qc in [false, true] {
            let mut stats = LibraryIndependentStats::empty("S");
            for (seq, metadata) in &seqs {
                let read = classifier.classify(seq, metadata).unwrap();
                stats = stats.tally(&read, discard_qc).0;
                assert_eq!(
                    stats.input_reads,
                    stats.total_reads + stats.total_excluded_reads
                );
                assert!(stats.total_invalid_reads <= stats.total_excluded_reads);
            }
            assert_eq!(stats.vendor_failed_reads, 1);
            assert_eq!(stats.total_zero_reads, 1);
            assert_eq!(stats.total_reads, if discard_qc { 1 } else { 2 });
        }
    }

    #[test]
    fn test_fold_matches_tally() {
        let classifier = ReadClassifier::new(0);
        let metadata = SequenceMetadata::default();
        let reads: Vec<_> = ["ACGT", "NNNN", "acgt", "GG"]
            .iter()
            .map(|s| classifier.classify(s.as_bytes(), &metadata).unwrap())
            .collect();

        let stats = LibraryIndependentStats::empty("S").fold(reads, false);
        assert_eq!(stats.input_reads, 4);
        assert_eq!(stats.total_reads, 2);
        assert_eq!(stats.total_excluded_reads, 2);
        assert_eq!(stats.total_invalid_reads, 2);
    }

    #[test]
    fn test_serialized_field_names() {
        let mut stats = LibraryIndependentStats::empty("S");
        stats.total_excluded_reads = 3;
        stats.total_zero_reads = 1;
        let value = serde_json::to_value(&stats).unwrap();

        assert_eq!(value["sample_name"], "S");
        assert_eq!(value["discarded_reads"], 3);
        assert_eq!(value["zero_length_reads"], 1);
        assert!(value.get("total_invalid_reads").is_none());
    }

    #[test]
    fn test_dependent_stats_round_floats() {
        let stats = LibraryDependentStats {
            reads: LibraryIndependentStats::empty("S"),
            mean_count_per_template: 4.256,
            gini_coefficient: 0.33333,
            low_count_templates_user: Some(LowCountThreshold { lt: 5, count: 2 }),
            ..LibraryDependentStats::default()
        };
        let value = serde_json::to_value(&stats).unwrap();

        assert_eq!(value["mean_count_per_template"], 4.26);
        assert_eq!(value["gini_coefficient"], 0.33);
        assert_eq!(value["sample_name"], "S");
        assert_eq!(value["low_count_templates_user"]["lt"], 5);
        assert_eq!(value["low_count_templates_user"]["count"], 2);
    }
}
