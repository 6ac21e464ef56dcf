mod counter;
mod stats;

pub use counter::SequenceCounter;
pub use stats::{LibraryDependentStats, LibraryIndependentStats, LowCountThreshold};

use std::collections::HashMap;

/// Exact sequence -> number of kept reads carrying it
pub type SequenceCounts = HashMap<String, u64>;

/// The `n` most frequent sequences, most frequent first; ties are ordered by
/// sequence so the result is deterministic.
pub fn most_common(counts: &SequenceCounts, n: usize) -> Vec<(&str, u64)> {
    let mut entries: Vec<(&str, u64)> = counts
        .iter()
        .map(|(seq, &count)| (seq.as_str(), count))
        .collect();
    entries.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries.truncate(n);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_most_common() {
        let counts: SequenceCounts = [("AAA", 3), ("CCC", 9), ("GGG", 3), ("TTT", 1)]
            .into_iter()
            .map(|(s, c)| (s.to_string(), c))
            .collect();

        assert_eq!(most_common(&counts, 3), vec![("CCC", 9), ("AAA", 3), ("GGG", 3)]);
        assert_eq!(most_common(&counts, 10).len(), 4);
        assert!(most_common(&counts, 0).is_empty());
    }
}
