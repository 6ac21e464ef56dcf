use crate::counting::{most_common, SequenceCounts};
use crate::error::QuestResult;
use bio::io::fasta;
use std::io::Write;

const RECORD_PREFIX: &str = "quest";

/// Write the `n` most frequent sequences as FASTA, most frequent first.
///
/// Headers read `>quest|<rank>|<count>`; fewer than `n` records are written
/// when there are fewer unique sequences.
pub fn write_most_common<W: Write>(
    writer: W,
    counts: &SequenceCounts,
    n: usize,
) -> QuestResult<usize> {
    let mut fasta = fasta::Writer::new(writer);
    let top = most_common(counts, n);

    for (rank, (sequence, count)) in top.iter().enumerate() {
        let id = format!("{}|{}|{}", RECORD_PREFIX, rank + 1, count);
        fasta.write(&id, None, sequence.as_bytes())?;
    }
    fasta.flush()?;
    Ok(top.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, u64)]) -> SequenceCounts {
        pairs.iter().map(|(s, c)| (s.to_string(), *c)).collect()
    }

    #[test]
    fn test_most_common_records() {
        let counts = counts(&[("AAAA", 3), ("CCCC", 10), ("GGGG", 3), ("TTTT", 1)]);
        let mut out = Vec::new();
        let written = write_most_common(&mut out, &counts, 3).unwrap();

        assert_eq!(written, 3);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            ">quest|1|10\nCCCC\n>quest|2|3\nAAAA\n>quest|3|3\nGGGG\n"
        );
    }

    #[test]
    fn test_n_larger_than_unique_count() {
        let counts = counts(&[("ACGT", 2)]);
        let mut out = Vec::new();
        assert_eq!(write_most_common(&mut out, &counts, 50).unwrap(), 1);
    }
}
