use crate::counting::SequenceCounts;
use crate::error::QuestResult;
use crate::export::{write_header, AppInfo};
use std::io::Write;

pub const QUERY_COUNTS_COLUMNS: [&str; 3] = ["SEQUENCE", "LENGTH", "COUNT"];

/// Write one row per unique read sequence, sorted by sequence
pub fn write_query_counts<W: Write>(
    writer: &mut W,
    app_info: &AppInfo,
    counts: &SequenceCounts,
) -> QuestResult<()> {
    write_header(writer, app_info, &QUERY_COUNTS_COLUMNS)?;

    let mut sequences: Vec<&String> = counts.keys().collect();
    sequences.sort_unstable();

    for sequence in sequences {
        writeln!(writer, "{}\t{}\t{}", sequence, sequence.len(), counts[sequence])?;
    }
    writer.flush()?;
    Ok(())
}
