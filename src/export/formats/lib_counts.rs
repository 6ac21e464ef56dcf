use crate::error::QuestResult;
use crate::export::{write_header, AppInfo};
use crate::library::{MappingRow, MappingSink};
use std::io::Write;

pub const LIB_COUNTS_COLUMNS: [&str; 7] =
    ["ID", "NAME", "SEQUENCE", "LENGTH", "COUNT", "UNIQUE", "SAMPLE"];

/// Streams library mapping rows to a TSV, one line per library record
pub struct LibCountsWriter<W: Write> {
    writer: W,
    rows: u64,
}

impl<W: Write> LibCountsWriter<W> {
    pub fn new(mut writer: W, app_info: &AppInfo) -> QuestResult<Self> {
        write_header(&mut writer, app_info, &LIB_COUNTS_COLUMNS)?;
        Ok(Self { writer, rows: 0 })
    }

    pub fn rows_written(&self) -> u64 {
        self.rows
    }

    pub fn finish(mut self) -> QuestResult<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<'a, W: Write> MappingSink<'a> for LibCountsWriter<W> {
    fn write_row(&mut self, row: MappingRow<'a>) -> QuestResult<()> {
        writeln!(
            self.writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            row.target.id,
            row.target.name,
            row.target.sequence,
            row.length(),
            row.count,
            u8::from(row.is_unique),
            row.sample
        )?;
        self.rows += 1;
        Ok(())
    }
}
