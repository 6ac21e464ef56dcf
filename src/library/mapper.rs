use super::target::{Target, TargetLibrary};
use crate::counting::{
    LibraryDependentStats, LibraryIndependentStats, LowCountThreshold, SequenceCounts,
};
use crate::error::{QuestError, QuestResult};
use crate::statistics::{self, CountSummary};
use log::warn;

/// Fixed low-count buckets reported for every mapping
pub const LOW_COUNT_THRESHOLDS: [u64; 2] = [15, 30];

/// Read count assigned to one library record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingRow<'a> {
    pub target: &'a Target,
    pub count: u64,
    /// No other library record shares this sequence
    pub is_unique: bool,
    pub sample: &'a str,
}

impl MappingRow<'_> {
    pub fn length(&self) -> usize {
        self.target.sequence.len()
    }
}

/// Destination for per-target mapping rows, fed in library order
pub trait MappingSink<'a> {
    fn write_row(&mut self, row: MappingRow<'a>) -> QuestResult<()>;
}

impl<'a> MappingSink<'a> for Vec<MappingRow<'a>> {
    fn write_row(&mut self, row: MappingRow<'a>) -> QuestResult<()> {
        self.push(row);
        Ok(())
    }
}

impl TargetLibrary {
    /// Assign read counts to the library by exact sequence match, returning the
    /// mapping stats alongside one row per target.
    pub fn map<'a>(
        &'a self,
        stats: &'a LibraryIndependentStats,
        counts: &SequenceCounts,
        custom_count_threshold: Option<u64>,
    ) -> QuestResult<(LibraryDependentStats, Vec<MappingRow<'a>>)> {
        let mut rows = Vec::with_capacity(self.total_target_count());
        let mapped = self.map_and_write(stats, counts, custom_count_threshold, &mut rows)?;
        Ok((mapped, rows))
    }

    /// Assign read counts to the library by exact sequence match, streaming one
    /// row per target to `sink` and collecting the mapping stats.
    pub fn map_and_write<'a, S: MappingSink<'a>>(
        &'a self,
        stats: &'a LibraryIndependentStats,
        counts: &SequenceCounts,
        custom_count_threshold: Option<u64>,
        sink: &mut S,
    ) -> QuestResult<LibraryDependentStats> {
        if self.short_target_count() > 0 {
            warn!(
                "{} unique library sequences are below the minimum length ({})!",
                self.short_target_count(),
                self.min_length()
            );
        }

        let sample = stats.sample_name.as_str();
        for target in self.targets() {
            sink.write_row(MappingRow {
                target,
                count: counts.get(target.sequence.as_str()).copied().unwrap_or(0),
                is_unique: self.synonym_count(&target.sequence) == 1,
                sample,
            })?;
        }

        let mut template_counts: Vec<u64> = Vec::with_capacity(self.qualifying_target_count());
        let mut multimap_reads = 0u64;
        for (sequence, &synonyms) in self.target_counts() {
            if sequence.len() < self.min_length() {
                continue;
            }
            let count = counts.get(sequence.as_str()).copied().unwrap_or(0);
            template_counts.push(count);
            if synonyms > 1 {
                multimap_reads += count;
            }
        }
        template_counts.sort_unstable();

        let mut mapped = LibraryDependentStats {
            reads: stats.clone(),
            total_templates: self.total_target_count() as u64,
            total_unique_templates: self.unique_target_count() as u64,
            length_excluded_templates: self.short_target_count() as u64,
            low_count_templates_user: custom_count_threshold
                .map(|lt| LowCountThreshold { lt, count: 0 }),
            ..LibraryDependentStats::default()
        };

        if template_counts.is_empty() {
            warn!("No library sequence meets the minimum length ({})!", self.min_length());
        } else {
            let summary = summarize_templates(&template_counts)?;
            if summary.total == 0 {
                warn!("No library matches!");
            }

            mapped.mapped_to_template_reads = summary.total;
            mapped.multimap_reads = multimap_reads;
            mapped.mean_count_per_template = summary.mean;
            mapped.median_count_per_template = summary.median;
            mapped.gini_coefficient = summary.gini;

            mapped.zero_count_templates = statistics::count_zero(&template_counts) as u64;
            mapped.low_count_templates_lt_15 =
                statistics::count_below(&template_counts, LOW_COUNT_THRESHOLDS[0]) as u64;
            mapped.low_count_templates_lt_30 =
                statistics::count_below(&template_counts, LOW_COUNT_THRESHOLDS[1]) as u64;
            if let Some(user) = mapped.low_count_templates_user.as_mut() {
                user.count = statistics::count_below(&template_counts, user.lt) as u64;
            }
        }

        mapped.unmapped_reads = stats
            .total_reads
            .checked_sub(mapped.mapped_to_template_reads)
            .ok_or_else(|| {
                QuestError::UnsupportedData(format!(
                    "{} reads mapped to the library but only {} reads were kept",
                    mapped.mapped_to_template_reads, stats.total_reads
                ))
            })?;

        Ok(mapped)
    }
}

fn summarize_templates(sorted: &[u64]) -> QuestResult<CountSummary> {
    statistics::summarize(sorted, false).map_err(|e| match e {
        QuestError::EmptyInput(msg) => QuestError::UnsupportedData(msg),
        other => other,
    })
}
