use crate::error::{QuestError, QuestResult};
use crate::utils::input::open_path;
use std::collections::{HashMap, HashSet};
use std::io::{BufRead, BufReader};
use std::path::Path;

const LIB_FIELD_ID: usize = 0;
const LIB_FIELD_NAME: usize = 1;
const LIB_FIELD_SEQ: usize = 2;

/// One reference record of the library
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub id: String,
    pub name: String,
    pub sequence: String,
}

impl Target {
    pub fn new(id: impl Into<String>, name: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sequence: sequence.into(),
        }
    }
}

/// In-memory target library.
///
/// `target_counts` maps each distinct sequence to the number of records that
/// share it (its synonym group size), so its values always sum to the number
/// of targets.
#[derive(Debug, Clone)]
pub struct TargetLibrary {
    min_length: usize,
    targets: Vec<Target>,
    target_counts: HashMap<String, u64>,
    short_target_count: usize,
}

impl TargetLibrary {
    /// Load a tab-delimited library file (optionally compressed)
    pub fn load(path: &Path, min_length: i64) -> QuestResult<Self> {
        Self::from_reader(BufReader::new(open_path(path)?), min_length)
    }

    /// Parse a library from `id<TAB>name<TAB>sequence[<TAB>...]` lines.
    ///
    /// Lines starting with `#` and blank lines are skipped; fields past the
    /// third are ignored.
    pub fn from_reader<R: BufRead>(reader: R, min_length: i64) -> QuestResult<Self> {
        let min_length = usize::try_from(min_length)
            .map_err(|_| QuestError::InvalidLibrary("Invalid minimum length!".to_string()))?;

        let mut targets = Vec::new();
        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.splitn(4, '\t').collect();
            if fields.len() < 3 {
                return Err(QuestError::InvalidLibrary(format!(
                    "Line {}: expected at least 3 tab-separated fields, found {}",
                    line_no + 1,
                    fields.len()
                )));
            }
            targets.push(Target::new(
                fields[LIB_FIELD_ID],
                fields[LIB_FIELD_NAME],
                fields[LIB_FIELD_SEQ],
            ));
        }

        if targets.is_empty() {
            return Err(QuestError::InvalidLibrary("Empty library!".to_string()));
        }

        Ok(Self::from_targets(targets, min_length))
    }

    pub fn from_targets(targets: Vec<Target>, min_length: usize) -> Self {
        let mut target_counts: HashMap<String, u64> = HashMap::new();
        let mut short_sequences: HashSet<&str> = HashSet::new();

        for target in &targets {
            *target_counts.entry(target.sequence.clone()).or_insert(0) += 1;
            if target.sequence.len() < min_length {
                short_sequences.insert(&target.sequence);
            }
        }

        let short_target_count = short_sequences.len();
        Self {
            min_length,
            targets,
            target_counts,
            short_target_count,
        }
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Targets in load order
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn target_counts(&self) -> &HashMap<String, u64> {
        &self.target_counts
    }

    /// Size of the synonym group sharing `sequence` (0 if not in the library)
    pub fn synonym_count(&self, sequence: &str) -> u64 {
        self.target_counts.get(sequence).copied().unwrap_or(0)
    }

    pub fn total_target_count(&self) -> usize {
        self.targets.len()
    }

    pub fn unique_target_count(&self) -> usize {
        self.target_counts.len()
    }

    /// Distinct library sequences shorter than the minimum length
    pub fn short_target_count(&self) -> usize {
        self.short_target_count
    }

    /// Distinct library sequences meeting the minimum length
    pub fn qualifying_target_count(&self) -> usize {
        self.unique_target_count() - self.short_target_count
    }
}
