use crate::error::QuestResult;
use crate::export::AppInfo;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct StatsReport<'a, S: Serialize> {
    #[serde(flatten)]
    app_info: &'a AppInfo,
    #[serde(flatten)]
    stats: &'a S,
}

/// Write the stats report as a single JSON object, provenance fields first
pub fn write_stats<W: Write, S: Serialize>(
    writer: &mut W,
    app_info: &AppInfo,
    stats: &S,
) -> QuestResult<()> {
    let report = StatsReport { app_info, stats };
    serde_json::to_writer(&mut *writer, &report).map_err(std::io::Error::from)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counting::{LibraryDependentStats, LibraryIndependentStats};
    use serde_json::Value;

    fn app_info() -> AppInfo {
        AppInfo {
            version: "0.1.0".to_string(),
            command: "quest-tools count r.fq -o out".to_string(),
        }
    }

    #[test]
    fn test_library_independent_report() {
        let mut stats = LibraryIndependentStats::empty("S1");
        stats.input_reads = 10;
        stats.total_reads = 8;
        stats.total_excluded_reads = 2;

        let mut out = Vec::new();
        write_stats(&mut out, &app_info(), &stats).unwrap();
        let value: Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["version"], "0.1.0");
        assert_eq!(value["command"], "quest-tools count r.fq -o out");
        assert_eq!(value["sample_name"], "S1");
        assert_eq!(value["discarded_reads"], 2);
        assert!(value.get("mapped_to_template_reads").is_none());
        assert_eq!(value.as_object().unwrap().len(), 11);
    }

    #[test]
    fn test_library_dependent_report() {
        let stats = LibraryDependentStats {
            reads: LibraryIndependentStats::empty("S1"),
            median_count_per_template: 2.5,
            ..LibraryDependentStats::default()
        };

        let mut out = Vec::new();
        write_stats(&mut out, &app_info(), &stats).unwrap();
        let value: Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["median_count_per_template"], 2.5);
        assert_eq!(value["low_count_templates_user"], Value::Null);
        assert_eq!(value["total_reads"], 0);
    }
}
