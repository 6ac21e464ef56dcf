use quest_tools::commands::count::{run, CountOptions, CountOutcome};
use quest_tools::export::AppInfo;
use quest_tools::QuestError;
use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FASTQ: &str = "\
@r1/1
ACGTACGT
+
IIIIIIII
@r2/1
ACGTACGT
+
IIIIIIII
@r3 1:N:0:ACGT
TTTTGGGG
+
IIIIIIII
@r4/2
acgtACGT
+
IIIIIIII
@r5
ACGTNCGT
+
IIIIIIII
";

const LIBRARY: &str = "\
##library-type: single
#id\tname\tsequence
g1\tGENE1_1\tACGTACGT
g2\tGENE2_1\tTTTTGGGG
g3\tGENE3_1\tCCCCCCCC
g4\tGENE2_2\tTTTTGGGG
";

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn options(dir: &TempDir, queries: PathBuf) -> CountOptions {
    CountOptions {
        queries,
        output: dir.path().join("results").join("run1"),
        min_length: 1,
        most_common: None,
        sample: Some("SAMPLE_1".to_string()),
        reference: None,
        library: None,
        low_count: None,
        cpus: 1,
        discard_qc_fail: false,
        compress: false,
        show_progress: false,
    }
}

fn app_info() -> AppInfo {
    AppInfo {
        version: "0.1.0".to_string(),
        command: "quest-tools count reads.fq".to_string(),
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn data_lines(text: &str) -> Vec<&str> {
    text.lines().filter(|l| !l.starts_with('#')).collect()
}

#[test]
fn test_library_independent_counting() {
    let dir = TempDir::new().unwrap();
    let queries = write_file(dir.path(), "reads.fq", FASTQ);
    let mut options = options(&dir, queries);
    options.most_common = Some(5);

    let outcome = run(&options, &app_info()).unwrap();
    let stats = match &outcome {
        CountOutcome::Independent(stats) => stats,
        other => panic!("unexpected outcome: {:?}", other),
    };
    assert_eq!(stats.input_reads, 5);
    assert_eq!(stats.total_reads, 3);
    assert_eq!(stats.total_excluded_reads, 2);
    assert_eq!(stats.masked_reads, 1);
    assert_eq!(stats.ambiguous_nt_reads, 1);

    let results = dir.path().join("results");
    let query_counts = fs::read_to_string(results.join("run1.query_counts.tsv")).unwrap();
    assert!(query_counts.starts_with("##Command: quest-tools count reads.fq\n##Version: 0.1.0\n"));
    assert_eq!(
        data_lines(&query_counts),
        vec!["ACGTACGT\t8\t2", "TTTTGGGG\t8\t1"]
    );

    let fasta = fs::read_to_string(results.join("run1.SAMPLE_1.top5.fasta")).unwrap();
    assert_eq!(fasta, ">quest|1|2\nACGTACGT\n>quest|2|1\nTTTTGGGG\n");

    let json = read_json(&results.join("run1.stats.json"));
    assert_eq!(json["sample_name"], "SAMPLE_1");
    assert_eq!(json["discarded_reads"], 2);
    assert_eq!(json["version"], "0.1.0");
    assert!(json.get("mapped_to_template_reads").is_none());
    assert!(!results.join("run1.lib_counts.tsv").exists());
}

#[test]
fn test_library_dependent_counting() {
    let dir = TempDir::new().unwrap();
    let queries = write_file(dir.path(), "reads.fq", FASTQ);
    let library = write_file(dir.path(), "library.tsv", LIBRARY);
    let mut options = options(&dir, queries);
    options.library = Some(library);
    options.low_count = Some(2);

    let outcome = run(&options, &app_info()).unwrap();
    let mapped = match outcome {
        CountOutcome::Dependent(mapped) => mapped,
        other => panic!("unexpected outcome: {:?}", other),
    };
    assert_eq!(mapped.mapped_to_template_reads, 3);
    assert_eq!(mapped.unmapped_reads, 0);
    assert_eq!(mapped.multimap_reads, 1);
    assert_eq!(mapped.total_templates, 4);
    assert_eq!(mapped.total_unique_templates, 3);
    assert_eq!(mapped.zero_count_templates, 1);
    assert_eq!(mapped.low_count_templates_lt_15, 3);

    let results = dir.path().join("results");
    let lib_counts = fs::read_to_string(results.join("run1.lib_counts.tsv")).unwrap();
    assert!(lib_counts.contains("#ID\tNAME\tSEQUENCE\tLENGTH\tCOUNT\tUNIQUE\tSAMPLE\n"));
    assert_eq!(
        data_lines(&lib_counts),
        vec![
            "g1\tGENE1_1\tACGTACGT\t8\t2\t1\tSAMPLE_1",
            "g2\tGENE2_1\tTTTTGGGG\t8\t1\t0\tSAMPLE_1",
            "g3\tGENE3_1\tCCCCCCCC\t8\t0\t1\tSAMPLE_1",
            "g4\tGENE2_2\tTTTTGGGG\t8\t1\t0\tSAMPLE_1",
        ]
    );

    let json = read_json(&results.join("run1.stats.json"));
    assert_eq!(json["median_count_per_template"], 1.0);
    assert_eq!(json["gini_coefficient"], 0.44);
    assert_eq!(json["low_count_templates_user"]["lt"], 2);
    assert_eq!(json["low_count_templates_user"]["count"], 2);
    assert_eq!(json["total_reads"], 3);
}

#[test]
fn test_compressed_outputs() {
    let dir = TempDir::new().unwrap();
    let queries = write_file(dir.path(), "reads.fq", FASTQ);
    let mut options = options(&dir, queries);
    options.compress = true;

    run(&options, &app_info()).unwrap();

    let results = dir.path().join("results");
    let (mut reader, _format) =
        niffler::from_path(results.join("run1.query_counts.tsv.gz")).unwrap();
    let mut text = String::new();
    reader.read_to_string(&mut text).unwrap();
    assert_eq!(data_lines(&text).len(), 2);

    // The stats report is never compressed
    assert!(results.join("run1.stats.json").exists());
}

#[test]
fn test_min_length_filter() {
    let dir = TempDir::new().unwrap();
    let queries = write_file(dir.path(), "reads.fq", "@a\nACG\n+\nIII\n@b\nACGTACGT\n+\nIIIIIIII\n");
    let mut options = options(&dir, queries);
    options.min_length = 5;

    let outcome = run(&options, &app_info()).unwrap();
    assert_eq!(outcome.reads().length_excluded_reads, 1);
    assert_eq!(outcome.reads().total_reads, 1);
}

#[test]
fn test_unsupported_fastq_header() {
    let dir = TempDir::new().unwrap();
    let queries = write_file(dir.path(), "reads.fq", "@r1 not-casava\nACGT\n+\nIIII\n");
    let options = options(&dir, queries);

    let err = run(&options, &app_info()).unwrap_err();
    let quest = err.downcast_ref::<QuestError>().unwrap();
    assert!(matches!(quest, QuestError::InvalidInputFormat(_)));
}

#[test]
fn test_invalid_read_alphabet() {
    let dir = TempDir::new().unwrap();
    let queries = write_file(dir.path(), "reads.fq", "@r1\nACXT\n+\nIIII\n");
    let options = options(&dir, queries);

    let err = run(&options, &app_info()).unwrap_err();
    assert_eq!(err.downcast_ref::<QuestError>().unwrap().kind(), "invalid_read");
}

#[test]
fn test_malformed_library() {
    let dir = TempDir::new().unwrap();
    let queries = write_file(dir.path(), "reads.fq", FASTQ);
    let library = write_file(dir.path(), "library.tsv", "g1\tGENE1\n");
    let mut options = options(&dir, queries);
    options.library = Some(library);

    let err = run(&options, &app_info()).unwrap_err();
    let quest = err.downcast_ref::<QuestError>().unwrap();
    assert!(matches!(quest, QuestError::InvalidLibrary(_)));
}

#[test]
fn test_empty_fastq_counts_nothing() {
    let dir = TempDir::new().unwrap();
    let queries = write_file(dir.path(), "reads.fq", "");
    let options = options(&dir, queries);

    let outcome = run(&options, &app_info()).unwrap();
    assert_eq!(outcome.reads().input_reads, 0);
    assert_eq!(outcome.reads().total_reads, 0);

    let results = dir.path().join("results");
    let query_counts = fs::read_to_string(results.join("run1.query_counts.tsv")).unwrap();
    assert_eq!(query_counts.lines().count(), 3);
    assert!(data_lines(&query_counts).is_empty());
    assert_eq!(read_json(&results.join("run1.stats.json"))["input_reads"], 0);
}
