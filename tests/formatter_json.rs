use projgraph::core::{ProjectAnalyzer, Report, ScanOptions};
use projgraph::formatters::{JsonFormatter, SummaryFormatter};
use serde_json::Value;
use std::fs;

fn report() -> (tempfile::TempDir, Report) {
    let dir = tempfile::TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("src/main.ts"), "import { u } from './util';\n").unwrap();
    fs::write(dir.path().join("src/util.ts"), "export const u = 1;\n").unwrap();
    fs::write(dir.path().join("notes.txt"), "todo\n").unwrap();
    let report = ProjectAnalyzer::new(ScanOptions::default())
        .analyze(dir.path())
        .unwrap();
    (dir, report)
}

#[test]
fn json_formatter_outputs_camel_case_report() {
    let (dir, report) = report();
    let path = dir.path().join("report.json");

    JsonFormatter::new().format_to_file(&report, &path).unwrap();

    let data = fs::read_to_string(&path).unwrap();
    let v: Value = serde_json::from_str(&data).unwrap();

    assert_eq!(v["totalFiles"].as_u64().unwrap(), 3);
    assert_eq!(v["analyzedFiles"].as_u64().unwrap(), 2);
    assert_eq!(v["mainFile"].as_str().unwrap(), "src/main.ts");
    assert!(v["folderTree"]["folders"].is_array());
    assert!(v["graphNodes"].is_array());
    assert_eq!(v["graphLinks"][0]["source"], "src/main.ts");
    assert_eq!(v["graphLinks"][0]["target"], "src/util.ts");

    let util = v["files"]
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["path"] == "src/util.ts")
        .unwrap();
    assert_eq!(util["importedBy"][0], "src/main.ts");
}

#[test]
fn json_report_deserializes_back() {
    let (_dir, report) = report();
    let text = JsonFormatter::new().with_pretty(false).format_report(&report).unwrap();
    let back: Report = serde_json::from_str(&text).unwrap();
    assert_eq!(back, report);
}

#[test]
fn compact_json_uses_index_pairs() {
    let (_dir, report) = report();
    let text = JsonFormatter::compact().format_report(&report).unwrap();
    let v: Value = serde_json::from_str(&text).unwrap();

    assert_eq!(v["meta"]["nodes"].as_u64().unwrap(), 2);
    assert_eq!(v["meta"]["edges"].as_u64().unwrap(), 1);
    assert_eq!(v["meta"]["format"], "compact");

    let files = v["files"].as_array().unwrap();
    let edge = &v["edges"][0];
    let source = edge[0].as_u64().unwrap() as usize;
    let target = edge[1].as_u64().unwrap() as usize;
    assert_eq!(files[source][0], "src/main.ts");
    assert_eq!(files[target][0], "src/util.ts");
}

#[test]
fn summary_lists_main_critical_files_and_tree() {
    let (_dir, report) = report();
    let text = SummaryFormatter::new().format_report(&report).unwrap();

    assert!(text.contains("files: 3 total"));
    assert!(text.contains("main: src/main.ts"));
    assert!(text.contains("## Critical files"));
    assert!(text.contains(" 1. src/main.ts"));
    assert!(text.contains("## Folder tree"));
    assert!(text.contains("src/\n"));
    assert!(text.contains("  util.ts\n"));
    assert!(text.contains("notes.txt\n"));

    let without_tree = SummaryFormatter::new().with_tree(false).format_report(&report).unwrap();
    assert!(!without_tree.contains("## Folder tree"));
}

#[test]
fn summary_tree_collapses_past_max_depth() {
    let (_dir, report) = report();
    let text = SummaryFormatter::new()
        .with_max_tree_depth(1)
        .format_report(&report)
        .unwrap();

    assert!(text.contains("src/ (2 files)\n"));
    assert!(!text.contains("  util.ts\n"));
    assert!(text.contains("notes.txt\n"));
}
