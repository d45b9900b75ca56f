use projgraph::core::scorer::{rank_critical_files, select_main_file};
use projgraph::core::TrackedFile;

fn file(path: &str, size: u64, imports: &[&str], imported_by: &[&str]) -> TrackedFile {
    let mut f = TrackedFile::new(path, ext_of(path), size);
    f.imports = imports.iter().map(|s| s.to_string()).collect();
    f.imported_by = imported_by.iter().map(|s| s.to_string()).collect();
    f
}

fn ext_of(path: &str) -> String {
    path.rfind('.').map(|i| path[i..].to_string()).unwrap_or_default()
}

#[test]
fn higher_inbound_wins_a_score_tie() {
    // 3·1 + 1.5·2 and 3·0 + 1.5·4 both come to 6, sizes are equal
    let files = vec![
        file("x.ts", 9, &["p.ts", "q.ts"], &["r.ts"]),
        file("y.ts", 9, &["p.ts", "q.ts", "r.ts", "s.ts"], &[]),
    ];
    let ranked = rank_critical_files(&files, None, 12);
    assert_eq!(ranked[0].score, ranked[1].score);
    assert_eq!(ranked[0].path, "x.ts");
}

#[test]
fn larger_file_ranks_first_when_edges_match() {
    let files = vec![
        file("small.ts", 1000, &["z.ts"], &[]),
        file("large.ts", 1001, &["z.ts"], &[]),
    ];
    let ranked = rank_critical_files(&files, None, 12);
    assert_eq!(ranked[0].path, "large.ts");
    assert_eq!(ranked[1].path, "small.ts");
}

#[test]
fn inbound_outweighs_outbound() {
    let files = vec![
        file("leaf.ts", 10, &[], &["a.ts", "b.ts"]),
        file("a.ts", 10, &["leaf.ts"], &[]),
        file("b.ts", 10, &["leaf.ts"], &[]),
        file("isolated.ts", 10_000_000, &[], &[]),
    ];
    let ranked = rank_critical_files(&files, None, 12);
    let paths: Vec<_> = ranked.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, vec!["leaf.ts", "a.ts", "b.ts"]);
    assert_eq!(ranked[0].inbound_count, 2);
}

#[test]
fn main_file_qualifies_without_edges() {
    let files = vec![file("main.py", 10, &[], &[]), file("other.py", 10, &[], &[])];
    let ranked = rank_critical_files(&files, Some("main.py"), 12);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].path, "main.py");
    assert!(ranked[0].score.unwrap() > 5.0);
}

#[test]
fn empty_graph_falls_back_to_largest_files() {
    let files: Vec<_> = (0..15)
        .map(|i| file(&format!("f{i:02}.txt"), i as u64 * 10, &[], &[]))
        .collect();
    let ranked = rank_critical_files(&files, None, 12);
    assert_eq!(ranked.len(), 12);
    assert_eq!(ranked[0].path, "f14.txt");
    assert_eq!(ranked[11].path, "f03.txt");
    assert!(ranked.iter().all(|e| e.score.is_none()));
}

#[test]
fn limit_truncates_ranking() {
    let files: Vec<_> = (0..20)
        .map(|i| file(&format!("m{i}.ts"), 1, &["x.ts"], &[]))
        .collect();
    assert_eq!(rank_critical_files(&files, None, 12).len(), 12);
    assert_eq!(rank_critical_files(&files, None, 3).len(), 3);
}

#[test]
fn configured_main_file_must_match_exactly() {
    let files = vec![file("src/index.ts", 10, &[], &[]), file("package.json", 5, &[], &[])];
    assert_eq!(
        select_main_file(&files, Some("src/index.ts")).as_deref(),
        Some("src/index.ts")
    );
    // No match: fall back to the heuristic, which favours the manifest
    assert_eq!(
        select_main_file(&files, Some("SRC/index.ts")).as_deref(),
        Some("package.json")
    );
}

#[test]
fn heuristic_falls_back_to_size_then_path() {
    let files = vec![
        file("b.txt", 10, &[], &[]),
        file("a.txt", 10, &[], &[]),
        file("c.txt", 5, &[], &[]),
    ];
    assert_eq!(select_main_file(&files, None).as_deref(), Some("a.txt"));

    let files = vec![file("b.txt", 10, &[], &[]), file("c.txt", 50, &[], &[])];
    assert_eq!(select_main_file(&files, None).as_deref(), Some("c.txt"));

    assert_eq!(select_main_file(&[], None), None);
}
