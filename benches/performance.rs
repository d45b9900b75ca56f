use criterion::{black_box, criterion_group, criterion_main, Criterion};
use projgraph::core::{ProjectAnalyzer, ScanOptions};
use projgraph::extractors::LanguageClass;
use std::path::Path;
use tempfile::TempDir;

fn write_typescript_tree(root: &Path, modules: usize) {
    for i in 0..modules {
        let dir = root.join(format!("src/feature_{}", i % 10));
        std::fs::create_dir_all(&dir).unwrap();
        let content = format!(
            r#"
import {{ Service{prev} }} from "../feature_{prev_dir}/service_{prev}";
import {{ shared }} from "/src/shared";
import React from "react";

export class Service{i} {{
    private inner = new Service{prev}();

    run(): number {{
        return shared(this.inner.run()) + {i};
    }}
}}

export const lazy{i} = () => import("./service_{i}");
"#,
            i = i,
            prev = i.saturating_sub(1),
            prev_dir = i.saturating_sub(1) % 10,
        );
        std::fs::write(dir.join(format!("service_{i}.ts")), content).unwrap();
    }
    std::fs::write(
        root.join("src/shared.ts"),
        "export const shared = (n: number) => n * 2;\n",
    )
    .unwrap();
}

fn write_python_tree(root: &Path, modules: usize) {
    let pkg = root.join("pkg");
    std::fs::create_dir_all(&pkg).unwrap();
    std::fs::write(pkg.join("__init__.py"), "").unwrap();
    for i in 0..modules {
        let content = format!(
            "from . import mod_{prev}\nfrom .mod_{prev} import value\nimport os, sys as system\n\nVALUE_{i} = {i}\n",
            i = i,
            prev = i.saturating_sub(1),
        );
        std::fs::write(pkg.join(format!("mod_{i}.py")), content).unwrap();
    }
}

fn benchmark_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("project_analysis");

    let small = TempDir::new().unwrap();
    write_typescript_tree(small.path(), 20);
    write_python_tree(small.path(), 20);

    group.bench_function("small_project", |b| {
        let analyzer = ProjectAnalyzer::new(ScanOptions::default());
        b.iter(|| black_box(analyzer.analyze(black_box(small.path()))))
    });

    let large = TempDir::new().unwrap();
    write_typescript_tree(large.path(), 500);
    write_python_tree(large.path(), 500);

    group.bench_function("large_project", |b| {
        let analyzer = ProjectAnalyzer::new(ScanOptions::default());
        b.iter(|| black_box(analyzer.analyze(black_box(large.path()))))
    });

    group.bench_function("large_project_single_worker", |b| {
        let analyzer = ProjectAnalyzer::new(ScanOptions::default().with_workers(1));
        b.iter(|| black_box(analyzer.analyze(black_box(large.path()))))
    });

    group.finish();
}

fn benchmark_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("import_extraction");

    let source: String = (0..200)
        .map(|i| format!("import {{ a{i} }} from './mod_{i}';\nconst b{i} = require('./req_{i}');\n"))
        .collect();

    group.bench_function("ecmascript_400_imports", |b| {
        b.iter(|| black_box(LanguageClass::EcmaScript.extract_imports(black_box(&source))))
    });

    group.finish();
}

criterion_group!(benches, benchmark_analysis, benchmark_extraction);
criterion_main!(benches);
