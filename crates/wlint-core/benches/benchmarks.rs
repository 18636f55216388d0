use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use wlint_core::analysis::AnalysisEngine;
use wlint_core::semantic::SymbolTableBuilder;
use wlint_core::source::SourceFile;

fn generate_500_loc_package() -> String {
    let mut code = String::with_capacity(20_000);
    code.push_str("(* Generated 500 LOC package for benchmarking *)\n\n");

    for i in 0..50 {
        code.push_str(&format!(
            r#"processBatch{i}[data_] := Module[{{result{i}, cache{i}}},
  result{i} = data * {i};
  cache{i} = Table[result{i} + k,
    {{k, 1, 10}}
  ];
  Block[{{verbose{i}}},
    verbose{i} = result{i} > 0;
    Print[verbose{i}]
  ];
  cache{i}
]

"#,
            i = i
        ));
    }

    code
}

fn generate_100_files() -> Vec<(String, String)> {
    (0..100)
        .map(|i| {
            let filename = format!("file_{}.wl", i);
            let content = format!(
                r#"transform{i}[item_] := Module[{{scaled{i}}},
  scaled{i} = item * {i};
  scaled{i} + 1
]

total{i} = transform{i}[{i}];
Print[total{i}]
"#,
                i = i
            );
            (filename, content)
        })
        .collect()
}

fn bench_symbol_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("symbol_table");

    let code_500 = generate_500_loc_package();
    let lines_500 = code_500.lines().count();
    let file_500 = SourceFile::from_source("large.wl", &code_500);

    group.throughput(Throughput::Elements(lines_500 as u64));
    group.bench_function("build_500_loc", |b| {
        b.iter(|| SymbolTableBuilder::build(black_box(&file_500)))
    });

    group.finish();
}

fn bench_rules(c: &mut Criterion) {
    let mut group = c.benchmark_group("rules");

    let engine = AnalysisEngine::new();

    let dirty_code = r#"
globalCounter = 0;
globalCounter = 1;
Module[{unusedBinder, tmp},
  tmp = globalCounter;
  tmp = globalCounter + 1;
  Print[tmp]
];
isEven[n_] := If[n < 1, True, isOdd[n - 1]];
isOdd[n_] := If[n < 1, False, isEven[n - 1]];
"#;

    let dirty_file = SourceFile::from_source("dirty.wl", dirty_code);
    group.bench_function("dirty_file", |b| {
        b.iter(|| engine.analyze(black_box(&dirty_file)))
    });

    let clean_code = r#"
circleArea[radius_] := Module[{squared},
  squared = radius * radius;
  N[Pi] * squared
]

Print[circleArea[2]]
"#;

    let clean_file = SourceFile::from_source("clean.wl", clean_code);
    group.bench_function("clean_file", |b| {
        b.iter(|| engine.analyze(black_box(&clean_file)))
    });

    group.finish();
}

fn bench_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis");

    let engine = AnalysisEngine::new();
    let code_500 = generate_500_loc_package();
    let file_500 = SourceFile::from_source("large.wl", &code_500);

    group.bench_function("analyze_500_loc", |b| {
        b.iter(|| engine.analyze(black_box(&file_500)))
    });

    let files_100 = generate_100_files();
    let sources: Vec<SourceFile> = files_100
        .iter()
        .map(|(name, content)| SourceFile::from_source(name, content))
        .collect();

    group.bench_function("analyze_100_files", |b| {
        b.iter(|| {
            for file in &sources {
                let _ = engine.analyze(black_box(file));
            }
        })
    });

    for size in [10, 25, 50, 100] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("project_size", size), &size, |b, &size| {
            let subset: Vec<_> = sources.iter().take(size).collect();
            b.iter(|| {
                for file in &subset {
                    let _ = engine.analyze(black_box(file));
                }
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_symbol_table, bench_rules, bench_analysis);
criterion_main!(benches);
