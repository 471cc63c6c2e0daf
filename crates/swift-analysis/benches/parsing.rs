//! Benchmarks for Swift analysis

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::path::Path;
use swift_analysis::{AnalysisConfig, SwiftAnalyzer, SwiftDocument};

const SAMPLE_CODE: &str = r#"
import Foundation

/// A protocol for drawable objects
protocol Drawable {
    func draw()
}

/// A generic container class
class Container<T> {
    private var items: [T] = []

    func add(_ item: T) {
        items.append(item)
    }

    func get(_ index: Int) -> T? {
        guard index < items.count else { return nil }
        return items[index]
    }

    var count: Int {
        return items.count
    }
}

/// Base shape class
class Shape: Drawable {
    var name: String

    init(name: String) {
        self.name = name
    }

    func draw() {
        print("Drawing \(name)")
    }
}

/// Circle shape
class Circle: Shape {
    var radius: Double

    init(radius: Double) {
        self.radius = radius
        super.init(name: "Circle")
    }

    override func draw() {
        print("Drawing circle with radius \(radius)")
    }
}

/// Helper function
func greet(_ name: String) -> String {
    return "Hello, \(name)!"
}
"#;

fn benchmark_analyze_source(c: &mut Criterion) {
    let analyzer = SwiftAnalyzer::new().unwrap();

    c.bench_function("swift_analyze_source", |b| {
        b.iter(|| {
            analyzer
                .analyze_source(black_box(SAMPLE_CODE), Path::new("bench.swift"))
                .unwrap()
        })
    });
}

fn benchmark_diagnostics_only(c: &mut Criterion) {
    let analyzer = SwiftAnalyzer::with_config(AnalysisConfig::fast()).unwrap();

    c.bench_function("swift_diagnostics_only", |b| {
        b.iter(|| {
            analyzer
                .analyze_source(black_box(SAMPLE_CODE), Path::new("bench.swift"))
                .unwrap()
        })
    });
}

fn benchmark_incremental_edit(c: &mut Criterion) {
    let mut doc = SwiftDocument::open("bench.swift", SAMPLE_CODE).unwrap();
    let offset = SAMPLE_CODE.find("Drawing circle").unwrap();

    c.bench_function("swift_incremental_edit", |b| {
        b.iter(|| {
            doc.edit(offset, offset + 1, "d").unwrap();
            doc.edit(offset, offset + 1, "D").unwrap();
        })
    });
}

criterion_group!(
    benches,
    benchmark_analyze_source,
    benchmark_diagnostics_only,
    benchmark_incremental_edit
);
criterion_main!(benches);
