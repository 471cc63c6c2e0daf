//! Integration tests for the Swift analyzer

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use swift_analysis::{
    AnalysisConfig, AnalysisError, DiagnosticKind, FileSyntax, ParseMetrics, ProjectSyntax,
    SwiftAnalyzer, SwiftDocument, SymbolKind,
};

fn get_fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

#[test]
fn test_analyze_simple_file() {
    let analyzer = SwiftAnalyzer::new().unwrap();

    let fixture_path = get_fixtures_dir().join("simple.swift");
    let result = analyzer.analyze_file(&fixture_path);

    assert!(
        result.is_ok(),
        "Failed to analyze simple.swift: {:?}",
        result.err()
    );
    let file = result.unwrap();

    assert!(!file.has_errors);
    assert!(file.diagnostics.is_empty());
    assert_eq!(file.outline.imports(), vec!["Foundation"]);

    let person = file.outline.find("Person").unwrap();
    assert_eq!(person.kind, SymbolKind::Class);
    assert_eq!(person.doc_comment.as_deref(), Some("A person with a name"));
    assert!(person.child("init").is_some());
    assert!(person.child("greet").is_some());

    assert_eq!(
        file.outline.find("greetWorld").unwrap().kind,
        SymbolKind::Function
    );

    let metrics = analyzer.metrics();
    assert_eq!(metrics.files_succeeded, 1, "Expected 1 successful file");
}

#[test]
fn test_analyze_shapes_file() {
    let analyzer = SwiftAnalyzer::new().unwrap();
    let file = analyzer
        .analyze_file(&get_fixtures_dir().join("shapes.swift"))
        .unwrap();

    assert!(!file.has_errors, "{:?}", file.diagnostics);

    let outline = &file.outline;
    assert_eq!(outline.of_kind(SymbolKind::Protocol).len(), 2);
    assert_eq!(outline.of_kind(SymbolKind::Class).len(), 3);
    assert_eq!(outline.of_kind(SymbolKind::Struct).len(), 1);
    assert_eq!(outline.of_kind(SymbolKind::Enum).len(), 1);
    assert_eq!(outline.of_kind(SymbolKind::Extension).len(), 1);
    assert_eq!(outline.of_kind(SymbolKind::EnumCase).len(), 3);

    let container = outline.find("Container").unwrap();
    assert_eq!(container.child("items").unwrap().visibility, "private");
    assert_eq!(container.child("add").unwrap().kind, SymbolKind::Method);
}

#[test]
fn test_broken_file_reports_diagnostics() {
    let analyzer = SwiftAnalyzer::new().unwrap();
    let file = analyzer
        .analyze_file(&get_fixtures_dir().join("broken.swift"))
        .unwrap();

    assert!(file.has_errors);
    assert!(!file.diagnostics.is_empty());
    assert!(file.diagnostics.iter().any(|d| d.end_line >= 4));
    for diagnostic in &file.diagnostics {
        assert!(matches!(
            diagnostic.kind,
            DiagnosticKind::Unexpected | DiagnosticKind::Missing
        ));
    }
}

#[test]
fn test_strict_mode_rejects_broken_file() {
    let analyzer =
        SwiftAnalyzer::with_config(AnalysisConfig::default().with_reject_syntax_errors(true))
            .unwrap();
    let result = analyzer.analyze_file(&get_fixtures_dir().join("broken.swift"));

    assert!(matches!(result, Err(AnalysisError::Syntax(..))));
    assert_eq!(analyzer.metrics().files_failed, 1);
}

#[test]
fn test_file_too_large() {
    let analyzer =
        SwiftAnalyzer::with_config(AnalysisConfig::default().with_max_file_size(10)).unwrap();
    let result = analyzer.analyze_file(&get_fixtures_dir().join("simple.swift"));

    assert!(matches!(result, Err(AnalysisError::FileTooLarge(_, size)) if size > 10));
}

#[test]
fn test_discover_and_analyze_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("Sources").join("App");
    fs::create_dir_all(&nested).unwrap();

    fs::write(dir.path().join("Package.swift"), "import PackageDescription\n").unwrap();
    fs::write(nested.join("App.swift"), "struct App {}\n").unwrap();
    fs::write(nested.join("Broken.swift"), "struct {\n").unwrap();
    fs::write(nested.join("README.md"), "# App\n").unwrap();

    let analyzer = SwiftAnalyzer::new().unwrap();
    let files = analyzer.discover_files(dir.path()).unwrap();
    assert_eq!(files.len(), 3);
    assert!(files.iter().all(|f| analyzer.can_parse(f)));

    let project = analyzer.analyze_directory(dir.path()).unwrap();
    assert_eq!(project.total_files(), 3);
    assert!(project.failed_files.is_empty());
    assert_eq!(project.success_rate(), 1.0);
    assert_eq!(project.files_with_errors().count(), 1);
    assert!(project.total_diagnostics() >= 1);
}

#[test]
fn test_analyze_files_collects_failures() {
    let analyzer = SwiftAnalyzer::new().unwrap();
    let paths = vec![
        get_fixtures_dir().join("simple.swift"),
        PathBuf::from("/nonexistent/Missing.swift"),
    ];

    let project = analyzer.analyze_files(&paths).unwrap();
    assert_eq!(project.files.len(), 1);
    assert_eq!(project.failed_files.len(), 1);
    assert_eq!(project.failed_files[0].0, paths[1]);
    assert_eq!(project.success_rate(), 0.5);

    let metrics = analyzer.metrics();
    assert_eq!(metrics.files_attempted, 2);
    assert_eq!(metrics.files_failed, 1);
}

#[test]
fn test_parallel_matches_sequential() {
    let paths: Vec<PathBuf> = ["simple.swift", "shapes.swift", "broken.swift"]
        .iter()
        .map(|name| get_fixtures_dir().join(name))
        .collect();

    let sequential = SwiftAnalyzer::new().unwrap();
    let parallel =
        SwiftAnalyzer::with_config(AnalysisConfig::default().with_parallel(true).with_workers(2))
            .unwrap();

    let a = sequential.analyze_files(&paths).unwrap();
    let b = parallel.analyze_files(&paths).unwrap();

    assert_eq!(a.files.len(), b.files.len());
    for (left, right) in a.files.iter().zip(&b.files) {
        assert_eq!(left.file_path, right.file_path);
        assert_eq!(left.outline, right.outline);
        assert_eq!(left.diagnostics, right.diagnostics);
        assert_eq!(left.node_count, right.node_count);
    }
    assert_eq!(parallel.metrics().files_attempted, 3);
}

#[test]
fn test_reset_metrics() {
    let mut analyzer = SwiftAnalyzer::new().unwrap();
    analyzer
        .analyze_file(&get_fixtures_dir().join("simple.swift"))
        .unwrap();
    assert_eq!(analyzer.metrics().files_attempted, 1);

    analyzer.reset_metrics();
    assert_eq!(analyzer.metrics().files_attempted, 0);
}

#[test]
fn test_generous_timeout_does_not_fire() {
    let analyzer = SwiftAnalyzer::with_config(
        AnalysisConfig::default().with_timeout(Some(Duration::from_secs(60))),
    )
    .unwrap();
    let source = "func f() {}\n".repeat(500);
    let file = analyzer
        .analyze_source(&source, Path::new("many.swift"))
        .unwrap();
    assert_eq!(file.outline.of_kind(SymbolKind::Function).len(), 500);
}

#[test]
fn test_document_edit_session() {
    let source = fs::read_to_string(get_fixtures_dir().join("simple.swift")).unwrap();
    let mut doc = SwiftDocument::open("simple.swift", source.clone()).unwrap();

    // Append a new top-level function
    let end = doc.source().len();
    let changed = doc.edit(end, end, "\nfunc farewell() {}\n").unwrap();
    assert!(!changed.is_empty());
    assert!(doc.outline(false).find("farewell").is_some());

    // Break the class body, then restore it
    let brace = doc.source().find("class Person {").unwrap() + "class Person ".len();
    doc.edit(brace, brace + 1, "").unwrap();
    assert!(doc.has_errors());

    doc.edit(brace, brace, "{").unwrap();
    assert!(!doc.has_errors());
    assert!(doc.source().starts_with(&source));
}

#[test]
fn test_file_syntax_serializes() {
    let analyzer = SwiftAnalyzer::new().unwrap();
    let file = analyzer
        .analyze_source("enum E { case a }\n", Path::new("E.swift"))
        .unwrap();

    let json = serde_json::to_value(&file).unwrap();
    assert_eq!(json["outline"]["symbols"][0]["kind"], "enum");
    assert_eq!(json["outline"]["symbols"][0]["children"][0]["kind"], "enum_case");
    assert_eq!(
        json["parse_time"].as_u64(),
        Some(file.parse_time.as_nanos() as u64)
    );

    let back: FileSyntax = serde_json::from_value(json).unwrap();
    assert_eq!(back, file);
}

#[test]
fn test_project_syntax_round_trips() {
    let analyzer = SwiftAnalyzer::new().unwrap();
    let paths = vec![
        get_fixtures_dir().join("simple.swift"),
        PathBuf::from("/nonexistent/Missing.swift"),
    ];
    let project = analyzer.analyze_files(&paths).unwrap();
    assert!(project.total_parse_time > Duration::ZERO);

    let json = serde_json::to_string(&project).unwrap();
    let back: ProjectSyntax = serde_json::from_str(&json).unwrap();
    assert_eq!(back, project);

    let metrics = analyzer.metrics();
    let json = serde_json::to_string(&metrics).unwrap();
    let back: ParseMetrics = serde_json::from_str(&json).unwrap();
    assert_eq!(back, metrics);
}
