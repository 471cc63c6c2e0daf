//! File and project level analysis of Swift sources

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};
use swift_grammar::SwiftGrammar;

use crate::config::AnalysisConfig;
use crate::diagnostics::{self, Diagnostic};
use crate::error::{AnalysisError, AnalysisResult};
use crate::metrics::{duration_nanos, ParseMetrics};
use crate::outline::Outline;

/// Result of analyzing one file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSyntax {
    /// Path to the source file
    pub file_path: PathBuf,

    /// Whether the tree contains ERROR or MISSING nodes
    pub has_errors: bool,

    pub diagnostics: Vec<Diagnostic>,

    /// Empty unless `include_outline` is set
    pub outline: Outline,

    /// Number of nodes in the syntax tree
    pub node_count: usize,

    /// Time taken to parse this file (serialized as nanoseconds)
    #[serde(with = "duration_nanos")]
    pub parse_time: Duration,

    /// Number of lines in the file
    pub line_count: usize,

    /// File size in bytes
    pub byte_count: usize,
}

/// Aggregate result of analyzing many files
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectSyntax {
    /// Files that were analyzed
    pub files: Vec<FileSyntax>,

    /// Files that could not be analyzed (path, error message)
    pub failed_files: Vec<(PathBuf, String)>,

    /// Total parse time for all files
    #[serde(with = "duration_nanos")]
    pub total_parse_time: Duration,
}

impl ProjectSyntax {
    fn from_results(results: Vec<Result<FileSyntax, (PathBuf, String)>>) -> Self {
        let mut project = Self::default();
        for result in results {
            match result {
                Ok(file) => {
                    project.total_parse_time += file.parse_time;
                    project.files.push(file);
                }
                Err(failed) => project.failed_files.push(failed),
            }
        }
        project
    }

    /// Total number of files processed (success + failure)
    pub fn total_files(&self) -> usize {
        self.files.len() + self.failed_files.len()
    }

    /// Success rate (0.0 to 1.0)
    pub fn success_rate(&self) -> f64 {
        if self.total_files() == 0 {
            0.0
        } else {
            self.files.len() as f64 / self.total_files() as f64
        }
    }

    /// Analyzed files that contain syntax errors
    pub fn files_with_errors(&self) -> impl Iterator<Item = &FileSyntax> {
        self.files.iter().filter(|f| f.has_errors)
    }

    pub fn total_diagnostics(&self) -> usize {
        self.files.iter().map(|f| f.diagnostics.len()).sum()
    }
}

/// Swift analyzer: parses sources through the grammar handle and reports
/// diagnostics and outlines.
pub struct SwiftAnalyzer {
    grammar: SwiftGrammar,
    config: AnalysisConfig,
    metrics: Mutex<ParseMetrics>,
}

impl SwiftAnalyzer {
    pub fn new() -> AnalysisResult<Self> {
        Self::with_config(AnalysisConfig::default())
    }

    pub fn with_config(config: AnalysisConfig) -> AnalysisResult<Self> {
        Ok(Self {
            grammar: SwiftGrammar::load()?,
            config,
            metrics: Mutex::new(ParseMetrics::default()),
        })
    }

    pub fn language(&self) -> &str {
        self.grammar.name()
    }

    pub fn file_extensions(&self) -> &[&str] {
        self.grammar.file_extensions()
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Check if the analyzer handles the given file
    pub fn can_parse(&self, path: &Path) -> bool {
        if let Some(ext) = path.extension() {
            let ext_str = format!(".{}", ext.to_string_lossy());
            self.file_extensions().contains(&ext_str.as_str())
        } else {
            false
        }
    }

    fn lock_metrics(&self) -> MutexGuard<'_, ParseMetrics> {
        self.metrics
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn update_metrics(&self, result: Option<&FileSyntax>, duration: Duration) {
        let mut metrics = self.lock_metrics();
        metrics.files_attempted += 1;
        metrics.total_parse_time += duration;
        match result {
            Some(file) => {
                metrics.files_succeeded += 1;
                metrics.total_nodes += file.node_count;
                metrics.total_diagnostics += file.diagnostics.len();
            }
            None => metrics.files_failed += 1,
        }
    }

    /// Get accumulated metrics
    pub fn metrics(&self) -> ParseMetrics {
        self.lock_metrics().clone()
    }

    pub fn reset_metrics(&mut self) {
        *self.lock_metrics() = ParseMetrics::default();
    }

    /// Analyze a source string.
    ///
    /// Does not update metrics; only `analyze_file` does, so a file is
    /// never counted twice.
    pub fn analyze_source(&self, source: &str, file_path: &Path) -> AnalysisResult<FileSyntax> {
        let start = Instant::now();

        let mut parser = self.grammar.new_parser()?;
        if let Some(timeout) = self.config.timeout_per_file {
            parser.set_timeout_micros(u64::try_from(timeout.as_micros()).unwrap_or(u64::MAX));
        }

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| AnalysisError::Timeout(file_path.to_path_buf()))?;
        let root = tree.root_node();

        let diagnostics =
            diagnostics::collect(root, source.as_bytes(), self.config.max_diagnostics);

        if self.config.reject_syntax_errors && root.has_error() {
            let (line, column, message) = diagnostics
                .first()
                .map(|d| (d.line, d.column, d.message.clone()))
                .unwrap_or((1, 1, "Syntax error".to_string()));
            return Err(AnalysisError::Syntax(
                file_path.to_path_buf(),
                line,
                column,
                message,
            ));
        }

        let outline = if self.config.include_outline {
            Outline::build(root, source.as_bytes(), self.config.include_docs)
        } else {
            Outline::default()
        };

        let file = FileSyntax {
            file_path: file_path.to_path_buf(),
            has_errors: root.has_error(),
            diagnostics,
            outline,
            node_count: root.descendant_count(),
            parse_time: start.elapsed(),
            line_count: source.lines().count(),
            byte_count: source.len(),
        };

        debug!(
            "Analyzed {}: {} nodes, {} diagnostics",
            file_path.display(),
            file.node_count,
            file.diagnostics.len()
        );
        Ok(file)
    }

    /// Read and analyze a single file, updating metrics
    pub fn analyze_file(&self, path: &Path) -> AnalysisResult<FileSyntax> {
        let start = Instant::now();
        let result = self.read_and_analyze(path);
        self.update_metrics(result.as_ref().ok(), start.elapsed());
        result
    }

    fn read_and_analyze(&self, path: &Path) -> AnalysisResult<FileSyntax> {
        let metadata =
            fs::metadata(path).map_err(|e| AnalysisError::Io(path.to_path_buf(), e))?;

        let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if size > self.config.max_file_size {
            return Err(AnalysisError::FileTooLarge(path.to_path_buf(), size));
        }

        let source =
            fs::read_to_string(path).map_err(|e| AnalysisError::Io(path.to_path_buf(), e))?;
        self.analyze_source(&source, path)
    }

    /// Analyze many files; failures are collected, not returned.
    pub fn analyze_files(&self, paths: &[PathBuf]) -> AnalysisResult<ProjectSyntax> {
        info!("Analyzing {} Swift files", paths.len());

        let project = if self.config.parallel {
            self.analyze_files_parallel(paths)?
        } else {
            let results = paths.iter().map(|path| self.analyze_one(path)).collect();
            ProjectSyntax::from_results(results)
        };

        info!(
            "Analyzed {} files ({} failed, {} with syntax errors)",
            project.total_files(),
            project.failed_files.len(),
            project.files_with_errors().count()
        );
        Ok(project)
    }

    /// Analyze files in parallel using rayon
    fn analyze_files_parallel(&self, paths: &[PathBuf]) -> AnalysisResult<ProjectSyntax> {
        use rayon::prelude::*;

        // Configure thread pool if parallel_workers is specified
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(num_threads) = self.config.parallel_workers {
            builder = builder.num_threads(num_threads);
        }
        let pool = builder
            .build()
            .map_err(|e| AnalysisError::ThreadPool(e.to_string()))?;

        let results: Vec<_> =
            pool.install(|| paths.par_iter().map(|path| self.analyze_one(path)).collect());

        Ok(ProjectSyntax::from_results(results))
    }

    fn analyze_one(&self, path: &Path) -> Result<FileSyntax, (PathBuf, String)> {
        self.analyze_file(path).map_err(|e| {
            warn!("Skipping {}: {e}", path.display());
            (path.to_path_buf(), e.to_string())
        })
    }

    /// Analyze every Swift file below a directory
    pub fn analyze_directory(&self, dir: &Path) -> AnalysisResult<ProjectSyntax> {
        let paths = self.discover_files(dir)?;
        self.analyze_files(&paths)
    }

    /// Find analyzable files below a directory, sorted by path
    pub fn discover_files(&self, dir: &Path) -> AnalysisResult<Vec<PathBuf>> {
        fn walk_dir(
            analyzer: &SwiftAnalyzer,
            dir: &Path,
            files: &mut Vec<PathBuf>,
        ) -> AnalysisResult<()> {
            if !dir.is_dir() {
                return Ok(());
            }

            for entry in fs::read_dir(dir).map_err(|e| AnalysisError::Io(dir.to_path_buf(), e))? {
                let entry = entry.map_err(|e| AnalysisError::Io(dir.to_path_buf(), e))?;
                let path = entry.path();

                if path.is_dir() {
                    walk_dir(analyzer, &path, files)?;
                } else if analyzer.can_parse(&path) {
                    files.push(path);
                }
            }

            Ok(())
        }

        let mut files = Vec::new();
        walk_dir(self, dir, &mut files)?;
        files.sort();
        Ok(files)
    }
}
