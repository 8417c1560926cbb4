//! Grading pipeline: walk input tree → grade each file → place into output tree.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use futures::StreamExt;
use perfsort_ai::Grader;
use perfsort_core::{Category, FailurePolicy, Grade, GradeConfig};
use perfsort_store::{OutputTree, source_files};
use tracing::{error, info};

pub const COMPLETION_MESSAGE: &str = "Code analysis and categorization completed.";

#[derive(Debug, Default)]
pub struct RunStats {
    pub files_seen: usize,
    pub graded: usize,
    pub failed: usize,
    /// Keyword scan found nothing and the file fell back to Minimal.
    pub unmatched: usize,
    pub per_category: BTreeMap<Category, usize>,
    pub elapsed_secs: f64,
}

impl RunStats {
    fn record(&mut self, grade: &Grade) {
        self.graded += 1;
        if !grade.matched {
            self.unmatched += 1;
        }
        *self.per_category.entry(grade.category).or_default() += 1;
    }

    pub fn count(&self, category: Category) -> usize {
        self.per_category.get(&category).copied().unwrap_or(0)
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Graded {}/{} files ({} failed, {} unmatched) in {:.1}s:",
            self.graded, self.files_seen, self.failed, self.unmatched, self.elapsed_secs
        )?;
        for cat in Category::ALL {
            write!(f, " {cat}={}", self.count(cat))?;
        }
        Ok(())
    }
}

/// Run a full grading pass over `config.input_dir`.
///
/// The output root is created even when there is nothing to grade. Up to
/// `config.concurrency` files are in flight; each file is read, graded and
/// placed as one unit. Per-file failures follow `config.on_error`.
///
/// Under [`FailurePolicy::Abort`] the first failure returns at once and the
/// other in-flight files are dropped mid-way. With `concurrency > 1` one of
/// them may be left with its copy written but not its sidecar.
pub async fn run_pipeline(config: &GradeConfig, grader: &Grader) -> anyhow::Result<RunStats> {
    let start = Instant::now();
    let tree = OutputTree::new(config.output_dir.clone(), config.labels.clone());
    tree.ensure_root().await.context("creating output directory")?;

    info!(
        input = %config.input_dir.display(),
        output = %config.output_dir.display(),
        suffix = %config.suffix,
        model = %grader.model(),
        concurrency = config.concurrency,
        "starting grading run"
    );

    let tree = &tree;
    let mut results = futures::stream::iter(source_files(&config.input_dir, &config.suffix))
        .map(move |path| async move {
            let result = grade_file(grader, tree, &path).await;
            (path, result)
        })
        .buffer_unordered(config.concurrency);

    let mut stats = RunStats::default();
    while let Some((path, result)) = results.next().await {
        stats.files_seen += 1;
        match result {
            Ok(grade) => {
                println!(
                    "Category: {} ({})",
                    config.labels.label(grade.category),
                    path.display()
                );
                stats.record(&grade);
            }
            Err(err) => match config.on_error {
                FailurePolicy::Skip => {
                    error!(path = %path.display(), error = %format!("{err:#}"), "skipping file");
                    stats.failed += 1;
                }
                FailurePolicy::Abort => return Err(err),
            },
        }
    }

    stats.elapsed_secs = start.elapsed().as_secs_f64();
    println!("{COMPLETION_MESSAGE}");
    println!("{stats}");
    info!(
        graded = stats.graded,
        failed = stats.failed,
        elapsed_secs = stats.elapsed_secs,
        "grading run complete"
    );
    Ok(stats)
}

async fn grade_file(grader: &Grader, tree: &OutputTree, path: &Path) -> anyhow::Result<Grade> {
    let code = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    let grade = grader
        .grade(&code)
        .await
        .with_context(|| format!("grading {}", path.display()))?;
    tree.place(path, &grade).await?;
    Ok(grade)
}
