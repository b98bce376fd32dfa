//! CLI output formatting.
//!
//! Every function here is pure: `format_*` returns display lines and the
//! `print_*` wrappers write them out. Progress goes to stdout, warnings to
//! stderr.
//!
//! # Output Format
//!
//! ## Import
//!
//! ```text
//! ==> C++ 从入门到精通 (cpp-mastery)
//!     cpp-mastery-01-hello.md
//!     cpp-mastery-02-types.md
//!     2 articles
//! ==> RabbitMQ 消息队列 (rabbitmq-mastery)
//! warning: rabbitmq-mastery: source directory not found: /study/rabbitmq-mastery
//!     0 articles
//!
//! Imported 2 articles from 2 series
//!     Skipped: RabbitMQ 消息队列 (rabbitmq-mastery), source directory not found
//! ```
//!
//! ## Check
//!
//! ```text
//! C++ 从入门到精通 (cpp-mastery)
//!     001 Hello, C++ [order 1]
//!         Source: cpp-mastery/part1-basics/01-hello.md
//!         Output: cpp-mastery-01-hello.md
//!     Skipped: cpp-mastery/part9-engineering (missing directory)
//! RabbitMQ 消息队列 (rabbitmq-mastery)
//!     Source directory not found
//!
//! 1 article from 2 series
//! ```

use crate::import::{ImportEvent, ImportPlan, ImportSummary, SeriesStatus};
use crate::scan::SkipReason;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Show `path` relative to `root` when it lives under it.
fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

// ============================================================================
// Import progress
// ============================================================================

/// Whether an event is a warning (printed to stderr).
pub fn is_warning(event: &ImportEvent) -> bool {
    matches!(event, ImportEvent::SeriesSkipped { .. })
}

/// Format a single import progress event as display lines.
pub fn format_event(event: &ImportEvent) -> Vec<String> {
    match event {
        ImportEvent::SeriesStarted { key, name } => vec![format!("==> {name} ({key})")],
        ImportEvent::SeriesSkipped { key, path } => vec![format!(
            "warning: {key}: source directory not found: {}",
            path.display()
        )],
        ImportEvent::ArticleWritten { slug, .. } => vec![format!("{}{slug}.md", indent(1))],
        ImportEvent::SeriesFinished { count, .. } => {
            vec![format!("{}{}", indent(1), plural(*count, "article"))]
        }
    }
}

/// Print an import event, sending warnings to stderr.
pub fn print_event(event: &ImportEvent) {
    let warning = is_warning(event);
    for line in format_event(event) {
        if warning {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}

/// Format the closing totals of an import.
pub fn format_summary(summary: &ImportSummary) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        format!(
            "Imported {} from {} series",
            plural(summary.total(), "article"),
            summary.series.len()
        ),
    ];
    for series in summary.skipped() {
        lines.push(format!(
            "{}Skipped: {} ({}), source directory not found",
            indent(1),
            series.name,
            series.key
        ));
    }
    lines
}

/// Print the closing totals of an import.
pub fn print_summary(summary: &ImportSummary) {
    for line in format_summary(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Check (dry run)
// ============================================================================

/// Format the inventory of a plan without writing anything.
///
/// Source paths are shown relative to `source_root`.
pub fn format_plan(plan: &ImportPlan, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    for series in &plan.series {
        lines.push(format!("{} ({})", series.name, series.key));
        match &series.status {
            SeriesStatus::Missing { .. } => {
                lines.push(format!("{}Source directory not found", indent(1)));
            }
            SeriesStatus::Planned { articles, skipped } => {
                for (i, article) in articles.iter().enumerate() {
                    lines.push(format!(
                        "{}{} {} [order {}]",
                        indent(1),
                        format_index(i + 1),
                        article.title,
                        article.order
                    ));
                    lines.push(format!(
                        "{}Source: {}",
                        indent(2),
                        display_path(&article.source, source_root)
                    ));
                    lines.push(format!("{}Output: {}", indent(2), article.file_name()));
                }
                for skip in skipped {
                    let reason = match skip.reason {
                        SkipReason::MissingDir => "missing directory",
                        SkipReason::EmptyChapter => "no notes",
                    };
                    lines.push(format!(
                        "{}Skipped: {} ({reason})",
                        indent(1),
                        display_path(&skip.path, source_root)
                    ));
                }
            }
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "{} from {} series",
        plural(plan.article_count(), "article"),
        plan.series.len()
    ));
    lines
}

/// Print the inventory of a plan to stdout.
pub fn print_plan(plan: &ImportPlan, source_root: &Path) {
    for line in format_plan(plan, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
