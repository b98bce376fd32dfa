//! The migration transform: study notes in, content-collection articles out.
//!
//! Runs in two steps so nothing is written until the whole import is known
//! to be consistent:
//!
//! ```text
//! plan    registry + source tree  →  ImportPlan      (read + derive)
//! write   ImportPlan              →  dest/<slug>.md  (frontmatter + body)
//! ```
//!
//! [`run`] does both, with a slug collision check in between. Two notes that
//! would land on the same output file fail the import with
//! [`ImportError::DuplicateSlug`] before the destination is touched.
//!
//! ## Recovered Conditions
//!
//! - Series root missing → series reported as skipped, zero articles.
//! - Listed fixed-mode directory missing → skipped.
//! - Scan-mode chapter without notes → skipped.
//! - Dangling symlink in a listed directory → ignored.
//! - Note that is not valid UTF-8 → imported with replacement characters.
//!
//! Any other I/O failure aborts the import. Files already written by an
//! aborted [`write`] stay in place.
//!
//! Everything runs on the calling thread, one series, directory and file at
//! a time. Progress is reported through an `FnMut(&ImportEvent)` callback.

use crate::config::{ImportConfig, SeriesConfig};
use crate::frontmatter::Frontmatter;
use crate::metadata::{Extractor, HeuristicExtractor};
use crate::scan::{self, Discovered, ScanError, Skipped};
use crate::types::{ArticleRecord, SourceDocument};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
    #[error(
        "Duplicate slug {slug}: {} and {} map to the same file",
        .first.display(),
        .second.display()
    )]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
}

/// Per-run settings that are not part of the registry.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Written to every article's `pubDate`.
    pub pub_date: NaiveDate,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            pub_date: Utc::now().date_naive(),
        }
    }
}

/// Progress notifications emitted by [`write`].
#[derive(Debug, Clone, PartialEq)]
pub enum ImportEvent {
    SeriesStarted { key: String, name: String },
    /// The series root directory does not exist.
    SeriesSkipped { key: String, path: PathBuf },
    ArticleWritten { slug: String, path: PathBuf },
    SeriesFinished { key: String, count: usize },
}

// ============================================================================
// Plan
// ============================================================================

/// Everything an import would write, derived without touching the destination.
#[derive(Debug, Clone, Serialize)]
pub struct ImportPlan {
    pub series: Vec<SeriesPlan>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesPlan {
    pub key: String,
    pub name: String,
    pub status: SeriesStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SeriesStatus {
    /// Series root directory absent; nothing to import.
    Missing { path: PathBuf },
    Planned {
        articles: Vec<ArticleRecord>,
        skipped: Vec<Skipped>,
    },
}

impl SeriesPlan {
    pub fn articles(&self) -> &[ArticleRecord] {
        match &self.status {
            SeriesStatus::Missing { .. } => &[],
            SeriesStatus::Planned { articles, .. } => articles,
        }
    }
}

impl ImportPlan {
    /// All planned articles in write order.
    pub fn articles(&self) -> impl Iterator<Item = &ArticleRecord> {
        self.series.iter().flat_map(|s| s.articles())
    }

    pub fn article_count(&self) -> usize {
        self.articles().count()
    }

    /// Fail on the first slug claimed by two different notes.
    pub fn check_collisions(&self) -> Result<(), ImportError> {
        let mut seen: HashMap<&str, &Path> = HashMap::new();
        for article in self.articles() {
            if let Some(first) = seen.insert(&article.slug, &article.source) {
                return Err(ImportError::DuplicateSlug {
                    slug: article.slug.clone(),
                    first: first.to_path_buf(),
                    second: article.source.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Discover and derive every article with the stock line heuristics.
pub fn plan(
    config: &ImportConfig,
    source_root: &Path,
    options: &ImportOptions,
) -> Result<ImportPlan, ImportError> {
    let extractor = HeuristicExtractor::new(config.fallback_description.as_str());
    plan_with_extractor(config, source_root, options, &extractor)
}

/// Discover and derive every article using a custom [`Extractor`].
pub fn plan_with_extractor(
    config: &ImportConfig,
    source_root: &Path,
    options: &ImportOptions,
    extractor: &dyn Extractor,
) -> Result<ImportPlan, ImportError> {
    let mut series_plans = Vec::with_capacity(config.series.len());

    for series in &config.series {
        let series_root = source_root.join(&series.key);
        let status = if series_root.is_dir() {
            let found = scan::scan_series(&series_root, series)?;
            let mut articles = Vec::with_capacity(found.notes.len());
            for note in found.notes {
                let document = read_document(&note.path)?;
                articles.push(build_article(series, note, document, extractor, options));
            }
            SeriesStatus::Planned {
                articles,
                skipped: found.skipped,
            }
        } else {
            SeriesStatus::Missing { path: series_root }
        };

        series_plans.push(SeriesPlan {
            key: series.key.clone(),
            name: series.name.clone(),
            status,
        });
    }

    Ok(ImportPlan {
        series: series_plans,
    })
}

/// Bytes that are not valid UTF-8 (e.g. a GBK-encoded note) decode to U+FFFD.
fn read_document(path: &Path) -> Result<SourceDocument, ImportError> {
    let bytes = fs::read(path)?;
    Ok(SourceDocument {
        path: path.to_path_buf(),
        content: String::from_utf8_lossy(&bytes).into_owned(),
    })
}

fn build_article(
    series: &SeriesConfig,
    note: Discovered,
    document: SourceDocument,
    extractor: &dyn Extractor,
    options: &ImportOptions,
) -> ArticleRecord {
    let content = &document.content;
    let title = extractor.title(content, &note.filename);
    let frontmatter = Frontmatter {
        title: title.clone(),
        description: extractor.description(content),
        pub_date: options.pub_date,
        tags: series.tags.clone(),
        category: series.category.clone(),
        series: series.name.clone(),
        order: note.order,
    };

    ArticleRecord {
        slug: note.slug,
        title,
        order: note.order,
        frontmatter,
        body: extractor.body(content).to_string(),
        source: document.path,
    }
}

// ============================================================================
// Write
// ============================================================================

/// Article counts per series, in registry order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub series: Vec<SeriesCount>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesCount {
    pub key: String,
    pub name: String,
    pub count: usize,
    /// True when the series root was missing.
    pub skipped: bool,
}

impl ImportSummary {
    /// Articles written for `key`, or `None` for a key not in the registry.
    pub fn count(&self, key: &str) -> Option<usize> {
        self.series.iter().find(|s| s.key == key).map(|s| s.count)
    }

    pub fn total(&self) -> usize {
        self.series.iter().map(|s| s.count).sum()
    }

    /// Series whose root directory was missing.
    pub fn skipped(&self) -> impl Iterator<Item = &SeriesCount> {
        self.series.iter().filter(|s| s.skipped)
    }
}

/// Write every planned article into `dest_root`, creating it if needed.
///
/// Existing files with the same name are overwritten.
pub fn write(
    plan: &ImportPlan,
    dest_root: &Path,
    mut on_event: impl FnMut(&ImportEvent),
) -> Result<ImportSummary, ImportError> {
    fs::create_dir_all(dest_root)?;
    let mut summary = ImportSummary::default();

    for series in &plan.series {
        on_event(&ImportEvent::SeriesStarted {
            key: series.key.clone(),
            name: series.name.clone(),
        });

        let skipped = match &series.status {
            SeriesStatus::Missing { path } => {
                on_event(&ImportEvent::SeriesSkipped {
                    key: series.key.clone(),
                    path: path.clone(),
                });
                true
            }
            SeriesStatus::Planned { articles, .. } => {
                for article in articles {
                    let path = dest_root.join(article.file_name());
                    fs::write(&path, article.render())?;
                    on_event(&ImportEvent::ArticleWritten {
                        slug: article.slug.clone(),
                        path,
                    });
                }
                false
            }
        };

        let count = series.articles().len();
        on_event(&ImportEvent::SeriesFinished {
            key: series.key.clone(),
            count,
        });
        summary.series.push(SeriesCount {
            key: series.key.clone(),
            name: series.name.clone(),
            count,
            skipped,
        });
    }

    Ok(summary)
}

/// Plan, check for slug collisions, then write.
pub fn run(
    config: &ImportConfig,
    source_root: &Path,
    dest_root: &Path,
    options: &ImportOptions,
    on_event: impl FnMut(&ImportEvent),
) -> Result<ImportSummary, ImportError> {
    let plan = plan(config, source_root, options)?;
    plan.check_collisions()?;
    write(&plan, dest_root, on_event)
}
