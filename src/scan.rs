//! Study tree discovery.
//!
//! Finds the notes of one series and decides, for each, the name its slug and
//! order are derived from. Nothing is read or written here beyond directory
//! listings.
//!
//! ## Directory Structure
//!
//! ```text
//! study/                                 # Source root
//! ├── cpp-mastery/                       # Fixed-directory series
//! │   ├── part1-basics/                  # Listed in `dirs`
//! │   │   ├── README.md                  # Ignored
//! │   │   ├── 01-hello.md                # → cpp-mastery-01-hello (order 1)
//! │   │   └── 02-types.md                # → cpp-mastery-02-types (order 2)
//! │   └── part2-oop/
//! │       └── 01-classes.md              # → cpp-mastery-01-classes (order 1)
//! └── rabbitmq-mastery/                  # Scan-mode series
//!     └── docs/
//!         ├── 01-intro/
//!         │   └── intro.md               # → rabbitmq-mastery-01-intro (order 1)
//!         ├── 02-setup/
//!         │   └── README.md              # → rabbitmq-mastery-02-setup (order 2)
//!         ├── 03-patterns/
//!         │   ├── direct.md              # → rabbitmq-mastery-03-patterns
//!         │   └── topic.md               # → rabbitmq-mastery-03-patterns-topic
//!         └── 04-empty/                  # No notes: skipped
//! ```
//!
//! ## Rules
//!
//! - **Fixed mode**: configured subdirectories in configured order; a missing
//!   one is skipped. Inside each, every `.md` file except `README.md`, sorted
//!   by filename. Order and slug come from the note's own filename.
//! - **Scan mode**: every subdirectory of `docs/`, sorted by name. A chapter
//!   uses its non-README notes, or its `README.md` when it has no others.
//!   Order and slug come from the directory name.
//! - **Scan-mode chapters with several notes**: the first note (by filename)
//!   keeps the chapter slug; the others append their own stem so no two notes
//!   share an output file.
//! - Only entries whose name can matter are resolved. Symlinks are followed;
//!   a dangling one is ignored.

use crate::config::{SeriesConfig, Traversal};
use crate::naming;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Subdirectory of a scan-mode series holding its chapters.
pub const DOCS_DIR: &str = "docs";

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}

/// A note chosen for import, with its naming already decided.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Discovered {
    pub path: PathBuf,
    /// Filename of the note itself (used for the title fallback).
    pub filename: String,
    pub slug: String,
    pub order: u32,
}

/// A directory that contributed no notes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Skipped {
    pub path: PathBuf,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// A fixed-mode directory listed in config does not exist.
    MissingDir,
    /// A scan-mode chapter has neither notes nor a `README.md`.
    EmptyChapter,
}

/// Everything found under one series root.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct SeriesScan {
    pub notes: Vec<Discovered>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<Skipped>,
}

/// Discover the notes of `series` under its existing root directory.
pub fn scan_series(series_root: &Path, series: &SeriesConfig) -> Result<SeriesScan, ScanError> {
    match series.traversal() {
        Traversal::Fixed(dirs) => scan_fixed(series_root, &series.key, dirs),
        Traversal::ScanDocs => scan_docs(&series_root.join(DOCS_DIR), &series.key),
    }
}

fn scan_fixed(series_root: &Path, key: &str, dirs: &[String]) -> Result<SeriesScan, ScanError> {
    let mut scan = SeriesScan::default();

    for dir in dirs {
        let dir_path = series_root.join(dir);
        if !dir_path.is_dir() {
            scan.skipped.push(Skipped {
                path: dir_path,
                reason: SkipReason::MissingDir,
            });
            continue;
        }

        for (path, filename) in collect_files(&dir_path, naming::is_note)? {
            scan.notes.push(Discovered {
                slug: naming::file_slug(key, &filename),
                order: naming::derive_order(&filename),
                path,
                filename,
            });
        }
    }

    Ok(scan)
}

fn scan_docs(docs_root: &Path, key: &str) -> Result<SeriesScan, ScanError> {
    let mut scan = SeriesScan::default();
    if !docs_root.is_dir() {
        return Ok(scan);
    }

    for (chapter, dir_name) in collect_subdirs(docs_root)? {
        let candidates = collect_files(&chapter, |name| {
            naming::is_note(name) || naming::is_readme(name)
        })?;
        let (mut notes, readmes): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .partition(|(_, name)| naming::is_note(name));
        if notes.is_empty() {
            notes = readmes;
        }
        if notes.is_empty() {
            scan.skipped.push(Skipped {
                path: chapter,
                reason: SkipReason::EmptyChapter,
            });
            continue;
        }

        let chapter_slug = naming::dir_slug(key, &dir_name);
        let order = naming::derive_order(&dir_name);
        for (i, (path, filename)) in notes.into_iter().enumerate() {
            let slug = if i == 0 {
                chapter_slug.clone()
            } else {
                naming::file_slug(&chapter_slug, &filename)
            };
            scan.notes.push(Discovered {
                path,
                filename,
                slug,
                order,
            });
        }
    }

    Ok(scan)
}

/// Regular files directly inside `dir` whose name passes `wanted`, sorted by
/// filename.
fn collect_files(
    dir: &Path,
    wanted: impl Fn(&str) -> bool,
) -> Result<Vec<(PathBuf, String)>, ScanError> {
    collect_entries(dir, wanted, fs::Metadata::is_file)
}

/// Subdirectories directly inside `dir`, sorted by name.
fn collect_subdirs(dir: &Path) -> Result<Vec<(PathBuf, String)>, ScanError> {
    collect_entries(dir, |_| true, fs::Metadata::is_dir)
}

/// List `dir` one level deep. Only entries whose name passes `wanted` are
/// resolved; symlinks are followed and dangling ones left out.
fn collect_entries(
    dir: &Path,
    wanted: impl Fn(&str) -> bool,
    keep: impl Fn(&fs::Metadata) -> bool,
) -> Result<Vec<(PathBuf, String)>, ScanError> {
    let mut entries = Vec::new();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();
    for entry in walker {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !wanted(&name) {
            continue;
        }
        let metadata = match fs::metadata(entry.path()) {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == io::ErrorKind::NotFound => continue,
            Err(err) => return Err(err.into()),
        };
        if keep(&metadata) {
            entries.push((entry.into_path(), name));
        }
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixed(key: &str, dirs: &[&str]) -> SeriesConfig {
        SeriesConfig {
            key: key.into(),
            name: key.into(),
            category: key.into(),
            tags: vec![],
            dirs: dirs.iter().map(|d| d.to_string()).collect(),
            scan_docs: false,
        }
    }

    fn scanned(key: &str) -> SeriesConfig {
        SeriesConfig {
            dirs: vec![],
            scan_docs: true,
            ..fixed(key, &[])
        }
    }

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "# note\n").unwrap();
    }

    fn slugs(scan: &SeriesScan) -> Vec<&str> {
        scan.notes.iter().map(|n| n.slug.as_str()).collect()
    }

    // =========================================================================
    // Fixed mode
    // =========================================================================

    #[test]
    fn fixed_lists_notes_in_dir_then_name_order() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "part2/01-classes.md");
        touch(tmp.path(), "part1/02-types.md");
        touch(tmp.path(), "part1/01-hello.md");

        let scan = scan_series(tmp.path(), &fixed("cpp", &["part1", "part2"])).unwrap();
        assert_eq!(slugs(&scan), vec!["cpp-01-hello", "cpp-02-types", "cpp-01-classes"]);
        let orders: Vec<u32> = scan.notes.iter().map(|n| n.order).collect();
        assert_eq!(orders, vec![1, 2, 1]);
    }

    #[test]
    fn fixed_follows_configured_dir_order() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "b/x.md");
        touch(tmp.path(), "a/y.md");

        let scan = scan_series(tmp.path(), &fixed("s", &["b", "a"])).unwrap();
        assert_eq!(slugs(&scan), vec!["s-x", "s-y"]);
    }

    #[test]
    fn fixed_skips_readme_and_other_files() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "part1/README.md");
        touch(tmp.path(), "part1/notes.txt");
        touch(tmp.path(), "part1/01-intro.md");
        fs::create_dir_all(tmp.path().join("part1/images.md")).unwrap();

        let scan = scan_series(tmp.path(), &fixed("demo", &["part1"])).unwrap();
        assert_eq!(slugs(&scan), vec!["demo-01-intro"]);
        assert_eq!(scan.notes[0].filename, "01-intro.md");
    }

    #[test]
    fn fixed_does_not_descend_into_subdirs() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "part1/01-intro.md");
        touch(tmp.path(), "part1/extra/02-deep.md");

        let scan = scan_series(tmp.path(), &fixed("demo", &["part1"])).unwrap();
        assert_eq!(slugs(&scan), vec!["demo-01-intro"]);
    }

    #[test]
    fn fixed_missing_dir_is_skipped() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "part1/01-intro.md");

        let scan = scan_series(tmp.path(), &fixed("demo", &["part1", "part9"])).unwrap();
        assert_eq!(scan.notes.len(), 1);
        assert_eq!(
            scan.skipped,
            vec![Skipped {
                path: tmp.path().join("part9"),
                reason: SkipReason::MissingDir,
            }]
        );
    }

    #[cfg(unix)]
    #[test]
    fn fixed_ignores_dangling_symlinks() {
        use std::os::unix::fs::symlink;

        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "part1/01-intro.md");
        symlink(tmp.path().join("gone/diagram.png"), tmp.path().join("part1/diagram.png")).unwrap();
        symlink(tmp.path().join("gone/03-old.md"), tmp.path().join("part1/03-old.md")).unwrap();

        let scan = scan_series(tmp.path(), &fixed("demo", &["part1"])).unwrap();
        assert_eq!(slugs(&scan), vec!["demo-01-intro"]);
    }

    #[cfg(unix)]
    #[test]
    fn fixed_follows_symlinked_note() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "shared/02-linked.md");
        touch(tmp.path(), "part1/01-intro.md");
        std::os::unix::fs::symlink(
            tmp.path().join("shared/02-linked.md"),
            tmp.path().join("part1/02-linked.md"),
        )
        .unwrap();

        let scan = scan_series(tmp.path(), &fixed("demo", &["part1"])).unwrap();
        assert_eq!(slugs(&scan), vec!["demo-01-intro", "demo-02-linked"]);
    }

    #[test]
    fn fixed_nested_dir_path() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "docs/part1-basics/01-requests.md");

        let scan = scan_series(tmp.path(), &fixed("py", &["docs/part1-basics"])).unwrap();
        assert_eq!(slugs(&scan), vec!["py-01-requests"]);
    }

    // =========================================================================
    // Scan mode
    // =========================================================================

    #[test]
    fn scan_uses_directory_for_slug_and_order() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "docs/01-intro/intro.md");
        touch(tmp.path(), "docs/01-intro/README.md");

        let scan = scan_series(tmp.path(), &scanned("mq")).unwrap();
        assert_eq!(slugs(&scan), vec!["mq-01-intro"]);
        assert_eq!(scan.notes[0].order, 1);
        assert_eq!(scan.notes[0].filename, "intro.md");
    }

    #[test]
    fn scan_falls_back_to_readme() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "docs/02-setup/README.md");

        let scan = scan_series(tmp.path(), &scanned("mq")).unwrap();
        assert_eq!(slugs(&scan), vec!["mq-02-setup"]);
        assert_eq!(scan.notes[0].order, 2);
        assert_eq!(scan.notes[0].filename, "README.md");
    }

    #[test]
    fn scan_skips_empty_chapter() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "docs/01-intro/intro.md");
        touch(tmp.path(), "docs/03-empty/diagram.png");

        let scan = scan_series(tmp.path(), &scanned("mq")).unwrap();
        assert_eq!(slugs(&scan), vec!["mq-01-intro"]);
        assert_eq!(scan.skipped.len(), 1);
        assert_eq!(scan.skipped[0].reason, SkipReason::EmptyChapter);
        assert!(scan.skipped[0].path.ends_with("03-empty"));
    }

    #[test]
    fn scan_disambiguates_multiple_notes() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "docs/03-patterns/topic.md");
        touch(tmp.path(), "docs/03-patterns/direct.md");

        let scan = scan_series(tmp.path(), &scanned("mq")).unwrap();
        assert_eq!(
            slugs(&scan),
            vec!["mq-03-patterns", "mq-03-patterns-topic"]
        );
        assert!(scan.notes.iter().all(|n| n.order == 3));
    }

    #[test]
    fn scan_chapters_sorted_by_name() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "docs/10-last/a.md");
        touch(tmp.path(), "docs/02-second/a.md");
        touch(tmp.path(), "docs/01-first/a.md");

        let scan = scan_series(tmp.path(), &scanned("mq")).unwrap();
        assert_eq!(
            slugs(&scan),
            vec!["mq-01-first", "mq-02-second", "mq-10-last"]
        );
    }

    #[test]
    fn scan_ignores_loose_files_in_docs() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "docs/index.md");
        touch(tmp.path(), "docs/01-intro/a.md");

        let scan = scan_series(tmp.path(), &scanned("mq")).unwrap();
        assert_eq!(slugs(&scan), vec!["mq-01-intro"]);
    }

    #[test]
    fn scan_without_docs_dir_is_empty() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "notes/01-a.md");

        let scan = scan_series(tmp.path(), &scanned("mq")).unwrap();
        assert_eq!(scan, SeriesScan::default());
    }

    #[test]
    fn scan_unnumbered_chapter_has_order_zero() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "docs/appendix/a.md");

        let scan = scan_series(tmp.path(), &scanned("mq")).unwrap();
        assert_eq!(scan.notes[0].order, 0);
        assert_eq!(scan.notes[0].slug, "mq-appendix");
    }

    #[cfg(unix)]
    #[test]
    fn scan_ignores_dangling_chapter_link() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "docs/01-intro/a.md");
        std::os::unix::fs::symlink(tmp.path().join("gone"), tmp.path().join("docs/02-moved"))
            .unwrap();

        let scan = scan_series(tmp.path(), &scanned("mq")).unwrap();
        assert_eq!(slugs(&scan), vec!["mq-01-intro"]);
        assert!(scan.skipped.is_empty());
    }
}
