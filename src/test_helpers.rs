//! Shared test utilities for the study-import test suite.
//!
//! Provides fixture setup, small registry builders, and readers that parse
//! written articles back into frontmatter + body.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let plan = plan(&fixture_config(), &tmp.path().join("study"), &fixed_options()).unwrap();
//!
//! let demo = find_series(&plan, "demo");
//! assert_eq!(demo.articles().len(), 3);
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::{self, ImportConfig, SeriesConfig};
use crate::import::{ImportOptions, ImportPlan, SeriesPlan};
use chrono::NaiveDate;

// =========================================================================
// Fixture setup
// =========================================================================

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Copy `fixtures/study/` to `<tmp>/study` and return the temp dir.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    copy_dir_recursive(&fixtures_dir().join("study"), &tmp.path().join("study")).unwrap();
    tmp
}

/// The registry describing `fixtures/study/`.
pub fn fixture_config() -> ImportConfig {
    config::load_config(&fixtures_dir().join("import.toml")).unwrap()
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write a note at `root/rel`, creating parent directories.
pub fn write_note(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Every file under `root`, keyed by path relative to `root`.
pub fn read_tree(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    let mut files = BTreeMap::new();
    for entry in walkdir::WalkDir::new(root) {
        let entry = entry.unwrap();
        if entry.file_type().is_file() {
            let rel = entry.path().strip_prefix(root).unwrap().to_path_buf();
            files.insert(rel, fs::read(entry.path()).unwrap());
        }
    }
    files
}

// =========================================================================
// Registry builders
// =========================================================================

/// Fixed-mode series whose name and category equal its key, tagged `x`.
pub fn fixed_series(key: &str, dirs: &[&str]) -> SeriesConfig {
    SeriesConfig {
        key: key.to_string(),
        name: key.to_string(),
        category: key.to_string(),
        tags: vec!["x".to_string()],
        dirs: dirs.iter().map(|d| d.to_string()).collect(),
        scan_docs: false,
    }
}

/// Scan-mode series whose name and category equal its key, tagged `x`.
pub fn scan_series_config(key: &str) -> SeriesConfig {
    SeriesConfig {
        dirs: vec![],
        scan_docs: true,
        ..fixed_series(key, &[])
    }
}

/// Stock config with the registry replaced by `series`.
pub fn registry(series: Vec<SeriesConfig>) -> ImportConfig {
    ImportConfig {
        series,
        ..ImportConfig::default()
    }
}

/// Options pinned to 2026-10-19 so output is reproducible.
pub fn fixed_options() -> ImportOptions {
    ImportOptions {
        pub_date: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
    }
}

// =========================================================================
// Lookups and readers
// =========================================================================

/// Find a series plan by key. Panics if not found.
pub fn find_series<'a>(plan: &'a ImportPlan, key: &str) -> &'a SeriesPlan {
    plan.series.iter().find(|s| s.key == key).unwrap_or_else(|| {
        let keys: Vec<&str> = plan.series.iter().map(|s| s.key.as_str()).collect();
        panic!("series '{key}' not found. Available: {keys:?}")
    })
}

/// Read `<dest>/<slug>.md` and split it into parsed frontmatter and body.
pub fn read_article(dest: &Path, slug: &str) -> (BTreeMap<String, serde_yaml::Value>, String) {
    let path = dest.join(format!("{slug}.md"));
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()));
    let rest = content
        .strip_prefix("---\n")
        .unwrap_or_else(|| panic!("{slug}.md does not start with a frontmatter fence"));
    let (block, body) = rest
        .split_once("---\n\n")
        .unwrap_or_else(|| panic!("{slug}.md frontmatter is not closed"));
    (serde_yaml::from_str(block).unwrap(), body.to_string())
}

/// String items of a YAML sequence.
pub fn yaml_strings(value: &serde_yaml::Value) -> Vec<&str> {
    value
        .as_sequence()
        .expect("expected a YAML sequence")
        .iter()
        .map(|v| v.as_str().expect("expected a string item"))
        .collect()
}
