//! Import configuration: roots, fallback text and the series registry.
//!
//! The registry tells the importer which series exist and where each keeps
//! its notes. It is loaded from `import.toml`, or taken from the stock
//! defaults when no file is present.
//!
//! ## Config File
//!
//! ```toml
//! source_root = "/root/workspace/study"
//! dest_root = "/root/workspace/Blog/astro-blog/src/content/blog"
//! fallback_description = "技术学习笔记"
//!
//! # Fixed-directory series: listed subdirectories, in order.
//! [[series]]
//! key = "cpp-mastery"
//! name = "C++ 从入门到精通"
//! category = "cpp"
//! tags = ["cpp", "programming"]
//! dirs = ["part1-basics", "part2-oop"]
//!
//! # Scan-mode series: every subdirectory of `docs/` is one chapter.
//! [[series]]
//! key = "rabbitmq-mastery"
//! name = "RabbitMQ 消息队列"
//! category = "rabbitmq"
//! tags = ["rabbitmq", "mq", "backend"]
//! scan_docs = true
//! ```
//!
//! Top-level keys are optional. A `[[series]]` list replaces the stock
//! registry as a whole; series are never merged one by one. Unknown keys are
//! rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Config file picked up from the working directory when `--config` is absent.
pub const CONFIG_FILE: &str = "import.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Top-level import settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportConfig {
    /// Directory holding one subdirectory per series key.
    pub source_root: PathBuf,
    /// Content collection directory the articles are written to.
    pub dest_root: PathBuf,
    /// Description used when a note has no prose line to borrow.
    pub fallback_description: String,
    /// Series to import, in processing order.
    pub series: Vec<SeriesConfig>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("/root/workspace/study"),
            dest_root: PathBuf::from("/root/workspace/Blog/astro-blog/src/content/blog"),
            fallback_description: "技术学习笔记".to_string(),
            series: stock_series(),
        }
    }
}

/// One named series of study notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeriesConfig {
    /// Directory name under the source root; also the slug prefix.
    pub key: String,
    /// Display name written to the `series` frontmatter field.
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Fixed-directory mode: subdirectories of the series root, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dirs: Vec<String>,
    /// Scan mode: treat every subdirectory of `docs/` as a chapter.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub scan_docs: bool,
}

/// How a series' notes are discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal<'a> {
    /// Walk the listed subdirectories; each note is its own article.
    Fixed(&'a [String]),
    /// Walk every subdirectory of `docs/`; each directory is one article.
    ScanDocs,
}

impl SeriesConfig {
    pub fn traversal(&self) -> Traversal<'_> {
        if self.scan_docs {
            Traversal::ScanDocs
        } else {
            Traversal::Fixed(&self.dirs)
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let key = &self.key;
        if key.is_empty() || key == "." || key == ".." || key.contains(['/', '\\']) {
            return Err(ConfigError::Validation(format!(
                "series key {key:?} must be a plain directory name"
            )));
        }
        if self.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "series {key}: name must not be empty"
            )));
        }
        match (self.scan_docs, self.dirs.is_empty()) {
            (true, false) => {
                return Err(ConfigError::Validation(format!(
                    "series {key}: set either dirs or scan_docs, not both"
                )));
            }
            (false, true) => {
                return Err(ConfigError::Validation(format!(
                    "series {key}: one of dirs or scan_docs is required"
                )));
            }
            _ => {}
        }
        for dir in &self.dirs {
            if !is_plain_relative(dir) {
                return Err(ConfigError::Validation(format!(
                    "series {key}: dir {dir:?} must be a relative path inside the series"
                )));
            }
        }
        Ok(())
    }
}

impl ImportConfig {
    /// Validate the registry: keys unique and well-formed, one traversal per series.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for series in &self.series {
            series.validate()?;
            if !seen.insert(series.key.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate series key {:?}",
                    series.key
                )));
            }
        }
        Ok(())
    }
}

fn is_plain_relative(dir: &str) -> bool {
    let path = Path::new(dir);
    !dir.is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

fn series(key: &str, name: &str, category: &str, tags: &[&str], dirs: &[&str]) -> SeriesConfig {
    SeriesConfig {
        key: key.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        dirs: dirs.iter().map(|d| d.to_string()).collect(),
        scan_docs: dirs.is_empty(),
    }
}

/// The registry the notes were originally organised around.
pub fn stock_series() -> Vec<SeriesConfig> {
    vec![
        series(
            "cpp-mastery",
            "C++ 从入门到精通",
            "cpp",
            &["cpp", "programming"],
            &[
                "part1-basics",
                "part2-oop",
                "part3-memory",
                "part4-stl",
                "part5-modern",
                "part6-concurrency",
                "part7-network",
                "part8-system",
                "part9-engineering",
                "part10-projects",
            ],
        ),
        series(
            "python-crawler-mastery",
            "Python 爬虫实战",
            "python",
            &["python", "crawler", "scraping"],
            &[
                "docs/part1-basics",
                "docs/part2-parsing",
                "docs/part3-dynamic",
                "docs/part4-anti",
                "docs/part5-storage",
                "docs/part6-framework",
                "docs/part7-advanced",
            ],
        ),
        series(
            "rabbitmq-mastery",
            "RabbitMQ 消息队列",
            "rabbitmq",
            &["rabbitmq", "mq", "backend"],
            &[],
        ),
        series(
            "reddit-mastery",
            "Reddit API 开发",
            "reddit",
            &["reddit", "api", "python"],
            &["docs/part1-basics", "docs/part2-advanced", "docs/part3-practice"],
        ),
        series(
            "webrtc-blog",
            "WebRTC 音视频开发",
            "webrtc",
            &["webrtc", "audio", "video"],
            &[
                "part1-basics",
                "part2-signaling",
                "part3-media",
                "part4-codec",
                "part5-practice",
                "part6-advanced",
            ],
        ),
    ]
}

// =============================================================================
// Config loading
// =============================================================================

/// Parse and validate config text.
pub fn parse_config(content: &str) -> Result<ImportConfig, ConfigError> {
    let config: ImportConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load config from an explicit file path. The file must exist.
pub fn load_config(path: &Path) -> Result<ImportConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Load `import.toml` from `dir`, or the stock config if there is none.
pub fn load_config_in(dir: &Path) -> Result<ImportConfig, ConfigError> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(ImportConfig::default());
    }
    load_config(&path)
}

/// Returns a fully-commented stock `import.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# study-import configuration
# ==========================
# Every top-level key is optional; values below are the defaults.
# A [[series]] list replaces the stock registry as a whole.
# Unknown keys will cause an error.

# Directory holding one subdirectory per series key.
source_root = "/root/workspace/study"

# Content collection the articles are written to (created if missing).
dest_root = "/root/workspace/Blog/astro-blog/src/content/blog"

# Description for notes that have no plain paragraph line.
fallback_description = "技术学习笔记"

# ---------------------------------------------------------------------------
# Series
# ---------------------------------------------------------------------------
# key       directory under source_root, and the slug prefix
# name      display name, written to the `series` frontmatter field
# category  written to the `category` frontmatter field
# tags      written to the `tags` frontmatter field
#
# Pick one traversal per series:
# dirs      subdirectories to import, in order; missing ones are skipped.
#           Every .md file except README.md becomes an article.
# scan_docs every subdirectory of docs/ becomes one article, named after
#           the directory. README.md is used when a chapter has no other note.

[[series]]
key = "cpp-mastery"
name = "C++ 从入门到精通"
category = "cpp"
tags = ["cpp", "programming"]
dirs = [
    "part1-basics",
    "part2-oop",
    "part3-memory",
    "part4-stl",
    "part5-modern",
    "part6-concurrency",
    "part7-network",
    "part8-system",
    "part9-engineering",
    "part10-projects",
]

[[series]]
key = "python-crawler-mastery"
name = "Python 爬虫实战"
category = "python"
tags = ["python", "crawler", "scraping"]
dirs = [
    "docs/part1-basics",
    "docs/part2-parsing",
    "docs/part3-dynamic",
    "docs/part4-anti",
    "docs/part5-storage",
    "docs/part6-framework",
    "docs/part7-advanced",
]

[[series]]
key = "rabbitmq-mastery"
name = "RabbitMQ 消息队列"
category = "rabbitmq"
tags = ["rabbitmq", "mq", "backend"]
scan_docs = true

[[series]]
key = "reddit-mastery"
name = "Reddit API 开发"
category = "reddit"
tags = ["reddit", "api", "python"]
dirs = ["docs/part1-basics", "docs/part2-advanced", "docs/part3-practice"]

[[series]]
key = "webrtc-blog"
name = "WebRTC 音视频开发"
category = "webrtc"
tags = ["webrtc", "audio", "video"]
dirs = [
    "part1-basics",
    "part2-signaling",
    "part3-media",
    "part4-codec",
    "part5-practice",
    "part6-advanced",
]
"##
}
