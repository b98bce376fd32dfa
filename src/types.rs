//! Shared types passed between planning, writing and output formatting.

use crate::frontmatter::Frontmatter;
use serde::Serialize;
use std::path::PathBuf;

/// A markdown note as read from the study tree.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub path: PathBuf,
    pub content: String,
}

/// One article ready to be written to the content collection.
///
/// Built once per source note and never modified afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleRecord {
    /// Output filename stem, unique across the whole import.
    pub slug: String,
    pub title: String,
    pub order: u32,
    pub frontmatter: Frontmatter,
    /// Source content minus the leading `# heading`.
    #[serde(skip)]
    pub body: String,
    /// Note this article was derived from.
    pub source: PathBuf,
}

impl ArticleRecord {
    /// Output filename: `<slug>.md`.
    pub fn file_name(&self) -> String {
        format!("{}.md", self.slug)
    }

    /// Full output file content: frontmatter block followed by the body.
    pub fn render(&self) -> String {
        let mut out = self.frontmatter.render();
        out.push_str(&self.body);
        out
    }
}
