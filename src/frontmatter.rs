//! Frontmatter block rendering.
//!
//! The blog's content collection reads a YAML block between `---` fences:
//!
//! ```text
//! ---
//! title: "Intro"
//! description: "Hello world."
//! pubDate: "2026-10-19"
//! tags: ["x","y"]
//! category: "demo"
//! series: "Demo Series"
//! order: 1
//! ---
//!
//! ```
//!
//! Strings and the tag list are written as JSON literals. JSON strings are
//! valid YAML double-quoted scalars, so quotes and backslashes inside titles
//! survive the round trip while plain text comes out exactly as typed.

use chrono::NaiveDate;
use serde::Serialize;

/// Metadata written at the top of every imported article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frontmatter {
    pub title: String,
    pub description: String,
    pub pub_date: NaiveDate,
    pub tags: Vec<String>,
    pub category: String,
    /// Display name of the series, not its key.
    pub series: String,
    pub order: u32,
}

impl Frontmatter {
    /// Render the fenced block, including the blank line that separates it
    /// from the body.
    pub fn render(&self) -> String {
        build_frontmatter(
            &self.title,
            &self.description,
            &self.series,
            &self.category,
            &self.tags,
            self.order,
            self.pub_date,
        )
    }
}

/// Render a frontmatter block from its individual fields.
pub fn build_frontmatter(
    title: &str,
    description: &str,
    series: &str,
    category: &str,
    tags: &[String],
    order: u32,
    pub_date: NaiveDate,
) -> String {
    format!(
        "---\n\
         title: {title}\n\
         description: {description}\n\
         pubDate: \"{date}\"\n\
         tags: {tags}\n\
         category: {category}\n\
         series: {series}\n\
         order: {order}\n\
         ---\n\n",
        title = quote(title),
        description = quote(description),
        date = pub_date.format("%Y-%m-%d"),
        tags = quote_list(tags),
        category = quote(category),
        series = quote(series),
    )
}

fn quote(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

fn quote_list(values: &[String]) -> String {
    serde_json::Value::from(values.to_vec()).to_string()
}
