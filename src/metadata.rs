//! Note metadata extraction.
//!
//! Every imported note needs a title and a one-line description for its
//! frontmatter, and its body must lose the `# heading` that became the title.
//!
//! ## Resolution
//!
//! - **Title**: first level-1 heading (`# Title`) anywhere in the note →
//!   filename fallback via [`naming::title_from_filename`].
//! - **Description**: first "paragraph-looking" line, capped at
//!   [`DESCRIPTION_MAX_CHARS`] characters → configured fallback text.
//! - **Body**: content with a leading `# heading` line (and the blank lines
//!   after it) removed. A heading further down is left in place.
//!
//! These are line heuristics, not a markdown parser. Existing notes were
//! imported with exactly these rules, so a stricter parser would change
//! output on re-import. The [`Extractor`] trait is the seam for swapping in a
//! different strategy; [`HeuristicExtractor`] is the stock implementation.

use crate::naming;

/// Descriptions longer than this many characters are cut (no ellipsis).
pub const DESCRIPTION_MAX_CHARS: usize = 200;

/// Derives the frontmatter-facing pieces of a note from its raw text.
pub trait Extractor {
    /// Title for the note, never empty for a non-empty `filename`.
    fn title(&self, content: &str, filename: &str) -> String;

    /// One-line summary for the `description` field.
    fn description(&self, content: &str) -> String;

    /// Content to emit after the frontmatter block.
    fn body<'a>(&self, content: &'a str) -> &'a str;
}

/// Line-based extraction used for every import so far.
#[derive(Debug, Clone)]
pub struct HeuristicExtractor {
    pub fallback_description: String,
}

impl HeuristicExtractor {
    pub fn new(fallback_description: impl Into<String>) -> Self {
        Self {
            fallback_description: fallback_description.into(),
        }
    }
}

impl Extractor for HeuristicExtractor {
    fn title(&self, content: &str, filename: &str) -> String {
        derive_title(content, filename)
    }

    fn description(&self, content: &str) -> String {
        derive_description(content, &self.fallback_description)
    }

    fn body<'a>(&self, content: &'a str) -> &'a str {
        strip_leading_heading(content)
    }
}

/// Title from the first `# heading` line, falling back to the filename.
pub fn derive_title(content: &str, filename: &str) -> String {
    content
        .lines()
        .find_map(heading_text)
        .map(String::from)
        .unwrap_or_else(|| naming::title_from_filename(filename))
}

/// First line that reads like prose, truncated to [`DESCRIPTION_MAX_CHARS`].
///
/// Skips blank lines and lines opening a heading (`#`), quote (`>`), list
/// item (`-`) or code fence (`` ``` ``). A line *inside* a fenced block is
/// not recognised as code.
pub fn derive_description(content: &str, fallback: &str) -> String {
    content
        .lines()
        .map(str::trim)
        .find(|line| is_prose(line))
        .map(|line| line.chars().take(DESCRIPTION_MAX_CHARS).collect())
        .unwrap_or_else(|| fallback.to_string())
}

/// Remove a `# heading` on the very first line, plus the line breaks after it.
///
/// The heading line must be terminated by a newline; a note consisting of
/// nothing but a heading is returned unchanged.
pub fn strip_leading_heading(content: &str) -> &str {
    let Some(line_end) = content.find('\n') else {
        return content;
    };
    if heading_text(&content[..line_end]).is_none() {
        return content;
    }
    content[line_end..].trim_start_matches(['\n', '\r'])
}

/// Text of a level-1 heading line: `#`, whitespace, then non-empty text.
///
/// `## Sub` and `#hashtag` are not level-1 headings.
fn heading_text(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('#')?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let text = rest.trim();
    (!text.is_empty()).then_some(text)
}

fn is_prose(line: &str) -> bool {
    !line.is_empty()
        && !line.starts_with(['#', '>', '-'])
        && !line.starts_with("```")
}
