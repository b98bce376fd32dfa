//! Filename conventions for study notes.
//!
//! Notes and scan-mode chapter directories follow the same loose pattern: an
//! optional leading number, usually followed by a dash, then a name:
//!
//! - `01-intro.md` → order 1, fallback title "intro", slug stem `01-intro`
//! - `10-advanced-topics.md` → order 10, fallback title "advanced topics"
//! - `02-setup/` (scan mode) → order 2, slug stem `02-setup`
//! - `overview.md` → order 0, fallback title "overview"
//!
//! ## Order
//!
//! Order is the leading run of ASCII digits, with or without a dash after it
//! (`7days.md` → 7). No digits means order 0, which sorts together with a
//! legitimately numbered `00-` entry. The blog breaks such ties by title.
//!
//! ## Slugs
//!
//! Slugs keep the numeric prefix so output filenames stay sorted like their
//! sources: `<series-key>-<stem>`.

const MARKDOWN_EXT: &str = ".md";

/// Parse the leading decimal number of a file or directory name.
///
/// - `"03-my-file.md"` → 3
/// - `"120"` → 120
/// - `"7days.md"` → 7
/// - `"intro.md"` → 0
///
/// A prefix too large for `u32` saturates to `u32::MAX`.
pub fn derive_order(name: &str) -> u32 {
    let digits = leading_digits(name);
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u32::MAX)
}

/// Build a display title from a filename when the note has no `# heading`.
///
/// Strips a `NNN-` prefix, turns dashes into spaces and drops the `.md`
/// extension: `"03-my-file.md"` → `"my file"`.
pub fn title_from_filename(filename: &str) -> String {
    let digits = leading_digits(filename);
    let rest = match filename[digits.len()..].strip_prefix('-') {
        Some(rest) if !digits.is_empty() => rest,
        _ => filename,
    };
    let spaced = rest.replace('-', " ");
    match spaced.strip_suffix(MARKDOWN_EXT) {
        Some(stem) => stem.to_string(),
        None => spaced,
    }
}

/// Slug for a note processed on its own (fixed-directory mode).
///
/// `file_slug("demo", "01-intro.md")` → `"demo-01-intro"`.
pub fn file_slug(series_key: &str, filename: &str) -> String {
    let stem = filename.strip_suffix(MARKDOWN_EXT).unwrap_or(filename);
    format!("{series_key}-{stem}")
}

/// Slug for a scan-mode chapter directory.
///
/// `dir_slug("mq", "02-setup")` → `"mq-02-setup"`.
pub fn dir_slug(series_key: &str, dir_name: &str) -> String {
    format!("{series_key}-{dir_name}")
}

/// Whether `filename` is a markdown note eligible for import (not a README).
pub fn is_note(filename: &str) -> bool {
    filename.ends_with(MARKDOWN_EXT) && !is_readme(filename)
}

pub fn is_readme(filename: &str) -> bool {
    filename == "README.md"
}

fn leading_digits(name: &str) -> &str {
    let end = name
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(name.len());
    &name[..end]
}
