//! # Study Import
//!
//! Migrates a folder of markdown study notes into a blog's content
//! collection. Each note is renamed to a slug, gets a generated frontmatter
//! block, loses its leading `# heading` (which becomes the title) and is
//! written into the destination directory.
//!
//! # Architecture: Plan, Then Write
//!
//! ```text
//! 1. Plan    study/ + registry  →  ImportPlan     (discover, read, derive)
//! 2. Write   ImportPlan         →  blog/*.md      (frontmatter + body)
//! ```
//!
//! The plan holds every article in memory before anything is written. That
//! gives the `check` command a free dry run and lets slug collisions fail the
//! import up front instead of silently overwriting an earlier article.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `import.toml` loading and validation; the stock series registry |
//! | [`scan`] | Finds each series' notes: fixed directories or `docs/` scan mode |
//! | [`naming`] | Leading-number order, filename titles, slugs |
//! | [`metadata`] | Title/description heuristics and heading stripping ([`metadata::Extractor`]) |
//! | [`frontmatter`] | Renders the YAML frontmatter block |
//! | [`import`] | Plan, collision check, write; progress events and summary |
//! | [`types`] | `SourceDocument` and `ArticleRecord` |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## The Registry Is Data
//!
//! Series are described in `import.toml` (or the built-in stock registry) and
//! passed into [`import::run`] as an [`config::ImportConfig`]. Tests build
//! one-series registries without touching the stock table.
//!
//! ## Line Heuristics, Not a Markdown Parser
//!
//! Titles and descriptions come from simple line rules. Notes already
//! published were imported with those rules; a real parser would change
//! their output on re-import. The rules sit behind [`metadata::Extractor`]
//! so a smarter strategy can replace them without touching the pipeline.
//!
//! ## NNN-Prefix Ordering
//!
//! The `order` frontmatter field is the leading number of a note's filename
//! (or, in scan mode, of its chapter directory). Unnumbered entries get 0.
//!
//! ## Sequential Processing
//!
//! A run touches a few hundred small files. Everything happens on one
//! thread, in registry order, so output and progress are deterministic.

pub mod config;
pub mod frontmatter;
pub mod import;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
