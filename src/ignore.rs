/*!
 * Ignore pattern matching for Treegen
 *
 * Entries are tested against every active pattern, both by bare name and
 * by path relative to the scan root, so `dist` hides a root-level dist
 * directory and everything inside it while a pattern carrying a path
 * separator only matches the paths it spells out.
 */

use std::fs;
use std::path::Path;

use glob_match::glob_match;
use once_cell::sync::Lazy;

use crate::error::Result;

/// Patterns excluded from every tree
pub static DEFAULT_IGNORES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // Dependencies
        "node_modules",
        // Version Control
        ".git",
        // Build & Dist
        "dist",
        ".next",
        // Caches & OS Files
        ".cache",
        ".DS_Store",
    ]
});

/// Name of the per-project pattern file
pub const IGNORE_FILE: &str = ".treeignore";

/// Check whether a directory entry matches any of the given patterns
///
/// Each pattern is expanded into up to two variants before matching:
/// the pattern itself, plus `pattern/**` for bare names (so a directory
/// match also covers its contents) or `pattern**` for patterns written
/// with a trailing slash. Every variant is tested against both the entry
/// name and the path relative to `root_dir`. Matching is case-sensitive
/// and dotfiles are matched like any other name.
pub fn should_ignore(
    entry_name: &str,
    entry_path: &Path,
    patterns: &[String],
    root_dir: &Path,
) -> bool {
    let relative = entry_path.strip_prefix(root_dir).unwrap_or(entry_path);
    let relative = relative.to_string_lossy();

    for pattern in patterns {
        for variant in pattern_variants(pattern) {
            if variant_matches(&variant, entry_name) || variant_matches(&variant, &relative) {
                return true;
            }
        }
    }

    false
}

/// Expand a pattern into the variants it is matched under
fn pattern_variants(pattern: &str) -> Vec<String> {
    let mut variants = vec![pattern.to_string()];
    if !pattern.contains('/') {
        variants.push(format!("{}/**", pattern));
    } else if pattern.ends_with('/') {
        variants.push(format!("{}**", pattern));
    }
    variants
}

/// Glob-test one variant against one candidate string
///
/// A trailing globstar also matches zero path segments, so `src/**`
/// covers the `src` directory itself and not just its contents.
fn variant_matches(variant: &str, candidate: &str) -> bool {
    if glob_match(variant, candidate) {
        return true;
    }
    match variant.strip_suffix("/**") {
        Some(base) if !base.is_empty() => glob_match(base, candidate),
        _ => false,
    }
}

/// Cached contents of the per-project pattern file
///
/// The cache is owned by the invocation context and loaded at most once
/// per generation run; `invalidate` drops the cached list so the next run
/// picks up edits to the file. The first load wins regardless of the
/// `root_dir` passed later (single-root assumption).
#[derive(Debug, Default)]
pub struct IgnoreCache {
    patterns: Option<Vec<String>>,
}

impl IgnoreCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the pattern-file list, reading and caching it on first use
    ///
    /// A missing file yields an empty list; a file that exists but cannot
    /// be read is an error.
    pub fn patterns(&mut self, root_dir: &Path) -> Result<&[String]> {
        if self.patterns.is_none() {
            self.patterns = Some(read_ignore_file(root_dir)?);
        }
        Ok(self.patterns.as_deref().unwrap_or_default())
    }

    /// Drop the cached list so the next lookup re-reads the file
    pub fn invalidate(&mut self) {
        self.patterns = None;
    }
}

/// Parse the pattern file: one pattern per line, trimmed, with blank
/// lines and `#` comments dropped
fn read_ignore_file(root_dir: &Path) -> Result<Vec<String>> {
    let path = root_dir.join(IGNORE_FILE);
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(&path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}
