/*!
 * ASCII tree rendering for Treegen
 *
 * One directory level is listed per call; entries that survive the ignore
 * filter are sorted (directories first, then files, names compared
 * case-insensitively) and emitted with box-drawing branch glyphs. Each
 * subdirectory contributes its own rendered block, indented through the
 * accumulated prefix.
 */

use std::cmp::Ordering;
use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use crate::error::Result;
use crate::ignore::should_ignore;

/// Per-invocation rendering options
#[derive(Debug, Clone)]
pub struct TreeOptions {
    /// Maximum recursion depth; `None` means unbounded, 0 lists the
    /// immediate children only
    pub depth: Option<usize>,

    /// Resolved ignore patterns, in precedence order
    pub ignore_patterns: Vec<String>,
}

/// Renders a directory as an ASCII tree
#[derive(Debug)]
pub struct TreeRenderer {
    options: TreeOptions,
}

impl TreeRenderer {
    /// Create a renderer with the given options
    pub fn new(options: TreeOptions) -> Self {
        Self { options }
    }

    /// Render the tree rooted at `dir`
    ///
    /// `root_dir` anchors the relative paths used for ignore matching and
    /// is normally the directory the recursion starts from. An empty
    /// result means everything was filtered out; that is valid output,
    /// not an error. Unreadable directories abort the render.
    pub fn render(&self, dir: &Path, root_dir: &Path) -> Result<String> {
        self.render_level(dir, root_dir, "", 0)
    }

    fn render_level(
        &self,
        dir: &Path,
        root_dir: &Path,
        prefix: &str,
        depth: usize,
    ) -> Result<String> {
        if let Some(max_depth) = self.options.depth {
            if depth > max_depth {
                return Ok(String::new());
            }
        }

        let mut entries = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy();
            if !should_ignore(&name, entry.path(), &self.options.ignore_patterns, root_dir) {
                entries.push(entry);
            }
        }
        entries.sort_by(compare_entries);

        let mut lines = Vec::new();
        for (index, entry) in entries.iter().enumerate() {
            let is_last = index + 1 == entries.len();
            let branch = if is_last { "└── " } else { "├── " };
            let name = entry.file_name().to_string_lossy();
            lines.push(format!("{}{}{}", prefix, branch, name));

            if entry.file_type().is_dir() {
                let continuation = if is_last { "    " } else { "│   " };
                let child_prefix = format!("{}{}", prefix, continuation);
                let subtree =
                    self.render_level(entry.path(), root_dir, &child_prefix, depth + 1)?;
                if !subtree.is_empty() {
                    lines.push(subtree);
                }
            }
        }

        Ok(lines.join("\n"))
    }
}

/// Directories sort before files; within a kind, names compare
/// case-insensitively with a byte-wise tiebreak
fn compare_entries(a: &DirEntry, b: &DirEntry) -> Ordering {
    let a_dir = a.file_type().is_dir();
    let b_dir = b.file_type().is_dir();
    match (a_dir, b_dir) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => {
            let a_name = a.file_name().to_string_lossy().to_lowercase();
            let b_name = b.file_name().to_string_lossy().to_lowercase();
            a_name
                .cmp(&b_name)
                .then_with(|| a.file_name().cmp(b.file_name()))
        }
    }
}
