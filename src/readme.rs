/*!
 * README marker-block updates for Treegen
 *
 * The rendered tree lives between two literal HTML-comment sentinels
 * inside a fenced code block. Updates replace the region between the
 * sentinels and leave every other byte of the document alone, so running
 * the tool twice with the same tree is a no-op for the file content.
 */

use std::fs;
use std::ops::Range;
use std::path::Path;

use crate::error::Result;

/// Opening sentinel of the managed block
pub const TAG_START: &str = "<!-- TREE:START -->";

/// Closing sentinel of the managed block
pub const TAG_END: &str = "<!-- TREE:END -->";

/// File the managed block lives in, relative to the root directory
pub const README_FILE: &str = "README.md";

/// Document used when no README exists yet
const DEFAULT_HEADER: &str = "# Project Tree\n";

/// Write `tree` into the marker block of `ROOT/README.md`
///
/// A missing README is created from a default header. When the document
/// already contains a marker pair, the first pair (start sentinel through
/// the nearest following end sentinel) is replaced in place; any later
/// pairs are left untouched. Without markers, the block is appended after
/// the existing content, separated by one blank line.
pub fn update_readme(root_dir: &Path, tree: &str) -> Result<()> {
    let path = root_dir.join(README_FILE);
    let existing = if path.exists() {
        fs::read_to_string(&path)?
    } else {
        DEFAULT_HEADER.to_string()
    };

    let block = format!("{}\n```\n{}\n```\n{}", TAG_START, tree, TAG_END);
    let updated = match find_marker_block(&existing) {
        Some(region) => {
            let mut content = String::with_capacity(existing.len() + block.len());
            content.push_str(&existing[..region.start]);
            content.push_str(&block);
            content.push_str(&existing[region.end..]);
            content
        }
        None => format!("{}\n\n{}\n", existing.trim_end(), block),
    };

    fs::write(&path, updated)?;
    Ok(())
}

/// Locate the first sentinel pair: the first start marker, then the
/// nearest end marker after it. Returns the byte range covering both
/// sentinels inclusive.
fn find_marker_block(content: &str) -> Option<Range<usize>> {
    let start = content.find(TAG_START)?;
    let search_from = start + TAG_START.len();
    let end = search_from + content[search_from..].find(TAG_END)?;
    Some(start..end + TAG_END.len())
}
