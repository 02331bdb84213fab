/*!
 * Treegen - Generate ASCII directory trees and embed them in README files
 *
 * This library renders a directory structure as an ASCII tree, filtered
 * through layered ignore patterns, and can keep the result embedded in a
 * marker-delimited block of a README file.
 */

pub mod config;
pub mod error;
pub mod generate;
pub mod ignore;
pub mod readme;
pub mod term;
pub mod tree;
pub mod watch;


// Re-export main components for easier access
pub use config::{Args, Config, FileConfig};
pub use error::{Result, TreegenError};
pub use generate::Generator;
pub use ignore::{should_ignore, IgnoreCache, DEFAULT_IGNORES, IGNORE_FILE};
pub use readme::{update_readme, README_FILE, TAG_END, TAG_START};
pub use tree::{TreeOptions, TreeRenderer};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
