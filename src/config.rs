/*!
 * Configuration handling for Treegen
 *
 * Three layers feed a run: built-in defaults, an optional JSON config
 * file discovered in the root directory, and CLI flags. CLI values win
 * over file values field by field, never wholesale.
 */

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use clap_complete::Shell;
use serde::Deserialize;

use crate::ensure;
use crate::error::Result;
use crate::term;

/// Files probed for configuration, in order
pub const CONFIG_FILES: [&str; 2] = [".treegenrc", ".treegenrc.json"];

/// Command-line arguments for Treegen
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "treegen",
    version = env!("CARGO_PKG_VERSION"),
    about = "Generate an ASCII tree of your project structure",
    long_about = "Renders the current directory as an ASCII tree, filtered through ignore patterns, and prints it, saves it to a file, or embeds it in a marker block inside README.md."
)]
pub struct Args {
    /// Max depth of folder scan
    #[clap(short, long)]
    pub depth: Option<usize>,

    /// Comma-separated patterns (e.g., 'dist,build')
    #[clap(short, long, value_name = "PATTERNS")]
    pub ignore: Option<String>,

    /// Update README.md automatically
    #[clap(short, long)]
    pub update: bool,

    /// Specify a root name (e.g., '.')
    #[clap(short, long, value_name = "NAME")]
    pub root: Option<String>,

    /// Save the tree to a specific file
    #[clap(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Watch for file changes and update
    #[clap(short, long)]
    pub watch: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Configuration file payload
///
/// All keys are optional and camelCase. `ignore` accepts either the CLI's
/// comma-separated string or a list of patterns; a list takes the place
/// of `ignoreFromFile` during resolution.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileConfig {
    pub depth: Option<usize>,
    pub ignore: Option<IgnoreSpec>,
    pub ignore_from_file: Option<Vec<String>>,
    pub update: Option<bool>,
    pub root: Option<String>,
    pub output: Option<PathBuf>,
    pub watch: Option<bool>,
}

/// The `ignore` key of the config file, in either accepted shape
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IgnoreSpec {
    /// Comma-separated patterns, the CLI shape
    CommaSeparated(String),
    /// One pattern per element
    List(Vec<String>),
}

/// Load the first config file present in `root_dir`
///
/// Discovery never fails the invocation: a missing file or a payload that
/// does not parse degrades to defaults with a warning.
pub fn discover(root_dir: &Path) -> FileConfig {
    for name in CONFIG_FILES {
        let path = root_dir.join(name);
        if !path.exists() {
            continue;
        }
        let parsed = fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|content| serde_json::from_str(&content).map_err(|e| e.to_string()));
        match parsed {
            Ok(config) => return config,
            Err(e) => {
                term::warn(&format!("Could not load {}: {}. Using defaults.", name, e));
                return FileConfig::default();
            }
        }
    }

    term::warn("No configuration file found. Using defaults.");
    FileConfig::default()
}

/// Resolved invocation configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory the tree is generated from
    pub root_dir: PathBuf,

    /// Maximum depth of the scan; `None` means unbounded
    pub depth: Option<usize>,

    /// Comma-separated ignore patterns (CLI shape)
    pub ignore: Option<String>,

    /// Ignore patterns from the config file's list shape
    pub ignore_from_file: Vec<String>,

    /// Whether to rewrite the README marker block
    pub update: bool,

    /// Label printed as the tree's first line
    pub root_label: Option<String>,

    /// Output file, resolved against `root_dir` unless absolute
    pub output: Option<PathBuf>,

    /// Whether to watch for changes and regenerate
    pub watch: bool,
}

impl Config {
    /// Merge CLI arguments over the file config, field by field
    ///
    /// Boolean flags can only be switched on from the CLI, so an absent
    /// flag defers to the file value. A file `ignore` list replaces
    /// `ignoreFromFile`; the string shape competes with the CLI string
    /// for the `ignore` field, and the CLI wins.
    pub fn resolve(args: Args, file: FileConfig, root_dir: PathBuf) -> Self {
        let mut ignore_from_file = file.ignore_from_file.unwrap_or_default();
        let file_ignore = match file.ignore {
            Some(IgnoreSpec::CommaSeparated(patterns)) => Some(patterns),
            Some(IgnoreSpec::List(patterns)) => {
                ignore_from_file = patterns;
                None
            }
            None => None,
        };

        Self {
            root_dir,
            depth: args.depth.or(file.depth),
            ignore: args.ignore.or(file_ignore),
            ignore_from_file,
            update: args.update || file.update.unwrap_or(false),
            root_label: args.root.or(file.root),
            output: args.output.or(file.output),
            watch: args.watch || file.watch.unwrap_or(false),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.root_dir.is_dir(),
            Config,
            "Root directory not found: {}",
            self.root_dir.display()
        );

        if let Some(output) = &self.output {
            let resolved = self.root_dir.join(output);
            if let Some(parent) = resolved.parent() {
                ensure!(
                    parent.exists(),
                    Config,
                    "Output directory not found: {}",
                    parent.display()
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    fn cli(args: &[&str]) -> Args {
        Args::parse_from(std::iter::once("treegen").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_overrides_file_per_field() {
        let file = FileConfig {
            depth: Some(5),
            ignore: Some(IgnoreSpec::CommaSeparated("dist".to_string())),
            root: Some("project".to_string()),
            update: Some(true),
            ..FileConfig::default()
        };

        let config = Config::resolve(
            cli(&["--depth", "2", "--ignore", "build"]),
            file,
            PathBuf::from("/project"),
        );

        // Overridden fields take the CLI value
        assert_eq!(config.depth, Some(2));
        assert_eq!(config.ignore.as_deref(), Some("build"));
        // Untouched fields keep the file value
        assert_eq!(config.root_label.as_deref(), Some("project"));
        assert!(config.update);
    }

    #[test]
    fn test_file_values_apply_when_cli_is_silent() {
        let file = FileConfig {
            depth: Some(3),
            output: Some(PathBuf::from("tree.txt")),
            watch: Some(true),
            ..FileConfig::default()
        };

        let config = Config::resolve(cli(&[]), file, PathBuf::from("/project"));

        assert_eq!(config.depth, Some(3));
        assert_eq!(config.output, Some(PathBuf::from("tree.txt")));
        assert!(config.watch);
        assert!(!config.update);
        assert_eq!(config.ignore, None);
    }

    #[test]
    fn test_file_ignore_list_replaces_ignore_from_file() {
        let file = FileConfig {
            ignore: Some(IgnoreSpec::List(vec!["a".to_string(), "b".to_string()])),
            ignore_from_file: Some(vec!["discarded".to_string()]),
            ..FileConfig::default()
        };

        let config = Config::resolve(cli(&[]), file.clone(), PathBuf::from("/project"));
        assert_eq!(config.ignore, None);
        assert_eq!(config.ignore_from_file, ["a".to_string(), "b".to_string()]);

        // A CLI string survives next to the folded list
        let config = Config::resolve(cli(&["-i", "dist"]), file, PathBuf::from("/project"));
        assert_eq!(config.ignore.as_deref(), Some("dist"));
        assert_eq!(config.ignore_from_file, ["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_discover_reads_json_payload() -> std::io::Result<()> {
        let temp_dir = tempdir()?;
        fs::write(
            temp_dir.path().join(".treegenrc.json"),
            r#"{ "depth": 2, "ignore": ["dist"], "update": true, "root": "." }"#,
        )?;

        let file = discover(temp_dir.path());
        assert_eq!(file.depth, Some(2));
        assert!(matches!(file.ignore, Some(IgnoreSpec::List(_))));
        assert_eq!(file.update, Some(true));
        assert_eq!(file.root.as_deref(), Some("."));

        Ok(())
    }

    #[test]
    fn test_discover_prefers_rc_over_json() -> std::io::Result<()> {
        let temp_dir = tempdir()?;
        fs::write(temp_dir.path().join(".treegenrc"), r#"{ "depth": 1 }"#)?;
        fs::write(temp_dir.path().join(".treegenrc.json"), r#"{ "depth": 9 }"#)?;

        let file = discover(temp_dir.path());
        assert_eq!(file.depth, Some(1));

        Ok(())
    }

    #[test]
    fn test_discover_degrades_on_malformed_payload() -> std::io::Result<()> {
        let temp_dir = tempdir()?;
        fs::write(temp_dir.path().join(".treegenrc"), "not json at all")?;

        let file = discover(temp_dir.path());
        assert!(file.depth.is_none());
        assert!(file.ignore.is_none());

        Ok(())
    }

    #[test]
    fn test_validate_rejects_missing_output_directory() -> std::io::Result<()> {
        let temp_dir = tempdir()?;
        let config = Config {
            root_dir: temp_dir.path().to_path_buf(),
            depth: None,
            ignore: None,
            ignore_from_file: vec![],
            update: false,
            root_label: None,
            output: Some(PathBuf::from("no-such-dir/tree.txt")),
            watch: false,
        };

        assert!(config.validate().is_err());

        fs::create_dir(temp_dir.path().join("no-such-dir"))?;
        assert!(config.validate().is_ok());

        Ok(())
    }
}
