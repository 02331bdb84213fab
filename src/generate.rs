/*!
 * Generation pipeline for Treegen
 *
 * A `Generator` owns the resolved configuration and the pattern-file
 * cache for the lifetime of the process, so watch mode re-runs the same
 * pipeline without rebuilding state. Each run invalidates the cache,
 * resolves the full pattern list, renders the tree and dispatches it to
 * exactly one output.
 */

use std::fs;

use indicatif::ProgressBar;

use crate::config::Config;
use crate::error::Result;
use crate::ignore::{IgnoreCache, DEFAULT_IGNORES};
use crate::readme::update_readme;
use crate::term;
use crate::tree::{TreeOptions, TreeRenderer};

/// Drives one or more generation runs over a fixed configuration
pub struct Generator {
    config: Config,
    ignore_cache: IgnoreCache,
}

impl Generator {
    /// Create a generator for the given configuration
    pub fn new(config: Config) -> Self {
        Self {
            config,
            ignore_cache: IgnoreCache::new(),
        }
    }

    /// The configuration this generator runs with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Execute one full generation run
    ///
    /// Failures are reported on the terminal here and returned for
    /// callers that need the signal; they never abort the process.
    pub fn run(&mut self) -> Result<()> {
        let spinner = term::spinner("🌳 Generating project tree...");
        match self.run_with(&spinner) {
            Ok(()) => Ok(()),
            Err(e) => {
                term::fail(&spinner, "Failed to generate tree");
                term::error_detail(&e);
                Err(e)
            }
        }
    }

    fn run_with(&mut self, spinner: &ProgressBar) -> Result<()> {
        // Re-read .treeignore on every run so edits apply in watch mode
        self.ignore_cache.invalidate();

        let options = TreeOptions {
            depth: self.config.depth,
            ignore_patterns: self.ignore_patterns()?,
        };
        let renderer = TreeRenderer::new(options);
        let tree = renderer.render(&self.config.root_dir, &self.config.root_dir)?;

        let formatted = match &self.config.root_label {
            Some(label) => format!("{}\n{}", label, tree),
            None => tree,
        };

        if let Some(output) = &self.config.output {
            fs::write(self.config.root_dir.join(output), &formatted)?;
            term::succeed(
                spinner,
                &format!("Tree successfully saved to {}!", output.display()),
            );
        } else if self.config.update {
            update_readme(&self.config.root_dir, &formatted)?;
            term::succeed(spinner, "Tree successfully updated in README.md!");
        } else {
            spinner.finish_and_clear();
            println!("{}", formatted);
        }

        Ok(())
    }

    /// Resolve the full ignore-pattern list, in precedence order:
    /// built-in defaults, CLI patterns, config-file patterns, then the
    /// `.treeignore` file
    pub fn ignore_patterns(&mut self) -> Result<Vec<String>> {
        let mut patterns: Vec<String> = DEFAULT_IGNORES.iter().map(|p| p.to_string()).collect();

        if let Some(cli) = self.config.ignore.as_deref().filter(|s| !s.is_empty()) {
            patterns.extend(cli.split(',').map(String::from));
        }
        patterns.extend(self.config.ignore_from_file.iter().cloned());
        patterns.extend(
            self.ignore_cache
                .patterns(&self.config.root_dir)?
                .iter()
                .cloned(),
        );

        Ok(patterns)
    }
}
