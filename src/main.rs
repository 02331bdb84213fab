/*!
 * Command-line interface for Treegen
 */

use std::env;
use std::io;
use std::process;

use clap::{CommandFactory, Parser};

use treegen::config::{self, Args, Config};
use treegen::generate::Generator;
use treegen::{term, watch, Result};

fn main() {
    if let Err(e) = run() {
        term::error("Failed to initialize CLI");
        term::error_detail(&e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    if let Some(shell) = args.generate {
        let mut cmd = Args::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    // Merge the discovered config file under the CLI arguments
    let root_dir = env::current_dir()?;
    let file_config = config::discover(&root_dir);
    let config = Config::resolve(args, file_config, root_dir);
    config.validate()?;

    let watch_mode = config.watch;
    let mut generator = Generator::new(config);

    // Generation failures are reported by the run itself and do not turn
    // into a non-zero exit
    let _ = generator.run();

    if watch_mode {
        watch::watch_loop(generator)?;
    }

    Ok(())
}
