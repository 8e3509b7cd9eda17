//! The `completions` and `man` subcommands.

use std::error::Error;
use std::io::Write;
use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::Shell;

use crate::Cli;

pub(crate) fn handle_completions(shell: Shell) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
}

pub(crate) fn handle_man(output: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let command = Cli::command();
    let man = clap_mangen::Man::new(command);

    let mut rendered = Vec::new();
    man.render(&mut rendered)?;

    match output {
        Some(path) => {
            std::fs::write(&path, &rendered)?;
            eprintln!("Wrote {}", path.display());
        }
        None => std::io::stdout().write_all(&rendered)?,
    }

    Ok(())
}
