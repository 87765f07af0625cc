//! mikedoc command-line interface
//!
//! `mikedoc <command> [--root DIR] [--quiet]`

mod commands;

use anyhow::{bail, Result};
use std::env;
use std::path::PathBuf;

const HELP_TEXT: &str = "\
MikeDoc - Neat docstring format for generating API references
https://github.com/pyrustic/mikedoc

USAGE:
    mikedoc <COMMAND> [--root DIR] [--quiet]

COMMANDS:
    init        Create the config file
    build       Build the API reference
    list        Print the documentation model
    help        Print this help

OPTIONS:
    --root DIR  Project root directory (default: current directory)
    --quiet     Only print warnings and errors";

/// Subcommand to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Init,
    Build,
    List,
    Help,
}

/// Parsed command line
#[derive(Debug)]
struct Cli {
    command: Command,
    root: PathBuf,
    quiet: bool,
}

impl Cli {
    fn parse(args: &[String]) -> Result<Self> {
        let mut command = None;
        let mut root = PathBuf::from(".");
        let mut quiet = false;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--root" | "-r" => {
                    if i + 1 < args.len() {
                        root = PathBuf::from(&args[i + 1]);
                        i += 2;
                    } else {
                        bail!("--root requires a value");
                    }
                }
                "--quiet" | "-q" => {
                    quiet = true;
                    i += 1;
                }
                "--help" | "-h" => {
                    command = Some(Command::Help);
                    i += 1;
                }
                arg if !arg.starts_with('-') => {
                    if command.is_some() {
                        bail!("Unexpected argument: {}", arg);
                    }
                    command = Some(match arg.to_lowercase().as_str() {
                        "init" => Command::Init,
                        "build" => Command::Build,
                        "list" => Command::List,
                        "help" => Command::Help,
                        _ => bail!("Unknown command: {}\n\n{}", arg, HELP_TEXT),
                    });
                    i += 1;
                }
                _ => {
                    bail!("Unknown flag: {}", args[i]);
                }
            }
        }

        Ok(Self {
            command: command.unwrap_or(Command::Help),
            root,
            quiet,
        })
    }
}

fn init_tracing(quiet: bool) {
    use tracing_subscriber::EnvFilter;
    let default = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let cli = Cli::parse(&args)?;
    init_tracing(cli.quiet);

    match cli.command {
        Command::Init => commands::init(&cli.root, cli.quiet),
        Command::Build => commands::build(&cli.root, cli.quiet),
        Command::List => commands::list(&cli.root),
        Command::Help => {
            println!("{}", HELP_TEXT);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_command_and_flags() {
        let cli = Cli::parse(&args(&["build", "--root", "/tmp/demo", "--quiet"])).unwrap();
        assert_eq!(cli.command, Command::Build);
        assert_eq!(cli.root, PathBuf::from("/tmp/demo"));
        assert!(cli.quiet);
    }

    #[test]
    fn test_no_command_is_help() {
        let cli = Cli::parse(&[]).unwrap();
        assert_eq!(cli.command, Command::Help);
        assert_eq!(cli.root, PathBuf::from("."));
    }

    #[test]
    fn test_commands_are_case_insensitive() {
        assert_eq!(Cli::parse(&args(&["INIT"])).unwrap().command, Command::Init);
    }

    #[test]
    fn test_unknown_input_is_rejected() {
        assert!(Cli::parse(&args(&["deploy"])).is_err());
        assert!(Cli::parse(&args(&["build", "--verbose"])).is_err());
        assert!(Cli::parse(&args(&["build", "list"])).is_err());
        assert!(Cli::parse(&args(&["build", "--root"])).is_err());
    }
}
