//! Command-line argument parsing for the demo binary.

use std::path::PathBuf;

use crate::config::Config;
use crate::error::CliError;

/// Help text printed by `--help`.
pub const USAGE: &str = "\
Usage: appstate [OPTIONS]

Reads lifecycle notifications from stdin, one per line, and prints the
derived signals.

Options:
  --store <path>        JSON store file (default ~/.appstate/store.json)
  --app-version <v>     Pretend the running build has version <v>
  --reset               Clear the persisted keys and exit
  -V, --version         Print version and exit
  -h, --help            Print this help and exit

Input lines:
  active | inactive | background | terminate
  view will-appear | view did-appear | view will-disappear | view did-disappear
  status | reset | help | quit";

/// What the binary should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Clear the persisted keys
    Reset,
    /// Run the interactive session (default)
    Run,
}

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub command: CliCommand,
    pub store_path: Option<PathBuf>,
    pub app_version: Option<String>,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            command: CliCommand::Run,
            store_path: None,
            app_version: None,
        }
    }
}

impl CliArgs {
    /// Layer the flags over `config`.
    pub fn apply_to(&self, mut config: Config) -> Config {
        if let Some(path) = &self.store_path {
            config = config.with_store_path(path.clone());
        }
        if let Some(version) = &self.app_version {
            config = config.with_app_version_override(version.clone());
        }
        config
    }
}

/// Parse command-line arguments.
///
/// `--version` and `--help` win over everything else on the line.
///
/// # Examples
///
/// ```
/// use appstate::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["appstate".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()).unwrap().command, CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> Result<CliArgs, CliError>
where
    I: Iterator<Item = String>,
{
    let mut parsed = CliArgs::default();
    // Skip the program name
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => {
                parsed.command = CliCommand::Version;
                return Ok(parsed);
            }
            "--help" | "-h" => {
                parsed.command = CliCommand::Help;
                return Ok(parsed);
            }
            "--reset" => parsed.command = CliCommand::Reset,
            "--store" => {
                let value = args.next().ok_or_else(|| CliError::MissingValue(arg.clone()))?;
                parsed.store_path = Some(PathBuf::from(value));
            }
            "--app-version" => {
                let value = args.next().ok_or_else(|| CliError::MissingValue(arg.clone()))?;
                parsed.app_version = Some(value);
            }
            _ => return Err(CliError::UnknownArgument(arg)),
        }
    }
    Ok(parsed)
}
