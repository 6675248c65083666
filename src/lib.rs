//! Core library for the `common-tracker` CLI.
//!
//! Finds the files in a repository that import from a shared "common"
//! directory and keeps a rolling YAML history of what it found, one entry
//! per run, keyed by git commit.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod gather;
pub mod ports;
pub mod revision;
pub mod scan;
pub mod tracking;

#[cfg(test)]
pub(crate) mod testing;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// `--help` and `--version` print to stdout and succeed.
///
/// # Errors
///
/// Returns an error string when argument parsing fails, the working
/// directory is not a repository root, or the tracking file cannot be written.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(usage_error(&err)),
    };
    commands::dispatch(&cli)
}

/// Clap's rendered message without its own `error: ` lead, since `main`
/// adds the prefix.
fn usage_error(err: &clap::Error) -> String {
    let rendered = err.to_string();
    rendered.strip_prefix("error: ").unwrap_or(&rendered).to_string()
}
