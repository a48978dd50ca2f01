//! CLI for tldgen.

mod commands;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tldgen_core::config;
use tldgen_core::fetch::FetchPolicy;

use commands::{run_all, run_fetch, run_generate, run_normalize};

/// Top-level CLI. Without a subcommand the full pipeline runs.
#[derive(Debug, Parser)]
#[command(name = "tldgen")]
#[command(
    about = "Fetch the IANA TLD list, normalize it to UTF-8 and generate a C++ header",
    long_about = None
)]
pub struct Cli {
    /// Config file (TOML). Defaults to ~/.config/tldgen/config.toml when present.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download, normalize and generate in one go.
    All {
        /// Download the list even if the cached copy exists.
        #[arg(long)]
        force_refresh: bool,
    },

    /// Download the raw list (skipped when the cached copy is non-empty).
    Fetch {
        /// Download the list even if the cached copy exists.
        #[arg(long)]
        force_refresh: bool,
    },

    /// Lowercase and Punycode-decode the raw list, custom TLDs first.
    Normalize,

    /// Write the C++ header from the normalized list.
    Generate,
}

impl Cli {
    /// Parse `args`. Help and version output exit the process as usual; any
    /// other clap error is returned so the caller exits with status 1.
    pub fn parse_or_error<I, T>(args: I) -> Result<Cli>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        match Cli::try_parse_from(args) {
            Ok(cli) => Ok(cli),
            Err(e)
                if matches!(
                    e.kind(),
                    ErrorKind::DisplayHelp
                        | ErrorKind::DisplayVersion
                        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) =>
            {
                e.exit()
            }
            Err(e) => {
                let msg = e.to_string();
                anyhow::bail!("{}", msg.trim_start_matches("error: ").trim_end())
            }
        }
    }

    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse_or_error(std::env::args_os())?;
        let cfg = config::load(cli.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command.unwrap_or(CliCommand::All {
            force_refresh: false,
        }) {
            CliCommand::All { force_refresh } => {
                run_all(&cfg, FetchPolicy { force_refresh })?;
            }
            CliCommand::Fetch { force_refresh } => {
                run_fetch(&cfg, FetchPolicy { force_refresh })?;
            }
            CliCommand::Normalize => {
                run_normalize(&cfg)?;
            }
            CliCommand::Generate => {
                run_generate(&cfg)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
