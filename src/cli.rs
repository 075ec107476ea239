// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Command-line arguments for `pipeconf`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "pipeconf",
    version,
    about = "Load, layer and check pipeline.ini / pipeline.yml files.",
    long_about = None
)]
pub struct CliArgs {
    #[command(flatten)]
    pub load: LoadArgs,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PIPECONF_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

/// Which files to load and how.
#[derive(Debug, Clone, Args)]
pub struct LoadArgs {
    /// Config file to load (INI or YAML). Repeat to layer several files;
    /// later files override earlier ones.
    ///
    /// Default: `../pipeline.yml`, `../pipeline.ini`, `pipeline.yml`,
    /// `pipeline.ini`, skipping those that do not exist.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Vec<PathBuf>,

    /// Override a parameter, e.g. `--set bwa.threads=8`. A bare `KEY=VALUE`
    /// sets a `[general]` parameter.
    #[arg(long = "set", value_name = "SECTION.KEY=VALUE", global = true)]
    pub overrides: Vec<String>,

    /// Start from the built-in defaults of every known parameter.
    #[arg(long, global = true)]
    pub with_defaults: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Validate the configuration and print any problems.
    Check {
        /// Treat warnings as errors.
        #[arg(long)]
        strict: bool,
    },

    /// Print the effective parameters.
    Show {
        /// Only print this section.
        #[arg(long, value_name = "NAME")]
        section: Option<String>,

        #[arg(long, value_enum, default_value_t = ShowFormat::Flat)]
        format: ShowFormat,

        /// Print where each value came from (flat format only).
        #[arg(long)]
        origin: bool,
    },

    /// Print a single parameter by its flattened name, e.g. `bwa_threads`.
    Get {
        name: String,

        /// Print a comma-separated value one item per line.
        #[arg(long)]
        list: bool,
    },

    /// Substitute `%(name)s` placeholders in a command statement.
    Render {
        /// Statement text.
        #[arg(long, conflicts_with = "template", required_unless_present = "template")]
        statement: Option<String>,

        /// File containing the statement.
        #[arg(long, value_name = "PATH")]
        template: Option<PathBuf>,

        /// Extra value visible to the statement, e.g. `--var infile=a.bam`.
        #[arg(long = "var", value_name = "NAME=VALUE")]
        vars: Vec<String>,
    },

    /// Print a digest of the effective parameters.
    Digest,

    /// Write a default configuration file.
    Config {
        #[arg(long, value_enum, default_value_t = ConfigFileFormat::Ini)]
        format: ConfigFileFormat,

        /// Output path; defaults to `pipeline.ini` / `pipeline.yml`.
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ShowFormat {
    Flat,
    Ini,
    Yaml,
    Toml,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ConfigFileFormat {
    Ini,
    Yml,
}

impl ConfigFileFormat {
    pub fn default_file_name(self) -> &'static str {
        match self {
            ConfigFileFormat::Ini => "pipeline.ini",
            ConfigFileFormat::Yml => "pipeline.yml",
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
