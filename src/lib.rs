// src/lib.rs

pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod params;
pub mod schema;

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use tracing::debug;

use crate::cli::{CliArgs, Command, LoadArgs};
use crate::config::{LoadOptions, LoadedConfig, default_search_paths, load_layered};
use crate::fs::{FileSystem, RealFileSystem};
use crate::schema::Schema;

/// High-level entry point used by `main.rs`.
///
/// Returns `Ok(false)` when the command ran but found problems (for
/// example `check` reporting errors), so the caller can set the exit code.
pub fn run(args: CliArgs) -> Result<bool> {
    let fs = RealFileSystem;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with(&args, &fs, &mut out)
}

/// Same as [`run`], with the filesystem and output injected.
pub fn run_with(args: &CliArgs, fs: &dyn FileSystem, out: &mut dyn Write) -> Result<bool> {
    let schema = Schema::builtin();

    let Command::Config {
        format,
        output,
        force,
    } = &args.command
    else {
        let loaded = load(&args.load, fs, &schema)?;
        return run_loaded(&args.command, &loaded, &schema, fs, out);
    };

    let path = commands::write_default_config(fs, &schema, *format, output.as_deref(), *force)?;
    writeln!(out, "wrote {}", path.display())?;
    Ok(true)
}

fn run_loaded(
    command: &Command,
    loaded: &LoadedConfig,
    schema: &Schema,
    fs: &dyn FileSystem,
    out: &mut dyn Write,
) -> Result<bool> {
    match command {
        Command::Check { strict } => commands::check(out, loaded, schema, *strict),
        Command::Show {
            section,
            format,
            origin,
        } => commands::show(out, &loaded.params, section.as_deref(), *format, *origin),
        Command::Get { name, list } => commands::get(out, &loaded.params, name, *list),
        Command::Render {
            statement,
            template,
            vars,
        } => commands::render_cmd(
            out,
            fs,
            &loaded.params,
            statement.as_deref(),
            template.as_deref(),
            vars,
        ),
        Command::Digest => commands::digest(out, &loaded.params),
        // Handled before any file is loaded.
        Command::Config { .. } => Ok(true),
    }
}

fn load(args: &LoadArgs, fs: &dyn FileSystem, schema: &Schema) -> Result<LoadedConfig> {
    let paths = if args.config.is_empty() {
        default_search_paths(&PathBuf::from("."))
    } else {
        args.config.clone()
    };
    debug!(?paths, "config search list");

    let options = LoadOptions {
        with_defaults: args.with_defaults,
        overrides: args.overrides.clone(),
    };
    Ok(load_layered(fs, &paths, &options, schema)?)
}
