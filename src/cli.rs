use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser};
use thiserror::Error;

use crate::config;
use crate::stub::types::{StubOptions, Multiplicity, IdentifierPattern, DirectiveStyle};

/// Usage line printed when the arguments are wrong
pub const USAGE: &str = "Usage: stub_gen <input_directory> <output_directory>";

/// Generate reStructuredText stubs for `@class` annotations in a source tree
#[derive(Debug, Parser)]
#[command(name = "stub_gen", disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Directory scanned recursively for annotated sources
    pub input_dir: PathBuf,

    /// Directory receiving the mirrored stub files
    pub output_dir: PathBuf,

    /// TOML file with default options; flags override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Annotation token preceding the identifier
    #[arg(long)]
    pub marker: Option<String>,

    /// Characters accepted in an identifier
    #[arg(long, value_enum)]
    pub identifier: Option<IdentifierPattern>,

    /// Write every match at once, or append as each match is found
    #[arg(long, value_enum)]
    pub multiplicity: Option<Multiplicity>,

    /// Directive option set
    #[arg(long, value_enum)]
    pub style: Option<DirectiveStyle>,

    /// Source extension to scan (repeatable)
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Scan every file regardless of extension
    #[arg(long)]
    pub all_files: bool,

    /// Extension of generated files
    #[arg(long, value_name = "EXT")]
    pub output_ext: Option<String>,

    /// Worker threads (0 picks a count from the CPUs)
    #[arg(long, short)]
    pub jobs: Option<usize>,

    /// Show a progress bar
    #[arg(long)]
    pub progress: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Argument problems detected before any filesystem access
#[derive(Debug, Error)]
pub enum UsageError {
    /// Wrong argument count or an unparseable flag
    #[error("{}", USAGE)]
    Invalid { reason: String },
}

impl UsageError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            UsageError::Invalid { .. } => 1,
        }
    }
}

/// Parse command line arguments, the first item being the program name.
///
/// Exactly two bare arguments are always taken as the two directories, even
/// when one of them starts with `-`.
pub fn parse_args<I, T>(args: I) -> std::result::Result<Cli, UsageError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

    Cli::try_parse_from(&args)
        .or_else(|err| match args.as_slice() {
            [program, input, output] if input != "--" && output != "--" => {
                Cli::try_parse_from([program.clone(), "--".into(), input.clone(), output.clone()])
            }
            _ => Err(err),
        })
        .map_err(|err| UsageError::Invalid { reason: err.to_string() })
}

impl Cli {
    /// Effective options: config file (if any) overlaid with command line flags
    pub fn options(&self) -> Result<StubOptions> {
        let mut options = match &self.config {
            Some(path) => config::load_options(path)?,
            None => StubOptions::default(),
        };

        if let Some(marker) = &self.marker {
            options.marker = marker.clone();
        }
        if let Some(identifier) = self.identifier {
            options.identifier_pattern = identifier;
        }
        if let Some(multiplicity) = self.multiplicity {
            options.multiplicity = multiplicity;
        }
        if let Some(style) = self.style {
            options.directive_style = style;
        }
        if !self.extensions.is_empty() {
            options.extensions = self.extensions.clone();
        }
        if self.all_files {
            options.all_files = true;
        }
        if let Some(ext) = &self.output_ext {
            options.output_extension = ext.trim_start_matches('.').to_string();
        }
        if self.jobs.is_some() {
            options.jobs = self.jobs;
        }
        if self.progress {
            options.show_progress = true;
        }

        Ok(options)
    }

    /// Log filter matching the requested verbosity
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
