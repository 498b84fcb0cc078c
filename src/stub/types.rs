use std::path::PathBuf;
use serde::Deserialize;

use crate::stub::processor::StubGenStats;

/// How many identifiers a file contributes and how they reach the output file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Multiplicity {
    /// Collect every match, then write the file once (truncating it first)
    #[default]
    All,

    /// Keep only the latest match while scanning, appending a block as each one is found
    Last,
}

/// Character class accepted for the identifier following the marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierPattern {
    /// Any run of non-whitespace characters
    #[default]
    NonWhitespace,

    /// Word characters only; a line like `@class Foo.Bar` does not match
    Word,
}

/// Option set emitted under each `lua:autoobject` directive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DirectiveStyle {
    /// Includes `:inherited-members-table:` and a blank separator line
    #[default]
    Extended,

    /// Member options only, blocks are not separated
    Compact,
}

/// Configuration options for stub generation
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StubOptions {
    /// Literal annotation token preceding an identifier
    pub marker: String,

    /// Accepted identifier characters
    pub identifier_pattern: IdentifierPattern,

    /// Collect-all (batch) or last-match (incremental) policy
    pub multiplicity: Multiplicity,

    /// Directive option set
    pub directive_style: DirectiveStyle,

    /// File extensions to scan, compared case-insensitively
    pub extensions: Vec<String>,

    /// Scan every file regardless of extension
    pub all_files: bool,

    /// Extension given to generated files
    pub output_extension: String,

    /// Worker threads; `None` runs sequentially, `Some(0)` picks a count from the CPU count
    pub jobs: Option<usize>,

    /// Draw a progress bar for larger runs
    pub show_progress: bool,
}

impl Default for StubOptions {
    fn default() -> Self {
        Self {
            marker: "@class".to_string(),
            identifier_pattern: IdentifierPattern::default(),
            multiplicity: Multiplicity::default(),
            directive_style: DirectiveStyle::default(),
            extensions: vec!["lua".to_string()],
            all_files: false,
            output_extension: "rst".to_string(),
            jobs: None,
            show_progress: false,
        }
    }
}

/// An input file paired with the stub file it maps to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// What happened to a single input file
#[derive(Debug, Clone)]
pub struct FileOutcome {
    /// The processed job
    pub job: FileJob,

    /// Identifiers found, in file order
    pub identifiers: Vec<String>,

    /// Whether a stub file was written
    pub written: bool,
}

/// Result of a full generation run
#[derive(Debug, Clone)]
pub struct StubRunResult {
    /// Per-file outcomes in traversal order
    pub outcomes: Vec<FileOutcome>,

    /// Aggregate counters
    pub stats: StubGenStats,
}

impl StubRunResult {
    /// Paths of every stub file written during the run
    pub fn written_files(&self) -> Vec<PathBuf> {
        self.outcomes.iter()
            .filter(|o| o.written)
            .map(|o| o.job.output.clone())
            .collect()
    }
}
