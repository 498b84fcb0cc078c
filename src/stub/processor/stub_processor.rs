use std::path::Path;

use anyhow::Result;
use log::{debug, info, warn};

use crate::stub::types::{StubOptions, Multiplicity, FileJob, FileOutcome, StubRunResult};
use crate::stub::scanner::{AnnotationParser, FileCollector, ProgressTracker};
use crate::utils::file_utils;
use super::stats::StubGenStats;
use super::stub_writer;

/// Stub processor driving the read, extract and write pass for every file
#[derive(Debug)]
pub struct StubProcessor {
    /// Configuration options for processing
    options: StubOptions,

    /// Annotation parser for extracting identifiers
    parser: AnnotationParser,

    /// File collector for finding source files
    file_collector: FileCollector,

    /// Sequential or pooled execution with optional progress display
    progress_tracker: ProgressTracker,
}

impl StubProcessor {
    /// Create a new stub processor with the given options
    pub fn new(options: StubOptions) -> Result<Self> {
        let parser = AnnotationParser::new(&options.marker, options.identifier_pattern)?;
        let file_collector = if options.all_files {
            FileCollector::all_files()
        } else {
            FileCollector::with_extensions(options.extensions.clone())
        };
        let progress_tracker = ProgressTracker::new(options.show_progress);

        Ok(Self {
            options,
            parser,
            file_collector,
            progress_tracker,
        })
    }

    /// Create a new stub processor with default options
    pub fn with_defaults() -> Self {
        Self {
            options: StubOptions::default(),
            parser: AnnotationParser::default(),
            file_collector: FileCollector::new(),
            progress_tracker: ProgressTracker::default(),
        }
    }

    /// Generate stubs for every source file under `input_dir` into `output_dir`
    pub fn run(&self, input_dir: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> Result<StubRunResult> {
        let input_dir = input_dir.as_ref();
        let output_dir = output_dir.as_ref();
        info!("Scanning directory: {}", input_dir.display());

        let jobs = self.file_collector.collect_jobs(input_dir, output_dir, &self.options.output_extension)?;
        info!("Found {} files to process", jobs.len());

        self.process_jobs(&jobs)
    }

    /// Process prepared jobs and collect their outcomes
    pub fn process_jobs(&self, jobs: &[FileJob]) -> Result<StubRunResult> {
        let outcomes = self.progress_tracker.run(jobs, self.options.jobs, |job| self.process_file(job))?;

        let mut stats = StubGenStats::new();
        for outcome in &outcomes {
            stats.record(outcome);
        }

        info!(
            "Processed {} files, wrote {} stub files with {} stubs",
            stats.total_files, stats.files_written, stats.total_stubs
        );

        Ok(StubRunResult { outcomes, stats })
    }

    /// Read one input file and write its stub file if it carries any annotation
    pub fn process_file(&self, job: &FileJob) -> Result<FileOutcome> {
        debug!("Processing file: {}", job.input.display());
        let content = file_utils::read_file_to_string(&job.input)?;
        let style = self.options.directive_style;

        let identifiers = match self.options.multiplicity {
            Multiplicity::All => {
                let identifiers = self.parser.extract_all(&content);
                if !identifiers.is_empty() {
                    stub_writer::write_all(&job.output, style, &identifiers)?;
                }
                identifiers
            }
            Multiplicity::Last => {
                if job.output.exists() {
                    warn!("Appending to existing stub file {}", job.output.display());
                }
                let mut identifiers = Vec::new();
                self.parser.scan_incremental(&content, |name| {
                    identifiers.push(name.to_string());
                    stub_writer::append_block(&job.output, style, name)
                })?;
                identifiers
            }
        };

        if identifiers.is_empty() {
            debug!("No annotations found in file: {}", job.input.display());
        } else {
            debug!("Found {} identifiers in {}", identifiers.len(), job.input.display());
        }

        Ok(FileOutcome {
            job: job.clone(),
            written: !identifiers.is_empty(),
            identifiers,
        })
    }
}
