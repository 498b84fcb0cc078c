use std::path::{Path, PathBuf};
use anyhow::{Result, Context, bail};
use log::{debug, trace};
use walkdir::WalkDir;

use crate::stub::types::FileJob;
use crate::utils::file_utils;

/// File collector for finding annotated source files and mapping them into the output tree
#[derive(Debug, Clone)]
pub struct FileCollector {
    /// Valid file extensions to collect
    valid_extensions: Vec<String>,

    /// Skip extension filtering entirely
    all_files: bool,
}

impl Default for FileCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl FileCollector {
    /// Create a new file collector that picks up Lua sources
    pub fn new() -> Self {
        Self {
            valid_extensions: vec!["lua".to_string()],
            all_files: false,
        }
    }

    /// Create a new file collector with custom file extensions
    pub fn with_extensions(extensions: Vec<String>) -> Self {
        Self {
            valid_extensions: extensions,
            all_files: false,
        }
    }

    /// Create a file collector that accepts every regular file
    pub fn all_files() -> Self {
        Self {
            valid_extensions: Vec::new(),
            all_files: true,
        }
    }

    /// Whether a path passes the extension filter
    pub fn accepts(&self, path: impl AsRef<Path>) -> bool {
        if self.all_files {
            return true;
        }
        let exts: Vec<&str> = self.valid_extensions.iter().map(String::as_str).collect();
        file_utils::has_any_extension(path, &exts)
    }

    /// Collect all accepted files under the input directory, sorted by path.
    ///
    /// Symlinked directories are not descended into; symlinks to files are kept.
    pub fn collect_files(&self, input_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let input_dir = input_dir.as_ref();
        debug!("Collecting files from directory: {}", input_dir.display());

        if !input_dir.is_dir() {
            bail!("Input directory {} does not exist or is not a directory", input_dir.display());
        }

        let mut files = Vec::new();

        for entry in WalkDir::new(input_dir)
            .follow_links(false)
            .sort_by_file_name()
        {
            let entry = entry
                .with_context(|| format!("Failed to walk directory {}", input_dir.display()))?;
            if entry.file_type().is_dir() || !entry.path().is_file() {
                continue;
            }
            if self.accepts(entry.path()) {
                trace!("Found file: {}", entry.path().display());
                files.push(entry.into_path());
            }
        }

        debug!("Collected {} files for processing", files.len());
        Ok(files)
    }

    /// Collect files and pair each with its mirrored output path.
    ///
    /// The output root and every job's parent directory exist once this returns.
    pub fn collect_jobs(
        &self,
        input_dir: impl AsRef<Path>,
        output_dir: impl AsRef<Path>,
        output_extension: &str,
    ) -> Result<Vec<FileJob>> {
        let input_dir = input_dir.as_ref();
        let output_dir = output_dir.as_ref();

        let files = self.collect_files(input_dir)?;
        file_utils::ensure_dir_exists(output_dir)?;

        let mut jobs = Vec::with_capacity(files.len());
        for input in files {
            let output = output_path_for(input_dir, output_dir, &input, output_extension)?;
            if let Some(parent) = output.parent() {
                file_utils::ensure_dir_exists(parent)?;
            }
            jobs.push(FileJob { input, output });
        }

        Ok(jobs)
    }
}

/// Map a file under `input_root` to the same relative location under `output_root`,
/// replacing its extension
pub fn output_path_for(
    input_root: impl AsRef<Path>,
    output_root: impl AsRef<Path>,
    file: impl AsRef<Path>,
    output_extension: &str,
) -> Result<PathBuf> {
    let input_root = input_root.as_ref();
    let file = file.as_ref();

    let relative = file.strip_prefix(input_root)
        .with_context(|| format!("{} is not under {}", file.display(), input_root.display()))?;

    Ok(output_root.as_ref().join(relative).with_extension(output_extension))
}
