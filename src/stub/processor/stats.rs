use crate::stub::types::FileOutcome;

/// Statistics for a stub generation run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StubGenStats {
    /// Total number of files scanned
    pub total_files: usize,

    /// Number of stub files written
    pub files_written: usize,

    /// Number of files without any annotation
    pub empty_files: usize,

    /// Total number of stub blocks emitted
    pub total_stubs: usize,
}

impl StubGenStats {
    /// Create a new stats instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one processed file
    pub fn record(&mut self, outcome: &FileOutcome) {
        self.total_files += 1;
        if outcome.identifiers.is_empty() {
            self.empty_files += 1;
        }
        if outcome.written {
            self.files_written += 1;
        }
        self.total_stubs += outcome.identifiers.len();
    }

    /// Calculate the average number of stubs per written file
    pub fn avg_stubs_per_file(&self) -> f64 {
        if self.files_written == 0 {
            return 0.0;
        }

        self.total_stubs as f64 / self.files_written as f64
    }
}
