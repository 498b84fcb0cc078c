pub mod file_collector;
pub mod annotation_parser;
mod progress;

// Re-export from submodules
pub use file_collector::{FileCollector, output_path_for};
pub use annotation_parser::AnnotationParser;
pub use progress::ProgressTracker;
