pub mod stub;
pub mod cli;
pub mod config;
pub mod utils;

// Re-export main types and functions for easier access
pub use stub::types::{StubOptions, Multiplicity, IdentifierPattern, DirectiveStyle, StubRunResult};
pub use stub::processor::{StubProcessor, StubGenStats};
pub use stub::scanner::{AnnotationParser, FileCollector};

// Re-export utility functions
pub use utils::file_utils;
