pub mod types;
pub mod scanner;
pub mod processor;

// Re-export the main API for easier access
pub use types::{StubOptions, Multiplicity, IdentifierPattern, DirectiveStyle, FileJob, FileOutcome, StubRunResult};
pub use scanner::{FileCollector, AnnotationParser};
pub use processor::{StubProcessor, StubGenStats};
