mod stub_processor;
mod stats;
pub mod stub_writer;

// Re-export from submodules
pub use stub_processor::StubProcessor;
pub use stats::StubGenStats;
