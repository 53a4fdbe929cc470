//! Input/output: puzzle files, command line, progress reporting and errors

/// Command-line interface and batch processing
pub mod cli;
/// Constants shared by the solver and its front ends
pub mod configuration;
/// Error types and context helpers
pub mod error;
/// Progress bars driven by solve events
pub mod progress;
/// Plain-text puzzle format
pub mod puzzle;
