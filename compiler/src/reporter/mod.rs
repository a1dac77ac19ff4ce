use miette::Diagnostic;
use thiserror::Error;

use crate::CompileOutput;

pub mod compose;

pub use compose::ComposeReporter;

#[derive(Debug, Error, Diagnostic)]
#[non_exhaustive]
pub enum ReporterError {
    #[error("reporter error: {0}")]
    #[diagnostic(code(reporter::error))]
    Other(String),
}

impl ReporterError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

/// Turns a compiled topology into one emitted artifact. Reporters only read
/// the output; emitting the same output twice yields identical artifacts.
pub trait Reporter {
    type Artifact;

    fn emit(&self, output: &CompileOutput) -> Result<Self::Artifact, ReporterError>;
}
