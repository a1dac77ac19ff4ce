//! Artifact generation for compiled topologies.
//!
//! The compiler describes each service as a typed [`ServiceStub`]; a
//! [`StackRenderer`] turns that description into concrete files for one
//! target technology stack. Rendering and topology logic never meet: the
//! compiler only ever sees paths.

use std::path::PathBuf;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use strata_model::ComponentName;
use thiserror::Error;

mod default_stack;
mod writer;


pub use default_stack::DefaultStack;
pub use writer::write_tree;

#[derive(Debug, Error, Diagnostic)]
#[non_exhaustive]
pub enum Error {
    #[error("io error: {0}")]
    #[diagnostic(code(scaffold::io_error))]
    Io(#[from] std::io::Error),

    #[error("failed to render stub for `{name}`: {message}")]
    #[diagnostic(code(scaffold::render_error))]
    Render { name: String, message: String },

    #[error("failed to write generated artifact `{path}`")]
    #[diagnostic(
        code(scaffold::write_error),
        help("Nothing was written; the staged output was discarded.")
    )]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What a service stub needs to know about the rest of the topology.
/// Absent references mean the dependency is disabled in the generated code,
/// not pointed at an empty hostname.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StubKind {
    Database,
    DocumentStore,
    Backend {
        database: Option<ComponentName>,
        document_store: Option<ComponentName>,
    },
    Frontend {
        backend: Option<ComponentName>,
    },
    Service {
        role: String,
    },
}

/// A fully resolved description of one service's generated artifacts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStub {
    pub name: ComponentName,
    pub kind: StubKind,
}

/// One generated file, addressed relative to the output root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub contents: String,
}

impl Artifact {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// A rendering layer for one target technology stack. Swapping the renderer
/// changes every generated stub without touching topology logic.
pub trait StackRenderer {
    fn render(&self, stub: &ServiceStub) -> Result<Vec<Artifact>, Error>;

    fn render_all(&self, stubs: &[ServiceStub]) -> Result<Vec<Artifact>, Error> {
        let mut artifacts = Vec::new();
        for stub in stubs {
            artifacts.extend(self.render(stub)?);
        }
        Ok(artifacts)
    }
}
