//! The topology compiler: classifies a model's components by role, resolves
//! cross-component references, fixes the emission order, and describes the
//! artifacts each service needs. Reporters turn the result into concrete
//! deployment documents.
//!
//! A compilation is one bounded, synchronous pass over an in-memory model.
//! The same model always compiles to the same output, byte for byte.

#[cfg(test)]
mod tests;

use miette::Diagnostic;
use strata_model::{ComponentName, Model, Role};
use strata_scaffold::{ServiceStub, StubKind};
use thiserror::Error;

pub mod classify;
pub mod reporter;
pub mod resolve;
pub mod topology;

pub use classify::Classification;
pub use reporter::{ComposeReporter, Reporter, ReporterError};
pub use resolve::{ReferenceSet, ResolvedRefs};

#[derive(Debug, Error, Diagnostic)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Model(#[from] strata_model::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Reporter(#[from] ReporterError),
}

/// Immutable knobs for one compilation run: the Tier-1 port counter base,
/// the well-known infra ports and images, and the development credential
/// placeholder baked into generated infra entries (a convenience for local
/// stacks, not a secret store).
#[derive(Clone, Debug, PartialEq, Eq, bon::Builder)]
#[builder(on(String, into))]
pub struct CompilationConfig {
    /// First host port handed to a Tier-1 service.
    #[builder(default = 8000)]
    pub base_port: u16,
    /// Host port of the relational database service.
    #[builder(default = 3306)]
    pub relational_port: u16,
    /// Host and container port of the document store service.
    #[builder(default = 8000)]
    pub document_port: u16,
    /// Container-side port generated service stubs listen on.
    #[builder(default = 80)]
    pub service_port: u16,
    #[builder(default = "mysql:8".to_string())]
    pub relational_image: String,
    #[builder(default = "amazon/dynamodb-local:latest".to_string())]
    pub document_image: String,
    #[builder(default = "root".to_string())]
    pub root_password: String,
}

impl Default for CompilationConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Everything one compilation produced. Reporters and the artifact writer
/// consume this; nothing carries over between runs.
#[derive(Clone, Debug)]
pub struct CompileOutput {
    pub config: CompilationConfig,
    pub classification: Classification,
    pub refs: ResolvedRefs,
    /// Manifest emission order: infra first, declaration order within tiers.
    pub order: Vec<ComponentName>,
    /// Artifact descriptions in declaration order, one per component.
    pub stubs: Vec<ServiceStub>,
}

#[derive(Clone, Debug, Default)]
pub struct Compiler {
    config: CompilationConfig,
}

impl Compiler {
    pub fn new(config: CompilationConfig) -> Self {
        Self { config }
    }

    /// Compiles a model into a fully resolved topology.
    pub fn compile(&self, model: &Model) -> Result<CompileOutput, Error> {
        let classification = self.check(model)?;
        let refs = resolve::resolve(&classification);
        let order = topology::order(&classification);

        let stubs = classification
            .entries()
            .iter()
            .map(|(name, role)| {
                let component_refs = refs.get(name);
                let kind = match role {
                    Role::Database => StubKind::Database,
                    Role::Nosql => StubKind::DocumentStore,
                    Role::Backend => StubKind::Backend {
                        database: component_refs.database,
                        document_store: component_refs.document_store,
                    },
                    Role::Frontend => StubKind::Frontend {
                        backend: component_refs.backend,
                    },
                    Role::Other(other) => StubKind::Service {
                        role: other.clone(),
                    },
                };
                ServiceStub {
                    name: name.clone(),
                    kind,
                }
            })
            .collect();

        tracing::debug!(
            components = model.components.len(),
            "compiled topology"
        );

        Ok(CompileOutput {
            config: self.config.clone(),
            classification,
            refs,
            order,
            stubs,
        })
    }

    /// Validates and classifies without producing output artifacts.
    pub fn check(&self, model: &Model) -> Result<Classification, Error> {
        model.validate()?;
        Ok(classify::classify(model))
    }
}
