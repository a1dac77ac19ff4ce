use std::collections::BTreeMap;

use strata_model::{ComponentName, Role};

use crate::classify::Classification;

/// The cross-component references one service must be told about. Absence is
/// an `Option`, never an empty hostname string: a reference is only absent
/// when no component of the referenced role exists at all.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReferenceSet {
    /// Relational database this backend should connect to.
    pub database: Option<ComponentName>,
    /// Document store this backend should connect to.
    pub document_store: Option<ComponentName>,
    /// Backend this frontend should call.
    pub backend: Option<ComponentName>,
}

impl ReferenceSet {
    pub fn is_empty(&self) -> bool {
        self.database.is_none() && self.document_store.is_none() && self.backend.is_none()
    }
}

/// Per-component resolved references, keyed by component name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedRefs {
    by_component: BTreeMap<ComponentName, ReferenceSet>,
}

impl ResolvedRefs {
    pub fn get(&self, name: &ComponentName) -> ReferenceSet {
        self.by_component.get(name).cloned().unwrap_or_default()
    }
}

/// Builds the reference graph: frontend → backend, backend → database,
/// backend → document store. Total over any classification; no error path.
///
/// A backend shadowed by a later one (last-declaration-wins) is still part
/// of the topology, but it no longer participates in resolution: its
/// reference set is empty.
pub fn resolve(classification: &Classification) -> ResolvedRefs {
    let mut refs = ResolvedRefs::default();

    for (name, role) in classification.entries() {
        let set = match role {
            Role::Backend if classification.backend() == Some(name) => ReferenceSet {
                database: classification.database().cloned(),
                document_store: classification.document_store().cloned(),
                backend: None,
            },
            Role::Backend => ReferenceSet::default(),
            Role::Frontend => ReferenceSet {
                database: None,
                document_store: None,
                backend: classification.backend().cloned(),
            },
            Role::Database | Role::Nosql | Role::Other(_) => ReferenceSet::default(),
        };
        refs.by_component.insert(name.clone(), set);
    }

    refs
}
