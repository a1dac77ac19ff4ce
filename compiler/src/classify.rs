use strata_model::{ComponentName, Model, Role};

/// The role buckets derived from one model, plus the singleton bindings the
/// reference resolver hands out.
///
/// Singleton roles (database, nosql, backend) resolve to the **last**
/// component declared with that role. This is an explicit policy, not an
/// accident: earlier same-role components keep their manifest entries but
/// lose the binding, and the override is logged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Classification {
    entries: Vec<(ComponentName, Role)>,
    database: Option<ComponentName>,
    document_store: Option<ComponentName>,
    backend: Option<ComponentName>,
}

impl Classification {
    /// Every component in declaration order, unrecognized roles included.
    pub fn entries(&self) -> &[(ComponentName, Role)] {
        &self.entries
    }

    pub fn role(&self, name: &ComponentName) -> Option<&Role> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, role)| role)
    }

    pub fn database(&self) -> Option<&ComponentName> {
        self.database.as_ref()
    }

    pub fn document_store(&self) -> Option<&ComponentName> {
        self.document_store.as_ref()
    }

    pub fn backend(&self) -> Option<&ComponentName> {
        self.backend.as_ref()
    }
}

/// Partitions the model's components into role buckets. Pure; order in is
/// order out.
pub fn classify(model: &Model) -> Classification {
    let mut classification = Classification::default();

    for component in &model.components {
        let slot = match component.role {
            Role::Database => Some(&mut classification.database),
            Role::Nosql => Some(&mut classification.document_store),
            Role::Backend => Some(&mut classification.backend),
            Role::Frontend | Role::Other(_) => None,
        };
        if let Some(slot) = slot {
            if let Some(replaced) = slot.replace(component.name.clone()) {
                tracing::warn!(
                    role = %component.role,
                    replaced = %replaced,
                    by = %component.name,
                    "duplicate singleton role; last declaration wins"
                );
            }
        }
        classification
            .entries
            .push((component.name.clone(), component.role.clone()));
    }

    classification
}
