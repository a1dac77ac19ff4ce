use strata_model::ComponentName;

use crate::classify::Classification;

/// Computes the manifest emission order: a fixed two-tier partition, not a
/// general topological sort. Tier 0 (database, nosql) precedes Tier 1
/// (everything else); within a tier, declaration order is kept. Every entry
/// a Tier-1 service can depend on therefore appears before it.
pub fn order(classification: &Classification) -> Vec<ComponentName> {
    let mut names: Vec<ComponentName> = classification
        .entries()
        .iter()
        .map(|(name, _)| name.clone())
        .collect();

    // Stable sort: ties keep the declaration order captured above.
    names.sort_by_key(|name| {
        let infra = classification
            .role(name)
            .is_some_and(strata_model::Role::is_infra);
        if infra { 0u8 } else { 1u8 }
    });

    names
}
