//! The input model for the `strata` compiler: an ordered list of named,
//! role-tagged components describing one small distributed application.

use std::{collections::BTreeSet, fmt, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};

mod error;
mod names;


pub use error::Error;
pub use names::ComponentName;

/// The functional category of a component. Unrecognized role strings are
/// carried through as [`Role::Other`] and still get a manifest entry, but
/// never participate in reference resolution.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, DeserializeFromStr, SerializeDisplay)]
pub enum Role {
    Database,
    Nosql,
    Backend,
    Frontend,
    Other(String),
}

impl Role {
    /// Infrastructure roles use fixed well-known ports and start first.
    pub fn is_infra(&self) -> bool {
        matches!(self, Role::Database | Role::Nosql)
    }
}

impl FromStr for Role {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value {
            "database" => Role::Database,
            "nosql" => Role::Nosql,
            "backend" => Role::Backend,
            "frontend" => Role::Frontend,
            other => Role::Other(other.to_string()),
        })
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Database => f.write_str("database"),
            Role::Nosql => f.write_str("nosql"),
            Role::Backend => f.write_str("backend"),
            Role::Frontend => f.write_str("frontend"),
            Role::Other(other) => f.write_str(other),
        }
    }
}

/// One deployable service in the application model. Immutable once parsed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Component {
    pub name: ComponentName,
    pub role: Role,
}

impl Component {
    pub fn new(name: impl TryInto<ComponentName, Error = Error>, role: Role) -> Result<Self, Error> {
        Ok(Self {
            name: name.try_into()?,
            role,
        })
    }
}

/// The application model: components in declaration order. Declaration order
/// is significant — it breaks ties in the topology order and decides which
/// component wins a singleton role.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Model {
    pub components: Vec<Component>,
}

impl Model {
    pub fn new(components: Vec<Component>) -> Self {
        Self { components }
    }

    pub fn from_json_str(input: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Rejects models where the same name is declared twice. Name reuse
    /// across roles would make reference resolution ambiguous.
    pub fn validate(&self) -> Result<(), Error> {
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        for component in &self.components {
            if !seen.insert(component.name.as_str()) {
                return Err(Error::DuplicateComponentName {
                    name: component.name.as_str().to_string(),
                });
            }
        }
        Ok(())
    }
}
