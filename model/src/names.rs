use std::{borrow::Borrow, fmt, str::FromStr, sync::Arc};

use serde_with::{DeserializeFromStr, SerializeDisplay};

use crate::error::Error;

/// A component name doubles as the service's hostname on the deployment
/// network, so only hostname-safe characters are accepted.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, DeserializeFromStr, SerializeDisplay)]
pub struct ComponentName(Arc<str>);

impl ComponentName {
    pub fn new(name: impl Into<String>) -> Result<Self, Error> {
        let name = name.into();
        ensure_hostname_safe(&name)?;
        Ok(Self(Arc::from(name)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn ensure_hostname_safe(name: &str) -> Result<(), Error> {
    if name.is_empty() {
        return Err(Error::InvalidName {
            name: name.to_string(),
            message: "name must be non-empty",
        });
    }
    if let Some(bad) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(Error::InvalidName {
            name: name.to_string(),
            message: match bad {
                '.' => "dots are reserved",
                _ => "only ASCII letters, digits, `-` and `_` are allowed",
            },
        });
    }
    Ok(())
}

impl FromStr for ComponentName {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ensure_hostname_safe(value)?;
        Ok(Self(Arc::from(value)))
    }
}

impl TryFrom<String> for ComponentName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ComponentName {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ComponentName> for String {
    fn from(value: ComponentName) -> Self {
        value.0.to_string()
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ComponentName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ComponentName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ComponentName {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for ComponentName {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
