use serde::{Deserialize, Serialize};

use crate::{Domain, Entity, Guid, Space};

/// An organization. `spaces` and `domains` are only populated when the
/// lookup asked for related records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub guid: Guid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spaces: Vec<Space>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domains: Vec<Domain>,
}

impl Organization {
    pub fn new(name: impl Into<String>, guid: impl Into<Guid>) -> Self {
        Self {
            guid: guid.into(),
            name: name.into(),
            spaces: Vec::new(),
            domains: Vec::new(),
        }
    }
}

impl Entity for Organization {
    const KIND: &'static str = "Org";

    fn guid(&self) -> &Guid {
        &self.guid
    }

    fn name(&self) -> &str {
        &self.name
    }
}
