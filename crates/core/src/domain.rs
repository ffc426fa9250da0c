use serde::{Deserialize, Serialize};

use crate::{Entity, Guid};

/// A route domain, either owned by an organization or shared platform-wide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub guid: Guid,
    pub name: String,
    #[serde(default)]
    pub shared: bool,
}

impl Domain {
    pub fn new(name: impl Into<String>, guid: impl Into<Guid>) -> Self {
        Self {
            guid: guid.into(),
            name: name.into(),
            shared: false,
        }
    }
}

impl Entity for Domain {
    const KIND: &'static str = "Domain";

    fn guid(&self) -> &Guid {
        &self.guid
    }

    fn name(&self) -> &str {
        &self.name
    }
}
