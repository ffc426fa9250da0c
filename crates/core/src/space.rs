use serde::{Deserialize, Serialize};

use crate::{Entity, Guid};

/// A space inside an organization; the unit applications are deployed to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    pub guid: Guid,
    pub name: String,
}

impl Space {
    pub fn new(name: impl Into<String>, guid: impl Into<Guid>) -> Self {
        Self {
            guid: guid.into(),
            name: name.into(),
        }
    }
}

impl Entity for Space {
    const KIND: &'static str = "Space";

    fn guid(&self) -> &Guid {
        &self.guid
    }

    fn name(&self) -> &str {
        &self.name
    }
}
