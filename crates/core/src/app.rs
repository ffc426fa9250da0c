use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Entity, Guid, MemorySize};

/// Run state reported by the platform for an application.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppState {
    Started,
    Stopped,
    #[default]
    #[serde(other)]
    Unknown,
}

impl AppState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppState::Started => "STARTED",
            AppState::Stopped => "STOPPED",
            AppState::Unknown => "UNKNOWN",
        }
    }
}

/// An application deployed into a space.
///
/// `memory` and `disk_quota` are megabytes; zero means "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub guid: Guid,
    pub name: String,
    #[serde(default)]
    pub instances: u32,
    #[serde(default)]
    pub memory: MemorySize,
    #[serde(default)]
    pub disk_quota: MemorySize,
    #[serde(default)]
    pub state: AppState,
    /// Variable values as text; non-string JSON values arrive stringified.
    #[serde(default)]
    pub environment_vars: BTreeMap<String, String>,
}

impl Application {
    pub fn new(name: impl Into<String>, guid: impl Into<Guid>) -> Self {
        Self {
            guid: guid.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment_vars.insert(key.into(), value.into());
        self
    }
}

impl Entity for Application {
    const KIND: &'static str = "App";

    fn guid(&self) -> &Guid {
        &self.guid
    }

    fn name(&self) -> &str {
        &self.name
    }
}
