//! Wire shapes of Cloud Controller v2 resources and their mapping to entities.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value as JsonValue;

use cfctl_core::{AppState, Application, Domain, Guid, MemorySize, Organization, Space};

#[derive(Debug, Deserialize)]
pub struct PaginatedResources<E> {
    #[serde(default = "Vec::new")]
    pub resources: Vec<Resource<E>>,
}

#[derive(Debug, Deserialize)]
pub struct Resource<E> {
    pub metadata: Metadata,
    pub entity: E,
}

#[derive(Debug, Deserialize)]
pub struct Metadata {
    pub guid: Guid,
}

#[derive(Debug, Deserialize)]
pub struct AppEntity {
    pub name: String,
    #[serde(default)]
    pub instances: u32,
    #[serde(default)]
    pub memory: u64,
    #[serde(default)]
    pub disk_quota: u64,
    #[serde(default)]
    pub state: AppState,
    #[serde(default)]
    pub environment_json: Option<BTreeMap<String, JsonValue>>,
}

#[derive(Debug, Deserialize)]
pub struct DomainEntity {
    pub name: String,
    #[serde(default)]
    pub owning_organization_guid: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SpaceEntity {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct OrganizationEntity {
    pub name: String,
    #[serde(default)]
    pub spaces: Vec<Resource<SpaceEntity>>,
    #[serde(default)]
    pub domains: Vec<Resource<DomainEntity>>,
}

/// Non-string `environment_json` values are kept as their JSON text, so a
/// later `set-env`/`unset-env` writes them back as strings (`8080` becomes
/// `"8080"`).
impl From<Resource<AppEntity>> for Application {
    fn from(r: Resource<AppEntity>) -> Self {
        let environment_vars = r
            .entity
            .environment_json
            .unwrap_or_default()
            .into_iter()
            .map(|(k, v)| {
                let v = match v {
                    JsonValue::String(s) => s,
                    other => other.to_string(),
                };
                (k, v)
            })
            .collect();

        Application {
            guid: r.metadata.guid,
            name: r.entity.name,
            instances: r.entity.instances,
            memory: MemorySize::from_megabytes(r.entity.memory),
            disk_quota: MemorySize::from_megabytes(r.entity.disk_quota),
            state: r.entity.state,
            environment_vars,
        }
    }
}

impl From<Resource<DomainEntity>> for Domain {
    fn from(r: Resource<DomainEntity>) -> Self {
        Domain {
            guid: r.metadata.guid,
            name: r.entity.name,
            shared: r.entity.owning_organization_guid.is_none(),
        }
    }
}

impl From<Resource<SpaceEntity>> for Space {
    fn from(r: Resource<SpaceEntity>) -> Self {
        Space {
            guid: r.metadata.guid,
            name: r.entity.name,
        }
    }
}

impl From<Resource<OrganizationEntity>> for Organization {
    fn from(r: Resource<OrganizationEntity>) -> Self {
        Organization {
            guid: r.metadata.guid,
            name: r.entity.name,
            spaces: r.entity.spaces.into_iter().map(Space::from).collect(),
            domains: r.entity.domains.into_iter().map(Domain::from).collect(),
        }
    }
}
