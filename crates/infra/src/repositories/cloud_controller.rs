//! Repositories backed by the Cloud Controller v2 REST API.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value as JsonValue, json};

use cfctl_auth::Configuration;
use cfctl_core::{Application, Domain, Entity, Organization, Space};

use crate::net::{ApiResponse, Gateway};

use super::resources::{
    AppEntity, DomainEntity, OrganizationEntity, PaginatedResources, Resource, SpaceEntity,
};
use super::r#trait::{
    AppScale, ApplicationRepository, DomainRepository, Lookup, OrganizationRepository,
    SpaceRepository,
};

/// Fetch a filtered listing and return its first resource, or `NotFound`.
fn find_first<E, T>(gateway: &Gateway, path: &str, name: &str, inline_relations: bool) -> Lookup<T>
where
    E: DeserializeOwned,
    T: Entity + From<Resource<E>>,
{
    let filter = format!("name:{name}");
    let mut query = vec![("q", filter.as_str())];
    if inline_relations {
        query.push(("inline-relations-depth", "1"));
    }

    let page: PaginatedResources<E> = gateway.get_json(path, &query)?;
    page.resources
        .into_iter()
        .next()
        .map(T::from)
        .ok_or_else(|| ApiResponse::entity_not_found(T::KIND, name))
}

#[derive(Debug, Clone)]
pub struct CloudControllerApplicationRepository {
    gateway: Gateway,
    space: Space,
}

impl CloudControllerApplicationRepository {
    pub fn new(gateway: Gateway, config: &Configuration) -> Self {
        Self {
            gateway,
            space: config.space.clone(),
        }
    }

    fn app_path(app: &Application) -> String {
        format!("/v2/apps/{}", app.guid)
    }
}

impl ApplicationRepository for CloudControllerApplicationRepository {
    fn find_by_name(&self, name: &str) -> Lookup<Application> {
        let path = format!("/v2/spaces/{}/apps", self.space.guid);
        find_first::<AppEntity, Application>(&self.gateway, &path, name, true)
    }

    fn scale(&self, app: &Application, scale: &AppScale) -> ApiResponse {
        let mut body = Map::new();
        if scale.instances > 0 {
            body.insert("instances".to_string(), json!(scale.instances));
        }
        if !scale.memory.is_unset() {
            body.insert("memory".to_string(), json!(scale.memory.megabytes()));
        }
        if !scale.disk_quota.is_unset() {
            body.insert("disk_quota".to_string(), json!(scale.disk_quota.megabytes()));
        }

        self.gateway.put_json(&Self::app_path(app), &JsonValue::Object(body))
    }

    fn set_env(&self, app: &Application, vars: &BTreeMap<String, String>) -> ApiResponse {
        self.gateway
            .put_json(&Self::app_path(app), &json!({ "environment_json": vars }))
    }

    fn start(&self, app: &Application) -> ApiResponse {
        self.gateway
            .put_json(&Self::app_path(app), &json!({ "state": "STARTED" }))
    }

    fn stop(&self, app: &Application) -> ApiResponse {
        self.gateway
            .put_json(&Self::app_path(app), &json!({ "state": "STOPPED" }))
    }
}

#[derive(Debug, Clone)]
pub struct CloudControllerDomainRepository {
    gateway: Gateway,
}

impl CloudControllerDomainRepository {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    fn mapping_path(domain: &Domain, space: &Space) -> String {
        format!("/v2/spaces/{}/domains/{}", space.guid, domain.guid)
    }
}

impl DomainRepository for CloudControllerDomainRepository {
    fn find_by_name_in_org(&self, name: &str, org: &Organization) -> Lookup<Domain> {
        let path = format!("/v2/organizations/{}/domains", org.guid);
        find_first::<DomainEntity, Domain>(&self.gateway, &path, name, false)
    }

    fn map_domain(&self, domain: &Domain, space: &Space) -> ApiResponse {
        self.gateway.put(&Self::mapping_path(domain, space))
    }

    fn unmap_domain(&self, domain: &Domain, space: &Space) -> ApiResponse {
        self.gateway.delete(&Self::mapping_path(domain, space), &[])
    }

    fn delete(&self, domain: &Domain) -> ApiResponse {
        self.gateway
            .delete(&format!("/v2/domains/{}", domain.guid), &[("recursive", "true")])
    }
}

#[derive(Debug, Clone)]
pub struct CloudControllerSpaceRepository {
    gateway: Gateway,
    organization: Organization,
}

impl CloudControllerSpaceRepository {
    pub fn new(gateway: Gateway, config: &Configuration) -> Self {
        Self {
            gateway,
            organization: config.organization.clone(),
        }
    }
}

impl SpaceRepository for CloudControllerSpaceRepository {
    fn find_by_name(&self, name: &str) -> Lookup<Space> {
        let path = format!("/v2/organizations/{}/spaces", self.organization.guid);
        find_first::<SpaceEntity, Space>(&self.gateway, &path, name, false)
    }
}

#[derive(Debug, Clone)]
pub struct CloudControllerOrganizationRepository {
    gateway: Gateway,
}

impl CloudControllerOrganizationRepository {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }
}

impl OrganizationRepository for CloudControllerOrganizationRepository {
    fn find_by_name(&self, name: &str) -> Lookup<Organization> {
        find_first::<OrganizationEntity, Organization>(&self.gateway, "/v2/organizations", name, true)
    }
}
