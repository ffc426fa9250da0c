//! In-memory repositories for tests and local dry runs.
//!
//! Each repository keeps its records behind a lock and records every call,
//! so tests can assert whether a mutator ran and with which arguments.
//! Failures can be forced per repository to exercise not-found and error
//! paths without a server.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard};

use cfctl_core::{AppState, Application, Domain, Entity, Guid, Organization, Space};

use crate::net::ApiResponse;

use super::r#trait::{
    AppScale, ApplicationRepository, DomainRepository, Lookup, OrganizationRepository,
    SpaceRepository,
};

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    // A panicking test thread must not hide the recorded calls from the others.
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn find_named<T: Entity + Clone>(records: &[T], name: &str) -> Lookup<T> {
    records
        .iter()
        .find(|r| r.name() == name)
        .cloned()
        .ok_or_else(|| ApiResponse::entity_not_found(T::KIND, name))
}

/// A call made against [`InMemoryApplicationRepository`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCall {
    FindByName(String),
    Scale { app: Application, scale: AppScale },
    SetEnv { app: Application, vars: BTreeMap<String, String> },
    Start(Guid),
    Stop(Guid),
}

impl AppCall {
    pub fn is_mutation(&self) -> bool {
        !matches!(self, AppCall::FindByName(_))
    }
}

#[derive(Debug, Default)]
pub struct InMemoryApplicationRepository {
    apps: Mutex<Vec<Application>>,
    lookup_failure: Mutex<Option<ApiResponse>>,
    mutation_failure: Mutex<Option<ApiResponse>>,
    calls: Mutex<Vec<AppCall>>,
}

impl InMemoryApplicationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_app(self, app: Application) -> Self {
        lock(&self.apps).push(app);
        self
    }

    /// Answer every lookup with `response` instead of consulting the records.
    pub fn fail_lookups_with(&self, response: ApiResponse) {
        *lock(&self.lookup_failure) = Some(response);
    }

    /// Answer every mutator with `response` and leave the records untouched.
    pub fn fail_mutations_with(&self, response: ApiResponse) {
        *lock(&self.mutation_failure) = Some(response);
    }

    pub fn calls(&self) -> Vec<AppCall> {
        lock(&self.calls).clone()
    }

    pub fn mutations(&self) -> Vec<AppCall> {
        self.calls().into_iter().filter(AppCall::is_mutation).collect()
    }

    pub fn app(&self, name: &str) -> Option<Application> {
        lock(&self.apps).iter().find(|a| a.name == name).cloned()
    }

    fn mutate(&self, call: AppCall, guid: &Guid, apply: impl FnOnce(&mut Application)) -> ApiResponse {
        lock(&self.calls).push(call);

        if let Some(failure) = lock(&self.mutation_failure).clone() {
            return failure;
        }

        let mut apps = lock(&self.apps);
        match apps.iter_mut().find(|a| &a.guid == guid) {
            Some(app) => {
                apply(app);
                ApiResponse::success()
            }
            None => ApiResponse::with_status(format!("App {guid} not found"), 404, None),
        }
    }
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn find_by_name(&self, name: &str) -> Lookup<Application> {
        lock(&self.calls).push(AppCall::FindByName(name.to_string()));

        if let Some(failure) = lock(&self.lookup_failure).clone() {
            return Err(failure);
        }
        find_named(&lock(&self.apps), name)
    }

    fn scale(&self, app: &Application, scale: &AppScale) -> ApiResponse {
        let call = AppCall::Scale {
            app: app.clone(),
            scale: *scale,
        };
        self.mutate(call, &app.guid, |stored| {
            if scale.instances > 0 {
                stored.instances = scale.instances;
            }
            if !scale.memory.is_unset() {
                stored.memory = scale.memory;
            }
            if !scale.disk_quota.is_unset() {
                stored.disk_quota = scale.disk_quota;
            }
        })
    }

    fn set_env(&self, app: &Application, vars: &BTreeMap<String, String>) -> ApiResponse {
        let call = AppCall::SetEnv {
            app: app.clone(),
            vars: vars.clone(),
        };
        self.mutate(call, &app.guid, |stored| stored.environment_vars = vars.clone())
    }

    fn start(&self, app: &Application) -> ApiResponse {
        self.mutate(AppCall::Start(app.guid.clone()), &app.guid, |stored| {
            stored.state = AppState::Started
        })
    }

    fn stop(&self, app: &Application) -> ApiResponse {
        self.mutate(AppCall::Stop(app.guid.clone()), &app.guid, |stored| {
            stored.state = AppState::Stopped
        })
    }
}

/// A call made against [`InMemoryDomainRepository`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainCall {
    FindByNameInOrg { name: String, org: Guid },
    Map { domain: Domain, space: Space },
    Unmap { domain: Domain, space: Space },
    Delete(Domain),
}

impl DomainCall {
    pub fn is_mutation(&self) -> bool {
        !matches!(self, DomainCall::FindByNameInOrg { .. })
    }
}

#[derive(Debug, Default)]
pub struct InMemoryDomainRepository {
    domains: Mutex<Vec<Domain>>,
    mappings: Mutex<BTreeSet<(Guid, Guid)>>,
    lookup_failure: Mutex<Option<ApiResponse>>,
    mutation_failure: Mutex<Option<ApiResponse>>,
    calls: Mutex<Vec<DomainCall>>,
}

impl InMemoryDomainRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a domain visible to every organization.
    pub fn with_domain(self, domain: Domain) -> Self {
        lock(&self.domains).push(domain);
        self
    }

    pub fn fail_lookups_with(&self, response: ApiResponse) {
        *lock(&self.lookup_failure) = Some(response);
    }

    pub fn fail_mutations_with(&self, response: ApiResponse) {
        *lock(&self.mutation_failure) = Some(response);
    }

    pub fn calls(&self) -> Vec<DomainCall> {
        lock(&self.calls).clone()
    }

    pub fn mutations(&self) -> Vec<DomainCall> {
        self.calls().into_iter().filter(DomainCall::is_mutation).collect()
    }

    pub fn is_mapped(&self, domain: &Domain, space: &Space) -> bool {
        lock(&self.mappings).contains(&(domain.guid.clone(), space.guid.clone()))
    }

    fn record(&self, call: DomainCall) -> Option<ApiResponse> {
        lock(&self.calls).push(call);
        lock(&self.mutation_failure).clone()
    }
}

impl DomainRepository for InMemoryDomainRepository {
    fn find_by_name_in_org(&self, name: &str, org: &Organization) -> Lookup<Domain> {
        lock(&self.calls).push(DomainCall::FindByNameInOrg {
            name: name.to_string(),
            org: org.guid.clone(),
        });

        if let Some(failure) = lock(&self.lookup_failure).clone() {
            return Err(failure);
        }
        find_named(&lock(&self.domains), name)
    }

    fn map_domain(&self, domain: &Domain, space: &Space) -> ApiResponse {
        let call = DomainCall::Map {
            domain: domain.clone(),
            space: space.clone(),
        };
        if let Some(failure) = self.record(call) {
            return failure;
        }
        lock(&self.mappings).insert((domain.guid.clone(), space.guid.clone()));
        ApiResponse::success()
    }

    fn unmap_domain(&self, domain: &Domain, space: &Space) -> ApiResponse {
        let call = DomainCall::Unmap {
            domain: domain.clone(),
            space: space.clone(),
        };
        if let Some(failure) = self.record(call) {
            return failure;
        }
        lock(&self.mappings).remove(&(domain.guid.clone(), space.guid.clone()));
        ApiResponse::success()
    }

    fn delete(&self, domain: &Domain) -> ApiResponse {
        if let Some(failure) = self.record(DomainCall::Delete(domain.clone())) {
            return failure;
        }
        lock(&self.domains).retain(|d| d.guid != domain.guid);
        lock(&self.mappings).retain(|(d, _)| d != &domain.guid);
        ApiResponse::success()
    }
}

#[derive(Debug, Default)]
pub struct InMemorySpaceRepository {
    spaces: Mutex<Vec<Space>>,
    lookup_failure: Mutex<Option<ApiResponse>>,
    lookups: Mutex<Vec<String>>,
}

impl InMemorySpaceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_space(self, space: Space) -> Self {
        lock(&self.spaces).push(space);
        self
    }

    pub fn fail_lookups_with(&self, response: ApiResponse) {
        *lock(&self.lookup_failure) = Some(response);
    }

    pub fn lookups(&self) -> Vec<String> {
        lock(&self.lookups).clone()
    }
}

impl SpaceRepository for InMemorySpaceRepository {
    fn find_by_name(&self, name: &str) -> Lookup<Space> {
        lock(&self.lookups).push(name.to_string());

        if let Some(failure) = lock(&self.lookup_failure).clone() {
            return Err(failure);
        }
        find_named(&lock(&self.spaces), name)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryOrganizationRepository {
    organizations: Mutex<Vec<Organization>>,
    lookup_failure: Mutex<Option<ApiResponse>>,
    lookups: Mutex<Vec<String>>,
}

impl InMemoryOrganizationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_organization(self, org: Organization) -> Self {
        lock(&self.organizations).push(org);
        self
    }

    pub fn fail_lookups_with(&self, response: ApiResponse) {
        *lock(&self.lookup_failure) = Some(response);
    }

    pub fn lookups(&self) -> Vec<String> {
        lock(&self.lookups).clone()
    }
}

impl OrganizationRepository for InMemoryOrganizationRepository {
    fn find_by_name(&self, name: &str) -> Lookup<Organization> {
        lock(&self.lookups).push(name.to_string());

        if let Some(failure) = lock(&self.lookup_failure).clone() {
            return Err(failure);
        }
        find_named(&lock(&self.organizations), name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfctl_core::MemorySize;

    #[test]
    fn lookup_of_unknown_app_is_not_found_and_names_it() {
        let repo = InMemoryApplicationRepository::new();
        let err = repo.find_by_name("ghost").unwrap_err();

        assert!(err.is_not_found());
        assert!(err.message().contains("ghost"));
        assert!(repo.mutations().is_empty());
    }

    #[test]
    fn scale_updates_only_the_requested_fields() {
        let mut app = Application::new("my-app", "my-app-guid");
        app.instances = 1;
        app.memory = MemorySize::from_megabytes(256);
        let repo = InMemoryApplicationRepository::new().with_app(app.clone());

        let scale = AppScale {
            instances: 3,
            ..AppScale::default()
        };
        assert!(repo.scale(&app, &scale).is_successful());

        let stored = repo.app("my-app").unwrap();
        assert_eq!(stored.instances, 3);
        assert_eq!(stored.memory.megabytes(), 256);
    }

    #[test]
    fn forced_mutation_failure_leaves_records_untouched() {
        let app = Application::new("my-app", "my-app-guid").with_env("foo", "bar");
        let repo = InMemoryApplicationRepository::new().with_app(app.clone());
        repo.fail_mutations_with(ApiResponse::with_error("Did not work", "bummer"));

        let response = repo.set_env(&app, &BTreeMap::new());
        assert!(response.is_error());
        assert_eq!(repo.app("my-app").unwrap().environment_vars.len(), 1);
        assert_eq!(repo.mutations().len(), 1);
    }

    #[test]
    fn map_then_unmap_domain() {
        let domain = Domain::new("foo.com", "foo-guid");
        let space = Space::new("my-space", "my-space-guid");
        let repo = InMemoryDomainRepository::new().with_domain(domain.clone());

        assert!(repo.map_domain(&domain, &space).is_successful());
        assert!(repo.is_mapped(&domain, &space));

        assert!(repo.unmap_domain(&domain, &space).is_successful());
        assert!(!repo.is_mapped(&domain, &space));
        assert_eq!(repo.mutations().len(), 2);
    }

    #[test]
    fn delete_removes_domain_from_lookups() {
        let domain = Domain::new("foo.com", "foo-guid");
        let org = Organization::new("my-org", "my-org-guid");
        let repo = InMemoryDomainRepository::new().with_domain(domain.clone());

        assert!(repo.delete(&domain).is_successful());
        assert!(repo.find_by_name_in_org("foo.com", &org).unwrap_err().is_not_found());
    }
}
