use std::collections::BTreeMap;
use std::sync::Arc;

use cfctl_core::{Application, Domain, MemorySize, Organization, Space};

use crate::net::ApiResponse;

/// Result of a lookup: the entity, or the response explaining its absence.
///
/// The error side is always `NotFound` or `Error`, never `Success`.
pub type Lookup<T> = Result<T, ApiResponse>;

/// Requested scaling change. Zero fields are left untouched remotely.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct AppScale {
    pub instances: u32,
    pub memory: MemorySize,
    pub disk_quota: MemorySize,
}

impl AppScale {
    /// True when every field is zero, so nothing would change remotely.
    pub fn is_empty(&self) -> bool {
        self.instances == 0 && self.memory.is_unset() && self.disk_quota.is_unset()
    }

    /// True when the change requires the app to be restarted to take effect.
    pub fn requires_restart(&self) -> bool {
        !self.memory.is_unset() || !self.disk_quota.is_unset()
    }
}

/// Gateway to applications in the targeted space.
///
/// ## Contract
///
/// - `find_by_name` returns `NotFound` (not `Error`) when no app has that name
/// - mutators return only an `ApiResponse`; all side effects are remote
/// - implementations hold no state between calls and never panic on remote failure
pub trait ApplicationRepository {
    fn find_by_name(&self, name: &str) -> Lookup<Application>;

    fn scale(&self, app: &Application, scale: &AppScale) -> ApiResponse;

    /// Replace the app's environment variables with `vars`.
    fn set_env(&self, app: &Application, vars: &BTreeMap<String, String>) -> ApiResponse;

    fn start(&self, app: &Application) -> ApiResponse;

    fn stop(&self, app: &Application) -> ApiResponse;
}

/// Gateway to domains and their space mappings.
pub trait DomainRepository {
    /// Look a domain up among those visible to `org` (owned or shared).
    fn find_by_name_in_org(&self, name: &str, org: &Organization) -> Lookup<Domain>;

    fn map_domain(&self, domain: &Domain, space: &Space) -> ApiResponse;

    fn unmap_domain(&self, domain: &Domain, space: &Space) -> ApiResponse;

    fn delete(&self, domain: &Domain) -> ApiResponse;
}

/// Gateway to spaces of the targeted organization.
pub trait SpaceRepository {
    fn find_by_name(&self, name: &str) -> Lookup<Space>;
}

/// Gateway to organizations visible to the current user.
pub trait OrganizationRepository {
    /// Look an organization up, including its spaces and domains.
    fn find_by_name(&self, name: &str) -> Lookup<Organization>;
}

impl<R> ApplicationRepository for Arc<R>
where
    R: ApplicationRepository + ?Sized,
{
    fn find_by_name(&self, name: &str) -> Lookup<Application> {
        (**self).find_by_name(name)
    }

    fn scale(&self, app: &Application, scale: &AppScale) -> ApiResponse {
        (**self).scale(app, scale)
    }

    fn set_env(&self, app: &Application, vars: &BTreeMap<String, String>) -> ApiResponse {
        (**self).set_env(app, vars)
    }

    fn start(&self, app: &Application) -> ApiResponse {
        (**self).start(app)
    }

    fn stop(&self, app: &Application) -> ApiResponse {
        (**self).stop(app)
    }
}

impl<R> DomainRepository for Arc<R>
where
    R: DomainRepository + ?Sized,
{
    fn find_by_name_in_org(&self, name: &str, org: &Organization) -> Lookup<Domain> {
        (**self).find_by_name_in_org(name, org)
    }

    fn map_domain(&self, domain: &Domain, space: &Space) -> ApiResponse {
        (**self).map_domain(domain, space)
    }

    fn unmap_domain(&self, domain: &Domain, space: &Space) -> ApiResponse {
        (**self).unmap_domain(domain, space)
    }

    fn delete(&self, domain: &Domain) -> ApiResponse {
        (**self).delete(domain)
    }
}

impl<R> SpaceRepository for Arc<R>
where
    R: SpaceRepository + ?Sized,
{
    fn find_by_name(&self, name: &str) -> Lookup<Space> {
        (**self).find_by_name(name)
    }
}

impl<R> OrganizationRepository for Arc<R>
where
    R: OrganizationRepository + ?Sized,
{
    fn find_by_name(&self, name: &str) -> Lookup<Organization> {
        (**self).find_by_name(name)
    }
}
