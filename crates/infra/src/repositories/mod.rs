//! Repository contracts and their implementations.
//!
//! - `trait`: the four repository contracts commands depend on
//! - `cloud_controller`: REST implementations over [`crate::net::Gateway`]
//! - `in_memory`: recording implementations for tests and dry runs

pub mod cloud_controller;
pub mod in_memory;
mod resources;
pub mod r#trait;

use std::time::Duration;

use cfctl_auth::Configuration;

use crate::net::{Gateway, GatewayError};

pub use cloud_controller::{
    CloudControllerApplicationRepository, CloudControllerDomainRepository,
    CloudControllerOrganizationRepository, CloudControllerSpaceRepository,
};
pub use in_memory::{
    AppCall, DomainCall, InMemoryApplicationRepository, InMemoryDomainRepository,
    InMemoryOrganizationRepository, InMemorySpaceRepository,
};
pub use r#trait::{
    AppScale, ApplicationRepository, DomainRepository, Lookup, OrganizationRepository,
    SpaceRepository,
};

/// Owns one instance of every repository for the lifetime of a run.
///
/// Commands and requirements borrow from the locator; nothing is shared
/// across runs.
pub struct RepositoryLocator {
    applications: Box<dyn ApplicationRepository>,
    domains: Box<dyn DomainRepository>,
    spaces: Box<dyn SpaceRepository>,
    organizations: Box<dyn OrganizationRepository>,
}

impl RepositoryLocator {
    pub fn new(
        applications: Box<dyn ApplicationRepository>,
        domains: Box<dyn DomainRepository>,
        spaces: Box<dyn SpaceRepository>,
        organizations: Box<dyn OrganizationRepository>,
    ) -> Self {
        Self {
            applications,
            domains,
            spaces,
            organizations,
        }
    }

    /// Wire every repository to the Cloud Controller named in `config`.
    pub fn cloud_controller(config: &Configuration, timeout: Duration) -> Result<Self, GatewayError> {
        let gateway = Gateway::with_timeout(config, timeout)?;
        tracing::debug!(api = gateway.base_url(), "repositories bound to cloud controller");

        Ok(Self::new(
            Box::new(CloudControllerApplicationRepository::new(gateway.clone(), config)),
            Box::new(CloudControllerDomainRepository::new(gateway.clone())),
            Box::new(CloudControllerSpaceRepository::new(gateway.clone(), config)),
            Box::new(CloudControllerOrganizationRepository::new(gateway)),
        ))
    }

    pub fn applications(&self) -> &dyn ApplicationRepository {
        self.applications.as_ref()
    }

    pub fn domains(&self) -> &dyn DomainRepository {
        self.domains.as_ref()
    }

    pub fn spaces(&self) -> &dyn SpaceRepository {
        self.spaces.as_ref()
    }

    pub fn organizations(&self) -> &dyn OrganizationRepository {
        self.organizations.as_ref()
    }
}

impl core::fmt::Debug for RepositoryLocator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RepositoryLocator").finish_non_exhaustive()
    }
}
