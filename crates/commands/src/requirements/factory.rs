use std::cell::Cell;

use cfctl_auth::Configuration;
use cfctl_infra::RepositoryLocator;

use super::{Requirement, RequirementKind};

/// Builds requirements bound to one invocation's configuration and
/// repositories.
///
/// Commands ask for requirements in the order they must be checked:
/// authentication and targeting before any entity lookup.
#[derive(Debug)]
pub struct RequirementFactory<'a> {
    config: &'a Configuration,
    repositories: &'a RepositoryLocator,
    built: Cell<usize>,
}

impl<'a> RequirementFactory<'a> {
    pub fn new(config: &'a Configuration, repositories: &'a RepositoryLocator) -> Self {
        Self {
            config,
            repositories,
            built: Cell::new(0),
        }
    }

    pub fn config(&self) -> &'a Configuration {
        self.config
    }

    /// Number of requirements built so far.
    pub fn built(&self) -> usize {
        self.built.get()
    }

    /// Build a requirement by kind. `name` is ignored by kinds that do not
    /// look an entity up.
    pub fn get_requirement(&self, kind: RequirementKind, name: &str) -> Requirement<'a> {
        self.built.set(self.built.get() + 1);
        tracing::trace!(?kind, name, "building requirement");

        let config = self.config;
        let repos = self.repositories;
        match kind {
            RequirementKind::Login => Requirement::Login { config },
            RequirementKind::ValidAccessToken => Requirement::ValidAccessToken {
                applications: repos.applications(),
            },
            RequirementKind::TargetedOrg => Requirement::TargetedOrg { config },
            RequirementKind::TargetedSpace => Requirement::TargetedSpace { config },
            RequirementKind::Application => Requirement::Application {
                name: name.to_string(),
                applications: repos.applications(),
            },
            RequirementKind::Domain => Requirement::Domain {
                name: name.to_string(),
                organization: &config.organization,
                domains: repos.domains(),
            },
            RequirementKind::Space => Requirement::Space {
                name: name.to_string(),
                spaces: repos.spaces(),
            },
            RequirementKind::Organization => Requirement::Organization {
                name: name.to_string(),
                organizations: repos.organizations(),
            },
        }
    }

    pub fn login(&self) -> Requirement<'a> {
        self.get_requirement(RequirementKind::Login, "")
    }

    pub fn valid_access_token(&self) -> Requirement<'a> {
        self.get_requirement(RequirementKind::ValidAccessToken, "")
    }

    pub fn targeted_org(&self) -> Requirement<'a> {
        self.get_requirement(RequirementKind::TargetedOrg, "")
    }

    pub fn targeted_space(&self) -> Requirement<'a> {
        self.get_requirement(RequirementKind::TargetedSpace, "")
    }

    pub fn application(&self, name: &str) -> Requirement<'a> {
        self.get_requirement(RequirementKind::Application, name)
    }

    /// Domain lookup scoped to the targeted organization.
    pub fn domain(&self, name: &str) -> Requirement<'a> {
        self.get_requirement(RequirementKind::Domain, name)
    }

    pub fn space(&self, name: &str) -> Requirement<'a> {
        self.get_requirement(RequirementKind::Space, name)
    }

    pub fn organization(&self, name: &str) -> Requirement<'a> {
        self.get_requirement(RequirementKind::Organization, name)
    }
}
