//! Command name to constructor mapping.

use cfctl_auth::Configuration;
use cfctl_infra::RepositoryLocator;

use crate::application::{Restart, Scale, SetEnv, UnsetEnv};
use crate::command::Command;
use crate::domain::{DeleteDomain, DomainMapper};
use crate::organization::ShowOrg;

/// Everything a command may borrow for one invocation.
#[derive(Debug, Clone, Copy)]
pub struct Dependencies<'a> {
    pub config: &'a Configuration,
    pub repositories: &'a RepositoryLocator,
}

impl<'a> Dependencies<'a> {
    pub fn new(config: &'a Configuration, repositories: &'a RepositoryLocator) -> Self {
        Self {
            config,
            repositories,
        }
    }
}

const NAMES: &[&str] = &[
    "scale",
    "restart",
    "set-env",
    "unset-env",
    "map-domain",
    "unmap-domain",
    "delete-domain",
    "org",
];

/// Every registered command name.
pub fn names() -> &'static [&'static str] {
    NAMES
}

/// Construct the command registered under `name`.
pub fn build<'a>(name: &str, deps: Dependencies<'a>) -> Option<Box<dyn Command + 'a>> {
    let config = deps.config;
    let apps = deps.repositories.applications();
    let domains = deps.repositories.domains();

    let command: Box<dyn Command + 'a> = match name {
        "scale" => Box::new(Scale::new(config, apps, Box::new(Restart::new(config, apps)))),
        "restart" => Box::new(Restart::new(config, apps)),
        "set-env" => Box::new(SetEnv::new(config, apps)),
        "unset-env" => Box::new(UnsetEnv::new(config, apps)),
        "map-domain" => Box::new(DomainMapper::map(config, domains)),
        "unmap-domain" => Box::new(DomainMapper::unmap(config, domains)),
        "delete-domain" => Box::new(DeleteDomain::new(config, domains)),
        "org" => Box::new(ShowOrg::new(config)),
        _ => return None,
    };
    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfctl_infra::repositories::{
        InMemoryApplicationRepository, InMemoryDomainRepository, InMemoryOrganizationRepository,
        InMemorySpaceRepository,
    };

    #[test]
    fn every_name_builds_a_command_with_that_name() {
        let config = Configuration::default();
        let repos = RepositoryLocator::new(
            Box::new(InMemoryApplicationRepository::new()),
            Box::new(InMemoryDomainRepository::new()),
            Box::new(InMemorySpaceRepository::new()),
            Box::new(InMemoryOrganizationRepository::new()),
        );
        let deps = Dependencies::new(&config, &repos);

        for name in names() {
            let command = build(name, deps).unwrap();
            assert_eq!(command.name(), *name);
            assert!(command.usage().contains(name));
        }
        assert!(build("push", deps).is_none());
    }
}
