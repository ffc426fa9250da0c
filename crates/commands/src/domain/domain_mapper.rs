use cfctl_auth::Configuration;
use cfctl_infra::DomainRepository;

use crate::command::{Command, UsageError, unresolved};
use crate::context::Context;
use crate::requirements::{Requirement, RequirementFactory, Resolved};
use crate::terminal::Ui;

/// `cfctl map-domain SPACE DOMAIN` and `cfctl unmap-domain SPACE DOMAIN`.
///
/// The space is checked as a requirement; the domain is looked up by the
/// action within the targeted organization.
pub struct DomainMapper<'a> {
    config: &'a Configuration,
    domains: &'a dyn DomainRepository,
    bind: bool,
}

impl<'a> DomainMapper<'a> {
    pub fn map(config: &'a Configuration, domains: &'a dyn DomainRepository) -> Self {
        Self {
            config,
            domains,
            bind: true,
        }
    }

    pub fn unmap(config: &'a Configuration, domains: &'a dyn DomainRepository) -> Self {
        Self {
            config,
            domains,
            bind: false,
        }
    }
}

impl Command for DomainMapper<'_> {
    fn name(&self) -> &'static str {
        if self.bind { "map-domain" } else { "unmap-domain" }
    }

    fn usage(&self) -> &'static str {
        if self.bind {
            "cfctl map-domain SPACE DOMAIN"
        } else {
            "cfctl unmap-domain SPACE DOMAIN"
        }
    }

    fn requirements<'f>(
        &self,
        factory: &RequirementFactory<'f>,
        ctx: &Context,
    ) -> Result<Vec<Requirement<'f>>, UsageError> {
        ctx.expect_args(2)?;

        Ok(vec![
            factory.login(),
            factory.targeted_org(),
            factory.space(&ctx.args()[0]),
        ])
    }

    fn run(&self, ctx: &Context, resolved: &Resolved, ui: &mut dyn Ui) {
        let (Some(space), Some(org)) = (&resolved.space, &resolved.organization) else {
            return unresolved(ui, self.name(), "space or organization");
        };
        let domain_name = &ctx.args()[1];
        let user = self.config.username();

        if self.bind {
            ui.say(&format!(
                "Mapping domain {domain_name} to space {} in org {} as {user}...",
                space.name, org.name
            ));
        } else {
            ui.say(&format!(
                "Unmapping domain {domain_name} from space {} in org {} as {user}...",
                space.name, org.name
            ));
        }

        let domain = match self.domains.find_by_name_in_org(domain_name, org) {
            Ok(domain) => domain,
            Err(response) => return ui.failed(&response.message()),
        };

        let response = if self.bind {
            self.domains.map_domain(&domain, space)
        } else {
            self.domains.unmap_domain(&domain, space)
        };
        if response.is_not_successful() {
            ui.failed(&response.message());
            return;
        }
        ui.ok();
    }
}
