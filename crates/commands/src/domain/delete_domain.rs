use cfctl_auth::Configuration;
use cfctl_infra::DomainRepository;

use crate::command::{Command, UsageError, unresolved};
use crate::context::Context;
use crate::requirements::{Requirement, RequirementFactory, Resolved};
use crate::terminal::Ui;

/// `cfctl delete-domain DOMAIN`: delete a domain and its routes.
pub struct DeleteDomain<'a> {
    config: &'a Configuration,
    domains: &'a dyn DomainRepository,
}

impl<'a> DeleteDomain<'a> {
    pub fn new(config: &'a Configuration, domains: &'a dyn DomainRepository) -> Self {
        Self { config, domains }
    }
}

impl Command for DeleteDomain<'_> {
    fn name(&self) -> &'static str {
        "delete-domain"
    }

    fn usage(&self) -> &'static str {
        "cfctl delete-domain DOMAIN"
    }

    fn requirements<'f>(
        &self,
        factory: &RequirementFactory<'f>,
        ctx: &Context,
    ) -> Result<Vec<Requirement<'f>>, UsageError> {
        ctx.expect_args(1)?;

        Ok(vec![
            factory.login(),
            factory.targeted_org(),
            factory.domain(&ctx.args()[0]),
        ])
    }

    fn run(&self, _ctx: &Context, resolved: &Resolved, ui: &mut dyn Ui) {
        let Some(domain) = &resolved.domain else {
            return unresolved(ui, self.name(), "domain");
        };

        ui.say(&format!(
            "Deleting domain {} as {}...",
            domain.name,
            self.config.username()
        ));

        let response = self.domains.delete(domain);
        if response.is_not_successful() {
            ui.failed(&format!(
                "Error deleting domain {}\n{}",
                domain.name,
                response.message()
            ));
            return;
        }
        ui.ok();
    }
}
