use cfctl_auth::Configuration;
use cfctl_core::Entity;

use crate::command::{Command, UsageError, unresolved};
use crate::context::Context;
use crate::requirements::{Requirement, RequirementFactory, Resolved};
use crate::terminal::Ui;

/// `cfctl org ORG`: show an organization with its domains and spaces.
pub struct ShowOrg<'a> {
    config: &'a Configuration,
}

impl<'a> ShowOrg<'a> {
    pub fn new(config: &'a Configuration) -> Self {
        Self { config }
    }
}

fn names<T: Entity>(entities: &[T]) -> String {
    entities.iter().map(|e| e.name()).collect::<Vec<_>>().join(", ")
}

impl Command for ShowOrg<'_> {
    fn name(&self) -> &'static str {
        "org"
    }

    fn usage(&self) -> &'static str {
        "cfctl org ORG"
    }

    fn requirements<'f>(
        &self,
        factory: &RequirementFactory<'f>,
        ctx: &Context,
    ) -> Result<Vec<Requirement<'f>>, UsageError> {
        ctx.expect_args(1)?;

        Ok(vec![
            factory.login(),
            factory.valid_access_token(),
            factory.organization(&ctx.args()[0]),
        ])
    }

    fn run(&self, _ctx: &Context, resolved: &Resolved, ui: &mut dyn Ui) {
        let Some(org) = &resolved.organization else {
            return unresolved(ui, self.name(), "organization");
        };

        ui.say(&format!(
            "Getting info for org {} as {}...",
            org.name,
            self.config.username()
        ));
        ui.ok();
        ui.say("");
        ui.say(&format!("{}:", org.name));
        ui.say(&format!("  guid: {}", org.guid));
        ui.say(&format!("  domains: {}", names(&org.domains)));
        ui.say(&format!("  spaces: {}", names(&org.spaces)));
    }
}
