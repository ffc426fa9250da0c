use cfctl_auth::Configuration;
use cfctl_infra::ApplicationRepository;

use super::{RESTART_TIP, in_target};
use crate::command::{Command, UsageError, unresolved};
use crate::context::Context;
use crate::requirements::{Requirement, RequirementFactory, Resolved};
use crate::terminal::Ui;

/// `cfctl unset-env APP NAME`
///
/// Removing a variable that is not set is reported but not sent.
pub struct UnsetEnv<'a> {
    config: &'a Configuration,
    applications: &'a dyn ApplicationRepository,
}

impl<'a> UnsetEnv<'a> {
    pub fn new(config: &'a Configuration, applications: &'a dyn ApplicationRepository) -> Self {
        Self {
            config,
            applications,
        }
    }
}

impl Command for UnsetEnv<'_> {
    fn name(&self) -> &'static str {
        "unset-env"
    }

    fn usage(&self) -> &'static str {
        "cfctl unset-env APP NAME"
    }

    fn requirements<'f>(
        &self,
        factory: &RequirementFactory<'f>,
        ctx: &Context,
    ) -> Result<Vec<Requirement<'f>>, UsageError> {
        ctx.expect_args(2)?;

        Ok(vec![
            factory.login(),
            factory.targeted_space(),
            factory.application(&ctx.args()[0]),
        ])
    }

    fn run(&self, ctx: &Context, resolved: &Resolved, ui: &mut dyn Ui) {
        let Some(app) = &resolved.application else {
            return unresolved(ui, self.name(), "application");
        };
        let name = &ctx.args()[1];

        ui.say(&format!(
            "Removing env variable {name} from app {} {}...",
            app.name,
            in_target(self.config)
        ));

        let mut vars = app.environment_vars.clone();
        if vars.remove(name).is_none() {
            ui.ok();
            ui.warn(&format!("Env variable {name} was not set."));
            return;
        }

        let response = self.applications.set_env(app, &vars);
        if response.is_not_successful() {
            ui.failed(&format!("Failed setting env variables.\n{}", response.message()));
            return;
        }
        ui.ok();
        ui.say(RESTART_TIP);
    }
}
