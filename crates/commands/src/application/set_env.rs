use cfctl_auth::Configuration;
use cfctl_infra::ApplicationRepository;

use super::{RESTART_TIP, in_target};
use crate::command::{Command, UsageError, unresolved};
use crate::context::{Context, positionals};
use crate::requirements::{Requirement, RequirementFactory, Resolved};
use crate::terminal::Ui;

/// `cfctl set-env APP NAME VALUE`
pub struct SetEnv<'a> {
    config: &'a Configuration,
    applications: &'a dyn ApplicationRepository,
}

impl<'a> SetEnv<'a> {
    pub fn new(config: &'a Configuration, applications: &'a dyn ApplicationRepository) -> Self {
        Self {
            config,
            applications,
        }
    }
}

impl Command for SetEnv<'_> {
    fn name(&self) -> &'static str {
        "set-env"
    }

    fn usage(&self) -> &'static str {
        "cfctl set-env APP NAME VALUE"
    }

    fn arguments(&self) -> clap::Command {
        clap::Command::new(self.name())
            .arg(positionals().trailing_var_arg(true).allow_hyphen_values(true))
    }

    fn requirements<'f>(
        &self,
        factory: &RequirementFactory<'f>,
        ctx: &Context,
    ) -> Result<Vec<Requirement<'f>>, UsageError> {
        ctx.expect_args(3)?;

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
        let (name, value) = (&ctx.args()[1], &ctx.args()[2]);

        ui.say(&format!(
            "Setting env variable {name} for app {} {}...",
            app.name,
            in_target(self.config)
        ));

        let mut vars = app.environment_vars.clone();
        vars.insert(name.clone(), value.clone());

        let response = self.applications.set_env(app, &vars);
        if response.is_not_successful() {
            ui.failed(&format!("Failed setting env variables.\n{}", response.message()));
            return;
        }
        ui.ok();
        ui.say(RESTART_TIP);
    }
}
