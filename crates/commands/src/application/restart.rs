use cfctl_auth::Configuration;
use cfctl_core::{AppState, Application};
use cfctl_infra::ApplicationRepository;

use super::in_target;
use crate::command::{Command, UsageError, unresolved};
use crate::context::Context;
use crate::requirements::{Requirement, RequirementFactory, Resolved};
use crate::terminal::Ui;

/// Restarts an application so configuration changes take effect.
///
/// Used directly by `restart` and by commands whose changes only apply after
/// a restart.
pub trait ApplicationRestarter {
    fn restart(&self, app: &Application, ui: &mut dyn Ui);
}

/// `cfctl restart APP`: stop the app unless already stopped, then start it.
pub struct Restart<'a> {
    config: &'a Configuration,
    applications: &'a dyn ApplicationRepository,
}

impl<'a> Restart<'a> {
    pub fn new(config: &'a Configuration, applications: &'a dyn ApplicationRepository) -> Self {
        Self {
            config,
            applications,
        }
    }

    fn stop(&self, app: &Application, ui: &mut dyn Ui) -> bool {
        ui.say(&format!("Stopping app {} {}...", app.name, in_target(self.config)));

        let response = self.applications.stop(app);
        if response.is_not_successful() {
            ui.failed(&response.message());
            return false;
        }
        ui.ok();
        true
    }

    fn start(&self, app: &Application, ui: &mut dyn Ui) {
        ui.say(&format!("Starting app {} {}...", app.name, in_target(self.config)));

        let response = self.applications.start(app);
        if response.is_not_successful() {
            ui.failed(&response.message());
            return;
        }
        ui.ok();
    }
}

impl ApplicationRestarter for Restart<'_> {
    fn restart(&self, app: &Application, ui: &mut dyn Ui) {
        if app.state != AppState::Stopped {
            if !self.stop(app, ui) {
                return;
            }
            ui.say("");
        }
        self.start(app, ui);
    }
}

impl Command for Restart<'_> {
    fn name(&self) -> &'static str {
        "restart"
    }

    fn usage(&self) -> &'static str {
        "cfctl restart APP"
    }

    fn requirements<'f>(
        &self,
        factory: &RequirementFactory<'f>,
        ctx: &Context,
    ) -> Result<Vec<Requirement<'f>>, UsageError> {
        ctx.expect_args(1)?;
        let app = &ctx.args()[0];

        Ok(vec![
            factory.login(),
            factory.targeted_space(),
            factory.application(app),
        ])
    }

    fn run(&self, _ctx: &Context, resolved: &Resolved, ui: &mut dyn Ui) {
        let Some(app) = &resolved.application else {
            return unresolved(ui, self.name(), "application");
        };
        self.restart(app, ui);
    }
}
