use clap::{Arg, value_parser};

use cfctl_auth::Configuration;
use cfctl_core::MemorySize;
use cfctl_infra::{AppScale, ApplicationRepository};

use super::{ApplicationRestarter, in_target};
use crate::command::{Command, UsageError, unresolved};
use crate::context::Context;
use crate::requirements::{Requirement, RequirementFactory, Resolved};
use crate::terminal::Ui;

const INSTANCES: &str = "instances";
const MEMORY: &str = "memory";
const DISK: &str = "disk";

/// `cfctl scale [-i INSTANCES] [-m MEMORY] [-k DISK] APP`
///
/// Flags left out stay unchanged remotely. Memory and disk changes only
/// apply after a restart, which is done through the injected restarter.
pub struct Scale<'a> {
    config: &'a Configuration,
    applications: &'a dyn ApplicationRepository,
    restarter: Box<dyn ApplicationRestarter + 'a>,
}

impl<'a> Scale<'a> {
    pub fn new(
        config: &'a Configuration,
        applications: &'a dyn ApplicationRepository,
        restarter: Box<dyn ApplicationRestarter + 'a>,
    ) -> Self {
        Self {
            config,
            applications,
            restarter,
        }
    }
}

/// Parse an optional size flag; absent means unset.
fn size_flag(ctx: &Context, id: &str) -> Result<MemorySize, String> {
    match ctx.flag(id) {
        None => Ok(MemorySize::UNSET),
        Some(raw) => raw.parse().map_err(|e| format!("{raw}\n{e}")),
    }
}

impl Command for Scale<'_> {
    fn name(&self) -> &'static str {
        "scale"
    }

    fn usage(&self) -> &'static str {
        "cfctl scale APP [-i INSTANCES] [-m MEMORY] [-k DISK]"
    }

    fn arguments(&self) -> clap::Command {
        clap::Command::new(self.name())
            .arg(
                Arg::new(INSTANCES)
                    .short('i')
                    .value_name("INSTANCES")
                    .value_parser(value_parser!(u32)),
            )
            .arg(Arg::new(MEMORY).short('m').value_name("MEMORY"))
            .arg(Arg::new(DISK).short('k').value_name("DISK"))
    }

    fn requirements<'f>(
        &self,
        factory: &RequirementFactory<'f>,
        ctx: &Context,
    ) -> Result<Vec<Requirement<'f>>, UsageError> {
        ctx.expect_args(1)?;
        if ![INSTANCES, MEMORY, DISK].iter().any(|id| ctx.is_present(id)) {
            return Err(UsageError::missing_option("-i, -m, -k"));
        }

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

        let memory = match size_flag(ctx, MEMORY) {
            Ok(size) => size,
            Err(detail) => return ui.failed(&format!("Invalid memory limit: {detail}")),
        };
        let disk_quota = match size_flag(ctx, DISK) {
            Ok(size) => size,
            Err(detail) => return ui.failed(&format!("Invalid disk quota: {detail}")),
        };
        let scale = AppScale {
            instances: ctx.typed_flag::<u32>(INSTANCES).unwrap_or(0),
            memory,
            disk_quota,
        };
        if scale.is_empty() {
            return ui.failed("Instances, memory and disk are all zero; nothing to scale.");
        }

        ui.say(&format!("Scaling app {} {}...", app.name, in_target(self.config)));

        let response = self.applications.scale(app, &scale);
        if response.is_not_successful() {
            ui.failed(&response.message());
            return;
        }
        ui.ok();

        if scale.requires_restart() {
            ui.say("");
            self.restarter.restart(app, ui);
        }
    }
}
