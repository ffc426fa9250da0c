//! One invocation, from raw arguments to the command action.
//!
//! ## Flow
//!
//! ```text
//! raw args
//!   ↓
//! 1. parse flags into a Context            (error → FailedUsage)
//!   ↓
//! 2. command checks arity, factory builds
//!    the ordered requirement list          (error → FailedUsage)
//!   ↓
//! 3. execute requirements in order,
//!    stop at the first failure             (failure → FailedRequirements)
//!   ↓
//! 4. run the action with what was resolved → Ran
//! ```
//!
//! Usage failures are reported before any requirement exists. Requirement
//! failures are reported by the requirement itself; the runner adds nothing.
//! Action failures are the command's business and still end in `Ran`.

use crate::command::{Command, UsageError};
use crate::context::Context;
use crate::requirements::{Requirement, RequirementFactory, RequirementFailure, Resolved};
use crate::terminal::Ui;

/// Terminal state of one invocation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Requirements passed and the action ran (it may have reported FAILED).
    Ran,
    FailedUsage,
    FailedRequirements,
}

#[derive(Debug)]
pub struct Runner<'a> {
    factory: RequirementFactory<'a>,
}

impl<'a> Runner<'a> {
    pub fn new(factory: RequirementFactory<'a>) -> Self {
        Self { factory }
    }

    pub fn factory(&self) -> &RequirementFactory<'a> {
        &self.factory
    }

    pub fn run(&self, command: &dyn Command, raw: &[String], ui: &mut dyn Ui) -> RunOutcome {
        let name = command.name();

        let (ctx, requirements) = match self.prepare(command, raw) {
            Ok(prepared) => prepared,
            Err(usage) => {
                tracing::debug!(command = name, %usage, "incorrect usage");
                ui.failed_with_usage(command.usage());
                return RunOutcome::FailedUsage;
            }
        };

        match check_all(&requirements, ui) {
            Ok(resolved) => {
                tracing::debug!(command = name, "requirements passed");
                command.run(&ctx, &resolved, ui);
                RunOutcome::Ran
            }
            Err(failure) => {
                tracing::debug!(command = name, %failure, "stopped at failed requirement");
                RunOutcome::FailedRequirements
            }
        }
    }

    fn prepare(
        &self,
        command: &dyn Command,
        raw: &[String],
    ) -> Result<(Context, Vec<Requirement<'a>>), UsageError> {
        let ctx = Context::parse(command.arguments(), raw)?;
        let requirements = command.requirements(&self.factory, &ctx)?;
        Ok((ctx, requirements))
    }
}

/// Execute requirements in order, stopping at the first failure.
pub fn check_all(
    requirements: &[Requirement<'_>],
    ui: &mut dyn Ui,
) -> Result<Resolved, RequirementFailure> {
    requirements
        .iter()
        .try_fold(Resolved::default(), |resolved, requirement| {
            requirement.execute(&mut *ui).map(|found| resolved.merge(found))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::BufferedUi;
    use cfctl_auth::{AccessToken, Configuration};
    use cfctl_core::{Application, Organization, Space};
    use cfctl_infra::repositories::InMemoryApplicationRepository;

    #[test]
    fn stops_at_first_failure() {
        let config = Configuration::default();
        let apps = InMemoryApplicationRepository::new()
            .with_app(Application::new("my-app", "my-app-guid"));
        let mut ui = BufferedUi::new();

        let requirements = [
            Requirement::Login { config: &config },
            Requirement::Application {
                name: "my-app".into(),
                applications: &apps,
            },
        ];

        let result = check_all(&requirements, &mut ui);

        assert_eq!(result, Err(RequirementFailure::NotLoggedIn));
        assert!(apps.calls().is_empty());
    }

    #[test]
    fn collects_every_resolution_in_order() {
        let config = Configuration {
            access_token: AccessToken::new("token"),
            organization: Organization::new("my-org", "my-org-guid"),
            space: Space::new("my-space", "my-space-guid"),
            ..Configuration::default()
        };
        let app = Application::new("my-app", "my-app-guid");
        let apps = InMemoryApplicationRepository::new().with_app(app.clone());
        let mut ui = BufferedUi::new();

        let requirements = [
            Requirement::Login { config: &config },
            Requirement::TargetedSpace { config: &config },
            Requirement::Application {
                name: "my-app".into(),
                applications: &apps,
            },
        ];

        let resolved = check_all(&requirements, &mut ui).unwrap();

        assert_eq!(resolved.application, Some(app));
        assert_eq!(resolved.space, Some(config.space.clone()));
        assert!(ui.outputs.is_empty());
    }
}
