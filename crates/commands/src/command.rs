//! The contract every command implements.

use thiserror::Error;

use crate::context::Context;
use crate::requirements::{Requirement, RequirementFactory, Resolved};
use crate::terminal::Ui;

/// Wrong number or shape of arguments. Detected before any requirement is
/// built; the runner reports it together with the command's usage text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("invalid flags: {0}")]
    InvalidFlags(String),

    #[error("expected {expected} argument(s), got {actual}")]
    WrongArgumentCount { expected: usize, actual: usize },

    #[error("at least one of {0} is required")]
    MissingOption(String),
}

impl UsageError {
    pub fn invalid_flags(msg: impl Into<String>) -> Self {
        Self::InvalidFlags(msg.into())
    }

    pub fn missing_option(options: impl Into<String>) -> Self {
        Self::MissingOption(options.into())
    }
}

/// A requirement list paired with one business action.
///
/// ## Lifecycle
///
/// 1. the runner parses the raw arguments with [`Command::arguments`]
/// 2. [`Command::requirements`] checks arity, then asks the factory for the
///    ordered requirement list (authentication and targeting first)
/// 3. once every requirement passed, [`Command::run`] receives what they
///    resolved
///
/// `run` reports its own failures through the sink; it never re-enters the
/// requirement pipeline.
pub trait Command {
    fn name(&self) -> &'static str;

    /// One-line invocation help shown on usage errors.
    fn usage(&self) -> &'static str;

    /// Flags this command accepts. Positional arguments are added by the
    /// runner and checked by [`Command::requirements`].
    fn arguments(&self) -> clap::Command {
        clap::Command::new(self.name())
    }

    fn requirements<'f>(
        &self,
        factory: &RequirementFactory<'f>,
        ctx: &Context,
    ) -> Result<Vec<Requirement<'f>>, UsageError>;

    fn run(&self, ctx: &Context, resolved: &Resolved, ui: &mut dyn Ui);
}

/// Report an entity the requirements should have resolved but did not.
///
/// Only reachable when a command's requirement list and its action disagree.
pub(crate) fn unresolved(ui: &mut dyn Ui, command: &str, what: &str) {
    tracing::error!(command, what, "action ran without a resolved entity");
    ui.failed(&format!("Internal error: no {what} was resolved for '{command}'."));
}
