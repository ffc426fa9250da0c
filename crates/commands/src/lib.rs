//! `cfctl-commands` — the requirement-gated command pipeline.
//!
//! A command declares the preconditions it needs as an ordered list of
//! [`Requirement`]s built by the [`RequirementFactory`]. The [`Runner`]
//! evaluates them in order, stops at the first failure, and only then hands
//! the resolved entities to the command's action.

pub mod application;
pub mod command;
pub mod context;
pub mod domain;
pub mod organization;
pub mod registry;
pub mod requirements;
pub mod runner;
pub mod terminal;

pub use command::{Command, UsageError};
pub use context::Context;
pub use registry::Dependencies;
pub use requirements::{
    Requirement, RequirementFactory, RequirementFailure, RequirementKind, Resolved,
};
pub use runner::{RunOutcome, Runner};
pub use terminal::{BufferedUi, TerminalUi, Ui};
