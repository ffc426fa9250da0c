//! Process exit codes.

use cfctl_commands::RunOutcome;

pub const SUCCESS: i32 = 0;

/// Requirement failure, action failure, or start-up error.
pub const GENERAL_ERROR: i32 = 1;

/// Unknown command, invalid flags or wrong argument count.
pub const USAGE_ERROR: i32 = 2;

/// Map a run to an exit code. An action that reported `FAILED` still ends in
/// [`RunOutcome::Ran`], so the sink's failure flag is consulted too.
pub fn for_outcome(outcome: RunOutcome, reported_failure: bool) -> i32 {
    match outcome {
        RunOutcome::FailedUsage => USAGE_ERROR,
        RunOutcome::FailedRequirements => GENERAL_ERROR,
        RunOutcome::Ran if reported_failure => GENERAL_ERROR,
        RunOutcome::Ran => SUCCESS,
    }
}
