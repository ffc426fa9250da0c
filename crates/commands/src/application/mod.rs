//! Commands acting on one application in the targeted space.

pub mod restart;
pub mod scale;
pub mod set_env;
pub mod unset_env;

pub use restart::{ApplicationRestarter, Restart};
pub use scale::Scale;
pub use set_env::SetEnv;
pub use unset_env::UnsetEnv;

use cfctl_auth::Configuration;

/// `in org ORG / space SPACE as USER` suffix of progress lines.
pub(crate) fn in_target(config: &Configuration) -> String {
    format!(
        "in org {} / space {} as {}",
        config.organization.name,
        config.space.name,
        config.username()
    )
}

pub(crate) const RESTART_TIP: &str =
    "TIP: Use 'cfctl restart' to ensure your env variable changes take effect";
