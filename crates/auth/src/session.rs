//! Session/target context for a single invocation.

use serde::{Deserialize, Serialize};

use cfctl_core::{Organization, Space};

use crate::{AccessToken, TokenInfo};

/// Authenticated session and current target.
///
/// Built once per invocation (usually from the configuration file) and
/// passed by reference to everything that needs it. Nothing mutates it while
/// a command runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Base URL of the platform API, e.g. `https://api.example.com`.
    pub api_endpoint: String,

    pub access_token: AccessToken,

    pub organization: Organization,

    pub space: Space,
}

impl Configuration {
    pub fn is_logged_in(&self) -> bool {
        !self.access_token.is_empty()
    }

    pub fn has_organization(&self) -> bool {
        !self.organization.name.is_empty()
    }

    pub fn has_space(&self) -> bool {
        !self.space.name.is_empty()
    }

    pub fn token_info(&self) -> Option<TokenInfo> {
        match self.access_token.info() {
            Ok(info) => Some(info),
            Err(e) => {
                tracing::debug!("could not decode access token: {e}");
                None
            }
        }
    }

    /// User name for progress lines; empty when the token cannot be decoded.
    pub fn username(&self) -> String {
        self.token_info().map(|info| info.user_name).unwrap_or_default()
    }
}
