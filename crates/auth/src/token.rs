use serde::{Deserialize, Serialize};

use crate::claims::{TokenError, TokenInfo, decode_token_info, strip_bearer};

/// Opaque bearer credential as stored in the configuration file.
///
/// `Debug` never prints the credential.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when no credential is stored (blank counts as none).
    pub fn is_empty(&self) -> bool {
        strip_bearer(&self.0).is_empty()
    }

    /// Credential without any `bearer ` prefix, ready for an Authorization header.
    pub fn credential(&self) -> &str {
        strip_bearer(&self.0)
    }

    pub fn info(&self) -> Result<TokenInfo, TokenError> {
        decode_token_info(&self.0)
    }
}

impl core::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_empty() {
            f.write_str("AccessToken(<empty>)")
        } else {
            f.write_str("AccessToken(<redacted>)")
        }
    }
}
