use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims the CLI reads out of a bearer access token.
///
/// Only the fields used for display are modelled.
/// The platform remains the authority on whether the token is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    #[serde(default)]
    pub user_name: String,

    #[serde(default)]
    pub user_id: String,

    #[serde(default)]
    pub email: String,

    /// Expiry as seconds since the epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("access token is empty")]
    Empty,

    #[error("access token is malformed: {0}")]
    Malformed(String),
}

/// Decode the claims of a JWT access token.
///
/// The signature is not verified: the CLI cannot hold the issuer's key and
/// only needs the claims for display. An optional `bearer ` prefix is ignored.
pub fn decode_token_info(raw: &str) -> Result<TokenInfo, TokenError> {
    let token = strip_bearer(raw);
    if token.is_empty() {
        return Err(TokenError::Empty);
    }

    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    jsonwebtoken::decode::<TokenInfo>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|e| TokenError::Malformed(e.to_string()))
}

pub(crate) fn strip_bearer(raw: &str) -> &str {
    let trimmed = raw.trim();
    match (trimmed.get(..6), trimmed.get(6..)) {
        (Some(prefix), Some(rest))
            if prefix.eq_ignore_ascii_case("bearer")
                && (rest.is_empty() || rest.starts_with(char::is_whitespace)) =>
        {
            rest.trim()
        }
        _ => trimmed,
    }
}
