//! `cfctl-auth` — access tokens and the session/target context.
//!
//! This crate is intentionally decoupled from HTTP and from where the
//! configuration is stored.

pub mod claims;
pub mod session;
pub mod token;

pub use claims::{TokenError, TokenInfo, decode_token_info};
pub use session::Configuration;
pub use token::AccessToken;
