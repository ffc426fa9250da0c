//! Commands reading organization details.

pub mod show_org;

pub use show_org::ShowOrg;
