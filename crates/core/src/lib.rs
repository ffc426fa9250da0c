//! `cfctl-core` — platform entities and value types.
//!
//! This crate contains the records the CLI reads from and writes to the
//! remote platform API. It has no IO and no transport concerns.

pub mod app;
pub mod domain;
pub mod entity;
pub mod error;
pub mod id;
pub mod memory;
pub mod organization;
pub mod space;
pub mod value_object;

pub use app::{AppState, Application};
pub use domain::Domain;
pub use entity::Entity;
pub use error::DomainError;
pub use id::Guid;
pub use memory::MemorySize;
pub use organization::Organization;
pub use space::Space;
pub use value_object::ValueObject;
