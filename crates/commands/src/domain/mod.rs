//! Commands managing domains of the targeted organization.

pub mod delete_domain;
pub mod domain_mapper;

pub use delete_domain::DeleteDomain;
pub use domain_mapper::DomainMapper;
