//! Infrastructure layer: HTTP transport to the Cloud Controller and the
//! repositories built on top of it.

pub mod net;
pub mod repositories;

pub use net::{ApiError, ApiResponse, Gateway, GatewayError, DEFAULT_TIMEOUT};
pub use repositories::{
    AppScale, ApplicationRepository, DomainRepository, Lookup, OrganizationRepository,
    RepositoryLocator, SpaceRepository,
};
