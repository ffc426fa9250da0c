//! Preconditions a command declares and the runner evaluates.
//!
//! ## Evaluation
//!
//! A [`Requirement`] is executed exactly once. On failure it writes its own
//! explanation to the sink and returns a [`RequirementFailure`]; the runner
//! adds nothing. On success it returns a [`Resolved`] carrying whatever it
//! looked up, so the command action never repeats a lookup.
//!
//! Requirements hold only borrowed handles and the name they look up; they
//! carry no other state.

mod factory;

pub use factory::RequirementFactory;

use cfctl_auth::Configuration;
use cfctl_core::{Application, Domain, Organization, Space};
use cfctl_infra::net::ApiError;
use cfctl_infra::repositories::{
    ApplicationRepository, DomainRepository, OrganizationRepository, SpaceRepository,
};
use cfctl_infra::ApiResponse;
use thiserror::Error;

use crate::terminal::Ui;

/// Name the access-token probe looks up; it is not expected to exist.
pub const ACCESS_TOKEN_PROBE: &str = "checking_for_valid_access_token";

/// Kinds a command can ask the factory for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RequirementKind {
    Login,
    ValidAccessToken,
    TargetedOrg,
    TargetedSpace,
    Application,
    Domain,
    Space,
    Organization,
}

/// Why a requirement did not hold. Its message is what the user was shown.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequirementFailure {
    #[error("Not logged in. Use 'cfctl login' to log in.")]
    NotLoggedIn,

    /// The platform rejected the stored token (status 401).
    #[error("Not logged in. Use 'cfctl login' to log in.")]
    SessionExpired,

    #[error("No org targeted. Use 'cfctl target -o ORG' to target an org.")]
    NoTargetedOrg,

    #[error("No space targeted. Use 'cfctl target -s SPACE' to target a space.")]
    NoTargetedSpace,

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Remote(ApiError),
}

impl RequirementFailure {
    /// Convert a failed lookup; `Success` never reaches here.
    fn from_lookup(response: ApiResponse) -> Self {
        match response {
            ApiResponse::Error(err) => RequirementFailure::Remote(err),
            other => RequirementFailure::NotFound(other.message()),
        }
    }
}

/// Entities resolved by passing requirements.
///
/// Fields are `None` until a requirement of the matching kind passes. When two
/// requirements resolve the same kind, the later one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolved {
    pub application: Option<Application>,
    pub domain: Option<Domain>,
    pub space: Option<Space>,
    pub organization: Option<Organization>,
}

impl Resolved {
    pub fn merge(self, later: Resolved) -> Resolved {
        Resolved {
            application: later.application.or(self.application),
            domain: later.domain.or(self.domain),
            space: later.space.or(self.space),
            organization: later.organization.or(self.organization),
        }
    }

    fn application(app: Application) -> Self {
        Self {
            application: Some(app),
            ..Self::default()
        }
    }

    fn domain(domain: Domain) -> Self {
        Self {
            domain: Some(domain),
            ..Self::default()
        }
    }

    fn space(space: Space) -> Self {
        Self {
            space: Some(space),
            ..Self::default()
        }
    }

    fn organization(org: Organization) -> Self {
        Self {
            organization: Some(org),
            ..Self::default()
        }
    }
}

/// One precondition, bound to the handles and name it needs.
pub enum Requirement<'a> {
    /// A usable access token is stored. No network call.
    Login { config: &'a Configuration },

    /// The stored token is still accepted by the platform.
    ValidAccessToken {
        applications: &'a dyn ApplicationRepository,
    },

    TargetedOrg { config: &'a Configuration },

    TargetedSpace { config: &'a Configuration },

    Application {
        name: String,
        applications: &'a dyn ApplicationRepository,
    },

    /// The domain exists among those visible to the targeted organization.
    Domain {
        name: String,
        organization: &'a Organization,
        domains: &'a dyn DomainRepository,
    },

    Space {
        name: String,
        spaces: &'a dyn SpaceRepository,
    },

    Organization {
        name: String,
        organizations: &'a dyn OrganizationRepository,
    },
}

impl Requirement<'_> {
    pub fn kind(&self) -> RequirementKind {
        match self {
            Requirement::Login { .. } => RequirementKind::Login,
            Requirement::ValidAccessToken { .. } => RequirementKind::ValidAccessToken,
            Requirement::TargetedOrg { .. } => RequirementKind::TargetedOrg,
            Requirement::TargetedSpace { .. } => RequirementKind::TargetedSpace,
            Requirement::Application { .. } => RequirementKind::Application,
            Requirement::Domain { .. } => RequirementKind::Domain,
            Requirement::Space { .. } => RequirementKind::Space,
            Requirement::Organization { .. } => RequirementKind::Organization,
        }
    }

    /// Evaluate the requirement, reporting the reason to `ui` on failure.
    pub fn execute(&self, ui: &mut dyn Ui) -> Result<Resolved, RequirementFailure> {
        tracing::debug!(kind = ?self.kind(), "checking requirement");

        let result = self.check();
        if let Err(failure) = &result {
            tracing::debug!(kind = ?self.kind(), %failure, "requirement failed");
            ui.failed(&failure.to_string());
        }
        result
    }

    fn check(&self) -> Result<Resolved, RequirementFailure> {
        match self {
            Requirement::Login { config } => {
                if config.is_logged_in() {
                    Ok(Resolved::default())
                } else {
                    Err(RequirementFailure::NotLoggedIn)
                }
            }

            Requirement::ValidAccessToken { applications } => {
                match applications.find_by_name(ACCESS_TOKEN_PROBE) {
                    Err(response) if response.is_unauthorized() => {
                        Err(RequirementFailure::SessionExpired)
                    }
                    _ => Ok(Resolved::default()),
                }
            }

            Requirement::TargetedOrg { config } => {
                if config.has_organization() {
                    Ok(Resolved::organization(config.organization.clone()))
                } else {
                    Err(RequirementFailure::NoTargetedOrg)
                }
            }

            Requirement::TargetedSpace { config } => {
                if config.has_space() {
                    Ok(Resolved::space(config.space.clone()))
                } else {
                    Err(RequirementFailure::NoTargetedSpace)
                }
            }

            Requirement::Application { name, applications } => applications
                .find_by_name(name)
                .map(Resolved::application)
                .map_err(RequirementFailure::from_lookup),

            Requirement::Domain {
                name,
                organization,
                domains,
            } => domains
                .find_by_name_in_org(name, organization)
                .map(Resolved::domain)
                .map_err(RequirementFailure::from_lookup),

            Requirement::Space { name, spaces } => spaces
                .find_by_name(name)
                .map(Resolved::space)
                .map_err(RequirementFailure::from_lookup),

            Requirement::Organization {
                name,
                organizations,
            } => organizations
                .find_by_name(name)
                .map(Resolved::organization)
                .map_err(RequirementFailure::from_lookup),
        }
    }
}

impl core::fmt::Debug for Requirement<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut out = f.debug_struct("Requirement");
        out.field("kind", &self.kind());
        match self {
            Requirement::Application { name, .. }
            | Requirement::Domain { name, .. }
            | Requirement::Space { name, .. }
            | Requirement::Organization { name, .. } => {
                out.field("name", name);
            }
            _ => {}
        }
        out.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::BufferedUi;
    use cfctl_auth::AccessToken;
    use cfctl_infra::repositories::{
        AppCall, InMemoryApplicationRepository, InMemoryDomainRepository, InMemorySpaceRepository,
    };

    fn logged_in() -> Configuration {
        Configuration {
            access_token: AccessToken::new("bearer some-token"),
            organization: Organization::new("my-org", "my-org-guid"),
            space: Space::new("my-space", "my-space-guid"),
            ..Configuration::default()
        }
    }

    #[test]
    fn login_fails_without_token_and_explains() {
        let config = Configuration::default();
        let mut ui = BufferedUi::new();

        let result = Requirement::Login { config: &config }.execute(&mut ui);

        assert_eq!(result, Err(RequirementFailure::NotLoggedIn));
        assert_eq!(ui.outputs[0], "FAILED");
        assert!(ui.outputs[1].contains("Not logged in"));
    }

    #[test]
    fn login_passes_with_token_and_resolves_nothing() {
        let config = logged_in();
        let mut ui = BufferedUi::new();

        let resolved = Requirement::Login { config: &config }.execute(&mut ui).unwrap();

        assert_eq!(resolved, Resolved::default());
        assert!(ui.outputs.is_empty());
    }

    #[test]
    fn targeting_resolves_from_configuration() {
        let config = logged_in();
        let mut ui = BufferedUi::new();

        let org = Requirement::TargetedOrg { config: &config }.execute(&mut ui).unwrap();
        let space = Requirement::TargetedSpace { config: &config }.execute(&mut ui).unwrap();

        assert_eq!(org.organization.unwrap().guid.as_str(), "my-org-guid");
        assert_eq!(space.space.unwrap().guid.as_str(), "my-space-guid");
    }

    #[test]
    fn missing_target_fails() {
        let config = Configuration {
            space: Space::default(),
            ..logged_in()
        };
        let mut ui = BufferedUi::new();

        let result = Requirement::TargetedSpace { config: &config }.execute(&mut ui);

        assert_eq!(result, Err(RequirementFailure::NoTargetedSpace));
        assert!(ui.contains_line(&["No space targeted"]));
    }

    #[test]
    fn access_token_probe_fails_only_on_unauthorized() {
        let repo = InMemoryApplicationRepository::new();
        let mut ui = BufferedUi::new();
        let probe = Requirement::ValidAccessToken { applications: &repo };

        assert!(probe.execute(&mut ui).is_ok(), "not found passes");

        repo.fail_lookups_with(ApiResponse::with_status("Server error", 500, None));
        assert!(probe.execute(&mut ui).is_ok(), "other errors pass");

        repo.fail_lookups_with(ApiResponse::with_status("Invalid Auth Token", 401, None));
        assert_eq!(probe.execute(&mut ui), Err(RequirementFailure::SessionExpired));
        assert!(ui.contains_line(&["Not logged in"]));

        let probe_call = AppCall::FindByName(ACCESS_TOKEN_PROBE.to_string());
        assert_eq!(repo.calls(), vec![probe_call; 3]);
    }

    #[test]
    fn application_lookup_resolves_exact_entity() {
        let app = Application::new("my-app", "my-app-guid");
        let repo = InMemoryApplicationRepository::new().with_app(app.clone());
        let mut ui = BufferedUi::new();

        let resolved = Requirement::Application {
            name: "my-app".into(),
            applications: &repo,
        }
        .execute(&mut ui)
        .unwrap();

        assert_eq!(resolved.application, Some(app));
    }

    #[test]
    fn not_found_names_entity_and_error_carries_cause() {
        let org = Organization::new("my-org", "my-org-guid");
        let domains = InMemoryDomainRepository::new();
        let mut ui = BufferedUi::new();

        let requirement = Requirement::Domain {
            name: "foo.com".into(),
            organization: &org,
            domains: &domains,
        };
        let failure = requirement.execute(&mut ui).unwrap_err();
        assert!(matches!(failure, RequirementFailure::NotFound(_)));
        assert!(ui.outputs[1].contains("foo.com"));

        let spaces = InMemorySpaceRepository::new();
        spaces.fail_lookups_with(ApiResponse::with_error("Did not work", "bummer"));
        let mut ui = BufferedUi::new();

        let failure = Requirement::Space {
            name: "my-space".into(),
            spaces: &spaces,
        }
        .execute(&mut ui)
        .unwrap_err();
        assert!(matches!(failure, RequirementFailure::Remote(_)));
        assert_eq!(ui.outputs, vec!["FAILED", "Did not work: bummer"]);
    }

    #[test]
    fn later_resolution_wins_on_merge() {
        let first = Resolved::space(Space::new("a", "a-guid"));
        let second = Resolved::space(Space::new("b", "b-guid")).merge(Resolved::default());

        let merged = first.merge(second);
        assert_eq!(merged.space.unwrap().name, "b");
    }
}
