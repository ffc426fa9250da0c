//! Cloud Controller repositories against a mock API server.
//!
//! The repositories use a blocking client, so every call runs inside
//! `spawn_blocking` while the mock server lives on the async runtime.

use std::collections::BTreeMap;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cfctl_auth::{AccessToken, Configuration};
use cfctl_core::{Application, Domain, MemorySize, Organization, Space};
use cfctl_infra::repositories::{
    AppScale, ApplicationRepository, CloudControllerApplicationRepository,
    CloudControllerDomainRepository, CloudControllerOrganizationRepository, DomainRepository,
    OrganizationRepository,
};
use cfctl_infra::{ApiResponse, Gateway, RepositoryLocator, SpaceRepository, DEFAULT_TIMEOUT};

fn config(api: &str) -> Configuration {
    Configuration {
        api_endpoint: api.to_string(),
        access_token: AccessToken::new("bearer my-token"),
        organization: Organization::new("my-org", "my-org-guid"),
        space: Space::new("my-space", "my-space-guid"),
    }
}

async fn blocking<T, F>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn find_app_by_name_decodes_the_first_resource() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/spaces/my-space-guid/apps"))
        .and(query_param("q", "name:my-app"))
        .and(query_param("inline-relations-depth", "1"))
        .and(header("Authorization", "Bearer my-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resources": [{
                "metadata": { "guid": "my-app-guid" },
                "entity": {
                    "name": "my-app",
                    "instances": 2,
                    "memory": 256,
                    "disk_quota": 1024,
                    "state": "STARTED",
                    "environment_json": { "DATABASE_URL": "mysql://example.com/my-db", "WORKERS": 4 }
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = server.uri();
    let app = blocking(move || {
        let config = config(&api);
        let gateway = Gateway::new(&config).unwrap();
        CloudControllerApplicationRepository::new(gateway, &config).find_by_name("my-app")
    })
    .await
    .unwrap();

    assert_eq!(app.guid.as_str(), "my-app-guid");
    assert_eq!(app.instances, 2);
    assert_eq!(app.memory.megabytes(), 256);
    assert_eq!(app.environment_vars["DATABASE_URL"], "mysql://example.com/my-db");
    assert_eq!(app.environment_vars["WORKERS"], "4");
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_listing_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/organizations/my-org-guid/spaces"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "resources": [] })))
        .mount(&server)
        .await;

    let api = server.uri();
    let failure = blocking(move || {
        let locator = RepositoryLocator::cloud_controller(&config(&api), DEFAULT_TIMEOUT).unwrap();
        locator.spaces().find_by_name("missing-space")
    })
    .await
    .unwrap_err();

    assert!(failure.is_not_found());
    assert!(failure.message().contains("missing-space"));
}

#[tokio::test(flavor = "multi_thread")]
async fn unauthorized_lookup_is_an_error_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/organizations"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "code": 1000,
            "description": "Invalid Auth Token",
            "error_code": "CF-InvalidAuthToken"
        })))
        .mount(&server)
        .await;

    let api = server.uri();
    let failure = blocking(move || {
        let config = config(&api);
        let gateway = Gateway::new(&config).unwrap();
        CloudControllerOrganizationRepository::new(gateway).find_by_name("my-org")
    })
    .await
    .unwrap_err();

    assert!(failure.is_error());
    assert!(failure.is_unauthorized());
    assert!(failure.message().contains("Invalid Auth Token"));
}

#[tokio::test(flavor = "multi_thread")]
async fn organization_lookup_includes_spaces_and_domains() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/organizations"))
        .and(query_param("q", "name:my-org"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resources": [{
                "metadata": { "guid": "my-org-guid" },
                "entity": {
                    "name": "my-org",
                    "spaces": [{ "metadata": { "guid": "space1-guid" }, "entity": { "name": "space1" } }],
                    "domains": [{ "metadata": { "guid": "domain1-guid" }, "entity": { "name": "cfapps.io" } }]
                }
            }]
        })))
        .mount(&server)
        .await;

    let api = server.uri();
    let org = blocking(move || {
        let config = config(&api);
        let gateway = Gateway::new(&config).unwrap();
        CloudControllerOrganizationRepository::new(gateway).find_by_name("my-org")
    })
    .await
    .unwrap();

    assert_eq!(org.guid.as_str(), "my-org-guid");
    assert_eq!(org.spaces[0].name, "space1");
    assert_eq!(org.domains[0].name, "cfapps.io");
}

#[tokio::test(flavor = "multi_thread")]
async fn scale_sends_only_requested_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v2/apps/my-app-guid"))
        .and(body_json(json!({ "instances": 5, "memory": 512 })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let api = server.uri();
    let response = blocking(move || {
        let config = config(&api);
        let gateway = Gateway::new(&config).unwrap();
        let repo = CloudControllerApplicationRepository::new(gateway, &config);
        let scale = AppScale {
            instances: 5,
            memory: MemorySize::from_megabytes(512),
            disk_quota: MemorySize::default(),
        };
        repo.scale(&Application::new("my-app", "my-app-guid"), &scale)
    })
    .await;

    assert!(response.is_successful());
}

#[tokio::test(flavor = "multi_thread")]
async fn set_env_replaces_environment_json() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v2/apps/my-app-guid"))
        .and(body_json(json!({ "environment_json": { "foo": "bar" } })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let api = server.uri();
    let response = blocking(move || {
        let config = config(&api);
        let gateway = Gateway::new(&config).unwrap();
        let repo = CloudControllerApplicationRepository::new(gateway, &config);
        let vars = BTreeMap::from([("foo".to_string(), "bar".to_string())]);
        repo.set_env(&Application::new("my-app", "my-app-guid"), &vars)
    })
    .await;

    assert!(response.is_successful());
}

#[tokio::test(flavor = "multi_thread")]
async fn domain_mapping_uses_association_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v2/spaces/my-space-guid/domains/foo-guid"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v2/spaces/my-space-guid/domains/foo-guid"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v2/domains/foo-guid"))
        .and(query_param("recursive", "true"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let api = server.uri();
    let (mapped, unmapped, deleted) = blocking(move || {
        let config = config(&api);
        let gateway = Gateway::new(&config).unwrap();
        let repo = CloudControllerDomainRepository::new(gateway);
        let domain = Domain::new("foo.com", "foo-guid");
        (
            repo.map_domain(&domain, &config.space),
            repo.unmap_domain(&domain, &config.space),
            repo.delete(&domain),
        )
    })
    .await;

    assert!(mapped.is_successful());
    assert!(unmapped.is_error());
    assert_eq!(unmapped.status_code(), Some(500));
    assert!(unmapped.message().contains("boom"));
    assert!(deleted.is_successful());
}

#[test]
fn unreachable_server_is_an_error_not_a_panic() {
    let config = config("http://127.0.0.1:1");
    let gateway = Gateway::new(&config).unwrap();
    let response: ApiResponse = CloudControllerApplicationRepository::new(gateway, &config)
        .find_by_name("my-app")
        .unwrap_err();

    assert!(response.is_error());
    assert!(response.message().starts_with("Error performing request"));
}
