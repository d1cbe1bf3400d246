//! End-to-end pagination tests against a mock HTTP server.
//!
//! These exercise the full path: builder -> executor -> transport ->
//! decode -> termination rule, for both pagination encodings.

use futures::{StreamExt, TryStreamExt};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sonarapi::{Execute, SonarClient, SonarError};

fn project(key: &str) -> serde_json::Value {
    json!({"key": key, "name": key, "qualifier": "TRK"})
}

async fn mock_projects_page(
    server: &MockServer,
    page: u32,
    body: serde_json::Value,
    expected_calls: u64,
) {
    Mock::given(method("GET"))
        .and(path("/api/projects/search"))
        .and(query_param("p", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_walks_three_pages_of_paging_blocks() {
    let server = MockServer::start().await;

    mock_projects_page(
        &server,
        1,
        json!({
            "paging": {"pageIndex": 1, "pageSize": 2, "total": 5},
            "components": [project("p1"), project("p2")]
        }),
        1,
    )
    .await;
    mock_projects_page(
        &server,
        2,
        json!({
            "paging": {"pageIndex": 2, "pageSize": 2, "total": 5},
            "components": [project("p3"), project("p4")]
        }),
        1,
    )
    .await;
    mock_projects_page(
        &server,
        3,
        json!({
            "paging": {"pageIndex": 3, "pageSize": 2, "total": 5},
            "components": [project("p5")]
        }),
        1,
    )
    .await;

    let client = SonarClient::new("token", &server.uri()).unwrap();
    let projects: Vec<_> = client
        .projects()
        .search()
        .page_size(2)
        .all()
        .try_collect()
        .await
        .unwrap();

    let keys: Vec<&str> = projects.iter().map(|p| p.key.as_str()).collect();
    assert_eq!(keys, vec!["p1", "p2", "p3", "p4", "p5"]);
}

#[tokio::test]
async fn test_walks_last_page_flag_pages() {
    let server = MockServer::start().await;

    let repo = |id: u64, name: &str| json!({"id": id, "name": name, "slug": name});

    Mock::given(method("GET"))
        .and(path("/api/alm_integrations/search_bitbucketserver_repos"))
        .and(query_param("p", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "isLastPage": false,
            "repositories": [repo(1, "core"), repo(2, "api")]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/alm_integrations/search_bitbucketserver_repos"))
        .and(query_param("p", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "isLastPage": true,
            "repositories": [repo(3, "infra")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = SonarClient::new("token", &server.uri()).unwrap();
    let repos: Vec<_> = client
        .alm_integrations()
        .search_bitbucketserver_repos()
        .alm_setting("bbs1")
        .all()
        .try_collect()
        .await
        .unwrap();

    let ids: Vec<u64> = repos.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_absent_metadata_yields_one_page_and_stops() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/plugins/installed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "plugins": [
                {"key": "java", "name": "Java"},
                {"key": "rust", "name": "Rust"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = SonarClient::new("token", &server.uri()).unwrap();
    let plugins: Vec<_> = client
        .plugins()
        .installed()
        .all()
        .try_collect()
        .await
        .unwrap();

    assert_eq!(plugins.len(), 2);
}

#[tokio::test]
async fn test_empty_dataset_single_call() {
    let server = MockServer::start().await;

    mock_projects_page(
        &server,
        1,
        json!({
            "paging": {"pageIndex": 1, "pageSize": 100, "total": 0},
            "components": []
        }),
        1,
    )
    .await;

    let client = SonarClient::new("token", &server.uri()).unwrap();
    let projects: Vec<_> = client
        .projects()
        .search()
        .all()
        .try_collect()
        .await
        .unwrap();

    assert!(projects.is_empty());
}

#[tokio::test]
async fn test_failure_on_second_page_ends_the_stream() {
    let server = MockServer::start().await;

    mock_projects_page(
        &server,
        1,
        json!({
            "paging": {"pageIndex": 1, "pageSize": 2, "total": 6},
            "components": [project("p1"), project("p2")]
        }),
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api/projects/search"))
        .and(query_param("p", "2"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({"errors": [{"msg": "database unavailable"}]})),
        )
        .expect(1)
        .mount(&server)
        .await;
    // Page 3 must never be requested.
    Mock::given(method("GET"))
        .and(path("/api/projects/search"))
        .and(query_param("p", "3"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = SonarClient::new("token", &server.uri()).unwrap();
    let results: Vec<Result<_, _>> = client
        .projects()
        .search()
        .page_size(2)
        .all()
        .collect()
        .await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().key, "p1");
    assert_eq!(results[1].as_ref().unwrap().key, "p2");
    match &results[2] {
        Err(SonarError::Api {
            message,
            status_code: Some(500),
        }) => assert_eq!(message, "database unavailable"),
        other => panic!("expected 500 Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_execute_honors_manually_set_page() {
    let server = MockServer::start().await;

    mock_projects_page(
        &server,
        4,
        json!({
            "paging": {"pageIndex": 4, "pageSize": 10, "total": 100},
            "components": [project("p31")]
        }),
        1,
    )
    .await;

    let client = SonarClient::new("token", &server.uri()).unwrap();
    let page = client
        .projects()
        .search()
        .page(4)
        .page_size(10)
        .execute()
        .await
        .unwrap();

    assert_eq!(page.components.len(), 1);
    assert_eq!(page.paging.unwrap().page_index, 4);
}

#[tokio::test]
async fn test_all_overrides_manually_set_page() {
    let server = MockServer::start().await;

    // Only page 1 is mocked; a request for page 5 would 404 and fail.
    mock_projects_page(
        &server,
        1,
        json!({
            "paging": {"pageIndex": 1, "pageSize": 100, "total": 1},
            "components": [project("p1")]
        }),
        1,
    )
    .await;

    let client = SonarClient::new("token", &server.uri()).unwrap();
    let projects: Vec<_> = client
        .projects()
        .search()
        .page(5)
        .all()
        .try_collect()
        .await
        .unwrap();

    assert_eq!(projects.len(), 1);
}

#[tokio::test]
async fn test_unauthorized_is_classified() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/projects/search"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let client = SonarClient::new("bad-token", &server.uri()).unwrap();
    let err = client.projects().search().execute().await.unwrap_err();

    assert!(matches!(
        err,
        SonarError::Unauthorized { status_code: 401 }
    ));
}

#[tokio::test]
async fn test_validation_failure_never_reaches_the_server() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/hotspots/search"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = SonarClient::new("token", &server.uri()).unwrap();

    // projectKey is mandatory; the builder fails before any request.
    let err = client.hotspots().search().execute().await.unwrap_err();
    assert!(matches!(err, SonarError::Validation(_)));

    let results: Vec<Result<_, _>> = client.hotspots().search().all().collect().await;
    assert_eq!(results.len(), 1);
    assert!(matches!(results[0], Err(SonarError::Validation(_))));
}

#[tokio::test]
async fn test_post_form_create_and_delete_project() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/projects/create"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "project": {"key": "org.example:app", "name": "App", "qualifier": "TRK"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/projects/delete"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = SonarClient::new("token", &server.uri()).unwrap();

    let created = client
        .projects()
        .create()
        .project("org.example:app")
        .name("App")
        .execute()
        .await
        .unwrap();
    assert_eq!(created.project.key, "org.example:app");

    client
        .projects()
        .delete()
        .project("org.example:app")
        .execute()
        .await
        .unwrap();
}
