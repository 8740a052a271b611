//! HTTP failure-mode tests for the client

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use rolematrix::{ApiConfig, RoleApiClient, RoleApiError};

use crate::common::fixtures::{ROLE_ID, mount_role, permission, role_detail, test_client};

#[tokio::test]
async fn test_unreachable_backend_is_network_unavailable() {
    // Discard port: nothing listens here
    let client = RoleApiClient::new(ApiConfig::new("http://127.0.0.1:9/")).unwrap();

    let err = client.load_role_detail(ROLE_ID).await.unwrap_err();
    assert!(matches!(err, RoleApiError::NetworkUnavailable(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_malformed_role_detail_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/roles/{}/", ROLE_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "not-a-number",
            "name": "Librarian"
        })))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .load_role_detail(ROLE_ID)
        .await
        .unwrap_err();
    assert!(matches!(err, RoleApiError::Parse(_)));
}

#[tokio::test]
async fn test_load_role_grant_extracts_id_set() {
    let server = MockServer::start().await;
    mount_role(
        &server,
        role_detail(
            ROLE_ID,
            "Librarian",
            "Teaching",
            vec![
                permission(1, "Inventory", "view"),
                permission(6, "FeeType", "add"),
            ],
        ),
    )
    .await;

    let grant = test_client(&server).load_role_grant(ROLE_ID).await.unwrap();
    assert_eq!(grant.role_id, ROLE_ID);
    assert_eq!(grant.granted_permission_ids.len(), 2);
    assert!(grant.granted_permission_ids.contains(&1));
    assert!(grant.granted_permission_ids.contains(&6));
}

#[tokio::test]
async fn test_catalog_pagination_loop_is_detected() {
    let server = MockServer::start().await;

    // A next link that points back at itself never terminates
    Mock::given(method("GET"))
        .and(path("/permissions/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "next": format!("{}/permissions/", server.uri()),
            "previous": null,
            "results": [permission(1, "Inventory", "view")]
        })))
        .mount(&server)
        .await;

    let err = test_client(&server).load_catalog().await.unwrap_err();
    assert!(matches!(err, RoleApiError::CatalogUnavailable(_)));
}
