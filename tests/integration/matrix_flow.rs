//! End-to-end role-detail flows: open, edit, cancel, save

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use rolematrix::{Operation, RoleApiError, RoleDetailSession, StaffType};

use crate::common::fixtures::{
    ROLE_ID, init_tracing, mount_catalog, mount_role, mount_standard_backend, permission,
    role_detail, standard_catalog, test_client,
};

#[tokio::test]
async fn test_open_builds_matrix_from_catalog_and_grant() {
    init_tracing();
    let server = MockServer::start().await;
    mount_standard_backend(&server).await;

    let session = RoleDetailSession::open(test_client(&server), ROLE_ID)
        .await
        .unwrap();

    assert_eq!(session.role().name, "Librarian");
    assert_eq!(session.role().staff_type, StaffType::NonTeaching);
    assert!(!session.is_editing());
    assert!(!session.is_saving());
    assert_eq!(session.generation(), 0);

    let matrix = session.matrix();
    assert_eq!(matrix.sorted_resource_types(), vec!["FeeType", "Inventory"]);
    assert!(matrix.cell("Inventory", Operation::View).unwrap().checked);
    assert!(!matrix.cell("Inventory", Operation::Change).unwrap().checked);
    assert!(matrix.cell("FeeType", Operation::Add).unwrap().checked);
    assert_eq!(matrix.cell("FeeType", Operation::Delete).unwrap().permission_id, None);
}

#[tokio::test]
async fn test_open_fails_without_complete_catalog() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/permissions/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    mount_role(
        &server,
        role_detail(ROLE_ID, "Librarian", "Both", vec![]),
    )
    .await;

    let err = RoleDetailSession::open(test_client(&server), ROLE_ID)
        .await
        .unwrap_err();
    assert!(matches!(err, RoleApiError::CatalogUnavailable(_)));
}

#[tokio::test]
async fn test_open_missing_role() {
    let server = MockServer::start().await;
    mount_catalog(&server, standard_catalog()).await;
    Mock::given(method("GET"))
        .and(path(format!("/roles/{}/", ROLE_ID)))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})))
        .mount(&server)
        .await;

    let err = RoleDetailSession::open(test_client(&server), ROLE_ID)
        .await
        .unwrap_err();
    assert!(matches!(err, RoleApiError::RoleNotFound(id) if id == ROLE_ID));
}

#[tokio::test]
async fn test_open_drops_orphaned_grants() {
    let server = MockServer::start().await;
    mount_catalog(&server, standard_catalog()).await;
    mount_role(
        &server,
        role_detail(
            ROLE_ID,
            "Librarian",
            "Both",
            vec![
                permission(1, "Inventory", "view"),
                // Stale grant: id 99 is no longer in the catalog
                permission(99, "Library", "view"),
            ],
        ),
    )
    .await;

    let session = RoleDetailSession::open(test_client(&server), ROLE_ID)
        .await
        .unwrap();
    assert_eq!(session.matrix().checked_permission_ids(), vec![1]);
}

#[tokio::test]
async fn test_edit_toggle_save_round_trip() {
    init_tracing();
    let server = MockServer::start().await;
    mount_standard_backend(&server).await;

    // The save payload is absolute: exactly the checked set, nothing else
    Mock::given(method("PATCH"))
        .and(path(format!("/roles/{}/", ROLE_ID)))
        .and(body_json(json!({
            "name": "Librarian",
            "staff_type": "Non-Teaching",
            "permissions_id": [1, 3, 5, 6],
            "controlled_groups_id": []
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(role_detail(
            ROLE_ID,
            "Librarian",
            "Non-Teaching",
            vec![
                permission(1, "Inventory", "view"),
                permission(3, "Inventory", "change"),
                permission(5, "FeeType", "view"),
                permission(6, "FeeType", "add"),
            ],
        )))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = RoleDetailSession::open(test_client(&server), ROLE_ID)
        .await
        .unwrap();

    session.begin_edit();
    assert!(session.is_editing());
    assert!(session.toggle("Inventory", Operation::Change));
    assert!(session.toggle("FeeType", Operation::View));

    session.save().await.unwrap();

    assert!(!session.is_editing());
    assert!(!session.is_saving());
    assert_eq!(session.matrix().checked_permission_ids(), vec![1, 3, 5, 6]);
}

#[tokio::test]
async fn test_cancel_discards_toggles() {
    let server = MockServer::start().await;
    mount_standard_backend(&server).await;

    let mut session = RoleDetailSession::open(test_client(&server), ROLE_ID)
        .await
        .unwrap();
    let before = session.matrix().clone();

    session.begin_edit();
    session.toggle("Inventory", Operation::View);
    session.toggle("Inventory", Operation::Delete);
    session.toggle("FeeType", Operation::Add);

    session.cancel_edit();
    assert!(!session.is_editing());
    assert_eq!(session.matrix(), &before);
    assert_eq!(session.matrix().checked_permission_ids(), vec![1, 6]);
}

#[tokio::test]
async fn test_failed_save_preserves_edits() {
    let server = MockServer::start().await;
    mount_standard_backend(&server).await;

    Mock::given(method("PATCH"))
        .and(path(format!("/roles/{}/", ROLE_ID)))
        .respond_with(ResponseTemplate::new(400).set_body_string("validation failed"))
        .mount(&server)
        .await;

    let mut session = RoleDetailSession::open(test_client(&server), ROLE_ID)
        .await
        .unwrap();

    session.begin_edit();
    session.toggle("Inventory", Operation::Change);

    let err = session.save().await.unwrap_err();
    assert!(matches!(err, RoleApiError::SaveRejected { status: 400, .. }));
    assert!(err.is_retryable());

    // Nothing rolled back: the user can retry without re-toggling
    assert!(session.is_editing());
    assert!(!session.is_saving());
    assert_eq!(session.matrix().checked_permission_ids(), vec![1, 3, 6]);
}

#[tokio::test]
async fn test_saving_no_checked_cells_sends_empty_list() {
    let server = MockServer::start().await;
    mount_standard_backend(&server).await;

    Mock::given(method("PATCH"))
        .and(path(format!("/roles/{}/", ROLE_ID)))
        .and(body_json(json!({
            "name": "Librarian",
            "staff_type": "Non-Teaching",
            "permissions_id": [],
            "controlled_groups_id": []
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(role_detail(
            ROLE_ID,
            "Librarian",
            "Non-Teaching",
            vec![],
        )))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = RoleDetailSession::open(test_client(&server), ROLE_ID)
        .await
        .unwrap();

    session.begin_edit();
    // Toggle off everything the role has
    session.toggle("Inventory", Operation::View);
    session.toggle("FeeType", Operation::Add);

    // "Role has no permissions" is a valid save, not an error
    session.save().await.unwrap();
    assert!(session.matrix().checked_permission_ids().is_empty());
}

#[tokio::test]
async fn test_reload_rebuilds_from_confirmed_state() {
    let server = MockServer::start().await;
    mount_catalog(&server, standard_catalog()).await;

    // First load: grant {1}; after the external change: grant {2}
    Mock::given(method("GET"))
        .and(path(format!("/roles/{}/", ROLE_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(role_detail(
            ROLE_ID,
            "Librarian",
            "Both",
            vec![permission(1, "Inventory", "view")],
        )))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/roles/{}/", ROLE_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(role_detail(
            ROLE_ID,
            "Librarian",
            "Both",
            vec![permission(2, "Inventory", "add")],
        )))
        .mount(&server)
        .await;

    let mut session = RoleDetailSession::open(test_client(&server), ROLE_ID)
        .await
        .unwrap();
    assert_eq!(session.matrix().checked_permission_ids(), vec![1]);

    // Pending edits do not survive a reload
    session.begin_edit();
    session.toggle("Inventory", Operation::Delete);

    let generation = session.reload().await.unwrap();
    assert_eq!(generation, 1);
    assert_eq!(session.generation(), 1);
    assert!(!session.is_editing());
    assert_eq!(session.matrix().checked_permission_ids(), vec![2]);
}
