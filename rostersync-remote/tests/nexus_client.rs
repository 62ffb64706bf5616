//! Nexus client against a mock server: listings, create and update calls.

use std::time::Duration;

use rostersync_core::{AccountId, AccountStatus, LocalAccount, NewAccount, RoleId};
use rostersync_remote::{Directory, NexusClient, RemoteError};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BASIC_ADMIN: &str = "Basic YWRtaW46YWRtaW4xMjM=";

fn client(uri: String) -> NexusClient {
    NexusClient::new(uri, "admin", "admin123", Duration::from_secs(5))
}

#[tokio::test(flavor = "multi_thread")]
async fn users_are_listed_with_extra_fields_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/service/rest/beta/security/users"))
        .and(header("authorization", BASIC_ADMIN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "userId": "bob",
                "firstName": "Bob",
                "lastName": "Builder",
                "emailAddress": "bob@co.com",
                "source": "default",
                "status": "active",
                "readOnly": false,
                "roles": ["nx-browser"],
                "externalRoles": []
            },
            "not-an-object",
            { "firstName": "no id" }
        ])))
        .mount(&server)
        .await;

    let uri = server.uri();
    let users = tokio::task::spawn_blocking(move || client(uri).list_users())
        .await
        .expect("join")
        .expect("users");

    assert_eq!(users.len(), 1);
    let bob = &users[0];
    assert_eq!(bob.user_id, AccountId::from("bob"));
    assert_eq!(bob.status, AccountStatus::Active);
    assert_eq!(bob.roles, vec![RoleId::from("nx-browser")]);
    assert_eq!(bob.extra["source"], json!("default"));
    assert_eq!(bob.extra["emailAddress"], json!("bob@co.com"));
}

#[tokio::test(flavor = "multi_thread")]
async fn users_with_null_status_or_roles_are_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/service/rest/beta/security/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "userId": "bob", "status": "disabled", "roles": null, "source": "default" },
            { "userId": "carol", "status": null, "roles": ["nx-browser"] },
            { "userId": "dave", "status": "active", "roles": [] }
        ])))
        .mount(&server)
        .await;

    let uri = server.uri();
    let users = tokio::task::spawn_blocking(move || client(uri).list_users())
        .await
        .expect("join")
        .expect("users");

    let ids: Vec<&str> = users.iter().map(|u| u.user_id.as_str()).collect();
    assert_eq!(ids, ["bob", "carol", "dave"]);
    assert!(users[0].is_disabled());
    assert!(users[0].roles.is_empty());
    assert_eq!(users[0].extra["source"], json!("default"));
    assert_eq!(users[1].status, AccountStatus::Active);
    assert_eq!(users[1].roles, vec![RoleId::from("nx-browser")]);
}

#[tokio::test(flavor = "multi_thread")]
async fn not_found_listings_are_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let uri = server.uri();
    let (users, roles) = tokio::task::spawn_blocking(move || {
        let client = client(uri);
        (client.list_users(), client.list_roles())
    })
    .await
    .expect("join");

    assert!(users.expect("users").is_empty());
    assert!(roles.expect("roles").is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn roles_listing_server_error_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/service/rest/v1/security/roles"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let uri = server.uri();
    let err = tokio::task::spawn_blocking(move || client(uri).list_roles())
        .await
        .expect("join")
        .unwrap_err();

    match err {
        RemoteError::Status { status, body, .. } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected status error, got: {other}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn create_posts_the_full_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/service/rest/beta/security/users"))
        .and(header("authorization", BASIC_ADMIN))
        .and(body_json(json!({
            "userId": "alice",
            "firstName": "Alice",
            "lastName": "user",
            "emailAddress": "alice@co.com",
            "password": "unused-temp",
            "status": "active",
            "roles": ["nx-browser"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "userId": "alice" })))
        .expect(1)
        .mount(&server)
        .await;

    let payload = NewAccount {
        user_id: AccountId::from("alice"),
        first_name: "Alice".into(),
        last_name: "user".into(),
        email_address: "alice@co.com".into(),
        password: "unused-temp".into(),
        status: AccountStatus::Active,
        roles: vec![RoleId::from("nx-browser")],
    };
    let uri = server.uri();
    tokio::task::spawn_blocking(move || client(uri).create_user(&payload))
        .await
        .expect("join")
        .expect("create");
}

#[tokio::test(flavor = "multi_thread")]
async fn update_puts_the_whole_record() {
    let server = MockServer::start().await;
    let record = json!({
        "userId": "bob",
        "firstName": "Bob",
        "source": "default",
        "status": "disabled",
        "roles": ["nx-browser"]
    });
    Mock::given(method("PUT"))
        .and(path("/service/rest/beta/security/users/bob"))
        .and(body_json(record.clone()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let account: LocalAccount = serde_json::from_value(record).expect("account");
    let uri = server.uri();
    tokio::task::spawn_blocking(move || client(uri).update_user(&account))
        .await
        .expect("join")
        .expect("update");
}

#[tokio::test(flavor = "multi_thread")]
async fn unexpected_success_code_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(202))
        .mount(&server)
        .await;

    let payload = NewAccount {
        user_id: AccountId::from("alice"),
        first_name: "Alice".into(),
        last_name: "user".into(),
        email_address: "alice@example.invalid".into(),
        password: "pw".into(),
        status: AccountStatus::Active,
        roles: vec![],
    };
    let uri = server.uri();
    let err = tokio::task::spawn_blocking(move || client(uri).create_user(&payload))
        .await
        .expect("join")
        .unwrap_err();

    assert!(matches!(err, RemoteError::Status { status: 202, .. }), "got: {err}");
}
