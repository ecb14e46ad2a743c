//! End-to-end flows against a real PostgreSQL database.
//!
//! Run with: DATABASE_URL="postgres://localhost/assistant_test" cargo test --test tenant_flow_test -- --ignored

use assistant_backend::{
    build_router,
    config::{AppState, Config},
    db::{AppointmentRepository, DocumentRepository, MessageRepository, NewUser},
    models::auth::Role,
    services::auth::hash_password,
};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

struct TestApp {
    router: Router,
    state: AppState,
    suffix: String,
}

async fn spawn_app() -> TestApp {
    let config = Config {
        database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
        jwt_secret: "tenant-flow-secret".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        jwt_expiration_hours: 1,
        db_max_connections: 5,
        cors_allowed_origins: vec![],
    };
    let state = AppState::new(config).await.expect("database connection");
    sqlx::migrate!().run(&state.db_pool).await.expect("migrations");

    // Every run gets its own emails so the tests can share one database
    let suffix = Utc::now().timestamp_nanos_opt().unwrap_or_default().to_string();

    TestApp {
        router: build_router(state.clone()),
        state,
        suffix,
    }
}

impl TestApp {
    async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn email(&self, local: &str) -> String {
        format!("{local}+{}@example.com", self.suffix)
    }

    async fn login(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .call(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({ "email": email, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        assert_eq!(body["token_type"], "bearer");
        body["access_token"].as_str().unwrap().to_string()
    }

    async fn platform_owner_token(&self) -> String {
        let email = self.email("owner");
        let password_hash = hash_password("password").await.unwrap();
        self.state
            .user_repo
            .create_user(
                &self.state.db_pool,
                NewUser {
                    email: &email,
                    name: "Platform Owner",
                    password_hash: &password_hash,
                    role: Role::PlatformOwner,
                    organization_id: None,
                },
            )
            .await
            .unwrap();
        self.login(&email, "password").await
    }

    /// Onboards an organization and returns its id with the admin's token.
    async fn onboard(&self, owner_token: &str, name: &str) -> (i64, String) {
        let admin_email = self.email(&format!("admin-{}", name.to_lowercase().replace(' ', "-")));
        let (status, org) = self
            .call(
                Method::POST,
                "/api/organizations",
                Some(owner_token),
                Some(json!({
                    "name": name,
                    "industry": "Healthcare",
                    "admin_email": admin_email,
                    "admin_name": "Org Admin",
                    "admin_password": "password"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "onboarding failed: {org}");
        let org_id = org["id"].as_i64().unwrap();
        (org_id, self.login(&admin_email, "password").await)
    }
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn onboarding_creates_exactly_one_admin() {
    let app = spawn_app().await;
    let owner = app.platform_owner_token().await;
    let (org_id, admin) = app.onboard(&owner, "Pune Dental").await;

    let (status, users) = app
        .call(Method::GET, &format!("/api/organizations/{org_id}/users"), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let users = users.as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["role"], "org_admin");
    assert_eq!(users[0]["name"], "Org Admin");

    let (status, me) = app.call(Method::GET, "/api/auth/me", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["organization_id"], org_id);
    assert_eq!(me["organization_name"], "Pune Dental");
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn duplicate_admin_email_rolls_the_organization_back() {
    let app = spawn_app().await;
    let owner = app.platform_owner_token().await;
    let (_, _) = app.onboard(&owner, "Nagpur Clinic").await;

    let copy_name = format!("Nagpur Clinic Copy {}", app.suffix);
    let (status, _) = app
        .call(
            Method::POST,
            "/api/organizations",
            Some(&owner),
            Some(json!({
                "name": &copy_name,
                "admin_email": app.email("admin-nagpur-clinic"),
                "admin_name": "Someone Else",
                "admin_password": "password"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, organizations) = app.call(Method::GET, "/api/organizations", Some(&owner), None).await;
    assert!(organizations
        .as_array()
        .unwrap()
        .iter()
        .all(|org| org["name"] != copy_name.as_str()));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn tenants_cannot_reach_each_other() {
    let app = spawn_app().await;
    let owner = app.platform_owner_token().await;
    let (org_a, admin_a) = app.onboard(&owner, "Tenant A").await;
    let (org_b, _) = app.onboard(&owner, "Tenant B").await;

    let (status, _) = app
        .call(Method::GET, &format!("/api/organizations/{org_b}/documents"), Some(&admin_a), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.call(Method::GET, "/api/organizations", Some(&admin_a), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.call(Method::GET, "/api/analytics/platform", Some(&admin_a), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // The owner sees both
    for org in [org_a, org_b] {
        let (status, _) = app
            .call(Method::GET, &format!("/api/organizations/{org}"), Some(&owner), None)
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    // A body-supplied organization id is ignored
    let (status, message) = app
        .call(
            Method::POST,
            &format!("/api/organizations/{org_a}/messages"),
            Some(&admin_a),
            Some(json!({
                "organization_id": org_b,
                "customer_id": "4821",
                "channel": "whatsapp",
                "content": "Namaste"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(message["organization_id"], org_a);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn configuration_is_created_lazily_and_patched_partially() {
    let app = spawn_app().await;
    let owner = app.platform_owner_token().await;
    let (org_id, admin) = app.onboard(&owner, "Config Org").await;
    let uri = format!("/api/organizations/{org_id}/config");

    let (status, config) = app.call(Method::GET, &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(config["whatsapp_config"], json!({}));

    let (status, _) = app
        .call(
            Method::PUT,
            &uri,
            Some(&admin),
            Some(json!({ "whatsapp_config": { "phone": "+91 98765 43210" } })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, config) = app
        .call(Method::PUT, &uri, Some(&admin), Some(json!({ "ai_config": { "tone": "warm" } })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(config["ai_config"]["tone"], "warm");
    assert_eq!(config["whatsapp_config"]["phone"], "+91 98765 43210");

    let (status, again) = app.call(Method::GET, &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(again["id"], config["id"]);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn deleting_another_tenants_document_is_not_found() {
    let app = spawn_app().await;
    let owner = app.platform_owner_token().await;
    let (org_a, admin_a) = app.onboard(&owner, "Docs A").await;
    let (org_b, _) = app.onboard(&owner, "Docs B").await;

    let (status, document) = app
        .call(
            Method::POST,
            &format!("/api/organizations/{org_a}/documents"),
            Some(&admin_a),
            Some(json!({ "name": "Price list", "type": "pdf", "file_path": "/uploads/prices.pdf" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(document["status"], "processing");
    let doc_id = document["id"].as_i64().unwrap();

    // The owner may act on org B, but the document is not there
    let (status, _) = app
        .call(
            Method::DELETE,
            &format!("/api/organizations/{org_b}/documents/{doc_id}"),
            Some(&owner),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, documents) = app
        .call(Method::GET, &format!("/api/organizations/{org_a}/documents"), Some(&admin_a), None)
        .await;
    assert_eq!(documents.as_array().unwrap().len(), 1);

    let (status, _) = app
        .call(
            Method::DELETE,
            &format!("/api/organizations/{org_a}/documents/{doc_id}"),
            Some(&admin_a),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn appointments_need_an_active_service_type_of_the_same_tenant() {
    let app = spawn_app().await;
    let owner = app.platform_owner_token().await;
    let (org_a, admin_a) = app.onboard(&owner, "Booking A").await;
    let (org_b, admin_b) = app.onboard(&owner, "Booking B").await;

    let (_, foreign) = app
        .call(
            Method::POST,
            &format!("/api/organizations/{org_b}/service-types"),
            Some(&admin_b),
            Some(json!({ "name": "Consultation", "duration": 30, "price": 500.0 })),
        )
        .await;
    let (_, own) = app
        .call(
            Method::POST,
            &format!("/api/organizations/{org_a}/service-types"),
            Some(&admin_a),
            Some(json!({ "name": "Follow-up", "duration": 15, "price": 300.0 })),
        )
        .await;

    let booking = |service_type_id: &Value| {
        json!({
            "service_type_id": service_type_id,
            "customer_name": "Sneha Desai",
            "customer_email": "sneha.desai@example.com",
            "appointment_date": "2030-01-15T10:00:00Z",
            "channel": "telegram"
        })
    };
    let appointments_uri = format!("/api/organizations/{org_a}/appointments");

    let (status, _) = app
        .call(Method::POST, &appointments_uri, Some(&admin_a), Some(booking(&foreign["id"])))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, appointment) = app
        .call(Method::POST, &appointments_uri, Some(&admin_a), Some(booking(&own["id"])))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(appointment["status"], "scheduled");

    let (status, _) = app
        .call(
            Method::PUT,
            &format!("/api/organizations/{org_a}/service-types/{}", own["id"]),
            Some(&admin_a),
            Some(json!({ "is_active": false })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .call(Method::POST, &appointments_uri, Some(&admin_a), Some(booking(&own["id"])))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn organization_analytics_reflect_todays_activity() {
    let app = spawn_app().await;
    let owner = app.platform_owner_token().await;
    let (org_id, admin) = app.onboard(&owner, "Analytics Org").await;

    let (_, empty) = app
        .call(Method::GET, &format!("/api/organizations/{org_id}/analytics"), Some(&admin), None)
        .await;
    assert_eq!(empty["avg_response_time"], 0.0);
    assert_eq!(empty["channel_breakdown"], json!({}));

    for (channel, response_time) in [("whatsapp", 10.0), ("whatsapp", 20.0), ("telegram", 35.5)] {
        let (status, _) = app
            .call(
                Method::POST,
                &format!("/api/organizations/{org_id}/messages"),
                Some(&admin),
                Some(json!({
                    "customer_id": "1001",
                    "channel": channel,
                    "content": "Hello",
                    "is_from_customer": false,
                    "response_time": response_time
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, analytics) = app
        .call(Method::GET, &format!("/api/organizations/{org_id}/analytics"), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(analytics["total_messages"], 3);
    assert_eq!(analytics["active_users"], 1);
    assert_eq!(analytics["avg_response_time"], 21.83);
    assert_eq!(analytics["channel_breakdown"], json!({ "telegram": 1, "whatsapp": 2 }));

    let daily = analytics["daily_activity"].as_array().unwrap();
    assert_eq!(daily.len(), 7);
    assert_eq!(daily[0]["messages"], 3);
    assert_eq!(daily[1]["messages"], 0);
    assert_eq!(analytics["monthly_trends"].as_array().unwrap().len(), 6);

    let (status, platform) = app.call(Method::GET, "/api/analytics/platform", Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
    let top = platform["top_organizations"].as_array().unwrap();
    assert!(top.len() <= 5);
    assert!(top.windows(2).all(|w| w[0]["messages"].as_i64() >= w[1]["messages"].as_i64()));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn wrong_password_and_unknown_email_look_the_same() {
    let app = spawn_app().await;
    let owner = app.platform_owner_token().await;
    let (_, _) = app.onboard(&owner, "Login Org").await;

    let (wrong_status, wrong_body) = app
        .call(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": app.email("admin-login-org"), "password": "nope" })),
        )
        .await;
    let (unknown_status, unknown_body) = app
        .call(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": app.email("nobody"), "password": "nope" })),
        )
        .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, unknown_body);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn records_are_only_found_through_their_own_organization() {
    let app = spawn_app().await;
    let owner = app.platform_owner_token().await;
    let (org_a, admin_a) = app.onboard(&owner, "Lookup A").await;
    let (org_b, _) = app.onboard(&owner, "Lookup B").await;

    let (_, document) = app
        .call(
            Method::POST,
            &format!("/api/organizations/{org_a}/documents"),
            Some(&admin_a),
            Some(json!({ "name": "FAQ", "type": "url", "url": "https://clinic.example/faq" })),
        )
        .await;
    let (_, service_type) = app
        .call(
            Method::POST,
            &format!("/api/organizations/{org_a}/service-types"),
            Some(&admin_a),
            Some(json!({ "name": "Consultation", "duration": 30, "price": 500.0 })),
        )
        .await;
    let (_, appointment) = app
        .call(
            Method::POST,
            &format!("/api/organizations/{org_a}/appointments"),
            Some(&admin_a),
            Some(json!({
                "service_type_id": service_type["id"],
                "customer_name": "Vikram Joshi",
                "appointment_date": "2030-03-01T09:30:00Z"
            })),
        )
        .await;
    let (_, message) = app
        .call(
            Method::POST,
            &format!("/api/organizations/{org_a}/messages"),
            Some(&admin_a),
            Some(json!({ "customer_id": "2210", "channel": "whatsapp", "content": "Hi" })),
        )
        .await;

    let records = [
        ("documents", &document),
        ("appointments", &appointment),
        ("messages", &message),
    ];
    for (collection, record) in records {
        let id = record["id"].as_i64().unwrap();

        let (status, found) = app
            .call(
                Method::GET,
                &format!("/api/organizations/{org_a}/{collection}/{id}"),
                Some(&admin_a),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{collection} {id}");
        assert_eq!(found["id"], id);
        assert_eq!(found["organization_id"], org_a);

        // Same id asked through another organization reads as missing
        let (status, _) = app
            .call(
                Method::GET,
                &format!("/api/organizations/{org_b}/{collection}/{id}"),
                Some(&owner),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{collection} {id} through org {org_b}");
    }

    // Repository level: the organization is part of the key
    let document_id = document["id"].as_i64().unwrap();
    let repo = DocumentRepository::new(app.state.db_pool.clone());
    assert!(repo.find_by_id(org_a, document_id).await.unwrap().is_some());
    assert!(repo.find_by_id(org_b, document_id).await.unwrap().is_none());

    let message_id = message["id"].as_i64().unwrap();
    let repo = MessageRepository::new(app.state.db_pool.clone());
    assert!(repo.find_by_id(org_a, message_id).await.unwrap().is_some());
    assert!(repo.find_by_id(org_b, message_id).await.unwrap().is_none());

    let appointment_id = appointment["id"].as_i64().unwrap();
    let repo = AppointmentRepository::new(app.state.db_pool.clone());
    assert!(repo.find_by_id(org_a, appointment_id).await.unwrap().is_some());
    assert!(repo.find_by_id(org_b, appointment_id).await.unwrap().is_none());
}
