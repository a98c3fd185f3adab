//! Integration tests for role-based access to admin and customer pages.
//!
//! Requires a running server, a migrated database, and the admin account
//! described in the crate docs. Run with `cargo test -- --ignored`.

use reqwest::StatusCode;

use orderdesk_integration_tests::{
    admin_credentials, base_url, client, login, manual_redirect_client, register_customer,
    unique_email,
};

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn anonymous_visitors_are_sent_to_login() {
    let client = manual_redirect_client();

    for path in ["/", "/products", "/user", "/account/settings"] {
        let resp = client
            .get(format!("{}{path}", base_url()))
            .send()
            .await
            .expect("Failed to load page");

        assert!(resp.status().is_redirection(), "{path} should redirect");
        let location = resp
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert_eq!(location, "/login", "{path} should bounce to login");
    }
}

#[tokio::test]
#[ignore = "Requires running server, database, and admin account"]
async fn customers_cannot_reach_admin_pages() {
    let client = manual_redirect_client();
    let email = unique_email();

    register_customer(&client, &email, "a decent password", "No Admin Access").await;
    login(&client, &email, "a decent password").await;

    for path in ["/", "/products", "/customer/1", "/order/update/1"] {
        let resp = client
            .get(format!("{}{path}", base_url()))
            .send()
            .await
            .expect("Failed to load page");

        assert!(resp.status().is_redirection(), "{path} should redirect");
        let location = resp
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert_eq!(location, "/user", "{path} should bounce to the portal");
    }
}

#[tokio::test]
#[ignore = "Requires running server, database, and admin account"]
async fn admins_cannot_use_the_customer_portal() {
    let client = manual_redirect_client();
    let (email, password) = admin_credentials();

    login(&client, &email, &password).await;

    let resp = client
        .get(format!("{}/user", base_url()))
        .send()
        .await
        .expect("Failed to load portal");

    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(location, "/");
}

#[tokio::test]
#[ignore = "Requires running server, database, and admin account"]
async fn admins_can_open_the_dashboard() {
    let client = client();
    let (email, password) = admin_credentials();

    login(&client, &email, &password).await;

    let resp = client
        .get(base_url())
        .send()
        .await
        .expect("Failed to load dashboard");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("Dashboard"));
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn health_endpoints_are_public() {
    let client = client();

    let resp = client
        .get(format!("{}/health", base_url()))
        .send()
        .await
        .expect("Failed to load health");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{}/health/ready", base_url()))
        .send()
        .await
        .expect("Failed to load readiness");
    assert_eq!(resp.status(), StatusCode::OK);
}
