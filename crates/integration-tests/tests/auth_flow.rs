//! Integration tests for registration, login, and logout.
//!
//! These tests require a running server and a migrated database; see the
//! crate docs for setup. Run with `cargo test -- --ignored`.

use reqwest::StatusCode;

use orderdesk_integration_tests::{
    base_url, client, login, manual_redirect_client, register_customer, unique_email,
};

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn registration_then_login_lands_on_customer_portal() {
    let client = client();
    let email = unique_email();

    register_customer(&client, &email, "a decent password", "Integration Test").await;
    login(&client, &email, "a decent password").await;

    // A registered account is a customer; the portal page must render.
    let resp = client
        .get(format!("{}/user", base_url()))
        .send()
        .await
        .expect("Failed to load portal");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("Integration Test"));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn login_redirects_customers_to_their_portal() {
    let client = manual_redirect_client();
    let email = unique_email();

    register_customer(&client, &email, "a decent password", "Redirect Check").await;

    let resp = client
        .post(format!("{}/login", base_url()))
        .form(&[("email", email.as_str()), ("password", "a decent password")])
        .send()
        .await
        .expect("Failed to submit login");

    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(location, "/user");
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn duplicate_registration_is_rejected() {
    let client = manual_redirect_client();
    let email = unique_email();

    register_customer(&client, &email, "a decent password", "First").await;

    let resp = client
        .post(format!("{}/register", base_url()))
        .form(&[
            ("name", "Second"),
            ("email", email.as_str()),
            ("password", "a decent password"),
            ("password_confirm", "a decent password"),
        ])
        .send()
        .await
        .expect("Failed to submit registration");

    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(location.contains("error=email_taken"));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn wrong_password_bounces_back_to_login() {
    let client = manual_redirect_client();
    let email = unique_email();

    register_customer(&client, &email, "a decent password", "Wrong Password").await;

    let resp = client
        .post(format!("{}/login", base_url()))
        .form(&[("email", email.as_str()), ("password", "not the password")])
        .send()
        .await
        .expect("Failed to submit login");

    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(location.contains("error=credentials"));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn signed_in_visitors_cannot_see_the_login_page() {
    let client = manual_redirect_client();
    let email = unique_email();

    register_customer(&client, &email, "a decent password", "Already In").await;
    login(&client, &email, "a decent password").await;

    for path in ["/login", "/register"] {
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
#[ignore = "Requires running server and database"]
async fn logout_ends_the_session() {
    let client = manual_redirect_client();
    let email = unique_email();

    register_customer(&client, &email, "a decent password", "Logging Out").await;
    login(&client, &email, "a decent password").await;

    let resp = client
        .get(format!("{}/logout", base_url()))
        .send()
        .await
        .expect("Failed to log out");
    assert!(resp.status().is_redirection());

    // The portal now requires signing in again.
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
    assert_eq!(location, "/login");
}
