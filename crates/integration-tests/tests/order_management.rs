//! Integration tests for admin order management.
//!
//! Requires a running server, a migrated database with at least one seeded
//! product (`orderdesk seed products`), and the admin account described in
//! the crate docs. Run with `cargo test -- --ignored`.

use reqwest::{Client, StatusCode};

use orderdesk_integration_tests::{
    admin_credentials, base_url, client, login, register_customer, unique_email,
};

/// Sign in as admin and return the client with a staff session.
async fn admin_client() -> Client {
    let client = client();
    let (email, password) = admin_credentials();
    login(&client, &email, &password).await;
    client
}

/// Create a fresh customer and return its detail-page ID by scanning the
/// dashboard for the registered name.
async fn create_customer_and_find_id(admin: &Client, name: &str) -> String {
    let visitor = client();
    let email = unique_email();
    register_customer(&visitor, &email, "a decent password", name).await;

    let body = admin
        .get(base_url())
        .send()
        .await
        .expect("Failed to load dashboard")
        .text()
        .await
        .expect("Failed to read dashboard");

    // The customer row links to /customer/{id}.
    let row = body
        .split("/customer/")
        .find(|chunk| chunk.contains(name))
        .expect("New customer not on dashboard");
    row.split('"').next().expect("Malformed link").to_owned()
}

#[tokio::test]
#[ignore = "Requires running server, database, admin account, and seeded products"]
async fn created_orders_show_up_on_the_dashboard() {
    let admin = admin_client().await;
    let customer_id = create_customer_and_find_id(&admin, "Order Creation Test").await;

    let resp = admin
        .post(format!("{}/order/create/{customer_id}", base_url()))
        .form(&[
            ("product_id", "1"),
            ("status", "pending"),
            ("product_id", ""),
            ("status", ""),
        ])
        .send()
        .await
        .expect("Failed to create orders");

    assert!(resp.status().is_success() || resp.status().is_redirection());

    let detail = admin
        .get(format!("{}/customer/{customer_id}", base_url()))
        .send()
        .await
        .expect("Failed to load customer detail")
        .text()
        .await
        .expect("Failed to read detail");

    assert!(detail.contains("1 order(s) in total"));
}

#[tokio::test]
#[ignore = "Requires running server, database, admin account, and seeded products"]
async fn status_filter_narrows_the_order_list() {
    let admin = admin_client().await;
    let customer_id = create_customer_and_find_id(&admin, "Filter Test").await;

    // One pending, one delivered.
    let resp = admin
        .post(format!("{}/order/create/{customer_id}", base_url()))
        .form(&[
            ("product_id", "1"),
            ("status", "pending"),
            ("product_id", "1"),
            ("status", "delivered"),
        ])
        .send()
        .await
        .expect("Failed to create orders");
    assert!(resp.status().is_success() || resp.status().is_redirection());

    let filtered = admin
        .get(format!(
            "{}/customer/{customer_id}?status=delivered",
            base_url()
        ))
        .send()
        .await
        .expect("Failed to load filtered detail")
        .text()
        .await
        .expect("Failed to read detail");

    assert!(filtered.contains("Delivered"));
    assert!(!filtered.contains("badge-pending"));
    // The unfiltered count stays at the full total.
    assert!(filtered.contains("2 order(s) in total"));
}

#[tokio::test]
#[ignore = "Requires running server, database, admin account, and seeded products"]
async fn empty_formset_bounces_back_with_an_error() {
    let admin = admin_client().await;
    let customer_id = create_customer_and_find_id(&admin, "Empty Formset Test").await;

    let resp = admin
        .post(format!("{}/order/create/{customer_id}", base_url()))
        .form(&[("product_id", ""), ("status", "")])
        .send()
        .await
        .expect("Failed to submit empty formset");

    // Redirected back to the form, which renders the error message.
    assert!(resp.status().is_success() || resp.status().is_redirection());
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("at least one valid order line"));
}

#[tokio::test]
#[ignore = "Requires running server, database, admin account, and seeded products"]
async fn deleted_orders_disappear() {
    let admin = admin_client().await;
    let customer_id = create_customer_and_find_id(&admin, "Deletion Test").await;

    let resp = admin
        .post(format!("{}/order/create/{customer_id}", base_url()))
        .form(&[("product_id", "1"), ("status", "pending")])
        .send()
        .await
        .expect("Failed to create order");
    assert!(resp.status().is_success() || resp.status().is_redirection());

    // Find the order's edit link on the customer detail page.
    let detail = admin
        .get(format!("{}/customer/{customer_id}", base_url()))
        .send()
        .await
        .expect("Failed to load detail")
        .text()
        .await
        .expect("Failed to read detail");
    let order_id = detail
        .split("/order/delete/")
        .nth(1)
        .and_then(|chunk| chunk.split('"').next())
        .expect("No delete link on detail page")
        .to_owned();

    let resp = admin
        .post(format!("{}/order/delete/{order_id}", base_url()))
        .send()
        .await
        .expect("Failed to delete order");
    assert!(resp.status().is_success() || resp.status().is_redirection());

    let detail = admin
        .get(format!("{}/customer/{customer_id}", base_url()))
        .send()
        .await
        .expect("Failed to reload detail")
        .text()
        .await
        .expect("Failed to read detail");
    assert!(detail.contains("0 order(s) in total"));

    // Editing the deleted order is now a 404.
    let resp = admin
        .get(format!("{}/order/update/{order_id}", base_url()))
        .send()
        .await
        .expect("Failed to load edit page");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running server, database, admin account, and seeded products"]
async fn updating_an_order_changes_its_status() {
    let admin = admin_client().await;
    let customer_id = create_customer_and_find_id(&admin, "Update Test").await;

    let resp = admin
        .post(format!("{}/order/create/{customer_id}", base_url()))
        .form(&[("product_id", "1"), ("status", "pending")])
        .send()
        .await
        .expect("Failed to create order");
    assert!(resp.status().is_success() || resp.status().is_redirection());

    let detail = admin
        .get(format!("{}/customer/{customer_id}", base_url()))
        .send()
        .await
        .expect("Failed to load detail")
        .text()
        .await
        .expect("Failed to read detail");
    let order_id = detail
        .split("/order/update/")
        .nth(1)
        .and_then(|chunk| chunk.split('"').next())
        .expect("No edit link on detail page")
        .to_owned();

    let resp = admin
        .post(format!("{}/order/update/{order_id}", base_url()))
        .form(&[
            ("product_id", "1"),
            ("status", "out_for_delivery"),
            ("note", "left with the courier"),
        ])
        .send()
        .await
        .expect("Failed to update order");
    assert!(resp.status().is_success() || resp.status().is_redirection());

    let detail = admin
        .get(format!("{}/customer/{customer_id}", base_url()))
        .send()
        .await
        .expect("Failed to reload detail")
        .text()
        .await
        .expect("Failed to read detail");
    assert!(detail.contains("Out for delivery"));
}
