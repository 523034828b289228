//! tests/api/vendor.rs

use crate::helpers::{assert_is_redirect_to, spawn_logged_in_app, TestApp};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

fn order(id: &str, status: &str, payment_status: &str) -> serde_json::Value {
    serde_json::json!({
        "_id": id,
        "customer": "John Doe",
        "items": ["Cheese Burger", "Fries"],
        "status": status,
        "paymentStatus": payment_status,
        "paymentMethod": "Cash",
        "total": 1205,
        "date": "2025-01-15"
    })
}

async fn mock_order(app: &TestApp, id: &str, status: &str, payment_status: &str) {
    app.mock_document("food_orders", id, order(id, status, payment_status))
        .await;
}

#[tokio::test]
async fn orders_offer_the_actions_of_their_state() {
    // Arrange
    let app = spawn_logged_in_app().await;
    app.mock_collection(
        "food_orders",
        serde_json::json!([
            order("o1", "Pending", "Pending"),
            order("o2", "Preparing", "Pending"),
            order("o3", "Ready to be Delivered", "Pending")
        ]),
    )
    .await;

    // Act
    let html_page = app.get_html("/vendor/orders").await;

    // Assert
    assert!(html_page.contains(r#"action="/vendor/orders/o1/accept""#));
    assert!(!html_page.contains(r#"action="/vendor/orders/o2/accept""#));
    assert!(html_page.contains(r#"action="/vendor/orders/o2/prepared""#));
    assert!(html_page.contains(r#"action="/vendor/orders/o3/payment""#));
    assert!(html_page.contains(r#"action="/vendor/orders/o3/complaint""#));
    assert!(html_page.contains("LKR 1205.00"));
}

#[tokio::test]
async fn accepting_a_pending_order_starts_preparation() {
    // Arrange
    let app = spawn_logged_in_app().await;
    mock_order(&app, "o1", "Pending", "Pending").await;
    Mock::given(path("/data/food_orders/update/o1"))
        .and(method("PUT"))
        .and(body_partial_json(serde_json::json!({
            "status": "Preparing",
            "customer": "John Doe"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.backend_server)
        .await;

    // Act
    let response = app.post_empty("/vendor/orders/o1/accept").await;

    // Assert
    assert_is_redirect_to(&response, "/vendor/orders");
}

#[tokio::test]
async fn illegal_transitions_are_not_stored() {
    // Arrange
    let app = spawn_logged_in_app().await;
    mock_order(&app, "o2", "Completed", "Paid").await;
    app.mock_collection("food_orders", serde_json::json!([])).await;
    Mock::given(path("/data/food_orders/update/o2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.backend_server)
        .await;

    // Act
    let response = app.post_empty("/vendor/orders/o2/prepared").await;

    // Assert
    assert_is_redirect_to(&response, "/vendor/orders");
    let html_page = app.get_html("/vendor/orders").await;
    assert!(html_page.contains("An order that is Completed cannot be marked as prepared."));
}

#[tokio::test]
async fn declining_needs_a_reason() {
    // Arrange
    let app = spawn_logged_in_app().await;
    mock_order(&app, "o1", "Pending", "Pending").await;
    app.mock_collection("food_orders", serde_json::json!([])).await;
    Mock::given(path("/data/food_orders/update/o1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.backend_server)
        .await;

    // Act
    let response = app
        .post_form("/vendor/orders/o1/decline", &[("reason", "")])
        .await;

    // Assert
    assert_is_redirect_to(&response, "/vendor/orders");
    let html_page = app.get_html("/vendor/orders").await;
    assert!(html_page.contains("is required."));
}

#[tokio::test]
async fn declining_without_a_form_body_asks_for_a_reason() {
    // Arrange
    let app = spawn_logged_in_app().await;
    mock_order(&app, "o1", "Pending", "Pending").await;
    app.mock_collection("food_orders", serde_json::json!([])).await;
    Mock::given(path("/data/food_orders/update/o1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.backend_server)
        .await;

    // Act
    let response = app.post_empty("/vendor/orders/o1/decline").await;

    // Assert
    assert_is_redirect_to(&response, "/vendor/orders");
    let html_page = app.get_html("/vendor/orders").await;
    assert!(html_page.contains("is required."));
}

#[tokio::test]
async fn declining_with_another_reason_stores_the_text() {
    // Arrange
    let app = spawn_logged_in_app().await;
    mock_order(&app, "o1", "Pending", "Pending").await;
    Mock::given(path("/data/food_orders/update/o1"))
        .and(method("PUT"))
        .and(body_partial_json(serde_json::json!({
            "status": "Declined",
            "declineReason": "Out of buns"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.backend_server)
        .await;

    // Act
    let response = app
        .post_form(
            "/vendor/orders/o1/decline",
            &[("reason", "Other"), ("other_reason", "Out of buns")],
        )
        .await;

    // Assert
    assert_is_redirect_to(&response, "/vendor/orders");
}

#[tokio::test]
async fn cash_payments_are_recorded() {
    // Arrange
    let app = spawn_logged_in_app().await;
    mock_order(&app, "o3", "Ready to be Delivered", "Pending").await;
    Mock::given(path("/data/food_orders/update/o3"))
        .and(method("PUT"))
        .and(body_partial_json(serde_json::json!({ "paymentStatus": "Paid" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.backend_server)
        .await;

    // Act
    let response = app.post_empty("/vendor/orders/o3/payment").await;

    // Assert
    assert_is_redirect_to(&response, "/vendor/orders");
}

#[tokio::test]
async fn complaints_are_stored() {
    // Arrange
    let app = spawn_logged_in_app().await;
    mock_order(&app, "o3", "Ready to be Delivered", "Pending").await;
    Mock::given(path("/data/complaints/store"))
        .and(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "orderId": "o3",
            "customer": "John Doe",
            "complaint": "Customer refused the order"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.backend_server)
        .await;

    // Act
    let response = app
        .post_form(
            "/vendor/orders/o3/complaint",
            &[("complaint", "Customer refused the order")],
        )
        .await;

    // Assert
    assert_is_redirect_to(&response, "/vendor/orders");
}

#[tokio::test]
async fn menu_items_with_a_negative_price_are_rejected() {
    // Arrange
    let app = spawn_logged_in_app().await;
    app.mock_collection("dishes", serde_json::json!([])).await;
    Mock::given(path("/data/dishes/store"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.backend_server)
        .await;

    // Act
    let response = app
        .post_form("/vendor/menu", &[("name", "Fries"), ("price", "-5")])
        .await;

    // Assert
    assert_is_redirect_to(&response, "/vendor/menu");
    let html_page = app.get_html("/vendor/menu").await;
    assert!(html_page.contains("is not a valid number."));
}

#[tokio::test]
async fn menu_items_are_added_and_removed() {
    // Arrange
    let app = spawn_logged_in_app().await;
    Mock::given(path("/data/dishes/store"))
        .and(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "name": "Veggie Wrap",
            "price": 405.0,
            "imageUrl": "/images/veggie-wrap.jpg"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.backend_server)
        .await;
    Mock::given(path("/data/dishes/delete/d1"))
        .and(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.backend_server)
        .await;

    // Act - Part 1 - Add
    let response = app
        .post_form(
            "/vendor/menu",
            &[
                ("name", "Veggie Wrap"),
                ("price", "405"),
                ("image_url", "/images/veggie-wrap.jpg"),
            ],
        )
        .await;
    assert_is_redirect_to(&response, "/vendor/menu");

    // Act - Part 2 - Remove
    let response = app.post_empty("/vendor/menu/d1/delete").await;
    assert_is_redirect_to(&response, "/vendor/menu");
}

#[tokio::test]
async fn sales_analysis_sums_revenue_per_month() {
    // Arrange
    let app = spawn_logged_in_app().await;
    app.mock_collection(
        "food_orders",
        serde_json::json!([
            {"_id": "o1", "items": ["Fries"], "total": 899, "date": "2025-01-15"},
            {"_id": "o2", "items": ["Fries"], "total": "101", "date": "2025-01-20"},
            {"_id": "o3", "items": ["Veggie Wrap"], "total": 500, "date": "2025-02-03"}
        ]),
    )
    .await;

    // Act
    let html_page = app.get_html("/vendor/analysis/sales?period=all").await;

    // Assert
    assert!(html_page.contains("Total revenue: LKR 1500.00"));
    assert!(html_page.contains("<td>Jan 2025</td>"));
    assert!(html_page.contains("<td>1000</td>"));
    assert!(html_page.contains("width: 100%"));
    assert!(html_page.contains("width: 50%"));
}

#[tokio::test]
async fn menu_analysis_names_the_most_popular_item() {
    // Arrange
    let app = spawn_logged_in_app().await;
    app.mock_collection(
        "dishes",
        serde_json::json!([
            {"_id": "d1", "name": "Cheese Burger", "price": 599},
            {"_id": "d2", "name": "Fries", "price": 669}
        ]),
    )
    .await;
    app.mock_collection(
        "food_orders",
        serde_json::json!([
            {"_id": "o1", "items": ["Cheese Burger", "Fries"], "total": 1268, "date": "2025-01-15"},
            {"_id": "o2", "items": ["Fries"], "total": 669, "date": "2025-01-20"}
        ]),
    )
    .await;

    // Act
    let html_page = app.get_html("/vendor/analysis/menu?period=all").await;

    // Assert
    assert!(html_page.contains("Most popular: Fries (2 orders)"));
    assert!(html_page.contains("Total revenue: LKR 1937.00"));
    assert!(html_page.contains("Total items sold: 3"));
}
