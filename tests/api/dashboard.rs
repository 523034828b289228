//! tests/api/dashboard.rs

use crate::helpers::{assert_is_redirect_to, spawn_app, spawn_logged_in_app};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn you_must_be_logged_in_to_access_any_dashboard_area() {
    // Arrange
    let app = spawn_app().await;

    for page in [
        "/admin/dashboard",
        "/admin/events",
        "/admin/documents",
        "/mic/dashboard",
        "/mic/analysis",
        "/vendor/orders",
        "/vendor/analysis/sales",
    ] {
        // Act
        let response = app.get_response_from_url(page).await;

        // Assert
        assert_is_redirect_to(&response, "/login");
    }
}

#[tokio::test]
async fn logout_clears_session_state() {
    // Arrange
    let app = spawn_logged_in_app().await;

    // Act - Part 1 - Logout
    let response = app.post_logout().await;
    assert_is_redirect_to(&response, "/login");

    // Act - Part 2 - Follow the redirect
    let html_page = app.get_login_html().await;
    assert!(html_page.contains("<p><i>You have successfully logged out.</i></p>"));

    // Act - Part 3 - Attempt to load admin panel
    let response = app.get_response_from_url("/admin/dashboard").await;
    assert_is_redirect_to(&response, "/login");
}

#[tokio::test]
async fn the_dashboard_shows_the_system_monitor() {
    // Arrange
    let app = spawn_logged_in_app().await;
    Mock::given(path("/data/admin_sys_stats/fetch"))
        .and(method("GET"))
        .and(header(
            "Authorization",
            format!("Bearer {}", app.test_admin.token).as_str(),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"timestamp": "2025-04-12T10:00:00Z", "cpu_usage": 12.5, "ram_usage": 40, "storage_usage": 71},
            {"timestamp": "2025-04-12T10:00:05Z", "cpu_usage": 87.25, "ram_usage": 41, "storage_usage": 71}
        ])))
        .expect(1)
        .mount(&app.backend_server)
        .await;
    app.mock_collection(
        "crowd_uplink",
        serde_json::json!([{"_id": "c1", "location": "Library", "count": 57}]),
    )
    .await;

    // Act
    let html_page = app.get_html("/admin/dashboard").await;

    // Assert
    assert!(html_page.contains(r#"<meta http-equiv="refresh" content="5">"#));
    assert!(html_page.contains("87.25"));
    assert!(html_page.contains("1 records"));
    assert!(html_page.contains("Library"));
}

#[tokio::test]
async fn the_dashboard_survives_a_failing_monitor() {
    // Arrange
    let app = spawn_logged_in_app().await;
    Mock::given(path("/data/admin_sys_stats/fetch"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.backend_server)
        .await;

    // Act
    let response = app.get_response_from_url("/admin/dashboard").await;

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let html_page = response.text().await.unwrap();
    assert!(html_page.contains("No system statistics available."));
}

#[tokio::test]
async fn an_expired_session_sends_the_admin_back_to_login() {
    // Arrange
    let app = spawn_logged_in_app().await;
    Mock::given(path("/data/events/fetch"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&app.backend_server)
        .await;

    // Act
    let response = app.get_response_from_url("/admin/events").await;

    // Assert
    assert_is_redirect_to(&response, "/login");
    let html_page = app.get_login_html().await;
    assert!(html_page.contains("Invalid API or Session has expired, Please log back in"));
}

#[tokio::test]
async fn the_mic_dashboard_links_mic_screens() {
    // Arrange
    let app = spawn_logged_in_app().await;

    // Act
    let html_page = app.get_html("/mic/dashboard").await;

    // Assert
    assert!(html_page.contains("MIC Dashboard"));
    assert!(html_page.contains("Event Analysis"));
}
