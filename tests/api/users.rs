//! tests/api/users.rs
//!
//! Users, lectures and news screens of the admin area.

use crate::helpers::{assert_is_redirect_to, spawn_logged_in_app};
use wiremock::matchers::{any, body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn users_are_listed_with_their_role() {
    // Arrange
    let app = spawn_logged_in_app().await;
    app.mock_collection(
        "users",
        serde_json::json!([
            {"_id": "u1", "name": "Nimal Perera", "email": "nimal@campus.edu", "role": "student"},
            {"_id": "u2", "name": "Kamala Silva", "email": "kamala@campus.edu", "role": "lecturer"}
        ]),
    )
    .await;

    // Act
    let html_page = app.get_html("/admin/users").await;

    // Assert
    assert!(html_page.contains("Nimal Perera"));
    assert!(html_page.contains("kamala@campus.edu | lecturer"));
}

#[tokio::test]
async fn updating_a_user_keeps_unedited_fields() {
    // Arrange
    let app = spawn_logged_in_app().await;
    app.mock_document(
        "users",
        "u1",
        serde_json::json!({
            "_id": "u1",
            "name": "Nimal",
            "email": "nimal@campus.edu",
            "role": "student",
            "faculty": "Science"
        }),
    )
    .await;
    Mock::given(path("/data/users/update/u1"))
        .and(method("PUT"))
        .and(body_json(serde_json::json!({
            "name": "Nimal Perera",
            "email": "nimal.perera@campus.edu",
            "role": "staff",
            "faculty": "Science"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.backend_server)
        .await;

    // Act
    let response = app
        .post_form(
            "/admin/users/u1",
            &[
                ("name", "Nimal Perera"),
                ("email", "nimal.perera@campus.edu"),
                ("role", "staff"),
            ],
        )
        .await;

    // Assert
    assert_is_redirect_to(&response, "/admin/users");
}

#[tokio::test]
async fn users_need_a_name() {
    // Arrange
    let app = spawn_logged_in_app().await;
    Mock::given(path("/data/users/update/u1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.backend_server)
        .await;
    app.mock_collection("users", serde_json::json!([])).await;

    // Act
    let response = app
        .post_form(
            "/admin/users/u1",
            &[("name", " "), ("email", ""), ("role", "")],
        )
        .await;

    // Assert
    assert_is_redirect_to(&response, "/admin/users");
    let html_page = app.get_html("/admin/users").await;
    assert!(html_page.contains("<p><i>`name` is required.</i></p>"));
}

#[tokio::test]
async fn lectures_are_stored() {
    // Arrange
    let app = spawn_logged_in_app().await;
    Mock::given(path("/data/lectures/store"))
        .and(method("POST"))
        .and(body_json(serde_json::json!({
            "course": "Distributed Systems",
            "lecturer": "Dr. Fernando",
            "time": "10:00",
            "room": "B2",
            "department": "Computing",
            "day": "Monday"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.backend_server)
        .await;

    // Act
    let response = app
        .post_form(
            "/admin/lectures",
            &[
                ("course", "Distributed Systems"),
                ("lecturer", "Dr. Fernando"),
                ("time", "10:00"),
                ("room", "B2"),
                ("department", "Computing"),
                ("day", "Monday"),
            ],
        )
        .await;

    // Assert
    assert_is_redirect_to(&response, "/admin/lectures");
}

#[tokio::test]
async fn news_without_title_are_not_published() {
    // Arrange
    let app = spawn_logged_in_app().await;
    Mock::given(path("/data/news/store"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.backend_server)
        .await;
    app.mock_collection("news", serde_json::json!([])).await;

    // Act
    let response = app
        .post_form("/admin/news", &[("news_title", ""), ("news_content", "Body")])
        .await;

    // Assert
    assert_is_redirect_to(&response, "/admin/news");
    let html_page = app.get_html("/admin/news").await;
    assert!(html_page.contains("`news_title` is required."));
}

#[tokio::test]
async fn news_are_listed() {
    // Arrange
    let app = spawn_logged_in_app().await;
    app.mock_collection(
        "news",
        serde_json::json!([{"news_title": "Library hours extended", "news_content": "Open until 22:00"}]),
    )
    .await;
    Mock::given(any())
        .and(path("/data/news/store"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.backend_server)
        .await;

    // Act
    let html_page = app.get_html("/admin/news").await;

    // Assert
    assert!(html_page.contains("Library hours extended"));
}
