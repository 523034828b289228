//! tests/api/documents.rs

use crate::helpers::{assert_is_redirect_to, spawn_logged_in_app, TestApp};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

async fn mock_students(app: &TestApp) {
    app.mock_collection(
        "students",
        serde_json::json!([
            {"_id": "s1", "name": "Nimal", "year": 2, "address": {"city": "Kandy"}},
            {"_id": "s2", "name": "Kamala", "year": 3},
            {"_id": "s3", "name": "Saman", "year": 1}
        ]),
    )
    .await;
    Mock::given(path("/data/students/count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "count": 3 })))
        .mount(&app.backend_server)
        .await;
}

#[tokio::test]
async fn the_browser_lists_default_collections() {
    // Arrange
    let app = spawn_logged_in_app().await;

    // Act
    let html_page = app.get_html("/admin/documents").await;

    // Assert
    assert!(html_page.contains(r#"value="event_requests""#));
    assert!(html_page.contains(r#"value="food_orders""#));
}

#[tokio::test]
async fn documents_are_shown_as_scalar_columns() {
    // Arrange
    let app = spawn_logged_in_app().await;
    mock_students(&app).await;

    // Act
    let html_page = app.get_html("/admin/documents?collection=students").await;

    // Assert
    assert!(html_page.contains("<th>name</th>"));
    assert!(html_page.contains("<th>year</th>"));
    assert!(!html_page.contains("<th>address</th>"));
    assert!(html_page.contains("<td>Kamala</td>"));
    assert!(html_page.contains("3 documents, page 1 of 1"));
}

#[tokio::test]
async fn search_and_pagination_work_on_the_filtered_documents() {
    // Arrange
    let app = spawn_logged_in_app().await;
    mock_students(&app).await;

    // Act
    let html_page = app
        .get_html("/admin/documents?collection=students&search=KANDY")
        .await;

    // Assert
    assert!(html_page.contains("1 documents, page 1 of 1"));
    assert!(html_page.contains("<td>Nimal</td>"));
    assert!(!html_page.contains("<td>Saman</td>"));
}

#[tokio::test]
async fn the_json_view_shows_whole_documents() {
    // Arrange
    let app = spawn_logged_in_app().await;
    mock_students(&app).await;

    // Act
    let html_page = app
        .get_html("/admin/documents?collection=students&view=json")
        .await;

    // Assert
    assert!(html_page.contains("Kandy"));
}

#[tokio::test]
async fn invalid_json_is_not_stored() {
    // Arrange
    let app = spawn_logged_in_app().await;
    mock_students(&app).await;
    Mock::given(path("/data/students/create"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.backend_server)
        .await;

    // Act
    let response = app
        .post_form("/admin/documents/students", &[("json", "{not json")])
        .await;

    // Assert
    assert_is_redirect_to(&response, "/admin/documents?collection=students");
    let html_page = app.get_html("/admin/documents?collection=students").await;
    assert!(html_page.contains("<p><i>Invalid JSON format</i></p>"));
}

#[tokio::test]
async fn new_documents_are_created_from_json() {
    // Arrange
    let app = spawn_logged_in_app().await;
    Mock::given(path("/data/students/create"))
        .and(method("POST"))
        .and(body_json(serde_json::json!({ "name": "Ruwan", "year": 4 })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.backend_server)
        .await;

    // Act
    let response = app
        .post_form(
            "/admin/documents/students",
            &[("json", r#"{"name": "Ruwan", "year": 4}"#)],
        )
        .await;

    // Assert
    assert_is_redirect_to(&response, "/admin/documents?collection=students");
}

#[tokio::test]
async fn edited_documents_keep_their_field_types() {
    // Arrange
    let app = spawn_logged_in_app().await;
    app.mock_document(
        "students",
        "s1",
        serde_json::json!({
            "_id": "s1",
            "name": "Nimal",
            "year": 2,
            "active": true,
            "address": {"city": "Kandy"}
        }),
    )
    .await;
    Mock::given(path("/data/students/update/s1"))
        .and(method("PUT"))
        .and(body_json(serde_json::json!({
            "name": "Nimal Perera",
            "year": 3,
            "active": false,
            "address": {"city": "Galle"}
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.backend_server)
        .await;

    // Act - Part 1 - The form is flattened into dot keys
    let html_page = app.get_html("/admin/documents/students/s1/edit").await;
    assert!(html_page.contains(r#"name="address.city""#));
    assert!(!html_page.contains(r#"name="_id""#));

    // Act - Part 2 - Submit
    let response = app
        .post_form(
            "/admin/documents/students/s1/edit",
            &[
                ("name", "Nimal Perera"),
                ("year", "3"),
                ("active", "false"),
                ("address.city", "Galle"),
            ],
        )
        .await;

    // Assert
    assert_is_redirect_to(&response, "/admin/documents?collection=students");
}

#[tokio::test]
async fn documents_can_be_deleted() {
    // Arrange
    let app = spawn_logged_in_app().await;
    Mock::given(path("/data/students/delete/s2"))
        .and(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.backend_server)
        .await;

    // Act
    let response = app
        .post_empty("/admin/documents/students/s2/delete")
        .await;

    // Assert
    assert_is_redirect_to(&response, "/admin/documents?collection=students");
}

#[tokio::test]
async fn created_collections_are_offered_for_the_rest_of_the_session() {
    // Arrange
    let app = spawn_logged_in_app().await;
    Mock::given(path("/data/create-collection"))
        .and(method("POST"))
        .and(body_json(serde_json::json!({ "name": "lab_results" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.backend_server)
        .await;
    app.mock_collection("lab_results", serde_json::json!([])).await;

    // Act
    let response = app
        .post_form("/admin/documents/collections", &[("name", "lab_results")])
        .await;

    // Assert
    assert_is_redirect_to(&response, "/admin/documents?collection=lab_results");
    let html_page = app.get_html("/admin/documents").await;
    assert!(html_page.contains(r#"value="lab_results""#));
}

#[tokio::test]
async fn collections_need_a_name() {
    // Arrange
    let app = spawn_logged_in_app().await;
    Mock::given(path("/data/create-collection"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.backend_server)
        .await;

    // Act
    let response = app
        .post_form("/admin/documents/collections", &[("name", "")])
        .await;

    // Assert
    assert_is_redirect_to(&response, "/admin/documents");
    let html_page = app.get_html("/admin/documents").await;
    assert!(html_page.contains("<p><i>Collection name is required</i></p>"));
}

#[tokio::test]
async fn passwords_are_hashed_by_the_backend() {
    // Arrange
    let app = spawn_logged_in_app().await;
    Mock::given(path("/custom/hash-password"))
        .and(method("POST"))
        .and(body_json(serde_json::json!({ "plaintext": "hunter2" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "hash": "hashed-hunter2" })),
        )
        .expect(1)
        .mount(&app.backend_server)
        .await;

    // Act
    let response = app
        .post_form(
            "/admin/documents/hash_password",
            &[("password", "hunter2"), ("collection", "")],
        )
        .await;

    // Assert
    assert_is_redirect_to(&response, "/admin/documents");
    let html_page = app.get_html("/admin/documents").await;
    assert!(html_page.contains("Password hash: hashed-hunter2"));
}

#[tokio::test]
async fn an_empty_password_is_not_hashed() {
    // Arrange
    let app = spawn_logged_in_app().await;
    Mock::given(path("/custom/hash-password"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.backend_server)
        .await;

    // Act
    let response = app
        .post_form("/admin/documents/hash_password", &[("password", "")])
        .await;

    // Assert
    assert_is_redirect_to(&response, "/admin/documents");
    let html_page = app.get_html("/admin/documents").await;
    assert!(html_page.contains("Password is required"));
}

#[tokio::test]
async fn documents_are_exported_as_csv() {
    // Arrange
    let app = spawn_logged_in_app().await;
    mock_students(&app).await;

    // Act
    let response = app
        .get_response_from_url("/admin/documents/students/export?search=kamala")
        .await;

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let csv = response.text().await.unwrap();
    assert_eq!(csv, "_id,name,year\ns2,Kamala,3\n");
}
