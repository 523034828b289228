//! tests/api/helpers.rs

use campus_dashboard::configuration::get_configuration;
use campus_dashboard::startup::Application;
use campus_dashboard::telemetry::{get_subscriber, init_subscriber};
use fake::faker::internet::en::SafeEmail;
use fake::Fake;
use once_cell::sync::Lazy;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    // We cannot assign the output of `get_subscriber` to a variable based on the
    // value TEST_LOG` because the sink is part of the type returned by
    // `get_subscriber`, therefore they are not the same type.
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct TestAdmin {
    pub email: String,
    pub password: String,
    pub token: String,
}

impl TestAdmin {
    pub fn generate() -> Self {
        Self {
            email: SafeEmail().fake(),
            password: Uuid::new_v4().to_string(),
            token: Uuid::new_v4().to_string(),
        }
    }

    /// Let the mock backend accept this admin and log in.
    pub async fn login(&self, app: &TestApp) -> reqwest::Response {
        Mock::given(path("/auth/admin"))
            .and(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "access_token": &self.token })),
            )
            .mount(&app.backend_server)
            .await;
        app.post_login(&serde_json::json!({
            "email": &self.email,
            "password": &self.password
        }))
        .await
    }
}

pub struct TestApp {
    pub address: String,
    pub backend_server: MockServer,
    pub test_admin: TestAdmin,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// helper for sending a POST /login request
    pub async fn post_login<Body>(&self, body: &Body) -> reqwest::Response
    where
        Body: serde::Serialize,
    {
        self.api_client
            .post(&format!("{}/login", &self.address))
            // This 'reqwest' method makes sure that the body is URL-encoded
            // and the 'Content-Type' header is set accordingly.
            .form(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// helper to get Response from url
    pub async fn get_response_from_url(&self, path: &str) -> reqwest::Response {
        self.api_client
            .get(&format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// helper to get the html of a page
    pub async fn get_html(&self, path: &str) -> String {
        self.get_response_from_url(path).await.text().await.unwrap()
    }

    /// helper to get login html
    pub async fn get_login_html(&self) -> String {
        self.get_html("/login").await
    }

    /// helper to submit a form
    pub async fn post_form<Body>(&self, path: &str, body: &Body) -> reqwest::Response
    where
        Body: serde::Serialize + ?Sized,
    {
        self.api_client
            .post(&format!("{}{}", self.address, path))
            .form(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// helper to send a POST request without a body
    pub async fn post_empty(&self, path: &str) -> reqwest::Response {
        self.api_client
            .post(&format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// helper to log out
    pub async fn post_logout(&self) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/admin/logout", self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// helper to let the mock backend answer `GET /data/{table}/fetch`
    pub async fn mock_collection(&self, table: &str, documents: serde_json::Value) {
        Mock::given(path(format!("/data/{}/fetch", table)))
            .and(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(documents))
            .mount(&self.backend_server)
            .await;
    }

    /// helper to let the mock backend answer `GET /data/{table}/fetch/{id}`
    pub async fn mock_document(&self, table: &str, id: &str, document: serde_json::Value) {
        Mock::given(path(format!("/data/{}/fetch/{}", table, id)))
            .and(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(document))
            .mount(&self.backend_server)
            .await;
    }
}

// Little helper function to assert redirected location
pub fn assert_is_redirect_to(response: &reqwest::Response, location: &str) {
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(response.headers().get("Location").unwrap(), location);
}

/// Spin up an instance of our application against a mock backend
/// and returns its address (i.e. http://localhost:XXXX)
pub async fn spawn_app() -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);

    // Launch a mock server to stand in for the campus backend
    let backend_server = MockServer::start().await;

    // Randomise configuration to ensure test isolation
    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration.");
        // use a random OS port
        c.application.port = 0;
        // use the mock server as backend
        c.backend.base_url = backend_server.uri();
        // keep tests fast if a mock never answers
        c.backend.timeout_milliseconds = 2000;
        c
    };

    let application = Application::build(configuration)
        .await
        .expect("Failed to build application");
    let application_port = application.port();
    let _ = tokio::spawn(application.run_until_stopped());

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .cookie_store(true)
        .build()
        .unwrap();

    TestApp {
        address: format!("http://127.0.0.1:{}", application_port),
        backend_server,
        test_admin: TestAdmin::generate(),
        api_client: client,
    }
}

/// Spin up the application and log the test admin in.
pub async fn spawn_logged_in_app() -> TestApp {
    let app = spawn_app().await;
    let response = app.test_admin.login(&app).await;
    assert_is_redirect_to(&response, "/admin/dashboard");
    app
}
