//! Shared test helpers for integration tests.
//!
//! Every test gets its own fake GasDesk API bound to an ephemeral port and
//! a web front pointed at it.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Request, StatusCode, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tower::ServiceExt;

use gasdesk_client::ApiClient;
use gasdesk_core::config::{AppConfig, ResolverConfig};
use gasdesk_web::WebState;

/// Token of a Sales user holding `customer:view` and `order:manage`.
pub const SALES_TOKEN: &str = "sales-token";
/// Token of a Super Admin whose role carries an empty permission list.
pub const ADMIN_TOKEN: &str = "admin-token";
/// Token of a user whose role carries no permission list at all.
pub const BARE_TOKEN: &str = "bare-token";
/// Token the API rejects with 401.
pub const EXPIRED_TOKEN: &str = "expired-token";

/// Call counters of the fake API.
#[derive(Debug, Default)]
pub struct ApiCalls {
    pub me: AtomicUsize,
    pub login: AtomicUsize,
}

impl ApiCalls {
    pub fn me_calls(&self) -> usize {
        self.me.load(Ordering::SeqCst)
    }

    pub fn login_calls(&self) -> usize {
        self.login.load(Ordering::SeqCst)
    }
}

fn user(id: i64, name: &str, role: &str, permissions: Option<&[&str]>) -> Value {
    let permissions = permissions.map(|names| {
        names
            .iter()
            .map(|n| json!({ "name": n }))
            .collect::<Vec<_>>()
    });
    json!({
        "id": id,
        "name": name,
        "email": format!("{}@example.com", name.to_lowercase()),
        "role": { "id": id, "role_name": role, "permissions": permissions },
    })
}

async fn me(State(calls): State<Arc<ApiCalls>>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    calls.me.fetch_add(1, Ordering::SeqCst);
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or_default();

    match token {
        SALES_TOKEN => (
            StatusCode::OK,
            Json(user(1, "Sam", "Sales", Some(&["customer:view", "order:manage"]))),
        ),
        ADMIN_TOKEN => (StatusCode::OK, Json(user(2, "Ada", "Super Admin", Some(&[])))),
        BARE_TOKEN => (StatusCode::OK, Json(user(3, "Bo", "Driver", None))),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Unauthenticated." })),
        ),
    }
}

async fn login(State(calls): State<Arc<ApiCalls>>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    calls.login.fetch_add(1, Ordering::SeqCst);
    if body["username"] == "sam" && body["password"] == "cylinder" {
        (StatusCode::OK, Json(json!({ "token": SALES_TOKEN })))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid username or password" })),
        )
    }
}

/// Start a fake API and return its base URL.
async fn spawn_api(calls: Arc<ApiCalls>) -> String {
    let app = Router::new()
        .route("/api/auth/me", get(me))
        .route("/api/auth/login", post(login))
        .with_state(calls);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake API");
    let addr = listener.local_addr().expect("Failed to read fake API address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Fake API stopped");
    });
    format!("http://{addr}/api")
}

/// A base URL nothing listens on.
fn unreachable_api() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind an ephemeral port");
    let addr = listener.local_addr().expect("Failed to read the ephemeral address");
    drop(listener);
    format!("http://{addr}/api")
}

/// Test application context
pub struct TestApp {
    /// The Axum app under test
    pub router: Router,
    /// Calls seen by the fake API
    pub calls: Arc<ApiCalls>,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// A web front backed by a working fake API.
    pub async fn new() -> Self {
        let calls = Arc::new(ApiCalls::default());
        let base_url = spawn_api(calls.clone()).await;
        Self::with_api(base_url, calls)
    }

    /// A web front whose API cannot be reached.
    pub fn offline() -> Self {
        Self::with_api(unreachable_api(), Arc::new(ApiCalls::default()))
    }

    fn with_api(base_url: String, calls: Arc<ApiCalls>) -> Self {
        let mut config = AppConfig::default();
        config.api.base_url = base_url;
        config.api.timeout_seconds = 5;
        config.resolver = ResolverConfig {
            retry_attempts: 0,
            retry_interval_ms: 0,
            ..ResolverConfig::default()
        };

        let client = ApiClient::new(&config.api).expect("Failed to build API client");
        let state = WebState::new(config.clone(), Arc::new(client));

        Self {
            router: gasdesk_web::build_app(state),
            calls,
            config,
        }
    }

    /// `GET path`, optionally with a session cookie.
    pub async fn get(&self, path: &str, token: Option<&str>) -> TestResponse {
        self.send("GET", path, token, None).await
    }

    /// `POST path` with a URL-encoded form body.
    pub async fn post_form(&self, path: &str, token: Option<&str>, form: &str) -> TestResponse {
        self.send("POST", path, token, Some(form)).await
    }

    async fn send(&self, method: &str, path: &str, token: Option<&str>, form: Option<&str>) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            req = req.header(header::COOKIE, format!("session_token={token}"));
        }
        if form.is_some() {
            req = req.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        }
        let req = req
            .body(Body::from(form.unwrap_or_default().to_string()))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&body_bytes).into_owned(),
        }
    }
}

/// Response captured from the app.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header, if any.
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// All `Set-Cookie` headers.
    pub fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect()
    }

    /// The `Set-Cookie` header for the session cookie, if any.
    pub fn session_cookie(&self) -> Option<String> {
        self.set_cookies()
            .into_iter()
            .find(|c| c.starts_with("session_token="))
    }

    /// The body parsed as JSON.
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}
