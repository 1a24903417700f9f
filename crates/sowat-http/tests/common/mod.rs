//! Shared fixtures for the mock-backend tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use serde_json::{Value, json};
use sowat_core::{ApiUrl, MemoryStore, Navigator, Notifier, TokenPair};
use sowat_http::{ApiClient, ClientConfig};
use wiremock::MockServer;

/// Collects every notification the client raises.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Records every redirect to the login route.
#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<String> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect_to_login(&self, route: &str) {
        self.routes.lock().unwrap().push(route.to_string());
    }
}

/// A client pointed at the mock server, with recorders attached.
pub struct Harness {
    pub client: ApiClient,
    pub store: Arc<MemoryStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub navigator: Arc<RecordingNavigator>,
}

impl Harness {
    pub fn new(server: &MockServer) -> Self {
        let store = Arc::new(MemoryStore::new());
        let notifier = Arc::new(RecordingNotifier::default());
        let navigator = Arc::new(RecordingNavigator::default());

        let config = ClientConfig::new(ApiUrl::new(&server.uri()).unwrap());
        let client = ApiClient::builder(config)
            .store(store.clone())
            .notifier(notifier.clone())
            .navigator(navigator.clone())
            .build()
            .unwrap();

        Self {
            client,
            store,
            notifier,
            navigator,
        }
    }

    /// Seed storage as a previous login would have.
    pub fn with_tokens(self, access: &str, refresh: Option<&str>) -> Self {
        self.client
            .session()
            .store_login(&TokenPair::new(access, refresh.map(str::to_string)))
            .unwrap();
        self
    }

    pub fn access_token(&self) -> Option<String> {
        self.client
            .session()
            .access_token()
            .unwrap()
            .map(|t| t.as_str().to_string())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.client
            .session()
            .refresh_token()
            .unwrap()
            .map(|t| t.as_str().to_string())
    }
}

pub fn admin_user() -> Value {
    json!({
        "id": "u-admin",
        "email": "admin@sowat.io",
        "name": "Admin",
        "isAdmin": true,
        "createdAt": "2024-05-01T10:00:00Z",
        "updatedAt": "2024-05-01T10:00:00Z"
    })
}

pub fn regular_user() -> Value {
    json!({
        "id": "u-42",
        "email": "writer@example.com",
        "name": "Writer",
        "isAdmin": false
    })
}

pub fn user_page() -> Value {
    json!({
        "data": [admin_user()],
        "meta": {"page": 1, "limit": 20, "total": 1, "totalPages": 1, "hasNext": false, "hasPrev": false}
    })
}

/// Authorization header values of every request the server saw on `path`.
pub async fn auth_headers(server: &MockServer, path: &str) -> Vec<Option<String>> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == path)
        .map(|r| {
            r.headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        })
        .collect()
}
