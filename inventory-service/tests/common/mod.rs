//! Shared helpers for inventory-service integration tests.

use inventory_service::config::{InventoryConfig, SecurityConfig, SeedConfig};
use inventory_service::services::init_metrics;
use inventory_service::startup::Application;
use serde_json::Value;
use service_core::config::Config as CoreConfig;
use std::sync::Once;

static INIT: Once = Once::new();

/// Install metrics and tracing once per test binary.
fn init_telemetry() {
    INIT.call_once(|| {
        init_metrics();
        tracing_subscriber::fmt()
            .with_env_filter("info,inventory_service=debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application on a random port with seeding disabled.
    pub async fn spawn() -> Self {
        init_telemetry();

        let config = InventoryConfig {
            common: CoreConfig {
                port: 0,
                log_level: "debug".to_string(),
            },
            security: SecurityConfig {
                allowed_origins: vec!["http://localhost:5173".to_string()],
            },
            seed: SeedConfig { demo_items: false },
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");
        let port = app.port();

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        let address = format!("http://127.0.0.1:{}", port);
        let client = reqwest::Client::new();

        // Wait for the server to accept requests.
        for _ in 0..50 {
            if client
                .get(format!("{}/health", address))
                .send()
                .await
                .is_ok()
            {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;
        }

        TestApp { address, client }
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute GET request")
    }

    pub async fn post(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute POST request")
    }

    pub async fn put(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .put(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute PUT request")
    }

    pub async fn delete(&self, path: &str) -> reqwest::Response {
        self.client
            .delete(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute DELETE request")
    }

    /// Create an item and return the response body. Panics unless the
    /// creation succeeds, so tests can focus on what they actually assert.
    pub async fn create_item(&self, body: Value) -> Value {
        let response = self.post("/api/items", &body).await;
        assert_eq!(response.status().as_u16(), 201, "item creation failed");
        response.json().await.expect("Failed to parse item JSON")
    }
}
