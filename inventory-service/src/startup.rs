use crate::config::InventoryConfig;
use crate::handlers;
use crate::services::{seed, InventoryService, InvoicingService, Store};
use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::Router;
use service_core::error::AppError;
use service_core::middleware::metrics::metrics_middleware;
use service_core::middleware::tracing::request_id_middleware;
use std::future::IntoFuture;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: InventoryConfig,
    pub inventory: InventoryService,
    pub invoicing: InvoicingService,
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    pub async fn build(config: InventoryConfig) -> Result<Self, AppError> {
        let store = Store::new();
        let inventory = InventoryService::new(store.clone())?;

        if config.seed.demo_items {
            seed::seed_demo_items(&inventory)?;
        }

        let invoicing = InvoicingService::new(store, inventory.clone());

        let state = AppState {
            config: config.clone(),
            inventory,
            invoicing,
        };

        let cors = build_cors(&config.security.allowed_origins)?;

        let app = Router::new()
            .route("/health", get(handlers::health_check))
            .route("/metrics", get(handlers::metrics_endpoint))
            .route(
                "/api/items",
                get(handlers::list_items).post(handlers::create_item),
            )
            .route(
                "/api/items/:item_id",
                get(handlers::get_item)
                    .put(handlers::update_item)
                    .delete(handlers::delete_item),
            )
            .route(
                "/api/items/:item_id/adjust_stock",
                post(handlers::adjust_stock),
            )
            .route(
                "/api/receipts",
                get(handlers::list_receipts).post(handlers::receive_stock),
            )
            .route(
                "/api/invoices",
                get(handlers::list_invoices).post(handlers::create_invoice),
            )
            .route(
                "/api/invoices/:invoice_id",
                get(handlers::get_invoice).put(handlers::update_invoice),
            )
            .route("/api/stats", get(handlers::get_stats))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(from_fn(request_id_middleware))
                    .layer(from_fn(metrics_middleware))
                    .layer(cors),
            )
            .with_state(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(port, "Listening");

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}

fn build_cors(allowed_origins: &[String]) -> Result<CorsLayer, AppError> {
    let origins = allowed_origins
        .iter()
        .map(|origin| {
            origin.parse::<HeaderValue>().map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("Invalid CORS origin '{}': {}", origin, e))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-actor"),
        ])
        .allow_credentials(true))
}
