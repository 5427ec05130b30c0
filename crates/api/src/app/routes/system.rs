use axum::{extract::OriginalUri, Json};
use serde::{Serialize, Serializer};

use catalog_core::DomainError;

use crate::app::errors::ApiError;

const ENDPOINTS: &[(&str, &str)] = &[
    ("POST /api/items", "Create a new item"),
    ("GET /api/items/{id}", "Get item by ID"),
    ("GET /api/items", "Get all items (optionally ?category=)"),
    ("PUT /api/items/{id}", "Update an item"),
    ("DELETE /api/items/{id}", "Delete an item"),
    ("GET /api/items/health", "Health check"),
    ("GET /api/items/stats", "Catalog statistics"),
];

/// Route table, serialized as a JSON object in declaration order.
#[derive(Debug)]
pub struct EndpointIndex(&'static [(&'static str, &'static str)]);

impl Serialize for EndpointIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(route, summary)| (route, summary)))
    }
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub application: &'static str,
    pub description: &'static str,
    pub version: &'static str,
    pub status: &'static str,
    pub endpoints: EndpointIndex,
    pub message: &'static str,
}

pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        application: "Item Catalog API",
        description: "A simple REST API for managing a collection of items (products, movies, etc.)",
        version: env!("CARGO_PKG_VERSION"),
        status: "Live",
        endpoints: EndpointIndex(ENDPOINTS),
        message: "API is running. Use the endpoints above to interact with the catalog.",
    })
}

pub async fn fallback(OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError(DomainError::not_found(format!("No endpoint for {}", uri.path())))
}
