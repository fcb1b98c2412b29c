use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{Html, Json},
};
use serde_json::{json, Value};

use crate::readiness::ReadinessCheck;

pub const NOT_FOUND_DESCRIPTION: &str = "metodo no encontrado";

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

pub async fn readiness(check: Arc<dyn ReadinessCheck>) -> (StatusCode, Json<Value>) {
    let store = check.store_ready().await;
    let (code, status) = if store {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };
    (code, Json(json!({ "status": status, "store": store })))
}

/// Unknown paths and unsupported methods answer 200 with a fixed description.
pub async fn not_found() -> Json<Value> {
    Json(json!({ "description": NOT_FOUND_DESCRIPTION }))
}

pub async fn serve_docs() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8"/>
  <title>API Grupo GASON</title>
  <script src="https://unpkg.com/@stoplight/elements@latest/web-components.min.js"></script>
  <link rel="stylesheet" href="https://unpkg.com/@stoplight/elements@latest/styles.min.css">
</head>
<body>
  <elements-api apiDescriptionUrl="/openapi.json" router="hash" layout="sidebar"></elements-api>
</body>
</html>"#,
    )
}
