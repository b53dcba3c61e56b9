//! HTTP adapter over the tool dispatch facade.
//!
//! One POST route per operation (path = operation name, body = argument
//! object), plus `GET /tools` returning the operation catalog. Errors map
//! to a status code per kind with an `{"error": message}` body.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::error::ToolError;
use crate::tools::{tool_definitions, ToolDispatcher};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<ToolDispatcher>,
}

/// Build the router: `/tools` for the catalog and one route per operation.
pub fn build_router(dispatcher: Arc<ToolDispatcher>) -> Router {
    let state = AppState { dispatcher };

    let mut router = Router::new().route("/tools", get(list_tools));
    for definition in tool_definitions() {
        let path = format!("/{}", definition.name);
        let name = definition.name;
        router = router.route(
            &path,
            post(move |State(state): State<AppState>, body: Bytes| {
                let name = name.clone();
                async move { invoke_tool(state, name, body).await }
            }),
        );
    }

    router.with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(addr: SocketAddr, dispatcher: Arc<ToolDispatcher>) -> Result<()> {
    let app = build_router(dispatcher).layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")
}

/// GET /tools - the operation catalog.
async fn list_tools() -> Json<Value> {
    Json(json!({ "tools": tool_definitions() }))
}

/// POST /<operation> - invoke one operation. An empty body counts as an
/// empty argument object.
async fn invoke_tool(state: AppState, name: String, body: Bytes) -> Response {
    let args: Value = if body.is_empty() {
        json!({})
    } else {
        match serde_json::from_slice(&body) {
            Ok(value) => value,
            Err(e) => {
                let err = ToolError::invalid(format!("invalid JSON body: {}", e));
                return (err.http_status(), Json(error_body(&err))).into_response();
            }
        }
    };

    match state.dispatcher.dispatch(&name, &args).await {
        Ok(payload) => (StatusCode::OK, Json(payload)).into_response(),
        Err(err) => {
            warn!("tool {} failed: {}", name, err);
            (err.http_status(), Json(error_body(&err))).into_response()
        }
    }
}

fn error_body(err: &ToolError) -> Value {
    json!({ "error": err.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_shape() {
        let body = error_body(&ToolError::invalid("missing or invalid \"title\" argument"));
        assert_eq!(
            body["error"],
            "invalid request: missing or invalid \"title\" argument"
        );
    }

    #[test]
    fn test_operation_names_make_unique_routes() {
        let mut paths: Vec<String> = tool_definitions()
            .iter()
            .map(|d| format!("/{}", d.name))
            .collect();
        let total = paths.len();
        paths.sort();
        paths.dedup();

        assert_eq!(paths.len(), total);
        assert!(paths.iter().all(|p| !p.contains(' ')));
    }
}
