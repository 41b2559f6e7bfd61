//! A stand-in for the handful of Solr endpoints the transport core talks to.
//!
//! `select` echoes back what it received so tests can check the exact query,
//! body and content type that went over the wire.

use axum::{
    extract::RawQuery,
    http::{header, HeaderMap, Method, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Body returned by `/solr/select`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Echo {
    pub method: String,
    pub query: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/solr/select", get(select).post(select))
        .route("/solr/update", post(update))
        .route("/solr/admin/ping", get(ping))
        .fallback(not_found)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn select(method: Method, RawQuery(query): RawQuery, headers: HeaderMap, body: String) -> Json<Echo> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    Json(Echo {
        method: method.to_string(),
        query,
        content_type,
        body,
    })
}

async fn update(body: String) -> (StatusCode, Json<Value>) {
    if body.is_empty() {
        let error = json!({"responseHeader": {"status": 400}, "error": {"msg": "missing content stream"}});
        return (StatusCode::BAD_REQUEST, Json(error));
    }
    (StatusCode::OK, Json(json!({"responseHeader": {"status": 0}})))
}

async fn ping() -> Json<Value> {
    Json(json!({"status": "OK"}))
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "not found")
}
