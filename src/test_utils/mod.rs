#![allow(missing_docs)]

pub(crate) mod html;
pub(crate) mod http;

use std::sync::{Arc, Mutex};

use axum::{body::Body, response::Response};
use rusqlite::Connection;
use serde::de::DeserializeOwned;

use crate::initialize_db;

pub(crate) use html::{assert_valid_html, parse_html_document, parse_html_fragment, select_text};
pub(crate) use http::{assert_content_type, assert_status_ok};

/// An initialised in-memory database ready to be shared with handlers.
pub(crate) fn must_create_test_connection() -> Arc<Mutex<Connection>> {
    let connection =
        Connection::open_in_memory().expect("Could not open database in memory.");
    initialize_db(&connection).expect("Could not initialize database.");

    Arc::new(Mutex::new(connection))
}

pub(crate) async fn parse_json<T: DeserializeOwned>(response: Response<Body>) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not get response body");

    serde_json::from_slice(&body).expect("Could not parse response body as JSON")
}
