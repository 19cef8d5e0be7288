#![allow(dead_code)]

use chrono::NaiveDateTime;
use httpmock::{Method::GET, Mock, MockServer};
use serde_json::{Value, json};
use stockgeist_rs::{SgClient, time::parse_timestamp};
use url::Url;

pub const TOKEN: &str = "test-token";

pub fn client_for(server: &MockServer) -> SgClient {
    SgClient::builder()
        .token(TOKEN)
        .base_url(Url::parse(&server.base_url()).unwrap())
        .build()
        .unwrap()
}

pub fn ts(s: &str) -> NaiveDateTime {
    parse_timestamp(s).unwrap()
}

/// A response envelope as the API sends it.
pub fn envelope(status_code: u16, message: &str, body: Value) -> Value {
    json!({
        "metadata": {
            "status_code": status_code,
            "message": message,
            "credits": 99314258,
            "server_timestamp": "2021-06-23 10:20:12.617781+00:00"
        },
        "body": body
    })
}

pub fn ok(body: Value) -> Value {
    envelope(200, "OK", body)
}

/// Message-metrics style records, oldest first.
pub fn records(symbol: &str, timestamps: &[&str]) -> Value {
    let rows: Vec<Value> = timestamps
        .iter()
        .enumerate()
        .map(|(i, t)| {
            json!({
                "symbol": symbol,
                "timestamp": t,
                "total_count": 10 + i,
                "ma_diff": 0.5
            })
        })
        .collect();
    Value::Array(rows)
}

/// One page of `path`, served when the request carries `end`.
pub fn mock_page<'a>(server: &'a MockServer, path: &str, end: &str, response: Value) -> Mock<'a> {
    server.mock(|when, then| {
        when.method(GET)
            .path(format!("/{path}"))
            .query_param("token", TOKEN)
            .query_param("end", end);
        then.status(200)
            .header("content-type", "application/json")
            .json_body(response);
    })
}
