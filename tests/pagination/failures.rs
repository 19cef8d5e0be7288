use httpmock::{Method::GET, MockServer};
use serde_json::json;
use stockgeist_rs::SgError;

use crate::common::{TOKEN, client_for, envelope, mock_page, ok, records, ts};

const PATH: &str = "time-series/article-metrics";

#[tokio::test]
async fn failure_status_stops_and_is_returned_last() {
    let server = MockServer::start();

    let p1 = mock_page(
        &server,
        PATH,
        "2021-05-20T15:40:00",
        ok(records("NVDA", &["2021-05-20T10:00:00", "2021-05-20T15:40:00"])),
    );
    let p2 = mock_page(
        &server,
        PATH,
        "2021-05-20T10:00:00",
        envelope(503, "Service temporarily unavailable", json!([])),
    );
    let p3 = mock_page(
        &server,
        PATH,
        "2021-05-20T05:00:00",
        ok(records("NVDA", &["2021-05-20T00:05:00", "2021-05-20T05:00:00"])),
    );

    let client = client_for(&server);
    let seq = client
        .article_metrics("NVDA")
        .between(ts("2021-05-20T00:05:00"), ts("2021-05-20T15:40:00"))
        .fetch_raw()
        .await
        .unwrap();

    p1.assert_hits(1);
    p2.assert_hits(1);
    p3.assert_hits(0);

    assert_eq!(seq.len(), 2);
    let last = seq.batches.last().unwrap();
    assert_eq!(last.metadata.status_code, 503);
    assert_eq!(seq.first_failure(), Some(last));
}

#[tokio::test]
async fn typed_fetch_surfaces_api_message() {
    let server = MockServer::start();

    mock_page(
        &server,
        PATH,
        "2021-05-20T15:40:00",
        envelope(401, "Invalid token", json!(null)),
    );

    let client = client_for(&server);
    let err = client
        .article_metrics("NVDA")
        .between(ts("2021-05-20T00:05:00"), ts("2021-05-20T15:40:00"))
        .fetch()
        .await
        .unwrap_err();

    match err {
        SgError::Api { status_code, message } => {
            assert_eq!(status_code, 401);
            assert_eq!(message, "Invalid token");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_2xx_with_envelope_is_a_batch() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET).path(format!("/{PATH}"));
        then.status(429)
            .header("content-type", "application/json")
            .json_body(envelope(429, "Not enough credits", json!([])));
    });

    let client = client_for(&server);
    let seq = client.article_metrics("NVDA").fetch_raw().await.unwrap();

    mock.assert_hits(1);
    assert_eq!(seq.batches[0].metadata.status_code, 429);
    assert_eq!(seq.batches[0].metadata.message, "Not enough credits");
}

#[tokio::test]
async fn non_2xx_without_envelope_is_a_status_error_with_redacted_token() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET).path(format!("/{PATH}"));
        then.status(502).body("Bad Gateway");
    });

    let client = client_for(&server);
    let err = client.article_metrics("NVDA").fetch_raw().await.unwrap_err();
    mock.assert();

    match err {
        SgError::Status { status, url } => {
            assert_eq!(status, 502);
            assert!(url.contains("/time-series/article-metrics"));
            assert!(url.contains("token=***"));
            assert!(!url.contains(TOKEN));
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn record_without_timestamp_fails_fast() {
    let server = MockServer::start();

    mock_page(
        &server,
        PATH,
        "2021-05-20T15:40:00",
        ok(json!([{ "symbol": "NVDA", "titles": ["headline"] }])),
    );

    let client = client_for(&server);
    let err = client
        .article_metrics("NVDA")
        .between(ts("2021-05-20T00:05:00"), ts("2021-05-20T15:40:00"))
        .fetch_raw()
        .await
        .unwrap_err();

    assert!(matches!(err, SgError::Data(_)), "got {err:?}");
}

#[tokio::test]
async fn unparseable_timestamp_fails_fast() {
    let server = MockServer::start();

    mock_page(
        &server,
        PATH,
        "2021-05-20T15:40:00",
        ok(json!([{ "symbol": "NVDA", "timestamp": "yesterday" }])),
    );

    let client = client_for(&server);
    let err = client
        .article_metrics("NVDA")
        .between(ts("2021-05-20T00:05:00"), ts("2021-05-20T15:40:00"))
        .fetch_raw()
        .await
        .unwrap_err();

    assert!(matches!(err, SgError::InvalidTimestamp(ref s) if s == "yesterday"), "got {err:?}");
}

#[tokio::test]
async fn connection_failure_propagates() {
    let client = stockgeist_rs::SgClient::builder()
        .token(TOKEN)
        .base_url(url::Url::parse("http://127.0.0.1:9/").unwrap())
        .build()
        .unwrap();

    let err = client.symbols().await.unwrap_err();
    assert!(matches!(err, SgError::Http(_)), "got {err:?}");
}

#[tokio::test]
async fn start_after_end_is_rejected_before_any_call() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path(format!("/{PATH}"));
        then.status(200).json_body(ok(json!([])));
    });

    let client = client_for(&server);
    let err = client
        .article_metrics("NVDA")
        .between(ts("2021-05-21T00:00:00"), ts("2021-05-20T00:00:00"))
        .fetch_raw()
        .await
        .unwrap_err();

    mock.assert_hits(0);
    assert!(matches!(err, SgError::Data(_)));
}
