use httpmock::MockServer;
use stockgeist_rs::{SgClient, SgError, Timeframe};
use url::Url;

use crate::common::{TOKEN, client_for, mock_page, ok, records, ts};

const PATH: &str = "time-series/message-metrics";

#[tokio::test]
async fn cursor_moving_forward_is_reported() {
    let server = MockServer::start();

    // a page starting after its own `end` would send the walk forwards
    let forward = mock_page(
        &server,
        PATH,
        "2021-06-20T12:00:00",
        ok(records("AAPL", &["2021-06-20T13:00:00", "2021-06-20T14:00:00"])),
    );

    let client = client_for(&server);
    let err = client
        .message_metrics("AAPL")
        .timeframe(Timeframe::H1)
        .between(ts("2021-06-20T00:00:00"), ts("2021-06-20T12:00:00"))
        .fetch_raw()
        .await
        .unwrap_err();

    forward.assert_hits(1);
    match err {
        SgError::NotConverged { pages, cursor } => {
            assert_eq!(pages, 1);
            assert_eq!(cursor, "2021-06-20T13:00:00");
        }
        other => panic!("expected NotConverged, got {other:?}"),
    }
}

#[tokio::test]
async fn overshooting_start_is_reported() {
    let server = MockServer::start();

    // 5m bars aligned on :05, start on :03 can never be matched exactly
    mock_page(
        &server,
        PATH,
        "2021-06-20T01:00:00",
        ok(records("AAPL", &["2021-06-20T00:00:00", "2021-06-20T01:00:00"])),
    );

    let client = client_for(&server);
    let err = client
        .message_metrics("AAPL")
        .between(ts("2021-06-20T00:03:00"), ts("2021-06-20T01:00:00"))
        .fetch_raw()
        .await
        .unwrap_err();

    assert!(matches!(err, SgError::NotConverged { pages: 1, .. }), "got {err:?}");
}

#[tokio::test]
async fn page_limit_bounds_the_walk() {
    let server = MockServer::start();

    let p1 = mock_page(
        &server,
        PATH,
        "2021-06-20T03:00:00",
        ok(records("AAPL", &["2021-06-20T02:00:00", "2021-06-20T03:00:00"])),
    );
    let p2 = mock_page(
        &server,
        PATH,
        "2021-06-20T02:00:00",
        ok(records("AAPL", &["2021-06-20T01:00:00", "2021-06-20T02:00:00"])),
    );
    let p3 = mock_page(
        &server,
        PATH,
        "2021-06-20T01:00:00",
        ok(records("AAPL", &["2021-06-20T00:00:00", "2021-06-20T01:00:00"])),
    );

    let client = SgClient::builder()
        .token(TOKEN)
        .base_url(Url::parse(&server.base_url()).unwrap())
        .max_pages(2)
        .build()
        .unwrap();

    let err = client
        .message_metrics("AAPL")
        .timeframe(Timeframe::H1)
        .between(ts("2021-06-20T00:00:00"), ts("2021-06-20T03:00:00"))
        .fetch_raw()
        .await
        .unwrap_err();

    p1.assert_hits(1);
    p2.assert_hits(1);
    p3.assert_hits(0);
    match err {
        SgError::NotConverged { pages, cursor } => {
            assert_eq!(pages, 2);
            assert_eq!(cursor, "2021-06-20T01:00:00");
        }
        other => panic!("expected NotConverged, got {other:?}"),
    }
}
