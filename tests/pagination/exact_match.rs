use httpmock::{Method::GET, MockServer};
use stockgeist_rs::{MessageMetric, QueryParams, SeriesEndpoint, SeriesQuery, Timeframe};

use crate::common::{client_for, mock_page, ok, records, ts};

const PATH: &str = "time-series/message-metrics";

#[tokio::test]
async fn walks_back_until_first_record_equals_start() {
    let server = MockServer::start();

    let p1 = mock_page(
        &server,
        PATH,
        "2021-06-20T15:40:00",
        ok(records("TSLA", &["2021-06-20 10:45:00+00:00", "2021-06-20 15:40:00+00:00"])),
    );
    let p2 = mock_page(
        &server,
        PATH,
        "2021-06-20T10:45:00",
        ok(records("TSLA", &["2021-06-20 05:50:00+00:00", "2021-06-20 10:45:00+00:00"])),
    );
    let p3 = mock_page(
        &server,
        PATH,
        "2021-06-20T05:50:00",
        ok(records("TSLA", &["2021-06-20 00:05:00+00:00", "2021-06-20 05:50:00+00:00"])),
    );

    let client = client_for(&server);
    let seq = client
        .message_metrics("TSLA")
        .between(ts("2021-06-20T00:05:00"), ts("2021-06-20T15:40:00"))
        .fetch_raw()
        .await
        .unwrap();

    p1.assert_hits(1);
    p2.assert_hits(1);
    p3.assert_hits(1);

    assert_eq!(seq.len(), 3);
    let last = seq.batches.last().unwrap();
    assert_eq!(last.records().unwrap()[0]["timestamp"], "2021-06-20 00:05:00+00:00");
    assert_eq!(seq.final_end, Some(ts("2021-06-20T05:50:00")));
}

#[tokio::test]
async fn merged_response_is_chronological_without_seam_duplicates() {
    let server = MockServer::start();

    mock_page(
        &server,
        PATH,
        "2021-06-20T15:40:00",
        ok(records("TSLA", &["2021-06-20T10:45:00", "2021-06-20T15:40:00"])),
    );
    mock_page(
        &server,
        PATH,
        "2021-06-20T10:45:00",
        ok(records("TSLA", &["2021-06-20T05:50:00", "2021-06-20T10:45:00"])),
    );
    mock_page(
        &server,
        PATH,
        "2021-06-20T05:50:00",
        ok(records("TSLA", &["2021-06-20T00:05:00", "2021-06-20T05:50:00"])),
    );

    let client = client_for(&server);
    let series = client
        .message_metrics("TSLA")
        .filter([MessageMetric::TotalCount, MessageMetric::MaDiff])
        .between(ts("2021-06-20T00:05:00"), ts("2021-06-20T15:40:00"))
        .fetch()
        .await
        .unwrap();

    assert_eq!(
        series.timestamps().unwrap(),
        vec![
            ts("2021-06-20T00:05:00"),
            ts("2021-06-20T05:50:00"),
            ts("2021-06-20T10:45:00"),
            ts("2021-06-20T15:40:00"),
        ]
    );
    assert_eq!(series.status_codes(), vec![200, 200, 200]);
    assert!(series.column("symbol").is_none());
    assert_eq!(series.column("total_count").unwrap().len(), 4);
}

#[tokio::test]
async fn without_start_fetches_exactly_one_page() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET).path(format!("/{PATH}"));
        then.status(200)
            .header("content-type", "application/json")
            .json_body(ok(records("AAPL", &["2021-06-20T00:05:00", "2021-06-20T00:10:00"])));
    });

    let client = client_for(&server);
    let mut query = SeriesQuery::new(Some("AAPL".into()), vec!["total_count".into()]);
    query.timeframe = Timeframe::M5;
    query.end = Some(ts("2021-06-21T00:00:00"));

    let seq = client
        .fetch_time_series(SeriesEndpoint::MessageMetrics, &query)
        .await
        .unwrap();

    mock.assert_hits(1);
    assert_eq!(seq.len(), 1);
    assert_eq!(seq.final_end, Some(ts("2021-06-21T00:00:00")));
}

#[tokio::test]
async fn without_start_an_empty_page_is_still_one_call() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET).path("/time-series/price-metrics");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(ok(serde_json::json!([])));
    });

    let client = client_for(&server);
    let seq = client.price_metrics("GILD").fetch_raw().await.unwrap();

    mock.assert_hits(1);
    assert_eq!(seq.len(), 1);
    assert_eq!(seq.final_end, None);
}

#[tokio::test]
async fn empty_page_on_exact_match_endpoint_ends_the_walk() {
    let server = MockServer::start();

    let p1 = mock_page(
        &server,
        "time-series/topic-metrics",
        "2021-06-19T00:00:00",
        ok(serde_json::json!([])),
    );

    let client = client_for(&server);
    let seq = client
        .topic_metrics("AAPL")
        .between(ts("2021-06-15T00:00:00"), ts("2021-06-19T00:00:00"))
        .fetch_raw()
        .await
        .unwrap();

    p1.assert_hits(1);
    assert_eq!(seq.len(), 1);
}

#[tokio::test]
async fn request_delay_does_not_change_the_walk() {
    let server = MockServer::start();

    let p1 = mock_page(
        &server,
        PATH,
        "2021-06-20T02:00:00",
        ok(records("AAPL", &["2021-06-20T01:00:00", "2021-06-20T02:00:00"])),
    );
    let p2 = mock_page(
        &server,
        PATH,
        "2021-06-20T01:00:00",
        ok(records("AAPL", &["2021-06-20T00:00:00", "2021-06-20T01:00:00"])),
    );

    let client = stockgeist_rs::SgClient::builder()
        .token(crate::common::TOKEN)
        .base_url(url::Url::parse(&server.base_url()).unwrap())
        .request_delay(std::time::Duration::from_millis(5))
        .build()
        .unwrap();

    let seq = client
        .message_metrics("AAPL")
        .timeframe(Timeframe::H1)
        .between(ts("2021-06-20T00:00:00"), ts("2021-06-20T02:00:00"))
        .fetch_raw()
        .await
        .unwrap();

    p1.assert_hits(1);
    p2.assert_hits(1);
    assert_eq!(seq.len(), 2);
}

#[tokio::test]
async fn snapshot_is_a_single_element_sequence() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/snapshot/symbols")
            .query_param("token", crate::common::TOKEN);
        then.status(200)
            .header("content-type", "application/json")
            .json_body(ok(serde_json::json!({ "symbols": { "stocks": ["AAPL"] } })));
    });

    let client = client_for(&server);
    let seq = client
        .fetch_snapshot(stockgeist_rs::SnapshotEndpoint::Symbols, &QueryParams::new())
        .await
        .unwrap();

    mock.assert_hits(1);
    assert_eq!(seq.len(), 1);
    assert!(seq.batches[0].body.is_object());
}

#[tokio::test]
async fn unaligned_start_ends_on_the_cursor_only_page() {
    let server = MockServer::start();

    let p1 = mock_page(
        &server,
        PATH,
        "2021-06-20T03:00:00",
        ok(records(
            "AAPL",
            &["2021-06-20T01:00:00", "2021-06-20T02:00:00", "2021-06-20T03:00:00"],
        )),
    );
    // hourly buckets never land on :37, the oldest one in range comes back alone
    let p2 = mock_page(
        &server,
        PATH,
        "2021-06-20T01:00:00",
        ok(records("AAPL", &["2021-06-20T01:00:00"])),
    );

    let client = client_for(&server);
    let series = client
        .message_metrics("AAPL")
        .timeframe(Timeframe::H1)
        .between(ts("2021-06-20T00:37:00"), ts("2021-06-20T03:00:00"))
        .fetch()
        .await
        .unwrap();

    p1.assert_hits(1);
    p2.assert_hits(1);
    assert_eq!(series.status_codes(), [200, 200]);
    assert_eq!(series.final_end, Some(ts("2021-06-20T01:00:00")));
    assert_eq!(
        series.timestamps().unwrap(),
        [ts("2021-06-20T01:00:00"), ts("2021-06-20T02:00:00"), ts("2021-06-20T03:00:00")]
    );
}
