use chrono::{Duration, DurationRound, Utc};
use stockgeist_rs::{MessageMetric, PriceMetric, SgClient, Timeframe};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing-subscriber")]
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // 1. Token comes from STOCKGEIST_API_TOKEN.
    let client = SgClient::from_env()?;

    let credits = client.credits().await?;
    println!("Credits left: {}", credits.credits().unwrap_or_default());
    println!();

    // 2. Two days of hourly sentiment; the range spans several pages.
    // Hourly records sit on the hour, so `start` must too.
    let end = (Utc::now().naive_utc() - Duration::days(1)).duration_trunc(Duration::hours(1))?;
    let start = end - Duration::days(2);

    let sentiment = client
        .message_metrics("AAPL")
        .timeframe(Timeframe::H1)
        .filter([MessageMetric::TotalCount, MessageMetric::MaDiff])
        .between(start, end)
        .fetch()
        .await?;
    println!("{sentiment}");
    println!("  pages: {}", sentiment.status_codes().len());
    println!();

    // 3. Daily closes; market gaps are skipped over.
    let closes = client
        .price_metrics("AAPL")
        .timeframe(Timeframe::D1)
        .filter([PriceMetric::Close])
        .between(end - Duration::days(14), end)
        .fetch()
        .await?;
    for (ts, close) in closes.timestamps()?.iter().zip(closes.column("close").unwrap_or_default()) {
        println!("  {ts}  {close}");
    }
    println!();

    // 4. Top five symbols by message volume over the last day.
    let ranking = client.ranking_metrics().top(5).fetch().await?;
    for (name, values) in ranking.select("symbols")? {
        println!("  {name}: {values:?}");
    }

    Ok(())
}
