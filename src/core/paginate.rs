//! The fetch loops: backward cursor pagination for time series, single calls for snapshots.

use chrono::{NaiveDateTime, Utc};

use crate::core::{
    BatchSequence, SgClient, SgError,
    endpoint::{SeriesEndpoint, SnapshotEndpoint},
    net,
    params::SeriesQuery,
    query::{QueryParams, build_query},
    time,
};

impl SgClient {
    /// Fetch a time series, walking `end` backwards until `start` is reached.
    ///
    /// Each page is requested with the current cursor as `end`; the first record of the
    /// page becomes the next cursor. Without `start` exactly one page is fetched. A page
    /// whose `metadata.status_code` is not 200 ends the walk and is returned as the last
    /// batch, so callers must inspect the statuses (the typed responses do).
    ///
    /// # Errors
    ///
    /// Transport and decoding failures are returned as-is. A malformed page body fails with
    /// `SgError::Data`. A page starting after its own cursor, an exact-match walk that
    /// passes `start`, or one exceeding the client's `max_pages` fails with
    /// `SgError::NotConverged`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, query), err, fields(endpoint = %endpoint))
    )]
    pub async fn fetch_time_series(
        &self,
        endpoint: SeriesEndpoint,
        query: &SeriesQuery,
    ) -> Result<BatchSequence, SgError> {
        let mut cursor = query.end.map(time::truncate_to_second);
        let mut batches = Vec::new();

        loop {
            if batches.len() >= self.max_pages() {
                return Err(not_converged(batches.len(), cursor));
            }
            if !batches.is_empty()
                && let Some(delay) = self.request_delay()
            {
                tokio::time::sleep(delay).await;
            }

            let url = build_query(
                self.base_url().as_str(),
                endpoint.path(),
                self.token(),
                &query.to_params(cursor),
            );
            let batch = net::get_json(self, &url).await?;
            let ok = batch.is_ok();
            let first = match query.start {
                Some(_) if ok => batch.first_timestamp()?,
                _ => None,
            };
            batches.push(batch);

            #[cfg(feature = "tracing")]
            tracing::debug!(page = batches.len(), cursor = ?cursor, first = ?first, "fetched page");

            if !ok {
                #[cfg(feature = "tracing")]
                {
                    if let Some(b) = batches.last() {
                        tracing::warn!(
                            status_code = b.metadata.status_code,
                            message = %b.metadata.message,
                            "api reported failure, stopping pagination"
                        );
                    }
                }
                break;
            }
            let Some(start) = query.start else {
                break;
            };

            let start = time::truncate_to_second(start);
            match advance(endpoint, start, cursor, first, batches.len())? {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        Ok(BatchSequence {
            batches,
            final_end: cursor,
        })
    }

    /// Fetch a snapshot endpoint with a single call.
    ///
    /// The response is returned as a one-element sequence whatever its status.
    ///
    /// # Errors
    ///
    /// Transport and decoding failures only.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, params), err, fields(endpoint = %endpoint))
    )]
    pub async fn fetch_snapshot(
        &self,
        endpoint: SnapshotEndpoint,
        params: &QueryParams,
    ) -> Result<BatchSequence, SgError> {
        let url = build_query(
            self.base_url().as_str(),
            endpoint.path(),
            self.token(),
            params,
        );
        let batch = net::get_json(self, &url).await?;

        Ok(BatchSequence {
            batches: vec![batch],
            final_end: None,
        })
    }
}

/// Decide the cursor for the next page, or `None` once `start` has been reached.
///
/// `first` is the first record's timestamp of the page just fetched (`None` when the page
/// was empty). The `end` cursor is inclusive, so a page holding nothing but the cursor
/// record has no older data in its window: exact-match endpoints stop there, while price
/// metrics step back over the gap as they do for an empty page.
pub(crate) fn advance(
    endpoint: SeriesEndpoint,
    start: NaiveDateTime,
    cursor: Option<NaiveDateTime>,
    first: Option<NaiveDateTime>,
    pages: usize,
) -> Result<Option<NaiveDateTime>, SgError> {
    let next = match (first, cursor) {
        (Some(ts), Some(current)) if ts > current => {
            return Err(not_converged(pages, Some(ts)));
        }
        (Some(ts), Some(current)) if ts == current => {
            if !endpoint.is_market_priced() {
                #[cfg(feature = "tracing")]
                tracing::debug!("only the cursor record came back, nothing older to fetch");
                return Ok(None);
            }
            time::gap_cursor(current)?
        }
        (Some(ts), _) => ts,
        (None, _) if endpoint.is_market_priced() => {
            let end = cursor.unwrap_or_else(|| time::truncate_to_second(Utc::now().naive_utc()));
            time::gap_cursor(end)?
        }
        (None, _) => {
            #[cfg(feature = "tracing")]
            tracing::debug!("empty page, nothing older to fetch");
            return Ok(None);
        }
    };

    if endpoint.is_market_priced() {
        if next <= start {
            return Ok(None);
        }
    } else if next == start {
        return Ok(None);
    } else if next < start {
        // records never land exactly on `start`; walking further back cannot end
        return Err(not_converged(pages, Some(next)));
    }

    Ok(Some(next))
}

fn not_converged(pages: usize, cursor: Option<NaiveDateTime>) -> SgError {
    SgError::NotConverged {
        pages,
        cursor: cursor.map_or_else(|| "none".to_string(), time::format_timestamp),
    }
}
