use crate::core::{SgClient, SgError, wire::RawBatch};

/// GET `url` and decode the body as an API envelope.
///
/// The API reports failures inside `metadata`, usually with a matching HTTP status, so a
/// non-2xx response is still returned as a batch when its body decodes. Only a non-2xx
/// response with an undecodable body becomes `SgError::Status`.
pub(crate) async fn get_json(client: &SgClient, url: &str) -> Result<RawBatch, SgError> {
    let resp = client.http().get(url).send().await?;
    let status = resp.status();
    let text = resp.text().await?;

    match serde_json::from_str::<RawBatch>(&text) {
        Ok(batch) => Ok(batch),
        Err(_) if !status.is_success() => Err(SgError::Status {
            status: status.as_u16(),
            url: redact(url, client.token()),
        }),
        Err(e) => Err(SgError::Json(e)),
    }
}

/// Replace the token in a request URL so it can be surfaced in errors.
pub(crate) fn redact(url: &str, token: &str) -> String {
    url.replace(&format!("token={token}"), "token=***")
}
