use chrono::NaiveDateTime;
use serde::Serialize;

use crate::core::{SgError, wire::RawBatch};

/// Every response collected by one logical fetch.
///
/// For time series the batches are in request order, so each batch covers an *earlier*
/// window than the one before it. Snapshot fetches hold exactly one batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSequence {
    pub batches: Vec<RawBatch>,
    /// The `end` cursor sent with the last request (`None` if it carried no `end`).
    pub final_end: Option<NaiveDateTime>,
}

impl BatchSequence {
    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RawBatch> {
        self.batches.iter()
    }

    /// The first batch whose `metadata.status_code` is not 200.
    pub fn first_failure(&self) -> Option<&RawBatch> {
        self.batches.iter().find(|b| !b.is_ok())
    }

    /// Fail with the API's own status and message if any batch is not a 200.
    ///
    /// # Errors
    ///
    /// Returns `SgError::Api` for the first failing batch, or `SgError::Data` if the
    /// sequence is empty.
    pub fn ensure_ok(&self) -> Result<(), SgError> {
        if self.batches.is_empty() {
            return Err(SgError::Data("no response batches".into()));
        }
        match self.first_failure() {
            Some(b) => Err(SgError::Api {
                status_code: b.metadata.status_code,
                message: b.metadata.message.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl<'a> IntoIterator for &'a BatchSequence {
    type Item = &'a RawBatch;
    type IntoIter = std::slice::Iter<'a, RawBatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.batches.iter()
    }
}
