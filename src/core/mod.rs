//! Core components of the `stockgeist-rs` client.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The main [`SgClient`] and its builder.
//! - The primary [`SgError`] type.
//! - The query builder, endpoint catalog and wire envelope.
//! - The paginated and snapshot fetch loops, and the record shaping they feed.

/// The main client (`SgClient`), builder, and configuration.
pub mod client;
/// Fixed endpoint paths.
pub mod endpoint;
/// The primary error type (`SgError`) for the crate.
pub mod error;
/// Shared data models (`BatchSequence`).
pub mod models;
pub(crate) mod net;
pub(crate) mod paginate;
/// Typed request parameters.
pub mod params;
/// Query-string construction.
pub mod query;
/// Record merging and columnar reshaping.
pub mod shape;
/// Timestamp parsing and formatting.
pub mod time;
/// Response envelope types.
pub mod wire;

// convenient re-exports so most code can just `use crate::core::SgClient`
pub use client::{SgClient, SgClientBuilder};
pub use endpoint::{SeriesEndpoint, SnapshotEndpoint};
pub use error::SgError;
pub use models::BatchSequence;
pub use params::{Direction, RankingOptions, SeriesQuery, Timeframe};
pub use query::{QueryParams, QueryValue, build_query};
pub use wire::{Metadata, RawBatch};
