//! Upstream message sources
//!
//! This module provides a trait-based abstraction over the messaging
//! platform. A [`MessageSource`] hands out one [`SourceSession`] per read;
//! the session is a scoped connection that is closed when the read ends,
//! whatever the outcome.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDateTime};

use crate::types::UpstreamError;

pub mod telegram;

pub use telegram::TelegramSource;

/// Timestamp as reported upstream, with or without a UTC offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawTimestamp {
    Aware(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
}

/// Upstream-shaped message record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessage {
    pub id: i64,
    pub timestamp: RawTimestamp,
    /// `None` or empty for media-only and service messages
    pub text: Option<String>,
}

/// Trait for upstream message sources
#[async_trait]
pub trait MessageSource: Send + Sync {
    /// Get the name of this source
    fn name(&self) -> &str;

    /// Open an authenticated connection for a single read
    async fn connect(&self) -> Result<Box<dyn SourceSession>, UpstreamError>;
}

/// A live upstream connection
///
/// Dropping a session must release its connection, so an abandoned read
/// never leaks one.
#[async_trait]
pub trait SourceSession: Send {
    /// Resolve `source` and fetch up to `limit` messages, newest first
    async fn fetch_recent(
        &mut self,
        source: &str,
        limit: usize,
    ) -> Result<Vec<RawMessage>, UpstreamError>;

    /// Flush session state and disconnect
    async fn close(self: Box<Self>);
}

/// Run one fetch on a fresh session, closing it on every exit path
pub async fn fetch_scoped(
    upstream: &dyn MessageSource,
    source: &str,
    limit: usize,
) -> Result<Vec<RawMessage>, UpstreamError> {
    let mut session = upstream.connect().await?;
    tracing::debug!("{}: session opened", upstream.name());

    let fetched = session.fetch_recent(source, limit).await;

    session.close().await;
    tracing::debug!("{}: session closed", upstream.name());

    fetched
}
