//! Message normalization
//!
//! Turns one fetch's raw records (newest first) into the canonical sequence:
//! oldest first, text-only, every timestamp rendered in UTC. The transform is
//! stateless and applied exactly once per fetch; applying it to its own
//! output would reverse the order again.

use chrono::{DateTime, Utc};

use crate::types::CanonicalMessage;
use crate::upstream::{RawMessage, RawTimestamp};

/// Normalize a newest-first batch into chronological canonical messages
pub fn normalize(raw: Vec<RawMessage>) -> Vec<CanonicalMessage> {
    let mut messages: Vec<CanonicalMessage> = raw
        .into_iter()
        .filter_map(|message| {
            let text = message.text.filter(|text| !text.is_empty())?;
            Some(CanonicalMessage {
                id: message.id,
                ts: to_utc(message.timestamp).to_rfc3339(),
                text,
            })
        })
        .collect();

    messages.reverse();
    messages
}

/// Naive timestamps are taken to be UTC already; no zone is inferred.
fn to_utc(timestamp: RawTimestamp) -> DateTime<Utc> {
    match timestamp {
        RawTimestamp::Aware(dt) => dt.with_timezone(&Utc),
        RawTimestamp::Naive(naive) => naive.and_utc(),
    }
}
