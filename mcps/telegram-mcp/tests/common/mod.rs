//! Shared fixtures: a scripted upstream that records every interaction

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{FixedOffset, NaiveDate, TimeZone};
use serde_json::{Map, Value};
use telegram_mcp::types::UpstreamError;
use telegram_mcp::upstream::{MessageSource, RawMessage, RawTimestamp, SourceSession};
use telegram_mcp::{Allowlist, Dispatcher};

#[derive(Debug, Default)]
pub struct Recorded {
    pub connects: usize,
    pub closes: usize,
    pub fetches: Vec<(String, usize)>,
}

/// Upstream that replays one scripted response for every fetch
#[derive(Clone)]
pub struct FakeSource {
    response: Result<Vec<RawMessage>, UpstreamError>,
    recorded: Arc<Mutex<Recorded>>,
}

impl FakeSource {
    pub fn with_messages(messages: Vec<RawMessage>) -> Self {
        Self {
            response: Ok(messages),
            recorded: Arc::default(),
        }
    }

    pub fn failing(err: UpstreamError) -> Self {
        Self {
            response: Err(err),
            recorded: Arc::default(),
        }
    }

    pub fn connects(&self) -> usize {
        self.recorded.lock().unwrap().connects
    }

    pub fn closes(&self) -> usize {
        self.recorded.lock().unwrap().closes
    }

    pub fn fetches(&self) -> Vec<(String, usize)> {
        self.recorded.lock().unwrap().fetches.clone()
    }
}

struct FakeSession {
    response: Result<Vec<RawMessage>, UpstreamError>,
    recorded: Arc<Mutex<Recorded>>,
}

#[async_trait]
impl MessageSource for FakeSource {
    fn name(&self) -> &str {
        "fake"
    }

    async fn connect(&self) -> Result<Box<dyn SourceSession>, UpstreamError> {
        self.recorded.lock().unwrap().connects += 1;
        Ok(Box::new(FakeSession {
            response: self.response.clone(),
            recorded: self.recorded.clone(),
        }))
    }
}

#[async_trait]
impl SourceSession for FakeSession {
    async fn fetch_recent(
        &mut self,
        source: &str,
        limit: usize,
    ) -> Result<Vec<RawMessage>, UpstreamError> {
        self.recorded
            .lock()
            .unwrap()
            .fetches
            .push((source.to_string(), limit));
        self.response
            .clone()
            .map(|messages| messages.into_iter().take(limit).collect())
    }

    async fn close(self: Box<Self>) {
        self.recorded.lock().unwrap().closes += 1;
    }
}

pub fn dispatcher(allowlist: &str, upstream: &FakeSource) -> Dispatcher {
    Dispatcher::new(Allowlist::parse_csv(allowlist), Arc::new(upstream.clone()))
}

pub fn args(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("arguments must be a JSON object"),
    }
}

/// Message stamped in UTC on 2024-05-01 at `hour`:00
pub fn utc_message(id: i64, hour: u32, text: Option<&str>) -> RawMessage {
    let ts = FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2024, 5, 1, hour, 0, 0)
        .unwrap();
    RawMessage {
        id,
        timestamp: RawTimestamp::Aware(ts),
        text: text.map(str::to_string),
    }
}

/// Message with no offset, on 2024-05-01 at `hour`:00
pub fn naive_message(id: i64, hour: u32, text: &str) -> RawMessage {
    let ts = NaiveDate::from_ymd_opt(2024, 5, 1)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap();
    RawMessage {
        id,
        timestamp: RawTimestamp::Naive(ts),
        text: Some(text.to_string()),
    }
}
