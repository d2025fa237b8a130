//! Log of the requests the simulator has served.
//!
//! Tests point a client at the simulator, then ask what it received.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::method::Method;
use crate::request::Request;

/// One dispatched request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    /// Route parameters captured from `:name` segments.
    pub params: BTreeMap<String, String>,
    pub timestamp: DateTime<Utc>,
}

impl RecordedRequest {
    pub fn from_request(req: &Request) -> Self {
        Self {
            method: req.method(),
            path: req.path().to_owned(),
            params: req.params().iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            timestamp: Utc::now(),
        }
    }
}

/// Append-only, arrival-ordered request log shared by every handler.
///
/// Grows without bound; a new simulator session starts with a new log.
#[derive(Debug, Default)]
pub struct RequestLog {
    entries: Mutex<Vec<RecordedRequest>>,
}

impl RequestLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, entry: RecordedRequest) {
        self.lock().push(entry);
    }

    /// The most recent entry, or `None` before the first request.
    pub fn last(&self) -> Option<RecordedRequest> {
        self.lock().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // a push cannot leave the Vec half-written; poisoning is ignored
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<RecordedRequest>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
