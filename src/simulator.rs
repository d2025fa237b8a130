//! The simulator session: one website's route table plus its request log.

use std::path::Path;
use std::sync::Arc;

use crate::error::Error;
use crate::method::Method;
use crate::record::{RecordedRequest, RequestLog};
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use crate::status::Status;
use crate::website::{self, RuleTable};

/// Where the last recorded request can be fetched as JSON.
pub const LAST_REQUEST_PATH: &str = "/__simulator/last-request";

/// Everything one running simulator owns.
///
/// Built once by [`Simulator::load`]; the route table never changes
/// afterwards. Loading again gives a fresh session with an empty request
/// log.
pub struct Simulator {
    rules: Arc<RuleTable>,
    requests: Arc<RequestLog>,
}

impl Simulator {
    /// Walks `root` and builds the route table. Any inconsistency in the
    /// website (colliding files or routes) fails here, before a single
    /// request is served.
    pub async fn load(root: impl AsRef<Path>) -> Result<Self, Error> {
        let rules = website::load(root.as_ref()).await?;
        Ok(Self {
            rules: Arc::new(rules),
            requests: Arc::new(RequestLog::new()),
        })
    }

    pub fn rules(&self) -> &RuleTable { &self.rules }
    pub fn requests(&self) -> &RequestLog { &self.requests }

    /// The most recent request served from the website, if any.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.last()
    }

    /// Builds the router: every website route, plus `GET`
    /// [`LAST_REQUEST_PATH`] for out-of-process inspection.
    pub fn router(&self) -> Result<Router, Error> {
        let log = Arc::clone(&self.requests);
        let router = Router::new().on(Method::Get, LAST_REQUEST_PATH, move |_req: Request| {
            let last = log.last();
            async move {
                match serde_json::to_vec(&last) {
                    Ok(bytes) => Response::json(bytes),
                    Err(_) => Response::status(Status::InternalServerError),
                }
            }
        });
        website::register(router, &self.rules, &self.requests)
    }
}
