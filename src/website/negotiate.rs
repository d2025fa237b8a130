//! Request-time content negotiation.
//!
//! ```text
//! RECEIVED ─ record ─▶ select variant ──▶ read file ──▶ 200
//!                          │                  │
//!                          ▼                  ▼
//!                   412 not acceptable    500 read failure
//! ```

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::json;
use thiserror::Error;
use tracing::{debug, warn};

use crate::record::{RecordedRequest, RequestLog};
use crate::request::Request;
use crate::response::{IntoResponse, Response};
use crate::status::Status;

use super::rules::{ExtensionVariant, RouteRule};

/// Why a matched route could not be served. Either way the request ends
/// there; nothing is retried.
#[derive(Debug, Error)]
pub enum ServeError {
    /// The resource exists but none of its representations is acceptable
    /// to the client (or none answers the request method).
    #[error("don't know how to serve this URL")]
    NotAcceptable,

    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        match self {
            Self::NotAcceptable => {
                let body = json!({
                    "error": self.to_string(),
                    "status": u16::from(Status::PreconditionFailed),
                });
                Response::builder()
                    .status(Status::PreconditionFailed)
                    .json(body.to_string().into_bytes())
            }
            Self::Read { .. } => Response::builder()
                .status(Status::InternalServerError)
                .text(self.to_string()),
        }
    }
}

/// Serves `req` from `rule`, recording it in `log` first.
pub async fn serve(
    rule: Arc<RouteRule>,
    log: Arc<RequestLog>,
    req: Request,
) -> Result<Response, ServeError> {
    log.append(RecordedRequest::from_request(&req));

    let (variant, path) = select(&rule, &req).inspect_err(|_| {
        debug!(
            route = %rule.key,
            method = %req.method(),
            accept = ?req.header_values("accept").collect::<Vec<_>>(),
            "no acceptable representation"
        );
    })?;

    let body = tokio::fs::read(path).await.map_err(|source| {
        warn!(route = %rule.key, path = %path.display(), "read failed: {source}");
        ServeError::Read { path: path.to_path_buf(), source }
    })?;

    Ok(Response::builder()
        .header("vary", "accept")
        .bytes(variant.media_type, body))
}

/// Picks the first variant the client accepts that has a file for the
/// request method, and that file.
pub fn select<'r>(
    rule: &'r RouteRule,
    req: &Request,
) -> Result<(&'r ExtensionVariant, &'r Path), ServeError> {
    rule.variants
        .iter()
        .filter(|variant| req.accepts(variant.media_type))
        .find_map(|variant| Some((variant, variant.file_for(req.method())?)))
        .ok_or(ServeError::NotAcceptable)
}
