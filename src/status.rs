//! HTTP status codes as a typed enum.
//!
//! Only the statuses the simulator actually produces are listed. Use
//! [`Status`] anywhere a status code is accepted: `Response::status()`,
//! `Response::builder().status()`, or as a bare handler return value.
//!
//! ```rust
//! use sitesim::{Response, Status};
//!
//! Response::status(Status::NotFound);
//!
//! Response::builder()
//!     .status(Status::PreconditionFailed)
//!     .json(br#"{"error":"no"}"#.to_vec());
//! ```

/// The HTTP statuses sitesim responds with.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    // ── 2xx Success ───────────────────────────────────────────────────────────
    Ok,                            // 200

    // ── 4xx Client errors ─────────────────────────────────────────────────────
    BadRequest,                    // 400
    NotFound,                      // 404
    MethodNotAllowed,              // 405
    PreconditionFailed,            // 412

    // ── 5xx Server errors ─────────────────────────────────────────────────────
    InternalServerError,           // 500
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        match s {
            Status::Ok                  => 200,
            Status::BadRequest          => 400,
            Status::NotFound            => 404,
            Status::MethodNotAllowed    => 405,
            Status::PreconditionFailed  => 412,
            Status::InternalServerError => 500,
        }
    }
}
