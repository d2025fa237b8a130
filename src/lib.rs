//! # sitesim
//!
//! A development-time website simulator. Point it at a directory of static
//! files and it serves them as a website whose routes come from the file
//! names:
//!
//! - `about.html` and `about/index.html` answer `/about`
//! - `about.json` next to them makes `/about` negotiate on `Accept`
//! - `form.json.POST` answers `POST /form` only
//! - `people/@id.json` answers `/people/:id`
//!
//! Every request a website route receives is recorded, so a test can ask
//! what the simulator was sent.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use sitesim::{Server, Simulator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sitesim::Error> {
//!     let simulator = Simulator::load("tests/site").await?;
//!     let router = simulator.router()?;
//!
//!     Server::bind("127.0.0.1:3000".parse().unwrap()).serve(router).await
//! }
//! ```
//!
//! ## In-process
//!
//! The router answers [`Request`]s directly, without a socket:
//!
//! ```rust,no_run
//! use sitesim::{Method, Request, Simulator};
//!
//! # async fn demo() -> Result<(), sitesim::Error> {
//! let simulator = Simulator::load("tests/site").await?;
//! let router = simulator.router()?;
//!
//! let res = router
//!     .respond(Request::new(Method::Get, "/about").with_header("accept", "application/json"))
//!     .await;
//! assert_eq!(res.status_code(), 200);
//! assert_eq!(simulator.last_request().unwrap().path, "/about");
//! # Ok(())
//! # }
//! ```

mod error;
mod handler;
mod method;
mod record;
mod request;
mod response;
mod router;
mod server;
mod simulator;
mod status;

pub mod config;
pub mod website;

pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use record::{RecordedRequest, RequestLog};
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use simulator::{Simulator, LAST_REQUEST_PATH};
pub use status::Status;
