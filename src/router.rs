//! Radix-tree request router.
//!
//! One tree per HTTP method plus one tree for any-method routes. Patterns
//! use the `:name` parameter convention (`/people/:id`, `/people/:id.json`)
//! and are translated to matchit's `{name}` syntax on insertion. Captured
//! values are percent-decoded before handlers see them.

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;
use percent_encoding::percent_decode_str;

use crate::error::Error;
use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// Method-specific routes are consulted before any-method routes, so a
/// `GET` endpoint can sit next to a website route covering the same path.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
    any: MatchitRouter<BoxedHandler>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), any: MatchitRouter::new() }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// # Panics
    ///
    /// Panics if `path` is malformed or conflicts with an earlier route. Use
    /// it for fixed paths known at compile time; routes derived from user
    /// input go through [`Router::try_any`].
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        let pattern = to_matchit(path);
        self.routes
            .entry(method)
            .or_default()
            .insert(pattern, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    /// Register a handler for every HTTP method at `path`.
    ///
    /// Fails with [`Error::InvalidRoute`] when the pattern is malformed or
    /// collides with a route registered earlier. Nothing is shadowed.
    pub fn try_any(mut self, path: &str, handler: impl Handler) -> Result<Self, Error> {
        self.any
            .insert(to_matchit(path), handler.into_boxed_handler())
            .map_err(|source| Error::InvalidRoute { path: path.to_owned(), source })?;
        Ok(self)
    }

    pub(crate) fn lookup(
        &self,
        method: Method,
        path: &str,
    ) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let matched = self.routes
            .get(&method)
            .and_then(|tree| tree.at(path).ok())
            .or_else(|| self.any.at(path).ok())?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), percent_decode_str(v).decode_utf8_lossy().into_owned()))
            .collect();
        Some((handler, params))
    }

    /// Routes one request and produces one response. `404` when nothing
    /// matches.
    pub async fn respond(&self, req: Request) -> Response {
        match self.lookup(req.method(), req.path()) {
            Some((handler, params)) => handler.call(req.with_params(params)).await,
            None => Response::status(Status::NotFound),
        }
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

/// `/people/:id.json` → `/people/{id}.json`. Literal braces are escaped.
fn to_matchit(path: &str) -> String {
    path.split('/')
        .map(|segment| match segment.strip_prefix(':') {
            Some(param) => {
                let split = param.find('.').unwrap_or(param.len());
                let (name, suffix) = param.split_at(split);
                format!("{{{name}}}{}", escape(suffix))
            }
            None => escape(segment),
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn escape(literal: &str) -> String {
    literal.replace('{', "{{").replace('}', "}}")
}
