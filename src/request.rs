//! Incoming HTTP request type.

use std::collections::HashMap;

use http_body_util::BodyExt;

use crate::method::Method;

/// An incoming HTTP request.
///
/// The server builds these from hyper requests; tests build them directly
/// with [`Request::new`] and feed them to [`Router::respond`](crate::Router::respond).
#[derive(Clone, Debug)]
pub struct Request {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Vec<u8>,
    pub(crate) params: HashMap<String, String>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            body: Vec::new(),
            params: HashMap::new(),
        }
    }

    /// Appends a header. Returns `self` for chaining.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub(crate) fn with_params(mut self, params: HashMap<String, String>) -> Self {
        self.params = params;
        self
    }

    /// Converts a hyper request, buffering its body.
    ///
    /// Returns `Ok(None)` when the method is not one sitesim knows about.
    pub(crate) async fn from_hyper(
        req: hyper::Request<hyper::body::Incoming>,
    ) -> Result<Option<Self>, hyper::Error> {
        let (parts, body) = req.into_parts();
        let Ok(method) = parts.method.as_str().parse::<Method>() else {
            return Ok(None);
        };
        let headers = parts.headers.iter()
            .filter_map(|(k, v)| Some((k.as_str().to_owned(), v.to_str().ok()?.to_owned())))
            .collect();
        let body = body.collect().await?.to_bytes().to_vec();
        Ok(Some(Self {
            method,
            path: parts.uri.path().to_owned(),
            headers,
            body,
            params: HashMap::new(),
        }))
    }

    pub fn method(&self) -> Method { self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }
    pub fn params(&self) -> &HashMap<String, String> { &self.params }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/:id`, `req.param("id")` on `/users/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Every value of a header that may repeat, in arrival order.
    pub fn header_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers.iter()
            .filter(move |(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Reports whether the client's `Accept` header admits `media_type`.
    ///
    /// Matching is plain string comparison: each comma-separated entry is trimmed
    /// and its parameters dropped, then compared case-insensitively against
    /// `media_type`. `*/*` and `type/*` wildcards match, an entry with `q=0`
    /// never matches, and a request without an `Accept` header accepts
    /// anything. An `Accept` field sent on several lines counts as one list.
    pub fn accepts(&self, media_type: &str) -> bool {
        let mut lines = self.header_values("accept").peekable();
        if lines.peek().is_none() {
            return true;
        }
        lines.flat_map(|line| line.split(',')).any(|entry| {
            let mut parts = entry.split(';');
            let range = parts.next().unwrap_or("").trim();
            if parts.any(|p| is_zero_quality(p.trim())) {
                return false;
            }
            media_range_matches(range, media_type)
        })
    }
}

fn is_zero_quality(param: &str) -> bool {
    match param.split_once('=') {
        Some((name, value)) if name.trim().eq_ignore_ascii_case("q") => {
            value.trim().parse::<f32>().is_ok_and(|q| q <= 0.0)
        }
        _ => false,
    }
}

fn media_range_matches(range: &str, media_type: &str) -> bool {
    if range == "*/*" || range.eq_ignore_ascii_case(media_type) {
        return true;
    }
    match (range.strip_suffix("/*"), media_type.split_once('/')) {
        (Some(kind), Some((media_kind, _))) => kind.eq_ignore_ascii_case(media_kind),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accepting(value: &str) -> Request {
        Request::new(Method::Get, "/").with_header("Accept", value)
    }

    #[test]
    fn exact_match_ignores_whitespace_and_case() {
        let req = accepting("text/html,  application/json ");
        assert!(req.accepts("application/json"));
        assert!(req.accepts("text/html"));
        assert!(accepting("Application/JSON").accepts("application/json"));
        assert!(!req.accepts("application/xml"));
    }

    #[test]
    fn wildcards() {
        assert!(accepting("*/*").accepts("image/png"));
        assert!(accepting("image/*").accepts("image/png"));
        assert!(!accepting("image/*").accepts("text/plain"));
    }

    #[test]
    fn repeated_accept_lines_form_one_list() {
        let req = Request::new(Method::Get, "/")
            .with_header("accept", "text/html")
            .with_header("Accept", "application/json");
        assert!(req.accepts("text/html"));
        assert!(req.accepts("application/json"));
        assert!(!req.accepts("image/png"));
        assert_eq!(req.header_values("ACCEPT").count(), 2);
    }

    #[test]
    fn parameters_and_zero_quality() {
        let req = accepting("application/json;q=0.5, text/html; q=0");
        assert!(req.accepts("application/json"));
        assert!(!req.accepts("text/html"));
    }

    #[test]
    fn missing_accept_header_accepts_anything() {
        assert!(Request::new(Method::Get, "/").accepts("application/octet-stream"));
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let req = Request::new(Method::Post, "/x").with_header("Content-Type", "text/plain");
        assert_eq!(req.header("content-type"), Some("text/plain"));
        assert_eq!(req.header("accept"), None);
    }
}
