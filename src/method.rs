//! HTTP method as a typed enum.
//!
//! Covers the RFC 9110 standard methods. The website file naming convention
//! only recognises a subset of them as file suffixes (see
//! [`Method::from_suffix`]).
//!
//! Unknown method strings are rejected at the server level with `405 Method Not Allowed`
//! before they ever reach a handler.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// A known HTTP method.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Connect,
    Delete,
    Get,
    Head,
    Options,
    Patch,
    Post,
    Put,
    Trace,
}

impl Method {
    /// Methods that may appear as a file name suffix (`page.json.POST`).
    pub const SUFFIXES: [Method; 6] = [
        Self::Get,
        Self::Put,
        Self::Patch,
        Self::Post,
        Self::Delete,
        Self::Head,
    ];

    /// Returns the uppercase wire representation (e.g. `"GET"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connect => "CONNECT",
            Self::Delete  => "DELETE",
            Self::Get     => "GET",
            Self::Head    => "HEAD",
            Self::Options => "OPTIONS",
            Self::Patch   => "PATCH",
            Self::Post    => "POST",
            Self::Put     => "PUT",
            Self::Trace   => "TRACE",
        }
    }

    /// Splits a trailing `.METHOD` suffix off a file name.
    ///
    /// `"page.json.POST"` yields `("page.json", Some(Method::Post))`; names
    /// without a recognised suffix come back untouched with `None`.
    pub fn from_suffix(name: &str) -> (&str, Option<Method>) {
        for method in Self::SUFFIXES {
            if let Some(stem) = name
                .strip_suffix(method.as_str())
                .and_then(|rest| rest.strip_suffix('.'))
            {
                return (stem, Some(method));
            }
        }
        (name, None)
    }
}

/// Parses an uppercase method string (e.g. `"GET"`). Case-sensitive per RFC 9110 §9.1.
impl FromStr for Method {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CONNECT" => Ok(Self::Connect),
            "DELETE"  => Ok(Self::Delete),
            "GET"     => Ok(Self::Get),
            "HEAD"    => Ok(Self::Head),
            "OPTIONS" => Ok(Self::Options),
            "PATCH"   => Ok(Self::Patch),
            "POST"    => Ok(Self::Post),
            "PUT"     => Ok(Self::Put),
            "TRACE"   => Ok(Self::Trace),
            _         => Err(()),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
