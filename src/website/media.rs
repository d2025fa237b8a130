//! Extension ↔ media type table.
//!
//! One row per extension and one row per media type, so the table reads the
//! same in both directions. Aliases (`htm`, `jpeg`) are left out on purpose:
//! the reverse lookup must stay unambiguous.

/// Media type served for files whose extension is not in the table.
pub const FALLBACK: &str = "application/octet-stream";

const MEDIA_TYPES: &[(&str, &str)] = &[
    ("bin",       FALLBACK),
    ("consensas", "application/consensas.ledger"),
    ("css",       "text/css"),
    ("csv",       "text/csv"),
    ("gif",       "image/gif"),
    ("html",      "text/html"),
    ("ico",       "image/x-icon"),
    ("jpg",       "image/jpeg"),
    ("js",        "text/javascript"),
    ("json",      "application/json"),
    ("jsonld",    "application/ld+json"),
    ("pdf",       "application/pdf"),
    ("png",       "image/png"),
    ("svg",       "image/svg+xml"),
    ("txt",       "text/plain"),
    ("webp",      "image/webp"),
    ("xml",       "application/xml"),
    ("yaml",      "application/yaml"),
];

/// Media type for a file extension (without the dot). Case-sensitive, like
/// the file names it comes from.
pub fn media_type_for(extension: &str) -> &'static str {
    MEDIA_TYPES.iter()
        .find(|(ext, _)| *ext == extension)
        .map_or(FALLBACK, |(_, media)| *media)
}

/// Canonical extension for a media type, if the table knows it.
pub fn extension_for(media_type: &str) -> Option<&'static str> {
    MEDIA_TYPES.iter()
        .find(|(_, media)| media.eq_ignore_ascii_case(media_type))
        .map(|(ext, _)| *ext)
}
