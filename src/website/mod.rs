//! Website directory → route table → router.
//!
//! File naming convention:
//!
//! | File                   | Route           | Served for            |
//! |------------------------|-----------------|-----------------------|
//! | `about.html`           | `/about`        | every method, as HTML |
//! | `about/index.html`     | `/about`        | every method, as HTML |
//! | `form.json.POST`       | `/form`         | `POST` only           |
//! | `people/@id.json`      | `/people/:id`   | every method, as JSON |
//!
//! Every route is also reachable with its extension spelled out
//! (`/about.html`, `/about/index.html`, `/people/:id.json`), which pins the
//! representation.

mod classify;
mod media;
mod negotiate;
mod rules;
mod walk;

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::Error;
use crate::record::RequestLog;
use crate::router::Router;

pub use classify::FileEntry;
pub use media::{extension_for, media_type_for};
pub use negotiate::{select, serve, ServeError};
pub use rules::{compare_keys, ExtensionVariant, RouteRule, RuleTable};
pub use walk::list_files;

/// Walks `root` and builds its route table.
pub async fn load(root: &Path) -> Result<RuleTable, Error> {
    let files = list_files(root).await?;
    let entries = files
        .iter()
        .map(|path| FileEntry::classify(root, path))
        .collect::<Result<Vec<_>, _>>()?;

    let table = RuleTable::collect(entries)?;
    if table.is_empty() {
        warn!(root = %root.display(), "no servable files, every request will 404");
    }
    info!(
        root = %root.display(),
        files = files.len(),
        routes = table.len(),
        "loaded"
    );
    debug!(keys = ?table.keys().collect::<Vec<_>>(), "routes");
    Ok(table)
}

/// Registers one any-method route per rule, each closing over its rule and
/// the shared request log.
///
/// Fails on the first pattern the router rejects; a half-registered router
/// is never returned.
pub fn register(mut router: Router, table: &RuleTable, log: &Arc<RequestLog>) -> Result<Router, Error> {
    for rule in table.rules() {
        debug!(
            route = %rule.key,
            variants = ?rule.variants.iter().map(|v| v.media_type).collect::<Vec<_>>(),
            "serving path"
        );

        let rule = Arc::new(rule.clone());
        let key = rule.key.clone();
        let log = Arc::clone(log);
        router = router.try_any(&key, move |req| serve(Arc::clone(&rule), Arc::clone(&log), req))?;
    }
    Ok(router)
}
