//! Recursive listing of the website directory.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use crate::error::Error;

/// Lists every regular file under `root`, depth first.
///
/// Within a directory, entries are visited in name order with parameter
/// names (`@id`) after literal ones. Hidden entries (leading `.`) are
/// skipped, as are symlinks that point nowhere. The result is the same for
/// the same tree on every run.
pub async fn list_files(root: &Path) -> Result<Vec<PathBuf>, Error> {
    let metadata = fs::metadata(root).await.map_err(|source| Error::Walk {
        path: root.to_path_buf(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(Error::NotADirectory(root.to_path_buf()));
    }

    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let mut children = read_children(&dir).await?;
        children.sort_by(|a, b| compare_names(&a.0, &b.0));

        let mut subdirs = Vec::new();
        for (name, path) in children {
            if name.starts_with('.') {
                continue;
            }
            // follows symlinks; a dangling one has no metadata
            let Ok(metadata) = fs::metadata(&path).await else {
                debug!(path = %path.display(), "skipping dangling link");
                continue;
            };
            if metadata.is_dir() {
                subdirs.push(path);
            } else if metadata.is_file() {
                files.push(path);
            }
        }

        // reversed so the stack pops them in sorted order
        pending.extend(subdirs.into_iter().rev());
    }

    Ok(files)
}

async fn read_children(dir: &Path) -> Result<Vec<(String, PathBuf)>, Error> {
    let walk_error = |source: std::io::Error| Error::Walk { path: dir.to_path_buf(), source };

    let mut entries = fs::read_dir(dir).await.map_err(walk_error)?;
    let mut children = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(walk_error)? {
        children.push((entry.file_name().to_string_lossy().into_owned(), entry.path()));
    }
    Ok(children)
}

/// Literal names before `@` parameter names, then plain name order.
pub(crate) fn compare_names(a: &str, b: &str) -> Ordering {
    a.starts_with('@')
        .cmp(&b.starts_with('@'))
        .then_with(|| a.cmp(b))
}
