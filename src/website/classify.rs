//! Turns a file path under the website root into a [`FileEntry`].

use std::path::{Component, Path, PathBuf};

use crate::error::Error;
use crate::method::Method;

use super::media;

/// One file of the website, classified by name.
///
/// ```text
/// people/@id/index.json.POST
/// └─ rooted:    "people/@id/index.json.POST"
///    basename:  "index.json.POST"
///    name:      "index"        extension: "json"
///    method:    Some(POST)     url_key:   "/people/:id"
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub rooted: String,
    pub basename: String,
    pub name: String,
    pub extension: String,
    pub media_type: &'static str,
    /// Set when the file name ends in `.GET`, `.POST`, ...
    pub method: Option<Method>,
    pub url_key: String,
}

impl FileEntry {
    /// Classifies `path`, which must live under `root`.
    ///
    /// Never fails on odd names: an unknown extension is served as
    /// `application/octet-stream` and a name without a dot has an empty
    /// extension. The only error is a path outside `root`.
    pub fn classify(root: &Path, path: &Path) -> Result<Self, Error> {
        let relative = path
            .strip_prefix(root)
            .map_err(|_| Error::OutsideRoot(path.to_path_buf()))?;

        let components: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        let Some((basename, dirs)) = components.split_last() else {
            return Err(Error::OutsideRoot(path.to_path_buf()));
        };

        let (stem, method) = Method::from_suffix(basename);
        let (name, extension) = match stem.rsplit_once('.') {
            Some((name, extension)) => (name, extension),
            None => (stem, ""),
        };

        let mut segments: Vec<&str> = dirs.iter().map(String::as_str).collect();
        if name != "index" {
            segments.push(name);
        }

        Ok(Self {
            path: path.to_path_buf(),
            rooted: components.join("/"),
            basename: basename.clone(),
            name: name.to_owned(),
            extension: extension.to_owned(),
            media_type: media::media_type_for(extension),
            method,
            url_key: url_key(&segments),
        })
    }

    /// True for `index.*` files, which answer for their directory.
    pub fn is_index(&self) -> bool {
        self.name == "index"
    }

    /// The method this file is served for; plain files default to `GET`.
    pub fn effective_method(&self) -> Method {
        self.method.unwrap_or(Method::Get)
    }
}

/// `["people", "@id"]` → `/people/:id`.
fn url_key(segments: &[&str]) -> String {
    let mut key = String::new();
    for segment in segments {
        key.push('/');
        match segment.strip_prefix('@') {
            Some(param) => {
                key.push(':');
                key.push_str(param);
            }
            None => key.push_str(segment),
        }
    }
    if key.is_empty() {
        key.push('/');
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(rooted: &str) -> FileEntry {
        let root = Path::new("/srv/site");
        FileEntry::classify(root, &root.join(rooted)).unwrap()
    }

    #[test]
    fn root_index_maps_to_slash() {
        let entry = classify("index.html");
        assert_eq!(entry.url_key, "/");
        assert_eq!(entry.name, "index");
        assert_eq!(entry.media_type, "text/html");
        assert!(entry.is_index());
    }

    #[test]
    fn directory_index_and_sibling_file_share_a_key() {
        assert_eq!(classify("about/index.html").url_key, "/about");
        assert_eq!(classify("about.html").url_key, "/about");
    }

    #[test]
    fn method_suffix_is_stripped_before_the_extension() {
        let entry = classify("api/page.json.POST");
        assert_eq!(entry.url_key, "/api/page");
        assert_eq!(entry.basename, "page.json.POST");
        assert_eq!(entry.extension, "json");
        assert_eq!(entry.media_type, "application/json");
        assert_eq!(entry.method, Some(Method::Post));
        assert_eq!(entry.effective_method(), Method::Post);
    }

    #[test]
    fn plain_files_default_to_get() {
        let entry = classify("page.json");
        assert_eq!(entry.method, None);
        assert_eq!(entry.effective_method(), Method::Get);
    }

    #[test]
    fn at_segments_become_parameters() {
        assert_eq!(classify("@id.html").url_key, "/:id");
        assert_eq!(classify("people/@id/index.json").url_key, "/people/:id");
        assert_eq!(classify("people/@id/friends.json").url_key, "/people/:id/friends");
        // only a leading @ marks a parameter
        assert_eq!(classify("mail/a@b.txt").url_key, "/mail/a@b");
    }

    #[test]
    fn unknown_and_missing_extensions() {
        let entry = classify("data/blob.weird");
        assert_eq!(entry.media_type, "application/octet-stream");

        let entry = classify("LICENSE");
        assert_eq!(entry.name, "LICENSE");
        assert_eq!(entry.extension, "");
        assert_eq!(entry.url_key, "/LICENSE");
    }

    #[test]
    fn only_the_last_dot_separates_the_extension() {
        let entry = classify("archive.tar.gz");
        assert_eq!(entry.name, "archive.tar");
        assert_eq!(entry.extension, "gz");
        assert_eq!(entry.url_key, "/archive.tar");
    }

    #[test]
    fn path_outside_root_is_rejected() {
        let err = FileEntry::classify(Path::new("/srv/site"), Path::new("/etc/passwd")).unwrap_err();
        assert!(matches!(err, Error::OutsideRoot(_)));
    }
}
