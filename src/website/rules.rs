//! Groups classified files into the route table.
//!
//! Every URL key becomes one combined rule carrying all of its
//! representations, plus one rule per representation with the extension
//! spelled out:
//!
//! ```text
//! about/index.html, about/index.json, contact.html, contact.html.POST
//!
//! /about             [html, json]
//! /about/index.html  [html]
//! /about/index.json  [json]
//! /contact           [html (+POST)]
//! /contact.html      [html (+POST)]
//! ```

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::warn;

use crate::error::Error;
use crate::method::Method;

use super::classify::FileEntry;

/// One media-type representation of a route.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExtensionVariant {
    pub extension: String,
    pub media_type: &'static str,
    /// The method-less file; absent when only `name.ext.METHOD` files exist.
    pub file: Option<PathBuf>,
    /// Files that answer one specific method instead of `file`.
    pub overrides: BTreeMap<Method, PathBuf>,
    /// Whether the files are `index.*` files answering for their directory.
    pub index: bool,
}

impl ExtensionVariant {
    fn new(entry: &FileEntry) -> Self {
        Self {
            extension: entry.extension.clone(),
            media_type: entry.media_type,
            file: None,
            overrides: BTreeMap::new(),
            index: entry.is_index(),
        }
    }

    /// The file that answers `method`: its override if there is one, else
    /// the method-less file.
    pub fn file_for(&self, method: Method) -> Option<&Path> {
        self.overrides
            .get(&method)
            .or(self.file.as_ref())
            .map(PathBuf::as_path)
    }

    fn files(&self) -> impl Iterator<Item = &PathBuf> {
        self.file.iter().chain(self.overrides.values())
    }

    fn add(&mut self, key: &str, entry: FileEntry) -> Result<(), Error> {
        let taken = match entry.method {
            None => self.file.as_ref(),
            Some(method) => self.overrides.get(&method),
        };
        if let Some(first) = taken {
            return Err(duplicate(key, first, entry));
        }
        match entry.method {
            None => self.file = Some(entry.path),
            Some(method) => {
                self.overrides.insert(method, entry.path);
            }
        }
        Ok(())
    }
}

fn duplicate(key: &str, first: &Path, entry: FileEntry) -> Error {
    Error::DuplicateFile {
        key: key.to_owned(),
        extension: entry.extension,
        first: first.to_path_buf(),
        second: entry.path,
    }
}

/// A URL pattern plus the representations it can serve.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RouteRule {
    /// Route pattern, `:name` segments are parameters.
    pub key: String,
    /// Logical name: the file name without extension, or `index`.
    pub name: String,
    /// Ordered by extension; negotiation takes the first acceptable one.
    pub variants: Vec<ExtensionVariant>,
}

/// Every route of the website, literal routes ahead of parameter routes.
///
/// Built once by [`RuleTable::collect`] and never modified afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RuleTable {
    rules: Vec<RouteRule>,
}

impl RuleTable {
    /// Groups `entries` by URL key and expands them into rules.
    ///
    /// When `name.ext` and `name/index.ext` both exist, the directory index
    /// wins and the other file is dropped with a warning. Two files landing
    /// in the same slot otherwise, or two rules expanding to the same key,
    /// fail the whole collection.
    pub fn collect(entries: impl IntoIterator<Item = FileEntry>) -> Result<Self, Error> {
        let mut groups: BTreeMap<String, Group> = BTreeMap::new();
        for entry in entries {
            groups
                .entry(entry.url_key.clone())
                .or_insert_with(|| Group::new(&entry))
                .add(entry)?;
        }

        let mut rules: Vec<RouteRule> = groups
            .into_iter()
            .flat_map(|(key, group)| group.expand(key))
            .collect();
        rules.sort_by(|a, b| compare_keys(&a.key, &b.key));

        if let Some(pair) = rules.windows(2).find(|pair| pair[0].key == pair[1].key) {
            return Err(Error::DuplicateRoute(pair[0].key.clone()));
        }

        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[RouteRule] { &self.rules }
    pub fn len(&self) -> usize { self.rules.len() }
    pub fn is_empty(&self) -> bool { self.rules.is_empty() }

    pub fn get(&self, key: &str) -> Option<&RouteRule> {
        self.rules.iter().find(|rule| rule.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.key.as_str())
    }
}

/// Files sharing one URL key, by extension.
struct Group {
    name: String,
    variants: BTreeMap<String, ExtensionVariant>,
}

impl Group {
    fn new(entry: &FileEntry) -> Self {
        Self { name: entry.name.clone(), variants: BTreeMap::new() }
    }

    fn add(&mut self, entry: FileEntry) -> Result<(), Error> {
        let key = entry.url_key.clone();
        if entry.is_index() {
            self.name.clone_from(&entry.name);
        }

        let Some(variant) = self.variants.get_mut(&entry.extension) else {
            let mut variant = ExtensionVariant::new(&entry);
            variant.add(&key, entry)?;
            self.variants.insert(variant.extension.clone(), variant);
            return Ok(());
        };

        match (variant.index, entry.is_index()) {
            (true, false) => {
                warn!(key = %key, ignored = %entry.path.display(), "directory index takes precedence");
                Ok(())
            }
            (false, true) => {
                for shadowed in variant.files() {
                    warn!(key = %key, ignored = %shadowed.display(), "directory index takes precedence");
                }
                *variant = ExtensionVariant::new(&entry);
                variant.add(&key, entry)
            }
            _ => variant.add(&key, entry),
        }
    }

    fn expand(self, key: String) -> Vec<RouteRule> {
        let variants: Vec<ExtensionVariant> = self.variants.into_values().collect();

        let mut rules = Vec::with_capacity(variants.len() + 1);
        for variant in &variants {
            if variant.extension.is_empty() {
                continue;
            }
            let expanded = if variant.index {
                format!("{}/index.{}", key.trim_end_matches('/'), variant.extension)
            } else {
                format!("{key}.{}", variant.extension)
            };
            rules.push(RouteRule {
                key: expanded,
                name: self.name.clone(),
                variants: vec![variant.clone()],
            });
        }
        rules.push(RouteRule { key, name: self.name, variants });
        rules
    }
}

/// Segment-wise order: literal segments before `:` parameter segments, then
/// plain string order; a key sorts before any longer key it prefixes.
pub fn compare_keys(a: &str, b: &str) -> Ordering {
    let mut a_segments = a.split('/');
    let mut b_segments = b.split('/');
    loop {
        match (a_segments.next(), b_segments.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let order = x.starts_with(':')
                    .cmp(&y.starts_with(':'))
                    .then_with(|| x.cmp(y));
                if order != Ordering::Equal {
                    return order;
                }
            }
        }
    }
}
