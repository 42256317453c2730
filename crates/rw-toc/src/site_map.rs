//! Site-map data model.
//!
//! A [`SiteMap`] holds every [`Document`] of a toc, keyed by docname. Each
//! document lists zero or more [`TocTree`]s, and each toctree lists the
//! [`Item`]s it links to.
//!
//! # Architecture
//!
//! Documents are stored in a flat `Vec<Document>` in registration order, with
//! a `HashMap` from docname to index. The root document is always at index 0
//! and is part of the index, so no other document can share its docname.
//! Documents link to each other by docname through [`FileItem`]s rather than
//! by ownership.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::Serialize;
use serde_yaml::Mapping;

use crate::error::ConstructionError;
use crate::options::TocTreeOptions;

/// Link to a document by docname.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FileItem(String);

impl FileItem {
    #[must_use]
    pub fn new(docname: impl Into<String>) -> Self {
        Self(docname.into())
    }

    /// Docname this item links to.
    #[must_use]
    pub fn docname(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Link to every document matching a glob pattern.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct GlobItem(String);

impl GlobItem {
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GlobItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Link to an external URL.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct UrlItem {
    pub url: String,
    /// Display title (the URL is shown if `None`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl UrlItem {
    #[must_use]
    pub fn new(url: impl Into<String>, title: Option<String>) -> Self {
        Self {
            url: url.into(),
            title,
        }
    }
}

/// Entry of a toctree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Item {
    File(FileItem),
    Glob(GlobItem),
    Url(UrlItem),
}

/// Ordered list of items with rendering options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TocTree {
    pub items: Vec<Item>,
    #[serde(flatten)]
    pub options: TocTreeOptions,
}

impl TocTree {
    /// Create a toctree.
    ///
    /// # Errors
    ///
    /// Returns `ConstructionError::EmptyItems` if `items` is empty.
    pub fn new(items: Vec<Item>, options: TocTreeOptions) -> Result<Self, ConstructionError> {
        if items.is_empty() {
            return Err(ConstructionError::EmptyItems);
        }
        Ok(Self { items, options })
    }

    /// File items, in order.
    pub fn files(&self) -> impl Iterator<Item = &FileItem> {
        self.items.iter().filter_map(|item| match item {
            Item::File(file) => Some(file),
            _ => None,
        })
    }

    /// Glob items, in order.
    pub fn globs(&self) -> impl Iterator<Item = &GlobItem> {
        self.items.iter().filter_map(|item| match item {
            Item::Glob(glob) => Some(glob),
            _ => None,
        })
    }

    /// URL items, in order.
    pub fn urls(&self) -> impl Iterator<Item = &UrlItem> {
        self.items.iter().filter_map(|item| match item {
            Item::Url(url) => Some(url),
            _ => None,
        })
    }
}

/// Named node of the navigation tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Document {
    pub docname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Toctrees of this document; empty for a leaf document.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subtrees: Vec<TocTree>,
}

impl Document {
    /// Create a leaf document without title.
    #[must_use]
    pub fn new(docname: impl Into<String>) -> Self {
        Self {
            docname: docname.into(),
            title: None,
            subtrees: Vec::new(),
        }
    }

    /// Docnames of all file items, across toctrees.
    pub fn child_files(&self) -> Vec<&str> {
        self.subtrees
            .iter()
            .flat_map(TocTree::files)
            .map(FileItem::docname)
            .collect()
    }

    /// Patterns of all glob items, across toctrees.
    pub fn child_globs(&self) -> Vec<&str> {
        self.subtrees
            .iter()
            .flat_map(TocTree::globs)
            .map(GlobItem::pattern)
            .collect()
    }

    /// URLs of all URL items, across toctrees.
    pub fn child_urls(&self) -> Vec<&str> {
        self.subtrees
            .iter()
            .flat_map(TocTree::urls)
            .map(|url| url.url.as_str())
            .collect()
    }
}

/// Site-map: root document, docname index and free-form metadata.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SiteMap {
    /// Documents in registration order; index 0 is the root.
    docs: Vec<Document>,
    #[serde(skip)]
    index: HashMap<String, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    meta: Option<Mapping>,
}

impl SiteMap {
    /// Create a site-map containing only the root document.
    #[must_use]
    pub fn new(root: Document, meta: Option<Mapping>) -> Self {
        let index = HashMap::from([(root.docname.clone(), 0)]);
        Self {
            docs: vec![root],
            index,
            meta,
        }
    }

    #[must_use]
    pub fn root(&self) -> &Document {
        &self.docs[0]
    }

    /// Free-form metadata, passed through unchanged.
    #[must_use]
    pub fn meta(&self) -> Option<&Mapping> {
        self.meta.as_ref()
    }

    /// Look up a document by docname.
    #[must_use]
    pub fn get(&self, docname: &str) -> Option<&Document> {
        self.index.get(docname).map(|&idx| &self.docs[idx])
    }

    /// Look up the document a file item links to.
    #[must_use]
    pub fn get_item(&self, item: &FileItem) -> Option<&Document> {
        self.get(item.docname())
    }

    #[must_use]
    pub fn contains(&self, docname: &str) -> bool {
        self.index.contains_key(docname)
    }

    /// Check whether a file item resolves to a document.
    #[must_use]
    pub fn contains_item(&self, item: &FileItem) -> bool {
        self.contains(item.docname())
    }

    /// Register a document under its docname.
    ///
    /// Replaces and returns any document already registered under the same
    /// docname, keeping its position (so replacing the root keeps it the root).
    pub fn insert(&mut self, document: Document) -> Option<Document> {
        if let Some(&idx) = self.index.get(&document.docname) {
            return Some(std::mem::replace(&mut self.docs[idx], document));
        }
        self.index.insert(document.docname.clone(), self.docs.len());
        self.docs.push(document);
        None
    }

    /// Number of documents, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Always `false`: a site-map has at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Docnames in registration order, root first.
    pub fn docnames(&self) -> impl Iterator<Item = &str> {
        self.docs.iter().map(|doc| doc.docname.as_str())
    }

    /// Documents in registration order, root first.
    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.docs.iter()
    }

    /// Every glob pattern used in any toctree.
    #[must_use]
    pub fn globs(&self) -> BTreeSet<&str> {
        self.docs
            .iter()
            .flat_map(Document::child_globs)
            .collect()
    }
}
