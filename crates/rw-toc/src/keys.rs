//! Key names used in the toc format.

/// Identifies the root document at the top level of the toc.
pub const ROOT_KEY: &str = "root";
/// Links a toctree item to a document (also identifies nested documents).
pub const FILE_KEY: &str = "file";
/// Links a toctree item to a glob pattern of documents.
pub const GLOB_KEY: &str = "glob";
/// Links a toctree item to an external URL.
pub const URL_KEY: &str = "url";

/// Default name of the key listing a document's toctrees.
pub const DEFAULT_SUBTREES_KEY: &str = "subtrees";
/// Default name of the key listing a toctree's items.
pub const DEFAULT_ITEMS_KEY: &str = "sections";

pub(crate) const TITLE_KEY: &str = "title";
pub(crate) const OPTIONS_KEY: &str = "options";
pub(crate) const DEFAULTS_KEY: &str = "defaults";
pub(crate) const META_KEY: &str = "meta";

/// Link keys in the order they are reported in error messages.
pub(crate) const LINK_KEYS: [&str; 3] = [FILE_KEY, GLOB_KEY, URL_KEY];

/// Names of the structural keys that may be customized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocKeys {
    /// Key listing a document's toctrees (default: `subtrees`).
    pub subtrees: String,
    /// Key listing a toctree's items (default: `sections`).
    pub items: String,
}

impl Default for TocKeys {
    fn default() -> Self {
        Self {
            subtrees: DEFAULT_SUBTREES_KEY.to_owned(),
            items: DEFAULT_ITEMS_KEY.to_owned(),
        }
    }
}
