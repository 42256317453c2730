//! Table of contents parsing and serialization for RW.
//!
//! This crate provides:
//! - [`SiteMap`]: Documents, their toctrees and the docname index
//! - [`parse_toc_data`]: Build a [`SiteMap`] from nested YAML data
//! - [`create_toc_dict`]: Turn a [`SiteMap`] back into nested YAML data
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use rw_toc::{create_toc_yaml, parse_toc_yaml};
//!
//! let site_map = parse_toc_yaml("_toc.yml")?;
//! for docname in site_map.docnames() {
//!     println!("{docname}");
//! }
//!
//! // Re-serialize, omitting options left at their defaults
//! let yaml = create_toc_yaml(&site_map, true)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Format
//!
//! ```yaml
//! root: intro
//! defaults:
//!   titlesonly: true
//! subtrees:
//!   - caption: Guide
//!     sections:
//!       - file: guide/setup
//!         sections:
//!           - glob: guide/setup/*
//!       - url: https://example.com
//!         title: Example
//! ```

mod error;
mod keys;
mod options;
mod parser;
mod serializer;
mod site_map;
mod yaml;

pub use error::{ConstructionError, MalformedError, SerializeError, TocError};
pub use keys::{
    DEFAULT_ITEMS_KEY, DEFAULT_SUBTREES_KEY, FILE_KEY, GLOB_KEY, ROOT_KEY, TocKeys, URL_KEY,
};
pub use options::{Numbered, TocOption, TocTreeOptions};
pub use parser::{parse_toc_data, parse_toc_data_with_keys};
pub use serializer::{create_toc_dict, create_toc_dict_with_keys};
pub use site_map::{Document, FileItem, GlobItem, Item, SiteMap, TocTree, UrlItem};
pub use yaml::{create_toc_yaml, parse_toc_str, parse_toc_yaml};
