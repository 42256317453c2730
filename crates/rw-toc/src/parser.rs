//! Build a [`SiteMap`] from nested toc data.
//!
//! Parsing walks the data depth-first. Each document's own toctrees are
//! validated first; the item entries that link to files are then parsed as
//! documents in turn. Error paths accumulate as `/parent/child/` for
//! documents, with toctree and item indices appended (e.g. `/intro/0/2`).

use serde_yaml::{Mapping, Value};
use tracing::{debug, trace};

use crate::error::{ConstructionError, MalformedError, value_kind};
use crate::keys::{
    DEFAULTS_KEY, FILE_KEY, GLOB_KEY, LINK_KEYS, META_KEY, OPTIONS_KEY, ROOT_KEY, TITLE_KEY,
    TocKeys, URL_KEY,
};
use crate::options::TocTreeOptions;
use crate::site_map::{Document, FileItem, GlobItem, Item, SiteMap, TocTree, UrlItem};

/// Parse toc data into a site-map, using the default key names.
///
/// # Errors
///
/// Returns [`MalformedError`] naming the offending path if the data is not
/// a valid toc.
pub fn parse_toc_data(data: &Value) -> Result<SiteMap, MalformedError> {
    parse_toc_data_with_keys(data, &TocKeys::default())
}

/// Parse toc data into a site-map, using custom subtrees/items key names.
///
/// # Errors
///
/// Returns [`MalformedError`] naming the offending path if the data is not
/// a valid toc.
pub fn parse_toc_data_with_keys(data: &Value, keys: &TocKeys) -> Result<SiteMap, MalformedError> {
    let Value::Mapping(data) = data else {
        return Err(MalformedError::new(format!(
            "toc is not a mapping: {}",
            value_kind(data)
        )));
    };

    let empty = Mapping::new();
    let defaults = match data.get(DEFAULTS_KEY) {
        None | Some(Value::Null) => &empty,
        Some(Value::Mapping(defaults)) => defaults,
        Some(other) => {
            return Err(MalformedError::new(format!(
                "'{DEFAULTS_KEY}' not a mapping: {}",
                value_kind(other)
            )));
        }
    };

    let meta = match data.get(META_KEY) {
        None | Some(Value::Null) => None,
        Some(Value::Mapping(meta)) => Some(meta.clone()),
        Some(other) => {
            return Err(MalformedError::new(format!(
                "'{META_KEY}' not a mapping: {}",
                value_kind(other)
            )));
        }
    };

    let (root, children) = parse_document(data, defaults, "/", ROOT_KEY, keys)?;
    let mut site_map = SiteMap::new(root, meta);
    parse_children(&children, &mut site_map, defaults, "/", keys)?;

    debug!(
        root = %site_map.root().docname,
        documents = site_map.len(),
        "Parsed site-map"
    );
    Ok(site_map)
}

/// Toctree data before validation.
struct RawTocTree<'a> {
    /// Mapping the options are read from (`None` for a shorthand without `options`).
    options: Option<&'a Mapping>,
    items: &'a Value,
}

/// Parse a single document and its toctrees.
///
/// Returns the document and the item entries that link to files, which the
/// caller parses as child documents.
fn parse_document<'a>(
    data: &'a Mapping,
    defaults: &Mapping,
    path: &str,
    file_key: &str,
    keys: &TocKeys,
) -> Result<(Document, Vec<&'a Mapping>), MalformedError> {
    let Some(docname) = data.get(file_key) else {
        return Err(MalformedError::new(format!(
            "'{file_key}' key not found: '{path}'"
        )));
    };

    let raw_toctrees = raw_toctrees(data, path, keys)?;
    let no_options = Mapping::new();

    let mut toctrees = Vec::with_capacity(raw_toctrees.len());
    let mut child_entries = Vec::new();
    for (toc_idx, raw) in raw_toctrees.iter().enumerate() {
        let toc_path = format!("{path}{toc_idx}");

        let items_data = match raw.items {
            Value::Sequence(items) if !items.is_empty() => items,
            _ => {
                return Err(MalformedError::new(format!(
                    "'{}' not a non-empty list: '{toc_path}'",
                    keys.items
                )));
            }
        };

        let mut items = Vec::with_capacity(items_data.len());
        for (item_idx, item_data) in items_data.iter().enumerate() {
            let item_path = format!("{toc_path}/{item_idx}");
            let Value::Mapping(item_data) = item_data else {
                return Err(MalformedError::new(format!(
                    "'{}' item not a mapping type: '{item_path}'",
                    keys.items
                )));
            };

            let item = parse_item(item_data, &item_path, keys)?;
            if matches!(item, Item::File(_)) {
                child_entries.push(item_data);
            }
            items.push(item);
        }

        let toctree = TocTreeOptions::resolve(raw.options.unwrap_or(&no_options), defaults)
            .and_then(|options| TocTree::new(items, options))
            .map_err(|e| MalformedError::with_source(format!("toctree validation: {toc_path}"), e))?;
        trace!(path = %toc_path, items = toctree.items.len(), "Parsed toctree");
        toctrees.push(toctree);
    }

    let document = build_document(docname, data.get(TITLE_KEY), toctrees)
        .map_err(|e| MalformedError::with_source(format!("doc validation: {path}"), e))?;

    Ok((document, child_entries))
}

/// Collect a document's toctrees from either the shorthand or the long form.
fn raw_toctrees<'a>(
    data: &'a Mapping,
    path: &str,
    keys: &TocKeys,
) -> Result<Vec<RawTocTree<'a>>, MalformedError> {
    if let Some(items) = data.get(keys.items.as_str()) {
        // Shorthand for a single toctree, with options under `options`
        if data.contains_key(keys.subtrees.as_str()) {
            return Err(MalformedError::new(format!(
                "Both '{}' and '{}' found: '{path}'",
                keys.subtrees, keys.items
            )));
        }
        let options = match data.get(OPTIONS_KEY) {
            None => None,
            Some(Value::Mapping(options)) => Some(options),
            Some(other) => {
                return Err(MalformedError::new(format!(
                    "'{OPTIONS_KEY}' not a mapping: '{path}' ({})",
                    value_kind(other)
                )));
            }
        };
        return Ok(vec![RawTocTree { options, items }]);
    }

    let Some(subtrees) = data.get(keys.subtrees.as_str()) else {
        return Ok(Vec::new());
    };
    let subtrees = match subtrees {
        Value::Sequence(subtrees) if !subtrees.is_empty() => subtrees,
        _ => {
            return Err(MalformedError::new(format!(
                "'{}' not a non-empty list: '{path}'",
                keys.subtrees
            )));
        }
    };

    subtrees
        .iter()
        .enumerate()
        .map(|(toc_idx, toc_data)| match toc_data {
            Value::Mapping(toc_data) => match toc_data.get(keys.items.as_str()) {
                Some(items) => Ok(RawTocTree {
                    options: Some(toc_data),
                    items,
                }),
                None => Err(not_a_toctree(path, toc_idx, keys)),
            },
            _ => Err(not_a_toctree(path, toc_idx, keys)),
        })
        .collect()
}

fn not_a_toctree(path: &str, toc_idx: usize, keys: &TocKeys) -> MalformedError {
    MalformedError::new(format!(
        "part not a mapping containing '{}' key: '{path}{toc_idx}'",
        keys.items
    ))
}

/// Parse a toctree item entry, which must hold exactly one link key.
fn parse_item(data: &Mapping, path: &str, keys: &TocKeys) -> Result<Item, MalformedError> {
    let link_keys: Vec<&str> = LINK_KEYS
        .into_iter()
        .filter(|key| data.contains_key(*key))
        .collect();

    let link_key = match link_keys.as_slice() {
        [key] => *key,
        [] => {
            return Err(MalformedError::new(format!(
                "'{}' item does not contain one of {LINK_KEYS:?}: '{path}'",
                keys.items
            )));
        }
        _ => {
            return Err(MalformedError::new(format!(
                "'{}' item contains incompatible keys {link_keys:?}: {path}",
                keys.items
            )));
        }
    };

    // Only file entries can nest; their structure is parsed as a child document
    if link_key != FILE_KEY {
        for other_key in [keys.subtrees.as_str(), keys.items.as_str()] {
            if data.contains_key(other_key) {
                return Err(MalformedError::new(format!(
                    "'{}' item contains incompatible keys '{link_key}' and '{other_key}': {path}",
                    keys.items
                )));
            }
        }
    }

    build_item(link_key, data)
        .map_err(|e| MalformedError::with_source(format!("item validation: {path}"), e))
}

fn build_item(link_key: &str, data: &Mapping) -> Result<Item, ConstructionError> {
    match link_key {
        FILE_KEY => Ok(Item::File(FileItem::new(expect_str(FILE_KEY, data.get(FILE_KEY))?))),
        GLOB_KEY => Ok(Item::Glob(GlobItem::new(expect_str(GLOB_KEY, data.get(GLOB_KEY))?))),
        _ => {
            let url = expect_str(URL_KEY, data.get(URL_KEY))?;
            let title = optional_str(TITLE_KEY, data.get(TITLE_KEY))?;
            Ok(Item::Url(UrlItem::new(url, title)))
        }
    }
}

fn build_document(
    docname: &Value,
    title: Option<&Value>,
    subtrees: Vec<TocTree>,
) -> Result<Document, ConstructionError> {
    Ok(Document {
        docname: expect_str("docname", Some(docname))?,
        title: optional_str(TITLE_KEY, title)?,
        subtrees,
    })
}

fn expect_str(field: &'static str, value: Option<&Value>) -> Result<String, ConstructionError> {
    match value {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(ConstructionError::wrong_type(field, "a string", other)),
        None => Err(ConstructionError::wrong_type(field, "a string", &Value::Null)),
    }
}

fn optional_str(field: &'static str, value: Option<&Value>) -> Result<Option<String>, ConstructionError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(ConstructionError::wrong_type(field, "a string or null", other)),
    }
}

/// Parse file item entries as documents and register them, depth-first.
fn parse_children(
    entries: &[&Mapping],
    site_map: &mut SiteMap,
    defaults: &Mapping,
    path: &str,
    keys: &TocKeys,
) -> Result<(), MalformedError> {
    for entry in entries {
        let Some(Value::String(docname)) = entry.get(FILE_KEY) else {
            return Err(MalformedError::new(format!("doc validation: {path}")));
        };
        if site_map.contains(docname) {
            return Err(MalformedError::new(format!(
                "document file used multiple times: '{docname}'"
            )));
        }

        let child_path = format!("{path}{docname}/");
        let (document, grandchildren) = parse_document(entry, defaults, &child_path, FILE_KEY, keys)?;
        debug!(docname = %docname, toctrees = document.subtrees.len(), "Registered document");
        site_map.insert(document);

        parse_children(&grandchildren, site_map, defaults, &child_path, keys)?;
    }
    Ok(())
}
