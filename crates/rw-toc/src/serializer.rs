//! Turn a [`SiteMap`] back into nested toc data.
//!
//! File items that resolve to a document are inlined as that document's
//! mapping, so the output mirrors the nesting of the original input. A
//! document with a single toctree is written in the shorthand form:
//!
//! ```yaml
//! file: guide
//! sections:
//!   - file: guide/setup
//! options:
//!   caption: Guide
//! ```

use std::collections::HashSet;

use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::error::SerializeError;
use crate::keys::{FILE_KEY, GLOB_KEY, META_KEY, OPTIONS_KEY, ROOT_KEY, TITLE_KEY, TocKeys, URL_KEY};
use crate::site_map::{Document, Item, SiteMap};

/// Create toc data from a site-map, using the default key names.
///
/// With `skip_defaults`, toctree options equal to their built-in default are
/// omitted.
///
/// # Errors
///
/// Returns [`SerializeError::Recursion`] if a document is reached twice,
/// which only happens for hand-built site-maps.
pub fn create_toc_dict(site_map: &SiteMap, skip_defaults: bool) -> Result<Value, SerializeError> {
    create_toc_dict_with_keys(site_map, skip_defaults, &TocKeys::default())
}

/// Create toc data from a site-map, using custom subtrees/items key names.
///
/// # Errors
///
/// Returns [`SerializeError::Recursion`] if a document is reached twice.
pub fn create_toc_dict_with_keys(
    site_map: &SiteMap,
    skip_defaults: bool,
    keys: &TocKeys,
) -> Result<Value, SerializeError> {
    let mut serializer = Serializer {
        site_map,
        skip_defaults,
        keys,
        visited: HashSet::new(),
    };
    let mut data = serializer.document(site_map.root(), ROOT_KEY)?;

    if let Some(meta) = site_map.meta()
        && !meta.is_empty()
    {
        data.insert(Value::from(META_KEY), Value::Mapping(meta.clone()));
    }

    debug!(documents = serializer.visited.len(), "Serialized site-map");
    Ok(Value::Mapping(data))
}

struct Serializer<'a> {
    site_map: &'a SiteMap,
    skip_defaults: bool,
    keys: &'a TocKeys,
    /// Docnames already written, guarding against cycles.
    visited: HashSet<&'a str>,
}

impl<'a> Serializer<'a> {
    fn document(&mut self, doc: &'a Document, file_key: &str) -> Result<Mapping, SerializeError> {
        if !self.visited.insert(&doc.docname) {
            return Err(SerializeError::Recursion(doc.docname.clone()));
        }

        let mut data = Mapping::new();
        data.insert(Value::from(file_key), Value::from(doc.docname.as_str()));
        if let Some(title) = &doc.title {
            data.insert(Value::from(TITLE_KEY), Value::from(title.as_str()));
        }

        if doc.subtrees.is_empty() {
            return Ok(data);
        }

        let items_key = Value::from(self.keys.items.as_str());
        let mut subtrees = Vec::with_capacity(doc.subtrees.len());
        for toctree in &doc.subtrees {
            let mut toctree_data = toctree.options.to_mapping(self.skip_defaults);
            let items = toctree
                .items
                .iter()
                .map(|item| self.item(item))
                .collect::<Result<Vec<_>, _>>()?;
            toctree_data.insert(items_key.clone(), Value::Sequence(items));
            subtrees.push(toctree_data);
        }

        if subtrees.len() == 1
            && let Some(mut toctree_data) = subtrees.pop()
            && let Some(items) = toctree_data.remove(&items_key)
        {
            // Shorthand: items at the document level, options under `options`
            data.insert(items_key, items);
            if !toctree_data.is_empty() {
                data.insert(Value::from(OPTIONS_KEY), Value::Mapping(toctree_data));
            }
        } else {
            data.insert(
                Value::from(self.keys.subtrees.as_str()),
                Value::Sequence(subtrees.into_iter().map(Value::Mapping).collect()),
            );
        }

        Ok(data)
    }

    fn item(&mut self, item: &'a Item) -> Result<Value, SerializeError> {
        let data = match item {
            Item::File(file) => match self.site_map.get_item(file) {
                Some(doc) => self.document(doc, FILE_KEY)?,
                None => Mapping::from_iter([(Value::from(FILE_KEY), Value::from(file.docname()))]),
            },
            Item::Glob(glob) => {
                Mapping::from_iter([(Value::from(GLOB_KEY), Value::from(glob.pattern()))])
            }
            Item::Url(url) => {
                let mut data = Mapping::new();
                data.insert(Value::from(URL_KEY), Value::from(url.url.as_str()));
                if let Some(title) = &url.title {
                    data.insert(Value::from(TITLE_KEY), Value::from(title.as_str()));
                }
                data
            }
        };
        Ok(Value::Mapping(data))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::options::TocTreeOptions;
    use crate::parser::parse_toc_data;
    use crate::site_map::{FileItem, GlobItem, TocTree, UrlItem};

    fn yaml(text: &str) -> Value {
        serde_yaml::from_str(text).unwrap()
    }

    fn round_trip(text: &str) -> Value {
        let site_map = parse_toc_data(&yaml(text)).unwrap();
        create_toc_dict(&site_map, true).unwrap()
    }

    #[test]
    fn test_leaf_root() {
        assert_eq!(round_trip("root: intro"), yaml("root: intro"));
    }

    #[test]
    fn test_shorthand_single_toctree() {
        let text = r"
root: index
sections:
  - file: a
  - glob: b/*
  - url: https://example.com
    title: Example
";
        assert_eq!(round_trip(text), yaml(text));
    }

    #[test]
    fn test_long_form_becomes_shorthand() {
        let out = round_trip(
            r"
root: index
subtrees:
  - caption: Guide
    sections:
      - file: a
",
        );
        assert_eq!(
            out,
            yaml(
                r"
root: index
sections:
  - file: a
options:
  caption: Guide
"
            )
        );
    }

    #[test]
    fn test_multiple_toctrees_keep_long_form() {
        let text = r"
root: index
title: Home
subtrees:
  - caption: One
    sections:
      - file: a
  - caption: Two
    numbered: true
    sections:
      - file: b
        title: B
        sections:
          - glob: b/*
";
        assert_eq!(round_trip(text), yaml(text));
    }

    #[test]
    fn test_nested_documents_inlined() {
        let text = r"
root: intro
sections:
  - file: chapter1
    sections:
      - file: chapter1/section1
        subtrees:
          - sections:
              - file: x
          - maxdepth: 2
            sections:
              - file: y
";
        assert_eq!(round_trip(text), yaml(text));
    }

    #[test]
    fn test_defaults_are_materialized() {
        let out = round_trip(
            r"
root: intro
defaults:
  titlesonly: true
sections:
  - file: a
",
        );
        assert_eq!(
            out,
            yaml(
                r"
root: intro
sections:
  - file: a
options:
  titlesonly: true
"
            )
        );
    }

    #[test]
    fn test_keep_defaults() {
        let site_map = parse_toc_data(&yaml("root: intro\nsections:\n  - file: a")).unwrap();
        let out = create_toc_dict(&site_map, false).unwrap();
        assert_eq!(
            out,
            yaml(
                r"
root: intro
sections:
  - file: a
options:
  caption: null
  hidden: true
  maxdepth: -1
  numbered: false
  reversed: false
  titlesonly: false
"
            )
        );
    }

    #[test]
    fn test_meta_appended_last() {
        let out = round_trip("meta:\n  author: me\nroot: intro");
        let keys: Vec<_> = out
            .as_mapping()
            .unwrap()
            .keys()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(keys, ["root", "meta"]);
        assert_eq!(out["meta"]["author"], Value::from("me"));
    }

    #[test]
    fn test_empty_meta_dropped() {
        assert_eq!(round_trip("root: intro\nmeta: {}"), yaml("root: intro"));
    }

    #[test]
    fn test_dangling_file_item_is_shallow() {
        let mut root = Document::new("intro");
        root.subtrees.push(
            TocTree::new(
                vec![Item::File(FileItem::new("elsewhere"))],
                TocTreeOptions::default(),
            )
            .unwrap(),
        );
        let site_map = SiteMap::new(root, None);

        let out = create_toc_dict(&site_map, true).unwrap();
        assert_eq!(out, yaml("root: intro\nsections:\n  - file: elsewhere"));
    }

    #[test]
    fn test_cycle_detected() {
        let toctree = |docname: &str| {
            TocTree::new(
                vec![Item::File(FileItem::new(docname))],
                TocTreeOptions::default(),
            )
            .unwrap()
        };
        let mut root = Document::new("intro");
        root.subtrees.push(toctree("a"));
        let mut a = Document::new("a");
        a.subtrees.push(toctree("b"));
        let mut b = Document::new("b");
        b.subtrees.push(toctree("a"));

        let mut site_map = SiteMap::new(root, None);
        site_map.insert(a);
        site_map.insert(b);

        let err = create_toc_dict(&site_map, true).unwrap_err();
        assert_eq!(err, SerializeError::Recursion("a".to_owned()));
        assert_eq!(err.to_string(), "'a' in site-map multiple times");
    }

    #[test]
    fn test_root_referenced_from_child() {
        let mut root = Document::new("intro");
        root.subtrees.push(
            TocTree::new(
                vec![
                    Item::Glob(GlobItem::new("*")),
                    Item::File(FileItem::new("intro")),
                ],
                TocTreeOptions::default(),
            )
            .unwrap(),
        );
        let site_map = SiteMap::new(root, None);
        assert_eq!(
            create_toc_dict(&site_map, true).unwrap_err(),
            SerializeError::Recursion("intro".to_owned())
        );
    }

    #[test]
    fn test_url_without_title() {
        let mut root = Document::new("intro");
        root.subtrees.push(
            TocTree::new(
                vec![Item::Url(UrlItem::new("https://example.com", None))],
                TocTreeOptions::default(),
            )
            .unwrap(),
        );
        let out = create_toc_dict(&SiteMap::new(root, None), true).unwrap();
        assert_eq!(out, yaml("root: intro\nsections:\n  - url: https://example.com"));
    }

    #[test]
    fn test_reparse_yields_equal_site_map() {
        let text = r"
root: intro
title: Introduction
meta:
  version: 2
defaults:
  hidden: false
  numbered: 0
subtrees:
  - caption: Basics
    sections:
      - file: basics/install
        title: Install
      - file: basics/usage
        sections:
          - url: https://example.com/usage
          - glob: basics/usage/*
  - reversed: true
    maxdepth: 3
    sections:
      - file: advanced
        options:
          titlesonly: true
        sections:
          - file: advanced/tuning
";
        let first = parse_toc_data(&yaml(text)).unwrap();
        let data = create_toc_dict(&first, true).unwrap();
        let second = parse_toc_data(&data).unwrap();
        assert_eq!(first, second);
        assert_eq!(create_toc_dict(&second, true).unwrap(), data);
    }

    #[test]
    fn test_custom_keys() {
        let keys = TocKeys {
            subtrees: "parts".to_owned(),
            items: "chapters".to_owned(),
        };
        let text = r"
root: intro
parts:
  - caption: One
    chapters:
      - file: a
  - caption: Two
    chapters:
      - file: b
";
        let site_map = crate::parser::parse_toc_data_with_keys(&yaml(text), &keys).unwrap();
        let out = create_toc_dict_with_keys(&site_map, true, &keys).unwrap();
        assert_eq!(out, yaml(text));
    }
}
