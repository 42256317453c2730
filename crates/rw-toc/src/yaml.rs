//! Loading and dumping toc files.

use std::path::Path;

use serde_yaml::Value;
use tracing::debug;

use crate::error::TocError;
use crate::parser::parse_toc_data;
use crate::serializer::create_toc_dict;
use crate::site_map::SiteMap;

/// Read and parse a toc file.
///
/// # Errors
///
/// Returns `TocError::Io` if the file cannot be read, `TocError::Yaml` if it
/// is not valid YAML, and `TocError::Malformed` if it is not a valid toc.
pub fn parse_toc_yaml(path: impl AsRef<Path>) -> Result<SiteMap, TocError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| TocError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "Loading toc file");
    parse_toc_str(&content)
}

/// Parse toc YAML text.
///
/// # Errors
///
/// Returns `TocError::Yaml` for invalid YAML and `TocError::Malformed` for an
/// invalid toc.
pub fn parse_toc_str(content: &str) -> Result<SiteMap, TocError> {
    let data: Value = serde_yaml::from_str(content)?;
    Ok(parse_toc_data(&data)?)
}

/// Render a site-map as toc YAML text.
///
/// # Errors
///
/// Returns `TocError::Serialize` if the site-map contains a cycle.
pub fn create_toc_yaml(site_map: &SiteMap, skip_defaults: bool) -> Result<String, TocError> {
    let data = create_toc_dict(site_map, skip_defaults)?;
    Ok(serde_yaml::to_string(&data)?)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    const TOC: &str = "root: intro
sections:
- file: guide
  title: Guide
  sections:
  - glob: guide/*
- url: https://example.com
options:
  caption: Contents
";

    #[test]
    fn test_parse_toc_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TOC.as_bytes()).unwrap();

        let site_map = parse_toc_yaml(file.path()).unwrap();
        assert_eq!(site_map.docnames().collect::<Vec<_>>(), ["intro", "guide"]);
        assert_eq!(site_map.globs().into_iter().collect::<Vec<_>>(), ["guide/*"]);
    }

    #[test]
    fn test_parse_toc_yaml_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_toc.yml");

        let err = parse_toc_yaml(&path).unwrap_err();
        assert!(matches!(err, TocError::Io { path: ref p, .. } if *p == path));
    }

    #[test]
    fn test_parse_toc_str_invalid_yaml() {
        let err = parse_toc_str("root: [unclosed").unwrap_err();
        assert!(matches!(err, TocError::Yaml(_)));
    }

    #[test]
    fn test_parse_toc_str_malformed() {
        let err = parse_toc_str("title: no root").unwrap_err();
        assert!(matches!(err, TocError::Malformed(_)));
        assert_eq!(err.to_string(), "Malformed toc: 'root' key not found: '/'");
    }

    #[test]
    fn test_create_toc_yaml_round_trip() {
        let site_map = parse_toc_str(TOC).unwrap();
        let yaml = create_toc_yaml(&site_map, true).unwrap();
        assert!(yaml.starts_with("root: intro\n"));

        let written: Value = serde_yaml::from_str(&yaml).unwrap();
        let original: Value = serde_yaml::from_str(TOC).unwrap();
        assert_eq!(written, original);
    }
}
