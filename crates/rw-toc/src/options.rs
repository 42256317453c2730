//! Toctree options and default resolution.
//!
//! Each option value is resolved in three tiers:
//! 1. The key set explicitly on the toctree
//! 2. The same key in the top-level `defaults` mapping
//! 3. The option's built-in default (see [`TocTreeOptions::default`])

use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::error::ConstructionError;

/// Recognized toctree option.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TocOption {
    Caption,
    Hidden,
    Maxdepth,
    Numbered,
    Reversed,
    Titlesonly,
}

impl TocOption {
    /// All options, in serialization order.
    pub const ALL: [Self; 6] = [
        Self::Caption,
        Self::Hidden,
        Self::Maxdepth,
        Self::Numbered,
        Self::Reversed,
        Self::Titlesonly,
    ];

    /// Key name in the toc format.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Caption => "caption",
            Self::Hidden => "hidden",
            Self::Maxdepth => "maxdepth",
            Self::Numbered => "numbered",
            Self::Reversed => "reversed",
            Self::Titlesonly => "titlesonly",
        }
    }

    /// Look up an option by key name.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|option| option.key() == key)
    }
}

/// Value of the `numbered` option: a flag or a numbering depth.
///
/// Compares across forms like a boolean and an integer do, so
/// `Flag(false) == Depth(0)` and `Flag(true) == Depth(1)`.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(untagged)]
pub enum Numbered {
    Flag(bool),
    Depth(i64),
}

impl Numbered {
    fn as_depth(self) -> i64 {
        match self {
            Self::Flag(flag) => i64::from(flag),
            Self::Depth(depth) => depth,
        }
    }
}

impl Default for Numbered {
    fn default() -> Self {
        Self::Flag(false)
    }
}

impl PartialEq for Numbered {
    fn eq(&self, other: &Self) -> bool {
        self.as_depth() == other.as_depth()
    }
}

impl Eq for Numbered {}

impl From<Numbered> for Value {
    fn from(numbered: Numbered) -> Self {
        match numbered {
            Numbered::Flag(flag) => Value::Bool(flag),
            Numbered::Depth(depth) => Value::from(depth),
        }
    }
}

/// Rendering options of a toctree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TocTreeOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    pub hidden: bool,
    pub maxdepth: i64,
    pub numbered: Numbered,
    pub reversed: bool,
    pub titlesonly: bool,
}

impl Default for TocTreeOptions {
    fn default() -> Self {
        Self {
            caption: None,
            hidden: true,
            maxdepth: -1,
            numbered: Numbered::default(),
            reversed: false,
            titlesonly: false,
        }
    }
}

/// Where a resolved option value came from.
#[derive(Debug, PartialEq)]
pub(crate) enum Resolved<'a> {
    /// Set on the toctree itself.
    Explicit(&'a Value),
    /// Taken from the `defaults` mapping.
    Inherited(&'a Value),
    /// Neither set; the built-in default applies.
    BuiltIn,
}

/// Resolve one option: toctree value, then `defaults`, then built-in.
pub(crate) fn resolve_option<'a>(
    option: TocOption,
    toctree: &'a Mapping,
    defaults: &'a Mapping,
) -> Resolved<'a> {
    if let Some(value) = toctree.get(option.key()) {
        Resolved::Explicit(value)
    } else if let Some(value) = defaults.get(option.key()) {
        Resolved::Inherited(value)
    } else {
        Resolved::BuiltIn
    }
}

impl TocTreeOptions {
    /// Build options for a toctree from its own keys and the `defaults` mapping.
    ///
    /// Keys on the toctree that are not options are ignored. Keys in
    /// `defaults` must all be options.
    pub(crate) fn resolve(toctree: &Mapping, defaults: &Mapping) -> Result<Self, ConstructionError> {
        if let Some(unknown) = defaults
            .keys()
            .find(|key| key.as_str().and_then(TocOption::from_key).is_none())
        {
            let name = unknown
                .as_str()
                .map_or_else(|| format!("{unknown:?}"), ToOwned::to_owned);
            return Err(ConstructionError::UnknownOption(name));
        }

        let mut options = Self::default();
        for option in TocOption::ALL {
            match resolve_option(option, toctree, defaults) {
                Resolved::Explicit(value) | Resolved::Inherited(value) => {
                    options.set(option, value)?;
                }
                Resolved::BuiltIn => {}
            }
        }
        Ok(options)
    }

    /// Set an option from a raw value, checking its type.
    pub fn set(&mut self, option: TocOption, value: &Value) -> Result<(), ConstructionError> {
        let key = option.key();
        match option {
            TocOption::Caption => {
                self.caption = match value {
                    Value::Null => None,
                    Value::String(caption) => Some(caption.clone()),
                    other => {
                        return Err(ConstructionError::wrong_type(key, "a string or null", other));
                    }
                };
            }
            TocOption::Hidden => self.hidden = expect_bool(key, value)?,
            TocOption::Maxdepth => self.maxdepth = expect_int(key, value)?,
            TocOption::Numbered => {
                self.numbered = match value {
                    Value::Bool(flag) => Numbered::Flag(*flag),
                    Value::Number(n) => n.as_i64().map(Numbered::Depth).ok_or_else(|| {
                        ConstructionError::wrong_type(key, "a bool or an integer", value)
                    })?,
                    other => {
                        return Err(ConstructionError::wrong_type(key, "a bool or an integer", other));
                    }
                };
            }
            TocOption::Reversed => self.reversed = expect_bool(key, value)?,
            TocOption::Titlesonly => self.titlesonly = expect_bool(key, value)?,
        }
        Ok(())
    }

    /// Current value of an option.
    #[must_use]
    pub fn get(&self, option: TocOption) -> Value {
        match option {
            TocOption::Caption => self
                .caption
                .as_ref()
                .map_or(Value::Null, |caption| Value::String(caption.clone())),
            TocOption::Hidden => Value::Bool(self.hidden),
            TocOption::Maxdepth => Value::from(self.maxdepth),
            TocOption::Numbered => self.numbered.into(),
            TocOption::Reversed => Value::Bool(self.reversed),
            TocOption::Titlesonly => Value::Bool(self.titlesonly),
        }
    }

    /// Check whether an option equals its built-in default.
    #[must_use]
    pub fn is_default(&self, option: TocOption) -> bool {
        let default = Self::default();
        match option {
            TocOption::Caption => self.caption == default.caption,
            TocOption::Hidden => self.hidden == default.hidden,
            TocOption::Maxdepth => self.maxdepth == default.maxdepth,
            TocOption::Numbered => self.numbered == default.numbered,
            TocOption::Reversed => self.reversed == default.reversed,
            TocOption::Titlesonly => self.titlesonly == default.titlesonly,
        }
    }

    /// Options as a mapping, in [`TocOption::ALL`] order.
    ///
    /// With `skip_defaults`, options equal to their built-in default are left out.
    #[must_use]
    pub fn to_mapping(&self, skip_defaults: bool) -> Mapping {
        TocOption::ALL
            .into_iter()
            .filter(|option| !skip_defaults || !self.is_default(*option))
            .map(|option| (Value::from(option.key()), self.get(option)))
            .collect()
    }
}

fn expect_bool(key: &'static str, value: &Value) -> Result<bool, ConstructionError> {
    value
        .as_bool()
        .ok_or_else(|| ConstructionError::wrong_type(key, "a bool", value))
}

fn expect_int(key: &'static str, value: &Value) -> Result<i64, ConstructionError> {
    value
        .as_i64()
        .ok_or_else(|| ConstructionError::wrong_type(key, "an integer", value))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn mapping(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_builtin_defaults() {
        let options = TocTreeOptions::default();
        assert_eq!(options.caption, None);
        assert!(options.hidden);
        assert_eq!(options.maxdepth, -1);
        assert_eq!(options.numbered, Numbered::Flag(false));
        assert!(!options.reversed);
        assert!(!options.titlesonly);
        for option in TocOption::ALL {
            assert!(options.is_default(option), "{option:?} should be default");
        }
    }

    #[test]
    fn test_resolve_tiers() {
        let toctree = mapping("hidden: false\nsections: []");
        let defaults = mapping("hidden: true\nmaxdepth: 2");

        assert_eq!(
            resolve_option(TocOption::Hidden, &toctree, &defaults),
            Resolved::Explicit(&Value::Bool(false))
        );
        assert_eq!(
            resolve_option(TocOption::Maxdepth, &toctree, &defaults),
            Resolved::Inherited(&Value::from(2))
        );
        assert_eq!(
            resolve_option(TocOption::Caption, &toctree, &defaults),
            Resolved::BuiltIn
        );
    }

    #[test]
    fn test_resolve_options_ignores_unknown_toctree_keys() {
        let toctree = mapping("caption: Guide\nstyle: fancy\nsections: []");
        let options = TocTreeOptions::resolve(&toctree, &Mapping::new()).unwrap();
        assert_eq!(options.caption.as_deref(), Some("Guide"));
    }

    #[test]
    fn test_resolve_options_rejects_unknown_default() {
        let defaults = mapping("style: fancy");
        let err = TocTreeOptions::resolve(&Mapping::new(), &defaults).unwrap_err();
        assert_eq!(err, ConstructionError::UnknownOption("style".to_owned()));
    }

    #[test]
    fn test_set_wrong_type() {
        let mut options = TocTreeOptions::default();
        let err = options
            .set(TocOption::Maxdepth, &Value::from("x"))
            .unwrap_err();
        assert_eq!(
            err,
            ConstructionError::WrongType {
                field: "maxdepth",
                expected: "an integer",
                found: "string",
            }
        );
        assert!(options.set(TocOption::Hidden, &Value::from(1)).is_err());
        assert!(options.set(TocOption::Numbered, &Value::from(1.5)).is_err());
        assert!(options.set(TocOption::Caption, &Value::from(3)).is_err());
    }

    #[test]
    fn test_numbered_accepts_bool_and_int() {
        let mut options = TocTreeOptions::default();
        options.set(TocOption::Numbered, &Value::from(3)).unwrap();
        assert_eq!(options.numbered, Numbered::Depth(3));
        options.set(TocOption::Numbered, &Value::Bool(true)).unwrap();
        assert_eq!(options.numbered, Numbered::Flag(true));
    }

    #[test]
    fn test_numbered_cross_form_equality() {
        assert_eq!(Numbered::Depth(0), Numbered::Flag(false));
        assert_eq!(Numbered::Depth(1), Numbered::Flag(true));
        assert_ne!(Numbered::Depth(2), Numbered::Flag(true));

        let options = TocTreeOptions {
            numbered: Numbered::Depth(0),
            ..Default::default()
        };
        assert!(options.is_default(TocOption::Numbered));
    }

    #[test]
    fn test_to_mapping_skip_defaults() {
        let options = TocTreeOptions {
            caption: Some("API".to_owned()),
            maxdepth: 2,
            ..Default::default()
        };
        assert_eq!(options.to_mapping(true), mapping("caption: API\nmaxdepth: 2"));

        let all = options.to_mapping(false);
        let keys: Vec<_> = all.keys().filter_map(Value::as_str).collect();
        assert_eq!(
            keys,
            ["caption", "hidden", "maxdepth", "numbered", "reversed", "titlesonly"]
        );
    }

    #[test]
    fn test_to_mapping_null_caption_when_keeping_defaults() {
        let all = TocTreeOptions::default().to_mapping(false);
        assert_eq!(all.get("caption"), Some(&Value::Null));
        assert_eq!(all.get("hidden"), Some(&Value::Bool(true)));
    }
}
