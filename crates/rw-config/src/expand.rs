//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a configuration value.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env(value)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_unchanged() {
        assert_eq!(expand_env("_toc.yml", "toc.path").unwrap(), "_toc.yml");
    }

    #[test]
    fn test_default_used_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("RW_EXPAND_TEST_UNSET");
        }
        let value = expand_env("${RW_EXPAND_TEST_UNSET:-docs}/_toc.yml", "toc.path").unwrap();
        assert_eq!(value, "docs/_toc.yml");
    }

    #[test]
    fn test_missing_var_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("RW_EXPAND_TEST_MISSING");
        }
        let err = expand_env("${RW_EXPAND_TEST_MISSING}", "toc.path").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Environment variable error in toc.path: ${RW_EXPAND_TEST_MISSING} not set"
        );
    }
}
