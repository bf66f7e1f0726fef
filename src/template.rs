//! `${NAME}` placeholder substitution for base URLs and header values
//!
//! Substitution is deliberately best effort: an unset variable substitutes to
//! the empty string, never an error. The environment is an explicit mapping
//! rather than an implicit `std::env` read so that callers (and tests) control
//! exactly what is visible.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Regex for matching placeholders: ${NAME}
static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap());

/// An explicit environment-variable mapping
#[derive(Debug, Clone, Default)]
pub struct EnvVars {
    vars: HashMap<String, String>,
}

impl EnvVars {
    /// Create an empty environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the process environment
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Look up a variable
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Look up a variable, treating an empty value as unset
    pub fn get_non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.is_empty())
    }

    /// Set a variable
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvVars {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Substitute every `${NAME}` occurrence in `template` with the mapped value.
///
/// Unset names substitute to the empty string.
pub fn substitute(template: &str, env: &EnvVars) -> String {
    PLACEHOLDER_REGEX
        .replace_all(template, |caps: &regex::Captures<'_>| {
            env.get(&caps[1]).unwrap_or("").to_string()
        })
        .into_owned()
}

/// Check if a string contains `${NAME}` placeholders
pub fn has_placeholders(s: &str) -> bool {
    PLACEHOLDER_REGEX.is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> EnvVars {
        EnvVars::from_iter([("JIRA_DOMAIN", "example.atlassian.net"), ("EMPTY", "")])
    }

    #[test]
    fn test_simple_substitution() {
        let result = substitute("https://${JIRA_DOMAIN}/rest/api/3/", &env());
        assert_eq!(result, "https://example.atlassian.net/rest/api/3/");
    }

    #[test]
    fn test_unset_substitutes_to_empty() {
        assert_eq!(substitute("x${MISSING}y", &env()), "xy");
        assert_eq!(substitute("x${EMPTY}y", &env()), "xy");
    }

    #[test]
    fn test_multiple_occurrences() {
        let result = substitute("${JIRA_DOMAIN}/${JIRA_DOMAIN}", &env());
        assert_eq!(
            result,
            "example.atlassian.net/example.atlassian.net"
        );
    }

    #[test]
    fn test_non_placeholder_text_untouched() {
        assert_eq!(substitute("plain $NAME {curly}", &env()), "plain $NAME {curly}");
        assert!(!has_placeholders("plain $NAME {curly}"));
        assert!(has_placeholders("${AUTH_HEADER}"));
    }

    #[test]
    fn test_get_non_empty() {
        let e = env();
        assert_eq!(e.get("EMPTY"), Some(""));
        assert_eq!(e.get_non_empty("EMPTY"), None);
        assert_eq!(e.get_non_empty("JIRA_DOMAIN"), Some("example.atlassian.net"));
    }

    #[test]
    fn test_set() {
        let mut e = EnvVars::new();
        e.set("TOKEN", "abc");
        assert_eq!(e.get("TOKEN"), Some("abc"));
    }
}
