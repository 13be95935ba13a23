//! Cleaning of manifest-derived values before they reach file names or
//! build-file content.

use regex::Regex;
use std::sync::LazyLock;

static UNSAFE_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^A-Za-z0-9_.]+").expect("unsafe character pattern is valid")
});

/// Removes every run of characters that are neither ASCII word characters nor periods.
pub fn sanitize(value: &str) -> String {
    UNSAFE_CHARS.replace_all(value, "").into_owned()
}

/// Applies [`sanitize`] to every string inside a JSON value, recursing into
/// arrays and objects. Other scalars are returned unchanged.
pub fn sanitize_value(value: &serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::String(s) => serde_json::Value::String(sanitize(s)),
        serde_json::Value::Array(items) => {
            serde_json::Value::Array(items.iter().map(sanitize_value).collect())
        }
        serde_json::Value::Object(obj) => serde_json::Value::Object(
            obj.iter().map(|(k, v)| (k.clone(), sanitize_value(v))).collect(),
        ),
        _ => value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sanitize_strips_unsafe_runs() {
        assert_eq!(sanitize("My Cool App!"), "MyCoolApp");
        assert_eq!(sanitize("v1.2 (beta)"), "v1.2beta");
        assert_eq!(sanitize("../../etc/passwd"), "....etcpasswd");
        assert_eq!(sanitize("snake_case.ok"), "snake_case.ok");
    }

    #[test]
    fn test_sanitize_drops_non_ascii_letters() {
        assert_eq!(sanitize("Démo Ünïcode 日本"), "DmoUncode");
        assert_eq!(sanitize("Straße"), "Strae");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for input in ["Demo", "a b/c\\d", "ÄÖü ß", "<script>", "", "..", "tab\tname"] {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once);
            assert!(once.chars().all(|c| c == '.' || c == '_' || c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_sanitize_value_recurses() {
        let value = json!({
            "name": "Hello World",
            "nested": {"list": ["a-b", 3, true]},
            "count": 2
        });
        assert_eq!(
            sanitize_value(&value),
            json!({
                "name": "HelloWorld",
                "nested": {"list": ["ab", 3, true]},
                "count": 2
            })
        );
    }
}
