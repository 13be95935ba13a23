//! Conversion of manifest locale keys into Android resource qualifiers.

use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

static LOCALE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_]{2,})(?:-([A-Za-z0-9_]+))?$")
        .expect("locale pattern is valid")
});

/// Which string resources are written for the manifest's locales.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocaleStrings {
    /// Only the default locale's strings, written to `res/values/`.
    /// Matches what deployed factories have always produced.
    #[default]
    DefaultOnly,
    /// Additionally one `res/values-<qualifier>/` file per locale whose key
    /// normalizes.
    PerLocale,
}

/// Normalizes a `language[-region]` locale key into a resource qualifier.
///
/// `en` stays `en`, `pt-br` becomes `pt-rBR`. Keys that do not match the
/// pattern, or whose language subtag is longer than two characters, have no
/// qualifier.
pub fn normalize_locale(key: &str) -> Option<String> {
    let captures = LOCALE_TAG.captures(key)?;
    let language = captures.get(1)?.as_str();
    if language.len() > 2 {
        return None;
    }
    match captures.get(2) {
        Some(region) => Some(format!("{}-r{}", language, region.as_str().to_uppercase())),
        None => Some(language.to_string()),
    }
}

/// Resource path of the strings file for a normalized qualifier.
pub fn localized_strings_path(qualifier: &str) -> String {
    format!("res/values-{qualifier}/strings.xml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_only() {
        assert_eq!(normalize_locale("en").as_deref(), Some("en"));
        assert_eq!(normalize_locale("fr").as_deref(), Some("fr"));
    }

    #[test]
    fn test_language_and_region() {
        assert_eq!(normalize_locale("pt-br").as_deref(), Some("pt-rBR"));
        assert_eq!(normalize_locale("en-US").as_deref(), Some("en-rUS"));
        assert_eq!(normalize_locale("zh-tw").as_deref(), Some("zh-rTW"));
    }

    #[test]
    fn test_long_language_rejected() {
        assert_eq!(normalize_locale("ast"), None);
        assert_eq!(normalize_locale("fil-PH"), None);
    }

    #[test]
    fn test_unmatched_keys() {
        assert_eq!(normalize_locale(""), None);
        assert_eq!(normalize_locale("e"), None);
        assert_eq!(normalize_locale("zh-Hant-TW"), None);
        assert_eq!(normalize_locale("en_"), None);
        assert_eq!(normalize_locale("en-"), None);
        assert_eq!(normalize_locale("ñe"), None);
        assert_eq!(normalize_locale("es-ñ"), None);
    }

    #[test]
    fn test_localized_strings_path() {
        assert_eq!(localized_strings_path("pt-rBR"), "res/values-pt-rBR/strings.xml");
    }
}
