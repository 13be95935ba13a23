//! Translation of manifest fields into their Android equivalents.

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;
use url::Url;

/// Pure mapping from manifest values to Android project values.
pub trait ManifestTranslator: Send + Sync {
    /// Integer `android:versionCode` for a manifest version string.
    fn version_code(&self, version: Option<&str>) -> u32;

    /// Android permission names required by the manifest's permissions.
    fn permissions(&self, permissions: &IndexMap<String, Value>) -> Vec<String>;

    /// Density bucket (`mdpi`, `hdpi`, ...) an icon of the given size belongs to.
    fn icon_bucket(&self, size_key: &str) -> String;

    /// Reverse-domain Java package name for an application.
    fn package_name(&self, manifest_url: &Url) -> String;
}

/// Default translation rules.
#[derive(Debug, Default, Clone, Copy)]
pub struct Androidifier;

const INTERNET: &str = "android.permission.INTERNET";

fn android_permissions(name: &str) -> &'static [&'static str] {
    if name.starts_with("device-storage:") {
        return &["android.permission.WRITE_EXTERNAL_STORAGE"];
    }
    match name {
        "geolocation" => &[
            "android.permission.ACCESS_FINE_LOCATION",
            "android.permission.ACCESS_COARSE_LOCATION",
        ],
        "camera" | "video-capture" => &["android.permission.CAMERA"],
        "audio-capture" => &["android.permission.RECORD_AUDIO"],
        "contacts" => &["android.permission.READ_CONTACTS", "android.permission.WRITE_CONTACTS"],
        "alarms" => &["android.permission.WAKE_LOCK"],
        "desktop-notification" => &["android.permission.VIBRATE"],
        _ => &[],
    }
}

/// Lowercases a package segment and replaces everything Java rejects.
fn package_segment(segment: &str) -> String {
    let cleaned: String = segment
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if cleaned.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{cleaned}")
    } else {
        cleaned
    }
}

impl ManifestTranslator for Androidifier {
    fn version_code(&self, version: Option<&str>) -> u32 {
        const WEIGHTS: [u32; 4] = [1_000_000, 10_000, 100, 1];
        let Some(version) = version else {
            return 0;
        };
        version
            .split('.')
            .take(WEIGHTS.len())
            .zip(WEIGHTS)
            .map(|(part, weight)| {
                let digits: String = part.chars().take_while(char::is_ascii_digit).collect();
                if digits.is_empty() {
                    return 0;
                }
                digits.parse::<u32>().unwrap_or(u32::MAX).min(99) * weight
            })
            .sum()
    }

    fn permissions(&self, permissions: &IndexMap<String, Value>) -> Vec<String> {
        let mut result = IndexSet::new();
        result.insert(INTERNET.to_string());
        for name in permissions.keys() {
            for permission in android_permissions(name) {
                result.insert((*permission).to_string());
            }
        }
        result.into_iter().collect()
    }

    fn icon_bucket(&self, size_key: &str) -> String {
        let bucket = match size_key.trim().parse::<u32>() {
            Ok(size) if size <= 36 => "ldpi",
            Ok(size) if size <= 48 => "mdpi",
            Ok(size) if size <= 72 => "hdpi",
            Ok(size) if size <= 96 => "xhdpi",
            Ok(size) if size <= 144 => "xxhdpi",
            Ok(_) => "xxxhdpi",
            Err(_) => "mdpi",
        };
        bucket.to_string()
    }

    fn package_name(&self, manifest_url: &Url) -> String {
        let mut segments: Vec<String> = manifest_url
            .host_str()
            .unwrap_or_default()
            .split('.')
            .rev()
            .filter(|label| !label.is_empty())
            .map(package_segment)
            .collect();

        if let Some(path) = manifest_url.path_segments() {
            let dirs: Vec<&str> = path.collect();
            // The last segment is the manifest file itself.
            if let Some((_, parents)) = dirs.split_last() {
                segments.extend(parents.iter().filter(|s| !s.is_empty()).map(|s| package_segment(s)));
            }
        }

        segments.join(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_package_name_from_host() {
        let a = Androidifier;
        assert_eq!(a.package_name(&url("https://demo.example.com/manifest.json")), "com.example.demo");
        assert_eq!(
            a.package_name(&url("https://apps.example.org/my-app/v2/manifest.webapp")),
            "org.example.apps.my_app.v2"
        );
        assert_eq!(a.package_name(&url("http://123.example.net/m.json")), "net.example._123");
    }

    #[test]
    fn test_version_code_monotonic() {
        let a = Androidifier;
        assert_eq!(a.version_code(None), 0);
        assert_eq!(a.version_code(Some("1.0")), 1_000_000);
        assert_eq!(a.version_code(Some("1.2.3")), 1_020_300);
        assert_eq!(a.version_code(Some("2.0b1")), 2_000_000);
        assert!(a.version_code(Some("1.10")) > a.version_code(Some("1.9")));
        assert!(a.version_code(Some("2")) > a.version_code(Some("1.99.99.99")));
    }

    #[test]
    fn test_permissions_always_include_internet() {
        let a = Androidifier;
        let none = IndexMap::new();
        assert_eq!(a.permissions(&none), vec![INTERNET.to_string()]);

        let mut perms = IndexMap::new();
        perms.insert("camera".to_string(), json!({"description": "photos"}));
        perms.insert("video-capture".to_string(), json!({}));
        perms.insert("device-storage:pictures".to_string(), json!({"access": "readwrite"}));
        perms.insert("unknown-thing".to_string(), json!({}));
        assert_eq!(
            a.permissions(&perms),
            vec![
                INTERNET.to_string(),
                "android.permission.CAMERA".to_string(),
                "android.permission.WRITE_EXTERNAL_STORAGE".to_string(),
            ]
        );
    }

    #[test]
    fn test_icon_buckets() {
        let a = Androidifier;
        assert_eq!(a.icon_bucket("16"), "ldpi");
        assert_eq!(a.icon_bucket("48"), "mdpi");
        assert_eq!(a.icon_bucket("60"), "hdpi");
        assert_eq!(a.icon_bucket("90"), "xhdpi");
        assert_eq!(a.icon_bucket("128"), "xxhdpi");
        assert_eq!(a.icon_bucket("512"), "xxxhdpi");
        assert_eq!(a.icon_bucket("large"), "mdpi");
    }
}
