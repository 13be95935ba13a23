//! Common constants used throughout apk-factory.

/// Supported configuration file names
pub const CONFIG_FILES: [&str; 3] = ["apk-factory.json", "apk-factory.yml", "apk-factory.yaml"];

/// Templates rendered from the vendor project template.
pub const ANDROID_MANIFEST_TEMPLATE: &str = "AndroidManifest.xml";
pub const STRINGS_TEMPLATE: &str = "res/values/strings.xml";
pub const BUILD_FILE_TEMPLATE: &str = "build.xml";
pub const PROJECT_PROPERTIES_TEMPLATE: &str = "project.properties";

/// Template provided by the internal utility templates.
pub const KEYGEN_TEMPLATE: &str = "keygen.sh";

/// Where the verbatim manifest is stored inside the project.
pub const RAW_MANIFEST_PATH: &str = "res/raw/manifest.json";

/// Source directory the build tool requires but templates cannot ship empty.
pub const SOURCE_DIR: &str = "src";

/// Build output directory, relative to the project root.
pub const OUTPUT_DIR: &str = "bin";

pub const ICON_FILE_NAME: &str = "ic_launcher.png";

/// Subject placeholders for generated signing keys.
pub const UNKNOWN_SUBJECT: &str = "Unknown";
pub const UNKNOWN_COUNTRY: &str = "XX";

pub const DEFAULT_STORE_PASSWORD: &str = "mozilla";
pub const DEFAULT_ALIAS: &str = "alias";
pub const DEFAULT_ALIAS_PASSWORD: &str = "alias_password";

pub const DEFAULT_TEMPLATE_DIR: &str = "demos/apk-template";
pub const DEFAULT_UTIL_TEMPLATE_DIR: &str = "util-templates";
pub const DEFAULT_KEY_DIR: &str = "keys";
pub const DEFAULT_PACKAGE_EXTENSION: &str = "apk";
pub const DEFAULT_BUILD_COMMAND: [&str; 2] = ["ant", "release"];
