use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::file_format::FileFormat;

/// Name of the config file looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "tablesnap.json";

/// Top-level tablesnap configuration.
///
/// All directories are relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct SnapConfig {
    /// Directory holding table dumps. Default: `db`
    #[serde(default = "default_dump_dir")]
    pub dump_dir: PathBuf,
    /// Directory holding test fixtures and skeletons. Default: `test/fixtures`
    #[serde(default = "default_fixtures_dir")]
    pub fixtures_dir: PathBuf,
    /// Directory holding entity definition files. Default: `entities`
    #[serde(default = "default_entities_dir")]
    pub entities_dir: PathBuf,
    #[serde(default)]
    pub dump_format: FileFormat,
    #[serde(default)]
    pub fixture_format: FileFormat,
    /// Indent JSON dumps instead of writing them on a single line.
    #[serde(default)]
    pub pretty_dumps: bool,
}

fn default_dump_dir() -> PathBuf {
    PathBuf::from("db")
}

fn default_fixtures_dir() -> PathBuf {
    PathBuf::from("test/fixtures")
}

fn default_entities_dir() -> PathBuf {
    PathBuf::from("entities")
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            dump_dir: default_dump_dir(),
            fixtures_dir: default_fixtures_dir(),
            entities_dir: default_entities_dir(),
            dump_format: FileFormat::Json,
            fixture_format: FileFormat::Json,
            pretty_dumps: false,
        }
    }
}

impl SnapConfig {
    /// Path where table dumps are stored.
    pub fn dump_dir(&self) -> &Path {
        &self.dump_dir
    }

    /// Path where fixtures are stored.
    pub fn fixtures_dir(&self) -> &Path {
        &self.fixtures_dir
    }

    /// Path where entity definitions are stored.
    pub fn entities_dir(&self) -> &Path {
        &self.entities_dir
    }

    /// Preferred file format for dumps.
    pub fn dump_format(&self) -> FileFormat {
        self.dump_format
    }

    /// Preferred file format for fixtures and skeletons.
    pub fn fixture_format(&self) -> FileFormat {
        self.fixture_format
    }

    pub fn pretty_dumps(&self) -> bool {
        self.pretty_dumps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_config_default() {
        let config = SnapConfig::default();

        assert_eq!(config.dump_dir, PathBuf::from("db"));
        assert_eq!(config.fixtures_dir, PathBuf::from("test/fixtures"));
        assert_eq!(config.entities_dir, PathBuf::from("entities"));
        assert_eq!(config.dump_format, FileFormat::Json);
        assert_eq!(config.fixture_format, FileFormat::Json);
        assert!(!config.pretty_dumps);
    }

    #[test]
    fn test_snap_config_missing_fields_use_defaults() {
        let config: SnapConfig = serde_json::from_str(r#"{"fixtureFormat": "yml"}"#).unwrap();

        assert_eq!(config.dump_dir(), Path::new("db"));
        assert_eq!(config.fixtures_dir(), Path::new("test/fixtures"));
        assert_eq!(config.fixture_format(), FileFormat::Yml);
        assert_eq!(config.dump_format(), FileFormat::Json);
    }

    #[test]
    fn test_snap_config_serializes_camel_case() {
        let json = serde_json::to_value(SnapConfig::default()).unwrap();

        assert_eq!(json["dumpDir"], "db");
        assert_eq!(json["fixturesDir"], "test/fixtures");
        assert_eq!(json["dumpFormat"], "json");
        assert_eq!(json["prettyDumps"], false);
    }

    #[cfg(feature = "schema")]
    #[test]
    fn test_snap_config_schema_uses_camel_case() {
        let schema = serde_json::to_value(schemars::schema_for!(SnapConfig)).unwrap();
        let properties = schema["properties"].as_object().unwrap();

        assert!(properties.contains_key("dumpDir"));
        assert!(properties.contains_key("prettyDumps"));
        assert!(!properties.contains_key("dump_dir"));
    }
}
