use std::path::Path;

use serde::{Deserialize, Serialize};

/// Supported encodings for dump and fixture files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Json,
    Yaml,
    Yml,
}

impl Default for FileFormat {
    fn default() -> Self {
        FileFormat::Json
    }
}

impl FileFormat {
    /// File extension written for this format.
    pub fn extension(self) -> &'static str {
        match self {
            FileFormat::Json => "json",
            FileFormat::Yaml => "yaml",
            FileFormat::Yml => "yml",
        }
    }

    /// Returns true for either YAML spelling.
    pub fn is_yaml(self) -> bool {
        matches!(self, FileFormat::Yaml | FileFormat::Yml)
    }

    /// Detect the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("json") => Some(FileFormat::Json),
            Some("yaml") => Some(FileFormat::Yaml),
            Some("yml") => Some(FileFormat::Yml),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FileFormat;
    use std::path::Path;

    #[test]
    fn default_is_json() {
        assert_eq!(FileFormat::default(), FileFormat::Json);
    }

    #[test]
    fn extension_matches_variant() {
        assert_eq!(FileFormat::Json.extension(), "json");
        assert_eq!(FileFormat::Yaml.extension(), "yaml");
        assert_eq!(FileFormat::Yml.extension(), "yml");
    }

    #[test]
    fn detects_format_from_path() {
        assert_eq!(
            FileFormat::from_path(Path::new("db/widgets.json")),
            Some(FileFormat::Json)
        );
        assert_eq!(
            FileFormat::from_path(Path::new("db/widgets.yml")),
            Some(FileFormat::Yml)
        );
        assert_eq!(
            FileFormat::from_path(Path::new("db/widgets.yaml")),
            Some(FileFormat::Yaml)
        );
        assert_eq!(FileFormat::from_path(Path::new("db/widgets.txt")), None);
        assert_eq!(FileFormat::from_path(Path::new("db/widgets")), None);
    }

    #[test]
    fn yaml_spellings() {
        assert!(FileFormat::Yaml.is_yaml());
        assert!(FileFormat::Yml.is_yaml());
        assert!(!FileFormat::Json.is_yaml());
    }
}
