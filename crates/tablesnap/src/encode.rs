use std::path::Path;

use serde::Serialize;
use tablesnap_config::FileFormat;
use tablesnap_core::{Result, SnapError, Value};

pub(crate) fn encode<T: Serialize>(
    value: &T,
    format: FileFormat,
    pretty: bool,
    what: &str,
) -> Result<String> {
    let encoded = match format {
        FileFormat::Json if pretty => serde_json::to_string_pretty(value).map_err(|e| e.to_string()),
        FileFormat::Json => serde_json::to_string(value).map_err(|e| e.to_string()),
        FileFormat::Yaml | FileFormat::Yml => serde_yaml::to_string(value)
            .map(|s| s.trim_end().to_string())
            .map_err(|e| e.to_string()),
    };
    encoded.map_err(|message| SnapError::Encode {
        what: what.to_string(),
        message,
    })
}

pub(crate) fn decode(content: &str, format: FileFormat, path: &Path) -> Result<Value> {
    if format.is_yaml() {
        serde_yaml::from_str(content).map_err(|e| SnapError::parse(path, e))
    } else {
        serde_json::from_str(content).map_err(|e| SnapError::parse(path, e))
    }
}
