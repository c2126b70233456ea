use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tablesnap_config::{FileFormat, SnapConfig};
use tablesnap_core::EntityDef;

/// Load all entity definitions from the project's entities directory (recursively).
pub fn load_entities(project_root: &Path, config: &SnapConfig) -> Result<Vec<EntityDef>> {
    load_entities_from_dir(&project_root.join(config.entities_dir()))
}

/// Load entity definitions from a directory, sorted by file path.
///
/// A missing directory yields no entities.
pub fn load_entities_from_dir(dir: &Path) -> Result<Vec<EntityDef>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut entities = Vec::new();
    load_entities_recursive(dir, &mut entities)?;

    let mut tables = HashSet::new();
    for entity in &entities {
        entity
            .validate()
            .with_context(|| format!("invalid entity definition for '{}'", entity.table))?;
        if !tables.insert(entity.table.as_str()) {
            anyhow::bail!("duplicate entity definition for table '{}'", entity.table);
        }
    }

    tracing::debug!(dir = %dir.display(), count = entities.len(), "loaded entity definitions");
    Ok(entities)
}

fn load_entities_recursive(dir: &Path, entities: &mut Vec<EntityDef>) -> Result<()> {
    let mut paths = fs::read_dir(dir)
        .with_context(|| format!("read entities directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .context("read directory entry")?;
    paths.sort();

    for path in paths {
        if path.is_dir() {
            load_entities_recursive(&path, entities)?;
            continue;
        }

        let Some(format) = FileFormat::from_path(&path) else {
            continue;
        };
        let content = fs::read_to_string(&path)
            .with_context(|| format!("read entity file: {}", path.display()))?;

        let entity: EntityDef = if format.is_yaml() {
            serde_yaml::from_str(&content)
                .with_context(|| format!("parse YAML entity: {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("parse JSON entity: {}", path.display()))?
        };

        entities.push(entity);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::tempdir;

    const WIDGETS_JSON: &str = r#"{
        "table": "widgets",
        "attributes": [{"name": "name"}, {"name": "type"}],
        "inheritance": {"column": "type", "subtypes": ["SpecialWidget"]},
        "associations": [
            {"name": "tags", "kind": "has_and_belongs_to_many", "join_table": "tags_widgets"}
        ]
    }"#;

    const TAGS_YAML: &str = "table: tags\nattributes:\n  - name: label\n    nullable: false\n";

    #[test]
    fn missing_directory_yields_nothing() {
        let tmp = tempdir().unwrap();
        let entities = load_entities(tmp.path(), &SnapConfig::default()).unwrap();
        assert!(entities.is_empty());
    }

    #[test]
    fn reads_json_and_yaml_recursively() {
        let tmp = tempdir().unwrap();
        let dir = tmp.path().join("entities");
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("widgets.json"), WIDGETS_JSON).unwrap();
        fs::write(dir.join("nested/tags.yml"), TAGS_YAML).unwrap();
        fs::write(dir.join("README.md"), "ignored").unwrap();

        let entities = load_entities(tmp.path(), &SnapConfig::default()).unwrap();
        let tables: Vec<&str> = entities.iter().map(|e| e.table.as_str()).collect();
        assert_eq!(tables, vec!["tags", "widgets"]);

        let widgets = &entities[1];
        assert_eq!(widgets.inheritance_column(), Some("type"));
        assert_eq!(widgets.join_tables().collect::<Vec<_>>(), vec!["tags_widgets"]);
        assert!(!entities[0].attributes[0].nullable);
    }

    #[test]
    fn honours_configured_directory() {
        let tmp = tempdir().unwrap();
        let dir = tmp.path().join("schema/entities");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("tags.yaml"), TAGS_YAML).unwrap();

        let config = SnapConfig {
            entities_dir: "schema/entities".into(),
            ..Default::default()
        };
        let entities = load_entities(tmp.path(), &config).unwrap();
        assert_eq!(entities.len(), 1);
    }

    #[test]
    fn rejects_duplicate_tables() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("a.json"), WIDGETS_JSON).unwrap();
        fs::write(tmp.path().join("b.json"), WIDGETS_JSON).unwrap();

        let err = load_entities_from_dir(tmp.path()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "duplicate entity definition for table 'widgets'"
        );
    }

    #[rstest]
    #[case::duplicate_attribute(r#"{"table": "widgets", "attributes": [{"name": "a"}, {"name": "a"}]}"#)]
    #[case::undeclared_inheritance_column(r#"{"table": "widgets", "inheritance": {"column": "kind"}}"#)]
    #[case::join_table_missing(r#"{"table": "widgets", "associations": [{"name": "tags", "kind": "has_and_belongs_to_many"}]}"#)]
    fn rejects_invalid_definitions(#[case] json: &str) {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("widgets.json"), json).unwrap();

        let err = load_entities_from_dir(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("invalid entity definition for 'widgets'"));
    }

    #[test]
    fn parse_error_names_file() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("broken.yaml"), "table: [").unwrap();

        let err = load_entities_from_dir(tmp.path()).unwrap_err();
        assert!(err.to_string().starts_with("parse YAML entity: "));
        assert!(err.to_string().contains("broken.yaml"));
    }
}
