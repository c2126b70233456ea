use std::path::{Path, PathBuf};

use tablesnap_config::FileFormat;
use tablesnap_core::{AttributeMap, DataAccess, EntityDef, Record, Result, Selector, Value};

use crate::encode::encode;
use crate::project::Project;

impl Project {
    /// Write the rows chosen by `selector` to `path` (default
    /// `{dump_dir}/{table}.{ext}`).
    ///
    /// The encoding follows the path's extension, falling back to the
    /// configured dump format.
    pub fn dump<D>(
        &self,
        db: &D,
        entity: &EntityDef,
        path: Option<&Path>,
        selector: &Selector,
    ) -> Result<PathBuf>
    where
        D: DataAccess + ?Sized,
    {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.default_dump_path(entity));
        let format = FileFormat::from_path(&path).unwrap_or(self.config().dump_format());

        let records = db.find(entity, selector)?;
        let document = dump_document(entity, &records);
        let content = encode(&document, format, self.config().pretty_dumps(), &entity.table)?;
        let written = self.write_file(&path, &content)?;

        tracing::info!(
            table = %entity.table,
            rows = records.len(),
            path = %written.display(),
            "dumped table"
        );
        Ok(written)
    }

    /// Dump every row to the default location.
    pub fn dump_all<D>(&self, db: &D, entity: &EntityDef) -> Result<PathBuf>
    where
        D: DataAccess + ?Sized,
    {
        self.dump(db, entity, None, &Selector::All)
    }
}

/// Dump layout: an array of `{ <singular>: <attributes with primary key> }`.
pub fn dump_document(entity: &EntityDef, records: &[Record]) -> Value {
    let singular = entity.singular_name();
    Value::Array(
        records
            .iter()
            .map(|record| {
                let mut element = AttributeMap::new();
                element.insert(
                    singular.clone(),
                    Value::Object(record.to_attribute_map(&entity.primary_key)),
                );
                Value::Object(element)
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tablesnap_config::SnapConfig;
    use tablesnap_core::{FindOptions, MemoryStore, Order, SnapError};
    use tempfile::{TempDir, tempdir};

    fn widgets() -> EntityDef {
        EntityDef::new("widgets").attribute("name")
    }

    fn store() -> MemoryStore {
        let mut db = MemoryStore::new();
        db.save(&widgets(), Record::new().with_id(1).with("name", "a"))
            .unwrap();
        db.save(&widgets(), Record::new().with_id(3).with("name", "b"))
            .unwrap();
        db
    }

    fn project_with_dirs(config: SnapConfig) -> (TempDir, Project) {
        let tmp = tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("db")).unwrap();
        let project = Project::new(tmp.path(), config);
        (tmp, project)
    }

    #[test]
    fn dump_all_writes_default_path() {
        let (tmp, project) = project_with_dirs(SnapConfig::default());
        let path = project.dump_all(&store(), &widgets()).unwrap();

        assert_eq!(path, tmp.path().join("db/widgets.json"));
        insta::assert_snapshot!(
            fs::read_to_string(&path).unwrap().trim_end(),
            @r#"[{"widget":{"id":1,"name":"a"}},{"widget":{"id":3,"name":"b"}}]"#
        );
    }

    #[test]
    fn dump_by_ids_keeps_requested_rows() {
        let (tmp, project) = project_with_dirs(SnapConfig::default());
        project
            .dump(&store(), &widgets(), None, &Selector::ById(vec![3]))
            .unwrap();

        assert_eq!(
            fs::read_to_string(tmp.path().join("db/widgets.json")).unwrap(),
            "[{\"widget\":{\"id\":3,\"name\":\"b\"}}]\n"
        );
    }

    #[test]
    fn dump_by_filter_to_explicit_yaml_path() {
        let (tmp, project) = project_with_dirs(SnapConfig::default());
        let options = FindOptions::new().order_by("id", Order::Desc).limit(1);
        let path = project
            .dump(
                &store(),
                &widgets(),
                Some(Path::new("db/latest.yml")),
                &options.into(),
            )
            .unwrap();

        assert_eq!(path, tmp.path().join("db/latest.yml"));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "- widget:\n    id: 3\n    name: b\n"
        );
    }

    #[test]
    fn dump_pretty_when_configured() {
        let config = SnapConfig {
            pretty_dumps: true,
            ..Default::default()
        };
        let (tmp, project) = project_with_dirs(config);
        project
            .dump(&store(), &widgets(), None, &Selector::ById(vec![1]))
            .unwrap();

        let content = fs::read_to_string(tmp.path().join("db/widgets.json")).unwrap();
        assert!(content.starts_with("[\n  {\n    \"widget\": {"));
    }

    #[test]
    fn dump_of_empty_table_is_empty_array() {
        let (tmp, project) = project_with_dirs(SnapConfig::default());
        project.dump_all(&MemoryStore::new(), &widgets()).unwrap();

        assert_eq!(
            fs::read_to_string(tmp.path().join("db/widgets.json")).unwrap(),
            "[]\n"
        );
    }

    #[test]
    fn query_error_propagates_without_writing() {
        let (tmp, project) = project_with_dirs(SnapConfig::default());
        let err = project
            .dump(&store(), &widgets(), None, &Selector::ById(vec![2]))
            .unwrap_err();

        assert!(matches!(err, SnapError::Query { .. }));
        assert!(!tmp.path().join("db/widgets.json").exists());
    }

    #[test]
    fn missing_dump_dir_is_filesystem_error() {
        let tmp = tempdir().unwrap();
        let project = Project::new(tmp.path(), SnapConfig::default());
        let err = project.dump_all(&store(), &widgets()).unwrap_err();
        assert!(matches!(err, SnapError::Filesystem { .. }));
    }
}
