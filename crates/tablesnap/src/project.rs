use std::path::{Path, PathBuf};

use tablesnap_config::SnapConfig;
use tablesnap_core::EntityDef;
use tablesnap_naming::build_table_file_name;

/// A project root plus the config that lays out files beneath it.
///
/// Every path an operation writes or reads is resolved against `root`.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    config: SnapConfig,
}

impl Project {
    pub fn new(root: impl Into<PathBuf>, config: SnapConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Open a project, reading `tablesnap.json` from its root when present.
    pub fn open(root: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let root = root.into();
        let config = tablesnap_loader::load_config_or_default(&root)?;
        Ok(Self { root, config })
    }

    /// Entity definitions stored under the configured entities directory.
    pub fn entities(&self) -> anyhow::Result<Vec<EntityDef>> {
        tablesnap_loader::load_entities(&self.root, &self.config)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    /// Default dump location for an entity, relative to the root.
    /// Format: {dump_dir}/{table}.{ext}
    pub fn default_dump_path(&self, entity: &EntityDef) -> PathBuf {
        self.config.dump_dir().join(build_table_file_name(
            &entity.table,
            self.config.dump_format().extension(),
        ))
    }

    /// Fixture location for a table, relative to the root.
    /// Format: {fixtures_dir}/{table}.{ext}
    pub fn fixture_path(&self, table: &str) -> PathBuf {
        self.config.fixtures_dir().join(build_table_file_name(
            table,
            self.config.fixture_format().extension(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tablesnap_config::FileFormat;
    use tempfile::tempdir;

    #[test]
    fn default_paths() {
        let project = Project::new("/app", SnapConfig::default());
        let widgets = EntityDef::new("widgets");

        assert_eq!(
            project.default_dump_path(&widgets),
            PathBuf::from("db/widgets.json")
        );
        assert_eq!(
            project.fixture_path("tags_widgets"),
            PathBuf::from("test/fixtures/tags_widgets.json")
        );
    }

    #[test]
    fn paths_follow_configured_formats() {
        let config = SnapConfig {
            dump_format: FileFormat::Yaml,
            fixture_format: FileFormat::Yml,
            ..Default::default()
        };
        let project = Project::new("/app", config);

        assert_eq!(
            project.default_dump_path(&EntityDef::new("widgets")),
            PathBuf::from("db/widgets.yaml")
        );
        assert_eq!(
            project.fixture_path("widgets"),
            PathBuf::from("test/fixtures/widgets.yml")
        );
    }

    #[test]
    fn open_reads_config_file() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("tablesnap.json"), r#"{"dumpDir": "backup"}"#).unwrap();

        let project = Project::open(tmp.path()).unwrap();
        assert_eq!(project.root(), tmp.path());
        assert_eq!(project.config().dump_dir(), Path::new("backup"));
    }

    #[test]
    fn entities_load_from_configured_dir() {
        let tmp = tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("entities")).unwrap();
        fs::write(
            tmp.path().join("entities/widgets.json"),
            r#"{"table": "widgets", "attributes": [{"name": "name"}]}"#,
        )
        .unwrap();

        let project = Project::open(tmp.path()).unwrap();
        let entities = project.entities().unwrap();
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].singular_name(), "widget");
    }
}
