use std::collections::BTreeMap;
use std::path::PathBuf;

use tablesnap_core::{AttributeMap, DataAccess, EntityDef, Record, Result, Selector, SnapError, Value};
use tablesnap_naming::{build_fixture_key, build_join_fixture_key};

use crate::encode::encode;
use crate::project::Project;

/// Fixture layout: synthetic key to attribute map, keys sorted at every level.
pub type FixtureDocument = BTreeMap<String, BTreeMap<String, Value>>;

impl Project {
    /// Export up to `limit` rows (all rows when `None`) as a fixture, followed
    /// by one fixture per many-to-many join table.
    ///
    /// Returns the written paths, the entity's own fixture first.
    pub fn export_fixture<D>(
        &self,
        db: &D,
        entity: &EntityDef,
        limit: Option<u64>,
    ) -> Result<Vec<PathBuf>>
    where
        D: DataAccess + ?Sized,
    {
        let records = db.find(entity, &Selector::limited(limit))?;
        let document = fixture_document(entity, &records)?;
        let content = encode(&document, self.config().fixture_format(), true, &entity.table)?;
        let path = self.write_file(self.fixture_path(&entity.table), &content)?;
        tracing::info!(
            table = %entity.table,
            rows = records.len(),
            path = %path.display(),
            "exported fixture"
        );

        let mut written = vec![path];
        written.extend(self.export_join_fixtures(db, entity)?);
        Ok(written)
    }

    /// Export the raw rows of every many-to-many join table of `entity`.
    pub fn export_join_fixtures<D>(&self, db: &D, entity: &EntityDef) -> Result<Vec<PathBuf>>
    where
        D: DataAccess + ?Sized,
    {
        entity
            .join_tables()
            .map(|join_table| {
                let rows = db.select_all(join_table)?;
                let count = rows.len();
                let document = join_fixture_document(rows);
                let content = encode(&document, self.config().fixture_format(), true, join_table)?;
                let path = self.write_file(self.fixture_path(join_table), &content)?;
                tracing::info!(table = join_table, rows = count, path = %path.display(), "exported join fixture");
                Ok(path)
            })
            .collect()
    }
}

fn sorted(attributes: AttributeMap) -> BTreeMap<String, Value> {
    attributes.into_iter().collect()
}

/// Key every record as `{singular}_{id:05}`.
pub fn fixture_document(entity: &EntityDef, records: &[Record]) -> Result<FixtureDocument> {
    let singular = entity.singular_name();
    records
        .iter()
        .map(|record| {
            let id = record
                .id
                .ok_or_else(|| SnapError::MissingIdentifier(entity.table.clone()))?;
            Ok((
                build_fixture_key(&singular, id),
                sorted(record.to_attribute_map(&entity.primary_key)),
            ))
        })
        .collect()
}

/// Key join rows as `join_{index:05}` in the order they were returned.
pub fn join_fixture_document(rows: Vec<AttributeMap>) -> FixtureDocument {
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| (build_join_fixture_key(index), sorted(row)))
        .collect()
}
