use std::collections::BTreeMap;
use std::path::PathBuf;

use tablesnap_core::{EntityDef, Result, Value};
use tablesnap_naming::build_skeleton_key;

use crate::encode::encode;
use crate::fixture::FixtureDocument;
use crate::project::Project;

/// Number of blank records a skeleton holds.
pub const SKELETON_RECORD_COUNT: usize = 2;

impl Project {
    /// Write a hand-editable fixture template for `entity`, replacing any
    /// existing fixture at the same path.
    pub fn generate_skeleton(&self, entity: &EntityDef) -> Result<PathBuf> {
        let document = skeleton_document(entity);
        let content = encode(&document, self.config().fixture_format(), true, &entity.table)?;
        let path = self.write_file(self.fixture_path(&entity.table), &content)?;
        tracing::info!(table = %entity.table, path = %path.display(), "generated fixture skeleton");
        Ok(path)
    }
}

/// `record_1`, `record_2`, ... each mapped to a fresh record's attributes.
pub fn skeleton_document(entity: &EntityDef) -> FixtureDocument {
    (1..=SKELETON_RECORD_COUNT)
        .map(|n| {
            let attributes: BTreeMap<String, Value> = entity
                .new_record()
                .to_attribute_map(&entity.primary_key)
                .into_iter()
                .collect();
            (build_skeleton_key(n), attributes)
        })
        .collect()
}
