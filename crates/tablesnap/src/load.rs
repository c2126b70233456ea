use std::path::Path;

use tablesnap_config::FileFormat;
use tablesnap_core::{AttributeMap, DataAccess, EntityDef, Record, Result, SnapError, Value};

use crate::encode::decode;
use crate::project::Project;

impl Project {
    /// Replace every row of `entity` with the records stored at `path`
    /// (default `{dump_dir}/{table}.{ext}`). Returns the number of records saved.
    ///
    /// Existing rows are destroyed before the file is read, and nothing runs in
    /// a transaction: a parse or save failure leaves the table holding only the
    /// records saved so far.
    pub fn load<D>(&self, db: &mut D, entity: &EntityDef, path: Option<&Path>) -> Result<usize>
    where
        D: DataAccess + ?Sized,
    {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.default_dump_path(entity));

        let destroyed = db.destroy_all(entity)?;
        tracing::debug!(table = %entity.table, destroyed, "cleared table before load");
        reset_sequence(db, entity)?;

        let records = self.read_dump(entity, &path)?;
        let total = records.len();
        for record in records {
            db.save(entity, record)?;
        }

        reset_sequence(db, entity)?;
        tracing::info!(table = %entity.table, rows = total, path = %path.display(), "loaded table");
        Ok(total)
    }

    /// Read and parse a dump file without touching the database.
    pub fn read_dump(&self, entity: &EntityDef, path: &Path) -> Result<Vec<Record>> {
        let format = FileFormat::from_path(path).unwrap_or(self.config().dump_format());
        let (resolved, content) = self.read_file(path)?;
        let document = decode(&content, format, &resolved)?;
        parse_dump(entity, document, &resolved)
    }
}

fn reset_sequence<D>(db: &mut D, entity: &EntityDef) -> Result<()>
where
    D: DataAccess + ?Sized,
{
    if db.supports_sequence_reset() {
        db.reset_pk_sequence(&entity.table)
    } else {
        tracing::warn!(table = %entity.table, "sequence reset unsupported, skipping");
        Ok(())
    }
}

/// Turn a decoded dump document into records ready to save.
///
/// Identifiers come from the file; discriminator values must name the base
/// type or a registered subtype.
pub fn parse_dump(entity: &EntityDef, document: Value, path: &Path) -> Result<Vec<Record>> {
    let Value::Array(elements) = document else {
        return Err(SnapError::parse(path, "expected an array of records"));
    };

    let singular = entity.singular_name();
    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            let attributes = match element {
                Value::Object(mut wrapper) => match wrapper.remove(&singular) {
                    Some(Value::Object(attributes)) => attributes,
                    _ => {
                        return Err(SnapError::parse(
                            path,
                            format!("record {index}: missing '{singular}' object"),
                        ));
                    }
                },
                _ => {
                    return Err(SnapError::parse(
                        path,
                        format!("record {index}: expected an object"),
                    ));
                }
            };
            record_from_attributes(entity, attributes, path, index)
        })
        .collect()
}

fn record_from_attributes(
    entity: &EntityDef,
    mut attributes: AttributeMap,
    path: &Path,
    index: usize,
) -> Result<Record> {
    let id = match attributes.remove(&entity.primary_key) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value.as_i64().ok_or_else(|| {
            SnapError::parse(
                path,
                format!(
                    "record {index}: {} must be an integer, got {value}",
                    entity.primary_key
                ),
            )
        })?),
    };

    let mut record = Record {
        id,
        subtype: None,
        attributes,
    };

    if let Some(column) = entity.inheritance_column() {
        match record.attributes.get(column).cloned() {
            None | Some(Value::Null) => {}
            Some(Value::String(subtype)) => {
                entity.resolve_subtype(&subtype)?;
                record.set_subtype(column, subtype);
            }
            Some(other) => {
                return Err(SnapError::parse(
                    path,
                    format!("record {index}: {column} must be a string, got {other}"),
                ));
            }
        }
    }

    Ok(record)
}
