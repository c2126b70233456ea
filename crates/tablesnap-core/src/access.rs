use crate::entity::EntityDef;
use crate::error::Result;
use crate::record::{AttributeMap, Record};
use crate::selector::Selector;

/// Contract tablesnap needs from the surrounding data-access layer.
///
/// Implementations own query execution, persistence and sequence
/// management. Errors they return are passed through to callers unmodified.
pub trait DataAccess {
    /// Resolve a selector to concrete records.
    fn find(&self, entity: &EntityDef, selector: &Selector) -> Result<Vec<Record>>;

    /// Delete every row of the entity's table, returning how many were removed.
    fn destroy_all(&mut self, entity: &EntityDef) -> Result<usize>;

    /// Persist a record. An explicit `id` is kept; `None` lets the store assign one.
    fn save(&mut self, entity: &EntityDef, record: Record) -> Result<Record>;

    /// Read every row of an arbitrary table without entity mapping.
    fn select_all(&self, table: &str) -> Result<Vec<AttributeMap>>;

    fn supports_sequence_reset(&self) -> bool {
        false
    }

    /// Realign the table's auto-increment sequence with its current rows.
    fn reset_pk_sequence(&mut self, _table: &str) -> Result<()> {
        Ok(())
    }
}
