//! In-memory [`DataAccess`] implementation.
//!
//! Behaves like a relational table with an auto-increment primary key:
//! explicit identifiers never advance the sequence, deletes never rewind it,
//! and only [`DataAccess::reset_pk_sequence`] realigns it to `max(id) + 1`.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::access::DataAccess;
use crate::entity::EntityDef;
use crate::error::{Result, SnapError};
use crate::record::{AttributeMap, Record, Value};
use crate::selector::{FindOptions, Order, Selector};

#[derive(Debug)]
struct MemoryTable {
    rows: BTreeMap<i64, Record>,
    next_id: i64,
}

impl Default for MemoryTable {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

#[derive(Debug)]
pub struct MemoryStore {
    tables: BTreeMap<String, MemoryTable>,
    join_tables: BTreeMap<String, Vec<AttributeMap>>,
    sequence_reset: bool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: BTreeMap::new(),
            join_tables: BTreeMap::new(),
            sequence_reset: true,
        }
    }

    /// A store that reports no sequence-reset capability.
    pub fn without_sequence_reset() -> Self {
        Self {
            sequence_reset: false,
            ..Self::new()
        }
    }

    /// Create an empty join table so it can be selected from.
    pub fn create_join_table(&mut self, table: impl Into<String>) {
        self.join_tables.entry(table.into()).or_default();
    }

    /// Append a raw row to a join table, creating the table if needed.
    pub fn insert_join_row(&mut self, table: impl Into<String>, row: AttributeMap) {
        self.join_tables.entry(table.into()).or_default().push(row);
    }

    /// Persisted rows of a table in identifier order.
    pub fn rows(&self, table: &str) -> Vec<&Record> {
        self.tables
            .get(table)
            .map(|t| t.rows.values().collect())
            .unwrap_or_default()
    }

    pub fn row(&self, table: &str, id: i64) -> Option<&Record> {
        self.tables.get(table).and_then(|t| t.rows.get(&id))
    }

    /// Identifier the next insert without an explicit id will receive.
    pub fn next_id(&self, table: &str) -> i64 {
        self.tables.get(table).map(|t| t.next_id).unwrap_or(1)
    }

    fn filter(&self, entity: &EntityDef, options: &FindOptions) -> Result<Vec<Record>> {
        let known_column =
            |column: &str| column == entity.primary_key || entity.has_attribute(column);

        for condition in &options.conditions {
            if !known_column(&condition.column) {
                return Err(SnapError::query(
                    &entity.table,
                    format!("unknown column '{}'", condition.column),
                ));
            }
        }
        if let Some(order_by) = &options.order_by
            && !known_column(&order_by.column)
        {
            return Err(SnapError::query(
                &entity.table,
                format!("unknown column '{}' in order clause", order_by.column),
            ));
        }

        let mut rows: Vec<AttributeMap> = self
            .rows(&entity.table)
            .into_iter()
            .map(|r| r.to_attribute_map(&entity.primary_key))
            .filter(|row| {
                options
                    .conditions
                    .iter()
                    .all(|c| row.get(&c.column).unwrap_or(&Value::Null) == &c.value)
            })
            .collect();

        if let Some(order_by) = &options.order_by {
            rows.sort_by(|a, b| {
                let ordering = compare_values(
                    a.get(&order_by.column).unwrap_or(&Value::Null),
                    b.get(&order_by.column).unwrap_or(&Value::Null),
                );
                match order_by.order {
                    Order::Asc => ordering,
                    Order::Desc => ordering.reverse(),
                }
            });
        }

        let offset = options.offset.unwrap_or(0) as usize;
        let limit = options.limit.map(|l| l as usize).unwrap_or(usize::MAX);

        Ok(rows
            .into_iter()
            .skip(offset)
            .take(limit)
            .filter_map(|row| {
                row.get(&entity.primary_key)
                    .and_then(Value::as_i64)
                    .and_then(|id| self.row(&entity.table, id).cloned())
            })
            .collect())
    }

    fn check_attributes(&self, entity: &EntityDef, record: &mut Record) -> Result<()> {
        if let Some(unknown) = record
            .attributes
            .keys()
            .find(|name| !entity.has_attribute(name))
        {
            return Err(SnapError::validation(
                &entity.table,
                format!("unknown attribute '{}'", unknown),
            ));
        }

        for attribute in &entity.attributes {
            let value = record
                .attributes
                .entry(attribute.name.clone())
                .or_insert_with(|| attribute.default.clone().unwrap_or(Value::Null));
            if !attribute.nullable && value.is_null() {
                return Err(SnapError::validation(
                    &entity.table,
                    format!("{} can't be null", attribute.name),
                ));
            }
        }

        if let (Some(column), Some(subtype)) = (entity.inheritance_column(), &record.subtype) {
            record
                .attributes
                .insert(column.to_string(), Value::String(subtype.clone()));
        }

        Ok(())
    }
}

/// Total order over JSON values: null < bool < number < string < others.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    fn rank(v: &Value) -> u8 {
        match v {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) | Value::Object(_) => 4,
        }
    }

    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

impl DataAccess for MemoryStore {
    fn find(&self, entity: &EntityDef, selector: &Selector) -> Result<Vec<Record>> {
        match selector {
            Selector::All => Ok(self.rows(&entity.table).into_iter().cloned().collect()),
            Selector::ById(ids) => ids
                .iter()
                .map(|id| {
                    self.row(&entity.table, *id).cloned().ok_or_else(|| {
                        SnapError::query(
                            &entity.table,
                            format!("couldn't find {} with {}={}", entity.type_name(), entity.primary_key, id),
                        )
                    })
                })
                .collect(),
            Selector::ByFilter(options) => self.filter(entity, options),
        }
    }

    fn destroy_all(&mut self, entity: &EntityDef) -> Result<usize> {
        Ok(self
            .tables
            .get_mut(&entity.table)
            .map(|t| std::mem::take(&mut t.rows).len())
            .unwrap_or(0))
    }

    fn save(&mut self, entity: &EntityDef, mut record: Record) -> Result<Record> {
        self.check_attributes(entity, &mut record)?;

        let table = self.tables.entry(entity.table.clone()).or_default();
        let id = match record.id {
            Some(id) => id,
            None => {
                let id = table.next_id;
                table.next_id += 1;
                id
            }
        };
        if table.rows.contains_key(&id) {
            return Err(SnapError::validation(
                &entity.table,
                format!("duplicate key value {}={}", entity.primary_key, id),
            ));
        }

        record.id = Some(id);
        table.rows.insert(id, record.clone());
        Ok(record)
    }

    fn select_all(&self, table: &str) -> Result<Vec<AttributeMap>> {
        self.join_tables
            .get(table)
            .cloned()
            .ok_or_else(|| SnapError::query(table, format!("relation \"{}\" does not exist", table)))
    }

    fn supports_sequence_reset(&self) -> bool {
        self.sequence_reset
    }

    fn reset_pk_sequence(&mut self, table: &str) -> Result<()> {
        let table = self.tables.entry(table.to_string()).or_default();
        table.next_id = table.rows.keys().next_back().map(|max| max + 1).unwrap_or(1);
        Ok(())
    }
}
