use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tablesnap_naming::{singularize, to_pascal_case};
use thiserror::Error;

use crate::error::SnapError;
use crate::record::{Record, Value};

fn default_primary_key() -> String {
    "id".to_string()
}

fn default_inheritance_column() -> String {
    "type".to_string()
}

fn default_nullable() -> bool {
    true
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntityValidationError {
    #[error("entity has an empty table name")]
    EmptyTableName,
    #[error("table '{0}' declares an attribute with an empty name")]
    EmptyAttributeName(String),
    #[error("table '{0}' declares attribute '{1}' more than once")]
    DuplicateAttribute(String, String),
    #[error("table '{0}' declares its primary key '{1}' as a regular attribute")]
    PrimaryKeyAsAttribute(String, String),
    #[error("table '{0}' uses inheritance column '{1}' which is not a declared attribute")]
    InheritanceColumnNotAttribute(String, String),
    #[error("association '{0}.{1}' is many-to-many but names no join table")]
    MissingJoinTable(String, String),
}

/// One column of an entity, excluding the primary key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub struct AttributeDef {
    pub name: String,
    /// Value a freshly constructed record starts with. `None` means null.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
}

impl AttributeDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
            nullable: true,
        }
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }
}

/// Single-table-inheritance settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub struct Inheritance {
    #[serde(default = "default_inheritance_column")]
    pub column: String,
    /// Type names that may appear in the discriminator column besides the base type.
    #[serde(default)]
    pub subtypes: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum AssociationKind {
    BelongsTo,
    HasOne,
    HasMany,
    HasAndBelongsToMany,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub struct AssociationDef {
    pub name: String,
    pub kind: AssociationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_table: Option<String>,
}

/// A table-backed entity type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub struct EntityDef {
    /// Type name, e.g. `Widget`. Derived from the table name when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub table: String,
    /// Overrides the inflected singular table name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub singular: Option<String>,
    #[serde(default = "default_primary_key")]
    pub primary_key: String,
    #[serde(default)]
    pub attributes: Vec<AttributeDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inheritance: Option<Inheritance>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub associations: Vec<AssociationDef>,
}

impl EntityDef {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            name: None,
            table: table.into(),
            singular: None,
            primary_key: default_primary_key(),
            attributes: Vec::new(),
            inheritance: None,
            associations: Vec::new(),
        }
    }

    pub fn attribute(self, name: impl Into<String>) -> Self {
        self.attribute_def(AttributeDef::new(name))
    }

    pub fn attribute_def(mut self, attribute: AttributeDef) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Enable single-table inheritance on `column` with the given subtypes.
    /// The column is declared as an attribute if it isn't one yet.
    pub fn inheritance<I, S>(mut self, column: impl Into<String>, subtypes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let column = column.into();
        if !self.has_attribute(&column) {
            self.attributes.push(AttributeDef::new(column.clone()));
        }
        self.inheritance = Some(Inheritance {
            column,
            subtypes: subtypes.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn has_and_belongs_to_many(
        mut self,
        name: impl Into<String>,
        join_table: impl Into<String>,
    ) -> Self {
        self.associations.push(AssociationDef {
            name: name.into(),
            kind: AssociationKind::HasAndBelongsToMany,
            join_table: Some(join_table.into()),
        });
        self
    }

    pub fn association(mut self, association: AssociationDef) -> Self {
        self.associations.push(association);
        self
    }

    /// Singular table name, the key dump elements and fixture keys are built from.
    pub fn singular_name(&self) -> String {
        self.singular
            .clone()
            .unwrap_or_else(|| singularize(&self.table))
    }

    pub fn type_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| to_pascal_case(&self.singular_name()))
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.name == name)
    }

    pub fn attribute_def_for(&self, name: &str) -> Option<&AttributeDef> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn inheritance_column(&self) -> Option<&str> {
        self.inheritance.as_ref().map(|i| i.column.as_str())
    }

    /// Join tables of every many-to-many association, in declaration order.
    pub fn join_tables(&self) -> impl Iterator<Item = &str> {
        self.associations
            .iter()
            .filter(|a| a.kind == AssociationKind::HasAndBelongsToMany)
            .filter_map(|a| a.join_table.as_deref())
    }

    /// Check a discriminator value against the base type and registered subtypes.
    pub fn resolve_subtype(&self, subtype: &str) -> Result<(), SnapError> {
        let base = self.type_name();
        let subtypes = self
            .inheritance
            .as_ref()
            .map(|i| i.subtypes.as_slice())
            .unwrap_or_default();

        if subtype == base || subtypes.iter().any(|s| s == subtype) {
            return Ok(());
        }

        let known = std::iter::once(base.as_str())
            .chain(subtypes.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(", ");
        Err(SnapError::UnknownSubtype {
            table: self.table.clone(),
            subtype: subtype.to_string(),
            known,
        })
    }

    /// A new, unsaved record with every attribute at its default.
    pub fn new_record(&self) -> Record {
        let mut record = Record::new();
        for attribute in &self.attributes {
            record.set(
                attribute.name.clone(),
                attribute.default.clone().unwrap_or(Value::Null),
            );
        }
        record
    }

    pub fn validate(&self) -> Result<(), EntityValidationError> {
        if self.table.trim().is_empty() {
            return Err(EntityValidationError::EmptyTableName);
        }

        let mut seen = HashSet::new();
        for attribute in &self.attributes {
            if attribute.name.is_empty() {
                return Err(EntityValidationError::EmptyAttributeName(
                    self.table.clone(),
                ));
            }
            if attribute.name == self.primary_key {
                return Err(EntityValidationError::PrimaryKeyAsAttribute(
                    self.table.clone(),
                    attribute.name.clone(),
                ));
            }
            if !seen.insert(attribute.name.as_str()) {
                return Err(EntityValidationError::DuplicateAttribute(
                    self.table.clone(),
                    attribute.name.clone(),
                ));
            }
        }

        if let Some(column) = self.inheritance_column()
            && !self.has_attribute(column)
        {
            return Err(EntityValidationError::InheritanceColumnNotAttribute(
                self.table.clone(),
                column.to_string(),
            ));
        }

        for association in &self.associations {
            if association.kind == AssociationKind::HasAndBelongsToMany
                && association
                    .join_table
                    .as_deref()
                    .is_none_or(|t| t.trim().is_empty())
            {
                return Err(EntityValidationError::MissingJoinTable(
                    self.table.clone(),
                    association.name.clone(),
                ));
            }
        }

        Ok(())
    }
}
