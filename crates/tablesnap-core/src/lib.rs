pub mod access;
pub mod entity;
pub mod error;
#[cfg(any(test, feature = "memory"))]
pub mod memory;
pub mod record;
pub mod selector;

pub use access::DataAccess;
pub use entity::{
    AssociationDef, AssociationKind, AttributeDef, EntityDef, EntityValidationError, Inheritance,
};
pub use error::{Result, SnapError};
#[cfg(any(test, feature = "memory"))]
pub use memory::MemoryStore;
pub use record::{AttributeMap, Record, Value};
pub use selector::{Condition, FindOptions, Order, OrderBy, Selector};
