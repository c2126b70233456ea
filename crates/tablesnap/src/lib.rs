//! Dump table contents to files, reload them, and turn them into test fixtures.
//!
//! Every operation is a method on [`Project`], which binds a project root and
//! a [`SnapConfig`]. The data-access layer is injected per call through the
//! [`DataAccess`] trait; this crate never talks to a database on its own.
//! The in-memory `MemoryStore` backend is behind the `memory` feature.
//!
//! ```no_run
//! use tablesnap::{EntityDef, Project, Selector, SnapConfig};
//! use tablesnap_core::MemoryStore;
//!
//! let project = Project::new("/srv/app", SnapConfig::default());
//! let widgets = EntityDef::new("widgets").attribute("name");
//! let mut db = MemoryStore::new();
//!
//! project.dump(&db, &widgets, None, &Selector::All)?;
//! project.load(&mut db, &widgets, None)?;
//! project.export_fixture(&db, &widgets, Some(10))?;
//! # Ok::<(), tablesnap::SnapError>(())
//! ```

mod encode;
pub mod dump;
pub mod fixture;
pub mod load;
pub mod project;
pub mod skeleton;
pub mod writer;

pub use dump::dump_document;
pub use fixture::{FixtureDocument, fixture_document, join_fixture_document};
pub use load::parse_dump;
pub use project::Project;
pub use skeleton::{SKELETON_RECORD_COUNT, skeleton_document};

pub use tablesnap_config::{FileFormat, SnapConfig};
pub use tablesnap_core::{
    AssociationDef, AssociationKind, AttributeDef, AttributeMap, Condition, DataAccess, EntityDef,
    FindOptions, Inheritance, Order, OrderBy, Record, Result, Selector, SnapError, Value,
};
#[cfg(feature = "memory")]
pub use tablesnap_core::MemoryStore;
