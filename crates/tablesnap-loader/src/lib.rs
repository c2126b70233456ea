pub mod config;
pub mod entities;

pub use config::{load_config_from_path, load_config_or_default};
pub use entities::{load_entities, load_entities_from_dir};
