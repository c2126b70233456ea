pub mod config;
pub mod file_format;

pub use config::{CONFIG_FILE_NAME, SnapConfig};
pub use file_format::FileFormat;
