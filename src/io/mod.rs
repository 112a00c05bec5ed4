pub mod fs;
pub mod json;
pub mod paths;

pub use paths::{PathUtils, UniversePaths, DEFAULT_CONFIG_FILE};
