//! Version directory descriptors
//!
//! Every version directory holds a `package.json`, a `resource.json` and
//! optionally a `command.json`. [`ResourceDocument`] loads all three and
//! writes back the ones a rule touched.

mod document;
mod package;

pub use document::{ResourceDocument, COMMAND_FILE, RESOURCE_FILE};
pub use package::{PackageDescriptor, PACKAGE_FILE};
