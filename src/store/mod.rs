//! Package version store
//!
//! ```text
//! <store>/
//!   K/                  ← bucket: uppercase first letter
//!     kafka/            ← package
//!       0/ 1/ ... 12/   ← version directories, highest is current
//!         package.json
//!         resource.json
//!         command.json  (optional)
//! ```

mod resolver;
mod version;

pub use resolver::{NextSlot, PackageDir, PackageStore, VersionMatch};
pub use version::{parse_version_name, VersionDir};
