//! Update configuration
//!
//! A YAML document mapping package names to the rewrites to apply:
//!
//! ```yaml
//! kafka:
//!   version: 2.3.0-1.1.0   # optional: pick a version by descriptor version
//!   create: true           # optional: clone it into a new slot first
//!   uri:
//!     all: http://mirror.local/kafka
//!   docker:
//!     image: registry.local/kafka:2.3.0
//!   cli:
//!     all: http://mirror.local/cli
//!   command:
//!     pip: kafka-cli
//! ```

mod loader;
mod types;

pub use types::{AssetRule, DockerRule, PackageUpdate, RuleKind, UpdateConfig, KNOWN_KEYS};
