//! Read-write view over the descriptors of one version directory

use super::package::PackageDescriptor;
use crate::io::json::{read_json, write_pretty_json};
use crate::{Result, UniverseError};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Resource descriptor file name
pub const RESOURCE_FILE: &str = "resource.json";

/// Command descriptor file name
pub const COMMAND_FILE: &str = "command.json";

const URIS_PATH: &[&str] = &["assets", "uris"];
const DOCKER_PATH: &[&str] = &["assets", "container", "docker"];
const BINARIES_PATH: &[&str] = &["cli", "binaries"];

/// The descriptors of one version directory, loaded once and written back
/// as a batch.
///
/// `resource.json` and `command.json` are kept as raw JSON so fields this
/// crate does not know about survive a rewrite untouched. Only descriptors
/// reached through a `*_mut` accessor are written by [`save`](Self::save).
#[derive(Debug, Clone)]
pub struct ResourceDocument {
    dir: PathBuf,
    package: PackageDescriptor,
    resource: Value,
    command: Option<Value>,
    resource_dirty: bool,
    command_dirty: bool,
}

impl ResourceDocument {
    /// Load the descriptors of a version directory.
    ///
    /// `package.json` and `resource.json` are required; a missing
    /// `command.json` means no command is configured.
    pub fn load(dir: &Path) -> Result<Self> {
        let package = PackageDescriptor::from_dir(dir)?;

        let resource_path = dir.join(RESOURCE_FILE);
        if !resource_path.is_file() {
            return Err(UniverseError::MissingDescriptor(resource_path));
        }
        let resource: Value = read_json(&resource_path)?;
        if !resource.is_object() {
            return Err(UniverseError::MalformedDescriptor {
                path: resource_path,
                reason: "expected a JSON object".to_string(),
            });
        }

        let command_path = dir.join(COMMAND_FILE);
        let command = if command_path.is_file() {
            Some(read_json(&command_path)?)
        } else {
            None
        };

        Ok(Self {
            dir: dir.to_path_buf(),
            package,
            resource,
            command,
            resource_dirty: false,
            command_dirty: false,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn package(&self) -> &PackageDescriptor {
        &self.package
    }

    pub fn resource(&self) -> &Value {
        &self.resource
    }

    pub fn command(&self) -> Option<&Value> {
        self.command.as_ref()
    }

    pub fn has_command(&self) -> bool {
        self.command.is_some()
    }

    /// Whether a `save` would write anything
    pub fn is_dirty(&self) -> bool {
        self.resource_dirty || self.command_dirty
    }

    /// `assets.uris`, if the descriptor has it
    pub fn uris_mut(&mut self) -> Result<Option<&mut Map<String, Value>>> {
        self.resource_section_mut(URIS_PATH)
    }

    /// `assets.container.docker`, if the descriptor has it
    pub fn docker_mut(&mut self) -> Result<Option<&mut Map<String, Value>>> {
        self.resource_section_mut(DOCKER_PATH)
    }

    /// `cli.binaries`, if the descriptor has it
    pub fn cli_binaries_mut(&mut self) -> Result<Option<&mut Map<String, Value>>> {
        self.resource_section_mut(BINARIES_PATH)
    }

    /// The command descriptor object, or `None` when there is no `command.json`
    pub fn command_mut(&mut self) -> Result<Option<&mut Map<String, Value>>> {
        let path = self.dir.join(COMMAND_FILE);
        match self.command.as_mut() {
            None => Ok(None),
            Some(Value::Object(map)) => {
                self.command_dirty = true;
                Ok(Some(map))
            }
            Some(_) => Err(UniverseError::MalformedDescriptor {
                path,
                reason: "expected a JSON object".to_string(),
            }),
        }
    }

    /// Mark `resource.json` for rewriting even if nothing changed
    pub fn touch_resource(&mut self) {
        self.resource_dirty = true;
    }

    /// Write back every descriptor that was opened for mutation
    pub fn save(&mut self) -> Result<()> {
        if self.resource_dirty {
            write_pretty_json(&self.dir.join(RESOURCE_FILE), &self.resource)?;
            self.resource_dirty = false;
        }
        if self.command_dirty {
            if let Some(command) = &self.command {
                write_pretty_json(&self.dir.join(COMMAND_FILE), command)?;
            }
            self.command_dirty = false;
        }
        Ok(())
    }

    fn resource_section_mut(&mut self, path: &[&str]) -> Result<Option<&mut Map<String, Value>>> {
        self.resource_dirty = true;
        let file = self.dir.join(RESOURCE_FILE);

        let mut node = &mut self.resource;
        for (depth, key) in path.iter().enumerate() {
            if !node.is_object() {
                let parent = if depth == 0 {
                    "<root>".to_string()
                } else {
                    path[..depth].join(".")
                };
                return Err(UniverseError::MalformedDescriptor {
                    path: file,
                    reason: format!("'{parent}' is not an object"),
                });
            }
            node = match node.get_mut(*key) {
                Some(child) => child,
                None => return Ok(None),
            };
        }

        match node {
            Value::Object(map) => Ok(Some(map)),
            Value::Null => Ok(None),
            _ => Err(UniverseError::MalformedDescriptor {
                path: file,
                reason: format!("'{}' is not an object", path.join(".")),
            }),
        }
    }
}
