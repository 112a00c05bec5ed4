//! Test helper functions for integration tests
//!
//! Shared across the test files using the tests/common/ pattern.

#![allow(dead_code)]

use anyhow::Result;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;
use walkdir::WalkDir;

/// Initialize logging for tests (only once per test run)
static INIT: Once = Once::new();

pub fn init_test_logging() {
    INIT.call_once(|| {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_target(true)
                    .with_level(true),
            )
            .with(tracing_subscriber::filter::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Create `<universe>/repo/packages` and return its path
pub fn create_universe(universe_root: &Path) -> Result<PathBuf> {
    let store = universe_root.join("repo").join("packages");
    fs::create_dir_all(&store)?;
    Ok(store)
}

/// Write pretty JSON the way the store keeps it
pub fn write_json(path: &Path, value: &Value) -> Result<()> {
    let mut rendered = serde_json::to_string_pretty(value)?;
    rendered.push('\n');
    fs::write(path, rendered)?;
    Ok(())
}

pub fn read_json(path: &Path) -> Result<Value> {
    Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
}

/// A typical resource descriptor: two URIs, a docker image and three cli
/// platforms
pub fn sample_resource(package: &str, id: u64) -> Value {
    json!({
        "assets": {
            "uris": {
                "jre-tar-gz": "https://downloads.mesosphere.com/java/jre-8u112-linux-x64.tar.gz",
                "bootstrap-zip": format!("https://downloads.mesosphere.com/{package}/assets/{id}/bootstrap.zip")
            },
            "container": {
                "docker": {"image-name": format!("mesosphere/{package}:{id}")}
            }
        },
        "cli": {
            "binaries": {
                "darwin": {"x86-64": {"kind": "executable", "url": format!("https://downloads.mesosphere.com/{package}/{id}/dcos-{package}-darwin")}},
                "linux": {"x86-64": {"kind": "executable", "url": format!("https://downloads.mesosphere.com/{package}/{id}/dcos-{package}-linux")}},
                "windows": {"x86-64": {"kind": "executable", "url": format!("https://downloads.mesosphere.com/{package}/{id}/dcos-{package}.exe")}}
            }
        }
    })
}

/// Add version directory `id` for `package` under its letter bucket
pub fn add_version(store: &Path, package: &str, id: u64, version: &str) -> Result<PathBuf> {
    let bucket = package[..1].to_uppercase();
    let dir = store.join(bucket).join(package).join(id.to_string());
    fs::create_dir_all(&dir)?;

    write_json(
        &dir.join("package.json"),
        &json!({
            "packagingVersion": "3.0",
            "name": package,
            "version": version,
            "description": format!("{package} service"),
            "tags": [package],
            "framework": true
        }),
    )?;
    write_json(&dir.join("resource.json"), &sample_resource(package, id))?;
    Ok(dir)
}

/// Add a command.json with a pip list to a version directory
pub fn add_command(version_dir: &Path, pip: &[&str]) -> Result<()> {
    write_json(&version_dir.join("command.json"), &json!({ "pip": pip }))
}

/// Relative path and bytes of every file under `root`, sorted by path
pub fn snapshot(root: &Path) -> Result<Vec<(PathBuf, Vec<u8>)>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() {
            let relative = entry.path().strip_prefix(root)?.to_path_buf();
            files.push((relative, fs::read(entry.path())?));
        }
    }
    Ok(files)
}
