//! Rule-driven rewriting of version descriptors
//!
//! Each rule rewrites values that already exist; none of them adds keys to
//! `resource.json` or creates a missing `command.json`.

use crate::config::{AssetRule, DockerRule, PackageUpdate, RuleKind};
use crate::descriptor::{ResourceDocument, RESOURCE_FILE};
use crate::io::PathUtils;
use crate::{Result, UniverseError};
use serde_json::{Map, Value};

/// Platforms rebased by the `all` key of a cli rule
pub const CLI_PLATFORMS: [&str; 3] = ["darwin", "linux", "windows"];

/// Architecture key under each cli platform
pub const CLI_ARCH: &str = "x86-64";

/// Apply every rule present in `update` to one loaded document and save it.
///
/// Returns the rules that changed something on disk.
pub fn apply_rules(doc: &mut ResourceDocument, update: &PackageUpdate) -> Result<Vec<RuleKind>> {
    let mut applied = Vec::new();

    if let Some(rule) = &update.uri {
        apply_uri_rule(doc, rule)?;
        applied.push(RuleKind::Uri);
    }
    if let Some(rule) = &update.docker {
        apply_docker_rule(doc, rule)?;
        applied.push(RuleKind::Docker);
    }
    if let Some(rule) = &update.cli {
        apply_cli_rule(doc, rule)?;
        applied.push(RuleKind::Cli);
    }
    if let Some(command) = &update.command {
        if apply_command_rule(doc, command)? {
            applied.push(RuleKind::Command);
        }
    }

    doc.save()?;

    tracing::info!(
        dir = %doc.dir().display(),
        rules = ?applied.iter().map(RuleKind::as_str).collect::<Vec<_>>(),
        "Applied rules"
    );
    Ok(applied)
}

/// Rewrite `assets.uris`.
///
/// `all` rebases every URI onto the given prefix. Other keys then overwrite
/// existing entries verbatim.
pub fn apply_uri_rule(doc: &mut ResourceDocument, rule: &AssetRule) -> Result<()> {
    let file = doc.dir().join(RESOURCE_FILE);
    let Some(uris) = doc.uris_mut()? else {
        tracing::debug!(file = %file.display(), "No assets.uris to rewrite");
        return Ok(());
    };

    if let Some(base) = &rule.all {
        for (key, value) in uris.iter_mut() {
            let old = value.as_str().ok_or_else(|| UniverseError::MalformedDescriptor {
                path: file.clone(),
                reason: format!("assets.uris.{key} is not a string"),
            })?;
            *value = Value::String(PathUtils::rebase(base, old));
        }
    }

    overwrite_existing(uris, &rule.entries);
    Ok(())
}

/// Overwrite existing `assets.container.docker` entries
pub fn apply_docker_rule(doc: &mut ResourceDocument, rule: &DockerRule) -> Result<()> {
    let dir = doc.dir().to_path_buf();
    let Some(docker) = doc.docker_mut()? else {
        tracing::debug!(dir = %dir.display(), "No assets.container.docker to rewrite");
        return Ok(());
    };

    overwrite_existing(docker, &rule.entries);
    Ok(())
}

/// Rewrite `cli.binaries.<platform>.x86-64.url`.
///
/// `all` rebases the darwin, linux and windows URLs; a platform the
/// descriptor does not ship is skipped. Keys naming a platform then
/// overwrite its URL verbatim.
pub fn apply_cli_rule(doc: &mut ResourceDocument, rule: &AssetRule) -> Result<()> {
    let file = doc.dir().join(RESOURCE_FILE);
    let Some(binaries) = doc.cli_binaries_mut()? else {
        tracing::debug!(file = %file.display(), "No cli.binaries to rewrite");
        return Ok(());
    };

    if let Some(base) = &rule.all {
        for platform in CLI_PLATFORMS {
            if !binaries.contains_key(platform) {
                tracing::debug!(platform, "Platform missing from cli.binaries");
                continue;
            }
            let url = binary_url_mut(binaries, platform, &file)?;
            let old = url.as_str().ok_or_else(|| UniverseError::MalformedDescriptor {
                path: file.clone(),
                reason: format!("cli.binaries.{platform}.{CLI_ARCH}.url is not a string"),
            })?;
            *url = Value::String(PathUtils::rebase(base, old));
        }
    }

    for (platform, replacement) in &rule.entries {
        if binaries.contains_key(platform) {
            *binary_url_mut(binaries, platform, &file)? = Value::String(replacement.clone());
        }
    }
    Ok(())
}

/// Replace `pip` in command.json with `[command]`.
///
/// Returns `false` without touching anything when the version has no
/// command.json.
pub fn apply_command_rule(doc: &mut ResourceDocument, command: &Value) -> Result<bool> {
    let dir = doc.dir().to_path_buf();
    let Some(descriptor) = doc.command_mut()? else {
        tracing::debug!(dir = %dir.display(), "No command.json; command rule skipped");
        return Ok(false);
    };

    descriptor.insert("pip".to_string(), Value::Array(vec![command.clone()]));
    Ok(true)
}

fn overwrite_existing(
    target: &mut Map<String, Value>,
    entries: &std::collections::BTreeMap<String, String>,
) {
    for (key, replacement) in entries {
        if let Some(value) = target.get_mut(key) {
            *value = Value::String(replacement.clone());
        }
    }
}

fn binary_url_mut<'a>(
    binaries: &'a mut Map<String, Value>,
    platform: &str,
    file: &std::path::Path,
) -> Result<&'a mut Value> {
    binaries
        .get_mut(platform)
        .and_then(|p| p.get_mut(CLI_ARCH))
        .and_then(|arch| arch.as_object_mut())
        .and_then(|arch| arch.get_mut("url"))
        .ok_or_else(|| UniverseError::MalformedDescriptor {
            path: file.to_path_buf(),
            reason: format!("cli.binaries.{platform} has no {CLI_ARCH}.url"),
        })
}
