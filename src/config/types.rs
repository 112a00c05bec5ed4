use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Keys a package update understands
pub const KNOWN_KEYS: &[&str] = &["version", "create", "uri", "docker", "cli", "command"];

/// Which part of a version's descriptors a rule rewrites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    Uri,
    Docker,
    Cli,
    Command,
}

impl RuleKind {
    /// Application order
    pub const ALL: [RuleKind; 4] = [
        RuleKind::Uri,
        RuleKind::Docker,
        RuleKind::Cli,
        RuleKind::Command,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Uri => "uri",
            RuleKind::Docker => "docker",
            RuleKind::Cli => "cli",
            RuleKind::Command => "command",
        }
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rule fragment for `uri` and `cli`.
///
/// `all` rebases every existing entry onto a new prefix, keeping each
/// basename. The other keys overwrite single entries and win over `all`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all: Option<String>,

    #[serde(flatten)]
    pub entries: BTreeMap<String, String>,
}

/// Rule fragment for `docker`: image key to replacement reference
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DockerRule {
    pub entries: BTreeMap<String, String>,
}

/// Update configuration for one package
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PackageUpdate {
    /// Select the version whose package.json reports this version string
    /// instead of the current version
    #[serde(default, deserialize_with = "scalar_string")]
    pub version: Option<String>,

    /// Clone the selected version into a new slot before rewriting
    #[serde(default)]
    pub create: bool,

    #[serde(default)]
    pub uri: Option<AssetRule>,

    #[serde(default)]
    pub docker: Option<DockerRule>,

    #[serde(default)]
    pub cli: Option<AssetRule>,

    /// Installed as the single `pip` entry of command.json
    #[serde(default)]
    pub command: Option<serde_json::Value>,

    /// Keys this tool does not understand; reported at load time
    #[serde(flatten)]
    pub unknown: BTreeMap<String, serde_yaml_ng::Value>,
}

impl PackageUpdate {
    /// Rules present in this configuration, in application order
    pub fn rules(&self) -> Vec<RuleKind> {
        RuleKind::ALL
            .into_iter()
            .filter(|kind| self.has_rule(*kind))
            .collect()
    }

    pub fn has_rule(&self, kind: RuleKind) -> bool {
        match kind {
            RuleKind::Uri => self.uri.is_some(),
            RuleKind::Docker => self.docker.is_some(),
            RuleKind::Cli => self.cli.is_some(),
            RuleKind::Command => self.command.is_some(),
        }
    }
}

/// The whole update configuration: packages in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateConfig {
    pub packages: Vec<(String, PackageUpdate)>,
}

impl UpdateConfig {
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn get(&self, package: &str) -> Option<&PackageUpdate> {
        self.packages
            .iter()
            .find(|(name, _)| name == package)
            .map(|(_, update)| update)
    }
}

/// Accept any YAML scalar for a version string; `version: 1.0` is read as
/// a float by YAML but means the string "1.0"
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_yaml_ng::Value;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "version must be a scalar, got {other:?}"
        ))),
    }
}
