use super::types::{PackageUpdate, UpdateConfig, KNOWN_KEYS};
use crate::{Result, UniverseError};
use std::path::Path;

impl UpdateConfig {
    /// Load an update configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            UniverseError::Config(format!(
                "Failed to read update configuration {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&contents).map_err(|e| match e {
            UniverseError::Config(msg) => {
                UniverseError::Config(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Parse an update configuration, keeping package order from the document.
    ///
    /// Every package body is validated here; a package key with an empty
    /// body is an update with no rules.
    pub fn from_yaml(contents: &str) -> Result<Self> {
        let root: serde_yaml_ng::Value = serde_yaml_ng::from_str(contents)
            .map_err(|e| UniverseError::Config(format!("Invalid YAML: {}", e)))?;

        let mapping = match root {
            serde_yaml_ng::Value::Null => return Ok(Self::default()),
            serde_yaml_ng::Value::Mapping(mapping) => mapping,
            _ => {
                return Err(UniverseError::Config(
                    "Top level must map package names to updates".to_string(),
                ))
            }
        };

        let mut packages = Vec::with_capacity(mapping.len());
        for (key, body) in mapping {
            let name = match key {
                serde_yaml_ng::Value::String(name) if !name.is_empty() => name,
                other => {
                    return Err(UniverseError::Config(format!(
                        "Package name must be a non-empty string, got {:?}",
                        other
                    )))
                }
            };

            let update = if body.is_null() {
                PackageUpdate::default()
            } else {
                serde_yaml_ng::from_value(body).map_err(|e| {
                    UniverseError::Config(format!("Package '{}': {}", name, e))
                })?
            };

            if packages.iter().any(|(existing, _)| existing == &name) {
                return Err(UniverseError::Config(format!(
                    "Package '{}' is configured more than once",
                    name
                )));
            }
            packages.push((name, update));
        }

        let config = Self { packages };
        for warning in config.warnings() {
            tracing::warn!("{}", warning);
        }
        Ok(config)
    }

    /// Non-fatal findings: keys no rule understands, packages with nothing to do
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        for (name, update) in &self.packages {
            for key in update.unknown.keys() {
                warnings.push(format!(
                    "Package '{}': unknown key '{}' ignored (expected one of {})",
                    name,
                    key,
                    KNOWN_KEYS.join(", ")
                ));
            }
            if update.rules().is_empty() && !update.create {
                warnings.push(format!("Package '{}': no rules configured", name));
            }
        }
        warnings
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{RuleKind, UpdateConfig};
    use crate::UniverseError;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_full_package_update() {
        let yaml = r#"
kafka:
  version: 2.3.0-1.1.0
  create: true
  uri:
    all: http://mirror.local/kafka
    scheduler-zip: http://mirror.local/custom/scheduler.zip
  docker:
    image: registry.local/kafka:2.3.0
  cli:
    all: http://mirror.local/cli
    linux: http://mirror.local/linux/dcos-kafka
  command:
    name: kafka-cli
    url: http://mirror.local/kafka-cli.whl
"#;

        let config = UpdateConfig::from_yaml(yaml).unwrap();
        let kafka = config.get("kafka").unwrap();

        assert_eq!(kafka.version.as_deref(), Some("2.3.0-1.1.0"));
        assert!(kafka.create);

        let uri = kafka.uri.as_ref().unwrap();
        assert_eq!(uri.all.as_deref(), Some("http://mirror.local/kafka"));
        assert_eq!(uri.entries.len(), 1);
        assert_eq!(
            uri.entries["scheduler-zip"],
            "http://mirror.local/custom/scheduler.zip"
        );

        assert_eq!(
            kafka.docker.as_ref().unwrap().entries["image"],
            "registry.local/kafka:2.3.0"
        );
        assert_eq!(
            kafka.cli.as_ref().unwrap().entries["linux"],
            "http://mirror.local/linux/dcos-kafka"
        );
        assert_eq!(
            kafka.command,
            Some(json!({"name": "kafka-cli", "url": "http://mirror.local/kafka-cli.whl"}))
        );
        assert_eq!(
            kafka.rules(),
            vec![RuleKind::Uri, RuleKind::Docker, RuleKind::Cli, RuleKind::Command]
        );
        assert!(config.warnings().is_empty());
    }

    #[test]
    fn test_package_order_is_preserved() {
        let yaml = r#"
zookeeper:
  docker: {image: z}
arangodb:
  docker: {image: a}
marathon:
  docker: {image: m}
"#;
        let config = UpdateConfig::from_yaml(yaml).unwrap();
        let names: Vec<_> = config.packages.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["zookeeper", "arangodb", "marathon"]);
    }

    #[test]
    fn test_numeric_version_is_stringified() {
        let config = UpdateConfig::from_yaml("spark:\n  version: 1.5\n  create: false\n").unwrap();
        assert_eq!(config.get("spark").unwrap().version.as_deref(), Some("1.5"));
    }

    #[test]
    fn test_empty_package_body() {
        let config = UpdateConfig::from_yaml("spark:\n").unwrap();
        let spark = config.get("spark").unwrap();
        assert!(spark.rules().is_empty());
        assert_eq!(config.warnings(), vec!["Package 'spark': no rules configured"]);
    }

    #[test]
    fn test_empty_document() {
        assert!(UpdateConfig::from_yaml("").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_keys_are_reported() {
        let config = UpdateConfig::from_yaml("spark:\n  uris: {all: x}\n  docker: {}\n").unwrap();
        let warnings = config.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("unknown key 'uris'"));
    }

    #[test]
    fn test_non_string_rule_value_is_rejected() {
        let result = UpdateConfig::from_yaml("spark:\n  docker:\n    image: [a, b]\n");
        match result {
            Err(UniverseError::Config(msg)) => assert!(msg.contains("spark")),
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_top_level_must_be_mapping() {
        assert!(matches!(
            UpdateConfig::from_yaml("- kafka\n- spark\n"),
            Err(UniverseError::Config(_))
        ));
    }

    #[test]
    fn test_from_file_missing() {
        let result = UpdateConfig::from_file("/nonexistent/config.yml");
        assert!(matches!(result, Err(UniverseError::Config(_))));
    }
}
