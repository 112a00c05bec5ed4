//! End-to-end tests for the catalog module

#[cfg(test)]
mod integration_tests {
    use crate::catalog::build_catalog;
    use crate::io::json::to_pretty_string;
    use crate::store::PackageStore;
    use crate::UniverseError;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use std::collections::BTreeSet;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_json(path: &Path, value: &Value) {
        fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    }

    fn add_version(store: &Path, package: &str, id: u64, version: &str) {
        let bucket = package[..1].to_uppercase();
        let dir = store.join(bucket).join(package).join(id.to_string());
        fs::create_dir_all(&dir).unwrap();
        write_json(
            &dir.join("package.json"),
            &json!({
                "version": version,
                "description": format!("{} package", package),
                "tags": [package],
            }),
        );
        write_json(
            &dir.join("resource.json"),
            &json!({
                "assets": {
                    "uris": {"jre": format!("https://downloads.example.com/{}/jre.tgz", id)},
                    "container": {"docker": {"image": format!("{}:{}", package, version)}}
                }
            }),
        );
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    /// A1, A2, B2 in buckets A and B
    fn fixture() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        add_version(temp_dir.path(), "A1", 0, "1.0");
        add_version(temp_dir.path(), "A2", 0, "1.0");
        add_version(temp_dir.path(), "B2", 0, "2.0");
        add_version(temp_dir.path(), "B2", 1, "2.1");
        temp_dir
    }

    #[test]
    fn test_filter_keeps_requested_and_reports_missing() {
        let temp_dir = fixture();
        let store = PackageStore::open(temp_dir.path());

        let report = build_catalog(&store, &set(&["A1", "B2", "C3"])).unwrap();

        assert_eq!(report.package_names(), vec!["A1", "B2"]);
        assert_eq!(report.missing, vec!["C3".to_string()]);
        assert!(report.empty.is_empty());
    }

    #[test]
    fn test_empty_filter_lists_everything() {
        let temp_dir = fixture();
        let store = PackageStore::open(temp_dir.path());

        let report = build_catalog(&store, &BTreeSet::new()).unwrap();

        assert_eq!(report.package_names(), vec!["A1", "A2", "B2"]);
        assert_eq!(report.version_count(), 4);
        assert!(report.missing.is_empty());
    }

    #[test]
    fn test_default_version_is_highest_directory() {
        let temp_dir = fixture();
        add_version(temp_dir.path(), "B2", 10, "3.0");
        let store = PackageStore::open(temp_dir.path());

        let report = build_catalog(&store, &set(&["B2"])).unwrap();
        let entry = report.get("B2").unwrap();

        assert_eq!(entry.default_dir, "10");
        assert_eq!(entry.default_version, "3.0");
        let dirs: Vec<&str> = entry.versions.iter().map(|v| v.dir.as_str()).collect();
        assert_eq!(dirs, vec!["0", "1", "10"]);
    }

    #[test]
    fn test_report_json_shape() {
        let temp_dir = TempDir::new().unwrap();
        add_version(temp_dir.path(), "kafka", 3, "2.3.0");
        let store = PackageStore::open(temp_dir.path());

        let report = build_catalog(&store, &BTreeSet::new()).unwrap();
        let rendered: Value = serde_json::from_str(&to_pretty_string(&report).unwrap()).unwrap();

        assert_eq!(
            rendered,
            json!({
                "kafka": {
                    "default_version": {"3": "2.3.0"},
                    "3": {
                        "version": "2.3.0",
                        "description": "kafka package",
                        "framework": false,
                        "tags": ["kafka"],
                        "selected": false,
                        "resource": [
                            {"uris": [["jre", "https://downloads.example.com/3/jre.tgz"]]},
                            {"docker": [["image", "kafka:2.3.0"]]},
                            {"cli": []}
                        ]
                    }
                }
            })
        );
    }

    #[test]
    fn test_command_descriptor_is_included() {
        let temp_dir = TempDir::new().unwrap();
        add_version(temp_dir.path(), "spark", 1, "1.6");
        write_json(
            &temp_dir.path().join("S/spark/1/command.json"),
            &json!({"pip": ["https://pypi.example.com/spark-cli.whl"]}),
        );
        let store = PackageStore::open(temp_dir.path());

        let report = build_catalog(&store, &BTreeSet::new()).unwrap();
        let record = report.get("spark").unwrap().version("1").unwrap();

        assert_eq!(
            record.command,
            Some(json!({"pip": ["https://pypi.example.com/spark-cli.whl"]}))
        );
    }

    #[test]
    fn test_package_without_versions_is_reported_empty() {
        let temp_dir = fixture();
        fs::create_dir_all(temp_dir.path().join("C/C3")).unwrap();
        let store = PackageStore::open(temp_dir.path());

        let report = build_catalog(&store, &BTreeSet::new()).unwrap();

        assert_eq!(report.package_names(), vec!["A1", "A2", "B2"]);
        assert_eq!(report.empty, vec!["C3".to_string()]);
    }

    #[test]
    fn test_missing_descriptor_aborts() {
        let temp_dir = fixture();
        fs::remove_file(temp_dir.path().join("A/A1/0/resource.json")).unwrap();
        let store = PackageStore::open(temp_dir.path());

        let err = build_catalog(&store, &BTreeSet::new()).unwrap_err();
        assert!(matches!(err, UniverseError::MissingDescriptor(_)));
    }
}
