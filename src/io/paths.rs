use std::path::{Path, PathBuf};

/// Default update configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "config.yml";

/// Path management for a package universe
#[derive(Debug, Clone)]
pub struct UniversePaths {
    /// Store directory holding the letter buckets (repo/packages/)
    pub store_dir: PathBuf,
}

impl UniversePaths {
    /// Create paths for a universe checkout; the store lives at `repo/packages`
    pub fn for_universe(universe_root: &Path) -> Self {
        Self {
            store_dir: universe_root.join("repo").join("packages"),
        }
    }

    /// Use an explicit store directory
    pub fn for_store(store_dir: &Path) -> Self {
        Self {
            store_dir: store_dir.to_path_buf(),
        }
    }

    /// Bucket directory name for a package: its first character, uppercased
    pub fn bucket_name(package: &str) -> Option<String> {
        package.chars().next().map(|c| c.to_uppercase().collect())
    }

    /// Directory holding all versions of a package
    pub fn package_dir(&self, package: &str) -> PathBuf {
        let bucket = Self::bucket_name(package).unwrap_or_default();
        self.store_dir.join(bucket).join(package)
    }

    /// Directory of one version of a package
    pub fn version_dir(&self, package: &str, version: u64) -> PathBuf {
        self.package_dir(package).join(version.to_string())
    }
}

/// Utilities for URI paths inside descriptors
pub struct PathUtils;

impl PathUtils {
    /// Last component of a forward-slash path or URL
    pub fn basename(path: &str) -> &str {
        match path.rfind('/') {
            Some(idx) => &path[idx + 1..],
            None => path,
        }
    }

    /// Join two forward-slash path fragments.
    ///
    /// An absolute `tail` replaces `base` entirely, and no separator is
    /// inserted when `base` is empty or already ends with one.
    pub fn join(base: &str, tail: &str) -> String {
        if tail.starts_with('/') || base.is_empty() {
            tail.to_string()
        } else if base.ends_with('/') {
            format!("{base}{tail}")
        } else {
            format!("{base}/{tail}")
        }
    }

    /// Replace the directory part of `old` with `base`, keeping its basename
    pub fn rebase(base: &str, old: &str) -> String {
        Self::join(base, Self::basename(old))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_universe_layout() {
        let paths = UniversePaths::for_universe(Path::new("/tmp/universe"));
        assert_eq!(paths.store_dir, Path::new("/tmp/universe/repo/packages"));
        assert_eq!(
            paths.package_dir("kafka"),
            Path::new("/tmp/universe/repo/packages/K/kafka")
        );
        assert_eq!(
            paths.version_dir("kafka", 12),
            Path::new("/tmp/universe/repo/packages/K/kafka/12")
        );
    }

    #[test]
    fn test_bucket_name_uppercases() {
        assert_eq!(UniversePaths::bucket_name("spark"), Some("S".to_string()));
        assert_eq!(UniversePaths::bucket_name("Spark"), Some("S".to_string()));
        assert_eq!(UniversePaths::bucket_name(""), None);
    }

    #[test]
    fn test_basename() {
        assert_eq!(PathUtils::basename("http://old/path/foo.tgz"), "foo.tgz");
        assert_eq!(PathUtils::basename("foo.tgz"), "foo.tgz");
        assert_eq!(PathUtils::basename("http://old/path/"), "");
    }

    #[test]
    fn test_join() {
        assert_eq!(PathUtils::join("http://x/base", "foo.tgz"), "http://x/base/foo.tgz");
        assert_eq!(PathUtils::join("http://x/base/", "foo.tgz"), "http://x/base/foo.tgz");
        assert_eq!(PathUtils::join("", "foo.tgz"), "foo.tgz");
        assert_eq!(PathUtils::join("http://x", "/abs"), "/abs");
    }

    #[test]
    fn test_rebase() {
        assert_eq!(
            PathUtils::rebase("http://mirror/cli", "https://downloads/dcos-kafka-darwin"),
            "http://mirror/cli/dcos-kafka-darwin"
        );
    }
}
