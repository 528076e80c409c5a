//! Maven version lookup in the local repository

use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;
use walkdir::WalkDir;

use crate::pom::Coordinate;

/// Releases that must never be offered
pub const BANNED_VERSIONS: &[&str] = &[
    "2.2.0.redhat-053",
    "2.2.0.redhat-066",
    "2.2.0.redhat-073",
    "2.2.0.redhat-079",
];

fn redhat_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^.*\.(redhat|fuse)-.*$").expect("Invalid redhat version regex"))
}

/// Whether a version carries a `.redhat-` or `.fuse-` build suffix
#[must_use]
pub fn is_redhat_version(version: &str) -> bool {
    redhat_regex().is_match(version)
}

#[must_use]
pub fn is_banned(version: &str) -> bool {
    BANNED_VERSIONS.contains(&version)
}

#[must_use]
pub fn is_snapshot(version: &str) -> bool {
    version.ends_with("-SNAPSHOT")
}

/// Compare versions segment by segment
///
/// Numeric segments compare as numbers and sort after text segments; a
/// version with extra trailing segments sorts after its prefix.
#[must_use]
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let split = |v: &str| -> Vec<String> {
        v.split(['.', '-', '_'])
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
            .collect()
    };
    let (left, right) = (split(a), split(b));

    for (l, r) in left.iter().zip(right.iter()) {
        let ordering = match (l.parse::<u64>(), r.parse::<u64>()) {
            (Ok(l), Ok(r)) => l.cmp(&r),
            (Ok(_), Err(_)) => Ordering::Greater,
            (Err(_), Ok(_)) => Ordering::Less,
            (Err(_), Err(_)) => l.cmp(r),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    left.len().cmp(&right.len())
}

/// Versions starting with `prefix`, sorted
#[must_use]
pub fn complete_versions(versions: &[String], prefix: &str) -> Vec<String> {
    let mut matches: Vec<String> = versions
        .iter()
        .filter(|v| v.starts_with(prefix))
        .cloned()
        .collect();
    matches.sort();
    matches
}

/// `groupId:artifactId:version`
#[must_use]
pub fn format_gav(group_id: &str, artifact_id: &str, version: &str) -> String {
    format!("{group_id}:{artifact_id}:{version}")
}

/// A local Maven repository such as `~/.m2/repository`
#[derive(Debug, Clone)]
pub struct LocalRepository {
    root: PathBuf,
}

impl LocalRepository {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<group path>/<artifactId>`
    #[must_use]
    pub fn artifact_dir(&self, coordinate: &Coordinate) -> PathBuf {
        let mut dir = self.root.clone();
        dir.extend(coordinate.group_id.split('.'));
        dir.push(&coordinate.artifact_id);
        dir
    }

    /// Path of the artifact file for a versioned coordinate
    #[must_use]
    pub fn artifact_path(&self, coordinate: &Coordinate) -> Option<PathBuf> {
        let version = coordinate.version.as_deref()?;
        Some(
            self.artifact_dir(coordinate)
                .join(version)
                .join(format!(
                    "{}-{}.{}",
                    coordinate.artifact_id, version, coordinate.packaging
                )),
        )
    }

    /// Installed non-snapshot versions, ascending
    fn installed_versions(&self, coordinate: &Coordinate) -> Vec<String> {
        let dir = self.artifact_dir(coordinate);
        let mut versions: Vec<String> = WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_dir())
            .filter_map(|entry| entry.file_name().to_str().map(String::from))
            .filter(|version| !is_snapshot(version))
            .collect();
        versions.sort_by(|a, b| compare_versions(a, b));
        debug!(%coordinate, count = versions.len(), "scanned local versions");
        versions
    }

    /// Installed non-snapshot versions without banned releases, ascending
    #[must_use]
    pub fn versions(&self, coordinate: &Coordinate) -> Vec<String> {
        self.installed_versions(coordinate)
            .into_iter()
            .filter(|v| !is_banned(v))
            .collect()
    }

    /// Highest non-snapshot version, or an empty string
    #[must_use]
    pub fn latest_version(&self, coordinate: &Coordinate) -> String {
        self.installed_versions(coordinate)
            .pop()
            .unwrap_or_default()
    }

    /// Highest non-banned Red Hat build, or an empty string
    #[must_use]
    pub fn latest_redhat_version(&self, coordinate: &Coordinate) -> String {
        self.versions(coordinate)
            .into_iter()
            .filter(|v| is_redhat_version(v))
            .last()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_redhat_versions() {
        assert!(is_redhat_version("1.0.0.redhat-00001"));
        assert!(is_redhat_version("1.0.0.fuse-00001"));
        assert!(!is_redhat_version("1.0.0.foo-00001"));
        assert!(!is_redhat_version("1.0.0"));
    }

    #[test]
    fn test_compare_versions() {
        assert_eq!(compare_versions("2.9.0", "2.10.0"), Ordering::Less);
        assert_eq!(compare_versions("2.17.0", "2.17.0"), Ordering::Equal);
        assert_eq!(compare_versions("2.17", "2.17.1"), Ordering::Less);
        assert_eq!(
            compare_versions("2.17.0.redhat-630187", "2.17.0"),
            Ordering::Greater
        );
    }

    #[test]
    fn test_complete_versions() {
        let versions = vec!["2.18.0".to_string(), "2.17.1".into(), "3.0.0".into()];
        assert_eq!(complete_versions(&versions, "2."), vec!["2.17.1", "2.18.0"]);
        assert!(complete_versions(&versions, "4").is_empty());
    }

    #[test]
    fn test_local_repository_versions() {
        let repo = TempDir::new().unwrap();
        let core = Coordinate::new("org.apache.camel", "camel-core");
        let dir = repo.path().join("org/apache/camel/camel-core");
        for version in [
            "2.9.0",
            "2.17.0",
            "2.18.0-SNAPSHOT",
            "2.2.0.redhat-053",
            "2.17.0.redhat-630187",
        ] {
            fs::create_dir_all(dir.join(version)).unwrap();
        }

        let local = LocalRepository::new(repo.path());
        assert_eq!(
            local.versions(&core),
            vec!["2.9.0", "2.17.0", "2.17.0.redhat-630187"]
        );
        assert_eq!(local.latest_version(&core), "2.17.0.redhat-630187");
        assert_eq!(local.latest_redhat_version(&core), "2.17.0.redhat-630187");

        let missing = Coordinate::new("org.example", "missing");
        assert!(local.versions(&missing).is_empty());
        assert_eq!(local.latest_version(&missing), "");
    }

    #[test]
    fn test_artifact_path_and_gav() {
        let local = LocalRepository::new("/m2");
        let c = Coordinate::new("org.slf4j", "slf4j-api").with_version("1.7.21");
        assert_eq!(
            local.artifact_path(&c),
            Some(PathBuf::from("/m2/org/slf4j/slf4j-api/1.7.21/slf4j-api-1.7.21.jar"))
        );
        assert_eq!(format_gav("g", "a", "1"), "g:a:1");
    }
}
