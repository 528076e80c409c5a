//! Class name completion from dependency jars

use std::fs::File;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;
use tracing::{debug, warn};
use zip::ZipArchive;

use crate::pom::{Coordinate, MavenProject};
use crate::versions::LocalRepository;

/// Errors while reading a jar
#[derive(Error, Debug)]
pub enum ClassScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

fn excluded_groups() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(org.apache.camel)|(org.slf4j)|(org.apache.log4j)")
            .expect("Invalid excluded groups regex")
    })
}

/// Dotted names of every `.class` entry in a jar
///
/// # Errors
/// Returns an error if the jar cannot be opened
pub fn jar_class_names(jar: &Path) -> Result<Vec<String>, ClassScanError> {
    let archive = ZipArchive::new(File::open(jar)?)?;
    Ok(archive
        .file_names()
        .filter(|name| !name.ends_with('/'))
        .filter_map(|name| name.strip_suffix(".class"))
        .map(|name| name.replace('/', "."))
        .collect())
}

/// Class names available from a project's dependencies
#[derive(Debug, Default, Clone)]
pub struct ClassCompleter {
    class_names: Vec<String>,
}

impl ClassCompleter {
    /// Scan managed and direct dependency jars in the local repository
    ///
    /// Camel, SLF4J and Log4j artifacts are skipped, as are jars that are not
    /// installed locally.
    #[must_use]
    pub fn scan(project: &MavenProject, repository: &LocalRepository) -> Self {
        let mut class_names = Vec::new();
        let mut dependencies = project.managed_dependencies();
        dependencies.extend(project.dependencies());

        for mut coordinate in dependencies {
            if excluded_groups().is_match(&coordinate.group_id) {
                continue;
            }
            coordinate.version = coordinate.version.map(|v| project.resolve_properties(&v));
            let Some(jar) = jar_path(repository, &coordinate) else {
                warn!(%coordinate, "dependency jar not found locally, skipping");
                continue;
            };
            match jar_class_names(&jar) {
                Ok(names) => {
                    debug!(%coordinate, count = names.len(), "scanned jar");
                    class_names.extend(names);
                }
                Err(e) => warn!(%coordinate, error = %e, "cannot read dependency jar"),
            }
        }

        class_names.sort();
        class_names.dedup();
        Self { class_names }
    }

    /// Class names starting with `prefix`
    #[must_use]
    pub fn complete(&self, prefix: &str) -> Vec<String> {
        self.class_names
            .iter()
            .filter(|name| name.starts_with(prefix))
            .cloned()
            .collect()
    }
}

fn jar_path(repository: &LocalRepository, coordinate: &Coordinate) -> Option<std::path::PathBuf> {
    repository
        .artifact_path(coordinate)
        .filter(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pom::PomDocument;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_jar(path: &Path, entries: &[&str]) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut zip = zip::ZipWriter::new(File::create(path).unwrap());
        let options = zip::write::FileOptions::default();
        for entry in entries {
            if entry.ends_with('/') {
                zip.add_directory(*entry, options).unwrap();
            } else {
                zip.start_file(*entry, options).unwrap();
                zip.write_all(b"\xCA\xFE\xBA\xBE").unwrap();
            }
        }
        zip.finish().unwrap();
    }

    #[test]
    fn test_jar_class_names() {
        let dir = TempDir::new().unwrap();
        let jar = dir.path().join("a.jar");
        write_jar(&jar, &["com/", "com/example/Api.class", "META-INF/MANIFEST.MF"]);

        assert_eq!(jar_class_names(&jar).unwrap(), vec!["com.example.Api"]);
    }

    #[test]
    fn test_scan_skips_excluded_and_missing() {
        let repo = TempDir::new().unwrap();
        write_jar(
            &repo.path().join("com/example/hello-api/1.0/hello-api-1.0.jar"),
            &["com/example/hello/HelloApi.class", "com/example/hello/Greeting.class"],
        );
        write_jar(
            &repo.path().join("org/slf4j/slf4j-api/1.7.21/slf4j-api-1.7.21.jar"),
            &["org/slf4j/Logger.class"],
        );

        let pom = r"<project>
            <properties><hello.version>1.0</hello.version></properties>
            <dependencies>
                <dependency><groupId>com.example</groupId><artifactId>hello-api</artifactId><version>${hello.version}</version></dependency>
                <dependency><groupId>org.slf4j</groupId><artifactId>slf4j-api</artifactId><version>1.7.21</version></dependency>
                <dependency><groupId>com.example</groupId><artifactId>absent</artifactId><version>2.0</version></dependency>
            </dependencies>
        </project>";
        let project = MavenProject::from_document(repo.path(), PomDocument::parse(pom).unwrap());

        let completer = ClassCompleter::scan(&project, &LocalRepository::new(repo.path()));
        assert_eq!(
            completer.complete("com.example.hello.H"),
            vec!["com.example.hello.HelloApi"]
        );
        assert!(completer.complete("org.slf4j").is_empty());
        assert_eq!(completer.complete("").len(), 2);
    }
}
