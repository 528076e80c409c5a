//! API component plugin configuration operations
//!
//! Every operation loads `pom.xml`, edits the plugin's first execution
//! configuration in memory and writes the file once, after the edit
//! succeeded. A failed edit leaves the file untouched.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use super::apis::{self, API_NAME, PROXY_CLASS};
use super::error::{ConfigError, ConfigResult};
use super::ops::{OperationResult, OperationType};
use super::options::{
    require, Alias, ExcludeTarget, ExtraOption, JavadocConfig, NullableOption, Substitution,
};
use super::pattern::{has_balanced_parens, is_grouped};
use super::scope::ConfigScope;
use crate::apply::apply_plan;
use crate::backup::create_backup;
use crate::diff::ChangePlan;
use crate::pom::{Coordinate, Element, MavenProject, POM_FILE};

/// `org.apache.camel:camel-api-component-maven-plugin`
#[must_use]
pub fn api_component_plugin() -> Coordinate {
    Coordinate::new("org.apache.camel", "camel-api-component-maven-plugin")
}

/// A configured API as listed to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSummary {
    pub api_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_class: Option<String>,
}

/// Plugin configuration manager for one project
pub struct PluginOps {
    /// Directory holding `pom.xml`
    project_path: PathBuf,
    /// Backup directory; no backups when unset
    backup_dir: Option<PathBuf>,
}

impl PluginOps {
    #[must_use]
    pub fn new(project_path: PathBuf) -> Self {
        Self {
            project_path,
            backup_dir: None,
        }
    }

    /// Enable backups before each write
    #[must_use]
    pub fn with_backup_dir(mut self, dir: PathBuf) -> Self {
        self.backup_dir = Some(dir);
        self
    }

    /// Whether the API component plugin is configured
    ///
    /// # Errors
    /// Returns an error if `pom.xml` is missing or malformed
    pub fn is_installed(&self) -> ConfigResult<bool> {
        Ok(MavenProject::load(&self.project_path)?.is_plugin_installed(&api_component_plugin()))
    }

    /// Configured APIs in document order
    ///
    /// # Errors
    /// Returns an error if the project or plugin cannot be found
    pub fn list_apis(&self) -> ConfigResult<Vec<ApiSummary>> {
        let project = MavenProject::load(&self.project_path)?;
        let Some(configuration) = self.configuration(&project)? else {
            return Ok(Vec::new());
        };
        Ok(apis::api_elements(configuration)
            .filter_map(|api| {
                Some(ApiSummary {
                    api_name: api.child_text(API_NAME)?.to_string(),
                    proxy_class: api.child_text(PROXY_CLASS).map(String::from),
                })
            })
            .collect())
    }

    /// API names starting with `prefix`
    ///
    /// # Errors
    /// Returns an error if the project or plugin cannot be found
    pub fn complete_api_names(&self, prefix: &str) -> ConfigResult<Vec<String>> {
        let project = MavenProject::load(&self.project_path)?;
        Ok(self
            .configuration(&project)?
            .map(|configuration| apis::complete_api_names(configuration, prefix))
            .unwrap_or_default())
    }

    /// Add `api{apiName, proxyClass}`
    ///
    /// # Errors
    /// Returns `DuplicateApi` if the name exists
    pub fn add_api(
        &self,
        name: &str,
        proxy_class: &str,
        dry_run: bool,
    ) -> ConfigResult<OperationResult> {
        require("API name", name)?;
        require("Proxy class", proxy_class)?;
        self.edit(OperationType::AddApi, dry_run, |configuration| {
            apis::add_api(configuration, name, proxy_class)
        })
    }

    /// Remove an API entry with all its settings
    ///
    /// # Errors
    /// Returns `ApiNotFound` if no entry matches
    pub fn delete_api(&self, name: &str, dry_run: bool) -> ConfigResult<OperationResult> {
        self.edit(OperationType::DeleteApi, dry_run, |configuration| {
            apis::delete_api(configuration, name).map(|_| ())
        })
    }

    /// # Errors
    /// Returns `MissingApi` for an unknown API scope, or a validation error
    pub fn add_extra_option(
        &self,
        scope: &ConfigScope,
        option: &ExtraOption,
        dry_run: bool,
    ) -> ConfigResult<OperationResult> {
        option.validate()?;
        self.edit_scoped(
            OperationType::AddExtraOption,
            scope,
            ExtraOption::CONTAINER,
            dry_run,
            |c| option.write_to(c),
        )
    }

    /// Add a nullable option name unless it is already listed
    ///
    /// # Errors
    /// Returns `MissingApi` for an unknown API scope
    pub fn add_nullable_option(
        &self,
        scope: &ConfigScope,
        option: &str,
        dry_run: bool,
    ) -> ConfigResult<OperationResult> {
        require("Nullable option", option)?;
        let mut added = true;
        let result = self.edit_scoped(
            OperationType::AddNullableOption,
            scope,
            NullableOption::CONTAINER,
            dry_run,
            |c| added = NullableOption::write_to(option, c),
        )?;
        Ok(if added {
            result
        } else {
            result.with_warning(format!("Nullable option '{option}' already present"))
        })
    }

    /// # Errors
    /// Returns `MissingApi` for an unknown API scope, or a validation error
    pub fn add_substitution(
        &self,
        scope: &ConfigScope,
        substitution: &Substitution,
        dry_run: bool,
    ) -> ConfigResult<OperationResult> {
        substitution.validate()?;
        self.edit_scoped(
            OperationType::AddSubstitution,
            scope,
            Substitution::CONTAINER,
            dry_run,
            |c| substitution.write_to(c),
        )
    }

    /// # Errors
    /// Returns `MissingApi` for an unknown API scope, or a validation error
    pub fn add_alias(
        &self,
        scope: &ConfigScope,
        alias: &Alias,
        dry_run: bool,
    ) -> ConfigResult<OperationResult> {
        alias.validate()?;
        self.edit_scoped(OperationType::AddAlias, scope, Alias::CONTAINER, dry_run, |c| {
            alias.write_to(c);
        })
    }

    /// Upsert the `fromJavadoc` fields that are present
    ///
    /// # Errors
    /// Returns `MissingApi` for an unknown API scope
    pub fn add_from_javadoc(
        &self,
        scope: &ConfigScope,
        config: &JavadocConfig,
        dry_run: bool,
    ) -> ConfigResult<OperationResult> {
        self.edit_scoped(
            OperationType::AddFromJavadoc,
            scope,
            JavadocConfig::CONTAINER,
            dry_run,
            |c| config.write_to(c),
        )
    }

    /// # Errors
    /// Returns `MissingApi` for an unknown API scope
    pub fn include_static_methods(
        &self,
        scope: &ConfigScope,
        include: bool,
        dry_run: bool,
    ) -> ConfigResult<OperationResult> {
        self.edit_scoped(
            OperationType::IncludeStaticMethods,
            scope,
            JavadocConfig::CONTAINER,
            dry_run,
            |c| JavadocConfig::write_static_methods(include, c),
        )
    }

    /// Merge an exclusion regex into the selected element
    ///
    /// # Errors
    /// Returns `MissingApi` for an unknown API scope
    pub fn exclude(
        &self,
        scope: &ConfigScope,
        target: ExcludeTarget,
        regex: &str,
        append: bool,
        dry_run: bool,
    ) -> ConfigResult<OperationResult> {
        require("Regular expression", regex)?;
        let mut warning = None;
        let result = self.edit_scoped(target.operation(), scope, target.container(), dry_run, |c| {
            let existing = match target.child() {
                Some(child) => c.child_text(child),
                None => c.text(),
            };
            let unbalanced = |old: &&str| append && is_grouped(old) && !has_balanced_parens(old);
            if let Some(old) = existing.filter(unbalanced) {
                warning = Some(format!(
                    "Existing pattern '{old}' has unbalanced parentheses; appended without wrapping"
                ));
            }
            target.write_to(regex, append, c);
        })?;
        Ok(match warning {
            Some(w) => result.with_warning(w),
            None => result,
        })
    }

    /// Point an API at a signature file
    ///
    /// # Errors
    /// Returns `MissingApi` if the API does not exist
    pub fn add_from_signature_file(
        &self,
        api_name: &str,
        file: &str,
        dry_run: bool,
    ) -> ConfigResult<OperationResult> {
        require("Signature file", file)?;
        let scope = ConfigScope::Api(api_name.to_string());
        self.edit_scoped(
            OperationType::AddFromSignatureFile,
            &scope,
            "fromSignatureFile",
            dry_run,
            |c| {
                c.set_text(file);
            },
        )
    }

    /// Read-only configuration block; `None` while the plugin has none yet
    fn configuration<'a>(&self, project: &'a MavenProject) -> ConfigResult<Option<&'a Element>> {
        let plugin = api_component_plugin();
        if !project.is_plugin_installed(&plugin) {
            return Err(ConfigError::PluginNotFound {
                path: project.pom_path(),
            });
        }
        Ok(project.plugin_configuration(&plugin))
    }

    fn edit_scoped<F>(
        &self,
        operation: OperationType,
        scope: &ConfigScope,
        container: &str,
        dry_run: bool,
        write: F,
    ) -> ConfigResult<OperationResult>
    where
        F: FnOnce(&mut Element),
    {
        debug!(%operation, %scope, container, "scoped edit");
        let result = self.edit(operation, dry_run, |configuration| {
            let target = apis::resolve_target_element(configuration, container, scope)?;
            write(target);
            Ok(())
        })?;
        Ok(result.with_scope(scope.clone()))
    }

    /// Load, edit the plugin configuration, then diff, back up and write
    fn edit<F>(
        &self,
        operation: OperationType,
        dry_run: bool,
        edit: F,
    ) -> ConfigResult<OperationResult>
    where
        F: FnOnce(&mut Element) -> ConfigResult<()>,
    {
        let mut project = MavenProject::load(&self.project_path)?;
        let pom_path = project.pom_path();
        let original =
            fs::read_to_string(&pom_path).map_err(|e| ConfigError::from(e).at(&pom_path))?;

        let configuration = project
            .plugin_configuration_mut(&api_component_plugin())
            .ok_or_else(|| ConfigError::PluginNotFound {
                path: pom_path.clone(),
            })?;
        edit(configuration)?;

        let updated = project.to_xml_string()?;
        let mut plan = ChangePlan::new(&self.project_path);
        plan.modify(POM_FILE, &original, &updated);

        if dry_run {
            return Ok(OperationResult::dry_run(
                operation,
                plan.absolute_paths(),
                plan.combined_diff(),
            ));
        }

        let backup_id = commit_plan(&plan, self.backup_dir.as_deref(), operation)?;
        Ok(OperationResult::success(operation, plan.absolute_paths(), backup_id))
    }
}

/// Back up the files a plan touches, then apply it
///
/// Returns the backup id when a backup was written.
pub(crate) fn commit_plan(
    plan: &ChangePlan,
    backup_dir: Option<&Path>,
    operation: OperationType,
) -> ConfigResult<Option<String>> {
    let backup_id = match backup_dir {
        Some(dir) if !plan.is_empty() => {
            let backup = create_backup(plan, dir, operation.title())
                .map_err(|e| ConfigError::BackupFailed(e.to_string()))?;
            Some(backup.id.to_string())
        }
        _ => None,
    };
    apply_plan(plan).map_err(|e| ConfigError::IoError {
        path: plan.project_root.clone(),
        message: e.to_string(),
    })?;
    info!(%operation, files = plan.operations.len(), "changes applied");
    Ok(backup_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project>
    <modelVersion>4.0.0</modelVersion>
    <build>
        <plugins>
            <plugin>
                <groupId>org.apache.camel</groupId>
                <artifactId>camel-api-component-maven-plugin</artifactId>
                <executions>
                    <execution>
                        <id>generate-test-component-classes</id>
                        <goals>
                            <goal>fromApis</goal>
                        </goals>
                        <configuration>
                            <apis/>
                        </configuration>
                    </execution>
                </executions>
            </plugin>
        </plugins>
    </build>
</project>
"#;

    fn create_test_project(content: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("pom.xml"), content).unwrap();
        dir
    }

    fn read_configuration(dir: &TempDir) -> Element {
        let project = MavenProject::load(dir.path()).unwrap();
        project
            .plugin_configuration(&api_component_plugin())
            .unwrap()
            .clone()
    }

    #[test]
    fn test_add_api() {
        let dir = create_test_project(POM);
        let ops = PluginOps::new(dir.path().to_path_buf());

        let result = ops.add_api("testApi", "org.example.TestApi", false).unwrap();
        assert!(result.success);
        assert_eq!(
            result.message,
            "Command 'Api Component: Add Api' successfully executed!"
        );

        let apis = ops.list_apis().unwrap();
        assert_eq!(apis.len(), 1);
        assert_eq!(apis[0].api_name, "testApi");
        assert_eq!(apis[0].proxy_class.as_deref(), Some("org.example.TestApi"));
    }

    #[test]
    fn test_add_duplicate_api_fails() {
        let dir = create_test_project(POM);
        let ops = PluginOps::new(dir.path().to_path_buf());
        ops.add_api("testApi", "org.example.TestApi", false).unwrap();
        let before = fs::read_to_string(dir.path().join("pom.xml")).unwrap();

        let result = ops.add_api("testApi", "org.example.Other", false);
        assert!(matches!(result, Err(ConfigError::DuplicateApi { .. })));
        assert_eq!(ops.list_apis().unwrap().len(), 1);
        assert_eq!(fs::read_to_string(dir.path().join("pom.xml")).unwrap(), before);
    }

    #[test]
    fn test_add_api_dry_run() {
        let dir = create_test_project(POM);
        let ops = PluginOps::new(dir.path().to_path_buf());

        let result = ops.add_api("testApi", "org.example.TestApi", true).unwrap();
        assert!(result.success);
        assert!(result.backup_id.is_none());
        assert!(result.diff.unwrap().contains("+"));

        assert_eq!(fs::read_to_string(dir.path().join("pom.xml")).unwrap(), POM);
    }

    #[test]
    fn test_delete_api() {
        let dir = create_test_project(POM);
        let ops = PluginOps::new(dir.path().to_path_buf());
        ops.add_api("one", "org.example.One", false).unwrap();
        ops.add_api("two", "org.example.Two", false).unwrap();

        ops.delete_api("one", false).unwrap();
        let names: Vec<_> = ops.list_apis().unwrap().into_iter().map(|a| a.api_name).collect();
        assert_eq!(names, vec!["two"]);

        assert!(matches!(
            ops.delete_api("one", false),
            Err(ConfigError::ApiNotFound { .. })
        ));
    }

    #[test]
    fn test_scoped_option_for_missing_api_fails() {
        let dir = create_test_project(POM);
        let ops = PluginOps::new(dir.path().to_path_buf());

        let result = ops.add_alias(
            &ConfigScope::Api("nope".into()),
            &Alias::new("^get(.+)$", "$1"),
            false,
        );
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "Missing API name nope");
        assert_eq!(fs::read_to_string(dir.path().join("pom.xml")).unwrap(), POM);
    }

    #[test]
    fn test_global_and_api_scoped_options() {
        let dir = create_test_project(POM);
        let ops = PluginOps::new(dir.path().to_path_buf());
        ops.add_api("hello", "org.example.Hello", false).unwrap();

        ops.add_extra_option(
            &ConfigScope::Global,
            &ExtraOption::new("names", "java.util.List<String>"),
            false,
        )
        .unwrap();
        ops.add_nullable_option(&ConfigScope::Api("hello".into()), "body", false)
            .unwrap();
        let repeat = ops
            .add_nullable_option(&ConfigScope::Api("hello".into()), "body", false)
            .unwrap();
        assert_eq!(repeat.warnings.len(), 1);

        let xml = fs::read_to_string(dir.path().join("pom.xml")).unwrap();
        assert!(xml.contains("<![CDATA[java.util.List<String>]]>"));

        let configuration = read_configuration(&dir);
        assert!(configuration.has_child("extraOptions"));
        let hello = apis::find_api_by_name(configuration.child("apis").unwrap(), "hello").unwrap();
        assert_eq!(
            hello
                .child("nullableOptions")
                .unwrap()
                .children_named("nullableOption")
                .count(),
            1
        );
    }

    #[test]
    fn test_exclude_appends_regex() {
        let dir = create_test_project(POM);
        let ops = PluginOps::new(dir.path().to_path_buf());

        ops.exclude(&ConfigScope::Global, ExcludeTarget::JavadocMethods, "foo", true, false)
            .unwrap();
        let result = ops
            .exclude(&ConfigScope::Global, ExcludeTarget::JavadocMethods, "bar", true, false)
            .unwrap();
        assert_eq!(
            result.message,
            "Command 'Api Component: Exclude Javadoc Methods' successfully executed!"
        );
        ops.exclude(&ConfigScope::Global, ExcludeTarget::ConfigTypes, "int", true, false)
            .unwrap();

        let configuration = read_configuration(&dir);
        assert_eq!(
            configuration.child("fromJavadoc").unwrap().child_text("excludeMethods"),
            Some("(foo)|(bar)")
        );
        assert_eq!(configuration.child_text("excludeConfigTypes"), Some("int"));
    }

    #[test]
    fn test_signature_file_requires_api() {
        let dir = create_test_project(POM);
        let ops = PluginOps::new(dir.path().to_path_buf());

        assert!(matches!(
            ops.add_from_signature_file("hello", "src/signatures/hello.txt", false),
            Err(ConfigError::MissingApi { .. })
        ));

        ops.add_api("hello", "org.example.Hello", false).unwrap();
        ops.add_from_signature_file("hello", "src/signatures/hello.txt", false)
            .unwrap();
        let configuration = read_configuration(&dir);
        let hello = apis::find_api_by_name(configuration.child("apis").unwrap(), "hello").unwrap();
        assert_eq!(hello.child_text("fromSignatureFile"), Some("src/signatures/hello.txt"));
    }

    #[test]
    fn test_plugin_not_installed() {
        let dir = create_test_project("<project><modelVersion>4.0.0</modelVersion></project>");
        let ops = PluginOps::new(dir.path().to_path_buf());

        assert!(!ops.is_installed().unwrap());
        assert!(matches!(
            ops.add_api("hello", "org.example.Hello", false),
            Err(ConfigError::PluginNotFound { .. })
        ));
    }

    #[test]
    fn test_backup_created() {
        let dir = create_test_project(POM);
        let backups = TempDir::new().unwrap();
        let ops = PluginOps::new(dir.path().to_path_buf())
            .with_backup_dir(backups.path().to_path_buf());

        let result = ops.add_api("hello", "org.example.Hello", false).unwrap();
        let id = result.backup_id.unwrap();
        assert!(backups.path().join(format!("{id}.json")).exists());
    }
}
