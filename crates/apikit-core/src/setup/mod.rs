//! API component project setup
//!
//! Turns a plain Maven project into a Camel API component project: POM
//! properties, dependencies and plugins, plus the component source skeleton
//! rendered from built-in templates. The whole change is planned first, so a
//! dry run shows exactly what a real run writes.

mod templates;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use handlebars::Handlebars;
use regex::Regex;
use serde_json::json;
use tracing::{debug, info};

use crate::config::{
    api_component_plugin, commit_plan, require, ConfigError, ConfigResult, OperationResult,
    OperationType,
};
use crate::diff::{format_plan_terminal, ChangePlan, WarningSeverity};
use crate::pom::{Coordinate, Element, MavenProject, POM_FILE};
use crate::settings::Settings;
use crate::util::{capitalize, package_dir, validate_name};
use crate::versions::{format_gav, LocalRepository};

/// Camel version used when nothing else resolves one
pub const DEFAULT_CAMEL_VERSION: &str = "2.17.0";

/// Message returned when the plugin is already configured
pub const ALREADY_SETUP: &str = "Api Component is already setup!";

const UTF_8: &str = "UTF-8";
const CAMEL_GROUP: &str = "org.apache.camel";
const COMPONENT_RESOURCE_DIR: &str = "META-INF/services/org/apache/camel/component";

fn java_package_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*(\.[A-Za-z_$][A-Za-z0-9_$]*)*$")
            .expect("Invalid java package regex")
    })
}

/// Project setup for one project directory
pub struct ProjectSetup {
    settings: Settings,
    project_path: PathBuf,
    handlebars: Handlebars<'static>,
}

impl ProjectSetup {
    #[must_use]
    pub fn new(settings: Settings, project_path: PathBuf) -> Self {
        let mut handlebars = Handlebars::new();
        // generating Java and properties files, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);

        Self {
            settings,
            project_path,
            handlebars,
        }
    }

    /// Configure the project as an API component named `name`
    ///
    /// The name is capitalized for class names. Existing source files are
    /// never overwritten, and a project that already has the API component
    /// plugin is left unchanged.
    ///
    /// # Errors
    /// Returns an error for invalid input, a missing or malformed `pom.xml`,
    /// or a failed write
    pub fn apply(
        &self,
        name: &str,
        scheme: &str,
        package: &str,
        camel_version: Option<&str>,
        dry_run: bool,
    ) -> ConfigResult<OperationResult> {
        require("Component name", name)?;
        require("Component scheme", scheme)?;
        require("Component package", package)?;
        validate_name(scheme)
            .map_err(|e| ConfigError::ValidationError(format!("Invalid component scheme: {e}")))?;
        if !java_package_regex().is_match(package) {
            return Err(ConfigError::ValidationError(format!(
                "Invalid component package: {package}"
            )));
        }

        let mut project = MavenProject::load(&self.project_path)?;
        if project.is_plugin_installed(&api_component_plugin()) {
            info!(path = %self.project_path.display(), "api component already set up");
            return Ok(OperationResult::success(OperationType::Setup, Vec::new(), None)
                .with_message(ALREADY_SETUP));
        }

        let pom_path = project.pom_path();
        let original =
            fs::read_to_string(&pom_path).map_err(|e| ConfigError::from(e).at(&pom_path))?;

        let component = Component {
            name: capitalize(name.trim()),
            scheme: scheme.trim().to_string(),
            package: package.trim().to_string(),
            camel_version: self.resolve_camel_version(camel_version),
        };
        debug!(name = %component.name, version = %component.camel_version, "setting up component");

        self.configure_project(&mut project, &component);

        let mut plan = ChangePlan::new(&self.project_path);
        plan.modify(POM_FILE, &original, &project.to_xml_string()?);
        self.plan_resources(&mut plan, &component)?;

        if dry_run {
            return Ok(OperationResult::dry_run(
                OperationType::Setup,
                plan.absolute_paths(),
                format_plan_terminal(&plan),
            ));
        }

        let warnings: Vec<String> = plan.warnings.iter().map(|w| w.message.clone()).collect();
        let backup_id = commit_plan(
            &plan,
            self.settings.backup_dir().as_deref(),
            OperationType::Setup,
        )?;

        let mut result =
            OperationResult::success(OperationType::Setup, plan.absolute_paths(), backup_id);
        result.warnings = warnings;
        Ok(result)
    }

    /// Camel version for a new component
    ///
    /// Explicit argument, then settings, then the newest usable
    /// `camel-core` in the local repository, then [`DEFAULT_CAMEL_VERSION`].
    #[must_use]
    pub fn resolve_camel_version(&self, explicit: Option<&str>) -> String {
        if let Some(version) = explicit.map(str::trim).filter(|v| !v.is_empty()) {
            return version.to_string();
        }
        if let Some(version) = &self.settings.versions.camel {
            return version.clone();
        }
        let newest = LocalRepository::new(&self.settings.local_repository)
            .versions(&Coordinate::new(CAMEL_GROUP, "camel-core"))
            .pop();
        match newest {
            Some(version) => {
                let gav = format_gav(CAMEL_GROUP, "camel-core", &version);
                debug!(%gav, "newest local camel");
                version
            }
            None => DEFAULT_CAMEL_VERSION.to_string(),
        }
    }

    fn configure_project(&self, project: &mut MavenProject, component: &Component) {
        set_project_properties(project, component);
        self.add_dependencies(project, component);
        add_managed_plugin(project, component);
        self.add_plugins(project, component);
        add_reporting(project);
    }

    fn add_dependencies(&self, project: &mut MavenProject, component: &Component) {
        let versions = &self.settings.versions;
        let camel = |artifact: &str| {
            Coordinate::new(CAMEL_GROUP, artifact).with_version(component.camel_version.as_str())
        };
        let slf4j = |artifact: &str| {
            Coordinate::new("org.slf4j", artifact).with_version(versions.slf4j.as_str())
        };

        for dependency in [
            camel("camel-core"),
            camel("apt"),
            camel("spi-annotations").with_scope("provided"),
            slf4j("slf4j-api"),
            slf4j("slf4j-log4j12").with_scope("test"),
            Coordinate::new("log4j", "log4j")
                .with_version(versions.log4j.as_str())
                .with_scope("test"),
            camel("camel-test").with_scope("test"),
        ] {
            project.add_dependency_if_absent(&dependency);
        }
    }

    fn add_plugins(&self, project: &mut MavenProject, component: &Component) {
        let versions = &self.settings.versions;

        project.add_plugin_if_absent(
            plugin("org.apache.maven.plugins", "maven-compiler-plugin", &versions.compiler_plugin)
                .with_child(
                    Element::new("configuration")
                        .with_child(Element::with_text("source", versions.java.as_str()))
                        .with_child(Element::with_text("target", versions.java.as_str())),
                ),
        );

        project.add_plugin_if_absent(
            plugin("org.apache.maven.plugins", "maven-resources-plugin", &versions.resources_plugin)
                .with_child(
                    Element::new("configuration").with_child(Element::with_text("encoding", UTF_8)),
                ),
        );

        project.add_plugin_if_absent(
            plugin("org.apache.felix", "maven-bundle-plugin", &versions.bundle_plugin)
                .with_child(Element::with_text("extensions", "true"))
                .with_child(Element::new("configuration").with_child(bundle_instructions())),
        );

        project.add_plugin_if_absent(
            plugin(CAMEL_GROUP, "camel-api-component-maven-plugin", &component.camel_version)
                .with_child(Element::new("executions").with_child(execution(
                    "generate-component-classes",
                    "fromApis",
                    None,
                    Some(Element::new("configuration").with_child(Element::new("apis"))),
                ))),
        );

        let sources = |dir: &str| {
            let source = format!("${{project.build.directory}}/{dir}/camel-component");
            Element::new("configuration").with_child(
                Element::new("sources").with_child(Element::with_text("source", source)),
            )
        };
        project.add_plugin_if_absent(
            plugin("org.codehaus.mojo", "build-helper-maven-plugin", &versions.build_helper_plugin)
                .with_child(
                    Element::new("executions")
                        .with_child(execution(
                            "add-generated-sources",
                            "add-source",
                            None,
                            Some(sources("generated-sources")),
                        ))
                        .with_child(execution(
                            "add-generated-test-sources",
                            "add-test-source",
                            None,
                            Some(sources("generated-test-sources")),
                        )),
                ),
        );

        project.add_plugin_if_absent(
            plugin(CAMEL_GROUP, "camel-package-maven-plugin", &component.camel_version).with_child(
                Element::new("executions")
                    .with_child(execution(
                        "prepare",
                        "prepare-components",
                        Some("generate-resources"),
                        None,
                    ))
                    .with_child(execution(
                        "validate",
                        "validate-components",
                        Some("prepare-package"),
                        None,
                    )),
            ),
        );
    }

    /// Plan every template file that does not exist yet
    fn plan_resources(&self, plan: &mut ChangePlan, component: &Component) -> ConfigResult<()> {
        let context = json!({
            "name": component.name,
            "scheme": component.scheme,
            "package": component.package,
        });
        let name = &component.name;
        let main_java = Path::new("src/main/java").join(package_dir(&component.package));
        let test_java = Path::new("src/test/java").join(package_dir(&component.package));
        let internal = main_java.join("internal");

        let files = [
            (main_java.join(format!("{name}Component.java")), templates::COMPONENT),
            (main_java.join(format!("{name}Configuration.java")), templates::CONFIGURATION),
            (main_java.join(format!("{name}Consumer.java")), templates::CONSUMER),
            (main_java.join(format!("{name}Endpoint.java")), templates::ENDPOINT),
            (main_java.join(format!("{name}Producer.java")), templates::PRODUCER),
            (internal.join(format!("{name}Constants.java")), templates::CONSTANTS),
            (internal.join(format!("{name}PropertiesHelper.java")), templates::PROPERTIES_HELPER),
            (test_java.join(format!("Abstract{name}TestSupport.java")), templates::TEST_SUPPORT),
            (
                Path::new("src/main/resources")
                    .join(COMPONENT_RESOURCE_DIR)
                    .join(&component.scheme),
                templates::COMPONENT_SERVICE,
            ),
            (PathBuf::from("src/test/resources/log4j.properties"), templates::LOG4J_PROPERTIES),
            (PathBuf::from("src/test/resources/test-options.properties"), templates::TEST_OPTIONS),
        ];

        for (path, template) in files {
            if self.project_path.join(&path).exists() {
                plan.warn(
                    WarningSeverity::Info,
                    format!("{} already exists, not overwritten", path.display()),
                );
                continue;
            }
            let content = self
                .handlebars
                .render_template(template, &context)
                .map_err(|e| ConfigError::TemplateError {
                    name: path.display().to_string(),
                    message: e.to_string(),
                })?;
            plan.create(path, content);
        }
        Ok(())
    }
}

/// Validated setup input
struct Component {
    name: String,
    scheme: String,
    package: String,
    camel_version: String,
}

fn set_project_properties(project: &mut MavenProject, component: &Component) {
    let name = &component.name;
    project.set_if_absent("name", &format!("Camel {name} Component"));
    project.set_if_absent("description", &format!("Camel Component for {name}"));
    project
        .root_mut()
        .get_or_create_child_with_content("packaging", "bundle");

    let out_package = format!("{}.internal", component.package);
    for (property, value) in [
        ("schemeName", component.scheme.as_str()),
        ("componentName", name.as_str()),
        ("componentPackage", component.package.as_str()),
        ("outPackage", out_package.as_str()),
        ("project.build.sourceEncoding", UTF_8),
        ("project.build.outputEncoding", UTF_8),
    ] {
        project.set_property(property, value);
    }
}

/// Managed API plugin carrying the component settings as property references
fn add_managed_plugin(project: &mut MavenProject, component: &Component) {
    let configuration = Element::new("configuration")
        .with_child(Element::with_text("scheme", "${schemeName}"))
        .with_child(Element::with_text("componentName", "${componentName}"))
        .with_child(Element::with_text("componentPackage", "${componentPackage}"))
        .with_child(Element::with_text("outPackage", "${outPackage}"));

    project.add_managed_plugin_if_absent(
        plugin(CAMEL_GROUP, "camel-api-component-maven-plugin", &component.camel_version)
            .with_child(configuration),
    );
}

/// Report plugin copied from the managed API plugin
fn add_reporting(project: &mut MavenProject) {
    let Some(managed) = project.find_managed_plugin(&api_component_plugin()) else {
        return;
    };
    let mut report = Element::new("plugin");
    for field in ["groupId", "artifactId", "version", "configuration"] {
        if let Some(child) = managed.child(field) {
            report.append_child(child.clone());
        }
    }

    let plugins = project
        .root_mut()
        .get_or_create_child("reporting")
        .get_or_create_child("plugins");
    let coordinate = api_component_plugin();
    plugins.remove_child_where(|p| {
        Coordinate::from_element(p).is_some_and(|c| c.same_artifact(&coordinate))
    });
    plugins.append_child(report);
}

fn plugin(group_id: &str, artifact_id: &str, version: &str) -> Element {
    Coordinate::new(group_id, artifact_id)
        .with_version(version)
        .to_element("plugin")
}

fn execution(id: &str, goal: &str, phase: Option<&str>, configuration: Option<Element>) -> Element {
    let mut execution = Element::new("execution").with_child(Element::with_text("id", id));
    if let Some(phase) = phase {
        execution = execution.with_child(Element::with_text("phase", phase));
    }
    execution =
        execution.with_child(Element::new("goals").with_child(Element::with_text("goal", goal)));
    if let Some(configuration) = configuration {
        execution = execution.with_child(configuration);
    }
    execution
}

/// OSGi bundle instructions for the component
fn bundle_instructions() -> Element {
    [
        ("Bundle-Name", "Camel Component for ${componentName}"),
        ("Bundle-SymbolicName", "${project.groupId}.${project.artifactId}"),
        ("Export-Service", "org.apache.camel.spi.ComponentResolver;component=${schemeName}"),
        ("Export-Package", "${componentPackage};version=${project.version}"),
        (
            "Import-Package",
            "${componentPackage}.api;version=${project.version},\
             ${componentPackage};version=${project.version},\
             org.apache.camel.*;version=${camel-version}",
        ),
        ("Private-Package", "${outPackage}"),
        ("Implementation-Title", "Apache Camel"),
        ("Implementation-Version", "${project.version}"),
        ("Karaf-Info", "Camel;${project.artifactId}=${project.version}"),
        ("_versionpolicy", "[$(version;==;$(@)),$(version;+;$(@)))"),
        ("_failok", "false"),
    ]
    .into_iter()
    .fold(Element::new("instructions"), |instructions, (name, text)| {
        instructions.with_child(Element::with_text(name, text))
    })
}
