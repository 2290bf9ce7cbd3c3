//! Build pipeline: the ordered side-effecting steps that materialize a
//! project from a finished configuration.
//!
//! Generation steps are data (`GenerateStep`), so the plan can be inspected
//! and the pipeline replayed against fake collaborators in tests. Later
//! steps reference files written by earlier ones; the order is fixed.

use std::fs;
use std::path::Path;

use minijinja::{Value, context};

use crate::config::{AuthField, ProjectConfiguration};
use crate::error::AppError;
use crate::ports::{MigrationTool, PackageManager};
use crate::render::Renderer;
use crate::skeleton;
use crate::ui::Ui;

/// One named unit of project generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateStep {
    /// Render a bundled template and overwrite `dest` (relative to the base
    /// path) with the result.
    Render { template: &'static str, dest: String },
    /// Run the migration tool's init command; its generated entry script is
    /// overwritten by the following render step.
    InitMigrations { folder: String },
}

/// The ordered generation plan for a configuration.
pub fn generate_steps(config: &ProjectConfiguration) -> Vec<GenerateStep> {
    let render = |template: &'static str, dest: &str| GenerateStep::Render {
        template,
        dest: dest.to_string(),
    };

    let mut steps = vec![
        render("db_config.py.jinja", "app/db/config.py"),
        render("init_db.py.jinja", "app/db/init_db.py"),
        render("models.py.jinja", "app/db/models.py"),
    ];
    if config.smtp_enabled() {
        steps.push(render("messages.py.jinja", "app/core/utils/messages.py"));
    }
    steps.push(render("core_config.py.jinja", "app/core/config.py"));
    steps.push(render("dependencies.py.jinja", "app/core/dependencies.py"));
    if let Some(folder) = &config.migrations_folder {
        steps.push(GenerateStep::InitMigrations { folder: folder.clone() });
        steps.push(render("alembic_env.py.jinja", &format!("{folder}/env.py")));
    }
    steps.push(render("main.py.jinja", "app/main.py"));
    steps.push(render("manage.py.jinja", "manage.py"));
    steps.push(render("README.md.jinja", "README.md"));
    if config.auth_enabled() {
        steps.push(render("security.py.jinja", "app/core/utils/security.py"));
        steps.push(render("validators.py.jinja", "app/core/utils/validators.py"));
        // Overwrites the bare declarative base written above with the full
        // auth model module.
        steps.push(render("auth_models.py.jinja", "app/db/models.py"));
        steps.push(render("auth_router.py.jinja", "app/routes/auth.py"));
        steps.push(render("auth_schema.py.jinja", "app/schemas/auth.py"));
    }
    steps
}

/// The parameter bag shared by every template.
pub fn template_context(config: &ProjectConfiguration, project_name: &str) -> Value {
    let auth = config.auth.as_ref();
    context! {
        project_name => project_name,
        is_async => config.is_async(),
        database_url => config.database.url.clone(),
        smtp_enabled => config.smtp_enabled(),
        cors_enabled => config.cors_enabled,
        auth_enabled => config.auth_enabled(),
        verification_enabled => config.verification_enabled(),
        auth_system => auth.map(|a| a.system.as_str()).unwrap_or(""),
        auth_model => auth.map(|a| a.model.as_str()).unwrap_or(""),
        login_field => auth.map(|a| a.login_field.as_str()).unwrap_or(""),
        email_is_required => auth.is_some_and(|a| a.requires(AuthField::Email)),
        username_is_required => auth.is_some_and(|a| a.requires(AuthField::Username)),
        phone_is_required => auth.is_some_and(|a| a.requires(AuthField::Phone)),
    }
}

/// Executes the pipeline against a base path, recording installed packages
/// for rollback.
pub struct BuildRunner<'a> {
    config: &'a ProjectConfiguration,
    base_path: &'a Path,
    project_name: String,
    package_manager: &'a dyn PackageManager,
    migration_tool: &'a dyn MigrationTool,
    renderer: &'a Renderer,
    ui: &'a Ui,
    installed: Vec<String>,
}

impl<'a> BuildRunner<'a> {
    pub fn new(
        config: &'a ProjectConfiguration,
        base_path: &'a Path,
        project_name: &str,
        package_manager: &'a dyn PackageManager,
        migration_tool: &'a dyn MigrationTool,
        renderer: &'a Renderer,
        ui: &'a Ui,
    ) -> Self {
        Self {
            config,
            base_path,
            project_name: project_name.to_string(),
            package_manager,
            migration_tool,
            renderer,
            ui,
            installed: Vec::new(),
        }
    }

    /// Packages installed so far; consulted by rollback when the manifest
    /// file was never written.
    pub fn installed(&self) -> &[String] {
        &self.installed
    }

    /// Run every pipeline step in order. The first failure aborts the run;
    /// the caller owns rollback.
    pub fn run(&mut self) -> Result<(), AppError> {
        skeleton::create_skeleton(self.base_path, self.ui)?;
        self.install_dependencies()?;
        self.write_env()?;

        let ctx = template_context(self.config, &self.project_name);
        for step in generate_steps(self.config) {
            match step {
                GenerateStep::Render { template, dest } => self.write_rendered(template, &dest, &ctx)?,
                GenerateStep::InitMigrations { folder } => {
                    self.ui.step("Initializing Alembic...");
                    self.migration_tool.init(self.base_path, &folder)?;
                    self.ui.success("Alembic initialized successfully");
                }
            }
        }
        Ok(())
    }

    fn install_dependencies(&mut self) -> Result<(), AppError> {
        self.ui.step("Installing project dependencies...");
        for dependency in self.config.resolve_dependencies() {
            self.package_manager.install(&dependency)?;
            self.installed.push(dependency);
        }
        self.ui.success("Dependencies installed successfully");

        self.ui.step("Generating requirements.txt content...");
        let frozen = self.package_manager.freeze()?;
        let mut manifest = frozen.join("\n");
        manifest.push('\n');
        fs::write(self.base_path.join("requirements.txt"), manifest)?;
        self.ui.success("requirements.txt content generated successfully");
        Ok(())
    }

    fn write_env(&self) -> Result<(), AppError> {
        let env_path = self.base_path.join(".env");
        skeleton::set_env_key(&env_path, "DATABASE_URL", &self.config.database.url)?;
        if let Some(smtp) = &self.config.smtp {
            skeleton::set_env_key(&env_path, "SMTP_HOST", &smtp.host)?;
            skeleton::set_env_key(&env_path, "SMTP_PORT", &smtp.port.to_string())?;
            skeleton::set_env_key(&env_path, "SMTP_LOGIN", &smtp.username)?;
            skeleton::set_env_key(&env_path, "SMTP_PASSWORD", &smtp.password)?;
        }
        Ok(())
    }

    fn write_rendered(&self, template: &str, dest: &str, ctx: &Value) -> Result<(), AppError> {
        self.ui.step(&format!("Writing {dest} to the project..."));
        // Render fully in memory before touching the file.
        let content = self.renderer.render(template, ctx)?;
        let path = self.base_path.join(dest);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        self.ui.success(&format!("{dest} written successfully"));
        Ok(())
    }
}
