//! fastapi-create: interactive FastAPI project scaffolding.
//!
//! The flow is strictly one-directional: wizard prompts build a
//! `ProjectConfiguration`, the build pipeline materializes it on disk, and
//! any failure or interrupt after that handoff is reversed by the rollback
//! handler before the process exits.

pub mod adapters;
pub mod cleanup;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod prompt;
pub mod render;
pub mod skeleton;
pub mod ui;
pub mod validate;
pub mod wizard;

use std::fs;
use std::path::{Path, PathBuf};

use adapters::{AlembicCommand, PipCommand};
use pipeline::BuildRunner;
use ports::{MigrationTool, PackageManager};
use prompt::{DialoguerPrompter, Prompter};
use render::Renderer;
use ui::Ui;

pub use error::AppError;

/// Create a new FastAPI project interactively, using the real terminal,
/// pip, and alembic collaborators.
pub fn create(project_name: &str) -> Result<(), AppError> {
    let ui = Ui::new();
    let mut prompter = DialoguerPrompter::new();
    let package_manager = PipCommand::new();
    let migration_tool = AlembicCommand::new();
    let renderer = Renderer::new()?;
    let cwd = std::env::current_dir()?;
    create_with(
        project_name,
        &cwd,
        &mut prompter,
        &package_manager,
        &migration_tool,
        &renderer,
        &ui,
    )
}

/// Full create flow with every collaborator injected.
///
/// Preconditions are checked before any prompt or side effect; once the
/// pipeline starts, every error path converges on [`cleanup::clean_up`].
pub fn create_with(
    project_name: &str,
    cwd: &Path,
    prompter: &mut dyn Prompter,
    package_manager: &dyn PackageManager,
    migration_tool: &dyn MigrationTool,
    renderer: &Renderer,
    ui: &Ui,
) -> Result<(), AppError> {
    let name = resolve_project_name(project_name, prompter)?;
    let base_path = generate_base_path(&name, cwd);
    check_preconditions(&base_path)?;

    let config = match wizard::run_wizard(prompter, ui) {
        Ok(config) => config,
        Err(err) => {
            cleanup::clean_up(&base_path, package_manager, &[], ui);
            return Err(err);
        }
    };

    let target = if name == "." { "current directory".to_string() } else { format!("'{name}'") };
    ui.step(&format!("Spinning up a new project in {target}..."));

    let display_name = project_display_name(&base_path, &name);
    let mut runner = BuildRunner::new(
        &config,
        &base_path,
        &display_name,
        package_manager,
        migration_tool,
        renderer,
        ui,
    );
    match runner.run() {
        Ok(()) => {
            ui.success(&format!("Project created at {}", base_path.display()));
            Ok(())
        }
        Err(err) => {
            cleanup::clean_up(&base_path, package_manager, runner.installed(), ui);
            Err(err)
        }
    }
}

/// Validate the name argument, prompting when it is empty.
///
/// An empty argument means "ask interactively"; blank answers re-prompt, but
/// an invalid non-empty value, whether from the CLI or the prompt, is fatal.
fn resolve_project_name(
    project_name: &str,
    prompter: &mut dyn Prompter,
) -> Result<String, AppError> {
    let name = if project_name.is_empty() {
        loop {
            let answer = prompter.input("Enter the project name", None, false)?;
            if !answer.is_empty() {
                break answer;
            }
        }
    } else {
        project_name.to_string()
    };
    if !validate::is_valid_project_name(&name) {
        return Err(AppError::InvalidProjectName(name));
    }
    Ok(name)
}

/// Resolve the target base path: `.` means the working directory itself.
fn generate_base_path(name: &str, cwd: &Path) -> PathBuf {
    if name == "." { cwd.to_path_buf() } else { cwd.join(name) }
}

fn project_display_name(base_path: &Path, name: &str) -> String {
    if name == "." {
        base_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.to_string())
    } else {
        name.to_string()
    }
}

/// Fatal target conflicts, reported before any side effect.
fn check_preconditions(base_path: &Path) -> Result<(), AppError> {
    match fs::metadata(base_path) {
        Ok(meta) if meta.is_file() => Err(AppError::TargetIsFile(base_path.to_path_buf())),
        Ok(meta) if meta.is_dir() => {
            let mut entries = fs::read_dir(base_path)?;
            if entries.next().is_some() {
                Err(AppError::TargetNotEmpty(base_path.to_path_buf()))
            } else {
                Ok(())
            }
        }
        Ok(_) => Err(AppError::TargetIsFile(base_path.to_path_buf())),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}
