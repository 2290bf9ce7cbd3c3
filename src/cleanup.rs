//! Rollback handler: restores the pre-invocation filesystem state after any
//! fatal error or interrupt.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::ports::PackageManager;
use crate::ui::Ui;

/// Undo partial build effects under `base_path`.
///
/// Installed packages are uninstalled first, preferring the on-disk
/// `requirements.txt` manifest over the in-memory list when it is readable.
/// Uninstall failures are reported and skipped. The target tree is then
/// deleted, tolerating entries that never came into existence.
pub fn clean_up(
    base_path: &Path,
    package_manager: &dyn PackageManager,
    installed: &[String],
    ui: &Ui,
) {
    if !base_path.exists() {
        return;
    }
    ui.step("Cleaning up the project...");

    for package in packages_to_remove(base_path, installed) {
        if let Err(err) = package_manager.uninstall(&package) {
            ui.warn(&format!("Failed to uninstall {package}: {err}"));
        }
    }

    if let Err(err) = fs::remove_dir_all(base_path)
        && err.kind() != ErrorKind::NotFound
        && base_path.exists()
    {
        ui.warn(&format!("Failed to remove {}: {err}", base_path.display()));
        return;
    }
    ui.success("Clean up completed");
}

fn packages_to_remove(base_path: &Path, installed: &[String]) -> Vec<String> {
    let manifest = base_path.join("requirements.txt");
    if let Ok(content) = fs::read_to_string(&manifest) {
        let packages: Vec<String> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        if !packages.is_empty() {
            return packages;
        }
    }
    installed.to_vec()
}
