use std::path::Path;
use std::process::Command;

use crate::error::AppError;
use crate::ports::MigrationTool;

/// `alembic init`-backed migration tool adapter.
#[derive(Debug, Default)]
pub struct AlembicCommand;

impl AlembicCommand {
    pub fn new() -> Self {
        Self
    }
}

impl MigrationTool for AlembicCommand {
    fn init(&self, base_path: &Path, folder: &str) -> Result<(), AppError> {
        let output = Command::new("alembic")
            .args(["init", folder])
            .current_dir(base_path)
            .output()
            .map_err(|e| AppError::MigrationInitFailed(e.to_string()))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(AppError::MigrationInitFailed(if stderr.is_empty() {
                "Unknown error".to_string()
            } else {
                stderr
            }));
        }
        Ok(())
    }
}
