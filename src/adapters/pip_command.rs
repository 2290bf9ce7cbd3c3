use std::process::Command;

use crate::error::AppError;
use crate::ports::PackageManager;

/// `pip`-backed package manager adapter.
#[derive(Debug, Default)]
pub struct PipCommand;

impl PipCommand {
    pub fn new() -> Self {
        Self
    }

    fn run(&self, args: &[&str]) -> Result<String, AppError> {
        let output = Command::new("pip").args(args).output().map_err(|e| {
            AppError::InstallFailed {
                dependency: args.join(" "),
                details: e.to_string(),
            }
        })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(AppError::InstallFailed {
                dependency: args.join(" "),
                details: if stderr.is_empty() { "Unknown error".to_string() } else { stderr },
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl PackageManager for PipCommand {
    fn install(&self, package: &str) -> Result<(), AppError> {
        self.run(&["install", package]).map_err(|err| match err {
            AppError::InstallFailed { details, .. } => {
                AppError::InstallFailed { dependency: package.to_string(), details }
            }
            other => other,
        })?;
        Ok(())
    }

    fn uninstall(&self, package: &str) -> Result<(), AppError> {
        self.run(&["uninstall", "-y", package])?;
        Ok(())
    }

    fn freeze(&self) -> Result<Vec<String>, AppError> {
        let stdout = self.run(&["freeze"])?;
        Ok(stdout.lines().map(str::to_string).filter(|line| !line.is_empty()).collect())
    }
}
