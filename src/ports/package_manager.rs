use crate::error::AppError;

/// External package-manager operations the build pipeline depends on.
///
/// Installs and uninstalls are independent blocking process calls; `freeze`
/// reports the environment's installed package list for the manifest file.
pub trait PackageManager {
    fn install(&self, package: &str) -> Result<(), AppError>;

    fn uninstall(&self, package: &str) -> Result<(), AppError>;

    /// One entry per installed package, as the manifest file records them.
    fn freeze(&self) -> Result<Vec<String>, AppError>;
}
