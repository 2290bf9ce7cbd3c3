use std::path::Path;

use crate::error::AppError;

/// Migration-tool initialization. The tool creates its own folder and entry
/// script inside `base_path`; the pipeline overwrites that script afterwards.
pub trait MigrationTool {
    fn init(&self, base_path: &Path, folder: &str) -> Result<(), AppError>;
}
