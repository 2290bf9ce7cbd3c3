mod migration_tool;
mod package_manager;

pub use migration_tool::MigrationTool;
pub use package_manager::PackageManager;
