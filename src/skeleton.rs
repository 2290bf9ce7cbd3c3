//! Fixed project skeleton, secret key generation, and env-file edits.

use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::AppError;
use crate::ui::Ui;

/// Directory layout with the empty placeholder files created before any
/// generated content is written.
pub const PROJECT_STRUCTURE: &[(&str, &[&str])] = &[
    ("", &[".env", "README.md", "requirements.txt", "manage.py"]),
    ("app", &["__init__.py", "main.py"]),
    ("app/core", &["__init__.py", "config.py", "dependencies.py"]),
    ("app/core/utils", &["__init__.py", "security.py", "messages.py", "validators.py"]),
    ("app/db", &["config.py", "init_db.py", "models.py"]),
    ("app/schemas", &["__init__.py"]),
    ("app/routes", &["__init__.py"]),
];

/// Create the skeleton tree and write a fresh `SECRET_KEY` into `.env`.
pub fn create_skeleton(base_path: &Path, ui: &Ui) -> Result<(), AppError> {
    ui.step("Creating project skeleton...");
    for (dir_path, files) in PROJECT_STRUCTURE {
        let directory = base_path.join(dir_path);
        fs::create_dir_all(&directory)?;
        for file_name in *files {
            fs::write(directory.join(file_name), "")?;
        }
    }
    set_env_key(&base_path.join(".env"), "SECRET_KEY", &generate_secret_key()?)?;
    ui.success(&format!("Created project skeleton at {}", base_path.display()));
    Ok(())
}

/// 64 hex chars derived from 32 bytes of OS entropy.
pub fn generate_secret_key() -> Result<String, AppError> {
    let mut seed = [0u8; 32];
    getrandom::getrandom(&mut seed)
        .map_err(|e| AppError::internal(format!("entropy source unavailable: {e}")))?;
    let mut hasher = Sha256::new();
    hasher.update(seed);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Set `KEY=value` in an env file: replace the existing line or append one.
pub fn set_env_key(env_path: &Path, key: &str, value: &str) -> Result<(), AppError> {
    let existing = match fs::read_to_string(env_path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(err) => return Err(err.into()),
    };

    let prefix = format!("{key}=");
    let mut lines: Vec<String> =
        existing.lines().filter(|line| !line.is_empty()).map(str::to_string).collect();
    match lines.iter_mut().find(|line| line.starts_with(&prefix)) {
        Some(line) => *line = format!("{key}={value}"),
        None => lines.push(format!("{key}={value}")),
    }

    let mut content = lines.join("\n");
    content.push('\n');
    fs::write(env_path, content)?;
    Ok(())
}

/// Read a key back from an env file.
pub fn get_env_key(env_path: &Path, key: &str) -> Result<Option<String>, AppError> {
    let content = fs::read_to_string(env_path)?;
    let prefix = format!("{key}=");
    Ok(content
        .lines()
        .find(|line| line.starts_with(&prefix))
        .map(|line| line[prefix.len()..].to_string()))
}
