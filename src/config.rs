//! Project configuration assembled by the wizard and consumed read-only by the
//! build pipeline.

use serde::Serialize;

/// Base Python dependencies installed for every generated project.
pub const BASE_DEPENDENCIES: [&str; 5] = [
    "fastapi[all]",
    "pydantic-settings",
    "pydantic-extra-types",
    "alembic",
    "passlib[bcrypt]",
];

/// Whether the generated application uses async or sync SQLAlchemy plumbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreadMode {
    Async,
    Sync,
}

impl ThreadMode {
    pub const ALL: [ThreadMode; 2] = [ThreadMode::Async, ThreadMode::Sync];

    pub fn label(self) -> &'static str {
        match self {
            ThreadMode::Async => "async",
            ThreadMode::Sync => "sync",
        }
    }

    pub fn is_async(self) -> bool {
        self == ThreadMode::Async
    }
}

/// Supported database engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DbEngine {
    Postgresql,
    Mysql,
    Sqlite,
    Mariadb,
}

impl DbEngine {
    pub const ALL: [DbEngine; 4] =
        [DbEngine::Postgresql, DbEngine::Mysql, DbEngine::Sqlite, DbEngine::Mariadb];

    pub fn label(self) -> &'static str {
        match self {
            DbEngine::Postgresql => "postgresql",
            DbEngine::Mysql => "mysql",
            DbEngine::Sqlite => "sqlite",
            DbEngine::Mariadb => "mariadb",
        }
    }

    /// Python driver package for the (engine, thread-mode) pair. SQLite needs
    /// no driver in sync mode.
    pub fn driver(self, mode: ThreadMode) -> Option<&'static str> {
        match (self, mode) {
            (DbEngine::Postgresql, _) => Some("psycopg"),
            (DbEngine::Mysql | DbEngine::Mariadb, ThreadMode::Async) => Some("asyncmy"),
            (DbEngine::Mysql | DbEngine::Mariadb, ThreadMode::Sync) => Some("pymysql"),
            (DbEngine::Sqlite, ThreadMode::Async) => Some("aiosqlite"),
            (DbEngine::Sqlite, ThreadMode::Sync) => None,
        }
    }

    /// SQLAlchemy URL scheme for the (engine, thread-mode) pair.
    pub fn url_prefix(self, mode: ThreadMode) -> &'static str {
        match (self, mode) {
            (DbEngine::Postgresql, _) => "postgresql+psycopg",
            (DbEngine::Mysql | DbEngine::Mariadb, ThreadMode::Async) => "mysql+asyncmy",
            (DbEngine::Mysql | DbEngine::Mariadb, ThreadMode::Sync) => "mysql+pymysql",
            (DbEngine::Sqlite, ThreadMode::Async) => "sqlite+aiosqlite",
            (DbEngine::Sqlite, ThreadMode::Sync) => "sqlite",
        }
    }

    /// Full connection URL from a validated detail string (path for SQLite,
    /// `user:password@host[:port]/dbname` otherwise).
    pub fn build_url(self, mode: ThreadMode, detail: &str) -> String {
        match self {
            DbEngine::Sqlite => format!("{}:///{}", self.url_prefix(mode), detail),
            _ => format!("{}://{}", self.url_prefix(mode), detail),
        }
    }
}

/// Authentication backend of the generated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthSystem {
    Jwt,
    Session,
}

impl AuthSystem {
    pub const ALL: [AuthSystem; 2] = [AuthSystem::Jwt, AuthSystem::Session];

    pub fn label(self) -> &'static str {
        match self {
            AuthSystem::Jwt => "JWT",
            AuthSystem::Session => "Session",
        }
    }

    /// Lowercase form used in env files and template contexts.
    pub fn as_str(self) -> &'static str {
        match self {
            AuthSystem::Jwt => "jwt",
            AuthSystem::Session => "session",
        }
    }
}

/// Signup fields the auth model may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthField {
    Email,
    Username,
    Phone,
}

impl AuthField {
    pub fn as_str(self) -> &'static str {
        match self {
            AuthField::Email => "email",
            AuthField::Username => "username",
            AuthField::Phone => "phone",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "email" => Some(AuthField::Email),
            "username" => Some(AuthField::Username),
            "phone" => Some(AuthField::Phone),
            _ => None,
        }
    }
}

/// Parse a validated comma-separated field list into an ordered, deduplicated set.
pub fn parse_required_fields(value: &str) -> Vec<AuthField> {
    let mut fields = Vec::new();
    for token in value.split(',') {
        if let Some(field) = AuthField::parse(token.trim())
            && !fields.contains(&field)
        {
            fields.push(field);
        }
    }
    fields
}

#[derive(Debug, Clone, Serialize)]
pub struct DatabaseConfig {
    pub engine: DbEngine,
    /// Driver package to install, when the engine needs one.
    pub driver: Option<&'static str>,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthConfig {
    pub system: AuthSystem,
    pub model: String,
    pub required_fields: Vec<AuthField>,
    pub login_field: AuthField,
    pub verification_enabled: bool,
}

impl AuthConfig {
    pub fn requires(&self, field: AuthField) -> bool {
        self.required_fields.contains(&field)
    }
}

/// The accumulated result of the wizard. Gated groups are `Option`s so a
/// partial SMTP or auth configuration is unrepresentable; declined toggles
/// are `None`/false, never unset.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectConfiguration {
    pub thread_mode: ThreadMode,
    pub database: DatabaseConfig,
    pub smtp: Option<SmtpConfig>,
    pub auth: Option<AuthConfig>,
    /// Alembic folder name when migrations are enabled.
    pub migrations_folder: Option<String>,
    pub cors_enabled: bool,
}

impl ProjectConfiguration {
    pub fn is_async(&self) -> bool {
        self.thread_mode.is_async()
    }

    pub fn smtp_enabled(&self) -> bool {
        self.smtp.is_some()
    }

    pub fn auth_enabled(&self) -> bool {
        self.auth.is_some()
    }

    pub fn verification_enabled(&self) -> bool {
        self.auth.as_ref().is_some_and(|auth| auth.verification_enabled)
    }

    /// The ordered Python dependency set for this configuration.
    pub fn resolve_dependencies(&self) -> Vec<String> {
        let mut dependencies: Vec<String> =
            BASE_DEPENDENCIES.iter().map(|dep| dep.to_string()).collect();
        if self.is_async() {
            dependencies.push("sqlalchemy[asyncio]".to_string());
            dependencies.push("aiosmtplib".to_string());
        } else {
            dependencies.push("sqlalchemy".to_string());
        }
        if let Some(driver) = self.database.driver {
            dependencies.push(driver.to_string());
        }
        if let Some(auth) = &self.auth
            && auth.system == AuthSystem::Jwt
        {
            dependencies.push("pyjwt".to_string());
        }
        dependencies
    }
}
