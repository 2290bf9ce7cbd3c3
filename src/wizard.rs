//! Configuration wizard: a fixed, ordered decision tree of prompts.
//!
//! Steps are declared as a table of gated entries evaluated against the
//! in-progress draft, so conditional branches (SMTP-dependent verification,
//! engine-dependent connection prompts) stay flat and testable.

use crate::config::{
    AuthConfig, AuthSystem, DatabaseConfig, DbEngine, ProjectConfiguration, SmtpConfig,
    ThreadMode, parse_required_fields,
};
use crate::error::AppError;
use crate::prompt::{PromptSpec, Prompter, prompt_until_valid};
use crate::ui::Ui;
use crate::validate;

/// Mutable-during-construction wizard state. Converted into an immutable
/// `ProjectConfiguration` once every step has run.
#[derive(Debug, Default)]
struct Draft {
    thread_mode: Option<ThreadMode>,
    database: Option<DatabaseConfig>,
    smtp: Option<SmtpConfig>,
    auth: Option<AuthConfig>,
    migrations_folder: Option<String>,
    cors_enabled: bool,
}

impl Draft {
    fn thread_mode(&self) -> ThreadMode {
        self.thread_mode.unwrap_or(ThreadMode::Async)
    }

    fn finish(self) -> Result<ProjectConfiguration, AppError> {
        let thread_mode = self
            .thread_mode
            .ok_or_else(|| AppError::internal("wizard finished without a thread mode"))?;
        let database = self
            .database
            .ok_or_else(|| AppError::internal("wizard finished without a database"))?;
        Ok(ProjectConfiguration {
            thread_mode,
            database,
            smtp: self.smtp,
            auth: self.auth,
            migrations_folder: self.migrations_folder,
            cors_enabled: self.cors_enabled,
        })
    }
}

struct WizardStep {
    enabled: fn(&Draft) -> bool,
    run: fn(&mut dyn Prompter, &Ui, &mut Draft) -> Result<(), AppError>,
}

fn always(_draft: &Draft) -> bool {
    true
}

const STEPS: &[WizardStep] = &[
    WizardStep { enabled: always, run: ask_thread_mode },
    WizardStep { enabled: always, run: ask_database },
    WizardStep { enabled: always, run: ask_smtp },
    WizardStep { enabled: always, run: ask_auth },
    WizardStep {
        enabled: |draft| draft.auth.is_some() && draft.smtp.is_some(),
        run: ask_verification,
    },
    WizardStep { enabled: always, run: ask_migrations },
    WizardStep { enabled: always, run: ask_cors },
];

/// Run every applicable step in order and return the finished configuration.
pub fn run_wizard(
    prompter: &mut dyn Prompter,
    ui: &Ui,
) -> Result<ProjectConfiguration, AppError> {
    let mut draft = Draft::default();
    for step in STEPS {
        if (step.enabled)(&draft) {
            (step.run)(prompter, ui, &mut draft)?;
        }
    }
    draft.finish()
}

fn ask_thread_mode(
    prompter: &mut dyn Prompter,
    _ui: &Ui,
    draft: &mut Draft,
) -> Result<(), AppError> {
    let items: Vec<&str> = ThreadMode::ALL.iter().map(|mode| mode.label()).collect();
    let choice = prompter.select(
        "Do you want your FastAPI application to be synchronous or asynchronous?",
        &items,
        0,
    )?;
    draft.thread_mode = Some(ThreadMode::ALL[choice]);
    Ok(())
}

fn ask_database(prompter: &mut dyn Prompter, ui: &Ui, draft: &mut Draft) -> Result<(), AppError> {
    let items: Vec<&str> = DbEngine::ALL.iter().map(|engine| engine.label()).collect();
    let choice = prompter.select("Which database are you using?", &items, 0)?;
    let engine = DbEngine::ALL[choice];
    let mode = draft.thread_mode();

    let detail = if engine == DbEngine::Sqlite {
        prompt_until_valid(
            prompter,
            ui,
            &PromptSpec::new(
                "Enter the path to the SQLite database file",
                validate::is_valid_sqlite_path,
                "Error: Directory does not exist or is not writable",
            ),
        )?
    } else {
        prompt_until_valid(
            prompter,
            ui,
            &PromptSpec::new(
                "Enter the database connection details (e.g., user:password@host:port/dbname)",
                validate::is_valid_db_url,
                "Error: Invalid format. Expected: user:password@host[:port]/dbname",
            ),
        )?
    };

    draft.database = Some(DatabaseConfig {
        engine,
        driver: engine.driver(mode),
        url: engine.build_url(mode, &detail),
    });
    Ok(())
}

fn ask_smtp(prompter: &mut dyn Prompter, ui: &Ui, draft: &mut Draft) -> Result<(), AppError> {
    if !prompter.confirm("Do you need SMTP setup?", true)? {
        draft.smtp = None;
        return Ok(());
    }
    let host = prompt_until_valid(
        prompter,
        ui,
        &PromptSpec::new(
            "Enter SMTP host (e.g., smtp.gmail.com)",
            validate::is_valid_smtp_host,
            "Error: Invalid SMTP host",
        ),
    )?;
    let port_text = prompt_until_valid(
        prompter,
        ui,
        &PromptSpec::new(
            "Enter SMTP port (e.g., 587)",
            validate::is_valid_smtp_port,
            "Error: Invalid SMTP port",
        )
        .with_default("587"),
    )?;
    let port = port_text
        .parse::<u16>()
        .map_err(|_| AppError::internal(format!("validated SMTP port '{port_text}' did not parse")))?;
    let username = prompt_until_valid(
        prompter,
        ui,
        &PromptSpec::new(
            "Enter SMTP username",
            validate::is_valid_smtp_username,
            "Error: Invalid SMTP username",
        ),
    )?;
    let password = prompter.input("Enter SMTP password", None, true)?;

    draft.smtp = Some(SmtpConfig { host, port, username, password });
    ui.success("SMTP settings configured successfully!");
    Ok(())
}

fn ask_auth(prompter: &mut dyn Prompter, ui: &Ui, draft: &mut Draft) -> Result<(), AppError> {
    if !prompter.confirm("Do you want to include authentication and authorization?", true)? {
        draft.auth = None;
        return Ok(());
    }
    let items: Vec<&str> = AuthSystem::ALL.iter().map(|system| system.label()).collect();
    let choice =
        prompter.select("Which authentication system do you want to use?", &items, 0)?;
    let system = AuthSystem::ALL[choice];

    let model = prompt_until_valid(
        prompter,
        ui,
        &PromptSpec::new(
            "Enter the name of the authentication model",
            validate::is_valid_identifier,
            "Error: Model name must be a valid identifier",
        )
        .with_default("User"),
    )?;

    let fields_text = prompt_until_valid(
        prompter,
        ui,
        &PromptSpec::new(
            "Which fields are required for signup? (comma-separated list of 'email', 'username', 'phone')",
            validate::is_valid_required_fields,
            "Error: Fields must be a comma-separated list of 'email', 'username', 'phone'",
        )
        .with_default("email"),
    )?;
    let required_fields = parse_required_fields(&fields_text);
    if required_fields.is_empty() {
        return Err(AppError::internal("validated required-field list parsed empty"));
    }

    let field_items: Vec<&str> =
        required_fields.iter().map(|field| field.as_str()).collect();
    let login_choice =
        prompter.select("Which field should be used for login?", &field_items, 0)?;
    let login_field = required_fields[login_choice];

    draft.auth = Some(AuthConfig {
        system,
        model,
        required_fields,
        login_field,
        // Flipped by the verification step when SMTP is enabled.
        verification_enabled: false,
    });
    Ok(())
}

fn ask_verification(
    prompter: &mut dyn Prompter,
    _ui: &Ui,
    draft: &mut Draft,
) -> Result<(), AppError> {
    let enabled = prompter
        .confirm("Do you want to include email verification for user registration?", true)?;
    if let Some(auth) = draft.auth.as_mut() {
        auth.verification_enabled = enabled;
    }
    Ok(())
}

fn ask_migrations(
    prompter: &mut dyn Prompter,
    ui: &Ui,
    draft: &mut Draft,
) -> Result<(), AppError> {
    if !prompter.confirm("Do you want to include Alembic migrations?", true)? {
        draft.migrations_folder = None;
        return Ok(());
    }
    let folder = prompt_until_valid(
        prompter,
        ui,
        &PromptSpec::new(
            "Enter the name of the Alembic folder",
            validate::is_valid_directory_name,
            "Error: Invalid Alembic folder name. Must be a valid directory name.",
        )
        .with_default("alembic"),
    )?;
    draft.migrations_folder = Some(folder);
    Ok(())
}

fn ask_cors(prompter: &mut dyn Prompter, _ui: &Ui, draft: &mut Draft) -> Result<(), AppError> {
    draft.cors_enabled = prompter.confirm("Do you want to include CORS middleware?", true)?;
    Ok(())
}
