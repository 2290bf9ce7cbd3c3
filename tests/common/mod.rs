//! Shared testing utilities: scripted prompts and fake external collaborators.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::Path;

use fastapi_create::error::AppError;
use fastapi_create::ports::{MigrationTool, PackageManager};
use fastapi_create::prompt::Prompter;

/// One scripted wizard answer.
#[derive(Debug, Clone)]
pub enum Answer {
    Text(&'static str),
    Confirm(bool),
    Select(usize),
    Interrupt,
}

/// Prompter that replays a fixed answer script.
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self { answers: answers.into_iter().collect() }
    }

    fn next(&mut self) -> Answer {
        self.answers.pop_front().expect("prompt asked for more input than scripted")
    }

    pub fn exhausted(&self) -> bool {
        self.answers.is_empty()
    }
}

impl Prompter for ScriptedPrompter {
    fn input(
        &mut self,
        message: &str,
        default: Option<&str>,
        _secret: bool,
    ) -> Result<String, AppError> {
        match self.next() {
            Answer::Text("") => Ok(default.unwrap_or_default().to_string()),
            Answer::Text(value) => Ok(value.to_string()),
            Answer::Interrupt => Err(AppError::Interrupted),
            other => panic!("expected text answer for '{message}', got {other:?}"),
        }
    }

    fn confirm(&mut self, message: &str, _default: bool) -> Result<bool, AppError> {
        match self.next() {
            Answer::Confirm(value) => Ok(value),
            Answer::Interrupt => Err(AppError::Interrupted),
            other => panic!("expected confirm answer for '{message}', got {other:?}"),
        }
    }

    fn select(
        &mut self,
        message: &str,
        items: &[&str],
        _default: usize,
    ) -> Result<usize, AppError> {
        match self.next() {
            Answer::Select(index) => {
                assert!(index < items.len(), "select index {index} out of range for '{message}'");
                Ok(index)
            }
            Answer::Interrupt => Err(AppError::Interrupted),
            other => panic!("expected select answer for '{message}', got {other:?}"),
        }
    }
}

/// In-memory package manager recording installs and uninstalls.
#[derive(Default)]
pub struct FakePackageManager {
    pub installed: RefCell<Vec<String>>,
    pub uninstalled: RefCell<Vec<String>>,
    /// Fail the install at this zero-based position.
    pub fail_on_install: Option<usize>,
}

impl FakePackageManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_at(index: usize) -> Self {
        Self { fail_on_install: Some(index), ..Self::default() }
    }
}

impl PackageManager for FakePackageManager {
    fn install(&self, package: &str) -> Result<(), AppError> {
        if self.fail_on_install == Some(self.installed.borrow().len()) {
            return Err(AppError::InstallFailed {
                dependency: package.to_string(),
                details: "simulated install failure".to_string(),
            });
        }
        self.installed.borrow_mut().push(package.to_string());
        Ok(())
    }

    fn uninstall(&self, package: &str) -> Result<(), AppError> {
        self.uninstalled.borrow_mut().push(package.to_string());
        Ok(())
    }

    fn freeze(&self) -> Result<Vec<String>, AppError> {
        Ok(self.installed.borrow().iter().map(|p| format!("{p}==0.0.0")).collect())
    }
}

/// Migration tool that fabricates alembic's directory and entry script.
#[derive(Default)]
pub struct FakeMigrationTool {
    pub should_fail: bool,
    pub initialized: RefCell<Vec<String>>,
}

impl FakeMigrationTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self { should_fail: true, ..Self::default() }
    }
}

impl MigrationTool for FakeMigrationTool {
    fn init(&self, base_path: &Path, folder: &str) -> Result<(), AppError> {
        if self.should_fail {
            return Err(AppError::MigrationInitFailed("simulated failure".to_string()));
        }
        let dir = base_path.join(folder);
        std::fs::create_dir_all(dir.join("versions"))?;
        std::fs::write(dir.join("env.py"), "# generated by alembic init\n")?;
        self.initialized.borrow_mut().push(folder.to_string());
        Ok(())
    }
}

/// Script for a minimal run: sync sqlite `:memory:`, SMTP/auth/migrations
/// declined, CORS accepted.
pub fn minimal_answers() -> Vec<Answer> {
    vec![
        Answer::Select(1), // sync
        Answer::Select(2), // sqlite
        Answer::Text(":memory:"),
        Answer::Confirm(false), // smtp
        Answer::Confirm(false), // auth
        Answer::Confirm(false), // migrations
        Answer::Confirm(true),  // cors
    ]
}

/// Script for a fully-featured run: async postgresql, SMTP, JWT auth with
/// verification, migrations, CORS.
pub fn full_answers() -> Vec<Answer> {
    vec![
        Answer::Select(0), // async
        Answer::Select(0), // postgresql
        Answer::Text("user:pass@localhost:5432/app"),
        Answer::Confirm(true), // smtp
        Answer::Text("smtp.example.com"),
        Answer::Text(""), // port -> default 587
        Answer::Text("bot@example.com"),
        Answer::Text("hunter2"),
        Answer::Confirm(true), // auth
        Answer::Select(0),     // JWT
        Answer::Text(""),      // model -> default User
        Answer::Text("email,username"),
        Answer::Select(0),     // login via email
        Answer::Confirm(true), // verification
        Answer::Confirm(true), // migrations
        Answer::Text(""),      // folder -> default alembic
        Answer::Confirm(true), // cors
    ]
}
