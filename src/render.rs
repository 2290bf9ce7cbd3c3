//! Template rendering over the bundled `templates/` directory.

use include_dir::{Dir, include_dir};
use minijinja::{Environment, Value};

use crate::error::AppError;

static TEMPLATE_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// Rendering service built once per invocation and passed explicitly.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    /// Register every bundled template with a minijinja environment.
    pub fn new() -> Result<Self, AppError> {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        for file in TEMPLATE_DIR.files() {
            let name = file
                .path()
                .to_str()
                .ok_or_else(|| AppError::internal("non-UTF-8 template file name"))?;
            let content = file.contents_utf8().ok_or_else(|| AppError::Template {
                name: name.to_string(),
                details: "template is not valid UTF-8".to_string(),
            })?;
            env.add_template(name, content).map_err(|e| AppError::Template {
                name: name.to_string(),
                details: e.to_string(),
            })?;
        }
        Ok(Self { env })
    }

    /// Render a template to whole-file content. Unknown names are fatal.
    pub fn render(&self, name: &str, ctx: &Value) -> Result<String, AppError> {
        let template = self.env.get_template(name).map_err(|e| AppError::Template {
            name: name.to_string(),
            details: e.to_string(),
        })?;
        template.render(ctx).map_err(|e| AppError::Template {
            name: name.to_string(),
            details: e.to_string(),
        })
    }
}
