use clap::{Parser, Subcommand};
use console::style;
use fastapi_create::AppError;

#[derive(Parser)]
#[command(name = "fastapi-create")]
#[command(version)]
#[command(about = "Scaffold a new FastAPI project", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new FastAPI project
    #[clap(visible_alias = "c")]
    Create {
        /// Project name, or '.' for the current directory; prompts when omitted
        project_name: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Create { project_name } => {
            fastapi_create::create(project_name.as_deref().unwrap_or(""))
        }
    };

    if let Err(e) = result {
        match e {
            AppError::Interrupted => eprintln!("{}", style("Input interrupted by user.").yellow()),
            other => eprintln!("{}", style(format!("Error: {other}")).red()),
        }
        std::process::exit(1);
    }
}
