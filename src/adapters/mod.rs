mod alembic_command;
mod pip_command;

pub use alembic_command::AlembicCommand;
pub use pip_command::PipCommand;
